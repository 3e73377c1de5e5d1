//! Output sink traits and error types.

use core::future::Future;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;
use joymux_proto::Frame;

/// Error type for output operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// Serial/communication I/O error.
    Io,
    /// Frame did not fit the staging buffer.
    Encode,
}

impl core::fmt::Display for OutputError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            OutputError::Io => write!(f, "output I/O error"),
            OutputError::Encode => write!(f, "frame encoding failed"),
        }
    }
}

impl From<joymux_proto::SerializeError> for OutputError {
    fn from(err: joymux_proto::SerializeError) -> Self {
        match err {
            joymux_proto::SerializeError::BufferTooSmall => OutputError::Encode,
        }
    }
}

/// Async trait for the framed output stream.
///
/// A call writes one whole frame. Sinks shared by several dispatchers go
/// through the `&Mutex<_, S>` impl so frames never interleave.
pub trait FrameSink {
    /// Serialize and transmit a frame.
    fn send(&mut self, frame: &Frame) -> impl Future<Output = Result<(), OutputError>>;
}

impl<M: RawMutex, S: FrameSink> FrameSink for &Mutex<M, S> {
    async fn send(&mut self, frame: &Frame) -> Result<(), OutputError> {
        let mut sink = self.lock().await;
        sink.send(frame).await
    }
}

/// Something that can be sounded once, like the buzzer.
pub trait Actuator {
    /// Produce one tone. Returns when the tone has finished.
    fn sound(&mut self) -> impl Future<Output = ()>;
}
