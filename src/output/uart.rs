//! UART frame sink.
//!
//! Writes each frame as one DMA transfer on UART0 TX (GPIO 0), 115200 8N1.

use embassy_rp::uart::{Async, Error as UartError, UartTx};
use joymux_core::{FrameSink, OutputError};
use joymux_proto::{Frame, Serialize, MAX_FRAME_LEN};

/// Convert UART errors to [`OutputError`].
///
/// This is a helper function instead of a `From` impl to avoid orphan rule issues
/// (both `UartError` and `OutputError` are defined in external crates).
#[inline]
fn uart_error_to_output_error(_e: UartError) -> OutputError {
    OutputError::Io
}

/// Frame sink over an async UART transmitter.
pub struct UartFrameSink<'d> {
    tx: UartTx<'d, Async>,
}

impl<'d> UartFrameSink<'d> {
    #[must_use]
    pub fn new(tx: UartTx<'d, Async>) -> Self {
        Self { tx }
    }
}

impl FrameSink for UartFrameSink<'_> {
    async fn send(&mut self, frame: &Frame) -> Result<(), OutputError> {
        let bytes = frame.serialize_to_vec::<MAX_FRAME_LEN>()?;
        self.tx
            .write(&bytes)
            .await
            .map_err(uart_error_to_output_error)
    }
}
