//! Input collaborator traits and error types.

use core::future::Future;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;

use crate::mux::MuxChannel;

/// Error type for input operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// ADC conversion failed.
    Adc,
    /// Source is gone.
    Disconnected,
}

impl core::fmt::Display for InputError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InputError::Adc => write!(f, "ADC read failed"),
            InputError::Disconnected => write!(f, "input disconnected"),
        }
    }
}

/// Async trait for multiplexed analog sources.
///
/// One call selects `channel`, waits for it to settle and converts it.
/// Implementations shared between tasks must keep select and read together;
/// the impl for `&Mutex<_, S>` does that by holding the lock across both.
pub trait AnalogSource {
    /// Read the raw 12-bit value on a multiplexer channel.
    fn read(&mut self, channel: MuxChannel) -> impl Future<Output = Result<u16, InputError>>;
}

impl<M: RawMutex, S: AnalogSource> AnalogSource for &Mutex<M, S> {
    async fn read(&mut self, channel: MuxChannel) -> Result<u16, InputError> {
        let mut source = self.lock().await;
        source.read(channel).await
    }
}

/// Monotonic milliseconds since boot.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}
