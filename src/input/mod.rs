//! Input collaborators backed by RP2040 peripherals.

pub mod adc;

pub use adc::MuxedAdc;

use embassy_time::Instant;
use joymux_core::Clock;

/// Milliseconds since boot from the Embassy time driver.
#[derive(Clone, Copy, Debug, Default)]
pub struct UptimeClock;

impl Clock for UptimeClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}
