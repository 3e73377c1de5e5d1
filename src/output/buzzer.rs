//! Piezo buzzer driven by toggling a GPIO.
//!
//! The square wave is timed with an Embassy [`Ticker`], so the thread
//! executor keeps running other tasks between edges.

use embassy_rp::gpio::Output;
use embassy_time::{Duration, Ticker};
use joymux_core::Actuator;

pub struct PinBuzzer<'d> {
    pin: Output<'d>,
    half_period: Duration,
    toggles: u32,
}

impl<'d> PinBuzzer<'d> {
    /// Tone of `freq_hz` lasting `duration_ms`.
    #[must_use]
    pub fn new(pin: Output<'d>, freq_hz: u32, duration_ms: u32) -> Self {
        let freq_hz = freq_hz.max(1);
        Self {
            pin,
            half_period: Duration::from_micros(500_000 / u64::from(freq_hz)),
            toggles: freq_hz * duration_ms / 500,
        }
    }
}

impl Actuator for PinBuzzer<'_> {
    async fn sound(&mut self) {
        let mut ticker = Ticker::every(self.half_period);
        for _ in 0..self.toggles {
            self.pin.toggle();
            ticker.next().await;
        }
        self.pin.set_low();
    }
}
