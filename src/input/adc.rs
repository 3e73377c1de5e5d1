//! Multiplexed ADC source.
//!
//! One ADC input (GPIO 28) reads whichever of eight analog lines the
//! multiplexer routes to it. Every read drives the three address lines,
//! waits for the mux to settle and converts.
//!
//! # Pins
//!
//! - GPIO 11/12/13: address bits 0/1/2
//! - GPIO 28: mux common output (ADC input 2)

use embassy_rp::adc::{Adc, Async, Channel, Error as AdcError};
use embassy_rp::gpio::Output;
use embassy_time::Delay;
use joymux_core::{AnalogSource, InputError, MuxChannel, MuxSelector};

#[inline]
fn adc_error_to_input_error(_e: AdcError) -> InputError {
    InputError::Adc
}

/// ADC input behind the 8:1 analog multiplexer.
pub struct MuxedAdc<'d> {
    mux: MuxSelector<Output<'d>, Delay>,
    adc: Adc<'d, Async>,
    common: Channel<'d>,
}

impl<'d> MuxedAdc<'d> {
    /// `lines` are address bits 0, 1, 2; `common` is the ADC channel wired
    /// to the mux output.
    #[must_use]
    pub fn new(
        lines: [Output<'d>; 3],
        settle_us: u32,
        adc: Adc<'d, Async>,
        common: Channel<'d>,
    ) -> Self {
        Self {
            mux: MuxSelector::new(lines, Delay, settle_us),
            adc,
            common,
        }
    }
}

impl AnalogSource for MuxedAdc<'_> {
    async fn read(&mut self, channel: MuxChannel) -> Result<u16, InputError> {
        self.mux.select(channel).map_err(|e| match e {})?;
        self.adc
            .read(&mut self.common)
            .await
            .map_err(adc_error_to_input_error)
    }
}
