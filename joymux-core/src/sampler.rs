//! Analog axis sampling: moving-average window, dead zone, quantization and
//! the emit-on-change rule.
//!
//! A sampler primes until its window holds [`WINDOW_SIZE`] readings, then
//! evaluates once per reading. It emits while the axis is deflected and once
//! more on the transition back to rest; a resting axis stays silent.

use crate::config::{AxisConfig, ADC_MIDPOINT, WINDOW_SIZE};
use crate::input::{AnalogSource, InputError};
use crate::mux::MuxChannel;
use crate::types::{AnalogEvent, AxisId, AxisSample, DirectionalCommand};
use joymux_proto::MAGNITUDE_MAX;

/// Circular buffer of the last `N` raw readings.
#[derive(Debug, Clone)]
pub struct SamplingWindow<const N: usize> {
    readings: [u16; N],
    cursor: usize,
    filled: usize,
}

impl<const N: usize> Default for SamplingWindow<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> SamplingWindow<N> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            readings: [0; N],
            cursor: 0,
            filled: 0,
        }
    }

    /// Store a reading, overwriting the oldest once full.
    pub fn push(&mut self, raw: u16) {
        self.readings[self.cursor] = raw;
        self.cursor = (self.cursor + 1) % N;
        if self.filled < N {
            self.filled += 1;
        }
    }

    /// Whether `N` readings are held.
    #[must_use]
    pub fn is_primed(&self) -> bool {
        self.filled == N
    }

    /// Integer mean of the window, `None` while priming.
    #[must_use]
    pub fn mean(&self) -> Option<u16> {
        if !self.is_primed() {
            return None;
        }
        let sum: u32 = self.readings.iter().map(|&r| u32::from(r)).sum();
        Some((sum / N as u32) as u16)
    }

    pub fn clear(&mut self) {
        self.cursor = 0;
        self.filled = 0;
    }
}

/// A mean reading mapped onto the output scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Quantized {
    pub magnitude: i16,
    pub at_rest: bool,
}

/// Map a mean onto [-50, 50].
///
/// At rest iff `|mean - 2048| < dead_zone`; a rest reading has magnitude 0.
/// Otherwise the offset scales by 50/2048, truncating toward zero, and clamps.
#[must_use]
pub fn quantize(mean: u16, dead_zone: u16) -> Quantized {
    let offset = i32::from(mean) - ADC_MIDPOINT;
    if offset.unsigned_abs() < u32::from(dead_zone) {
        return Quantized {
            magnitude: 0,
            at_rest: true,
        };
    }
    let full = i32::from(MAGNITUDE_MAX);
    let magnitude = (offset * full / ADC_MIDPOINT).clamp(-full, full) as i16;
    Quantized {
        magnitude,
        at_rest: false,
    }
}

/// Window, dead zone and the rest flag of the previous evaluation.
#[derive(Debug, Clone)]
pub struct AxisFilter<const N: usize> {
    window: SamplingWindow<N>,
    dead_zone: u16,
    last_at_rest: bool,
}

impl<const N: usize> AxisFilter<N> {
    #[must_use]
    pub const fn new(dead_zone: u16) -> Self {
        Self {
            window: SamplingWindow::new(),
            dead_zone,
            last_at_rest: true,
        }
    }

    /// Feed a reading. Returns the quantized value when it should be emitted.
    pub fn update(&mut self, raw: u16) -> Option<Quantized> {
        self.window.push(raw);
        let mean = self.window.mean()?;
        let q = quantize(mean, self.dead_zone);
        let emit = !q.at_rest || !self.last_at_rest;
        self.last_at_rest = q.at_rest;
        emit.then_some(q)
    }

    /// Back to priming with the axis assumed at rest.
    pub fn reset(&mut self) {
        self.window.clear();
        self.last_at_rest = true;
    }

    #[must_use]
    pub fn is_primed(&self) -> bool {
        self.window.is_primed()
    }
}

/// Sampler for one axis role.
///
/// Pointer axes produce [`AnalogEvent::Axis`]. Directional axes turn the sign
/// of the magnitude into a key command; their return to rest carries
/// magnitude 0 and so produces nothing.
#[derive(Debug, Clone)]
pub struct AxisSampler {
    axis: AxisId,
    channel: MuxChannel,
    filter: AxisFilter<WINDOW_SIZE>,
}

impl AxisSampler {
    #[must_use]
    pub const fn new(config: &AxisConfig) -> Self {
        Self {
            axis: config.axis,
            channel: config.channel,
            filter: AxisFilter::new(config.dead_zone),
        }
    }

    #[must_use]
    pub fn axis(&self) -> AxisId {
        self.axis
    }

    /// Process one raw reading.
    pub fn ingest(&mut self, raw: u16) -> Option<AnalogEvent> {
        let q = self.filter.update(raw)?;
        match self.axis.selector() {
            None => Some(AnalogEvent::Axis(AxisSample::new(self.axis, q.magnitude))),
            Some(selector) => DirectionalCommand::from_magnitude(selector, q.magnitude)
                .map(AnalogEvent::Directional),
        }
    }

    /// Read the axis channel from `source` and process the reading.
    ///
    /// A failed read leaves the window untouched.
    pub async fn sample<S: AnalogSource>(
        &mut self,
        source: &mut S,
    ) -> Result<Option<AnalogEvent>, InputError> {
        let raw = source.read(self.channel).await?;
        Ok(self.ingest(raw))
    }

    /// Start a new session: re-prime and assume rest.
    pub fn reset(&mut self) {
        self.filter.reset();
    }
}
