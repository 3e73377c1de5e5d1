//! Queue item types. Wire-level types are re-exported from `joymux-proto`.

pub use joymux_proto::{
    AxisId, AxisSample, ButtonCode, ButtonEvent, DirSelector, DirectionalCommand, Frame,
};

/// Item of the analog queue: a pointer sample or a directional command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnalogEvent {
    Axis(AxisSample),
    Directional(DirectionalCommand),
}

impl From<AnalogEvent> for Frame {
    fn from(event: AnalogEvent) -> Self {
        match event {
            AnalogEvent::Axis(sample) => Frame::Axis(sample),
            AnalogEvent::Directional(cmd) => Frame::Directional(cmd),
        }
    }
}

/// Item of the button queue: an edge stamped when it was captured.
///
/// Debounce compares `at_ms` values, so consumer latency never shortens or
/// stretches the interval between edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CapturedEdge {
    pub event: ButtonEvent,
    pub at_ms: u64,
}

impl CapturedEdge {
    #[must_use]
    pub const fn new(event: ButtonEvent, at_ms: u64) -> Self {
        Self { event, at_ms }
    }
}

/// Request to sound the buzzer once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BuzzerTrigger;

/// Result of a non-blocking enqueue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Enqueue {
    Queued,
    /// Queue was full; the item is gone.
    Dropped,
}
