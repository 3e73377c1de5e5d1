//! Compile-time configuration: timing, thresholds, channel and button tables.
//!
//! Nothing here is adjustable at runtime. Customize by editing the consts or
//! by building your own [`AxisConfig`] values.

use crate::debounce::DebouncePolicy;
use crate::mux::MuxChannel;
use crate::power::DwellPolicy;
use crate::types::{AxisId, ButtonCode};

/// Readings averaged per axis.
pub const WINDOW_SIZE: usize = 3;

/// Raw value of a centered 12-bit input.
pub const ADC_MIDPOINT: i32 = 2048;

/// Dead zone of the coarse (stock joystick) variant, in raw counts.
pub const DEAD_ZONE_COARSE: u16 = 800;

/// Dead zone of the fine variant, in raw counts.
pub const DEAD_ZONE_FINE: u16 = 30;

/// Sampling period of the pointer axes.
pub const POINTER_PERIOD_MS: u64 = 10;

/// Sampling period of the directional pair.
pub const DIRECTIONAL_PERIOD_MS: u64 = 50;

/// Minimum spacing between accepted events of one button.
pub const DEBOUNCE_MS: u64 = 50;

/// Settle time after switching the multiplexer.
pub const MUX_SETTLE_US: u32 = 50;

/// Depth of the analog event queue.
pub const ANALOG_QUEUE_DEPTH: usize = 32;

/// Depth of the button event queue.
pub const BUTTON_QUEUE_DEPTH: usize = 32;

/// Depth of the buzzer trigger queue.
pub const BUZZER_QUEUE_DEPTH: usize = 4;

/// Buzzer tone frequency.
pub const BUZZER_FREQ_HZ: u32 = 2_000;

/// Buzzer tone length.
pub const BUZZER_DURATION_MS: u32 = 100;

/// Minimum dwell before a power toggle is honored.
pub const POWER_DWELL_MS: u64 = 5_000;

/// Dwell policy used by the firmware.
pub const DEFAULT_DWELL: DwellPolicy = DwellPolicy::symmetric(POWER_DWELL_MS);

/// Debounce policy used by the firmware, chosen by the `debounce-per-edge` feature.
#[cfg(not(feature = "debounce-per-edge"))]
pub const DEFAULT_DEBOUNCE_POLICY: DebouncePolicy = DebouncePolicy::SharedPerCode;

/// Debounce policy used by the firmware, chosen by the `debounce-per-edge` feature.
#[cfg(feature = "debounce-per-edge")]
pub const DEFAULT_DEBOUNCE_POLICY: DebouncePolicy = DebouncePolicy::PerEdge;

/// Per-axis sampling configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisConfig {
    /// Logical axis this sampler reports.
    pub axis: AxisId,
    /// Multiplexer input carrying the axis.
    pub channel: MuxChannel,
    /// Sampling period in milliseconds.
    pub period_ms: u64,
    /// Offsets strictly below this magnitude are treated as rest.
    pub dead_zone: u16,
}

/// Pointer X: mux input 2.
pub const POINTER_X: AxisConfig = AxisConfig {
    axis: AxisId::X,
    channel: MuxChannel::CH2,
    period_ms: POINTER_PERIOD_MS,
    dead_zone: DEAD_ZONE_COARSE,
};

/// Pointer Y: mux input 3.
pub const POINTER_Y: AxisConfig = AxisConfig {
    axis: AxisId::Y,
    channel: MuxChannel::CH3,
    period_ms: POINTER_PERIOD_MS,
    dead_zone: DEAD_ZONE_COARSE,
};

/// Directional horizontal: mux input 0.
pub const DIRECTIONAL_H: AxisConfig = AxisConfig {
    axis: AxisId::DirH,
    channel: MuxChannel::CH0,
    period_ms: DIRECTIONAL_PERIOD_MS,
    dead_zone: DEAD_ZONE_COARSE,
};

/// Directional vertical: mux input 1.
pub const DIRECTIONAL_V: AxisConfig = AxisConfig {
    axis: AxisId::DirV,
    channel: MuxChannel::CH1,
    period_ms: DIRECTIONAL_PERIOD_MS,
    dead_zone: DEAD_ZONE_COARSE,
};

/// Every sampled axis.
pub const AXES: [AxisConfig; 4] = [POINTER_X, POINTER_Y, DIRECTIONAL_H, DIRECTIONAL_V];

/// Binds a GPIO to a logical button code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonBinding {
    pub gpio: u8,
    pub code: ButtonCode,
}

/// Game buttons: active low with pull-ups, both edges watched.
pub const BUTTON_MAP: [ButtonBinding; 5] = [
    ButtonBinding { gpio: 16, code: ButtonCode::JUMP },
    ButtonBinding { gpio: 17, code: ButtonCode::RELOAD },
    ButtonBinding { gpio: 18, code: ButtonCode::FIRE },
    ButtonBinding { gpio: 19, code: ButtonCode::SPRINT },
    ButtonBinding { gpio: 20, code: ButtonCode::INTERACT },
];

/// Button whose accepted presses sound the buzzer.
pub const ACTION_BUTTON: ButtonCode = ButtonCode::FIRE;
