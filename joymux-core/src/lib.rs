//! Platform-agnostic acquisition and dispatch pipeline for the joymux
//! input device.
//!
//! This crate holds everything between the pins and the serial stream
//! without depending on a particular HAL. It can be used both in embedded
//! `no_std` environments and on host for testing.
//!
//! # Overview
//!
//! - [`config`]: compile-time tables and timing ([`AxisConfig`], [`BUTTON_MAP`])
//! - [`mux`]: address-line driver for the analog multiplexer ([`MuxSelector`])
//! - [`sampler`]: moving-average window, dead zone and quantization ([`AxisSampler`])
//! - [`button`]: edge capture for the game buttons ([`EdgeCapture`])
//! - [`debounce`]: time-based debounce ([`Debouncer`])
//! - [`power`]: dwell-guarded power toggle and the run gate ([`PowerController`])
//! - [`pipeline`]: queues, toggle signal and run status ([`Pipeline`])
//! - [`dispatch`]: queue to frame forwarding ([`AnalogDispatcher`], [`ButtonDispatcher`])
//! - [`buzzer`]: tone on action presses ([`Buzzer`])
//! - [`input`] / [`output`]: collaborator traits ([`AnalogSource`], [`Clock`],
//!   [`FrameSink`], [`Actuator`])
//!
//! # Data flow
//!
//! ```text
//! samplers ──try_send──► analog queue ──► AnalogDispatcher ──┐
//!                                                           ├──► FrameSink
//! edge handler ─try_send─► button queue ─► ButtonDispatcher ─┘
//!                                              └──► buzzer queue ──► Buzzer
//! power button ─signal─► PowerController ──publish──► run gate (all of the above)
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//! - **`debounce-per-edge`**: Time press and release edges separately
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod button;
pub mod buzzer;
pub mod config;
pub mod debounce;
pub mod dispatch;
pub mod input;
pub mod mux;
pub mod output;
pub mod pipeline;
pub mod power;
pub mod sampler;
pub mod types;

#[cfg(test)]
mod scenarios;
#[cfg(test)]
mod testutil;

// Re-export main types at crate root
pub use button::{code_for_gpio, ButtonInput, Capture, EdgeCapture};
pub use buzzer::Buzzer;
pub use config::{AxisConfig, ButtonBinding, AXES, BUTTON_MAP};
pub use debounce::{Debounce, DebouncePolicy, Debouncer};
pub use dispatch::{AnalogDispatcher, ButtonDispatch, ButtonDispatcher, Dispatch, DispatchError};
pub use input::{AnalogSource, Clock, InputError};
pub use mux::{MuxChannel, MuxSelector};
pub use output::{Actuator, FrameSink, OutputError};
pub use pipeline::{Pipeline, GATE_SUBSCRIBERS};
pub use power::{
    DwellPolicy, GateHandle, GateState, PowerButton, PowerController, PowerState, PowerStatus,
    ToggleOutcome,
};
pub use sampler::{quantize, AxisFilter, AxisSampler, Quantized, SamplingWindow};
pub use types::{AnalogEvent, BuzzerTrigger, CapturedEdge, Enqueue};
