//! Joymux firmware for RP2040.
//!
//! Samples two analog sticks through an 8:1 multiplexer, watches five game
//! buttons and streams everything as binary frames over UART.
//!
//! # Overview
//!
//! The firmware runs on a Raspberry Pi Pico (RP2040) and:
//! 1. Samples pointer X/Y every 10 ms and the directional pair every 50 ms
//! 2. Captures button edges on a high-priority executor
//! 3. Debounces buttons, quantizes axes and writes frames (115200 baud, 8N1)
//! 4. Starts disabled; the power button toggles output on and off
//!
//! # Hardware Configuration
//!
//! | Function          | GPIO   | Description |
//! |-------------------|--------|-------------|
//! | UART0 TX          | 0      | Frame output |
//! | Power LED         | 2      | On while enabled |
//! | Mux S0/S1/S2      | 11-13  | Multiplexer address lines |
//! | Power button      | 14     | Falling edge toggles (pull-up) |
//! | Buzzer            | 15     | 2 kHz tone on fire |
//! | Buttons           | 16-20  | Jump, reload, fire, sprint, interact (pull-up, active low) |
//! | Mux common        | 28     | ADC input 2 |
//!
//! Mux channels: 0 directional horizontal, 1 directional vertical,
//! 2 pointer X, 3 pointer Y.
//!
//! # Architecture
//!
//! Two Embassy executors:
//!
//! - **Interrupt executor** (`SWI_IRQ_1`, priority P2): button edge capture
//!   and the power button. These only stamp and queue.
//! - **Thread executor**: samplers, the two dispatchers, the power controller
//!   and the buzzer.
//!
//! The ADC and the UART each sit behind an
//! [`embassy_sync::mutex::Mutex`] so select+read and frame writes stay whole.
//!
//! # Modules
//!
//! - [`input`]: multiplexed ADC source ([`MuxedAdc`]) and the uptime clock
//! - [`output`]: UART frame sink ([`UartFrameSink`]) and the pin buzzer ([`PinBuzzer`])
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)
//! - **`debounce-per-edge`**: Debounce press and release independently
//!
//! # Re-exports
//!
//! This crate re-exports the pieces of [`joymux_core`] the binary wires up.

#![no_std]

#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features - they register conflicting panic handlers");

// Re-export core types for convenience
pub use joymux_core::{
    code_for_gpio, config, AnalogDispatcher, AnalogEvent, AxisSampler, ButtonDispatcher,
    ButtonInput, Buzzer, Capture, Dispatch, DispatchError, EdgeCapture, Enqueue, InputError,
    OutputError, Pipeline, PowerButton, PowerController, ToggleOutcome,
};

pub mod input;
pub mod output;

pub use input::{MuxedAdc, UptimeClock};
pub use output::{PinBuzzer, UartFrameSink};
