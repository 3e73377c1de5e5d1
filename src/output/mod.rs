//! Output collaborators backed by RP2040 peripherals.

pub mod buzzer;
pub mod uart;

pub use buzzer::PinBuzzer;
pub use uart::UartFrameSink;
