//! Binary frame protocol for the joymux input device.
//!
//! This crate provides everything needed on both ends of the serial link:
//!
//! - **Types**: event types carried by frames
//!   - [`AxisId`], [`AxisSample`] - quantized analog axis readings
//!   - [`ButtonCode`], [`ButtonEvent`] - logical button transitions
//!   - [`DirSelector`], [`DirectionalCommand`] - key-style directional commands
//!
//! - **Frames**: [`Frame`] and the start/end markers of each layout
//!
//! - **Serialization**: [`Serialize`] trait for buffers and `heapless` vectors
//!
//! - **Decoding**: [`FrameDecoder`], a resynchronizing byte-stream decoder
//!
//! - **Host mapping**: [`HostAction`] and [`DirectionalHold`], the stock
//!   interpretation of frames on the receiving computer
//!
//! # Protocol Format
//!
//! ```text
//! Axis        : A0 <axis_id> <value_hi> <value_lo> FF
//! Button      : B0 <code> <pressed> FE
//! Directional : C0 <selector> <key> CF
//! ```
//!
//! Axis values are signed 16-bit big-endian in [-50, 50]. There is no
//! checksum; distinct start/end markers make the stream self-delimiting.
//!
//! # Example
//!
//! ```
//! use joymux_proto::{ButtonCode, ButtonEvent, Frame, FrameDecoder, Serialize};
//!
//! let frame = Frame::Button(ButtonEvent::press(ButtonCode::FIRE));
//! let mut buf = [0u8; 8];
//! let len = frame.serialize(&mut buf).unwrap();
//! assert_eq!(&buf[..len], &[0xB0, 0x01, 0x01, 0xFE]);
//!
//! let mut decoder = FrameDecoder::new();
//! let mut decoded = None;
//! decoder.push_slice(&buf[..len], |f| decoded = Some(f));
//! assert_eq!(decoded, Some(frame));
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//! - **`heapless`**: Enable `serialize_to_vec()`

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod decoder;
pub mod frame;
pub mod host;
pub mod serialize;
pub mod types;

pub use decoder::{DecodeError, FrameDecoder};
pub use frame::{
    Frame, AXIS_END, AXIS_FRAME_LEN, AXIS_START, BUTTON_END, BUTTON_FRAME_LEN, BUTTON_START,
    DIRECTIONAL_END, DIRECTIONAL_FRAME_LEN, DIRECTIONAL_START, MAX_FRAME_LEN,
};
pub use host::{Arrow, DirectionalHold, HoldChange, HostAction, MouseButton, DIRECTIONAL_RELEASE_MS};
pub use serialize::{serialize_all, Serialize, SerializeError};
pub use types::{
    AxisId, AxisSample, ButtonCode, ButtonEvent, DirSelector, DirectionalCommand, MAGNITUDE_MAX,
    MAGNITUDE_MIN,
};
