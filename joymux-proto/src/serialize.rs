//! Frame serialization.
//!
//! This module provides the [`Serialize`] trait for writing a [`Frame`] to
//! a byte buffer or a `heapless::Vec`.
//!
//! # Example
//!
//! ```
//! use joymux_proto::{AxisId, AxisSample, Frame, Serialize};
//!
//! let frame = Frame::Axis(AxisSample::new(AxisId::X, 12));
//! let mut buf = [0u8; 8];
//! let len = frame.serialize(&mut buf).unwrap();
//! assert_eq!(&buf[..len], &[0xA0, 0x00, 0x00, 0x0C, 0xFF]);
//! ```

use crate::frame::Frame;

/// Error type for serialization operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerializeError {
    /// The output buffer is too small to hold the frame.
    BufferTooSmall,
}

impl core::fmt::Display for SerializeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BufferTooSmall => write!(f, "buffer too small"),
        }
    }
}

/// Extension trait for serializing protocol frames.
pub trait Serialize {
    /// Serialize to the provided buffer.
    ///
    /// Returns the number of bytes written on success.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::BufferTooSmall`] if the buffer is not large enough.
    fn serialize(&self, buf: &mut [u8]) -> Result<usize, SerializeError>;

    /// Serialize to a `heapless::Vec`.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::BufferTooSmall`] if `N` is not large enough.
    #[cfg(feature = "heapless")]
    fn serialize_to_vec<const N: usize>(&self) -> Result<heapless::Vec<u8, N>, SerializeError> {
        let mut vec = heapless::Vec::new();
        vec.resize(N, 0)
            .map_err(|_| SerializeError::BufferTooSmall)?;
        let len = self.serialize(&mut vec)?;
        vec.truncate(len);
        Ok(vec)
    }
}

impl Serialize for Frame {
    fn serialize(&self, buf: &mut [u8]) -> Result<usize, SerializeError> {
        let len = self.encoded_len();
        if buf.len() < len {
            return Err(SerializeError::BufferTooSmall);
        }
        let (bytes, len) = self.to_bytes();
        buf[..len].copy_from_slice(&bytes[..len]);
        Ok(len)
    }
}

/// Serialize a sequence of frames back to back into `buf`.
///
/// Returns the number of bytes written. Stops with an error at the first
/// frame that does not fit; bytes of earlier frames stay written.
pub fn serialize_all<'a, I>(frames: I, buf: &mut [u8]) -> Result<usize, SerializeError>
where
    I: IntoIterator<Item = &'a Frame>,
{
    let mut pos = 0;
    for frame in frames {
        pos += frame.serialize(&mut buf[pos..])?;
    }
    Ok(pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AxisId, AxisSample, ButtonCode, ButtonEvent, DirSelector, DirectionalCommand};

    #[test]
    fn test_serialize_axis() {
        let frame = Frame::Axis(AxisSample::new(AxisId::DirV, -1));
        let mut buf = [0u8; 8];
        let len = frame.serialize(&mut buf).unwrap();
        assert_eq!(&buf[..len], &[0xA0, 3, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_serialize_buffer_too_small() {
        let frame = Frame::Axis(AxisSample::new(AxisId::X, 0));
        let mut buf = [0u8; 4];
        assert_eq!(frame.serialize(&mut buf), Err(SerializeError::BufferTooSmall));

        // A button frame fits exactly in four bytes
        let frame = Frame::Button(ButtonEvent::press(ButtonCode::JUMP));
        assert_eq!(frame.serialize(&mut buf), Ok(4));
    }

    #[test]
    fn test_serialize_all_concatenates() {
        let frames = [
            Frame::Button(ButtonEvent::press(ButtonCode::FIRE)),
            Frame::Directional(
                DirectionalCommand::from_magnitude(DirSelector::Horizontal, 5).unwrap(),
            ),
        ];
        let mut buf = [0u8; 16];
        let len = serialize_all(frames.iter(), &mut buf).unwrap();
        assert_eq!(
            &buf[..len],
            &[0xB0, 1, 1, 0xFE, 0xC0, 0, b'D', 0xCF]
        );
    }

    #[cfg(feature = "heapless")]
    #[test]
    fn test_serialize_to_vec() {
        let frame = Frame::Button(ButtonEvent::release(ButtonCode::SPRINT));
        let vec: heapless::Vec<u8, 8> = frame.serialize_to_vec().unwrap();
        assert_eq!(vec.as_slice(), &[0xB0, 2, 0, 0xFE]);
    }

    #[cfg(feature = "heapless")]
    #[test]
    fn test_serialize_to_vec_too_small() {
        let frame = Frame::Axis(AxisSample::new(AxisId::X, 3));
        let result: Result<heapless::Vec<u8, 4>, _> = frame.serialize_to_vec();
        assert_eq!(result, Err(SerializeError::BufferTooSmall));
    }
}
