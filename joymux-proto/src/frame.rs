//! Frame layouts of the binary output stream.
//!
//! ```text
//! Axis        : A0 <axis_id> <value_hi> <value_lo> FF
//! Button      : B0 <code> <pressed>  FE
//! Directional : C0 <selector> <key>  CF
//! ```
//!
//! Each frame type has its own start and end marker, so a reader that lost
//! bytes can resynchronize by scanning for the next start marker.

use crate::types::{AxisSample, ButtonEvent, DirectionalCommand};

/// Start marker of an axis frame.
pub const AXIS_START: u8 = 0xA0;
/// End marker of an axis frame.
pub const AXIS_END: u8 = 0xFF;
/// Start marker of a button frame.
pub const BUTTON_START: u8 = 0xB0;
/// End marker of a button frame.
pub const BUTTON_END: u8 = 0xFE;
/// Start marker of a directional command frame.
pub const DIRECTIONAL_START: u8 = 0xC0;
/// End marker of a directional command frame.
pub const DIRECTIONAL_END: u8 = 0xCF;

/// Axis frame length in bytes, markers included.
pub const AXIS_FRAME_LEN: usize = 5;
/// Button frame length in bytes, markers included.
pub const BUTTON_FRAME_LEN: usize = 4;
/// Directional frame length in bytes, markers included.
pub const DIRECTIONAL_FRAME_LEN: usize = 4;

/// Largest frame on the wire.
pub const MAX_FRAME_LEN: usize = AXIS_FRAME_LEN;

/// One self-delimited unit of the output stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[must_use]
pub enum Frame {
    /// Quantized axis value.
    Axis(AxisSample),
    /// Debounced button transition.
    Button(ButtonEvent),
    /// Key command from a directional axis.
    Directional(DirectionalCommand),
}

impl Frame {
    /// Encoded length in bytes.
    #[must_use]
    pub const fn encoded_len(&self) -> usize {
        match self {
            Frame::Axis(_) => AXIS_FRAME_LEN,
            Frame::Button(_) => BUTTON_FRAME_LEN,
            Frame::Directional(_) => DIRECTIONAL_FRAME_LEN,
        }
    }

    /// Encode into a fixed array, returning the array and the used length.
    #[must_use]
    pub fn to_bytes(&self) -> ([u8; MAX_FRAME_LEN], usize) {
        let mut out = [0u8; MAX_FRAME_LEN];
        match *self {
            Frame::Axis(sample) => {
                let [hi, lo] = sample.magnitude.to_be_bytes();
                out = [AXIS_START, sample.axis.as_u8(), hi, lo, AXIS_END];
            }
            Frame::Button(event) => {
                out[..BUTTON_FRAME_LEN].copy_from_slice(&[
                    BUTTON_START,
                    event.code.raw(),
                    u8::from(event.pressed),
                    BUTTON_END,
                ]);
            }
            Frame::Directional(cmd) => {
                out[..DIRECTIONAL_FRAME_LEN].copy_from_slice(&[
                    DIRECTIONAL_START,
                    cmd.selector as u8,
                    cmd.key,
                    DIRECTIONAL_END,
                ]);
            }
        }
        (out, self.encoded_len())
    }

    /// Body length (bytes after the start marker, end marker included) for a
    /// start marker, or `None` if the byte is not a start marker.
    #[must_use]
    pub const fn body_len(start: u8) -> Option<usize> {
        match start {
            AXIS_START => Some(AXIS_FRAME_LEN - 1),
            BUTTON_START => Some(BUTTON_FRAME_LEN - 1),
            DIRECTIONAL_START => Some(DIRECTIONAL_FRAME_LEN - 1),
            _ => None,
        }
    }
}

impl From<AxisSample> for Frame {
    fn from(sample: AxisSample) -> Self {
        Frame::Axis(sample)
    }
}

impl From<ButtonEvent> for Frame {
    fn from(event: ButtonEvent) -> Self {
        Frame::Button(event)
    }
}

impl From<DirectionalCommand> for Frame {
    fn from(cmd: DirectionalCommand) -> Self {
        Frame::Directional(cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AxisId, ButtonCode, DirSelector};

    #[test]
    fn test_axis_frame_layout() {
        let (bytes, len) = Frame::Axis(AxisSample::new(AxisId::Y, 17)).to_bytes();
        assert_eq!(&bytes[..len], &[0xA0, 1, 0x00, 17, 0xFF]);
    }

    #[test]
    fn test_axis_frame_negative_is_big_endian_twos_complement() {
        let (bytes, len) = Frame::Axis(AxisSample::new(AxisId::X, -50)).to_bytes();
        assert_eq!(&bytes[..len], &[0xA0, 0, 0xFF, 0xCE, 0xFF]);
    }

    #[test]
    fn test_button_frame_layout() {
        let (bytes, len) = Frame::Button(ButtonEvent::press(ButtonCode::FIRE)).to_bytes();
        assert_eq!(&bytes[..len], &[0xB0, 1, 1, 0xFE]);

        let (bytes, len) = Frame::Button(ButtonEvent::release(ButtonCode::RELOAD)).to_bytes();
        assert_eq!(&bytes[..len], &[0xB0, b'R', 0, 0xFE]);
    }

    #[test]
    fn test_directional_frame_layout() {
        let cmd = DirectionalCommand::from_magnitude(DirSelector::Vertical, -8).unwrap();
        let (bytes, len) = Frame::Directional(cmd).to_bytes();
        assert_eq!(&bytes[..len], &[0xC0, 1, b'W', 0xCF]);
    }

    #[test]
    fn test_body_len() {
        assert_eq!(Frame::body_len(AXIS_START), Some(4));
        assert_eq!(Frame::body_len(BUTTON_START), Some(3));
        assert_eq!(Frame::body_len(DIRECTIONAL_START), Some(3));
        assert_eq!(Frame::body_len(0x00), None);
    }
}
