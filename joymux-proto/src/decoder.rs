//! Byte-at-a-time frame decoder for the receiving side of the stream.
//!
//! The decoder waits for a start marker, collects the fixed-length body for
//! that frame type and checks the end marker. Bytes outside a frame are
//! skipped. A frame whose end marker is wrong is dropped and its body bytes
//! are rescanned, so a start marker swallowed by a truncated frame is not
//! lost.

use crate::frame::{
    Frame, AXIS_END, AXIS_START, BUTTON_END, BUTTON_START, DIRECTIONAL_END, DIRECTIONAL_START,
};
use crate::types::{AxisId, AxisSample, ButtonCode, ButtonEvent, DirSelector, DirectionalCommand};

/// Longest frame body (axis frame minus its start marker).
const MAX_BODY_LEN: usize = 4;

/// Reasons a frame was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// The byte where the end marker belongs is something else.
    BadEndMarker,
    /// A field holds a value outside its domain (axis id, pressed flag, selector).
    InvalidField,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DecoderState {
    WaitingForStart,
    ReadingBody { start: u8, expected: usize },
}

/// Streaming decoder for the joymux frame protocol.
#[derive(Debug)]
pub struct FrameDecoder {
    body: [u8; MAX_BODY_LEN],
    pos: usize,
    state: DecoderState,
    skipped: u32,
    dropped: u32,
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDecoder {
    /// Create a new decoder waiting for a start marker.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            body: [0u8; MAX_BODY_LEN],
            pos: 0,
            state: DecoderState::WaitingForStart,
            skipped: 0,
            dropped: 0,
        }
    }

    /// Discard any partial frame.
    pub fn reset(&mut self) {
        self.pos = 0;
        self.state = DecoderState::WaitingForStart;
    }

    /// Bytes skipped while scanning for a start marker.
    #[must_use]
    pub fn skipped(&self) -> u32 {
        self.skipped
    }

    /// Frames dropped because of a bad end marker or invalid field.
    #[must_use]
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Feed one byte.
    ///
    /// Returns `Ok(Some(frame))` when a frame completes, `Ok(None)` while a
    /// frame is incomplete, and `Err` when a frame had to be dropped. After
    /// an error the decoder is already resynchronized.
    pub fn push_byte(&mut self, byte: u8) -> Result<Option<Frame>, DecodeError> {
        match self.state {
            DecoderState::WaitingForStart => {
                match Frame::body_len(byte) {
                    Some(expected) => {
                        self.pos = 0;
                        self.state = DecoderState::ReadingBody {
                            start: byte,
                            expected,
                        };
                    }
                    None => self.skipped = self.skipped.wrapping_add(1),
                }
                Ok(None)
            }
            DecoderState::ReadingBody { start, expected } => {
                self.body[self.pos] = byte;
                self.pos += 1;
                if self.pos < expected {
                    return Ok(None);
                }

                let body = self.body;
                self.reset();
                match decode_body(start, &body[..expected]) {
                    Ok(frame) => Ok(Some(frame)),
                    Err(err) => {
                        self.dropped = self.dropped.wrapping_add(1);
                        if err == DecodeError::BadEndMarker {
                            if let Some(frame) = self.rescan(&body[..expected]) {
                                return Ok(Some(frame));
                            }
                        }
                        Err(err)
                    }
                }
            }
        }
    }

    /// Feed a slice, calling `on_frame` for every completed frame.
    ///
    /// Dropped frames are counted in [`FrameDecoder::dropped`].
    pub fn push_slice(&mut self, bytes: &[u8], mut on_frame: impl FnMut(Frame)) {
        for &byte in bytes {
            if let Ok(Some(frame)) = self.push_byte(byte) {
                on_frame(frame);
            }
        }
    }

    /// Replay the body of a dropped frame looking for a fresh start marker.
    fn rescan(&mut self, body: &[u8]) -> Option<Frame> {
        let mut found = None;
        for &byte in body {
            // A dropped body is at most four bytes and the shortest body is
            // three, so only the last replayed byte can complete a frame
            if let Ok(Some(frame)) = self.push_byte(byte) {
                found = Some(frame);
            }
        }
        found
    }
}

fn decode_body(start: u8, body: &[u8]) -> Result<Frame, DecodeError> {
    match start {
        AXIS_START => {
            if body[3] != AXIS_END {
                return Err(DecodeError::BadEndMarker);
            }
            let axis = AxisId::from_u8(body[0]).ok_or(DecodeError::InvalidField)?;
            let magnitude = i16::from_be_bytes([body[1], body[2]]);
            Ok(Frame::Axis(AxisSample { axis, magnitude }))
        }
        BUTTON_START => {
            if body[2] != BUTTON_END {
                return Err(DecodeError::BadEndMarker);
            }
            let pressed = match body[1] {
                0 => false,
                1 => true,
                _ => return Err(DecodeError::InvalidField),
            };
            Ok(Frame::Button(ButtonEvent::new(ButtonCode(body[0]), pressed)))
        }
        DIRECTIONAL_START => {
            if body[2] != DIRECTIONAL_END {
                return Err(DecodeError::BadEndMarker);
            }
            let selector = DirSelector::from_u8(body[0]).ok_or(DecodeError::InvalidField)?;
            Ok(Frame::Directional(DirectionalCommand {
                selector,
                key: body[1],
            }))
        }
        _ => Err(DecodeError::InvalidField),
    }
}
