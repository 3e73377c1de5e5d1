//! Host-side interpretation of decoded frames.
//!
//! The device only emits frames; what a frame *means* to the game is decided
//! on the host. [`HostAction::from_frame`] gives the stock mapping, and
//! [`DirectionalHold`] turns the repeated directional commands into key
//! down/up pairs with a release timeout.

use crate::frame::Frame;
use crate::types::{AxisId, ButtonCode, DirSelector};

/// Directional keys are released when no command refreshed them for this long.
pub const DIRECTIONAL_RELEASE_MS: u64 = 300;

/// Mouse buttons the host can click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MouseButton {
    Left,
    Right,
}

/// Arrow keys used for analog directional axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Arrow {
    Up,
    Down,
    Left,
    Right,
}

/// A single host-side input action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostAction {
    /// Relative pointer movement.
    MovePointer { dx: i16, dy: i16 },
    /// Tap an arrow key once.
    TapArrow(Arrow),
    /// Tap a character key once (lowercase ASCII).
    TapKey(u8),
    /// Tap the shift modifier.
    TapShift,
    /// Click a mouse button.
    Click(MouseButton),
}

impl HostAction {
    /// Stock mapping from a frame to a one-shot action.
    ///
    /// Releases and directional commands map to `None`; directional keys are
    /// held, see [`DirectionalHold`].
    #[must_use]
    pub fn from_frame(frame: &Frame) -> Option<Self> {
        match *frame {
            Frame::Axis(sample) => match sample.axis {
                AxisId::X => Some(HostAction::MovePointer {
                    dx: sample.magnitude,
                    dy: 0,
                }),
                AxisId::Y => Some(HostAction::MovePointer {
                    dx: 0,
                    dy: sample.magnitude,
                }),
                AxisId::DirH if sample.magnitude != 0 => Some(HostAction::TapArrow(
                    if sample.magnitude > 0 {
                        Arrow::Right
                    } else {
                        Arrow::Left
                    },
                )),
                AxisId::DirV if sample.magnitude != 0 => Some(HostAction::TapArrow(
                    if sample.magnitude > 0 {
                        Arrow::Down
                    } else {
                        Arrow::Up
                    },
                )),
                AxisId::DirH | AxisId::DirV => None,
            },
            Frame::Button(event) if event.pressed => match event.code {
                ButtonCode::JUMP => Some(HostAction::TapKey(b' ')),
                ButtonCode::RELOAD => Some(HostAction::TapKey(b'r')),
                ButtonCode::FIRE => Some(HostAction::Click(MouseButton::Right)),
                ButtonCode::SPRINT => Some(HostAction::TapShift),
                ButtonCode::INTERACT => Some(HostAction::TapKey(b'e')),
                _ => None,
            },
            Frame::Button(_) | Frame::Directional(_) => None,
        }
    }
}

/// Change to the set of held directional keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HoldChange {
    /// Key to release first, if any (lowercase ASCII).
    pub release: Option<u8>,
    /// Key to press, if any (lowercase ASCII).
    pub press: Option<u8>,
}

impl HoldChange {
    const NONE: Self = Self {
        release: None,
        press: None,
    };

    /// Whether the change does nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.release.is_none() && self.press.is_none()
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct HeldKey {
    key: Option<u8>,
    last_seen_ms: u64,
}

/// Tracks held WASD keys driven by directional command frames.
///
/// Every command refreshes its axis; an axis that receives a different key
/// releases the old one and presses the new one; an axis with no command
/// for [`DIRECTIONAL_RELEASE_MS`] is released by [`DirectionalHold::poll`].
#[derive(Debug, Default)]
pub struct DirectionalHold {
    horizontal: HeldKey,
    vertical: HeldKey,
}

impl DirectionalHold {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently held key for an axis.
    #[must_use]
    pub fn held(&self, selector: DirSelector) -> Option<u8> {
        self.slot(selector).key
    }

    /// Apply a decoded frame. Non-directional frames are ignored.
    pub fn on_frame(&mut self, frame: &Frame, now_ms: u64) -> HoldChange {
        let Frame::Directional(cmd) = *frame else {
            return HoldChange::NONE;
        };
        let Some(target) = host_key(cmd.selector, cmd.key) else {
            return HoldChange::NONE;
        };

        let slot = self.slot_mut(cmd.selector);
        slot.last_seen_ms = now_ms;
        if slot.key == Some(target) {
            return HoldChange::NONE;
        }
        let release = slot.key.replace(target);
        HoldChange {
            release,
            press: Some(target),
        }
    }

    /// Release keys whose axis went quiet. Returns up to two releases.
    pub fn poll(&mut self, now_ms: u64) -> [Option<u8>; 2] {
        let mut released = [None, None];
        for (i, slot) in [&mut self.horizontal, &mut self.vertical]
            .into_iter()
            .enumerate()
        {
            if slot.key.is_some() && now_ms.saturating_sub(slot.last_seen_ms) > DIRECTIONAL_RELEASE_MS
            {
                released[i] = slot.key.take();
            }
        }
        released
    }

    fn slot(&self, selector: DirSelector) -> &HeldKey {
        match selector {
            DirSelector::Horizontal => &self.horizontal,
            DirSelector::Vertical => &self.vertical,
        }
    }

    fn slot_mut(&mut self, selector: DirSelector) -> &mut HeldKey {
        match selector {
            DirSelector::Horizontal => &mut self.horizontal,
            DirSelector::Vertical => &mut self.vertical,
        }
    }
}

/// Lowercase host key for a directional command, rejecting keys from the
/// wrong axis.
fn host_key(selector: DirSelector, key: u8) -> Option<u8> {
    if key == selector.negative_key() || key == selector.positive_key() {
        Some(key.to_ascii_lowercase())
    } else {
        None
    }
}
