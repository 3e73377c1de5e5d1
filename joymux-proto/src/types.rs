//! Event types carried by the wire protocol: axes, buttons, directional keys.

/// Logical analog axis.
///
/// The discriminant is the `axis_id` byte of an axis frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AxisId {
    /// Pointer X (mouse-style movement).
    X = 0,
    /// Pointer Y (mouse-style movement).
    Y = 1,
    /// Directional pad, horizontal.
    DirH = 2,
    /// Directional pad, vertical.
    DirV = 3,
}

impl AxisId {
    /// All axes in wire order.
    pub const ALL: [AxisId; 4] = [AxisId::X, AxisId::Y, AxisId::DirH, AxisId::DirV];

    /// Wire byte for this axis.
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Decode a wire byte.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(AxisId::X),
            1 => Some(AxisId::Y),
            2 => Some(AxisId::DirH),
            3 => Some(AxisId::DirV),
            _ => None,
        }
    }

    /// The directional selector for the directional axes, `None` for X/Y.
    #[must_use]
    pub const fn selector(self) -> Option<DirSelector> {
        match self {
            AxisId::DirH => Some(DirSelector::Horizontal),
            AxisId::DirV => Some(DirSelector::Vertical),
            AxisId::X | AxisId::Y => None,
        }
    }
}

/// Smallest magnitude an axis sample can carry.
pub const MAGNITUDE_MIN: i16 = -50;

/// Largest magnitude an axis sample can carry.
pub const MAGNITUDE_MAX: i16 = 50;

/// A quantized axis reading.
///
/// `magnitude` is always within [`MAGNITUDE_MIN`]..=[`MAGNITUDE_MAX`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisSample {
    pub axis: AxisId,
    pub magnitude: i16,
}

impl AxisSample {
    /// Create a sample, clamping the magnitude into range.
    #[must_use]
    pub const fn new(axis: AxisId, magnitude: i16) -> Self {
        let magnitude = if magnitude > MAGNITUDE_MAX {
            MAGNITUDE_MAX
        } else if magnitude < MAGNITUDE_MIN {
            MAGNITUDE_MIN
        } else {
            magnitude
        };
        Self { axis, magnitude }
    }
}

/// Logical button identifier.
///
/// Values are the codes the host expects, not GPIO numbers. The named
/// constants are the codes wired on the stock board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonCode(pub u8);

impl ButtonCode {
    /// Jump (host presses space).
    pub const JUMP: Self = Self(b' ');
    /// Reload (host presses `r`).
    pub const RELOAD: Self = Self(b'R');
    /// Fire (host clicks). Accepted presses also trigger the buzzer.
    pub const FIRE: Self = Self(1);
    /// Sprint (host taps shift).
    pub const SPRINT: Self = Self(2);
    /// Interact (host presses `e`).
    pub const INTERACT: Self = Self(b'E');

    /// Get the raw code byte.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// A button transition. Press and release are distinct events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEvent {
    pub code: ButtonCode,
    pub pressed: bool,
}

impl ButtonEvent {
    #[must_use]
    pub const fn new(code: ButtonCode, pressed: bool) -> Self {
        Self { code, pressed }
    }

    #[must_use]
    pub const fn press(code: ButtonCode) -> Self {
        Self::new(code, true)
    }

    #[must_use]
    pub const fn release(code: ButtonCode) -> Self {
        Self::new(code, false)
    }
}

/// Which directional axis a command belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DirSelector {
    Horizontal = 0,
    Vertical = 1,
}

impl DirSelector {
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(DirSelector::Horizontal),
            1 => Some(DirSelector::Vertical),
            _ => None,
        }
    }

    /// Key sent for a negative deflection.
    #[must_use]
    pub const fn negative_key(self) -> u8 {
        match self {
            DirSelector::Horizontal => b'A',
            DirSelector::Vertical => b'W',
        }
    }

    /// Key sent for a positive deflection.
    #[must_use]
    pub const fn positive_key(self) -> u8 {
        match self {
            DirSelector::Horizontal => b'D',
            DirSelector::Vertical => b'S',
        }
    }
}

/// A key-style command produced by a directional axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DirectionalCommand {
    pub selector: DirSelector,
    pub key: u8,
}

impl DirectionalCommand {
    /// Map the sign of a magnitude to a key. Zero maps to no command.
    #[must_use]
    pub const fn from_magnitude(selector: DirSelector, magnitude: i16) -> Option<Self> {
        if magnitude < 0 {
            Some(Self {
                selector,
                key: selector.negative_key(),
            })
        } else if magnitude > 0 {
            Some(Self {
                selector,
                key: selector.positive_key(),
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_id_wire_bytes() {
        for axis in AxisId::ALL {
            assert_eq!(AxisId::from_u8(axis.as_u8()), Some(axis));
        }
        assert_eq!(AxisId::from_u8(4), None);
    }

    #[test]
    fn test_axis_sample_clamps() {
        assert_eq!(AxisSample::new(AxisId::X, 120).magnitude, 50);
        assert_eq!(AxisSample::new(AxisId::X, -51).magnitude, -50);
        assert_eq!(AxisSample::new(AxisId::Y, 7).magnitude, 7);
    }

    #[test]
    fn test_directional_sign_mapping() {
        let left = DirectionalCommand::from_magnitude(DirSelector::Horizontal, -3).unwrap();
        assert_eq!(left.key, b'A');
        let right = DirectionalCommand::from_magnitude(DirSelector::Horizontal, 12).unwrap();
        assert_eq!(right.key, b'D');
        let up = DirectionalCommand::from_magnitude(DirSelector::Vertical, -50).unwrap();
        assert_eq!(up.key, b'W');
        let down = DirectionalCommand::from_magnitude(DirSelector::Vertical, 1).unwrap();
        assert_eq!(down.key, b'S');
        assert_eq!(
            DirectionalCommand::from_magnitude(DirSelector::Vertical, 0),
            None
        );
    }

    #[test]
    fn test_axis_selector() {
        assert_eq!(AxisId::DirH.selector(), Some(DirSelector::Horizontal));
        assert_eq!(AxisId::DirV.selector(), Some(DirSelector::Vertical));
        assert_eq!(AxisId::X.selector(), None);
    }
}
