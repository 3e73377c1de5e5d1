//! 8:1 analog multiplexer addressed by three digital lines.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};

/// A multiplexer input, 0..=7.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MuxChannel(u8);

impl MuxChannel {
    pub const CH0: Self = Self(0);
    pub const CH1: Self = Self(1);
    pub const CH2: Self = Self(2);
    pub const CH3: Self = Self(3);
    pub const CH4: Self = Self(4);
    pub const CH5: Self = Self(5);
    pub const CH6: Self = Self(6);
    pub const CH7: Self = Self(7);

    /// Channel `index`, or `None` past 7.
    #[must_use]
    pub const fn new(index: u8) -> Option<Self> {
        if index < 8 {
            Some(Self(index))
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Level of address line `line` (0 = least significant).
    #[inline]
    #[must_use]
    pub const fn line_high(self, line: usize) -> bool {
        (self.0 >> line) & 1 == 1
    }
}

/// Drives the three address lines and waits for the analog path to settle.
///
/// Must be called right before every conversion on the shared input. Callers
/// sharing the ADC hold one lock across select and read.
pub struct MuxSelector<P, D> {
    lines: [P; 3],
    delay: D,
    settle_us: u32,
}

impl<P: OutputPin, D: DelayNs> MuxSelector<P, D> {
    /// `lines` are bit0, bit1, bit2.
    pub fn new(lines: [P; 3], delay: D, settle_us: u32) -> Self {
        Self {
            lines,
            delay,
            settle_us,
        }
    }

    /// Route `channel` to the common output.
    pub fn select(&mut self, channel: MuxChannel) -> Result<(), P::Error> {
        for (bit, line) in self.lines.iter_mut().enumerate() {
            line.set_state(PinState::from(channel.line_high(bit)))?;
        }
        self.delay.delay_us(self.settle_us);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use core::convert::Infallible;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::vec::Vec;

    struct MockLine {
        high: Rc<RefCell<bool>>,
    }

    impl embedded_hal::digital::ErrorType for MockLine {
        type Error = Infallible;
    }

    impl OutputPin for MockLine {
        fn set_low(&mut self) -> Result<(), Infallible> {
            *self.high.borrow_mut() = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            *self.high.borrow_mut() = true;
            Ok(())
        }
    }

    struct MockDelay {
        waits: Rc<RefCell<Vec<u32>>>,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.waits.borrow_mut().push(ns / 1_000);
        }

        fn delay_us(&mut self, us: u32) {
            self.waits.borrow_mut().push(us);
        }
    }

    #[test]
    fn test_channel_bounds() {
        assert_eq!(MuxChannel::new(7), Some(MuxChannel::CH7));
        assert_eq!(MuxChannel::new(8), None);
    }

    #[test]
    fn test_select_drives_address_bits_then_settles() {
        let levels: [Rc<RefCell<bool>>; 3] = Default::default();
        let waits = Rc::new(RefCell::new(Vec::new()));
        let lines = [0, 1, 2].map(|i| MockLine {
            high: levels[i].clone(),
        });
        let mut mux = MuxSelector::new(
            lines,
            MockDelay {
                waits: waits.clone(),
            },
            50,
        );

        for index in 0..8u8 {
            let channel = MuxChannel::new(index).unwrap();
            mux.select(channel).unwrap();
            let bits: Vec<bool> = levels.iter().map(|l| *l.borrow()).collect();
            assert_eq!(
                bits,
                [index & 1 == 1, index & 2 == 2, index & 4 == 4].to_vec()
            );
        }
        assert_eq!(*waits.borrow(), [50u32; 8].to_vec());
    }
}
