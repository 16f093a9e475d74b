#![forbid(unsafe_code)]

//! Shared stacking counter for picked-up cards.

/// Monotonic z-index source shared by every card on one desk.
///
/// The counter starts at 1 and each pick-up pre-increments it, so the first
/// lifted card gets `z = 2` and every later pick-up stacks strictly above
/// all earlier ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZOrderCounter {
    current: u32,
}

impl Default for ZOrderCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl ZOrderCounter {
    pub const START: u32 = 1;

    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: Self::START,
        }
    }

    /// Allocate the next z-index.
    pub fn raise(&mut self) -> u32 {
        self.current = self.current.saturating_add(1);
        self.current
    }

    /// Most recently allocated value.
    #[must_use]
    pub const fn current(&self) -> u32 {
        self.current
    }

    /// Rewind to the start value. Test harnesses only.
    pub fn reset(&mut self) {
        self.current = Self::START;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn first_raise_is_two() {
        let mut z = ZOrderCounter::new();
        assert_eq!(z.current(), 1);
        assert_eq!(z.raise(), 2);
        assert_eq!(z.raise(), 3);
        z.reset();
        assert_eq!(z.raise(), 2);
    }

    proptest! {
        #[test]
        fn raises_strictly_increase(n in 1usize..500) {
            let mut z = ZOrderCounter::new();
            let mut last = z.current();
            for _ in 0..n {
                let next = z.raise();
                prop_assert!(next > last);
                last = next;
            }
            prop_assert_eq!(last, ZOrderCounter::START + n as u32);
        }
    }
}
