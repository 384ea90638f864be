use serde::{Deserialize, Serialize};

/// The extending reach. Length only ever grows in fixed increments and is
/// reset to zero when the character crosses.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Stick {
    pub length: f32,
}

impl Stick {
    /// Grow by `increment` unless that would pass `max_length`. An overshooting
    /// increment is dropped rather than clamped, so growth halts just below
    /// the cap when the increment does not divide it.
    pub fn grow(&mut self, increment: f32, max_length: f32) -> bool {
        let next = self.length + increment;
        if next > max_length {
            return false;
        }
        self.length = next;
        true
    }

    pub fn retract(&mut self) {
        self.length = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grows_up_to_exact_cap() {
        let mut stick = Stick::default();
        for _ in 0..100 {
            assert!(stick.grow(2.0, 200.0));
        }
        assert_eq!(stick.length, 200.0);
        assert!(!stick.grow(2.0, 200.0));
        assert_eq!(stick.length, 200.0);
    }

    #[test]
    fn overshooting_increment_is_not_applied() {
        let mut stick = Stick { length: 198.0 };
        assert!(!stick.grow(3.0, 200.0));
        assert_eq!(stick.length, 198.0);
    }

    #[test]
    fn retract_resets_to_zero() {
        let mut stick = Stick { length: 64.0 };
        stick.retract();
        assert_eq!(stick, Stick::default());
    }
}
