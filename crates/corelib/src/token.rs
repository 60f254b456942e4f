//! Hash positions on the ring.
//!
//! The ring is the totally ordered space of `u64` values with wraparound: the
//! value after [`Token::MAX`] is [`Token::MIN`].

use std::fmt;

/// A position on the hash ring.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Token(pub u64);

impl Token {
    /// Start of the ring.
    pub const MIN: Token = Token(0);
    /// End of the ring.
    pub const MAX: Token = Token(u64::MAX);

    /// Clockwise distance from `self` to `other`, wrapping past [`Token::MAX`].
    ///
    /// The distance from a token to itself is zero.
    #[inline]
    pub fn distance_to(self, other: Token) -> u64 {
        other.0.wrapping_sub(self.0)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_forward() {
        assert_eq!(Token(100).distance_to(Token(200)), 100);
    }

    #[test]
    fn test_distance_wraps() {
        assert_eq!(Token::MAX.distance_to(Token::MIN), 1);
        assert_eq!(Token(200).distance_to(Token(100)), u64::MAX - 99);
    }

    #[test]
    fn test_display_is_fixed_width_hex() {
        assert_eq!(Token(0xab).to_string(), "00000000000000ab");
    }
}
