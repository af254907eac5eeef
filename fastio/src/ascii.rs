//! Byte classes and decimal accumulation shared by the tokenizers.

use crate::error::NumberKind;

/// Space, tab, carriage return or line feed.
#[inline(always)]
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

/// ASCII `0` through `9`.
#[inline(always)]
pub fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

/// Integer types the reader can accumulate digit by digit.
pub(crate) trait Decimal: Copy {
    const KIND: NumberKind;
    /// Whether a leading `-` is part of the grammar.
    const SIGNED: bool;
    const ZERO: Self;

    /// `self * 10 + digit`, or `self * 10 - digit` for a negative value.
    /// `None` on overflow.
    fn push_digit(self, digit: u8, negative: bool) -> Option<Self>;
}

macro_rules! impl_decimal {
    ($($ty:ty => $kind:ident, $signed:expr;)*) => {
        $(
            impl Decimal for $ty {
                const KIND: NumberKind = NumberKind::$kind;
                const SIGNED: bool = $signed;
                const ZERO: Self = 0;

                #[inline(always)]
                fn push_digit(self, digit: u8, negative: bool) -> Option<Self> {
                    let shifted = self.checked_mul(10)?;
                    if negative {
                        shifted.checked_sub(digit as $ty)
                    } else {
                        shifted.checked_add(digit as $ty)
                    }
                }
            }
        )*
    };
}

impl_decimal! {
    i32 => Int, true;
    i64 => Int64, true;
    u64 => Uint64, false;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_set() {
        for b in [b' ', b'\t', b'\r', b'\n'] {
            assert!(is_whitespace(b));
        }
        for b in [b'a', b'0', b'-', 0x0b, 0x0c, 0x00] {
            assert!(!is_whitespace(b));
        }
    }

    #[test]
    fn digit_set() {
        for b in b'0'..=b'9' {
            assert!(is_digit(b));
        }
        for b in [b'/', b':', b'-', b'+', b'.', b' ', b'a'] {
            assert!(!is_digit(b));
        }
    }

    #[test]
    fn negative_accumulation_reaches_min() {
        let digits = b"2147483648";
        let value = digits
            .iter()
            .try_fold(0i32, |acc, &d| acc.push_digit(d - b'0', true));
        assert_eq!(value, Some(i32::MIN));

        let value = digits
            .iter()
            .try_fold(0i32, |acc, &d| acc.push_digit(d - b'0', false));
        assert_eq!(value, None);
    }

    #[test]
    fn unsigned_overflow() {
        assert_eq!(u64::MAX.push_digit(0, false), None);
        assert_eq!((u64::MAX / 10).push_digit(5, false), Some(u64::MAX));
        assert_eq!((u64::MAX / 10).push_digit(6, false), None);
    }
}
