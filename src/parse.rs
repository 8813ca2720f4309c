//! Text to number.
//!
//! Integers are read as an optional `-`, an optional base prefix, and a run
//! of digits that must reach the end of the input. Rationals are two such
//! integers around a single `/`.

use crate::buffer::LimbBuffer;
use crate::error::{Error, ErrorCode, Result};
use crate::int::BigInt;
use crate::lib::*;
use crate::math::{limbs_for_bits, radix_chunk, small, Limb};
use memchr::memchr;

/// Base implied by the letter after a leading `0`.
#[inline]
fn prefix_radix(letter: u8) -> Option<u32> {
    match letter {
        b'x' | b'X' => Some(16),
        b'o' | b'O' => Some(8),
        b'b' | b'B' => Some(2),
        _ => None,
    }
}

fn check_radix(radix: Option<u32>) -> Result<()> {
    match radix {
        Some(radix) if !(2..=36).contains(&radix) => {
            Err(Error::new(ErrorCode::RadixOutOfRange(radix)))
        }
        _ => Ok(()),
    }
}

/// One-based character column of the byte at `index`.
fn column(s: &str, index: usize) -> usize {
    s[..index].chars().count() + 1
}

/// Parse an integer. With `radix` of `None` the base comes from a prefix,
/// or is 10 without one.
///
/// A prefix is only taken as a prefix when it agrees with an explicit
/// `radix`. When its letter is a digit of that radix, as `b` is in base 16,
/// the characters are read as digits instead, and any other disagreement is
/// an error.
pub(crate) fn parse_int(s: &str, radix: Option<u32>) -> Result<BigInt> {
    check_radix(radix)?;

    let bytes = s.as_bytes();
    let mut index = 0;
    let negative = bytes.first() == Some(&b'-');
    if negative {
        index += 1;
    }

    let prefix = match bytes.get(index) {
        Some(&b'0') => bytes.get(index + 1).and_then(|&letter| prefix_radix(letter)),
        _ => None,
    };
    let radix = match (prefix, radix) {
        (None, radix) => radix.unwrap_or(10),
        (Some(implied), None) => {
            index += 2;
            implied
        }
        (Some(implied), Some(radix)) if implied == radix => {
            index += 2;
            radix
        }
        (Some(_), Some(radix)) if (bytes[index + 1] as char).is_digit(radix) => radix,
        (Some(_), Some(radix)) => {
            return Err(Error::syntax(ErrorCode::ConflictingPrefix(radix), index + 2));
        }
    };

    let digits = &bytes[index..];
    if digits.is_empty() {
        return Err(Error::new(ErrorCode::EmptyDigits));
    }
    // Everything before `index` is ASCII, so byte offsets are columns until
    // the first bad character.
    if let Some(bad) = digits.iter().position(|&b| !(b as char).is_digit(radix)) {
        let at = index + bad;
        let c = s[at..].chars().next().unwrap_or(char::REPLACEMENT_CHARACTER);
        return Err(Error::syntax(ErrorCode::InvalidDigit(c), at + 1));
    }

    let (int, len) = accumulate(digits, radix)?;
    Ok(BigInt::from_buffer(int, len, negative))
}

/// Convert validated digits into limbs, returning the buffer and the number
/// of limbs written.
fn accumulate(digits: &[u8], radix: u32) -> Result<(LimbBuffer, usize)> {
    // ceil(log2(radix)) bits per digit is enough room for any digit string.
    let bits_per_digit = 32 - (radix - 1).leading_zeros();
    let bits = digits.len().saturating_mul(bits_per_digit as usize);
    let mut buffer = LimbBuffer::with_limbs(cmp::max(1, limbs_for_bits(bits)))?;

    let (chunk_digits, _) = radix_chunk(radix);
    let mut len = 0;
    for chunk in digits.chunks(chunk_digits) {
        let mut value: Limb = 0;
        let mut scale: Limb = 1;
        for &b in chunk {
            // Validated by the caller.
            let digit = (b as char).to_digit(radix).unwrap_or(0);
            value = value * radix as Limb + digit as Limb;
            scale *= radix as Limb;
        }

        let buf = buffer.as_mut_slice();
        let carry = small::imul_add(&mut buf[..len], scale, value);
        if carry != 0 {
            buf[len] = carry;
            len += 1;
        }
    }
    Ok((buffer, len))
}

/// Parse `<numerator>/<denominator>`, each part read as by `parse_int`.
///
/// The parts are returned as written, not reduced. A zero denominator is a
/// format error here, reported at the first character of the denominator.
pub(crate) fn parse_ratio(s: &str, radix: Option<u32>) -> Result<(BigInt, BigInt)> {
    check_radix(radix)?;

    let bytes = s.as_bytes();
    let slash = match memchr(b'/', bytes) {
        Some(slash) => slash,
        None => return Err(Error::new(ErrorCode::MissingSeparator)),
    };
    if let Some(extra) = memchr(b'/', &bytes[slash + 1..]) {
        return Err(Error::syntax(
            ErrorCode::DuplicateSeparator,
            column(s, slash + 1 + extra),
        ));
    }
    if slash == 0 || slash + 1 == bytes.len() {
        return Err(Error::syntax(ErrorCode::SeparatorAtBoundary, column(s, slash)));
    }

    let numer = parse_int(&s[..slash], radix)?;
    let offset = column(s, slash);
    let denom = parse_int(&s[slash + 1..], radix).map_err(|err| err.offset_column(offset))?;
    if denom.is_zero() {
        return Err(Error::syntax(ErrorCode::ZeroDenominator, offset + 1));
    }
    Ok((numer, denom))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(s: &str, radix: Option<u32>) -> BigInt {
        parse_int(s, radix).unwrap()
    }

    fn err(s: &str, radix: Option<u32>) -> (ErrorCode, usize) {
        let err = parse_int(s, radix).unwrap_err();
        (err.code().clone(), err.column())
    }

    #[test]
    fn decimal() {
        assert_eq!(int("0", None), 0);
        assert_eq!(int("-0", None).used_limbs(), 0);
        assert_eq!(int("000123", None), 123);
        let x = int("-18446744073709551616", None);
        assert!(x.is_negative());
        assert_eq!(x.bit_length(), 65);
    }

    #[test]
    fn prefixes() {
        assert_eq!(int("0x1F", None), 31);
        assert_eq!(int("-0X1f", None), -31);
        assert_eq!(int("0b101", None), 5);
        assert_eq!(int("0o17", None), 15);
        assert_eq!(int("0x1F", Some(16)), 31);
        assert_eq!(int("0b101", Some(2)), 5);
    }

    #[test]
    fn prefix_letter_as_digit() {
        // `b` is a hex digit, `x` is a base 36 digit.
        assert_eq!(int("0b1", Some(16)), 0xB1);
        assert_eq!(int("0x", Some(36)), 33);
    }

    #[test]
    fn conflicting_prefix() {
        assert_eq!(err("0x1F", Some(10)), (ErrorCode::ConflictingPrefix(10), 2));
        assert_eq!(err("-0o7", Some(2)), (ErrorCode::ConflictingPrefix(2), 3));
    }

    #[test]
    fn bad_digits() {
        assert_eq!(err("12345A", None), (ErrorCode::InvalidDigit('A'), 6));
        assert_eq!(err("12 3", None), (ErrorCode::InvalidDigit(' '), 3));
        assert_eq!(err("+1", None), (ErrorCode::InvalidDigit('+'), 1));
        assert_eq!(err("--1", None), (ErrorCode::InvalidDigit('-'), 2));
        assert_eq!(err("12é", None), (ErrorCode::InvalidDigit('é'), 3));
        assert_eq!(err("102", Some(2)), (ErrorCode::InvalidDigit('2'), 3));
    }

    #[test]
    fn empty_digits() {
        assert_eq!(err("", None), (ErrorCode::EmptyDigits, 0));
        assert_eq!(err("-", None), (ErrorCode::EmptyDigits, 0));
        assert_eq!(err("0x", None), (ErrorCode::EmptyDigits, 0));
    }

    #[test]
    fn radix_range() {
        assert_eq!(err("1", Some(1)), (ErrorCode::RadixOutOfRange(1), 0));
        assert_eq!(err("1", Some(37)), (ErrorCode::RadixOutOfRange(37), 0));
        assert_eq!(int("zz", Some(36)), 36 * 36 - 1);
    }

    #[test]
    fn capacity_covers_digits() {
        let s = "f".repeat(200);
        let x = int(&s, Some(16));
        assert_eq!(x.bit_length(), 800);
        assert!(x.allocated_limbs() >= x.limbs().len());
    }

    #[test]
    fn ratio() {
        let (n, d) = parse_ratio("-12/0x10", None).unwrap();
        assert_eq!((n, d), (BigInt::from(-12), BigInt::from(16)));
    }

    #[test]
    fn ratio_errors() {
        let cases: &[(&str, ErrorCode, usize)] = &[
            ("12345A", ErrorCode::MissingSeparator, 0),
            ("1/2/3", ErrorCode::DuplicateSeparator, 4),
            ("/2", ErrorCode::SeparatorAtBoundary, 1),
            ("2/", ErrorCode::SeparatorAtBoundary, 2),
            ("12345/54321A", ErrorCode::InvalidDigit('A'), 12),
            ("12/0", ErrorCode::ZeroDenominator, 4),
            ("12/-0x0", ErrorCode::ZeroDenominator, 4),
        ];
        for (s, code, column) in cases {
            let err = parse_ratio(s, None).unwrap_err();
            assert_eq!(err.code(), code, "{}", s);
            assert_eq!(err.column(), *column, "{}", s);
            assert!(err.is_format());
        }
    }
}
