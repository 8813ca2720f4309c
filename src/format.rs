//! Number to text.

use crate::arith::or_abort;
use crate::buffer::LimbBuffer;
use crate::int::BigInt;
use crate::lib::*;
use crate::math::{radix_chunk, small, Limb};
use crate::rational::BigRational;

const UPPER: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWER: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Append the digits of a magnitude, most significant first. Zero is `0`.
///
/// # Panics
///
/// If `radix` is not within 2 through 36.
pub(crate) fn write_magnitude(out: &mut String, limbs: &[Limb], radix: u32, lowercase: bool) {
    assert!(
        (2..=36).contains(&radix),
        "radix must be within 2 through 36, got {}",
        radix
    );
    if limbs.is_empty() {
        out.push('0');
        return;
    }

    // Peel off chunks of digits from the low end, then print them in
    // reverse with every chunk but the top one zero-padded.
    let (chunk_digits, chunk_base) = radix_chunk(radix);
    let mut scratch = or_abort(LimbBuffer::with_limbs(limbs.len()));
    scratch.as_mut_slice().copy_from_slice(limbs);
    let mut chunks: Vec<Limb> = Vec::new();
    let mut len = limbs.len();
    while len != 0 {
        let buf = &mut scratch.as_mut_slice()[..len];
        chunks.push(small::idiv(buf, chunk_base));
        len = small::normalized_len(buf);
    }

    let mut iter = chunks.iter().rev();
    if let Some(&top) = iter.next() {
        push_chunk(out, top, radix, 0, lowercase);
    }
    for &chunk in iter {
        push_chunk(out, chunk, radix, chunk_digits, lowercase);
    }
}

fn push_chunk(out: &mut String, mut chunk: Limb, radix: u32, width: usize, lowercase: bool) {
    if radix == 10 {
        let mut buffer = itoa::Buffer::new();
        let digits = buffer.format(chunk);
        for _ in digits.len()..width {
            out.push('0');
        }
        out.push_str(digits);
        return;
    }

    let alphabet = if lowercase { LOWER } else { UPPER };
    let radix = radix as Limb;
    let mut digits = [0u8; 64];
    let mut pos = digits.len();
    loop {
        pos -= 1;
        digits[pos] = alphabet[(chunk % radix) as usize];
        chunk /= radix;
        if chunk == 0 {
            break;
        }
    }
    for _ in digits.len() - pos..width {
        out.push('0');
    }
    out.extend(digits[pos..].iter().map(|&b| b as char));
}

fn push_signed(out: &mut String, negative: bool, limbs: &[Limb], radix: u32, lowercase: bool) {
    if negative && !limbs.is_empty() {
        out.push('-');
    }
    write_magnitude(out, limbs, radix, lowercase);
}

impl BigInt {
    /// Digits in the given base, 2 through 36, with a leading `-` for
    /// negative values. Letters are uppercase unless `lowercase` is set.
    ///
    /// ```
    /// # use hugenum::BigInt;
    /// let x = BigInt::from(-0xBEEFi32);
    /// assert_eq!(x.to_string_radix(16, false), "-BEEF");
    /// assert_eq!(x.to_string_radix(16, true), "-beef");
    /// assert_eq!(x.to_string_radix(2, false), "-1011111011101111");
    /// ```
    ///
    /// # Panics
    ///
    /// If `radix` is not within 2 through 36.
    pub fn to_string_radix(&self, radix: u32, lowercase: bool) -> String {
        let mut out = String::new();
        push_signed(&mut out, self.is_negative(), self.limbs(), radix, lowercase);
        out
    }
}

impl BigRational {
    /// `<numerator>/<denominator>` with both parts in the given base, 2
    /// through 36. Letters are uppercase unless `lowercase` is set.
    ///
    /// # Panics
    ///
    /// If `radix` is not within 2 through 36.
    pub fn to_string_radix(&self, radix: u32, lowercase: bool) -> String {
        let mut out = String::new();
        self.push_ratio(&mut out, radix, "", lowercase);
        out
    }

    fn push_ratio(&self, out: &mut String, radix: u32, prefix: &str, lowercase: bool) {
        if self.numer().is_negative() {
            out.push('-');
        }
        self.push_magnitudes(out, radix, prefix, lowercase);
    }

    /// Both parts without the sign, each behind `prefix`.
    fn push_magnitudes(&self, out: &mut String, radix: u32, prefix: &str, lowercase: bool) {
        out.push_str(prefix);
        write_magnitude(out, self.numer().limbs(), radix, lowercase);
        out.push('/');
        out.push_str(prefix);
        write_magnitude(out, self.denom_limbs(), radix, lowercase);
    }
}

macro_rules! radix_fmt {
    ($($Trait:ident $radix:expr, $prefix:expr, $lowercase:expr;)*) => ($(
        impl fmt::$Trait for BigInt {
            fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                let mut digits = String::new();
                write_magnitude(&mut digits, self.limbs(), $radix, $lowercase);
                formatter.pad_integral(!self.is_negative(), $prefix, &digits)
            }
        }

        impl fmt::$Trait for BigRational {
            fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                let prefix = if formatter.alternate() { $prefix } else { "" };
                let mut body = String::new();
                self.push_magnitudes(&mut body, $radix, prefix, $lowercase);
                // Like the integer formatters, precision is ignored.
                formatter.pad_integral(!self.numer().is_negative(), "", &body)
            }
        }
    )*)
}

radix_fmt! {
    Display 10, "", false;
    LowerHex 16, "0x", true;
    UpperHex 16, "0x", false;
    Octal 8, "0o", false;
    Binary 2, "0b", false;
}
