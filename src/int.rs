use crate::arith::or_abort;
use crate::buffer::LimbBuffer;
use crate::error::{Error, ErrorCode, Result};
use crate::float::{scale_pow2, Float};
use crate::lib::*;
use crate::math::{large, small, Limb, LIMB_BITS};
use crate::operand::{Operand, Sign};
use crate::parse;

/// Arbitrary-precision signed integer.
///
/// The value lives in a single [`LimbBuffer`] as a little-endian run of
/// limbs, followed by a signed count of the limbs that are significant. The
/// magnitude of the count is the number of limbs in use and its sign is the
/// sign of the number, so zero is a count of zero no matter how large the
/// buffer is. Limbs past the used count are scratch space and carry no
/// meaning.
///
/// Buffers only grow. An operation that needs more room reallocates before
/// it touches the value, so a failed `try_*` call leaves the receiver
/// exactly as it was.
pub struct BigInt {
    buffer: LimbBuffer,
    size: isize,
}

impl BigInt {
    /// Zero, backed by a single limb.
    pub fn new() -> Self {
        or_abort(BigInt::allocate(0))
    }

    /// Zero, backed by enough limbs to hold a value of `bits` bits without
    /// reallocating. At least one limb is always allocated.
    ///
    /// ```
    /// # use hugenum::{BigInt, LIMB_BITS};
    /// let x = BigInt::allocate(LIMB_BITS as usize * 2 + 1).unwrap();
    /// assert_eq!(x.allocated_limbs(), 3);
    /// assert_eq!(x.used_limbs(), 0);
    /// ```
    pub fn allocate(bits: usize) -> Result<Self> {
        let mut buffer = LimbBuffer::new();
        buffer.allocate(bits)?;
        Ok(BigInt { buffer, size: 0 })
    }

    /// Grow the buffer to hold a value of `bits` bits without changing the
    /// value. Never shrinks. Also brings a disposed integer back to life.
    pub fn reserve(&mut self, bits: usize) -> Result<()> {
        self.buffer.allocate(bits)
    }

    /// Fallible conversion from any operand, for when aborting on
    /// allocation failure is not acceptable.
    pub fn try_from_operand<T: Operand>(value: T) -> Result<Self> {
        value.with_limbs(BigInt::from_limbs)
    }

    /// Integer part of a float, truncated toward zero.
    ///
    /// Fails with `ErrorCode::NonFiniteFloat` for NaN and infinities.
    ///
    /// ```
    /// # use hugenum::BigInt;
    /// assert_eq!(BigInt::from_f64(-2.75).unwrap(), -2);
    /// assert!(BigInt::from_f64(f64::NAN).is_err());
    /// ```
    pub fn from_f64(value: f64) -> Result<Self> {
        BigInt::from_float(value)
    }

    /// Integer part of a float, truncated toward zero.
    pub fn from_f32(value: f32) -> Result<Self> {
        BigInt::from_float(value)
    }

    fn from_float<F: Float>(value: F) -> Result<Self> {
        let (negative, mantissa, exp) = match value.decompose() {
            Some(parts) => parts,
            None => return Err(Error::new(ErrorCode::NonFiniteFloat)),
        };
        if exp >= 0 {
            let mut int = BigInt::allocate(64 + exp as usize)?;
            mantissa.with_limbs(|_, limbs| int.copy_from(negative, limbs))?;
            int.try_shl_bits(exp as usize)?;
            Ok(int)
        } else {
            let shift = exp.unsigned_abs();
            let truncated = if shift >= 64 { 0 } else { mantissa >> shift };
            truncated.with_limbs(|_, limbs| BigInt::from_limbs(negative, limbs))
        }
    }

    /// Parse text in the given base, 2 through 36.
    ///
    /// A leading `-` is allowed. A `0x`, `0o` or `0b` prefix after the sign
    /// is accepted when it agrees with `radix`.
    pub fn from_str_radix(s: &str, radix: u32) -> Result<Self> {
        parse::parse_int(s, Some(radix))
    }

    /// Replace the value with one parsed from text, inferring the base from
    /// a `0x`, `0o` or `0b` prefix and using base 10 otherwise.
    ///
    /// On failure the value is left untouched.
    pub fn set_to(&mut self, s: &str) -> Result<()> {
        let value = parse::parse_int(s, None)?;
        self.absorb(value)
    }

    /// Replace the value with one parsed from text in the given base.
    ///
    /// On failure the value is left untouched.
    pub fn set_to_radix(&mut self, s: &str, radix: u32) -> Result<()> {
        let value = parse::parse_int(s, Some(radix))?;
        self.absorb(value)
    }

    /// Replace the value, reusing the existing buffer when it is large
    /// enough.
    pub fn assign<T: Operand>(&mut self, value: T) -> Result<()> {
        value.with_limbs(|negative, limbs| self.copy_from(negative, limbs))
    }

    /// Clone, reporting allocation failure instead of aborting. The clone
    /// gets a buffer of the same capacity.
    pub fn try_clone(&self) -> Result<Self> {
        Ok(BigInt {
            buffer: self.buffer.try_clone(self.len())?,
            size: self.size,
        })
    }

    /// Release the limb buffer now instead of at drop.
    ///
    /// Afterwards the integer reads as zero with no storage, and both limb
    /// counts are 0. Disposing twice is harmless. Any operation that needs
    /// storage allocates it again.
    pub fn dispose(&mut self) {
        self.buffer.release();
        self.size = 0;
    }

    /// Number of limbs in the buffer.
    #[inline]
    pub fn allocated_limbs(&self) -> usize {
        self.buffer.capacity()
    }

    /// Signed number of limbs in use: positive for positive values, negative
    /// for negative values, 0 for zero.
    #[inline]
    pub fn used_limbs(&self) -> isize {
        self.size
    }

    /// Raw pointer to the first limb, null once disposed.
    #[inline]
    pub fn limbs_ptr(&self) -> *const Limb {
        self.buffer.as_ptr()
    }

    /// The magnitude as little-endian limbs, without leading zero limbs.
    #[inline]
    pub fn limbs(&self) -> &[Limb] {
        &self.buffer.as_slice()[..self.len()]
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.size == 0
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.size < 0
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.size > 0
    }

    pub fn sign(&self) -> Sign {
        Sign::of(self.is_negative(), self.limbs())
    }

    /// Number of bits in the magnitude, 0 for zero.
    pub fn bit_length(&self) -> usize {
        small::bit_length(self.limbs())
    }

    /// Whether the low bit of the magnitude is clear.
    pub fn is_even(&self) -> bool {
        self.limbs().first().map_or(true, |&limb| limb & 1 == 0)
    }

    /// Convert to `u128` if the value fits.
    pub fn to_u128(&self) -> Option<u128> {
        if self.is_negative() {
            return None;
        }
        self.magnitude_u128()
    }

    /// Convert to `i128` if the value fits.
    pub fn to_i128(&self) -> Option<i128> {
        let magnitude = self.magnitude_u128()?;
        if self.is_negative() {
            if magnitude <= 1 << 127 {
                Some((magnitude as i128).wrapping_neg())
            } else {
                None
            }
        } else {
            i128::try_from(magnitude).ok()
        }
    }

    /// Convert to `u64` if the value fits.
    pub fn to_u64(&self) -> Option<u64> {
        self.to_u128().and_then(|x| u64::try_from(x).ok())
    }

    /// Convert to `i64` if the value fits.
    pub fn to_i64(&self) -> Option<i64> {
        self.to_i128().and_then(|x| i64::try_from(x).ok())
    }

    /// Nearest `f64`, rounding half to even. Values beyond the `f64` range
    /// become infinite.
    pub fn to_f64(&self) -> f64 {
        let limbs = self.limbs();
        let bits = small::bit_length(limbs);
        let magnitude = if bits <= 64 {
            self.magnitude_u128().map_or(0.0, |x| x as f64)
        } else {
            let shift = bits - 64;
            let mut top = bits_at(limbs, shift);
            if small::trailing_zeros(limbs) < shift {
                top |= 1;
            }
            scale_pow2(top as f64, shift as i64)
        };
        if self.is_negative() {
            -magnitude
        } else {
            magnitude
        }
    }

    fn magnitude_u128(&self) -> Option<u128> {
        if self.bit_length() > 128 {
            return None;
        }
        let mut x: u128 = 0;
        for &limb in self.limbs().iter().rev() {
            x = x << LIMB_BITS | limb as u128;
        }
        Some(x)
    }

    // INTERNALS

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.size.unsigned_abs()
    }

    /// New integer from a sign and magnitude, in a buffer of exactly
    /// `max(1, limbs.len())` limbs.
    pub(crate) fn from_limbs(negative: bool, limbs: &[Limb]) -> Result<Self> {
        let mut buffer = LimbBuffer::with_limbs(cmp::max(1, limbs.len()))?;
        buffer.as_mut_slice()[..limbs.len()].copy_from_slice(limbs);
        Ok(BigInt::from_buffer(buffer, limbs.len(), negative))
    }

    /// Wrap the first `len` limbs of `buffer`, dropping leading zero limbs.
    pub(crate) fn from_buffer(buffer: LimbBuffer, len: usize, negative: bool) -> Self {
        let mut int = BigInt { buffer, size: 0 };
        int.set_len(len, negative);
        int
    }

    pub(crate) fn buffer_mut(&mut self) -> &mut LimbBuffer {
        &mut self.buffer
    }

    /// Mark the first `len` limbs of the buffer as the magnitude, dropping
    /// leading zero limbs. Zero is never negative.
    pub(crate) fn set_len(&mut self, len: usize, negative: bool) {
        let len = small::normalized_len(&self.buffer.as_slice()[..len]);
        self.size = if negative { -(len as isize) } else { len as isize };
    }

    /// Overwrite with a sign and magnitude. Fails before modifying anything.
    pub(crate) fn copy_from(&mut self, negative: bool, limbs: &[Limb]) -> Result<()> {
        self.buffer.ensure_capacity(cmp::max(limbs.len(), 1))?;
        self.buffer.as_mut_slice()[..limbs.len()].copy_from_slice(limbs);
        self.set_len(limbs.len(), negative);
        Ok(())
    }

    /// Take over the value of `other`. Copies into the existing buffer when
    /// it is large enough, otherwise adopts the buffer of `other`. Allocates
    /// only when neither side owns storage, as for a zero stored into a
    /// disposed value.
    pub(crate) fn absorb(&mut self, other: BigInt) -> Result<()> {
        let len = other.len();
        if self.buffer.is_allocated() && self.buffer.capacity() >= len {
            self.buffer.as_mut_slice()[..len].copy_from_slice(other.limbs());
            self.size = other.size;
        } else if other.buffer.is_allocated() {
            *self = other;
        } else {
            self.buffer.allocate(0)?;
            self.size = 0;
        }
        Ok(())
    }
}

/// The 64 bits of `limbs >> shift`, counting from the low end.
fn bits_at(limbs: &[Limb], shift: usize) -> u64 {
    let width = LIMB_BITS as usize;
    let mut acc: u128 = 0;
    let mut filled = 0;
    for &limb in &limbs[shift / width..] {
        if filled >= 128 {
            break;
        }
        acc |= (limb as u128) << filled;
        filled += width;
    }
    (acc >> (shift % width)) as u64
}

/// Order two signed magnitudes.
pub(crate) fn compare_signed(
    x_negative: bool,
    x: &[Limb],
    y_negative: bool,
    y: &[Limb],
) -> Ordering {
    let x_sign = Sign::of(x_negative, x);
    match x_sign.cmp(&Sign::of(y_negative, y)) {
        Ordering::Equal => match x_sign {
            Sign::Plus => large::compare(x, y),
            Sign::Minus => large::compare(y, x),
            Sign::NoSign => Ordering::Equal,
        },
        ordering => ordering,
    }
}

impl Default for BigInt {
    fn default() -> Self {
        BigInt::new()
    }
}

impl Clone for BigInt {
    fn clone(&self) -> Self {
        or_abort(self.try_clone())
    }
}

impl PartialEq for BigInt {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.limbs() == other.limbs()
    }
}

impl Eq for BigInt {}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_signed(
            self.is_negative(),
            self.limbs(),
            other.is_negative(),
            other.limbs(),
        )
    }
}

impl Hash for BigInt {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.size.hash(state);
        self.limbs().hash(state);
    }
}

impl Debug for BigInt {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "BigInt({})", self)
    }
}

impl FromStr for BigInt {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse::parse_int(s, None)
    }
}

impl TryFrom<f64> for BigInt {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        BigInt::from_f64(value)
    }
}

impl TryFrom<f32> for BigInt {
    type Error = Error;

    fn try_from(value: f32) -> Result<Self> {
        BigInt::from_f32(value)
    }
}

macro_rules! from_primitive {
    ($($t:ty)*) => ($(
        impl From<$t> for BigInt {
            #[inline]
            fn from(value: $t) -> Self {
                or_abort(BigInt::try_from_operand(value))
            }
        }

        impl PartialEq<$t> for BigInt {
            fn eq(&self, other: &$t) -> bool {
                self.partial_cmp(other) == Some(Ordering::Equal)
            }
        }

        impl PartialEq<BigInt> for $t {
            fn eq(&self, other: &BigInt) -> bool {
                other == self
            }
        }

        impl PartialOrd<$t> for BigInt {
            fn partial_cmp(&self, other: &$t) -> Option<Ordering> {
                Some(other.with_limbs(|negative, limbs| {
                    compare_signed(self.is_negative(), self.limbs(), negative, limbs)
                }))
            }
        }
    )*)
}

from_primitive!(u8 u16 u32 u64 u128 usize i8 i16 i32 i64 i128 isize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_has_one_limb() {
        let x = BigInt::new();
        assert_eq!(x.allocated_limbs(), 1);
        assert_eq!(x.used_limbs(), 0);
        assert!(!x.limbs_ptr().is_null());
        assert!(x.is_zero());
    }

    #[test]
    fn primitive_sign_in_size() {
        let x = BigInt::from(-5i32);
        assert_eq!(x.used_limbs(), -1);
        assert_eq!(x.limbs(), &[5]);
        assert_eq!(x.sign(), Sign::Minus);

        let x = BigInt::from(0u64);
        assert_eq!(x.used_limbs(), 0);
        assert_eq!(x.allocated_limbs(), 1);
    }

    #[test]
    fn dispose_clears_everything() {
        let mut x = BigInt::from(123u32);
        x.dispose();
        assert_eq!(x.allocated_limbs(), 0);
        assert_eq!(x.used_limbs(), 0);
        assert!(x.limbs_ptr().is_null());
        x.dispose();
        assert!(x.is_zero());

        x.assign(7u8).unwrap();
        assert_eq!(x, 7u8);
    }

    #[test]
    fn absorb_keeps_larger_buffer() {
        let mut x = BigInt::allocate(LIMB_BITS as usize * 4).unwrap();
        let ptr = x.limbs_ptr();
        x.absorb(BigInt::from(-9i64)).unwrap();
        assert_eq!(x.limbs_ptr(), ptr);
        assert_eq!(x.allocated_limbs(), 4);
        assert_eq!(x, -9i64);

        let mut y = BigInt::new();
        y.absorb(BigInt::from(u128::MAX)).unwrap();
        assert_eq!(y, u128::MAX);
    }

    #[test]
    fn signed_compare() {
        assert_eq!(compare_signed(true, &[1], false, &[]), Ordering::Less);
        assert_eq!(compare_signed(true, &[1], true, &[2]), Ordering::Greater);
        assert_eq!(compare_signed(false, &[1, 1], false, &[2]), Ordering::Greater);
        assert_eq!(compare_signed(true, &[], false, &[]), Ordering::Equal);
    }

    #[test]
    fn bits_at_spans_limbs() {
        let limbs = [Limb::MAX, 1];
        assert_eq!(bits_at(&limbs, LIMB_BITS as usize - 1), 3);
        assert_eq!(bits_at(&limbs, 0) & 0xFF, 0xFF);
    }

    #[test]
    fn native_round_trip() {
        assert_eq!(BigInt::from(i128::MIN).to_i128(), Some(i128::MIN));
        assert_eq!(BigInt::from(i64::MIN).to_i64(), Some(i64::MIN));
        assert_eq!(BigInt::from(u64::MAX).to_i64(), None);
        assert_eq!(BigInt::from(-1i8).to_u64(), None);
        assert_eq!(BigInt::from(u128::MAX).to_u128(), Some(u128::MAX));
    }
}
