use crate::arith::{div_rem_magnitude, or_abort};
use crate::error::{Error, ErrorCode, Result};
use crate::float::{scale_pow2, Float};
use crate::int::BigInt;
use crate::lib::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use crate::lib::*;
use crate::math::{small, Limb};
use crate::operand::{Operand, Sign};
use crate::parse;

static ONE: [Limb; 1] = [1];

/// Arbitrary-precision fraction of two [`BigInt`]s.
///
/// The pair is kept in lowest terms with a positive denominator by every
/// constructor and every mutating operation, so zero is always `0/1` and
/// equal values have equal components.
///
/// ```
/// use hugenum::BigRational;
///
/// let x = BigRational::from_f64(123456789123456.75).unwrap();
/// assert_eq!(x.to_string(), "493827156493827/4");
/// assert_eq!(x.numer().used_limbs() as usize, x.numer().limbs().len());
/// ```
pub struct BigRational {
    numer: BigInt,
    denom: BigInt,
}

impl BigRational {
    /// Zero, as `0/1`, with one limb for each component.
    pub fn new() -> Self {
        or_abort(BigRational::allocate(0, 0))
    }

    /// Zero, as `0/1`, with each component's buffer sized for the given
    /// number of bits. At least one limb is allocated for each.
    pub fn allocate(numer_bits: usize, denom_bits: usize) -> Result<Self> {
        let numer = BigInt::allocate(numer_bits)?;
        let mut denom = BigInt::allocate(denom_bits)?;
        denom.copy_from(false, &ONE)?;
        Ok(BigRational { numer, denom })
    }

    /// `numer / denom` in lowest terms.
    ///
    /// Fails with `ErrorCode::DivisionByZero` when `denom` is zero.
    ///
    /// ```
    /// # use hugenum::BigRational;
    /// let x = BigRational::from_integers(10, -4).unwrap();
    /// assert_eq!(x.to_string(), "-5/2");
    /// ```
    pub fn from_integers<N: Operand, D: Operand>(numer: N, denom: D) -> Result<Self> {
        let numer = BigInt::try_from_operand(numer)?;
        let denom = BigInt::try_from_operand(denom)?;
        BigRational::from_parts(numer, denom)
    }

    /// Take ownership of a numerator and denominator and reduce them.
    ///
    /// Fails with `ErrorCode::DivisionByZero` when `denom` is zero.
    pub fn from_parts(numer: BigInt, denom: BigInt) -> Result<Self> {
        if denom.is_zero() {
            return Err(Error::new(ErrorCode::DivisionByZero));
        }
        let mut ratio = BigRational { numer, denom };
        ratio.reduce()?;
        Ok(ratio)
    }

    /// Give up the numerator and denominator.
    pub fn into_parts(self) -> (BigInt, BigInt) {
        (self.numer, self.denom)
    }

    /// Exact value of a float. The denominator is a power of two, as small
    /// as the value allows.
    ///
    /// Fails with `ErrorCode::NonFiniteFloat` for NaN and infinities.
    pub fn from_f64(value: f64) -> Result<Self> {
        BigRational::from_float(value)
    }

    /// Exact value of a float. The denominator is a power of two, as small
    /// as the value allows.
    pub fn from_f32(value: f32) -> Result<Self> {
        BigRational::from_float(value)
    }

    fn from_float<F: Float>(value: F) -> Result<Self> {
        let (negative, mantissa, exp) = match value.decompose() {
            Some(parts) => parts,
            None => return Err(Error::new(ErrorCode::NonFiniteFloat)),
        };
        if mantissa == 0 {
            return BigRational::allocate(0, 0);
        }

        let mut numer = mantissa.with_limbs(|_, limbs| BigInt::from_limbs(negative, limbs))?;
        let mut denom = BigInt::from_limbs(false, &ONE)?;
        if exp >= 0 {
            numer.try_shl_bits(exp as usize)?;
        } else {
            // Cancel the powers of two the mantissa and the denominator
            // have in common.
            let exp = exp.unsigned_abs();
            let common = cmp::min(mantissa.trailing_zeros(), exp);
            numer.shr_bits(common as usize);
            denom.try_shl_bits((exp - common) as usize)?;
        }
        Ok(BigRational { numer, denom })
    }

    /// Parse `<numerator>/<denominator>` with both parts in the given base,
    /// 2 through 36. Each part may carry its own sign and a prefix that
    /// agrees with `radix`.
    pub fn from_str_radix(s: &str, radix: u32) -> Result<Self> {
        let (numer, denom) = parse::parse_ratio(s, Some(radix))?;
        BigRational::from_parts(numer, denom)
    }

    /// Replace the value with one parsed from text, each part inferring its
    /// base from a `0x`, `0o` or `0b` prefix and using base 10 otherwise.
    ///
    /// On failure the value is left untouched.
    ///
    /// ```
    /// # use hugenum::BigRational;
    /// let mut x = BigRational::from_integers(1, 3).unwrap();
    /// assert!(x.set_to("12345/54321A").is_err());
    /// assert_eq!(x.to_string(), "1/3");
    /// x.set_to("-0x1F/0x17").unwrap();
    /// assert_eq!(x.to_string(), "-31/23");
    /// ```
    pub fn set_to(&mut self, s: &str) -> Result<()> {
        let (numer, denom) = parse::parse_ratio(s, None)?;
        self.replace(numer, denom)
    }

    /// Replace the value with one parsed from text in the given base.
    ///
    /// On failure the value is left untouched.
    pub fn set_to_radix(&mut self, s: &str, radix: u32) -> Result<()> {
        let (numer, denom) = parse::parse_ratio(s, Some(radix))?;
        self.replace(numer, denom)
    }

    /// Replace the value, reusing the existing buffers when they are large
    /// enough.
    pub fn assign<T: RationalOperand>(&mut self, value: T) -> Result<()> {
        value.with_ratio(|negative, numer, denom| {
            self.numer.buffer_mut().ensure_capacity(numer.len())?;
            self.denom.buffer_mut().ensure_capacity(denom.len())?;
            self.numer.copy_from(negative, numer)?;
            self.denom.copy_from(false, denom)
        })
    }

    /// Clone, reporting allocation failure instead of aborting.
    pub fn try_clone(&self) -> Result<Self> {
        Ok(BigRational {
            numer: self.numer.try_clone()?,
            denom: self.denom.try_clone()?,
        })
    }

    /// Release both components' buffers now instead of at drop.
    ///
    /// Afterwards every limb count of both components is 0. The value then
    /// reads and formats as `0/1`, although `denom()` shows the released
    /// component as zero. Disposing twice is harmless.
    pub fn dispose(&mut self) {
        self.numer.dispose();
        self.denom.dispose();
    }

    /// The numerator, carrying the sign of the value.
    ///
    /// This is a view: it cannot release or change the numerator.
    #[inline]
    pub fn numer(&self) -> &BigInt {
        &self.numer
    }

    /// The denominator, always positive.
    #[inline]
    pub fn denom(&self) -> &BigInt {
        &self.denom
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.numer.is_zero()
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.numer.is_negative()
    }

    /// Whether the denominator is 1.
    pub fn is_integer(&self) -> bool {
        self.denom_limbs() == &ONE[..]
    }

    pub fn sign(&self) -> Sign {
        self.numer.sign()
    }

    /// Nearest `f64`, rounding half to even unless the result is subnormal.
    pub fn to_f64(&self) -> f64 {
        let numer = self.numer.limbs();
        if numer.is_empty() {
            return 0.0;
        }
        let denom = self.denom_limbs();

        // Scale so the integer quotient has 65 or 66 bits, more than f64
        // keeps, then fold the remainder into the lowest bit.
        let shift = 65 + small::bit_length(denom) as i64 - small::bit_length(numer) as i64;
        let mut a = or_abort(BigInt::from_limbs(false, numer));
        let mut b = or_abort(BigInt::from_limbs(false, denom));
        if shift > 0 {
            or_abort(a.try_shl_bits(shift as usize));
        } else {
            or_abort(b.try_shl_bits(shift.unsigned_abs() as usize));
        }
        let (quotient, remainder) = or_abort(div_rem_magnitude(a.limbs(), b.limbs()));
        let mut mantissa = quotient.to_u128().unwrap_or(0);
        if !remainder.is_zero() {
            mantissa |= 1;
        }

        let magnitude = scale_pow2(mantissa as f64, -shift);
        if self.is_negative() {
            -magnitude
        } else {
            magnitude
        }
    }

    // ARITHMETIC

    /// Add `rhs` to `self`.
    ///
    /// ```
    /// # use hugenum::BigRational;
    /// let mut x = BigRational::from_integers(1, 6).unwrap();
    /// x.try_add(&BigRational::from_integers(1, 3).unwrap()).unwrap();
    /// assert_eq!(x.to_string(), "1/2");
    /// x.try_add(-1).unwrap();
    /// assert_eq!(x.to_string(), "-1/2");
    /// ```
    pub fn try_add<T: RationalOperand>(&mut self, rhs: T) -> Result<()> {
        rhs.with_ratio(|negative, numer, denom| self.add_ratio(negative, numer, denom))
    }

    /// Subtract `rhs` from `self`.
    pub fn try_sub<T: RationalOperand>(&mut self, rhs: T) -> Result<()> {
        rhs.with_ratio(|negative, numer, denom| self.add_ratio(!negative, numer, denom))
    }

    /// Multiply `self` by `rhs`.
    pub fn try_mul<T: RationalOperand>(&mut self, rhs: T) -> Result<()> {
        rhs.with_ratio(|negative, numer, denom| {
            let mut n = BigInt::from_limbs(self.numer.is_negative(), self.numer.limbs())?;
            n.mul_signed(negative, numer)?;
            let mut d = BigInt::from_limbs(false, self.denom_limbs())?;
            d.mul_signed(false, denom)?;
            self.replace(n, d)
        })
    }

    /// Divide `self` by `rhs`.
    ///
    /// Fails with `ErrorCode::DivisionByZero` when `rhs` is zero.
    pub fn try_div<T: RationalOperand>(&mut self, rhs: T) -> Result<()> {
        rhs.with_ratio(|negative, numer, denom| {
            if numer.is_empty() {
                return Err(Error::new(ErrorCode::DivisionByZero));
            }
            let mut n = BigInt::from_limbs(self.numer.is_negative(), self.numer.limbs())?;
            n.mul_signed(negative, denom)?;
            let mut d = BigInt::from_limbs(false, self.denom_limbs())?;
            d.mul_signed(false, numer)?;
            self.replace(n, d)
        })
    }

    /// Flip the sign. Zero stays zero.
    pub fn negate(&mut self) {
        self.numer.negate();
    }

    /// Replace `self` with `1 / self`.
    ///
    /// Fails with `ErrorCode::DivisionByZero` when `self` is zero.
    pub fn try_recip(&mut self) -> Result<()> {
        if self.numer.is_zero() {
            return Err(Error::new(ErrorCode::DivisionByZero));
        }
        let negative = self.numer.is_negative();
        mem::swap(&mut self.numer, &mut self.denom);
        if negative {
            self.numer.negate();
            self.denom.negate();
        }
        Ok(())
    }

    // INTERNALS

    /// Denominator magnitude, reading a disposed denominator as 1.
    pub(crate) fn denom_limbs(&self) -> &[Limb] {
        if self.denom.is_zero() {
            &ONE
        } else {
            self.denom.limbs()
        }
    }

    /// a/b + c/d = (ad + cb) / bd
    fn add_ratio(&mut self, negative: bool, c: &[Limb], d: &[Limb]) -> Result<()> {
        let b = self.denom_limbs();
        let mut numer = BigInt::from_limbs(self.numer.is_negative(), self.numer.limbs())?;
        numer.mul_signed(false, d)?;
        let mut cross = BigInt::from_limbs(negative, c)?;
        cross.mul_signed(false, b)?;
        numer.add_signed(cross.is_negative(), cross.limbs())?;
        let mut denom = BigInt::from_limbs(false, b)?;
        denom.mul_signed(false, d)?;
        self.replace(numer, denom)
    }

    /// Reduce `numer / denom` and move it into `self`'s buffers. Nothing in
    /// `self` changes unless reduction succeeds.
    fn replace(&mut self, numer: BigInt, denom: BigInt) -> Result<()> {
        let ratio = BigRational::from_parts(numer, denom)?;
        self.numer.absorb(ratio.numer)?;
        self.denom.absorb(ratio.denom)
    }

    /// Bring a pair with a non-zero denominator to lowest terms with a
    /// positive denominator.
    fn reduce(&mut self) -> Result<()> {
        debug_assert!(!self.denom.is_zero());
        if self.denom.is_negative() {
            self.denom.negate();
            self.numer.negate();
        }
        if self.numer.is_zero() {
            return self.denom.copy_from(false, &ONE);
        }

        let gcd = self.numer.gcd(&self.denom)?;
        if gcd != 1 {
            let (numer, _) = self.numer.div_rem_signed(false, gcd.limbs())?;
            let (denom, _) = self.denom.div_rem_signed(false, gcd.limbs())?;
            self.numer.absorb(numer)?;
            self.denom.absorb(denom)?;
        }
        Ok(())
    }

    fn eq_ratio(&self, negative: bool, numer: &[Limb], denom: &[Limb]) -> bool {
        self.numer.sign() == Sign::of(negative, numer)
            && self.numer.limbs() == numer
            && self.denom_limbs() == denom
    }

    fn cmp_ratio(&self, negative: bool, c: &[Limb], d: &[Limb]) -> Ordering {
        let sign = self.numer.sign();
        match sign.cmp(&Sign::of(negative, c)) {
            Ordering::Equal => {}
            ordering => return ordering,
        }
        if sign == Sign::NoSign {
            return Ordering::Equal;
        }

        // Compare |a| * d against |c| * b.
        let mut ad = or_abort(BigInt::from_limbs(false, self.numer.limbs()));
        or_abort(ad.mul_signed(false, d));
        let mut cb = or_abort(BigInt::from_limbs(false, c));
        or_abort(cb.mul_signed(false, self.denom_limbs()));
        let ordering = ad.cmp(&cb);
        if sign == Sign::Minus {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

/// Value that can be viewed as a sign, a numerator magnitude and a
/// denominator magnitude.
///
/// Implemented for `BigRational`, `BigInt` and the primitive integers, whose
/// denominator is 1, and for references to any of those.
pub trait RationalOperand {
    /// Call `f` with the sign (true for negative), the numerator magnitude
    /// and the positive denominator magnitude, in lowest terms.
    fn with_ratio<R, F>(&self, f: F) -> R
    where
        F: FnOnce(bool, &[Limb], &[Limb]) -> R;
}

impl<'a, T> RationalOperand for &'a T
where
    T: ?Sized + RationalOperand,
{
    #[inline]
    fn with_ratio<R, F>(&self, f: F) -> R
    where
        F: FnOnce(bool, &[Limb], &[Limb]) -> R,
    {
        (**self).with_ratio(f)
    }
}

impl RationalOperand for BigRational {
    #[inline]
    fn with_ratio<R, F>(&self, f: F) -> R
    where
        F: FnOnce(bool, &[Limb], &[Limb]) -> R,
    {
        f(self.numer.is_negative(), self.numer.limbs(), self.denom_limbs())
    }
}

macro_rules! integer_ratio {
    ($($t:ty)*) => ($(
        impl RationalOperand for $t {
            #[inline]
            fn with_ratio<R, F>(&self, f: F) -> R
            where
                F: FnOnce(bool, &[Limb], &[Limb]) -> R,
            {
                self.with_limbs(|negative, limbs| f(negative, limbs, &ONE))
            }
        }

        impl PartialEq<$t> for BigRational {
            fn eq(&self, other: &$t) -> bool {
                other.with_ratio(|negative, numer, denom| self.eq_ratio(negative, numer, denom))
            }
        }

        impl PartialOrd<$t> for BigRational {
            fn partial_cmp(&self, other: &$t) -> Option<Ordering> {
                Some(other.with_ratio(|negative, numer, denom| {
                    self.cmp_ratio(negative, numer, denom)
                }))
            }
        }
    )*)
}

integer_ratio!(BigInt u8 u16 u32 u64 u128 usize i8 i16 i32 i64 i128 isize);

macro_rules! from_integer {
    ($($t:ty)*) => ($(
        impl From<$t> for BigRational {
            fn from(value: $t) -> Self {
                or_abort(BigRational::from_integers(value, 1u8))
            }
        }
    )*)
}

from_integer!(u8 u16 u32 u64 u128 usize i8 i16 i32 i64 i128 isize);

impl From<BigInt> for BigRational {
    fn from(numer: BigInt) -> Self {
        let denom = or_abort(BigInt::from_limbs(false, &ONE));
        BigRational { numer, denom }
    }
}

impl Default for BigRational {
    fn default() -> Self {
        BigRational::new()
    }
}

impl Clone for BigRational {
    fn clone(&self) -> Self {
        or_abort(self.try_clone())
    }
}

impl PartialEq for BigRational {
    fn eq(&self, other: &Self) -> bool {
        other.with_ratio(|negative, numer, denom| self.eq_ratio(negative, numer, denom))
    }
}

impl Eq for BigRational {}

impl PartialOrd for BigRational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigRational {
    fn cmp(&self, other: &Self) -> Ordering {
        other.with_ratio(|negative, numer, denom| self.cmp_ratio(negative, numer, denom))
    }
}

impl Hash for BigRational {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.numer.hash(state);
        self.denom_limbs().hash(state);
    }
}

impl Debug for BigRational {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "BigRational({})", self)
    }
}

impl FromStr for BigRational {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (numer, denom) = parse::parse_ratio(s, None)?;
        BigRational::from_parts(numer, denom)
    }
}

impl TryFrom<f64> for BigRational {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        BigRational::from_f64(value)
    }
}

impl TryFrom<f32> for BigRational {
    type Error = Error;

    fn try_from(value: f32) -> Result<Self> {
        BigRational::from_f32(value)
    }
}

// OPERATORS

macro_rules! binop {
    ($($Op:ident $op:ident $OpAssign:ident $op_assign:ident $try_op:ident)*) => ($(
        impl<T: RationalOperand> $OpAssign<T> for BigRational {
            #[inline]
            fn $op_assign(&mut self, rhs: T) {
                or_abort(self.$try_op(rhs));
            }
        }

        impl<T: RationalOperand> $Op<T> for BigRational {
            type Output = BigRational;

            #[inline]
            fn $op(mut self, rhs: T) -> BigRational {
                self.$op_assign(rhs);
                self
            }
        }

        impl<'a, T: RationalOperand> $Op<T> for &'a BigRational {
            type Output = BigRational;

            #[inline]
            fn $op(self, rhs: T) -> BigRational {
                let mut result = self.clone();
                result.$op_assign(rhs);
                result
            }
        }
    )*)
}

binop! {
    Add add AddAssign add_assign try_add
    Sub sub SubAssign sub_assign try_sub
    Mul mul MulAssign mul_assign try_mul
    Div div DivAssign div_assign try_div
}

impl Neg for BigRational {
    type Output = BigRational;

    fn neg(mut self) -> BigRational {
        self.negate();
        self
    }
}

impl<'a> Neg for &'a BigRational {
    type Output = BigRational;

    fn neg(self) -> BigRational {
        -self.clone()
    }
}
