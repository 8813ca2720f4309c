//! In-place arithmetic on `BigInt`.
//!
//! Each operation makes sure the receiver's buffer is large enough before
//! writing to it, or computes into a scratch buffer and swaps it in, so a
//! failed allocation leaves the receiver unchanged.

use crate::buffer::{abort_on_oom, LimbBuffer};
use crate::error::{Error, ErrorCode, Result};
use crate::int::BigInt;
use crate::lib::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Shl, ShlAssign, Shr,
    ShrAssign, Sub, SubAssign,
};
use crate::lib::*;
use crate::math::{large, limbs_for_bits, small, Limb, LIMB_BITS};
use crate::operand::Operand;

/// Unwrap the result of an infallible-looking operation. Allocation failure
/// aborts like it does for `Vec`, division by zero panics like it does for
/// the primitive integers.
pub(crate) fn or_abort<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => match *err.code() {
            ErrorCode::AllocationFailed(limbs) => abort_on_oom(limbs),
            ErrorCode::DivisionByZero => panic!("attempt to divide by zero"),
            _ => panic!("{}", err),
        },
    }
}

impl BigInt {
    /// Add `rhs` to `self`.
    ///
    /// ```
    /// # use hugenum::BigInt;
    /// let mut x = BigInt::from(-5);
    /// x.try_add(8u8).unwrap();
    /// x.try_add(&BigInt::from(10)).unwrap();
    /// assert_eq!(x, 13);
    /// ```
    pub fn try_add<T: Operand>(&mut self, rhs: T) -> Result<()> {
        rhs.with_limbs(|negative, limbs| self.add_signed(negative, limbs))
    }

    /// Subtract `rhs` from `self`.
    pub fn try_sub<T: Operand>(&mut self, rhs: T) -> Result<()> {
        rhs.with_limbs(|negative, limbs| self.add_signed(!negative, limbs))
    }

    /// Multiply `self` by `rhs`.
    pub fn try_mul<T: Operand>(&mut self, rhs: T) -> Result<()> {
        rhs.with_limbs(|negative, limbs| self.mul_signed(negative, limbs))
    }

    /// Divide `self` by `rhs`, truncating toward zero.
    pub fn try_div<T: Operand>(&mut self, rhs: T) -> Result<()> {
        let (quotient, _) =
            rhs.with_limbs(|negative, limbs| self.div_rem_signed(negative, limbs))?;
        self.absorb(quotient)
    }

    /// Replace `self` with the remainder of truncating division by `rhs`.
    /// The remainder takes the sign of the dividend.
    pub fn try_rem<T: Operand>(&mut self, rhs: T) -> Result<()> {
        let (_, remainder) =
            rhs.with_limbs(|negative, limbs| self.div_rem_signed(negative, limbs))?;
        self.absorb(remainder)
    }

    /// Divide `self` by `rhs`, truncating toward zero, and return the
    /// remainder.
    ///
    /// ```
    /// # use hugenum::BigInt;
    /// let mut x = BigInt::from(-7);
    /// let r = x.try_div_rem(2).unwrap();
    /// assert_eq!((x, r), (BigInt::from(-3), BigInt::from(-1)));
    /// ```
    pub fn try_div_rem<T: Operand>(&mut self, rhs: T) -> Result<BigInt> {
        let (quotient, remainder) =
            rhs.with_limbs(|negative, limbs| self.div_rem_signed(negative, limbs))?;
        self.absorb(quotient)?;
        Ok(remainder)
    }

    /// Flip the sign. Zero stays zero.
    #[inline]
    pub fn negate(&mut self) {
        let len = self.len();
        self.set_len(len, !self.is_negative());
    }

    /// Drop the sign.
    #[inline]
    pub fn abs_in_place(&mut self) {
        let len = self.len();
        self.set_len(len, false);
    }

    /// Greatest common divisor of the magnitudes. Always non-negative, and
    /// zero only when both inputs are zero.
    pub fn gcd(&self, other: &BigInt) -> Result<BigInt> {
        let mut a = BigInt::from_limbs(false, self.limbs())?;
        let mut b = BigInt::from_limbs(false, other.limbs())?;
        while !b.is_zero() {
            let (_, remainder) = div_rem_magnitude(a.limbs(), b.limbs())?;
            a = mem::replace(&mut b, remainder);
        }
        Ok(a)
    }

    /// Multiply the magnitude by `2^bits`.
    pub fn try_shl_bits(&mut self, bits: usize) -> Result<()> {
        let len = self.len();
        if len == 0 || bits == 0 {
            return Ok(());
        }

        let limb_shift = bits / LIMB_BITS as usize;
        let bit_shift = (bits % LIMB_BITS as usize) as u32;
        let new_len = match self.bit_length().checked_add(bits) {
            Some(new_bits) => limbs_for_bits(new_bits),
            None => return Err(Error::out_of_memory(usize::MAX)),
        };
        self.buffer_mut().ensure_capacity(new_len)?;

        let negative = self.is_negative();
        let buf = &mut self.buffer_mut().as_mut_slice()[..new_len];
        buf.copy_within(..len, limb_shift);
        for limb in &mut buf[..limb_shift] {
            *limb = 0;
        }
        let carry = small::ishl_bits(&mut buf[limb_shift..limb_shift + len], bit_shift);
        if limb_shift + len < new_len {
            buf[limb_shift + len] = carry;
        }
        self.set_len(new_len, negative);
        Ok(())
    }

    /// Divide the magnitude by `2^bits`, truncating toward zero. Never
    /// allocates.
    pub fn shr_bits(&mut self, bits: usize) {
        let len = self.len();
        let limb_shift = bits / LIMB_BITS as usize;
        if limb_shift >= len {
            self.set_len(0, false);
            return;
        }

        let bit_shift = (bits % LIMB_BITS as usize) as u32;
        let new_len = len - limb_shift;
        let negative = self.is_negative();
        let buf = &mut self.buffer_mut().as_mut_slice()[..len];
        buf.copy_within(limb_shift.., 0);
        small::ishr_bits(&mut buf[..new_len], bit_shift);
        self.set_len(new_len, negative);
    }

    // SIGNED KERNELS

    pub(crate) fn add_signed(&mut self, negative: bool, y: &[Limb]) -> Result<()> {
        if y.is_empty() {
            return Ok(());
        }

        let x_len = self.len();
        let x_negative = self.is_negative();
        if x_len == 0 || x_negative == negative {
            let len = cmp::max(x_len, y.len()) + 1;
            self.buffer_mut().ensure_capacity(len)?;
            let buf = &mut self.buffer_mut().as_mut_slice()[..len];
            for limb in &mut buf[x_len..] {
                *limb = 0;
            }
            large::iadd(buf, y);
            self.set_len(len, negative);
            return Ok(());
        }

        match large::compare(self.limbs(), y) {
            Ordering::Equal => self.set_len(0, false),
            Ordering::Greater => {
                large::isub(&mut self.buffer_mut().as_mut_slice()[..x_len], y);
                self.set_len(x_len, x_negative);
            }
            Ordering::Less => {
                self.buffer_mut().ensure_capacity(y.len())?;
                let buf = &mut self.buffer_mut().as_mut_slice()[..y.len()];
                for limb in &mut buf[x_len..] {
                    *limb = 0;
                }
                large::irsub(buf, y);
                self.set_len(y.len(), negative);
            }
        }
        Ok(())
    }

    pub(crate) fn mul_signed(&mut self, negative: bool, y: &[Limb]) -> Result<()> {
        let x_len = self.len();
        if x_len == 0 || y.is_empty() {
            self.set_len(0, false);
            return Ok(());
        }

        let negative = self.is_negative() != negative;
        if y.len() == 1 {
            self.buffer_mut().ensure_capacity(x_len + 1)?;
            let buf = &mut self.buffer_mut().as_mut_slice()[..x_len + 1];
            buf[x_len] = small::imul(&mut buf[..x_len], y[0]);
            self.set_len(x_len + 1, negative);
        } else {
            let len = x_len + y.len();
            let mut product = LimbBuffer::with_limbs(len)?;
            large::mul(product.as_mut_slice(), self.limbs(), y);
            self.absorb(BigInt::from_buffer(product, len, negative))?;
        }
        Ok(())
    }

    /// Truncating quotient and remainder, without touching `self`.
    pub(crate) fn div_rem_signed(&self, negative: bool, y: &[Limb]) -> Result<(BigInt, BigInt)> {
        if y.is_empty() {
            return Err(Error::new(ErrorCode::DivisionByZero));
        }

        let (mut quotient, mut remainder) = div_rem_magnitude(self.limbs(), y)?;
        if self.is_negative() != negative {
            quotient.negate();
        }
        if self.is_negative() {
            remainder.negate();
        }
        Ok((quotient, remainder))
    }
}

/// Quotient and remainder of two magnitudes. `y` must be non-empty and
/// normalized.
pub(crate) fn div_rem_magnitude(x: &[Limb], y: &[Limb]) -> Result<(BigInt, BigInt)> {
    debug_assert!(!y.is_empty());
    if large::compare(x, y) == Ordering::Less {
        return Ok((BigInt::from_limbs(false, &[])?, BigInt::from_limbs(false, x)?));
    }

    if y.len() == 1 {
        let mut quotient = LimbBuffer::with_limbs(x.len())?;
        quotient.as_mut_slice().copy_from_slice(x);
        let rem = small::idiv(quotient.as_mut_slice(), y[0]);
        let quotient = BigInt::from_buffer(quotient, x.len(), false);
        return Ok((quotient, BigInt::from_limbs(false, &[rem])?));
    }

    // Normalize so the divisor's top bit is set, as Algorithm D requires.
    let shift = y[y.len() - 1].leading_zeros();
    let mut v = LimbBuffer::with_limbs(y.len())?;
    v.as_mut_slice().copy_from_slice(y);
    small::ishl_bits(v.as_mut_slice(), shift);

    let mut u = LimbBuffer::with_limbs(x.len() + 1)?;
    let top = {
        let buf = u.as_mut_slice();
        buf[..x.len()].copy_from_slice(x);
        small::ishl_bits(&mut buf[..x.len()], shift)
    };
    u.as_mut_slice()[x.len()] = top;

    let quotient_len = x.len() - y.len() + 1;
    let mut quotient = LimbBuffer::with_limbs(quotient_len)?;
    large::div_rem_normalized(u.as_mut_slice(), v.as_slice(), quotient.as_mut_slice());
    small::ishr_bits(&mut u.as_mut_slice()[..y.len()], shift);

    Ok((
        BigInt::from_buffer(quotient, quotient_len, false),
        BigInt::from_buffer(u, y.len(), false),
    ))
}

// OPERATORS

macro_rules! binop {
    ($($Op:ident $op:ident $OpAssign:ident $op_assign:ident $try_op:ident)*) => ($(
        impl<T: Operand> $OpAssign<T> for BigInt {
            #[inline]
            fn $op_assign(&mut self, rhs: T) {
                or_abort(self.$try_op(rhs));
            }
        }

        impl<T: Operand> $Op<T> for BigInt {
            type Output = BigInt;

            #[inline]
            fn $op(mut self, rhs: T) -> BigInt {
                self.$op_assign(rhs);
                self
            }
        }

        impl<'a, T: Operand> $Op<T> for &'a BigInt {
            type Output = BigInt;

            #[inline]
            fn $op(self, rhs: T) -> BigInt {
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
    Rem rem RemAssign rem_assign try_rem
}

impl Neg for BigInt {
    type Output = BigInt;

    fn neg(mut self) -> BigInt {
        self.negate();
        self
    }
}

impl<'a> Neg for &'a BigInt {
    type Output = BigInt;

    fn neg(self) -> BigInt {
        -self.clone()
    }
}

impl ShlAssign<usize> for BigInt {
    fn shl_assign(&mut self, bits: usize) {
        or_abort(self.try_shl_bits(bits));
    }
}

impl Shl<usize> for BigInt {
    type Output = BigInt;

    fn shl(mut self, bits: usize) -> BigInt {
        self <<= bits;
        self
    }
}

impl ShrAssign<usize> for BigInt {
    fn shr_assign(&mut self, bits: usize) {
        self.shr_bits(bits);
    }
}

impl Shr<usize> for BigInt {
    type Output = BigInt;

    fn shr(mut self, bits: usize) -> BigInt {
        self >>= bits;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(s: &str) -> BigInt {
        s.parse().unwrap()
    }

    #[test]
    fn add_crosses_zero() {
        let mut x = BigInt::from(5);
        x.try_sub(7u8).unwrap();
        assert_eq!(x, -2);
        x.try_add(2).unwrap();
        assert!(x.is_zero());
        assert!(!x.is_negative());
        x.try_add(-3i64).unwrap();
        assert_eq!(x, -3);
    }

    #[test]
    fn add_carries_into_new_limb() {
        let mut x = BigInt::from(Limb::MAX);
        assert_eq!(x.allocated_limbs(), 1);
        x.try_add(1u8).unwrap();
        assert_eq!(x.limbs(), &[0, 1]);
        assert_eq!(x.allocated_limbs(), 2);
    }

    #[test]
    fn sub_larger_magnitude() {
        let mut x = BigInt::from(1);
        x.try_sub(&big("340282366920938463463374607431768211456")).unwrap();
        assert_eq!(x, big("-340282366920938463463374607431768211455"));
    }

    #[test]
    fn mul_signs() {
        let mut x = big("-123456789012345678901234567890");
        x.try_mul(&big("-987654321098765432109876543210")).unwrap();
        assert_eq!(
            x,
            big("121932631137021795226185032733622923332237463801111263526900")
        );
        x.try_mul(0).unwrap();
        assert!(x.is_zero() && !x.is_negative());
    }

    #[test]
    fn mul_keeps_presized_buffer() {
        let mut x = BigInt::allocate(LIMB_BITS as usize * 8).unwrap();
        x.assign(u128::MAX).unwrap();
        let ptr = x.limbs_ptr();
        x.try_mul(u128::MAX).unwrap();
        assert_eq!(x.limbs_ptr(), ptr);
        assert_eq!(x.allocated_limbs(), 8);
    }

    #[test]
    fn div_rem_truncates() {
        for &(a, b) in &[(7i64, 2i64), (-7, 2), (7, -2), (-7, -2), (1, 5), (0, 3)] {
            let mut q = BigInt::from(a);
            let r = q.try_div_rem(b).unwrap();
            assert_eq!(q, a / b, "{} / {}", a, b);
            assert_eq!(r, a % b, "{} % {}", a, b);
        }
    }

    #[test]
    fn div_multi_limb() {
        let a = big("121932631137021795226185032733622923332237463801111263526907");
        let b = big("987654321098765432109876543210");
        let mut q = a.clone();
        let r = q.try_div_rem(&b).unwrap();
        assert_eq!(q, big("123456789012345678901234567890"));
        assert_eq!(r, 7);

        // q * b + r == a
        q.try_mul(&b).unwrap();
        q.try_add(&r).unwrap();
        assert_eq!(q, a);
    }

    #[test]
    fn div_by_zero() {
        let mut x = BigInt::from(1);
        let err = x.try_div(0).unwrap_err();
        assert!(err.is_divide_by_zero());
        assert_eq!(x, 1);
    }

    #[test]
    fn gcd() {
        let a = big("-5432109876543212345789023245987");
        let b = big("362736035870515331128527330659");
        assert_eq!(a.gcd(&b).unwrap(), 1);

        let mut c = a.clone();
        c.try_mul(6).unwrap();
        let mut d = a.clone();
        d.try_mul(-4).unwrap();
        let mut expected = a.clone();
        expected.try_mul(-2).unwrap();
        assert_eq!(c.gcd(&d).unwrap(), expected);
        assert!(BigInt::new().gcd(&BigInt::new()).unwrap().is_zero());
    }

    #[test]
    fn shifts() {
        let mut x = BigInt::from(-3);
        x.try_shl_bits(LIMB_BITS as usize + 1).unwrap();
        assert_eq!(x.limbs(), &[0, 6]);
        assert!(x.is_negative());
        x.shr_bits(LIMB_BITS as usize + 2);
        assert_eq!(x, -1);
        x.shr_bits(1);
        assert!(x.is_zero());
    }

    #[test]
    fn operators() {
        let x = BigInt::from(10);
        assert_eq!(&x + 5u8, 15);
        assert_eq!(&x - &x, 0);
        assert_eq!(&x * -3i32, -30);
        assert_eq!(&x / 4, 2);
        assert_eq!(&x % 4, 2);
        assert_eq!(-&x, -10);
        assert_eq!(x.clone() << 3, 80);
        assert_eq!(x >> 1, 5);
    }

    #[test]
    #[should_panic(expected = "attempt to divide by zero")]
    fn operator_div_by_zero() {
        let _ = BigInt::from(1) / 0;
    }
}
