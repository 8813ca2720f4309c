//! Right-hand sides accepted by the mutating arithmetic family.
//!
//! Every operation in `arith.rs` is written once against the signed-magnitude
//! view exposed here, so adding a `BigInt`, a machine word or a negative
//! machine word all take the same path.

use crate::int::BigInt;
use crate::math::{small, split_u128, split_u64, Limb};

/// Sign of a number.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sign {
    Minus,
    NoSign,
    Plus,
}

impl Sign {
    #[inline]
    pub(crate) fn of(negative: bool, limbs: &[Limb]) -> Sign {
        if limbs.is_empty() {
            Sign::NoSign
        } else if negative {
            Sign::Minus
        } else {
            Sign::Plus
        }
    }
}

/// Value that can be viewed as a sign and a little-endian limb magnitude.
///
/// Implemented for `BigInt` and for every primitive integer type, and for
/// references to any of those.
pub trait Operand {
    /// Call `f` with the sign of `self` (true for negative) and its
    /// magnitude, without any leading zero limbs. Zero has an empty
    /// magnitude and is never negative.
    fn with_limbs<R, F>(&self, f: F) -> R
    where
        F: FnOnce(bool, &[Limb]) -> R;
}

impl<'a, T> Operand for &'a T
where
    T: ?Sized + Operand,
{
    #[inline]
    fn with_limbs<R, F>(&self, f: F) -> R
    where
        F: FnOnce(bool, &[Limb]) -> R,
    {
        (**self).with_limbs(f)
    }
}

impl Operand for BigInt {
    #[inline]
    fn with_limbs<R, F>(&self, f: F) -> R
    where
        F: FnOnce(bool, &[Limb]) -> R,
    {
        f(self.is_negative(), self.limbs())
    }
}

macro_rules! unsigned_operand {
    ($($t:ty)*) => ($(
        impl Operand for $t {
            #[inline]
            fn with_limbs<R, F>(&self, f: F) -> R
            where
                F: FnOnce(bool, &[Limb]) -> R,
            {
                let limbs = split_u64(*self as u64);
                f(false, &limbs[..small::normalized_len(&limbs)])
            }
        }
    )*)
}

macro_rules! signed_operand {
    ($($t:ty)*) => ($(
        impl Operand for $t {
            #[inline]
            fn with_limbs<R, F>(&self, f: F) -> R
            where
                F: FnOnce(bool, &[Limb]) -> R,
            {
                let limbs = split_u64((*self as i64).unsigned_abs());
                f(*self < 0, &limbs[..small::normalized_len(&limbs)])
            }
        }
    )*)
}

unsigned_operand!(u8 u16 u32 u64 usize);
signed_operand!(i8 i16 i32 i64 isize);

impl Operand for u128 {
    #[inline]
    fn with_limbs<R, F>(&self, f: F) -> R
    where
        F: FnOnce(bool, &[Limb]) -> R,
    {
        let limbs = split_u128(*self);
        f(false, &limbs[..small::normalized_len(&limbs)])
    }
}

impl Operand for i128 {
    #[inline]
    fn with_limbs<R, F>(&self, f: F) -> R
    where
        F: FnOnce(bool, &[Limb]) -> R,
    {
        let limbs = split_u128(self.unsigned_abs());
        f(*self < 0, &limbs[..small::normalized_len(&limbs)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lib::Vec;

    fn view<T: Operand>(x: T) -> (bool, Vec<Limb>) {
        x.with_limbs(|negative, limbs| (negative, limbs.to_vec()))
    }

    #[test]
    fn primitives() {
        assert_eq!(view(0u8), (false, Vec::new()));
        assert_eq!(view(0i64), (false, Vec::new()));
        assert_eq!(view(7u32), (false, vec![7]));
        assert_eq!(view(-7i16), (true, vec![7]));
        assert_eq!(view(i64::MIN).1, split_u64(1 << 63).to_vec());
        assert_eq!(view(u128::MAX).1.len(), 128 / crate::LIMB_BITS as usize);
        assert_eq!(view(-1i128), (true, vec![1]));
    }

    #[test]
    fn sign_of() {
        assert_eq!(Sign::of(true, &[]), Sign::NoSign);
        assert_eq!(Sign::of(true, &[1]), Sign::Minus);
        assert_eq!(Sign::of(false, &[1]), Sign::Plus);
        assert!(Sign::Minus < Sign::NoSign && Sign::NoSign < Sign::Plus);
    }
}
