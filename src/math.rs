//! Building-blocks for arbitrary-precision math.
//!
//! These algorithms assume little-endian order for the large integer
//! buffers, so for a `[0, 1, 2, 3]`, `3` is the most significant limb,
//! and `0` is the least significant limb.
//!
//! Every routine here works on borrowed slices and never allocates. The
//! callers in `arith.rs` own the limb buffers and size them before calling
//! in, so a kernel can never fail halfway through an operation.

use crate::lib::{cmp, mem};

// ALIASES
// -------

// A limb is one machine-word digit of the magnitude. `build.rs` picks the
// width: 64 bits where the target multiplies 64x64 into 128 cheaply, 32
// bits elsewhere. `Wide` holds a full limb product.

// 32-BIT LIMB
#[cfg(limb_width_32)]
pub type Limb = u32;

#[cfg(limb_width_32)]
type Wide = u64;

// 64-BIT LIMB
#[cfg(limb_width_64)]
pub type Limb = u64;

#[cfg(limb_width_64)]
type Wide = u128;

/// Number of bits in a single limb.
pub const LIMB_BITS: u32 = mem::size_of::<Limb>() as u32 * 8;

/// Number of limbs needed to hold a value of `bits` bits.
#[inline]
pub(crate) fn limbs_for_bits(bits: usize) -> usize {
    let width = LIMB_BITS as usize;
    bits / width + (bits % width != 0) as usize
}

/// Largest power of `radix` that fits in a limb, as `(exponent, power)`.
///
/// Radix conversion moves this many digits at a time through the
/// single-limb kernels.
#[inline]
pub(crate) fn radix_chunk(radix: u32) -> (usize, Limb) {
    debug_assert!((2..=36).contains(&radix));
    let radix = radix as Limb;
    let mut digits = 1;
    let mut power = radix;
    while let Some(next) = power.checked_mul(radix) {
        digits += 1;
        power = next;
    }
    (digits, power)
}

/// Split u64 into limbs, in little-endian order.
#[inline]
#[cfg(limb_width_32)]
pub(crate) fn split_u64(x: u64) -> [Limb; 2] {
    [x as Limb, (x >> 32) as Limb]
}

/// Split u64 into limbs, in little-endian order.
#[inline]
#[cfg(limb_width_64)]
pub(crate) fn split_u64(x: u64) -> [Limb; 1] {
    [x as Limb]
}

/// Split u128 into limbs, in little-endian order.
#[inline]
#[cfg(limb_width_32)]
pub(crate) fn split_u128(x: u128) -> [Limb; 4] {
    [x as Limb, (x >> 32) as Limb, (x >> 64) as Limb, (x >> 96) as Limb]
}

/// Split u128 into limbs, in little-endian order.
#[inline]
#[cfg(limb_width_64)]
pub(crate) fn split_u128(x: u128) -> [Limb; 2] {
    [x as Limb, (x >> 64) as Limb]
}

// SCALAR
// ------

// Scalar-to-scalar operations, for building-blocks for arbitrary-precision
// operations.

pub(crate) mod scalar {
    use super::*;

    // ADDITION

    /// Add two small integers and return the resulting value and if overflow happens.
    #[inline]
    pub fn add(x: Limb, y: Limb) -> (Limb, bool) {
        x.overflowing_add(y)
    }

    /// AddAssign two small integers and return if overflow happens.
    #[inline]
    pub fn iadd(x: &mut Limb, y: Limb) -> bool {
        let t = add(*x, y);
        *x = t.0;
        t.1
    }

    // SUBTRACTION

    /// Subtract two small integers and return the resulting value and if overflow happens.
    #[inline]
    pub fn sub(x: Limb, y: Limb) -> (Limb, bool) {
        x.overflowing_sub(y)
    }

    /// SubAssign two small integers and return if overflow happens.
    #[inline]
    pub fn isub(x: &mut Limb, y: Limb) -> bool {
        let t = sub(*x, y);
        *x = t.0;
        t.1
    }

    // MULTIPLICATION

    /// Multiply two small integers (with carry) (and return the overflow contribution).
    ///
    /// Returns the (low, high) components.
    #[inline]
    pub fn mul(x: Limb, y: Limb, carry: Limb) -> (Limb, Limb) {
        // Cannot overflow, as long as wide is 2x as wide. This is because
        // the following is always true:
        // `Wide::MAX - (Narrow::max_value() * Narrow::max_value()) >= Narrow::max_value()`
        let z: Wide = x as Wide * y as Wide + carry as Wide;
        (z as Limb, (z >> LIMB_BITS) as Limb)
    }

    /// Multiply two small integers (with carry) (and return if overflow happens).
    #[inline]
    pub fn imul(x: &mut Limb, y: Limb, carry: Limb) -> Limb {
        let t = mul(*x, y, carry);
        *x = t.0;
        t.1
    }

    // DIVISION

    /// Divide the two-limb value `(hi, lo)` by `y`.
    ///
    /// Requires `hi < y`, so the quotient fits in a single limb. Returns the
    /// (quotient, remainder) pair.
    #[inline]
    pub fn div(hi: Limb, lo: Limb, y: Limb) -> (Limb, Limb) {
        debug_assert!(hi < y);
        let x = (hi as Wide) << LIMB_BITS | lo as Wide;
        let y = y as Wide;
        ((x / y) as Limb, (x % y) as Limb)
    }
}

// SMALL
// -----

// Large-to-small operations, to modify a big integer from a native scalar.

pub(crate) mod small {
    use super::*;

    // ADDITION

    /// AddAssign small integer to bigint, returning the carry out of the
    /// most significant limb.
    #[inline]
    pub fn iadd(x: &mut [Limb], y: Limb) -> bool {
        let mut carry = y != 0;
        let mut addend = y;
        for xi in x.iter_mut() {
            if !carry {
                break;
            }
            carry = scalar::iadd(xi, addend);
            addend = 1;
        }
        carry
    }

    // SUBTRACTION

    /// SubAssign small integer to bigint, returning the borrow out of the
    /// most significant limb.
    #[inline]
    pub fn isub(x: &mut [Limb], y: Limb) -> bool {
        let mut borrow = y != 0;
        let mut subtrahend = y;
        for xi in x.iter_mut() {
            if !borrow {
                break;
            }
            borrow = scalar::isub(xi, subtrahend);
            subtrahend = 1;
        }
        borrow
    }

    // MULTIPLICATION

    /// MulAssign small integer to bigint, returning the limb that overflowed
    /// out of the buffer.
    #[inline]
    pub fn imul(x: &mut [Limb], y: Limb) -> Limb {
        imul_add(x, y, 0)
    }

    /// Multiply by a small integer and add another, as if by `x = x*y + z`.
    ///
    /// This is the inner step of radix conversion. Returns the limb that
    /// overflowed out of the buffer.
    #[inline]
    pub fn imul_add(x: &mut [Limb], y: Limb, z: Limb) -> Limb {
        // Multiply iteratively over all elements, adding the carry each time.
        let mut carry: Limb = z;
        for xi in x.iter_mut() {
            carry = scalar::imul(xi, y, carry);
        }
        carry
    }

    // DIVISION

    /// DivAssign by a small integer, returning the remainder.
    #[inline]
    pub fn idiv(x: &mut [Limb], y: Limb) -> Limb {
        debug_assert!(y != 0);
        let mut rem: Limb = 0;
        for xi in x.iter_mut().rev() {
            let (q, r) = scalar::div(rem, *xi, y);
            *xi = q;
            rem = r;
        }
        rem
    }

    // BIT LENGTH

    /// Get number of leading zero bits in the storage.
    #[inline]
    pub fn leading_zeros(x: &[Limb]) -> usize {
        match x.last() {
            Some(&hi) => hi.leading_zeros() as usize,
            None => 0,
        }
    }

    /// Calculate the bit-length of the big-integer.
    #[inline]
    pub fn bit_length(x: &[Limb]) -> usize {
        // Avoid overflowing, calculate via total number of bits
        // minus leading zero bits.
        let nlz = leading_zeros(x);
        (LIMB_BITS as usize)
            .checked_mul(x.len())
            .map(|v| v - nlz)
            .unwrap_or(usize::MAX)
    }

    /// Count trailing zero bits, or 0 for an all-zero buffer.
    #[inline]
    pub fn trailing_zeros(x: &[Limb]) -> usize {
        match x.iter().position(|&xi| xi != 0) {
            Some(i) => i * LIMB_BITS as usize + x[i].trailing_zeros() as usize,
            None => 0,
        }
    }

    // SHIFTS

    /// Shift-left bits inside a buffer, returning the bits shifted out.
    ///
    /// Assumes `n < LIMB_BITS`, IE, internally shifting bits.
    #[inline]
    pub fn ishl_bits(x: &mut [Limb], n: u32) -> Limb {
        debug_assert!(n < LIMB_BITS);
        if n == 0 {
            return 0;
        }

        // Internally, for each item, we shift left by n, and add the previous
        // right shifted limb-bits.
        // For example, we transform (for u8) shifted left 2, to:
        //      b10100100 b01000010
        //      b10 b10010001 b00001000
        let rshift = LIMB_BITS - n;
        let lshift = n;
        let mut prev: Limb = 0;
        for xi in x.iter_mut() {
            let tmp = *xi;
            *xi <<= lshift;
            *xi |= prev >> rshift;
            prev = tmp;
        }
        prev >> rshift
    }

    /// Shift-right bits inside a buffer, returning the bits shifted out in
    /// the high end of the result.
    ///
    /// Assumes `n < LIMB_BITS`.
    #[inline]
    pub fn ishr_bits(x: &mut [Limb], n: u32) -> Limb {
        debug_assert!(n < LIMB_BITS);
        if n == 0 {
            return 0;
        }

        let lshift = LIMB_BITS - n;
        let rshift = n;
        let mut prev: Limb = 0;
        for xi in x.iter_mut().rev() {
            let tmp = *xi;
            *xi >>= rshift;
            *xi |= prev << lshift;
            prev = tmp;
        }
        prev << lshift
    }

    // NORMALIZE

    /// Length of the buffer once any leading zero limbs are dropped.
    #[inline]
    pub fn normalized_len(x: &[Limb]) -> usize {
        let mut len = x.len();
        while len != 0 && x[len - 1] == 0 {
            len -= 1;
        }
        len
    }
}

// LARGE
// -----

// Large-to-large operations, to modify a big integer from another.

pub(crate) mod large {
    use super::*;

    // RELATIVE OPERATORS

    /// Compare `x` to `y`, in little-endian order.
    ///
    /// Both slices must be normalized.
    #[inline]
    pub fn compare(x: &[Limb], y: &[Limb]) -> cmp::Ordering {
        if x.len() > y.len() {
            cmp::Ordering::Greater
        } else if x.len() < y.len() {
            cmp::Ordering::Less
        } else {
            let iter = x.iter().rev().zip(y.iter().rev());
            for (&xi, &yi) in iter {
                if xi > yi {
                    return cmp::Ordering::Greater;
                } else if xi < yi {
                    return cmp::Ordering::Less;
                }
            }
            // Equal case.
            cmp::Ordering::Equal
        }
    }

    // ADDITION

    /// AddAssign bigint to bigint.
    ///
    /// Requires `x.len() >= y.len()`; the carry is propagated through the
    /// rest of `x` and returned if it leaves the buffer.
    pub fn iadd(x: &mut [Limb], y: &[Limb]) -> bool {
        debug_assert!(x.len() >= y.len());

        // Iteratively add elements from y to x.
        let mut carry = false;
        for (xi, yi) in x.iter_mut().zip(y.iter()) {
            // Only one op of the two can overflow, since we added at max
            // Limb::MAX + Limb::MAX. Add the previous carry,
            // and store the current carry for the next.
            let mut tmp = scalar::iadd(xi, *yi);
            if carry {
                tmp |= scalar::iadd(xi, 1);
            }
            carry = tmp;
        }

        // Overflow from the previous limb.
        if carry {
            small::iadd(&mut x[y.len()..], 1)
        } else {
            false
        }
    }

    // SUBTRACTION

    /// SubAssign bigint to bigint.
    ///
    /// Requires `x.len() >= y.len()`; returns the borrow out of the most
    /// significant limb, which is only set when `y > x`.
    pub fn isub(x: &mut [Limb], y: &[Limb]) -> bool {
        debug_assert!(x.len() >= y.len());

        let mut borrow = false;
        for (xi, yi) in x.iter_mut().zip(y.iter()) {
            let mut tmp = scalar::isub(xi, *yi);
            if borrow {
                tmp |= scalar::isub(xi, 1);
            }
            borrow = tmp;
        }

        if borrow {
            small::isub(&mut x[y.len()..], 1)
        } else {
            false
        }
    }

    /// Reverse SubAssign, as if by `x = y - x`.
    ///
    /// Requires `x.len() >= y.len()` and `y >= x`; the limbs of `x` past
    /// `y.len()` must be zero.
    pub fn irsub(x: &mut [Limb], y: &[Limb]) {
        debug_assert!(x.len() >= y.len());

        let mut borrow = false;
        for (i, xi) in x.iter_mut().enumerate() {
            let yi = if i < y.len() { y[i] } else { 0 };
            let (mut v, mut tmp) = scalar::sub(yi, *xi);
            if borrow {
                tmp |= scalar::isub(&mut v, 1);
            }
            *xi = v;
            borrow = tmp;
        }
        debug_assert!(!borrow);
    }

    // MULTIPLICATION

    /// Grade-school multiplication algorithm.
    ///
    /// Writes `x * y` into `z`, which must hold at least `x.len() + y.len()`
    /// limbs and must not alias either input. Each iteration, of which there
    /// are `y.len()` iterations, requires `x.len()` multiplications and
    /// additions.
    pub fn mul(z: &mut [Limb], x: &[Limb], y: &[Limb]) {
        debug_assert!(z.len() >= x.len() + y.len());
        for zi in z.iter_mut() {
            *zi = 0;
        }

        for (i, &yi) in y.iter().enumerate() {
            if yi == 0 {
                continue;
            }
            let mut carry: Limb = 0;
            for (j, &xj) in x.iter().enumerate() {
                let (lo, hi) = scalar::mul(xj, yi, carry);
                let overflow = scalar::iadd(&mut z[i + j], lo);
                carry = hi + overflow as Limb;
            }
            z[i + x.len()] = carry;
        }
    }

    // DIVISION

    /// Knuth's Algorithm D, on pre-normalized operands.
    ///
    /// `v` is the divisor, at least two limbs long with the high bit of its
    /// top limb set. `u` is the dividend shifted by the same amount as `v`,
    /// with one extra limb on top, so `u.len() == m + v.len() + 1`. On return
    /// `q[..m + 1]` holds the quotient and `u[..v.len()]` holds the remainder,
    /// still shifted.
    pub fn div_rem_normalized(u: &mut [Limb], v: &[Limb], q: &mut [Limb]) {
        let n = v.len();
        debug_assert!(n >= 2);
        debug_assert!(v[n - 1].leading_zeros() == 0);
        debug_assert!(u.len() > n);
        let m = u.len() - n - 1;
        debug_assert!(q.len() > m);

        let base: Wide = 1 << LIMB_BITS;
        let vtop = v[n - 1] as Wide;
        let vnext = v[n - 2] as Wide;

        for j in (0..=m).rev() {
            // Estimate the quotient limb from the top two limbs of the
            // running remainder, and refine it with the next divisor limb.
            let num = (u[j + n] as Wide) << LIMB_BITS | u[j + n - 1] as Wide;
            let mut qhat = num / vtop;
            let mut rhat = num % vtop;
            while qhat >= base || qhat * vnext > (rhat << LIMB_BITS | u[j + n - 2] as Wide) {
                qhat -= 1;
                rhat += vtop;
                if rhat >= base {
                    break;
                }
            }

            // Multiply and subtract.
            let mut carry: Limb = 0;
            let mut borrow = false;
            for i in 0..n {
                let (lo, hi) = scalar::mul(v[i], qhat as Limb, carry);
                carry = hi;
                let mut tmp = scalar::isub(&mut u[j + i], lo);
                if borrow {
                    tmp |= scalar::isub(&mut u[j + i], 1);
                }
                borrow = tmp;
            }
            let mut negative = scalar::isub(&mut u[j + n], carry);
            if borrow {
                negative |= scalar::isub(&mut u[j + n], 1);
            }

            // The estimate was one too large, add the divisor back.
            if negative {
                qhat -= 1;
                let carry = iadd(&mut u[j..j + n], v);
                u[j + n] = u[j + n].wrapping_add(carry as Limb);
            }

            q[j] = qhat as Limb;
        }
    }
}

// TESTS
// -----
