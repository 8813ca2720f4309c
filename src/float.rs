//! Exact decomposition of IEEE-754 binary floats.

/// Binary float whose value can be split into an integer mantissa and a
/// power-of-two exponent without rounding.
pub trait Float: Copy {
    // MASKS

    /// Bitmask for the sign bit.
    const SIGN_MASK: u64;
    /// Bitmask for the exponent, including the hidden bit.
    const EXPONENT_MASK: u64;
    /// Bitmask for the hidden bit in exponent, which is an implicit 1 in the fraction.
    const HIDDEN_BIT_MASK: u64;
    /// Bitmask for the mantissa (fraction), excluding the hidden bit.
    const MANTISSA_MASK: u64;

    // PROPERTIES

    /// Size of the significand (mantissa) without hidden bit.
    const MANTISSA_SIZE: i32;
    /// Bias of the exponent, including the mantissa shift.
    const EXPONENT_BIAS: i32;
    /// Exponent portion of a denormal float.
    const DENORMAL_EXPONENT: i32;

    /// Raw bits, widened to 64 bits.
    fn to_bits64(self) -> u64;

    /// Split into `(negative, mantissa, exponent)` such that the value is
    /// exactly `mantissa * 2^exponent`, negated if `negative`.
    ///
    /// Returns `None` for NaN and infinities. Zero has a zero mantissa.
    #[inline]
    fn decompose(self) -> Option<(bool, u64, i32)> {
        let bits = self.to_bits64();
        let negative = bits & Self::SIGN_MASK != 0;
        let biased = bits & Self::EXPONENT_MASK;
        if biased == Self::EXPONENT_MASK {
            return None;
        }

        let fraction = bits & Self::MANTISSA_MASK;
        if biased == 0 {
            Some((negative, fraction, Self::DENORMAL_EXPONENT))
        } else {
            let exp = (biased >> Self::MANTISSA_SIZE) as i32 - Self::EXPONENT_BIAS;
            Some((negative, fraction | Self::HIDDEN_BIT_MASK, exp))
        }
    }
}

impl Float for f32 {
    const SIGN_MASK: u64 = 0x80000000;
    const EXPONENT_MASK: u64 = 0x7F800000;
    const HIDDEN_BIT_MASK: u64 = 0x00800000;
    const MANTISSA_MASK: u64 = 0x007FFFFF;
    const MANTISSA_SIZE: i32 = 23;
    const EXPONENT_BIAS: i32 = 127 + Self::MANTISSA_SIZE;
    const DENORMAL_EXPONENT: i32 = 1 - Self::EXPONENT_BIAS;

    #[inline]
    fn to_bits64(self) -> u64 {
        self.to_bits() as u64
    }
}

impl Float for f64 {
    const SIGN_MASK: u64 = 0x8000000000000000;
    const EXPONENT_MASK: u64 = 0x7FF0000000000000;
    const HIDDEN_BIT_MASK: u64 = 0x0010000000000000;
    const MANTISSA_MASK: u64 = 0x000FFFFFFFFFFFFF;
    const MANTISSA_SIZE: i32 = 52;
    const EXPONENT_BIAS: i32 = 1023 + Self::MANTISSA_SIZE;
    const DENORMAL_EXPONENT: i32 = 1 - Self::EXPONENT_BIAS;

    #[inline]
    fn to_bits64(self) -> u64 {
        self.to_bits()
    }
}

/// Multiply by `2^exp`, saturating to infinity or zero.
///
/// Steps in powers that are exactly representable, so the only rounding is
/// in the final step when the result is subnormal.
pub(crate) fn scale_pow2(mut x: f64, mut exp: i64) -> f64 {
    const STEP: i64 = 1000;
    let up = f64::from_bits(((1023 + STEP) as u64) << 52);
    let down = f64::from_bits(((1023 - STEP) as u64) << 52);

    while exp > STEP && x.is_finite() && x != 0.0 {
        x *= up;
        exp -= STEP;
    }
    while exp < -STEP && x != 0.0 {
        x *= down;
        exp += STEP;
    }
    if x == 0.0 || !x.is_finite() {
        return x;
    }
    x * f64::from_bits(((1023 + exp) as u64) << 52)
}
