use hugenum::BigInt;

#[test]
fn test() {
    // Divisors with a small top limb and dividends just below a multiple of
    // them are where the quotient digit estimate overshoots.
    let dividends = [
        u128::MAX,
        0x7fff_ffff_8000_0000_0000_0000_0000_0000,
        0x8000_0000_0000_0000_0000_0000_0000_0000,
        0x0000_0001_0000_0000_ffff_ffff_ffff_ffff,
        0xffff_fffe_0000_0001_0000_0000_0000_0000,
        340282366920938463463374607431768211297,
    ];
    let divisors = [
        1u128,
        3,
        0x8000_0000_0000_0001,
        0x1_0000_0000_0000_0000,
        0x1_ffff_ffff_ffff_ffff,
        0x8000_0000_ffff_ffff_0000_0001,
        0xffff_ffff_ffff_ffff_ffff_ffff,
        u128::MAX / 7,
    ];
    for &x in &dividends {
        for &y in &divisors {
            let big_x = BigInt::from(x);
            assert_eq!(&big_x / y, x / y, "{} / {}", x, y);
            assert_eq!(&big_x % y, x % y, "{} % {}", x, y);
        }
    }
}
