#![no_main]
use hugenum::BigInt;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|pair: (i128, i128)| {
    let (a, b) = pair;
    let x = BigInt::from(a);
    let y = BigInt::from(b);

    let sum = &x + &y;
    let difference = &x - &y;
    assert_eq!(&sum - &y, x);
    assert_eq!(&difference + &y, x);

    let product = &x * &y;
    if !y.is_zero() {
        assert_eq!(&product / &y, x);
        let mut quotient = x.clone();
        let remainder = quotient.try_div_rem(&y).unwrap();
        assert_eq!(quotient * &y + &remainder, x);
        if let (Some(q), Some(r)) = (a.checked_div(b), a.checked_rem(b)) {
            assert_eq!(&x / &y, q);
            assert_eq!(&x % &y, r);
        }
    }
});
