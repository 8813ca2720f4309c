#![no_main]
use hugenum::BigRational;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(x) = s.parse::<BigRational>() {
            assert!(x.denom().is_positive());
            assert_eq!(x.numer().gcd(x.denom()).unwrap(), 1);
            assert_eq!(x.to_string().parse::<BigRational>().unwrap(), x);
        }
    }
});
