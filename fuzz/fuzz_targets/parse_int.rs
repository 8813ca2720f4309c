#![no_main]
use hugenum::BigInt;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&radix, rest)) = data.split_first() else {
        return;
    };
    let radix = u32::from(radix % 35) + 2;
    if let Ok(s) = std::str::from_utf8(rest) {
        if let Ok(x) = BigInt::from_str_radix(s, radix) {
            let text = x.to_string_radix(radix, radix % 2 == 0);
            assert_eq!(BigInt::from_str_radix(&text, radix).unwrap(), x);
        }
        let _ = s.parse::<BigInt>();
    }
});
