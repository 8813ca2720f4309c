use hugenum::{BigInt, BigRational};

#[test]
fn test() {
    // In base 16 a leading "0b" is two digits, not a binary prefix.
    let x = BigInt::from_str_radix("0b0b", 16).unwrap();
    assert_eq!(x, 0xB0B);
    let x = BigRational::from_str_radix("0b1/0xb", 16).unwrap();
    assert_eq!(x, BigRational::from_integers(0xB1, 0xB).unwrap());
    assert_eq!(x.to_string_radix(16, false), "B1/B");
}
