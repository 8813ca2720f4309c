use hugenum::BigRational;

#[test]
fn test() {
    // A released denominator must still act as 1, never as a divisor of 0.
    let mut x = BigRational::from_integers(2, 3).unwrap();
    x.dispose();
    x *= 5;
    assert_eq!(x.to_string(), "0/1");
    x -= BigRational::from_integers(1, 4).unwrap();
    assert_eq!(x.to_string(), "-1/4");
    assert!(x < 0);
}
