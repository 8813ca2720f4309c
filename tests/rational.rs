use hugenum::{BigInt, BigRational, ErrorCode, LIMB_BITS};

const NUMER_HEX: &str = "143210ABCDEF32123457ACDB324598799";
const DENOM: &str = "362736035870515331128527330659";

fn limbs_for(bits: usize) -> usize {
    (bits + LIMB_BITS as usize - 1) / LIMB_BITS as usize
}

#[test]
fn test_default() {
    let a = BigRational::new();
    assert_ne!(a.numer().allocated_limbs(), 0);
    assert_eq!(a.numer().used_limbs(), 0);
    assert!(!a.numer().limbs_ptr().is_null());
    assert_eq!(a.numer().to_string(), "0");

    assert_ne!(a.denom().allocated_limbs(), 0);
    assert_eq!(a.denom().used_limbs(), 1);
    assert!(!a.denom().limbs_ptr().is_null());
    assert_eq!(a.denom().to_string(), "1");
}

#[test]
fn test_component_views() {
    let a = BigRational::new();
    let numer = a.numer();
    assert_ne!(numer.allocated_limbs(), 0);
    assert_eq!(numer.to_string(), "0");
    let denom = a.denom();
    assert_ne!(denom.allocated_limbs(), 0);
    assert_eq!(denom.to_string(), "1");
}

#[test]
fn test_dispose() {
    let mut a = BigRational::from_integers(5, 7).unwrap();
    a.dispose();

    assert_eq!(a.numer().allocated_limbs(), 0);
    assert_eq!(a.numer().used_limbs(), 0);
    assert!(a.numer().limbs_ptr().is_null());

    assert_eq!(a.denom().allocated_limbs(), 0);
    assert_eq!(a.denom().used_limbs(), 0);
    assert!(a.denom().limbs_ptr().is_null());
}

#[test]
fn test_from_i64_u64() {
    let n = "123456789123456";
    let d = "12764787846358441471";
    let a = BigRational::from_integers(n.parse::<i64>().unwrap(), d.parse::<u64>().unwrap())
        .unwrap();
    assert_eq!(a.numer().allocated_limbs(), limbs_for(47));
    assert_eq!(a.numer().used_limbs(), limbs_for(47) as isize);
    assert_eq!(a.denom().allocated_limbs(), limbs_for(64));
    assert_eq!(a.denom().used_limbs(), limbs_for(64) as isize);
    assert_eq!(a.to_string(), format!("{}/{}", n, d));
}

#[test]
fn test_from_i64_u64_negative() {
    let n = "-123456789123456";
    let d = "12764787846358441471";
    let a = BigRational::from_integers(n.parse::<i64>().unwrap(), d.parse::<u64>().unwrap())
        .unwrap();
    assert_eq!(a.numer().allocated_limbs(), limbs_for(47));
    assert_eq!(a.numer().used_limbs(), -(limbs_for(47) as isize));
    assert_eq!(a.denom().allocated_limbs(), limbs_for(64));
    assert_eq!(a.denom().used_limbs(), limbs_for(64) as isize);
    assert_eq!(a.to_string(), format!("{}/{}", n, d));
}

#[test]
fn test_from_u64_max() {
    let d = "12764787846358441471";
    let a = BigRational::from_integers(u64::MAX, d.parse::<u64>().unwrap()).unwrap();
    assert_eq!(a.numer().allocated_limbs(), limbs_for(64));
    assert_eq!(a.numer().used_limbs(), limbs_for(64) as isize);
    assert_eq!(a.numer().to_string(), u64::MAX.to_string());
    assert_eq!(a.to_string(), format!("{}/{}", u64::MAX, d));
}

#[test]
fn test_from_f64() {
    let a = BigRational::from_f64(123456789123456.75).unwrap();
    assert_eq!(a.to_string(), "493827156493827/4");
    let a = BigRational::from_f64(-123456789123456.75).unwrap();
    assert_eq!(a.to_string(), "-493827156493827/4");

    let err = BigRational::from_f64(f64::NAN).unwrap_err();
    assert_eq!(*err.code(), ErrorCode::NonFiniteFloat);
}

#[test]
fn test_allocate() {
    let a = BigRational::allocate(129, 193).unwrap();
    assert_eq!(a.numer().allocated_limbs(), limbs_for(129));
    assert_eq!(a.numer().used_limbs(), 0);
    assert_eq!(a.denom().allocated_limbs(), limbs_for(193));
    assert_eq!(a.denom().used_limbs(), 1);
    assert_eq!(a.to_string(), "0/1");
}

#[test]
fn test_parse() {
    let n = "5432109876543212345789023245987/362736035870515331128527330659";
    let a: BigRational = n.parse().unwrap();
    assert_eq!(a.numer().used_limbs(), limbs_for(103) as isize);
    assert_eq!(a.to_string(), n);
}

#[test]
fn test_parse_invalid() {
    let err = "12345A".parse::<BigRational>().unwrap_err();
    assert!(err.is_format());

    let err = "12345/54321A".parse::<BigRational>().unwrap_err();
    assert!(err.is_format());
    assert_eq!(*err.code(), ErrorCode::InvalidDigit('A'));
    assert_eq!(err.column(), 12);
}

#[test]
fn test_parse_hex() {
    let i: BigInt = DENOM.parse().unwrap();
    let d = i.to_string_radix(16, false);
    let a = BigRational::from_str_radix(&format!("{}/{}", NUMER_HEX, d), 16).unwrap();
    assert_eq!(a.numer().used_limbs(), limbs_for(129) as isize);
    assert_eq!(*a.denom(), i);
}

#[test]
fn test_parse_hex_prefix() {
    let i: BigInt = DENOM.parse().unwrap();
    let d = i.to_string_radix(16, false);
    let a: BigRational = format!("0x{}/0x{}", NUMER_HEX, d).parse().unwrap();
    assert_eq!(a.to_string_radix(16, false), format!("{}/{}", NUMER_HEX, d));
    assert_eq!(*a.denom(), i);
}

#[test]
fn test_set_to_hex_prefix() {
    let i: BigInt = DENOM.parse().unwrap();
    let d = i.to_string_radix(16, false);
    let expected = format!("{}/{}", NUMER_HEX, d);

    let mut a: BigRational = format!("0x{}/0x{}", NUMER_HEX, d).parse().unwrap();
    assert_eq!(a.to_string_radix(16, false), expected);
    assert_eq!(a.to_string_radix(16, true), expected.to_lowercase());

    a.set_to(&format!("-0x{}/0x17", NUMER_HEX)).unwrap();
    assert_eq!(a.to_string_radix(16, false), format!("-{}/17", NUMER_HEX));
}

#[test]
fn test_from_expression() {
    let a: BigRational = "2340958273409578234095823045723490587/362736035870515331128527330659"
        .parse()
        .unwrap();
    let b = &a + 1;
    assert_eq!(b, &a + 1);
    assert_eq!(
        b.to_string(),
        "2340958636145614104611154174250821246/362736035870515331128527330659",
    );
}

#[test]
fn test_canonical_form() {
    let a = BigRational::from_integers(-10, -4).unwrap();
    assert_eq!(a.to_string(), "5/2");
    let a: BigRational = "6/-4".parse().unwrap();
    assert_eq!(a.to_string(), "-3/2");
    assert!(a.denom().is_positive());

    let a: BigRational = "-0/5".parse().unwrap();
    assert_eq!(a.to_string(), "0/1");
    assert!(!a.is_negative());
}

#[test]
fn test_zero_denominator() {
    let err = "1/0".parse::<BigRational>().unwrap_err();
    assert_eq!(*err.code(), ErrorCode::ZeroDenominator);
    assert!(err.is_format());

    let err = BigRational::from_integers(1, 0u8).unwrap_err();
    assert_eq!(*err.code(), ErrorCode::DivisionByZero);
}

#[test]
fn test_operators() {
    let half: BigRational = "1/2".parse().unwrap();
    let third: BigRational = "1/3".parse().unwrap();
    assert_eq!((&half + &third).to_string(), "5/6");
    assert_eq!((&half - &third).to_string(), "1/6");
    assert_eq!((&half * &third).to_string(), "1/6");
    assert_eq!((&half / &third).to_string(), "3/2");
    assert_eq!((-&half).to_string(), "-1/2");

    let mut x = half.clone();
    x *= 4;
    assert!(x.is_integer());
    assert_eq!(x, 2);
    x -= &BigInt::from(5);
    assert_eq!(x, -3);
    x /= 6u64;
    assert_eq!(x, BigRational::from_integers(-1, 2).unwrap());
}

#[test]
fn test_failed_division_leaves_value() {
    let mut x: BigRational = "7/9".parse().unwrap();
    let err = x.try_div(&BigRational::new()).unwrap_err();
    assert!(err.is_divide_by_zero());
    assert_eq!(x.to_string(), "7/9");
}

#[test]
#[should_panic(expected = "attempt to divide by zero")]
fn test_div_operator_by_zero() {
    let x: BigRational = "7/9".parse().unwrap();
    let _ = x / 0;
}

#[test]
fn test_assign_reuses_buffers() {
    let mut x = BigRational::allocate(256, 256).unwrap();
    let numer_ptr = x.numer().limbs_ptr();
    let denom_ptr = x.denom().limbs_ptr();
    x.assign(&"-22/7".parse::<BigRational>().unwrap()).unwrap();
    assert_eq!(x.to_string(), "-22/7");
    assert_eq!(x.numer().limbs_ptr(), numer_ptr);
    assert_eq!(x.denom().limbs_ptr(), denom_ptr);

    x.assign(5u8).unwrap();
    assert_eq!(x.to_string(), "5/1");
}

#[test]
fn test_into_parts() {
    let x = BigRational::from_parts(BigInt::from(12), BigInt::from(-18)).unwrap();
    let (numer, denom) = x.into_parts();
    assert_eq!(numer, -2);
    assert_eq!(denom, 3);
}

#[test]
fn test_to_f64() {
    let x: BigRational = "5432109876543212345789023245987/362736035870515331128527330659"
        .parse()
        .unwrap();
    let expected = 5432109876543212345789023245987f64 / 362736035870515331128527330659f64;
    assert!((x.to_f64() - expected).abs() <= expected * f64::EPSILON * 4.0);

    let tiny = BigRational::from_f64(f64::MIN_POSITIVE).unwrap();
    assert_eq!(tiny.to_f64(), f64::MIN_POSITIVE);
}

#[test]
fn test_ordering() {
    let mut values: Vec<BigRational> = ["1/2", "-7/3", "0/1", "5/1", "-1/1000"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();
    values.sort();
    let sorted: Vec<String> = values.iter().map(ToString::to_string).collect();
    assert_eq!(sorted, ["-7/3", "-1/1000", "0/1", "1/2", "5/1"]);
}
