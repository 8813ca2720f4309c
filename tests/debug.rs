use hugenum::{BigInt, BigRational, ErrorCode, LimbBuffer};

#[test]
fn integer() {
    assert_eq!(format!("{:?}", BigInt::new()), "BigInt(0)");
    assert_eq!(format!("{:?}", BigInt::from(-1)), "BigInt(-1)");
    assert_eq!(
        format!("{:?}", BigInt::from(u128::MAX)),
        "BigInt(340282366920938463463374607431768211455)"
    );
}

#[test]
fn rational() {
    assert_eq!(format!("{:?}", BigRational::new()), "BigRational(0/1)");
    assert_eq!(
        format!("{:?}", BigRational::from_integers(-1, 3).unwrap()),
        "BigRational(-1/3)"
    );
}

#[test]
fn error_code() {
    assert_eq!(format!("{:?}", ErrorCode::InvalidDigit('z')), "InvalidDigit('z')");
    assert_eq!(format!("{:?}", ErrorCode::ZeroDenominator), "ZeroDenominator");
    assert_eq!(format!("{:?}", ErrorCode::AllocationFailed(3)), "AllocationFailed(3)");
}

#[test]
fn unallocated_buffer() {
    assert_eq!(
        format!("{:?}", LimbBuffer::new()),
        "LimbBuffer { ptr: 0x0, capacity: 0 }"
    );
}
