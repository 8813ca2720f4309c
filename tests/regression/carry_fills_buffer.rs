use hugenum::{BigInt, Limb, LIMB_BITS};

#[test]
fn test() {
    // Every limb of the buffer is in use and all bits are set, so the carry
    // needs a limb that does not exist yet.
    let mut x = BigInt::allocate(LIMB_BITS as usize * 2).unwrap();
    x.assign(&((BigInt::from(1) << (LIMB_BITS as usize * 2)) - 1)).unwrap();
    assert_eq!(x.limbs(), &[Limb::MAX, Limb::MAX]);
    x += 1;
    assert_eq!(x.limbs(), &[0, 0, 1]);
    assert_eq!(x.bit_length(), LIMB_BITS as usize * 2 + 1);
}
