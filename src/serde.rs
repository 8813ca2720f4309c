//! Serde support, behind the `serde` feature.
//!
//! Both types serialize as their base 10 text so that any self-describing
//! format keeps every digit. Integers also deserialize from native integers.

use crate::int::BigInt;
use crate::lib::*;
use crate::rational::BigRational;
use serde_core::de::{self, Deserialize, Deserializer, Visitor};
use serde_core::ser::{Serialize, Serializer};

impl Serialize for BigInt {
    #[inline]
    fn serialize<S>(&self, serializer: S) -> result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl Serialize for BigRational {
    #[inline]
    fn serialize<S>(&self, serializer: S) -> result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

struct BigIntVisitor;

impl<'de> Visitor<'de> for BigIntVisitor {
    type Value = BigInt;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an integer or a string of digits")
    }

    fn visit_i64<E>(self, value: i64) -> result::Result<BigInt, E> {
        Ok(BigInt::from(value))
    }

    fn visit_u64<E>(self, value: u64) -> result::Result<BigInt, E> {
        Ok(BigInt::from(value))
    }

    fn visit_i128<E>(self, value: i128) -> result::Result<BigInt, E> {
        Ok(BigInt::from(value))
    }

    fn visit_u128<E>(self, value: u128) -> result::Result<BigInt, E> {
        Ok(BigInt::from(value))
    }

    fn visit_str<E>(self, value: &str) -> result::Result<BigInt, E>
    where
        E: de::Error,
    {
        value.parse().map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for BigInt {
    #[inline]
    fn deserialize<D>(deserializer: D) -> result::Result<BigInt, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(BigIntVisitor)
    }
}

struct BigRationalVisitor;

impl<'de> Visitor<'de> for BigRationalVisitor {
    type Value = BigRational;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a fraction such as \"-3/4\"")
    }

    fn visit_str<E>(self, value: &str) -> result::Result<BigRational, E>
    where
        E: de::Error,
    {
        value.parse().map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for BigRational {
    #[inline]
    fn deserialize<D>(deserializer: D) -> result::Result<BigRational, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(BigRationalVisitor)
    }
}
