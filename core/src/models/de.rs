// storefront/src/models/de.rs

//! Lenient numeric deserializers for backend payloads.
//!
//! The backend serializes decimals and some counters as strings ("1990.00",
//! "12"). These helpers accept either form and reject anything non-numeric, so
//! a malformed payload fails at decode time instead of surfacing later.

use serde::de::{Deserializer, Error};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum Numeric {
  Int(i64),
  Float(f64),
  Text(String),
}

impl Numeric {
  fn to_f64<E: Error>(self) -> Result<f64, E> {
    match self {
      Numeric::Int(i) => Ok(i as f64),
      Numeric::Float(f) if f.is_finite() => Ok(f),
      Numeric::Float(f) => Err(E::custom(format!("non-finite number {}", f))),
      Numeric::Text(s) => s
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .ok_or_else(|| E::custom(format!("expected a number, got {:?}", s))),
    }
  }

  fn to_i64<E: Error>(self) -> Result<i64, E> {
    match self {
      Numeric::Int(i) => Ok(i),
      other => other.to_f64().map(|f| f.round() as i64),
    }
  }
}

/// Whole currency units, rounded.
pub fn amount<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
  Numeric::deserialize(d)?.to_i64()
}

/// Like [`amount`] but refuses negative values (prices).
pub fn price<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
  let value = amount(d)?;
  if value < 0 {
    return Err(D::Error::custom(format!("negative price {}", value)));
  }
  Ok(value)
}

pub fn int<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
  amount(d)
}

pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
  let value = amount(d)?;
  u32::try_from(value).map_err(|_| D::Error::custom(format!("count out of range: {}", value)))
}

pub fn total<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
  let value = amount(d)?;
  u64::try_from(value).map_err(|_| D::Error::custom(format!("total out of range: {}", value)))
}

pub fn opt_total<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
  match Option::<Numeric>::deserialize(d)? {
    None => Ok(None),
    Some(n) => {
      let value = n.to_i64::<D::Error>()?;
      u64::try_from(value)
        .map(Some)
        .map_err(|_| D::Error::custom(format!("total out of range: {}", value)))
    }
  }
}

/// Average-style figures that legitimately carry decimals.
pub fn decimal<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
  Numeric::deserialize(d)?.to_f64()
}

/// Accepts booleans as well as 0/1 integers.
pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum Flag {
    Bool(bool),
    Int(i64),
  }
  match Option::<Flag>::deserialize(d)? {
    None => Ok(false),
    Some(Flag::Bool(b)) => Ok(b),
    Some(Flag::Int(i)) => Ok(i != 0),
  }
}
