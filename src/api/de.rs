//! Deserialization helpers for Monday.com records.
//!
//! Monday.com encodes `ID` scalars as JSON strings, but some fields (user ids,
//! workspace ids on older versions) come back as numbers. Both are accepted.

use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

impl RawId {
    fn into_u64<E: de::Error>(self) -> Result<u64, E> {
        match self {
            Self::Number(n) => Ok(n),
            Self::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid id '{s}'"))),
        }
    }
}

pub fn id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer)?.into_u64()
}

pub fn opt_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawId>::deserialize(deserializer)?
        .map(RawId::into_u64)
        .transpose()
}

/// Treats `null` like a missing field.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
