use serde::{Deserialize, Deserializer, Serializer};

pub(super) fn serialize<S>(bytes: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    hex::serde::serialize(bytes, serializer)
}

pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<[u8; 32], D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let vec = hex::decode(s.trim_start_matches("0x")).map_err(serde::de::Error::custom)?;
    <[u8; 32]>::try_from(vec).map_err(|_| serde::de::Error::custom("Invalid length"))
}
