use crate::error::{Result, SubError};
use serde::{Deserialize, Deserializer, Serializer};

pub fn decode_hex(hex_str: &str) -> Result<Vec<u8>> {
    hex::decode(hex_str.trim()).map_err(|e| SubError::Format(format!("invalid hex: {e}")))
}

/// Serde adapter storing optional binary blobs as a hex string.
pub mod opt_bytes {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<Vec<u8>>,
        s: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        match value {
            Some(bytes) => s.serialize_str(&hex::encode(bytes)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> std::result::Result<Option<Vec<u8>>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(h) => decode_hex(h).map(Some).map_err(serde::de::Error::custom),
        }
    }
}
