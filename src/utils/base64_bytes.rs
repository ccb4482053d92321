//! Serde adapter for optional binary payloads carried as base64 strings.

use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S>(bytes: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match bytes {
        Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
where
    D: Deserializer<'de>,
{
    let encoded: Option<String> = Option::deserialize(deserializer)?;

    match encoded {
        Some(encoded) if !encoded.is_empty() => STANDARD
            .decode(encoded.as_bytes())
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    struct Payload {
        #[serde(with = "super", default)]
        image: Option<Vec<u8>>,
    }

    #[test]
    fn encodes_bytes_as_base64() {
        let json = serde_json::to_string(&Payload {
            image: Some(vec![0xde, 0xad, 0xbe, 0xef]),
        })
        .unwrap();
        assert_eq!(json, r#"{"image":"3q2+7w=="}"#);
    }

    #[test]
    fn missing_and_empty_images_are_none() {
        let missing: Payload = serde_json::from_str("{}").unwrap();
        let empty: Payload = serde_json::from_str(r#"{"image":""}"#).unwrap();
        assert!(missing.image.is_none());
        assert!(empty.image.is_none());
    }

    #[test]
    fn rejects_invalid_base64() {
        assert!(serde_json::from_str::<Payload>(r#"{"image":"not base64!"}"#).is_err());
    }
}
