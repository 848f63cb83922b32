use base64::{engine::general_purpose, Engine as _};
use tracing::error;

use crate::domain::{
    common::entities::app_errors::CoreError,
    preferences::{ports::PreferenceTokenCodec, value_objects::PreferencesDocument},
};

/// Opaque token encoding for the anonymous client-side record: the JSON
/// document, base64url without padding. Anything that fails to decode is a
/// resolution miss.
#[derive(Debug, Clone, Default)]
pub struct Base64PreferenceTokenCodec;

impl Base64PreferenceTokenCodec {
    pub fn new() -> Self {
        Self
    }
}

impl PreferenceTokenCodec for Base64PreferenceTokenCodec {
    fn encode(&self, document: &PreferencesDocument) -> Result<String, CoreError> {
        let json = serde_json::to_string(document).map_err(|e| {
            error!("Failed to encode preference token payload: {}", e);
            CoreError::SaveFailed
        })?;
        Ok(general_purpose::URL_SAFE_NO_PAD.encode(json))
    }

    fn decode(&self, token: &str) -> Option<PreferencesDocument> {
        let bytes = general_purpose::URL_SAFE_NO_PAD.decode(token.trim()).ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn encode_decode_round_trips() {
        let codec = Base64PreferenceTokenCodec::new();
        let document = PreferencesDocument {
            courses: vec!["mains".into()],
            proteins: vec!["beef".into(), "vegan".into()],
            max_spice: json!(3),
        };

        let token = codec.encode(&document).unwrap();
        assert_eq!(codec.decode(&token), Some(document));
    }

    #[test]
    fn garbage_tokens_decode_to_none() {
        let codec = Base64PreferenceTokenCodec::new();
        assert_eq!(codec.decode("not a token!!"), None);
        // Valid base64, invalid payload.
        let token = general_purpose::URL_SAFE_NO_PAD.encode("certainly not json");
        assert_eq!(codec.decode(&token), None);
    }
}
