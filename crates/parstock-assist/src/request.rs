//! Validated estimate requests.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::AssistError;

/// MIME type assumed when the caller does not name one.
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// A non-empty image and label, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimateRequest {
    image: Vec<u8>,
    item_label: String,
    mime_type: String,
}

impl EstimateRequest {
    /// Build from raw image bytes.
    pub fn new(
        image: Vec<u8>,
        item_label: &str,
        mime_type: Option<&str>,
    ) -> Result<Self, AssistError> {
        if image.is_empty() {
            return Err(AssistError::MissingImage);
        }
        let item_label = item_label.trim();
        if item_label.is_empty() {
            return Err(AssistError::MissingItemLabel);
        }
        let mime_type = mime_type
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_MIME_TYPE);
        Ok(Self {
            image,
            item_label: item_label.to_string(),
            mime_type: mime_type.to_string(),
        })
    }

    /// Build from base64 text, accepting a `data:<mime>;base64,` prefix.
    ///
    /// A MIME type carried in the data URL wins over `mime_type`.
    pub fn from_base64(
        encoded: &str,
        item_label: &str,
        mime_type: Option<&str>,
    ) -> Result<Self, AssistError> {
        let encoded = encoded.trim();
        if encoded.is_empty() {
            return Err(AssistError::MissingImage);
        }
        let (payload, data_url_mime) = split_data_url(encoded);
        let image = STANDARD
            .decode(payload)
            .map_err(|_| AssistError::InvalidImageEncoding)?;
        Self::new(image, item_label, data_url_mime.or(mime_type))
    }

    #[must_use]
    pub fn item_label(&self) -> &str {
        &self.item_label
    }

    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Image re-encoded for the wire.
    #[must_use]
    pub fn image_base64(&self) -> String {
        STANDARD.encode(&self.image)
    }
}

fn split_data_url(encoded: &str) -> (&str, Option<&str>) {
    let Some(rest) = encoded.strip_prefix("data:") else {
        return (encoded, None);
    };
    match rest.split_once(',') {
        Some((meta, payload)) => {
            let mime = meta.strip_suffix(";base64").unwrap_or(meta);
            (payload, Some(mime).filter(|m| !m.is_empty()))
        }
        None => (encoded, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_mime_type() {
        let req = EstimateRequest::new(vec![1, 2, 3], " Towels ", None).unwrap();
        assert_eq!(req.mime_type(), DEFAULT_MIME_TYPE);
        assert_eq!(req.item_label(), "Towels");
    }

    #[test]
    fn test_rejects_empty_inputs() {
        assert!(matches!(
            EstimateRequest::new(vec![], "Towels", None),
            Err(AssistError::MissingImage)
        ));
        assert!(matches!(
            EstimateRequest::new(vec![1], "  ", None),
            Err(AssistError::MissingItemLabel)
        ));
        assert!(matches!(
            EstimateRequest::from_base64("", "Towels", None),
            Err(AssistError::MissingImage)
        ));
    }

    #[test]
    fn test_from_base64() {
        let req = EstimateRequest::from_base64("AQID", "Towels", Some("image/png")).unwrap();
        assert_eq!(req.mime_type(), "image/png");
        assert_eq!(req.image_base64(), "AQID");
    }

    #[test]
    fn test_from_data_url() {
        let req =
            EstimateRequest::from_base64("data:image/webp;base64,AQID", "Towels", None).unwrap();
        assert_eq!(req.image_base64(), "AQID");
        assert_eq!(req.mime_type(), "image/webp");
    }

    #[test]
    fn test_bad_base64() {
        assert!(matches!(
            EstimateRequest::from_base64("not base64!!", "Towels", None),
            Err(AssistError::InvalidImageEncoding)
        ));
    }
}
