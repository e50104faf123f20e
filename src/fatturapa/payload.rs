//! Base64 payloads for upload to an SdI intermediary.
//!
//! Upload APIs take the serialized XML as standard (padded) base64. The
//! same encoding is used for attachment content (`Allegati/Attachment`).

use base64::{Engine as _, engine::general_purpose::STANDARD};

use super::serialize::to_xml;
use crate::core::{Attachment, Document, FatturaError};

/// Serialize a document and encode the XML as base64.
pub fn encode_document(document: &Document) -> Result<String, FatturaError> {
    let xml = to_xml(document)?;
    Ok(encode_xml(&xml))
}

/// Encode already serialized XML as base64.
pub fn encode_xml(xml: &str) -> String {
    STANDARD.encode(xml.as_bytes())
}

/// Decode a base64 payload back to XML text.
pub fn decode_xml(payload: &str) -> Result<String, FatturaError> {
    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| FatturaError::Payload(format!("invalid base64: {e}")))?;
    String::from_utf8(bytes).map_err(|e| FatturaError::Payload(format!("payload is not UTF-8: {e}")))
}

/// Build an attachment from raw file content.
pub fn attachment_from_bytes(
    name: impl Into<String>,
    format: Option<String>,
    content: &[u8],
) -> Attachment {
    Attachment {
        name: name.into(),
        compression: None,
        format,
        description: None,
        data: STANDARD.encode(content),
    }
}
