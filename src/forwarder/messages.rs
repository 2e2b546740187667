//! Message payloads accepted on the send routes.
//!
//! Field names match the Buho API wire format. Every field is an opaque JSON
//! value: the proxy does not validate message content, and fields missing
//! from the inbound body are left out of the outbound one.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The three send operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Text,
    Pdf,
    Media,
}

impl MessageKind {
    /// Path on both the proxy and the upstream.
    pub const fn path(self) -> &'static str {
        match self {
            MessageKind::Text => "/api/mensaje/enviar-texto",
            MessageKind::Pdf => "/api/mensaje/enviar/pdf",
            MessageKind::Media => "/api/mensaje/enviar-medios",
        }
    }

    /// Operation label used in logs and metrics.
    pub const fn operation(self) -> &'static str {
        match self {
            MessageKind::Text => "send_text",
            MessageKind::Pdf => "send_pdf",
            MessageKind::Media => "send_media",
        }
    }
}

/// A payload that can be forwarded upstream.
pub trait OutboundMessage:
    Serialize + DeserializeOwned + Default + Send + Sync + 'static
{
    const KIND: MessageKind;

    /// Recipient number, for logging.
    fn recipient(&self) -> Option<&Value>;

    /// Short human-readable description of the payload, for logging.
    fn summary(&self) -> String {
        Self::KIND.operation().to_string()
    }
}

/// `POST /api/mensaje/enviar-texto`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numero: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mensaje: Option<Value>,
}

impl OutboundMessage for TextMessage {
    const KIND: MessageKind = MessageKind::Text;

    fn recipient(&self) -> Option<&Value> {
        self.numero.as_ref()
    }
}

/// `POST /api/mensaje/enviar/pdf`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PdfMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numero: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mensaje: Option<Value>,
    /// Base64 file contents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archivo: Option<Value>,
    #[serde(
        default,
        rename = "nombreArchivo",
        skip_serializing_if = "Option::is_none"
    )]
    pub nombre_archivo: Option<Value>,
}

impl OutboundMessage for PdfMessage {
    const KIND: MessageKind = MessageKind::Pdf;

    fn recipient(&self) -> Option<&Value> {
        self.numero.as_ref()
    }

    fn summary(&self) -> String {
        match &self.nombre_archivo {
            Some(name) => format!("pdf {}", display_value(name)),
            None => "pdf".to_string(),
        }
    }
}

/// `POST /api/mensaje/enviar-medios`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numero: Option<Value>,
    /// Media type, e.g. "image" or "video".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enlace: Option<Value>,
}

impl OutboundMessage for MediaMessage {
    const KIND: MessageKind = MessageKind::Media;

    fn recipient(&self) -> Option<&Value> {
        self.numero.as_ref()
    }

    fn summary(&self) -> String {
        match &self.media {
            Some(media) => display_value(media),
            None => "media".to_string(),
        }
    }
}

/// Strings without their JSON quotes, everything else as JSON.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
