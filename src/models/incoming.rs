use serde::{Deserialize, Serialize};
use serde_json::Value;
use super::{de, Customer, Order};

/// Tipo de evento entrante. Los tipos desconocidos se conservan tal cual.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IncomingKind {
    Call,
    Text,
    Other(String),
}

impl From<String> for IncomingKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "incoming_call" => IncomingKind::Call,
            "incoming_text" => IncomingKind::Text,
            _ => IncomingKind::Other(raw),
        }
    }
}

impl From<IncomingKind> for String {
    fn from(kind: IncomingKind) -> Self {
        match kind {
            IncomingKind::Call => "incoming_call".to_string(),
            IncomingKind::Text => "incoming_text".to_string(),
            IncomingKind::Other(raw) => raw,
        }
    }
}

impl IncomingKind {
    pub fn headline(&self) -> &'static str {
        match self {
            IncomingKind::Call => "Incoming Call",
            _ => "New Message",
        }
    }
}

/// Llamada o SMS entrante (vía SSE o vía click en notificación push).
/// Nunca se persiste.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingEvent {
    #[serde(rename = "type")]
    pub kind: IncomingKind,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub phone: String,
    #[serde(default)]
    pub customer: Option<Customer>,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub recent_orders: Vec<Order>,
    #[serde(default, deserialize_with = "de::opt_string_or_number")]
    pub ticket_id: Option<String>,
    #[serde(default)]
    pub message_body: Option<String>,
}

impl IncomingEvent {
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn caller_label(&self) -> &str {
        self.customer
            .as_ref()
            .and_then(|c| c.name.as_deref())
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("Unknown Caller")
    }

    pub fn has_customer(&self) -> bool {
        self.customer.is_some()
    }
}

/// Mensajes que el service worker envía a la página
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum WorkerMessage {
    #[serde(rename = "PUSH_NOTIFICATION_CLICK")]
    NotificationClick {
        #[serde(default)]
        data: Option<Value>,
    },
    #[serde(other)]
    Unknown,
}
