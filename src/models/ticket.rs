use serde::{Deserialize, Serialize};
use super::de;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Amazon,
    Shopify,
    Phone,
    Text,
    Email,
    #[serde(other)]
    Other,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Amazon => "amazon",
            Channel::Shopify => "shopify",
            Channel::Phone => "phone",
            Channel::Text => "text",
            Channel::Email => "email",
            Channel::Other => "other",
        }
    }
}

impl Default for Channel {
    fn default() -> Self {
        Channel::Other
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 4] = [
        TicketStatus::Open,
        TicketStatus::InProgress,
        TicketStatus::Resolved,
        TicketStatus::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Resolved => "resolved",
            TicketStatus::Closed => "closed",
        }
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, TicketStatus::Open | TicketStatus::InProgress)
    }
}

impl Default for TicketStatus {
    fn default() -> Self {
        TicketStatus::Open
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderType {
    Agent,
    Customer,
    #[serde(other)]
    System,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SenderAgent {
    #[serde(default)]
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(deserialize_with = "de::string_or_number")]
    pub id: String,
    #[serde(default)]
    pub body: String,
    pub sender_type: SenderType,
    #[serde(default)]
    pub sender_agent: Option<SenderAgent>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Message {
    pub fn sender_label(&self) -> &str {
        match self.sender_type {
            SenderType::Agent => self
                .sender_agent
                .as_ref()
                .map(|a| a.name.as_str())
                .filter(|n| !n.is_empty())
                .unwrap_or("Agent"),
            SenderType::Customer => "Customer",
            SenderType::System => "System",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    #[serde(deserialize_with = "de::string_or_number")]
    pub id: String,
    #[serde(default)]
    pub channel: Channel,
    #[serde(default)]
    pub status: TicketStatus,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string_or_number")]
    pub shopify_customer_id: Option<String>,
    #[serde(default)]
    pub resolution_type: Option<String>,
    #[serde(default)]
    pub resolution_reason: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Ticket {
    pub fn customer_label(&self) -> &str {
        self.customer_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("Unknown")
    }
}

// ============================================================================
// ACTUALIZACIÓN / RESOLUCIÓN
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionType {
    NoAction,
    InfoOnly,
    Reship,
    Refund,
}

impl ResolutionType {
    pub const ALL: [ResolutionType; 4] = [
        ResolutionType::NoAction,
        ResolutionType::InfoOnly,
        ResolutionType::Reship,
        ResolutionType::Refund,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ResolutionType::NoAction => "No Action Needed",
            ResolutionType::InfoOnly => "Info / Answered Question",
            ResolutionType::Reship => "Reship Created",
            ResolutionType::Refund => "Refund Issued",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ResolutionType::NoAction => "✅",
            ResolutionType::InfoOnly => "💡",
            ResolutionType::Reship => "📦",
            ResolutionType::Refund => "💳",
        }
    }

    pub fn needs_reason(&self) -> bool {
        matches!(self, ResolutionType::Reship | ResolutionType::Refund)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionReason {
    Doa,
    Damaged,
    WrongOrder,
    Undercount,
    Missing,
    Weather,
    CustomerRequest,
    Other,
}

impl ResolutionReason {
    pub const ALL: [ResolutionReason; 8] = [
        ResolutionReason::Doa,
        ResolutionReason::Damaged,
        ResolutionReason::WrongOrder,
        ResolutionReason::Undercount,
        ResolutionReason::Missing,
        ResolutionReason::Weather,
        ResolutionReason::CustomerRequest,
        ResolutionReason::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ResolutionReason::Doa => "DOA",
            ResolutionReason::Damaged => "Damaged in Transit",
            ResolutionReason::WrongOrder => "Wrong Order",
            ResolutionReason::Undercount => "Undercount",
            ResolutionReason::Missing => "Missing Item",
            ResolutionReason::Weather => "Weather / Delay",
            ResolutionReason::CustomerRequest => "Customer Request",
            ResolutionReason::Other => "Other",
        }
    }
}

/// Cuerpo de PUT /tickets/:id. Los campos ausentes no se envían;
/// `resolutionReason` sí viaja como null cuando no aplica.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Resolution>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub resolution_type: ResolutionType,
    pub resolution_reason: Option<ResolutionReason>,
}

impl TicketUpdate {
    pub fn status(status: TicketStatus) -> Self {
        Self {
            status: Some(status),
            resolution: None,
        }
    }

    pub fn resolve(resolution_type: ResolutionType, reason: Option<ResolutionReason>) -> Self {
        Self {
            status: Some(TicketStatus::Resolved),
            resolution: Some(Resolution {
                resolution_type,
                resolution_reason: reason,
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewMessage {
    pub body: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TicketsResponse {
    #[serde(default)]
    pub tickets: Vec<Ticket>,
}

/// GET /tickets/:id devuelve `{ticket}` o el ticket directamente
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum TicketEnvelope {
    Wrapped { ticket: Ticket },
    Bare(Ticket),
}

impl TicketEnvelope {
    pub fn into_ticket(self) -> Ticket {
        match self {
            TicketEnvelope::Wrapped { ticket } => ticket,
            TicketEnvelope::Bare(ticket) => ticket,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_envelope_accepts_both_shapes() {
        let wrapped = r#"{"ticket": {"id": 9, "channel": "phone", "status": "in_progress"}}"#;
        let bare = r#"{"id": 9, "channel": "phone", "status": "in_progress"}"#;
        let a = serde_json::from_str::<TicketEnvelope>(wrapped).unwrap().into_ticket();
        let b = serde_json::from_str::<TicketEnvelope>(bare).unwrap().into_ticket();
        assert_eq!(a, b);
        assert_eq!(a.status, TicketStatus::InProgress);
        assert!(a.status.is_unresolved());
        assert_eq!(a.customer_label(), "Unknown");
    }

    #[test]
    fn unknown_channel_is_other() {
        let t: Ticket = serde_json::from_str(r#"{"id": "t1", "channel": "fax"}"#).unwrap();
        assert_eq!(t.channel, Channel::Other);
    }

    #[test]
    fn resolve_body_sends_null_reason() {
        let body = serde_json::to_value(TicketUpdate::resolve(ResolutionType::InfoOnly, None)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"status": "resolved", "resolutionType": "info_only", "resolutionReason": null})
        );

        let body = serde_json::to_value(TicketUpdate::resolve(
            ResolutionType::Reship,
            Some(ResolutionReason::WrongOrder),
        ))
        .unwrap();
        assert_eq!(body["resolutionReason"], "wrong_order");
    }

    #[test]
    fn status_only_update() {
        let body = serde_json::to_value(TicketUpdate::status(TicketStatus::Closed)).unwrap();
        assert_eq!(body, serde_json::json!({"status": "closed"}));
    }

    #[test]
    fn agent_message_uses_sender_name() {
        let m: Message = serde_json::from_str(
            r#"{"id": 1, "body": "hi", "senderType": "agent", "senderAgent": {"name": "Dana"}}"#,
        )
        .unwrap();
        assert_eq!(m.sender_label(), "Dana");
    }
}
