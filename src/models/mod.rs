pub mod auth;
pub mod customer;
pub mod order;
pub mod ticket;
pub mod incoming;
pub mod analytics;
pub mod push;

pub use auth::{Agent, AgentRole, Session, LoginRequest, LoginResponse};
pub use customer::Customer;
pub use order::{Order, LineItem, Fulfillment, ShippingLine, IssueReason, WireId};
pub use ticket::{Ticket, TicketStatus, Channel, Message, SenderType, ResolutionType, ResolutionReason, TicketUpdate};
pub use incoming::{IncomingEvent, IncomingKind, WorkerMessage};
pub use analytics::{AnalyticsOverview, DoaByChannel};

// ============================================================================
// DESERIALIZADORES COMPARTIDOS
// ============================================================================
// El backend mezcla IDs numéricos (Shopify) y strings; los precios llegan a
// veces como "12.50" y a veces como 12.5
// ============================================================================

pub(crate) mod de {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn value_to_string(value: Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        value_to_string(value)
            .ok_or_else(|| serde::de::Error::custom("expected string or number"))
    }

    /// Un string o número; ausente o null queda vacío
    pub fn string_or_number_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.and_then(value_to_string).unwrap_or_default())
    }

    /// `null` explícito vale lo mismo que el campo ausente
    pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }

    pub fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.and_then(value_to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::de;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct IdAndPrice {
        #[serde(deserialize_with = "de::string_or_number")]
        id: String,
        #[serde(default, deserialize_with = "de::opt_string_or_number")]
        price: Option<String>,
    }

    #[test]
    fn ids_accept_numbers_and_strings() {
        let a: IdAndPrice = serde_json::from_str(r#"{"id": 7301234, "price": 12.5}"#).unwrap();
        assert_eq!(a.id, "7301234");
        assert_eq!(a.price.as_deref(), Some("12.5"));

        let b: IdAndPrice = serde_json::from_str(r#"{"id": "gid-1"}"#).unwrap();
        assert_eq!(b.id, "gid-1");
        assert_eq!(b.price, None);

        let c: IdAndPrice = serde_json::from_str(r#"{"id": "x", "price": null}"#).unwrap();
        assert_eq!(c.price, None);
    }

    #[derive(Deserialize)]
    struct Loose {
        #[serde(default, deserialize_with = "de::null_as_default")]
        tags: Vec<String>,
        #[serde(default, deserialize_with = "de::string_or_number_or_empty")]
        id: String,
    }

    #[test]
    fn null_reads_as_missing() {
        let a: Loose = serde_json::from_str(r#"{"tags": null, "id": null}"#).unwrap();
        assert!(a.tags.is_empty());
        assert_eq!(a.id, "");

        let b: Loose = serde_json::from_str(r#"{"tags": ["x"], "id": 9}"#).unwrap();
        assert_eq!(b.tags, vec!["x".to_string()]);
        assert_eq!(b.id, "9");

        let c: Loose = serde_json::from_str("{}").unwrap();
        assert!(c.tags.is_empty());
    }
}
