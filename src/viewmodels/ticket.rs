use super::FormError;
use crate::models::Ticket;

/// Respuesta del agente: recortada y no vacía, y nunca mientras se envía otra
pub fn validate_reply(reply: &str, sending: bool) -> Result<String, FormError> {
    if sending {
        return Err(FormError::Busy);
    }
    let trimmed = reply.trim();
    if trimmed.is_empty() {
        return Err(FormError::EmptyMessage);
    }
    Ok(trimmed.to_string())
}

/// Cómo encontrar al cliente de Shopify de un ticket ("View Orders")
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerLookup {
    ById(String),
    ByPhone(String),
    ByEmail(String),
    Unavailable,
}

impl CustomerLookup {
    /// Prioridad: id de Shopify, luego teléfono, luego email
    pub fn for_ticket(ticket: &Ticket) -> Self {
        fn present(value: &Option<String>) -> Option<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        }

        if let Some(id) = present(&ticket.shopify_customer_id) {
            CustomerLookup::ById(id)
        } else if let Some(phone) = present(&ticket.customer_phone) {
            CustomerLookup::ByPhone(phone)
        } else if let Some(email) = present(&ticket.customer_email) {
            CustomerLookup::ByEmail(email)
        } else {
            CustomerLookup::Unavailable
        }
    }
}

pub const CUSTOMER_NOT_FOUND: &str = "Customer not found in Shopify";
pub const CUSTOMER_LOAD_FAILED: &str = "Could not load customer";

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(json: &str) -> Ticket {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn reply_rules() {
        assert_eq!(validate_reply("  thanks!  ", false).as_deref(), Ok("thanks!"));
        assert_eq!(validate_reply(" \n ", false), Err(FormError::EmptyMessage));
        assert_eq!(validate_reply("hello", true), Err(FormError::Busy));
    }

    #[test]
    fn lookup_prefers_shopify_id_then_phone_then_email() {
        let t = ticket(r#"{"id":1,"shopifyCustomerId":77,"customerPhone":"+1","customerEmail":"a@b.c"}"#);
        assert_eq!(CustomerLookup::for_ticket(&t), CustomerLookup::ById("77".into()));

        let t = ticket(r#"{"id":1,"customerPhone":"+1555","customerEmail":"a@b.c"}"#);
        assert_eq!(CustomerLookup::for_ticket(&t), CustomerLookup::ByPhone("+1555".into()));

        let t = ticket(r#"{"id":1,"customerPhone":"  ","customerEmail":"a@b.c"}"#);
        assert_eq!(CustomerLookup::for_ticket(&t), CustomerLookup::ByEmail("a@b.c".into()));

        let t = ticket(r#"{"id":1}"#);
        assert_eq!(CustomerLookup::for_ticket(&t), CustomerLookup::Unavailable);
    }
}
