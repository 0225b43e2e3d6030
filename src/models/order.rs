use std::fmt;

use serde::{Deserialize, Serialize};
use super::de;

// ============================================================================
// PEDIDOS (Shopify / Amazon)
// ============================================================================

/// Id de Shopify tal como llega: número o string. Se reenvía sin convertir.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Num(u64),
    Str(String),
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireId::Num(n) => write!(f, "{}", n),
            WireId::Str(s) => f.write_str(s),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(default)]
    pub id: Option<WireId>,
    #[serde(default)]
    pub title: String,
    #[serde(default = "one")]
    pub quantity: u32,
    #[serde(default, deserialize_with = "de::opt_string_or_number")]
    pub price: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default, alias = "variant_id")]
    pub variant_id: Option<WireId>,
}

fn one() -> u32 {
    1
}

impl LineItem {
    /// Precio unitario en centavos (0 si no es parseable)
    pub fn unit_price_cents(&self) -> i64 {
        self.price.as_deref().map(parse_cents).unwrap_or(0)
    }

    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents() * i64::from(self.quantity)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fulfillment {
    #[serde(default)]
    pub tracking_number: Option<String>,
    #[serde(default)]
    pub tracking_url: Option<String>,
    #[serde(default)]
    pub tracking_company: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShippingLine {
    #[serde(default)]
    pub title: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(deserialize_with = "de::string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default, alias = "date")]
    pub created_at: Option<String>,
    #[serde(default, alias = "items")]
    pub line_items: Vec<LineItem>,
    #[serde(default)]
    pub fulfillment_status: Option<String>,
    #[serde(default, alias = "total", deserialize_with = "de::opt_string_or_number")]
    pub total_price: Option<String>,
    #[serde(default)]
    pub fulfillments: Vec<Fulfillment>,
    #[serde(default)]
    pub shipping_lines: Vec<ShippingLine>,
}

impl Order {
    pub fn fulfillment_label(&self) -> &str {
        self.fulfillment_status.as_deref().unwrap_or("unfulfilled")
    }

    pub fn tracking(&self) -> Option<&Fulfillment> {
        self.fulfillments
            .first()
            .filter(|f| f.tracking_number.is_some())
    }

    /// Total del pedido; si falta, suma de las líneas
    pub fn total_cents(&self) -> i64 {
        match self.total_price.as_deref() {
            Some(total) => parse_cents(total),
            None => self.line_items.iter().map(LineItem::line_total_cents).sum(),
        }
    }

    pub fn first_shipping_title(&self) -> Option<&str> {
        self.shipping_lines
            .first()
            .map(|l| l.title.as_str())
            .filter(|t| !t.is_empty())
    }
}

/// Convierte "12.5" / "12.50" / "$12.50" a centavos sin pasar por f64
pub fn parse_cents(raw: &str) -> i64 {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    let negative = cleaned.starts_with('-');
    let cleaned = cleaned.trim_start_matches('-');

    let (whole, frac) = cleaned.split_once('.').unwrap_or((cleaned, ""));
    let whole: i64 = whole.parse().unwrap_or(0);
    let mut frac_digits: String = frac.chars().take(2).collect();
    while frac_digits.len() < 2 {
        frac_digits.push('0');
    }
    let frac: i64 = frac_digits.parse().unwrap_or(0);

    let cents = whole.saturating_mul(100).saturating_add(frac);
    if negative {
        -cents
    } else {
        cents
    }
}

/// Motivo de un reship o reembolso
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueReason {
    Doa,
    Damaged,
    Missing,
    WrongItem,
    Weather,
    CustomerRequest,
    Other,
}

impl IssueReason {
    pub const ALL: [IssueReason; 7] = [
        IssueReason::Doa,
        IssueReason::Damaged,
        IssueReason::Missing,
        IssueReason::WrongItem,
        IssueReason::Weather,
        IssueReason::CustomerRequest,
        IssueReason::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            IssueReason::Doa => "DOA",
            IssueReason::Damaged => "Damaged",
            IssueReason::Missing => "Missing",
            IssueReason::WrongItem => "Wrong Item",
            IssueReason::Weather => "Weather",
            IssueReason::CustomerRequest => "Customer Request",
            IssueReason::Other => "Other",
        }
    }
}

// ============================================================================
// REQUESTS / RESPONSES
// ============================================================================

#[derive(Clone, Debug, Deserialize)]
pub struct OrdersResponse {
    #[serde(default)]
    pub orders: Vec<Order>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct OrderResponse {
    pub order: Order,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReshipLineItem {
    pub title: String,
    pub quantity: u32,
    pub price: Option<String>,
    pub sku: Option<String>,
    pub variant_id: Option<WireId>,
}

impl From<&LineItem> for ReshipLineItem {
    fn from(item: &LineItem) -> Self {
        Self {
            title: item.title.clone(),
            quantity: item.quantity,
            price: item.price.clone(),
            sku: item.sku.clone(),
            variant_id: item.variant_id.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReshipRequest {
    pub line_items: Vec<ReshipLineItem>,
    pub shipping_method: String,
    pub reason: IssueReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RefundLineItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_item_id: Option<WireId>,
    pub quantity: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundRequest {
    pub full_refund: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_items: Option<Vec<RefundLineItem>>,
    pub reason: IssueReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReshipRecord {
    #[serde(default)]
    pub new_order_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ReshipResponse {
    #[serde(default)]
    pub reship: Option<ReshipRecord>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RefundRecord {
    #[serde(default, deserialize_with = "de::opt_string_or_number")]
    pub amount: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RefundResponse {
    #[serde(default)]
    pub refund: Option<RefundRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popup_aliases_are_accepted() {
        let raw = r##"{"id": 55, "name": "#1055", "date": "2026-09-01T10:00:00Z",
                      "items": [{"title": "Seed Mix", "quantity": 2, "price": "9.99"}],
                      "total": 19.98}"##;
        let order: Order = serde_json::from_str(raw).unwrap();
        assert_eq!(order.id, "55");
        assert_eq!(order.created_at.as_deref(), Some("2026-09-01T10:00:00Z"));
        assert_eq!(order.line_items.len(), 1);
        assert_eq!(order.total_cents(), 1998);
        assert_eq!(order.fulfillment_label(), "unfulfilled");
    }

    #[test]
    fn total_falls_back_to_line_items() {
        let raw = r#"{"id": "o1", "lineItems": [
                        {"title": "A", "quantity": 2, "price": "5.25"},
                        {"title": "B", "quantity": 1, "price": 3}
                     ]}"#;
        let order: Order = serde_json::from_str(raw).unwrap();
        assert_eq!(order.total_cents(), 1350);
        assert_eq!(order.first_shipping_title(), None);
    }

    #[test]
    fn parse_cents_handles_common_shapes() {
        assert_eq!(parse_cents("12.5"), 1250);
        assert_eq!(parse_cents("$1,024.07"), 102407);
        assert_eq!(parse_cents("3"), 300);
        assert_eq!(parse_cents("-4.10"), -410);
        assert_eq!(parse_cents("garbage"), 0);
    }

    #[test]
    fn reship_body_uses_snake_case_variant() {
        let item = LineItem {
            id: Some(WireId::Num(11)),
            title: "Feeder".into(),
            quantity: 1,
            price: Some("20.00".into()),
            sku: Some("FD-1".into()),
            variant_id: Some(WireId::Num(44_012_345_678_901)),
        };
        let body = ReshipRequest {
            line_items: vec![ReshipLineItem::from(&item)],
            shipping_method: "Standard".into(),
            reason: IssueReason::WrongItem,
            notes: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["lineItems"][0]["variant_id"], 44_012_345_678_901_u64);
        assert_eq!(json["shippingMethod"], "Standard");
        assert_eq!(json["reason"], "wrong_item");
        assert!(json.get("notes").is_none());
    }

    #[test]
    fn line_item_ids_keep_their_json_type() {
        let raw = r#"{"id": 123456789012, "title": "Feeder", "variantId": "gid-7"}"#;
        let item: LineItem = serde_json::from_str(raw).unwrap();
        assert_eq!(item.id, Some(WireId::Num(123_456_789_012)));
        assert_eq!(item.variant_id, Some(WireId::Str("gid-7".into())));
        assert_eq!(item.id.as_ref().map(ToString::to_string).as_deref(), Some("123456789012"));

        let back = serde_json::to_value(ReshipLineItem::from(&item)).unwrap();
        assert_eq!(back["variant_id"], "gid-7");

        let bare: LineItem = serde_json::from_str(r#"{"title": "X", "id": null}"#).unwrap();
        assert_eq!(bare.id, None);
    }
}
