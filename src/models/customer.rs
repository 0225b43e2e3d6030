use serde::{Deserialize, Serialize};
use super::de;

/// Cliente (Shopify). También se usa como resumen dentro de IncomingEvent,
/// donde el id puede faltar (queda vacío).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default, deserialize_with = "de::string_or_number_or_empty")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub orders_count: Option<u32>,
    #[serde(default, deserialize_with = "de::opt_string_or_number")]
    pub total_spent: Option<String>,
}

impl Customer {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("Unknown")
    }

    pub fn has_id(&self) -> bool {
        !self.id.trim().is_empty()
    }

    pub fn orders_count(&self) -> u32 {
        self.orders_count.unwrap_or(0)
    }

    pub fn total_spent(&self) -> &str {
        self.total_spent.as_deref().unwrap_or("0.00")
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct CustomersResponse {
    #[serde(default)]
    pub customers: Vec<Customer>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CustomerResponse {
    pub customer: Option<Customer>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_fields_are_optional() {
        let customer: Customer = serde_json::from_str(r#"{"id": 991}"#).unwrap();
        assert_eq!(customer.display_name(), "Unknown");
        assert_eq!(customer.orders_count(), 0);
        assert_eq!(customer.total_spent(), "0.00");
        assert!(customer.has_id());
    }

    #[test]
    fn total_spent_accepts_numbers() {
        let customer: Customer =
            serde_json::from_str(r#"{"id": "c1", "name": "Ann", "ordersCount": 3, "totalSpent": 120.5}"#).unwrap();
        assert_eq!(customer.display_name(), "Ann");
        assert_eq!(customer.orders_count(), 3);
        assert_eq!(customer.total_spent(), "120.5");
    }
}
