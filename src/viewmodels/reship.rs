use super::{optional_notes, FormError};
use crate::models::order::{ReshipLineItem, ReshipRequest};
use crate::models::{IssueReason, Order};
use crate::utils::DEFAULT_SHIP_METHOD;

/// Formulario de reship: líneas seleccionables, envío, motivo y notas
#[derive(Debug, Clone, PartialEq)]
pub struct ReshipForm {
    pub order: Order,
    pub selected: Vec<bool>,
    pub shipping_method: String,
    pub reason: Option<IssueReason>,
    pub notes: String,
}

impl ReshipForm {
    /// Todas las líneas seleccionadas; envío del pedido o "Standard"
    pub fn new(order: Order) -> Self {
        let shipping_method = order
            .first_shipping_title()
            .unwrap_or(DEFAULT_SHIP_METHOD)
            .to_string();
        Self {
            selected: vec![true; order.line_items.len()],
            order,
            shipping_method,
            reason: None,
            notes: String::new(),
        }
    }

    pub fn toggle(&mut self, index: usize) {
        if let Some(flag) = self.selected.get_mut(index) {
            *flag = !*flag;
        }
    }

    pub fn selected_count(&self) -> usize {
        self.selected.iter().filter(|s| **s).count()
    }

    pub fn can_submit(&self) -> bool {
        self.reason.is_some() && self.selected_count() > 0
    }

    pub fn confirm_message(&self) -> String {
        format!(
            "Reship {} item(s) for {}?\nThis creates a new $0 order in Shopify.",
            self.selected_count(),
            self.order.name
        )
    }

    pub fn request(&self) -> Result<ReshipRequest, FormError> {
        let reason = self.reason.ok_or(FormError::MissingReason)?;
        let line_items: Vec<ReshipLineItem> = self
            .order
            .line_items
            .iter()
            .zip(&self.selected)
            .filter(|(_, selected)| **selected)
            .map(|(item, _)| ReshipLineItem::from(item))
            .collect();
        if line_items.is_empty() {
            return Err(FormError::NoItemsSelected);
        }
        Ok(ReshipRequest {
            line_items,
            shipping_method: self.shipping_method.clone(),
            reason,
            notes: optional_notes(&self.notes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(json: &str) -> Order {
        serde_json::from_str(json).unwrap()
    }

    const TWO_ITEMS: &str = r##"{"id": 1001, "name": "#1001",
        "lineItems": [
            {"id": 1, "title": "Feeder", "quantity": 1, "price": "20.00", "sku": "FD", "variantId": 11},
            {"id": 2, "title": "Seed", "quantity": 3, "price": "4.50", "sku": "SD", "variantId": 22}
        ],
        "shippingLines": [{"title": "UPS Ground"}]}"##;

    #[test]
    fn defaults_come_from_order() {
        let form = ReshipForm::new(order(TWO_ITEMS));
        assert_eq!(form.selected_count(), 2);
        assert_eq!(form.shipping_method, "UPS Ground");

        let bare = ReshipForm::new(order(r##"{"id": 1, "name": "#1"}"##));
        assert_eq!(bare.shipping_method, "Standard");
    }

    #[test]
    fn reason_and_items_are_required() {
        let mut form = ReshipForm::new(order(TWO_ITEMS));
        assert!(!form.can_submit());
        assert_eq!(form.request(), Err(FormError::MissingReason));

        form.reason = Some(IssueReason::Damaged);
        form.toggle(0);
        form.toggle(1);
        assert!(!form.can_submit());
        assert_eq!(form.request(), Err(FormError::NoItemsSelected));
    }

    #[test]
    fn request_body_contains_selected_items_only() {
        let mut form = ReshipForm::new(order(TWO_ITEMS));
        form.toggle(0);
        form.reason = Some(IssueReason::Missing);
        form.notes = "  left at door ".into();
        assert_eq!(form.confirm_message(), "Reship 1 item(s) for #1001?\nThis creates a new $0 order in Shopify.");

        let body = serde_json::to_value(form.request().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "lineItems": [{"title": "Seed", "quantity": 3, "price": "4.50", "sku": "SD", "variant_id": 22}],
                "shippingMethod": "UPS Ground",
                "reason": "missing",
                "notes": "left at door"
            })
        );
    }

    #[test]
    fn toggle_out_of_range_is_ignored() {
        let mut form = ReshipForm::new(order(TWO_ITEMS));
        form.toggle(9);
        assert_eq!(form.selected_count(), 2);
    }
}
