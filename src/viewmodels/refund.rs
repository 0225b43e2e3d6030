use super::{optional_notes, FormError};
use crate::models::order::{RefundLineItem, RefundRequest};
use crate::models::{IssueReason, Order};
use crate::utils::money_cents;

/// Formulario de reembolso total (por defecto) o parcial
#[derive(Debug, Clone, PartialEq)]
pub struct RefundForm {
    pub order: Order,
    pub full: bool,
    pub selected: Vec<bool>,
    pub reason: Option<IssueReason>,
    pub notes: String,
}

impl RefundForm {
    pub fn new(order: Order) -> Self {
        Self {
            selected: vec![true; order.line_items.len()],
            order,
            full: true,
            reason: None,
            notes: String::new(),
        }
    }

    pub fn toggle(&mut self, index: usize) {
        if let Some(flag) = self.selected.get_mut(index) {
            *flag = !*flag;
        }
    }

    fn selected_items(&self) -> impl Iterator<Item = &crate::models::LineItem> {
        self.order
            .line_items
            .iter()
            .zip(&self.selected)
            .filter(|(_, selected)| **selected)
            .map(|(item, _)| item)
    }

    /// Total del pedido si es completo; suma precio × cantidad si es parcial
    pub fn total_cents(&self) -> i64 {
        if self.full {
            self.order.total_cents()
        } else {
            self.selected_items().map(|item| item.line_total_cents()).sum()
        }
    }

    pub fn can_submit(&self) -> bool {
        self.reason.is_some() && (self.full || self.selected_items().next().is_some())
    }

    pub fn confirm_message(&self) -> String {
        format!("Refund {} for {}?", money_cents(self.total_cents()), self.order.name)
    }

    pub fn request(&self) -> Result<RefundRequest, FormError> {
        let reason = self.reason.ok_or(FormError::MissingReason)?;
        let line_items = if self.full {
            None
        } else {
            let items: Vec<RefundLineItem> = self
                .selected_items()
                .map(|item| RefundLineItem {
                    line_item_id: item.id.clone(),
                    quantity: item.quantity,
                })
                .collect();
            if items.is_empty() {
                return Err(FormError::NoItemsSelected);
            }
            Some(items)
        };
        Ok(RefundRequest {
            full_refund: self.full,
            line_items,
            reason,
            notes: optional_notes(&self.notes),
        })
    }
}
