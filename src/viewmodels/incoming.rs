use super::NavAction;
use crate::models::{IncomingEvent, Order};

/// Evento entrante activo: como mucho uno, y uno nuevo reemplaza al anterior
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncomingSlot {
    active: Option<IncomingEvent>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum IncomingAction {
    Dismiss,
    OpenTicket,
    Reship(Order),
    Refund(Order),
}

impl IncomingSlot {
    pub fn active(&self) -> Option<&IncomingEvent> {
        self.active.as_ref()
    }

    pub fn receive(&mut self, event: IncomingEvent) {
        self.active = Some(event);
    }

    pub fn dismiss(&mut self) {
        self.active = None;
    }

    /// Toda acción descarta el evento; devuelve la navegación asociada
    pub fn act(&mut self, action: IncomingAction) -> Option<NavAction> {
        let event = self.active.take()?;
        match action {
            IncomingAction::Dismiss => None,
            IncomingAction::OpenTicket => event.ticket_id.map(NavAction::OpenTicket),
            IncomingAction::Reship(order) => event
                .customer
                .map(|customer| NavAction::PopupReship { order, customer }),
            IncomingAction::Refund(order) => event
                .customer
                .map(|customer| NavAction::PopupRefund { order, customer }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewmodels::navigation::{NavState, Screen};

    fn event(json: &str) -> IncomingEvent {
        IncomingEvent::parse(json).unwrap()
    }

    #[test]
    fn newer_event_replaces_active() {
        let mut slot = IncomingSlot::default();
        slot.receive(event(r#"{"type":"incoming_call","phone":"+1"}"#));
        slot.receive(event(r#"{"type":"incoming_text","phone":"+2"}"#));
        assert_eq!(slot.active().map(|e| e.phone.as_str()), Some("+2"));
        slot.dismiss();
        assert!(slot.active().is_none());
    }

    #[test]
    fn call_without_customer_has_no_order_actions() {
        let mut slot = IncomingSlot::default();
        slot.receive(event(r#"{"type":"incoming_call","phone":"+15551234567"}"#));
        let active = slot.active().unwrap();
        assert!(!active.has_customer());
        assert_eq!(active.caller_label(), "Unknown Caller");

        let order: Order = serde_json::from_str(r##"{"id":1,"name":"#1"}"##).unwrap();
        assert_eq!(slot.act(IncomingAction::Reship(order)), None);
        assert!(slot.active().is_none());
    }

    #[test]
    fn popup_reship_navigates_with_popup_customer() {
        let mut slot = IncomingSlot::default();
        slot.receive(event(
            r##"{"type":"incoming_call","phone":"+1","customer":{"id":5,"name":"Ann"},
                "recentOrders":[{"id":9,"name":"#9","items":[{"title":"Seed","quantity":1}]}]}"##,
        ));
        let order = slot.active().unwrap().recent_orders[0].clone();
        let nav = slot.act(IncomingAction::Reship(order)).unwrap();
        assert!(slot.active().is_none());

        let state = NavState::default().apply(nav);
        assert!(matches!(&state.screen, Screen::Reship { customer, .. } if customer.display_name() == "Ann"));
    }

    #[test]
    fn open_ticket_uses_event_ticket() {
        let mut slot = IncomingSlot::default();
        slot.receive(event(r#"{"type":"incoming_text","phone":"+1","ticketId":"t42"}"#));
        assert!(matches!(slot.act(IncomingAction::OpenTicket), Some(NavAction::OpenTicket(id)) if id == "t42"));
        assert_eq!(slot.act(IncomingAction::Dismiss), None);
    }
}
