use yew::prelude::*;

use crate::models::{IncomingEvent, IncomingKind};
use crate::utils::money_cents;
use crate::viewmodels::IncomingAction;

#[derive(Properties, PartialEq)]
pub struct IncomingPopupProps {
    pub event: IncomingEvent,
    pub on_action: Callback<IncomingAction>,
}

/// Tarjeta superpuesta para una llamada o mensaje entrante
#[function_component(IncomingPopup)]
pub fn incoming_popup(props: &IncomingPopupProps) -> Html {
    let event = &props.event;
    let action = |a: IncomingAction| props.on_action.reform(move |_: MouseEvent| a.clone());

    let icon = match event.kind {
        IncomingKind::Call => "📞",
        _ => "💬",
    };

    html! {
        <div class="incoming-overlay">
            <div class="incoming-card">
                <div class="incoming-header">
                    <span class="incoming-icon">{icon}</span>
                    <div>
                        <div class="incoming-title">{event.kind.headline()}</div>
                        <div class="incoming-caller">{event.caller_label()}</div>
                        <div class="incoming-phone">{event.phone.clone()}</div>
                    </div>
                    <button class="btn-close" onclick={action(IncomingAction::Dismiss)}>{"✕"}</button>
                </div>

                if let Some(body) = &event.message_body {
                    <p class="incoming-message">{body.clone()}</p>
                }

                if event.has_customer() {
                    <div class="incoming-orders">
                        { for event.recent_orders.iter().map(|order| html! {
                            <div class="incoming-order">
                                <div class="incoming-order-main">
                                    <strong>{order.name.clone()}</strong>
                                    <span>{money_cents(order.total_cents())}</span>
                                </div>
                                <div class="incoming-order-actions">
                                    <button class="btn-secondary" onclick={action(IncomingAction::Reship(order.clone()))}>
                                        {"📦 Reship"}
                                    </button>
                                    <button class="btn-secondary" onclick={action(IncomingAction::Refund(order.clone()))}>
                                        {"💳 Refund"}
                                    </button>
                                </div>
                            </div>
                        }) }
                    </div>
                } else {
                    <p class="incoming-no-match">{"No matching customer"}</p>
                }

                if event.ticket_id.is_some() {
                    <button class="btn-primary btn-block" onclick={action(IncomingAction::OpenTicket)}>
                        {"Open Ticket"}
                    </button>
                }
            </div>
        </div>
    }
}
