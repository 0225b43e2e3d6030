// ============================================================================
// TICKET DETAIL
// ============================================================================
// Conversación, cambios de estado, respuesta del agente y acceso a los
// pedidos del cliente en Shopify.
// ============================================================================

use yew::prelude::*;
use web_sys::HtmlTextAreaElement;

use super::{back_header, error_banner, spinner};
use crate::models::{Customer, SenderType, Ticket, TicketStatus, TicketUpdate};
use crate::services::{ApiClient, ApiError};
use crate::utils::{browser, humanize, time_ago};
use crate::viewmodels::ticket::{validate_reply, CustomerLookup, CUSTOMER_LOAD_FAILED, CUSTOMER_NOT_FOUND};

#[derive(Properties, PartialEq)]
pub struct TicketDetailProps {
    pub api: ApiClient,
    pub ticket_id: String,
    pub on_back: Callback<()>,
    pub on_open_customer: Callback<Customer>,
}

#[derive(Clone, PartialEq)]
enum Load {
    Loading,
    Ready(Ticket),
    Failed(String),
}

async fn find_customer(api: &ApiClient, lookup: CustomerLookup) -> Result<Option<Customer>, ApiError> {
    match lookup {
        CustomerLookup::ById(id) => api.get_customer(&id).await,
        CustomerLookup::ByPhone(query) | CustomerLookup::ByEmail(query) => {
            Ok(api.search_customers(&query).await?.into_iter().next())
        }
        CustomerLookup::Unavailable => Ok(None),
    }
}

#[function_component(TicketDetail)]
pub fn ticket_detail(props: &TicketDetailProps) -> Html {
    let load = use_state(|| Load::Loading);
    let reload = use_state(|| 0u32);
    let reply = use_state(String::new);
    let sending = use_state(|| false);
    let looking_up = use_state(|| false);

    {
        let api = props.api.clone();
        let load = load.clone();
        use_effect_with((props.ticket_id.clone(), *reload), move |(id, _)| {
            let id = id.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api.get_ticket(&id).await {
                    Ok(ticket) => load.set(Load::Ready(ticket)),
                    Err(e) => {
                        log::error!("❌ [TICKET] {}: {}", id, e);
                        load.set(Load::Failed(e.user_message("Failed to load ticket")));
                    }
                }
            });
            || ()
        });
    }

    let set_status = {
        let api = props.api.clone();
        let id = props.ticket_id.clone();
        let reload = reload.clone();
        Callback::from(move |status: TicketStatus| {
            let api = api.clone();
            let id = id.clone();
            let reload = reload.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api.update_ticket(&id, &TicketUpdate::status(status)).await {
                    Ok(()) => reload.set(*reload + 1),
                    Err(e) => browser::alert(&e.user_message("Failed to update status")),
                }
            });
        })
    };

    let on_reply_input = {
        let reply = reply.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            reply.set(input.value());
        })
    };

    let on_send = {
        let api = props.api.clone();
        let id = props.ticket_id.clone();
        let reply = reply.clone();
        let sending = sending.clone();
        let reload = reload.clone();
        Callback::from(move |_: MouseEvent| {
            let Ok(body) = validate_reply(&reply, *sending) else {
                return;
            };
            sending.set(true);
            let api = api.clone();
            let id = id.clone();
            let reply = reply.clone();
            let sending = sending.clone();
            let reload = reload.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api.add_ticket_message(&id, &body).await {
                    Ok(()) => {
                        reply.set(String::new());
                        reload.set(*reload + 1);
                    }
                    Err(e) => browser::alert(&e.user_message("Failed to send")),
                }
                sending.set(false);
            });
        })
    };

    let on_view_orders = {
        let api = props.api.clone();
        let load = load.clone();
        let looking_up = looking_up.clone();
        let on_open_customer = props.on_open_customer.clone();
        Callback::from(move |_: MouseEvent| {
            let Load::Ready(ticket) = &*load else {
                return;
            };
            if *looking_up {
                return;
            }
            let lookup = CustomerLookup::for_ticket(ticket);
            if lookup == CustomerLookup::Unavailable {
                browser::alert(CUSTOMER_NOT_FOUND);
                return;
            }
            looking_up.set(true);
            let api = api.clone();
            let looking_up = looking_up.clone();
            let on_open_customer = on_open_customer.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match find_customer(&api, lookup).await {
                    Ok(Some(customer)) => on_open_customer.emit(customer),
                    Ok(None) => browser::alert(CUSTOMER_NOT_FOUND),
                    Err(e) => {
                        log::error!("❌ [TICKET] Búsqueda de cliente: {}", e);
                        browser::alert(&e.user_message(CUSTOMER_LOAD_FAILED));
                    }
                }
                looking_up.set(false);
            });
        })
    };

    let ticket = match &*load {
        Load::Loading => {
            return html! {
                <div class="ticket-screen">
                    { back_header("Ticket", props.on_back.clone()) }
                    { spinner() }
                </div>
            }
        }
        Load::Failed(message) => {
            return html! {
                <div class="ticket-screen">
                    { back_header("Ticket", props.on_back.clone()) }
                    { error_banner(message) }
                </div>
            }
        }
        Load::Ready(ticket) => ticket,
    };

    let now = chrono::Utc::now();
    let can_send = !*sending && !reply.trim().is_empty();

    html! {
        <div class="ticket-screen">
            { back_header(ticket.customer_label(), props.on_back.clone()) }

            <section class="contact-card">
                <span class={classes!("channel-badge", ticket.channel.as_str())}>{ticket.channel.as_str()}</span>
                if let Some(subject) = &ticket.subject {
                    <h3>{subject.clone()}</h3>
                }
                if let Some(email) = &ticket.customer_email {
                    <div class="contact-row">{"✉️ "}{email.clone()}</div>
                }
                if let Some(phone) = &ticket.customer_phone {
                    <div class="contact-row">{"📞 "}{phone.clone()}</div>
                }
                <button class="btn-secondary" onclick={on_view_orders} disabled={*looking_up}>
                    { if *looking_up { "Looking up..." } else { "View Orders" } }
                </button>
            </section>

            <section class="status-row">
                { for TicketStatus::ALL.iter().map(|status| {
                    let status = *status;
                    let active = ticket.status == status;
                    let onclick = set_status.reform(move |_: MouseEvent| status);
                    html! {
                        <button class={classes!("status-btn", status.as_str(), active.then_some("active"))} {onclick}>
                            {humanize(status.as_str())}
                        </button>
                    }
                }) }
            </section>

            if ticket.status == TicketStatus::Resolved {
                if let Some(resolution) = &ticket.resolution_type {
                    <section class="resolution-summary">
                        <strong>{"Resolved: "}</strong>{humanize(resolution)}
                        if let Some(reason) = &ticket.resolution_reason {
                            <span class="resolution-reason">{format!(" ({})", humanize(reason))}</span>
                        }
                    </section>
                }
            }

            <section class="messages">
                { for ticket.messages.iter().map(|message| {
                    let class = match message.sender_type {
                        SenderType::Agent => "message agent",
                        SenderType::Customer => "message customer",
                        SenderType::System => "message system",
                    };
                    let age = message.created_at.as_deref().map(|t| time_ago(t, now)).unwrap_or_default();
                    html! {
                        <div {class}>
                            <div class="message-meta">
                                <span>{message.sender_label()}</span>
                                <span>{age}</span>
                            </div>
                            <div class="message-body">{message.body.clone()}</div>
                        </div>
                    }
                }) }
            </section>

            <footer class="composer">
                <textarea
                    placeholder="Type a reply..."
                    value={(*reply).clone()}
                    oninput={on_reply_input}
                    disabled={*sending}
                />
                <button class="btn-send" onclick={on_send} disabled={!can_send}>
                    { if *sending { "..." } else { "Send" } }
                </button>
            </footer>
        </div>
    }
}
