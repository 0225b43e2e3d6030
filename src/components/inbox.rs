// ============================================================================
// INBOX
// ============================================================================
// Lista de tickets con filtro por canal y resolución rápida por fila.
// ============================================================================

use yew::prelude::*;

use super::{error_banner, spinner, QuickResolveSheet};
use crate::models::Ticket;
use crate::services::ApiClient;
use crate::utils::{humanize, time_ago, CHANNEL_FILTERS};

#[derive(Properties, PartialEq)]
pub struct InboxProps {
    pub api: ApiClient,
    pub on_open_ticket: Callback<String>,
    /// Botón "+": lleva a la búsqueda de clientes
    pub on_new: Callback<()>,
}

#[derive(Clone, PartialEq)]
enum Load {
    Loading,
    Ready(Vec<Ticket>),
    Failed(String),
}

#[function_component(Inbox)]
pub fn inbox(props: &InboxProps) -> Html {
    let filter = use_state(|| CHANNEL_FILTERS[0].to_string());
    let reload = use_state(|| 0u32);
    let load = use_state(|| Load::Loading);
    let resolving = use_state(|| None::<Ticket>);

    {
        let api = props.api.clone();
        let load = load.clone();
        use_effect_with(((*filter).clone(), *reload), move |(filter, _)| {
            let channel = (filter != "all").then(|| filter.clone());
            load.set(Load::Loading);
            wasm_bindgen_futures::spawn_local(async move {
                match api.list_tickets(channel.as_deref()).await {
                    Ok(tickets) => load.set(Load::Ready(tickets)),
                    Err(e) => {
                        log::error!("❌ [INBOX] {}", e);
                        load.set(Load::Failed(e.user_message("Failed to load tickets")));
                    }
                }
            });
            || ()
        });
    }

    let on_resolved = {
        let resolving = resolving.clone();
        let reload = reload.clone();
        Callback::from(move |_| {
            resolving.set(None);
            reload.set(*reload + 1);
        })
    };
    let on_close_sheet = {
        let resolving = resolving.clone();
        Callback::from(move |_| resolving.set(None))
    };

    let chips = CHANNEL_FILTERS.iter().map(|channel| {
        let active = *filter == *channel;
        let onclick = {
            let filter = filter.clone();
            let channel = channel.to_string();
            Callback::from(move |_: MouseEvent| filter.set(channel.clone()))
        };
        html! {
            <button class={classes!("chip", active.then_some("active"))} {onclick}>
                {humanize(channel)}
            </button>
        }
    });

    let now = chrono::Utc::now();
    let body = match &*load {
        Load::Loading => spinner(),
        Load::Failed(message) => error_banner(message),
        Load::Ready(tickets) if tickets.is_empty() => html! {
            <div class="empty-state">
                <div class="empty-icon">{"🎉"}</div>
                <h3>{"All clear"}</h3>
                <p>{"No tickets to show"}</p>
            </div>
        },
        Load::Ready(tickets) => html! {
            <ul class="ticket-list">
                { for tickets.iter().map(|ticket| {
                    let open = {
                        let on_open = props.on_open_ticket.clone();
                        let id = ticket.id.clone();
                        Callback::from(move |_: MouseEvent| on_open.emit(id.clone()))
                    };
                    let resolve = ticket.status.is_unresolved().then(|| {
                        let resolving = resolving.clone();
                        let ticket = ticket.clone();
                        Callback::from(move |e: MouseEvent| {
                            e.stop_propagation();
                            resolving.set(Some(ticket.clone()));
                        })
                    });
                    let age = ticket.updated_at.as_deref().map(|t| time_ago(t, now)).unwrap_or_default();
                    html! {
                        <li class="ticket-row" onclick={open}>
                            <span class={classes!("channel-dot", ticket.channel.as_str())}></span>
                            <div class="ticket-main">
                                <div class="ticket-top">
                                    <span class="ticket-customer">{ticket.customer_label()}</span>
                                    <span class="ticket-age">{age}</span>
                                </div>
                                <div class="ticket-subject">{ticket.subject.clone().unwrap_or_default()}</div>
                                <span class={classes!("status-badge", ticket.status.as_str())}>
                                    {humanize(ticket.status.as_str())}
                                </span>
                            </div>
                            if let Some(onclick) = resolve {
                                <button class="btn-resolve" {onclick}>{"Resolve"}</button>
                            }
                        </li>
                    }
                }) }
            </ul>
        },
    };

    html! {
        <div class="inbox-screen">
            <header class="screen-header">
                <h2>{"Inbox"}</h2>
                <button class="btn-icon" onclick={props.on_new.reform(|_| ())}>{"+"}</button>
            </header>
            <div class="chip-row">{ for chips }</div>
            { body }
            if let Some(ticket) = (*resolving).clone() {
                <QuickResolveSheet
                    api={props.api.clone()}
                    {ticket}
                    on_done={on_resolved}
                    on_close={on_close_sheet}
                />
            }
        </div>
    }
}
