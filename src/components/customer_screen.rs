// ============================================================================
// CUSTOMER
// ============================================================================
// Pedidos recientes del cliente con acciones de reship/refund por pedido.
// ============================================================================

use yew::prelude::*;

use super::{back_header, error_banner, spinner};
use crate::config::CONFIG;
use crate::models::{Customer, Order};
use crate::services::ApiClient;
use crate::utils::{humanize, initial, money_cents, money_str, short_date};

#[derive(Properties, PartialEq)]
pub struct CustomerScreenProps {
    pub api: ApiClient,
    pub customer: Customer,
    pub on_back: Callback<()>,
    pub on_reship: Callback<Order>,
    pub on_refund: Callback<Order>,
}

#[derive(Clone, PartialEq)]
enum Load {
    Loading,
    Ready(Vec<Order>),
    Failed(String),
}

#[function_component(CustomerScreen)]
pub fn customer_screen(props: &CustomerScreenProps) -> Html {
    let load = use_state(|| Load::Loading);

    {
        let api = props.api.clone();
        let load = load.clone();
        use_effect_with(props.customer.id.clone(), move |id| {
            let id = id.clone();
            // Resumen del popup sin id: no hay pedidos que pedir
            if id.trim().is_empty() {
                load.set(Load::Ready(Vec::new()));
            } else {
                load.set(Load::Loading);
                wasm_bindgen_futures::spawn_local(async move {
                    match api.customer_orders(&id, CONFIG.ui.customer_orders_limit).await {
                        Ok(orders) => load.set(Load::Ready(orders)),
                        Err(e) => {
                            log::error!("❌ [CUSTOMER] Pedidos de {}: {}", id, e);
                            load.set(Load::Failed(e.user_message("Failed to load orders")));
                        }
                    }
                });
            }
            || ()
        });
    }

    let customer = &props.customer;
    let orders = match &*load {
        Load::Loading => spinner(),
        Load::Failed(message) => error_banner(message),
        Load::Ready(orders) if orders.is_empty() => html! {
            <div class="empty-state"><p>{"No orders found"}</p></div>
        },
        Load::Ready(orders) => html! {
            { for orders.iter().map(|order| order_card(order, &props.on_reship, &props.on_refund)) }
        },
    };

    html! {
        <div class="customer-screen">
            { back_header(customer.display_name(), props.on_back.clone()) }
            <section class="customer-card">
                <div class="avatar large">{initial(customer.display_name())}</div>
                <h3>{customer.display_name()}</h3>
                if let Some(email) = &customer.email {
                    <div class="contact-row">{email.clone()}</div>
                }
                if let Some(phone) = &customer.phone {
                    <div class="contact-row">{phone.clone()}</div>
                }
                <div class="customer-stats">
                    <span>{format!("{} orders", customer.orders_count())}</span>
                    <span>{money_str(customer.total_spent())}</span>
                </div>
            </section>
            <section class="order-list">{ orders }</section>
        </div>
    }
}

fn order_card(order: &Order, on_reship: &Callback<Order>, on_refund: &Callback<Order>) -> Html {
    let reship = {
        let order = order.clone();
        on_reship.reform(move |_: MouseEvent| order.clone())
    };
    let refund = {
        let order = order.clone();
        on_refund.reform(move |_: MouseEvent| order.clone())
    };

    html! {
        <div class="order-card">
            <div class="order-header">
                <strong>{order.name.clone()}</strong>
                if let Some(created) = &order.created_at {
                    <span class="order-date">{short_date(created)}</span>
                }
                <span class={classes!("fulfillment-badge", order.fulfillment_label().to_string())}>
                    {humanize(order.fulfillment_label())}
                </span>
            </div>
            <ul class="line-items">
                { for order.line_items.iter().map(|item| html! {
                    <li>
                        <span>{format!("{} × {}", item.quantity, item.title)}</span>
                        <span>{money_cents(item.line_total_cents())}</span>
                    </li>
                }) }
            </ul>
            <div class="order-footer">
                <span class="order-total">{money_cents(order.total_cents())}</span>
                if let Some(tracking) = order.tracking() {
                    { tracking_link(tracking) }
                }
            </div>
            <div class="order-actions">
                <button class="btn-secondary" onclick={reship}>{"📦 Reship"}</button>
                <button class="btn-secondary" onclick={refund}>{"💳 Refund"}</button>
            </div>
        </div>
    }
}

fn tracking_link(tracking: &crate::models::Fulfillment) -> Html {
    let label = tracking
        .tracking_number
        .clone()
        .unwrap_or_else(|| "Tracking".to_string());
    match &tracking.tracking_url {
        Some(url) => html! {
            <a class="tracking-link" href={url.clone()} target="_blank" rel="noopener">{format!("🚚 {}", label)}</a>
        },
        None => html! { <span class="tracking-link">{format!("🚚 {}", label)}</span> },
    }
}
