use yew::prelude::*;
use web_sys::HtmlInputElement;

use super::{error_banner, spinner};
use crate::models::Customer;
use crate::services::ApiClient;
use crate::utils::initial;
use crate::viewmodels::validate_search;

#[derive(Properties, PartialEq)]
pub struct SearchProps {
    pub api: ApiClient,
    pub on_select: Callback<Customer>,
}

#[derive(Clone, PartialEq)]
enum Results {
    /// Aún no se ha buscado nada
    Idle,
    Searching,
    Found(Vec<Customer>),
    Failed(String),
}

#[function_component(Search)]
pub fn search(props: &SearchProps) -> Html {
    let query = use_state(String::new);
    let results = use_state(|| Results::Idle);

    let on_input = {
        let query = query.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            query.set(input.value());
        })
    };

    let on_submit = {
        let api = props.api.clone();
        let query = query.clone();
        let results = results.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *results == Results::Searching {
                return;
            }
            let Ok(q) = validate_search(&query) else {
                return;
            };
            results.set(Results::Searching);
            let api = api.clone();
            let results = results.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api.search_customers(&q).await {
                    Ok(customers) => {
                        log::info!("🔍 [SEARCH] '{}': {} resultados", q, customers.len());
                        results.set(Results::Found(customers));
                    }
                    Err(e) => {
                        log::error!("❌ [SEARCH] {}", e);
                        results.set(Results::Failed(e.user_message("Search failed")));
                    }
                }
            });
        })
    };

    let body = match &*results {
        Results::Idle => html! {
            <div class="empty-state">
                <div class="empty-icon">{"🔍"}</div>
                <p>{"Search for a customer to resolve an issue"}</p>
            </div>
        },
        Results::Searching => spinner(),
        Results::Failed(message) => error_banner(message),
        Results::Found(customers) if customers.is_empty() => html! {
            <div class="empty-state"><p>{"No results"}</p></div>
        },
        Results::Found(customers) => html! {
            <ul class="customer-list">
                { for customers.iter().map(|customer| {
                    let onclick = {
                        let on_select = props.on_select.clone();
                        let customer = customer.clone();
                        Callback::from(move |_: MouseEvent| on_select.emit(customer.clone()))
                    };
                    html! {
                        <li class="customer-row" {onclick}>
                            <div class="avatar">{initial(customer.display_name())}</div>
                            <div class="customer-main">
                                <div class="customer-name">{customer.display_name()}</div>
                                <div class="customer-contact">
                                    {customer.email.clone().or_else(|| customer.phone.clone()).unwrap_or_default()}
                                </div>
                            </div>
                            <div class="customer-orders">{format!("{} orders", customer.orders_count())}</div>
                        </li>
                    }
                }) }
            </ul>
        },
    };

    html! {
        <div class="search-screen">
            <header class="screen-header"><h2>{"Resolve"}</h2></header>
            <form class="search-form" onsubmit={on_submit}>
                <input
                    type="search"
                    placeholder="Name, email, phone, or order #"
                    value={(*query).clone()}
                    oninput={on_input}
                />
                <button type="submit" class="btn-primary">{"Search"}</button>
            </form>
            { body }
        </div>
    }
}
