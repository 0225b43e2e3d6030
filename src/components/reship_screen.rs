use yew::prelude::*;
use web_sys::{HtmlSelectElement, HtmlTextAreaElement};

use super::back_header;
use crate::models::{Customer, IssueReason, Order};
use crate::services::ApiClient;
use crate::utils::{browser, money_cents, SHIP_METHODS};
use crate::viewmodels::ReshipForm;

#[derive(Properties, PartialEq)]
pub struct ReshipScreenProps {
    pub api: ApiClient,
    pub order: Order,
    pub customer: Customer,
    pub on_back: Callback<()>,
    pub on_done: Callback<()>,
}

/// Resumen que se muestra tras crear el reship
#[derive(Clone, PartialEq)]
struct ReshipDone {
    new_order: String,
    items: usize,
    shipping: String,
    reason: IssueReason,
}

#[function_component(ReshipScreen)]
pub fn reship_screen(props: &ReshipScreenProps) -> Html {
    let form = use_state(|| ReshipForm::new(props.order.clone()));
    let submitting = use_state(|| false);
    let done = use_state(|| None::<ReshipDone>);

    let update = {
        let form = form.clone();
        move |f: Box<dyn Fn(&mut ReshipForm)>| {
            let mut next = (*form).clone();
            f(&mut next);
            form.set(next);
        }
    };

    let on_submit = {
        let api = props.api.clone();
        let form = form.clone();
        let submitting = submitting.clone();
        let done = done.clone();
        Callback::from(move |_: MouseEvent| {
            if *submitting {
                return;
            }
            let request = match form.request() {
                Ok(request) => request,
                Err(e) => {
                    browser::alert(&e.to_string());
                    return;
                }
            };
            if !browser::confirm(&form.confirm_message()) {
                return;
            }
            submitting.set(true);

            let api = api.clone();
            let order_id = form.order.id.clone();
            let submitting = submitting.clone();
            let done = done.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api.create_reship(&order_id, &request).await {
                    Ok(response) => {
                        let new_order = response
                            .reship
                            .and_then(|r| r.new_order_name)
                            .unwrap_or_else(|| "New Order".to_string());
                        log::info!("📦 [RESHIP] {} creado desde {}", new_order, order_id);
                        done.set(Some(ReshipDone {
                            new_order,
                            items: request.line_items.len(),
                            shipping: request.shipping_method.clone(),
                            reason: request.reason,
                        }));
                    }
                    Err(e) => {
                        log::error!("❌ [RESHIP] {}", e);
                        browser::alert(&e.user_message("Reship failed"));
                    }
                }
                submitting.set(false);
            });
        })
    };

    if let Some(result) = &*done {
        return html! {
            <div class="result-screen">
                <div class="result-icon">{"📦"}</div>
                <h2>{"Reship Created"}</h2>
                <p class="result-headline">{result.new_order.clone()}</p>
                <dl class="summary">
                    <dt>{"Original"}</dt><dd>{props.order.name.clone()}</dd>
                    <dt>{"New Order"}</dt><dd>{result.new_order.clone()}</dd>
                    <dt>{"Items"}</dt><dd>{result.items.to_string()}</dd>
                    <dt>{"Shipping"}</dt><dd>{result.shipping.clone()}</dd>
                    <dt>{"Reason"}</dt><dd>{result.reason.label()}</dd>
                </dl>
                <button class="btn-primary" onclick={props.on_done.reform(|_| ())}>{"Done"}</button>
            </div>
        };
    }

    let on_ship = {
        let update = update.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let method = select.value();
            update(Box::new(move |f| f.shipping_method = method.clone()));
        })
    };
    let on_notes = {
        let update = update.clone();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            let notes = area.value();
            update(Box::new(move |f| f.notes = notes.clone()));
        })
    };

    html! {
        <div class="form-screen reship-screen">
            { back_header(&format!("Reship {}", props.order.name), props.on_back.clone()) }
            <p class="form-subtitle">{props.customer.display_name()}</p>

            <section class="form-section">
                <h4>{"Items"}</h4>
                { for form.order.line_items.iter().enumerate().map(|(index, item)| {
                    let checked = form.selected.get(index).copied().unwrap_or(false);
                    let onclick = {
                        let update = update.clone();
                        Callback::from(move |_: MouseEvent| update(Box::new(move |f| f.toggle(index))))
                    };
                    html! {
                        <label class={classes!("item-row", checked.then_some("selected"))}>
                            <input type="checkbox" {checked} {onclick} />
                            <span>{format!("{} × {}", item.quantity, item.title)}</span>
                            <span class="item-price">{money_cents(item.line_total_cents())}</span>
                        </label>
                    }
                }) }
            </section>

            <section class="form-section">
                <h4>{"Shipping"}</h4>
                <select onchange={on_ship}>
                    { for SHIP_METHODS.iter().map(|method| html! {
                        <option value={*method} selected={form.shipping_method == *method}>{*method}</option>
                    }) }
                    if !SHIP_METHODS.contains(&form.shipping_method.as_str()) {
                        <option value={form.shipping_method.clone()} selected=true>{form.shipping_method.clone()}</option>
                    }
                </select>
            </section>

            <section class="form-section">
                <h4>{"Reason"}</h4>
                <div class="chip-row wrap">
                    { for IssueReason::ALL.iter().map(|reason| {
                        let reason = *reason;
                        let active = form.reason == Some(reason);
                        let onclick = {
                            let update = update.clone();
                            Callback::from(move |_: MouseEvent| update(Box::new(move |f| f.reason = Some(reason))))
                        };
                        html! {
                            <button class={classes!("chip", active.then_some("active"))} {onclick}>{reason.label()}</button>
                        }
                    }) }
                </div>
            </section>

            <section class="form-section">
                <h4>{"Notes"}</h4>
                <textarea placeholder="Optional notes" value={form.notes.clone()} oninput={on_notes} />
            </section>

            <button
                class="btn-primary btn-block"
                onclick={on_submit}
                disabled={*submitting || !form.can_submit()}
            >
                { if *submitting { "Creating...".to_string() } else { format!("Create Reship ({})", form.selected_count()) } }
            </button>
        </div>
    }
}
