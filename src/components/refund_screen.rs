use yew::prelude::*;
use web_sys::HtmlTextAreaElement;

use super::back_header;
use crate::models::{Customer, IssueReason, Order};
use crate::services::ApiClient;
use crate::utils::{browser, money_cents, money_str};
use crate::viewmodels::RefundForm;

#[derive(Properties, PartialEq)]
pub struct RefundScreenProps {
    pub api: ApiClient,
    pub order: Order,
    pub customer: Customer,
    pub on_back: Callback<()>,
    pub on_done: Callback<()>,
}

#[derive(Clone, PartialEq)]
struct RefundDone {
    amount: String,
}

#[function_component(RefundScreen)]
pub fn refund_screen(props: &RefundScreenProps) -> Html {
    let form = use_state(|| RefundForm::new(props.order.clone()));
    let submitting = use_state(|| false);
    let done = use_state(|| None::<RefundDone>);

    let update = {
        let form = form.clone();
        move |f: Box<dyn Fn(&mut RefundForm)>| {
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
            let computed = money_cents(form.total_cents());
            let submitting = submitting.clone();
            let done = done.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api.create_refund(&order_id, &request).await {
                    Ok(response) => {
                        let amount = response
                            .refund
                            .and_then(|r| r.amount)
                            .map(|a| money_str(&a))
                            .unwrap_or(computed);
                        log::info!("💳 [REFUND] {} reembolsado en {}", amount, order_id);
                        done.set(Some(RefundDone { amount }));
                    }
                    Err(e) => {
                        log::error!("❌ [REFUND] {}", e);
                        browser::alert(&e.user_message("Refund failed"));
                    }
                }
                submitting.set(false);
            });
        })
    };

    if let Some(result) = &*done {
        return html! {
            <div class="result-screen">
                <div class="result-icon">{"💳"}</div>
                <h2>{"Refund Processed"}</h2>
                <p class="result-headline">{result.amount.clone()}</p>
                <p class="result-note">{"Refund appears in 5-10 business days."}</p>
                <button class="btn-primary" onclick={props.on_done.reform(|_| ())}>{"Done"}</button>
            </div>
        };
    }

    let set_full = |full: bool| {
        let update = update.clone();
        Callback::from(move |_: MouseEvent| update(Box::new(move |f| f.full = full)))
    };
    let on_notes = {
        let update = update.clone();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            let notes = area.value();
            update(Box::new(move |f| f.notes = notes.clone()))
        })
    };

    html! {
        <div class="form-screen refund-screen">
            { back_header(&format!("Refund {}", props.order.name), props.on_back.clone()) }
            <p class="form-subtitle">{props.customer.display_name()}</p>

            <section class="form-section">
                <div class="segmented">
                    <button class={classes!("segment", form.full.then_some("active"))} onclick={set_full(true)}>
                        {"Full Refund"}
                    </button>
                    <button class={classes!("segment", (!form.full).then_some("active"))} onclick={set_full(false)}>
                        {"Partial"}
                    </button>
                </div>
            </section>

            if !form.full {
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
            }

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

            <div class="refund-total">
                <span>{"Total"}</span>
                <strong>{money_cents(form.total_cents())}</strong>
            </div>

            <button
                class="btn-danger btn-block"
                onclick={on_submit}
                disabled={*submitting || !form.can_submit()}
            >
                { if *submitting { "Processing..." } else { "Issue Refund" } }
            </button>
        </div>
    }
}
