use yew::prelude::*;

use crate::models::{ResolutionReason, ResolutionType, Ticket, TicketUpdate};
use crate::services::ApiClient;
use crate::utils::browser;
use crate::viewmodels::{QuickResolve, ResolveStep};

#[derive(Properties, PartialEq)]
pub struct QuickResolveSheetProps {
    pub api: ApiClient,
    pub ticket: Ticket,
    pub on_done: Callback<()>,
    pub on_close: Callback<()>,
}

/// Hoja inferior: tipo de resolución y, si hace falta, motivo
#[function_component(QuickResolveSheet)]
pub fn quick_resolve_sheet(props: &QuickResolveSheetProps) -> Html {
    let sheet = use_state(QuickResolve::default);
    let submitting = use_state(|| false);

    let submit = {
        let api = props.api.clone();
        let id = props.ticket.id.clone();
        let on_done = props.on_done.clone();
        let submitting = submitting.clone();
        Callback::from(move |update: TicketUpdate| {
            if *submitting {
                return;
            }
            submitting.set(true);
            let api = api.clone();
            let id = id.clone();
            let on_done = on_done.clone();
            let submitting = submitting.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api.update_ticket(&id, &update).await {
                    Ok(()) => {
                        log::info!("✅ [RESOLVE] Ticket {} resuelto", id);
                        on_done.emit(());
                    }
                    Err(e) => {
                        log::error!("❌ [RESOLVE] {}", e);
                        browser::alert(&e.user_message("Failed to resolve"));
                    }
                }
                submitting.set(false);
            });
        })
    };

    let content = match sheet.step {
        ResolveStep::Type => html! {
            <>
                <h3>{"Resolve ticket"}</h3>
                <div class="option-list">
                    { for ResolutionType::ALL.iter().map(|resolution_type| {
                        let resolution_type = *resolution_type;
                        let onclick = {
                            let sheet = sheet.clone();
                            let submit = submit.clone();
                            Callback::from(move |_: MouseEvent| {
                                let mut next = (*sheet).clone();
                                match next.select_type(resolution_type) {
                                    Some(update) => submit.emit(update),
                                    None => sheet.set(next),
                                }
                            })
                        };
                        html! {
                            <button class="option" {onclick} disabled={*submitting}>
                                <span class="option-icon">{resolution_type.icon()}</span>
                                <span>{resolution_type.label()}</span>
                            </button>
                        }
                    }) }
                </div>
            </>
        },
        ResolveStep::Reason(resolution_type) => html! {
            <>
                <h3>{format!("{}: reason", resolution_type.label())}</h3>
                <div class="option-list">
                    { for ResolutionReason::ALL.iter().map(|reason| {
                        let reason = *reason;
                        let onclick = {
                            let sheet = sheet.clone();
                            let submit = submit.clone();
                            Callback::from(move |_: MouseEvent| {
                                if let Some(update) = sheet.select_reason(reason) {
                                    submit.emit(update);
                                }
                            })
                        };
                        html! {
                            <button class="option" {onclick} disabled={*submitting}>{reason.label()}</button>
                        }
                    }) }
                </div>
                <button class="btn-link" onclick={{
                    let sheet = sheet.clone();
                    Callback::from(move |_: MouseEvent| {
                        let mut next = (*sheet).clone();
                        next.back();
                        sheet.set(next);
                    })
                }}>{"‹ Back"}</button>
            </>
        },
    };

    html! {
        <div class="sheet-backdrop" onclick={props.on_close.reform(|_| ())}>
            <div class="sheet" onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}>
                <div class="sheet-handle"></div>
                <p class="sheet-subtitle">{props.ticket.customer_label()}</p>
                { content }
            </div>
        </div>
    }
}
