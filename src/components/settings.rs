use yew::prelude::*;

use crate::models::Session;
use crate::services::ApiClient;
use crate::utils::{browser, initial};

#[derive(Properties, PartialEq)]
pub struct SettingsProps {
    pub api: ApiClient,
    pub session: Session,
    pub on_logout: Callback<()>,
}

const CONNECTED_SERVICES: [(&str, &str); 2] = [("🛍️", "Shopify"), ("📞", "Quo Phone")];

#[function_component(Settings)]
pub fn settings(props: &SettingsProps) -> Html {
    let agent = &props.session.agent;
    let available = use_state(|| agent.is_available);

    // Optimista: se revierte si el servidor falla
    let on_toggle = {
        let api = props.api.clone();
        let available = available.clone();
        Callback::from(move |_: MouseEvent| {
            let previous = *available;
            let next = !previous;
            available.set(next);
            let api = api.clone();
            let available = available.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api.update_availability(next).await {
                    Ok(()) => {
                        if let Err(e) = api.auth().set_availability(next) {
                            log::warn!("⚠️ [SETTINGS] Disponibilidad no persistida: {}", e);
                        }
                    }
                    Err(e) => {
                        log::error!("❌ [SETTINGS] {}", e);
                        available.set(previous);
                        browser::alert(&e.user_message("Failed to update availability"));
                    }
                }
            });
        })
    };

    html! {
        <div class="settings-screen">
            <header class="screen-header"><h2>{"Settings"}</h2></header>

            <section class="profile-card">
                <div class="avatar large">{initial(&agent.name)}</div>
                <div class="profile-main">
                    <div class="profile-name">{agent.name.clone()}</div>
                    <div class="profile-email">{agent.email.clone()}</div>
                </div>
                <span class="role-badge">{agent.role.label()}</span>
            </section>

            <section class="settings-group">
                <div class="settings-row">
                    <div>
                        <div>{"Available"}</div>
                        <div class="muted">{"Receive notifications"}</div>
                    </div>
                    <button
                        class={classes!("toggle", (*available).then_some("on"))}
                        onclick={on_toggle}
                        aria-pressed={(*available).to_string()}
                    >
                        <span class="toggle-knob"></span>
                    </button>
                </div>
            </section>

            <section class="settings-group">
                <h4 class="group-title">{"CONNECTED SERVICES"}</h4>
                { for CONNECTED_SERVICES.iter().map(|(icon, name)| html! {
                    <div class="settings-row">
                        <span>{format!("{} {}", icon, name)}</span>
                        <span class="status-dot connected"></span>
                    </div>
                }) }
            </section>

            <button class="btn-danger btn-block" onclick={props.on_logout.reform(|_| ())}>{"Sign Out"}</button>
        </div>
    }
}
