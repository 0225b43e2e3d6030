use yew::prelude::*;
use web_sys::HtmlInputElement;

use crate::models::Session;
use crate::services::ApiClient;
use crate::viewmodels::LoginForm;

#[derive(Properties, PartialEq)]
pub struct LoginScreenProps {
    pub api: ApiClient,
}

#[function_component(LoginScreen)]
pub fn login_screen(props: &LoginScreenProps) -> Html {
    let email_ref = use_node_ref();
    let password_ref = use_node_ref();
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let on_submit = {
        let email_ref = email_ref.clone();
        let password_ref = password_ref.clone();
        let error = error.clone();
        let loading = loading.clone();
        let api = props.api.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *loading {
                return;
            }

            let (Some(email_input), Some(password_input)) = (
                email_ref.cast::<HtmlInputElement>(),
                password_ref.cast::<HtmlInputElement>(),
            ) else {
                return;
            };

            let form = LoginForm {
                email: email_input.value(),
                password: password_input.value(),
            };
            let request = match form.request() {
                Ok(request) => request,
                Err(e) => {
                    error.set(Some(e.to_string()));
                    return;
                }
            };

            error.set(None);
            loading.set(true);

            let api = api.clone();
            let error = error.clone();
            let loading = loading.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api.login(&request.email, &request.password).await {
                    Ok(response) => {
                        if let Err(e) = api.auth().establish(Session::from(response)) {
                            log::error!("❌ [LOGIN] No se pudo persistir la sesión: {}", e);
                            error.set(Some("Could not save session".to_string()));
                        }
                    }
                    Err(e) => {
                        log::warn!("⚠️ [LOGIN] {}", e);
                        error.set(Some(e.user_message("Login failed")));
                    }
                }
                loading.set(false);
            });
        })
    };

    html! {
        <div class="login-screen">
            <div class="login-container">
                <div class="login-header">
                    <div class="login-logo">
                        <div class="logo-icon">{"🎧"}</div>
                    </div>
                    <h1>{"SupportBase"}</h1>
                    <p>{"Customer support console"}</p>
                </div>

                <form class="login-form" onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="email">{"Email"}</label>
                        <input
                            type="email"
                            id="email"
                            name="email"
                            placeholder="you@company.com"
                            autocomplete="username"
                            ref={email_ref}
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">{"Password"}</label>
                        <input
                            type="password"
                            id="password"
                            name="password"
                            placeholder="Password"
                            autocomplete="current-password"
                            ref={password_ref}
                        />
                    </div>

                    if let Some(message) = (*error).clone() {
                        <div class="login-error">{message}</div>
                    }

                    <button type="submit" class="btn-login" disabled={*loading}>
                        <span class="btn-text">
                            { if *loading { "Signing in..." } else { "Sign In" } }
                        </span>
                    </button>
                </form>
            </div>
        </div>
    }
}
