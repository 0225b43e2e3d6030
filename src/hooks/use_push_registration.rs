use yew::prelude::*;

use crate::config::CONFIG;
use crate::services::{ApiClient, PushRegistrar};

/// Registra push una vez por token: espera `bootstrap_delay_ms` si la sesión
/// venía restaurada del almacenamiento y `login_delay_ms` tras un login.
#[hook]
pub fn use_push_registration(api: &ApiClient, token: Option<String>) {
    let registrar = use_memo(api.clone(), |api| PushRegistrar::new(api.clone()));
    let restored_token = use_memo((), {
        let token = token.clone();
        move |_| token
    });

    use_effect_with(token, move |token| {
        if let Some(token) = token {
            let restored = restored_token.as_deref() == Some(token.as_str());
            let delay = CONFIG.push.registration_delay_ms(restored);
            log::debug!("🔔 [PUSH] Registro programado en {} ms", delay);
            registrar.schedule(delay);
        }
        || ()
    });
}
