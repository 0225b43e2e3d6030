// ============================================================================
// REGISTRO DE NOTIFICACIONES PUSH
// ============================================================================
// Best-effort: registra el service worker, crea la suscripción si no existe
// y la envía al backend. Cualquier fallo se loguea y se abandona.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Notification, PushSubscription, PushSubscriptionOptionsInit, ServiceWorkerRegistration};

use crate::config::CONFIG;
use crate::services::api_client::ApiClient;
use crate::services::error::PushError;
use crate::utils::browser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// Suscripción nueva creada y enviada
    Subscribed,
    /// Suscripción existente enviada para un token nuevo
    Forwarded,
    /// Ya enviada en esta sesión; solo se re-registró el worker
    AlreadyRegistered,
}

/// Clave VAPID en base64url → bytes. Acepta padding y el alfabeto estándar.
pub fn decode_vapid_key(key: &str) -> Result<Vec<u8>, PushError> {
    let normalized: String = key
        .trim()
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();
    if normalized.is_empty() {
        return Err(PushError::MissingKey);
    }
    URL_SAFE_NO_PAD
        .decode(normalized.as_bytes())
        .map_err(|e| PushError::InvalidKey(e.to_string()))
}

/// ¿Hay que enviar la suscripción al backend?
pub(crate) fn should_forward(created: bool, forwarded_for: Option<&str>, token: &str) -> bool {
    created || forwarded_for != Some(token)
}

#[derive(Clone)]
pub struct PushRegistrar {
    api: ApiClient,
    forwarded_for: Rc<RefCell<Option<String>>>,
}

impl PushRegistrar {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            forwarded_for: Rc::new(RefCell::new(None)),
        }
    }

    pub fn is_supported() -> bool {
        browser::navigator_has("serviceWorker") && browser::window_has("PushManager")
    }

    /// Ejecuta `run` tras `delay_ms`; los errores solo se loguean
    pub fn schedule(&self, delay_ms: u32) {
        let registrar = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            TimeoutFuture::new(delay_ms).await;
            match registrar.run().await {
                Ok(outcome) => log::info!("🔔 [PUSH] {:?}", outcome),
                Err(PushError::NoSession) => log::debug!("🔔 [PUSH] Sin sesión, se omite"),
                Err(e) => log::warn!("⚠️ [PUSH] Registro abandonado: {}", e),
            }
        });
    }

    pub async fn run(&self) -> Result<PushOutcome, PushError> {
        let token = self.api.auth().token().ok_or(PushError::NoSession)?;
        if !Self::is_supported() {
            return Err(PushError::Unsupported);
        }

        let window = web_sys::window().ok_or(PushError::Unsupported)?;
        let container = window.navigator().service_worker();

        JsFuture::from(container.register(&CONFIG.push.service_worker_path)).await?;
        let registration: ServiceWorkerRegistration = JsFuture::from(container.ready()?).await?.dyn_into()?;
        let push_manager = registration.push_manager()?;

        let existing = JsFuture::from(push_manager.get_subscription()?).await?;
        let (subscription, created) = if existing.is_null() || existing.is_undefined() {
            let subscription = self.subscribe(&push_manager).await?;
            (subscription, true)
        } else {
            (existing.unchecked_into::<PushSubscription>(), false)
        };

        let already = self.forwarded_for.borrow().clone();
        if !should_forward(created, already.as_deref(), &token) {
            return Ok(PushOutcome::AlreadyRegistered);
        }

        let json = subscription_json(&subscription)?;
        self.api.subscribe_push(json).await?;
        *self.forwarded_for.borrow_mut() = Some(token);

        Ok(if created {
            PushOutcome::Subscribed
        } else {
            PushOutcome::Forwarded
        })
    }

    async fn subscribe(&self, push_manager: &web_sys::PushManager) -> Result<PushSubscription, PushError> {
        let key = self.api.vapid_key().await?.ok_or(PushError::MissingKey)?;
        let key_bytes = decode_vapid_key(&key)?;

        let permission = JsFuture::from(Notification::request_permission()?)
            .await?
            .as_string()
            .unwrap_or_default();
        if permission != "granted" {
            return Err(PushError::PermissionDenied(permission));
        }

        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &"userVisibleOnly".into(), &JsValue::TRUE)?;
        js_sys::Reflect::set(
            &options,
            &"applicationServerKey".into(),
            &js_sys::Uint8Array::from(key_bytes.as_slice()),
        )?;
        let options: PushSubscriptionOptionsInit = options.unchecked_into();

        let subscription = JsFuture::from(push_manager.subscribe_with_options(&options)?).await?;
        log::info!("✅ [PUSH] Suscripción creada");
        Ok(subscription.unchecked_into())
    }
}

fn subscription_json(subscription: &PushSubscription) -> Result<serde_json::Value, PushError> {
    let raw = js_sys::JSON::stringify(subscription)?
        .as_string()
        .ok_or_else(|| PushError::Browser("subscription is not serializable".into()))?;
    serde_json::from_str(&raw).map_err(|e| PushError::Browser(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;

    #[test]
    fn vapid_key_decodes_with_or_without_padding() {
        // 65 bytes: punto P-256 sin comprimir
        let bytes: Vec<u8> = std::iter::once(0x04).chain(1..=64u8).collect();
        let unpadded = URL_SAFE_NO_PAD.encode(&bytes);
        let padded = base64::engine::general_purpose::URL_SAFE.encode(&bytes);
        let standard = base64::engine::general_purpose::STANDARD.encode(&bytes);

        assert_eq!(decode_vapid_key(&unpadded).unwrap(), bytes);
        assert_eq!(decode_vapid_key(&padded).unwrap(), bytes);
        assert_eq!(decode_vapid_key(&standard).unwrap(), bytes);
        assert_eq!(decode_vapid_key(&format!("  {}\n", unpadded)).unwrap(), bytes);
    }

    #[test]
    fn bad_keys_are_rejected() {
        assert!(matches!(decode_vapid_key(""), Err(PushError::MissingKey)));
        assert!(matches!(decode_vapid_key("==="), Err(PushError::MissingKey)));
        assert!(matches!(decode_vapid_key("not a key!"), Err(PushError::InvalidKey(_))));
    }

    #[test]
    fn existing_subscription_is_forwarded_once_per_token() {
        assert!(should_forward(true, Some("abc"), "abc"));
        assert!(should_forward(false, None, "abc"));
        assert!(!should_forward(false, Some("abc"), "abc"));
        assert!(should_forward(false, Some("abc"), "def"));
    }
}
