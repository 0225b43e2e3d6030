// ============================================================================
// PUENTE SERVICE WORKER → PÁGINA
// ============================================================================
// Escucha `message` en navigator.serviceWorker y entrega el JSON al callback.
// El listener se quita en Drop.
// ============================================================================

use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{MessageEvent, ServiceWorkerContainer};

use crate::utils::browser;

pub struct WorkerBridge {
    container: ServiceWorkerContainer,
    listener: Closure<dyn FnMut(MessageEvent)>,
}

impl WorkerBridge {
    /// `None` si el navegador no tiene service workers
    pub fn attach<F>(on_message: F) -> Option<Self>
    where
        F: Fn(Value) + 'static,
    {
        if !browser::navigator_has("serviceWorker") {
            log::info!("ℹ️ [SW] Service workers no soportados, sin puente de notificaciones");
            return None;
        }
        let container = web_sys::window()?.navigator().service_worker();

        let listener = Closure::wrap(Box::new(move |event: MessageEvent| {
            if let Some(value) = message_json(&event.data()) {
                on_message(value);
            }
        }) as Box<dyn FnMut(MessageEvent)>);

        if let Err(e) = container.add_event_listener_with_callback("message", listener.as_ref().unchecked_ref()) {
            log::error!("❌ [SW] No se pudo registrar el listener de mensajes: {:?}", e);
            return None;
        }

        log::info!("🔔 [SW] Puente de notificaciones activo");
        Some(Self { container, listener })
    }
}

impl Drop for WorkerBridge {
    fn drop(&mut self) {
        let _ = self
            .container
            .remove_event_listener_with_callback("message", self.listener.as_ref().unchecked_ref());
    }
}

fn message_json(data: &JsValue) -> Option<Value> {
    if data.is_undefined() || data.is_null() {
        return None;
    }
    let raw = js_sys::JSON::stringify(data).ok()?.as_string()?;
    serde_json::from_str(&raw).ok()
}
