// ============================================================================
// HELPERS DEL NAVEGADOR
// ============================================================================
// Envoltorios best-effort: nunca hacen panic si la API no existe
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::window;

/// `"prop" in navigator`
pub fn navigator_has(prop: &str) -> bool {
    window()
        .map(|w| js_sys::Reflect::has(&w.navigator(), &JsValue::from_str(prop)).unwrap_or(false))
        .unwrap_or(false)
}

/// `"prop" in window`
pub fn window_has(prop: &str) -> bool {
    window()
        .map(|w| js_sys::Reflect::has(&w, &JsValue::from_str(prop)).unwrap_or(false))
        .unwrap_or(false)
}

/// Vibra si el dispositivo lo soporta; ignora cualquier fallo
pub fn vibrate(pattern: &[u32]) {
    if !navigator_has("vibrate") {
        return;
    }
    if let Some(w) = window() {
        let pattern: js_sys::Array = pattern.iter().map(|ms| JsValue::from(*ms)).collect();
        let _ = w.navigator().vibrate_with_pattern(&pattern);
    }
}

pub fn alert(message: &str) {
    if let Some(w) = window() {
        let _ = w.alert_with_message(message);
    }
}

/// `window.confirm`; sin ventana se considera cancelado
pub fn confirm(message: &str) -> bool {
    window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

pub fn reload_page() {
    if let Some(w) = window() {
        if let Err(e) = w.location().reload() {
            log::error!("❌ [APP] No se pudo recargar la página: {:?}", e);
        }
    }
}
