use thiserror::Error;

/// Errores de la capa HTTP
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Request timed out")]
    Timeout,
    #[error("Session expired")]
    Unauthorized,
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("request failed"))]
    Http { status: u16, message: Option<String> },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Mensaje del servidor (`{error}`) si lo hay; si no, el de la pantalla
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Http { message: Some(m), .. } if !m.trim().is_empty() => m.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Errores del registro de push; todos se loguean y se abandonan
#[derive(Debug, Error)]
pub enum PushError {
    #[error("no active session")]
    NoSession,
    #[error("push notifications not supported")]
    Unsupported,
    #[error("browser error: {0}")]
    Browser(String),
    #[error("backend returned no VAPID key")]
    MissingKey,
    #[error("invalid VAPID key: {0}")]
    InvalidKey(String),
    #[error("notification permission {0}")]
    PermissionDenied(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl From<wasm_bindgen::JsValue> for PushError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        PushError::Browser(format!("{:?}", value))
    }
}
