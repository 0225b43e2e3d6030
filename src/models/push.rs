use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VapidKeyResponse {
    #[serde(default)]
    pub public_key: Option<String>,
}

/// La suscripción va tal cual la serializa el navegador (`PushSubscription.toJSON()`)
#[derive(Clone, Debug, Serialize)]
pub struct PushSubscribeRequest {
    pub subscription: Value,
}
