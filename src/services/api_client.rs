// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP
// ============================================================================
// NO tiene lógica de negocio. Adjunta el bearer del AuthStore con el que se
// construyó, aplica timeout y ante un 401 invalida la sesión y recarga.
// ============================================================================

use gloo_net::http::{Method, RequestBuilder, Response};
use gloo_timers::callback::Timeout;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use web_sys::AbortController;

use crate::config::CONFIG;
use crate::models::analytics::DoaByChannelResponse;
use crate::models::customer::{CustomerResponse, CustomersResponse};
use crate::models::order::{
    OrderResponse, OrdersResponse, RefundRequest, RefundResponse, ReshipRequest, ReshipResponse,
};
use crate::models::push::{PushSubscribeRequest, VapidKeyResponse};
use crate::models::ticket::{NewMessage, TicketEnvelope, TicketUpdate, TicketsResponse};
use crate::models::{
    AnalyticsOverview, Customer, DoaByChannel, LoginRequest, LoginResponse, Order, Ticket,
};
use crate::services::error::ApiError;
use crate::stores::{AuthStore, InvalidationReason};
use crate::utils::browser;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Auth {
    Bearer,
    Anonymous,
}

/// Cómo tratar un status HTTP
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StatusClass {
    Success,
    /// 401 en cualquier llamada (login incluido): logout global
    SessionExpired,
    Failure,
}

pub(crate) fn classify_status(status: u16) -> StatusClass {
    match status {
        200..=299 => StatusClass::Success,
        401 => StatusClass::SessionExpired,
        _ => StatusClass::Failure,
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body).ok().and_then(|b| b.error)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AvailabilityRequest {
    is_available: bool,
}

/// Cliente API del backend SupportBase
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    auth: AuthStore,
    timeout_ms: u32,
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url && self.auth == other.auth
    }
}

impl ApiClient {
    pub fn new(auth: AuthStore) -> Self {
        Self::with_base_url(CONFIG.api_base.clone(), auth)
    }

    pub fn with_base_url(base_url: impl Into<String>, auth: AuthStore) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth,
            timeout_ms: CONFIG.request_timeout_ms,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn auth(&self) -> &AuthStore {
        &self.auth
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ========================================================================
    // AUTH
    // ========================================================================

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        log::info!("🔐 [API] Login de {}", email);
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self
            .execute(Method::POST, "/auth/login", &[], Some(&body), Auth::Anonymous)
            .await?;
        parse_json(response).await
    }

    pub async fn update_availability(&self, is_available: bool) -> Result<(), ApiError> {
        let body = AvailabilityRequest { is_available };
        self.execute(Method::PUT, "/auth/availability", &[], Some(&body), Auth::Bearer)
            .await
            .map(drop)
    }

    // ========================================================================
    // TICKETS
    // ========================================================================

    /// `channel = None` equivale al filtro "all"
    pub async fn list_tickets(&self, channel: Option<&str>) -> Result<Vec<Ticket>, ApiError> {
        let query: Vec<(&str, &str)> = channel.map(|c| vec![("channel", c)]).unwrap_or_default();
        let response = self
            .execute::<()>(Method::GET, "/tickets", &query, None, Auth::Bearer)
            .await?;
        let body: TicketsResponse = parse_json(response).await?;
        Ok(body.tickets)
    }

    pub async fn get_ticket(&self, id: &str) -> Result<Ticket, ApiError> {
        let response = self
            .execute::<()>(Method::GET, &format!("/tickets/{}", id), &[], None, Auth::Bearer)
            .await?;
        let envelope: TicketEnvelope = parse_json(response).await?;
        Ok(envelope.into_ticket())
    }

    pub async fn update_ticket(&self, id: &str, update: &TicketUpdate) -> Result<(), ApiError> {
        log::info!("📝 [API] Actualizando ticket {}", id);
        self.execute(Method::PUT, &format!("/tickets/{}", id), &[], Some(update), Auth::Bearer)
            .await
            .map(drop)
    }

    pub async fn add_ticket_message(&self, id: &str, body: &str) -> Result<(), ApiError> {
        let message = NewMessage { body: body.to_string() };
        self.execute(
            Method::POST,
            &format!("/tickets/{}/messages", id),
            &[],
            Some(&message),
            Auth::Bearer,
        )
        .await
        .map(drop)
    }

    // ========================================================================
    // CLIENTES / PEDIDOS
    // ========================================================================

    pub async fn search_customers(&self, query: &str) -> Result<Vec<Customer>, ApiError> {
        log::info!("🔍 [API] Buscando clientes: {}", query);
        let response = self
            .execute::<()>(Method::GET, "/customers/search", &[("q", query)], None, Auth::Bearer)
            .await?;
        let body: CustomersResponse = parse_json(response).await?;
        Ok(body.customers)
    }

    pub async fn get_customer(&self, id: &str) -> Result<Option<Customer>, ApiError> {
        let response = self
            .execute::<()>(Method::GET, &format!("/customers/{}", id), &[], None, Auth::Bearer)
            .await?;
        let body: CustomerResponse = parse_json(response).await?;
        Ok(body.customer)
    }

    pub async fn customer_orders(&self, id: &str, limit: u32) -> Result<Vec<Order>, ApiError> {
        let limit = limit.to_string();
        let response = self
            .execute::<()>(
                Method::GET,
                &format!("/customers/{}/orders", id),
                &[("limit", limit.as_str())],
                None,
                Auth::Bearer,
            )
            .await?;
        let body: OrdersResponse = parse_json(response).await?;
        Ok(body.orders)
    }

    pub async fn get_order(&self, id: &str) -> Result<Order, ApiError> {
        let response = self
            .execute::<()>(Method::GET, &format!("/orders/{}", id), &[], None, Auth::Bearer)
            .await?;
        let body: OrderResponse = parse_json(response).await?;
        Ok(body.order)
    }

    pub async fn create_reship(&self, order_id: &str, request: &ReshipRequest) -> Result<ReshipResponse, ApiError> {
        log::info!("📦 [API] Reship del pedido {} ({} líneas)", order_id, request.line_items.len());
        let response = self
            .execute(
                Method::POST,
                &format!("/orders/{}/reship", order_id),
                &[],
                Some(request),
                Auth::Bearer,
            )
            .await?;
        parse_json(response).await
    }

    pub async fn create_refund(&self, order_id: &str, request: &RefundRequest) -> Result<RefundResponse, ApiError> {
        log::info!("💸 [API] Reembolso del pedido {} (full={})", order_id, request.full_refund);
        let response = self
            .execute(
                Method::POST,
                &format!("/orders/{}/refund", order_id),
                &[],
                Some(request),
                Auth::Bearer,
            )
            .await?;
        parse_json(response).await
    }

    // ========================================================================
    // ANALYTICS
    // ========================================================================

    pub async fn analytics_overview(&self) -> Result<AnalyticsOverview, ApiError> {
        let response = self
            .execute::<()>(Method::GET, "/analytics/overview", &[], None, Auth::Bearer)
            .await?;
        parse_json(response).await
    }

    pub async fn doa_by_channel(&self, weeks: u32) -> Result<Vec<DoaByChannel>, ApiError> {
        let body: DoaByChannelResponse = self.weekly("/analytics/doa-by-channel", weeks).await?;
        Ok(body.doa_by_channel)
    }

    /// La forma de estos reportes no es fija; se devuelven sin tipar
    pub async fn reship_costs(&self, weeks: u32) -> Result<Value, ApiError> {
        self.weekly("/analytics/reship-costs", weeks).await
    }

    pub async fn refund_totals(&self, weeks: u32) -> Result<Value, ApiError> {
        self.weekly("/analytics/refund-totals", weeks).await
    }

    async fn weekly<T: DeserializeOwned>(&self, path: &str, weeks: u32) -> Result<T, ApiError> {
        let weeks = weeks.to_string();
        let response = self
            .execute::<()>(Method::GET, path, &[("weeks", weeks.as_str())], None, Auth::Bearer)
            .await?;
        parse_json(response).await
    }

    // ========================================================================
    // PUSH
    // ========================================================================

    pub async fn vapid_key(&self) -> Result<Option<String>, ApiError> {
        let response = self
            .execute::<()>(Method::GET, "/push/vapid-key", &[], None, Auth::Anonymous)
            .await?;
        let body: VapidKeyResponse = parse_json(response).await?;
        Ok(body.public_key.filter(|k| !k.trim().is_empty()))
    }

    pub async fn subscribe_push(&self, subscription: Value) -> Result<(), ApiError> {
        let body = PushSubscribeRequest { subscription };
        self.execute(Method::POST, "/push/subscribe", &[], Some(&body), Auth::Bearer)
            .await
            .map(drop)
    }

    // ========================================================================
    // TRANSPORTE
    // ========================================================================

    async fn execute<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
        auth: Auth,
    ) -> Result<Response, ApiError> {
        let url = self.url(path);

        let mut builder = RequestBuilder::new(&url)
            .method(method)
            .header("Accept", "application/json");
        if !query.is_empty() {
            builder = builder.query(query.iter().copied());
        }
        if auth == Auth::Bearer {
            if let Some(token) = self.auth.token() {
                builder = builder.header("Authorization", &format!("Bearer {}", token));
            }
        }

        let controller = AbortController::new().ok();
        if let Some(controller) = &controller {
            builder = builder.abort_signal(Some(&controller.signal()));
        }

        let request = match body {
            Some(body) => builder
                .json(body)
                .map_err(|e| ApiError::Serialization(e.to_string()))?,
            None => builder
                .build()
                .map_err(|e| ApiError::Serialization(e.to_string()))?,
        };

        // Se cancela solo al salir de esta función (drop del Timeout)
        let _deadline = controller.clone().map(|controller| {
            Timeout::new(self.timeout_ms, move || controller.abort())
        });

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                let timed_out = controller
                    .as_ref()
                    .map(|c| c.signal().aborted())
                    .unwrap_or(false);
                return if timed_out {
                    log::warn!("⏱️ [API] Timeout en {}", path);
                    Err(ApiError::Timeout)
                } else {
                    log::error!("❌ [API] Error de red en {}: {}", path, e);
                    Err(ApiError::Network(e.to_string()))
                };
            }
        };

        let status = response.status();
        match classify_status(status) {
            StatusClass::Success => Ok(response),
            StatusClass::SessionExpired => {
                log::warn!("🔒 [API] 401 en {}, cerrando sesión", path);
                self.auth.invalidate(InvalidationReason::Unauthorized);
                browser::reload_page();
                Err(ApiError::Unauthorized)
            }
            StatusClass::Failure => {
                let text = response.text().await.unwrap_or_default();
                let message = error_message(&text);
                log::error!("❌ [API] HTTP {} en {}: {:?}", status, path, message);
                Err(ApiError::Http { status, message })
            }
        }
    }
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}
