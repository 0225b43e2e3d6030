/// Claves de localStorage compartidas con el backend/PWA anterior
pub const STORAGE_KEY_TOKEN: &str = "auth_token";
pub const STORAGE_KEY_AGENT: &str = "agent";

/// Patrón de vibración para eventos entrantes (ms)
pub const INCOMING_VIBRATION: [u32; 3] = [200, 100, 200];

/// Chips de filtro del inbox; "all" no envía `channel`
pub const CHANNEL_FILTERS: [&str; 5] = ["all", "amazon", "shopify", "phone", "text"];

pub const SHIP_METHODS: [&str; 6] = [
    "Standard",
    "Priority Mail",
    "USPS First Class",
    "UPS Ground",
    "UPS 2-Day",
    "UPS Next Day",
];

pub const DEFAULT_SHIP_METHOD: &str = "Standard";

/// Longitud mínima de búsqueda de clientes
pub const MIN_SEARCH_LEN: usize = 2;

pub const SSE_EVENT_CONNECTED: &str = "connected";
pub const SSE_EVENT_INCOMING: &str = "incoming";
