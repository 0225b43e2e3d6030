// ============================================================================
// MÁQUINA DE ESTADOS DEL STREAM DE EVENTOS
// ============================================================================
// Pura y determinista: no toca el navegador. Recibe señales y devuelve los
// comandos que el driver (client.rs) debe ejecutar.
//
//   Idle → Connecting → Connected → (error) Reconnecting(delay) → Connecting
//   disconnect() → Closed (desde cualquier estado)
// ============================================================================

use serde_json::Value;

use super::backoff::ReconnectBackoff;
use crate::models::{IncomingEvent, WorkerMessage};
use crate::utils::INCOMING_VIBRATION;

/// Identifica cada intento de conexión; las señales de intentos anteriores se ignoran
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u64);

impl ConnectionId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StreamSignal {
    /// Evento `connected` (handshake); el payload solo se loguea
    Connected(String),
    /// Evento `incoming` con el JSON crudo
    Incoming(String),
    /// Error de transporte
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LiveState {
    Idle,
    Connecting { id: ConnectionId },
    Connected { id: ConnectionId },
    Reconnecting { delay_ms: u32 },
    Closed,
}

impl LiveState {
    fn connection(&self) -> Option<ConnectionId> {
        match self {
            LiveState::Connecting { id } | LiveState::Connected { id } => Some(*id),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum LiveCommand {
    Open { id: ConnectionId, url: String },
    Close { id: ConnectionId },
    ScheduleReconnect { delay_ms: u32 },
    CancelReconnect,
    Deliver(IncomingEvent),
    Vibrate(&'static [u32]),
}

pub struct LiveEventMachine {
    base_url: String,
    token: Option<String>,
    state: LiveState,
    backoff: ReconnectBackoff,
    next_id: u64,
}

impl LiveEventMachine {
    pub fn new(base_url: impl Into<String>, backoff: ReconnectBackoff) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
            state: LiveState::Idle,
            backoff,
            next_id: 0,
        }
    }

    pub fn state(&self) -> LiveState {
        self.state
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn stream_url(&self, token: &str) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(token.as_bytes()).collect();
        format!("{}/events/stream?token={}", self.base_url, encoded)
    }

    /// Abre el stream para `token`. Token vacío: no hace nada.
    /// Con el mismo token y una sesión viva tampoco hace nada.
    pub fn connect(&mut self, token: &str) -> Vec<LiveCommand> {
        let token = token.trim();
        if token.is_empty() {
            log::debug!("🔌 [SSE] connect() sin token, se ignora");
            return Vec::new();
        }

        let live = !matches!(self.state, LiveState::Idle | LiveState::Closed);
        if live && self.token.as_deref() == Some(token) {
            return Vec::new();
        }

        let mut commands = self.teardown();
        self.token = Some(token.to_string());
        self.backoff.reset();
        commands.push(self.open());
        commands
    }

    /// Cierra el stream y cancela cualquier reconexión pendiente. Idempotente.
    pub fn disconnect(&mut self) -> Vec<LiveCommand> {
        let commands = self.teardown();
        if self.state != LiveState::Closed {
            log::info!("🔌 [SSE] Desconectado");
        }
        self.state = LiveState::Closed;
        self.token = None;
        commands
    }

    pub fn handle(&mut self, id: ConnectionId, signal: StreamSignal) -> Vec<LiveCommand> {
        if self.state.connection() != Some(id) {
            log::debug!("🔌 [SSE] Señal de conexión obsoleta #{} ignorada: {:?}", id.0, signal);
            return Vec::new();
        }

        match signal {
            StreamSignal::Connected(payload) => {
                log::info!("✅ [SSE] Conectado (#{}) {}", id.0, payload);
                self.backoff.reset();
                self.state = LiveState::Connected { id };
                Vec::new()
            }
            StreamSignal::Incoming(raw) => match IncomingEvent::parse(&raw) {
                Ok(event) => {
                    log::info!("📞 [SSE] Evento entrante: {:?} {}", event.kind, event.phone);
                    vec![LiveCommand::Deliver(event), LiveCommand::Vibrate(&INCOMING_VIBRATION)]
                }
                Err(e) => {
                    log::warn!("⚠️ [SSE] Payload inválido descartado: {}", e);
                    Vec::new()
                }
            },
            StreamSignal::Error => {
                let delay_ms = self.backoff.next_delay();
                log::warn!("🔄 [SSE] Error de conexión, reintentando en {}ms", delay_ms);
                self.state = LiveState::Reconnecting { delay_ms };
                vec![LiveCommand::Close { id }, LiveCommand::ScheduleReconnect { delay_ms }]
            }
        }
    }

    /// Vence el timer de reconexión
    pub fn reconnect_due(&mut self) -> Vec<LiveCommand> {
        if matches!(self.state, LiveState::Reconnecting { .. }) && self.token.is_some() {
            vec![self.open()]
        } else {
            log::debug!("🔌 [SSE] Timer de reconexión sin efecto en {:?}", self.state);
            Vec::new()
        }
    }

    /// Mensaje del service worker (`event.data` ya convertido a JSON)
    pub fn worker_message(&mut self, message: Value) -> Vec<LiveCommand> {
        if self.state == LiveState::Closed {
            return Vec::new();
        }

        let data = match serde_json::from_value::<WorkerMessage>(message) {
            Ok(WorkerMessage::NotificationClick { data: Some(data) }) if !data.is_null() => data,
            Ok(WorkerMessage::NotificationClick { .. }) => {
                log::warn!("⚠️ [SW] Click de notificación sin payload");
                return Vec::new();
            }
            Ok(WorkerMessage::Unknown) | Err(_) => return Vec::new(),
        };

        match IncomingEvent::from_value(data) {
            Ok(event) => {
                log::info!("🔔 [SW] Click en notificación: {:?} {}", event.kind, event.phone);
                vec![LiveCommand::Deliver(event)]
            }
            Err(e) => {
                log::warn!("⚠️ [SW] Payload de notificación inválido: {}", e);
                Vec::new()
            }
        }
    }

    fn open(&mut self) -> LiveCommand {
        self.next_id += 1;
        let id = ConnectionId(self.next_id);
        let url = match &self.token {
            Some(token) => self.stream_url(token),
            None => self.stream_url(""),
        };
        log::info!("🔌 [SSE] Conectando (#{})", id.0);
        self.state = LiveState::Connecting { id };
        LiveCommand::Open { id, url }
    }

    fn teardown(&mut self) -> Vec<LiveCommand> {
        match self.state {
            LiveState::Connecting { id } | LiveState::Connected { id } => vec![LiveCommand::Close { id }],
            LiveState::Reconnecting { .. } => vec![LiveCommand::CancelReconnect],
            LiveState::Idle | LiveState::Closed => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IncomingKind;
    use serde_json::json;

    const BASE: &str = "https://api.example.com/api/v1";
    const CALL: &str = r#"{"type":"incoming_call","phone":"+15551234567"}"#;

    /// Ejecuta los comandos contra un reloj falso
    struct Harness {
        machine: LiveEventMachine,
        now: u64,
        timer: Option<u64>,
        current: Option<ConnectionId>,
        opens: Vec<u64>,
        active: Option<IncomingEvent>,
        vibrations: usize,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                machine: LiveEventMachine::new(BASE, ReconnectBackoff::new(1_000, 30_000)),
                now: 0,
                timer: None,
                current: None,
                opens: Vec::new(),
                active: None,
                vibrations: 0,
            }
        }

        fn apply(&mut self, commands: Vec<LiveCommand>) {
            for command in commands {
                match command {
                    LiveCommand::Open { id, .. } => {
                        self.current = Some(id);
                        self.opens.push(self.now);
                    }
                    LiveCommand::Close { id } => {
                        assert_eq!(self.current, Some(id));
                        self.current = None;
                    }
                    LiveCommand::ScheduleReconnect { delay_ms } => {
                        assert!(self.timer.is_none());
                        assert!(self.current.is_none(), "se cierra antes de reprogramar");
                        self.timer = Some(self.now + u64::from(delay_ms));
                    }
                    LiveCommand::CancelReconnect => self.timer = None,
                    LiveCommand::Deliver(event) => self.active = Some(event),
                    LiveCommand::Vibrate(pattern) => {
                        assert_eq!(pattern, &[200, 100, 200]);
                        self.vibrations += 1;
                    }
                }
            }
        }

        fn connect(&mut self, token: &str) {
            let commands = self.machine.connect(token);
            self.apply(commands);
        }

        fn signal(&mut self, signal: StreamSignal) {
            if let Some(id) = self.current {
                let commands = self.machine.handle(id, signal);
                self.apply(commands);
            }
        }

        fn advance_to(&mut self, t: u64) {
            if let Some(due) = self.timer {
                if due <= t {
                    self.now = due;
                    self.timer = None;
                    let commands = self.machine.reconnect_due();
                    self.apply(commands);
                }
            }
            self.now = t;
        }

        fn disconnect(&mut self) {
            let commands = self.machine.disconnect();
            self.apply(commands);
        }
    }

    #[test]
    fn consecutive_errors_back_off_exponentially() {
        let mut h = Harness::new();
        h.connect("abc123");
        assert_eq!(h.opens, vec![0]);

        h.signal(StreamSignal::Error);
        h.advance_to(1_000);
        h.signal(StreamSignal::Error);
        h.advance_to(3_000);
        h.signal(StreamSignal::Error);
        h.advance_to(7_000);

        assert_eq!(h.opens, vec![0, 1_000, 3_000, 7_000]);
    }

    #[test]
    fn connected_resets_backoff() {
        let mut h = Harness::new();
        h.connect("abc123");
        h.signal(StreamSignal::Error);
        h.advance_to(1_000);
        h.signal(StreamSignal::Error);
        assert_eq!(h.timer, Some(3_000));
        h.advance_to(3_000);

        h.advance_to(3_500);
        h.signal(StreamSignal::Connected(r#"{"agentId":"7"}"#.into()));
        assert!(matches!(h.machine.state(), LiveState::Connected { .. }));

        h.signal(StreamSignal::Error);
        assert_eq!(h.timer, Some(4_500));
    }

    #[test]
    fn delays_cap_at_thirty_seconds() {
        let mut h = Harness::new();
        h.connect("abc123");
        let mut delays = Vec::new();
        for _ in 0..8 {
            h.signal(StreamSignal::Error);
            let due = h.timer.unwrap();
            delays.push(due - h.now);
            h.advance_to(due);
        }
        assert_eq!(delays, vec![1_000, 2_000, 4_000, 8_000, 16_000, 30_000, 30_000, 30_000]);
    }

    #[test]
    fn disconnect_while_reconnect_pending_stops_attempts() {
        let mut h = Harness::new();
        h.connect("abc123");
        h.signal(StreamSignal::Error);
        assert!(h.timer.is_some());

        h.disconnect();
        assert_eq!(h.timer, None);
        assert_eq!(h.machine.state(), LiveState::Closed);

        // Un timer que vence tarde no reabre nada
        assert!(h.machine.reconnect_due().is_empty());
        h.advance_to(60_000);
        assert_eq!(h.opens, vec![0]);
    }

    #[test]
    fn disconnect_is_idempotent() {
        let mut h = Harness::new();
        h.connect("abc123");
        h.disconnect();
        assert!(h.current.is_none());
        assert!(h.machine.disconnect().is_empty());
        assert!(LiveEventMachine::new(BASE, ReconnectBackoff::default()).disconnect().is_empty());
    }

    #[test]
    fn empty_token_is_a_no_op() {
        let mut machine = LiveEventMachine::new(BASE, ReconnectBackoff::new(1_000, 30_000));
        assert!(machine.connect("").is_empty());
        assert!(machine.connect("   ").is_empty());
        assert_eq!(machine.state(), LiveState::Idle);
    }

    #[test]
    fn connect_after_close_starts_fresh() {
        let mut h = Harness::new();
        h.connect("abc123");
        h.signal(StreamSignal::Error);
        h.advance_to(1_000);
        h.signal(StreamSignal::Error);
        h.disconnect();

        h.advance_to(10_000);
        h.connect("abc123");
        assert!(matches!(h.machine.state(), LiveState::Connecting { .. }));
        h.signal(StreamSignal::Error);
        assert_eq!(h.timer, Some(11_000));
    }

    #[test]
    fn new_token_replaces_the_connection() {
        let mut h = Harness::new();
        h.connect("abc123");
        let first = h.current;
        h.connect("abc123");
        assert_eq!(h.current, first);

        h.connect("def456");
        assert_ne!(h.current, first);
        assert_eq!(h.machine.token(), Some("def456"));
    }

    #[test]
    fn token_is_percent_encoded() {
        let machine = LiveEventMachine::new(format!("{}/", BASE), ReconnectBackoff::new(1_000, 30_000));
        assert_eq!(
            machine.stream_url("a+b/c=="),
            "https://api.example.com/api/v1/events/stream?token=a%2Bb%2Fc%3D%3D"
        );
    }

    #[test]
    fn incoming_event_is_delivered_and_vibrates() {
        let mut h = Harness::new();
        h.connect("abc123");
        h.signal(StreamSignal::Connected("{}".into()));
        h.signal(StreamSignal::Incoming(CALL.into()));

        let event = h.active.clone().unwrap();
        assert_eq!(event.kind, IncomingKind::Call);
        assert!(event.customer.is_none());
        assert_eq!(h.vibrations, 1);
    }

    #[test]
    fn unmatched_caller_with_null_fields_is_delivered() {
        let mut h = Harness::new();
        h.connect("abc123");
        h.signal(StreamSignal::Connected("{}".into()));
        h.signal(StreamSignal::Incoming(
            r#"{"type":"incoming_call","phone":"+15551234567","customer":null,"recentOrders":null}"#.into(),
        ));

        let event = h.active.clone().unwrap();
        assert!(!event.has_customer());
        assert!(event.recent_orders.is_empty());
        assert_eq!(event.caller_label(), "Unknown Caller");
        assert_eq!(h.vibrations, 1);

        h.signal(StreamSignal::Incoming(r#"{"type":"incoming_text","phone":null,"customer":{"name":"Ann"}}"#.into()));
        let event = h.active.clone().unwrap();
        assert_eq!(event.phone, "");
        assert_eq!(event.caller_label(), "Ann");
        assert_eq!(h.vibrations, 2);
    }

    #[test]
    fn notification_click_with_null_fields_is_delivered() {
        let mut machine = LiveEventMachine::new(BASE, ReconnectBackoff::new(1_000, 30_000));
        let click = json!({
            "type": "PUSH_NOTIFICATION_CLICK",
            "data": {"type": "incoming_call", "phone": "+1", "customer": null, "recentOrders": null}
        });
        assert!(matches!(machine.worker_message(click).as_slice(), [LiveCommand::Deliver(e)] if !e.has_customer()));
    }

    #[test]
    fn malformed_payload_keeps_active_event() {
        let mut h = Harness::new();
        h.connect("abc123");
        h.signal(StreamSignal::Incoming(CALL.into()));
        let before = h.active.clone();

        h.signal(StreamSignal::Incoming("{not json".into()));
        h.signal(StreamSignal::Incoming(r#"{"phone":"+1"}"#.into()));
        h.signal(StreamSignal::Incoming("[]".into()));

        assert_eq!(h.active, before);
        assert_eq!(h.vibrations, 1);
        assert!(matches!(h.machine.state(), LiveState::Connecting { .. }));
    }

    #[test]
    fn stale_signals_are_ignored() {
        let mut machine = LiveEventMachine::new(BASE, ReconnectBackoff::new(1_000, 30_000));
        let first = match machine.connect("abc123").as_slice() {
            [LiveCommand::Open { id, .. }] => *id,
            other => panic!("unexpected {:?}", other),
        };
        machine.handle(first, StreamSignal::Error);
        machine.reconnect_due();

        assert!(machine.handle(first, StreamSignal::Error).is_empty());
        assert!(machine.handle(first, StreamSignal::Incoming(CALL.into())).is_empty());
        assert!(matches!(machine.state(), LiveState::Connecting { id } if id != first));
    }

    #[test]
    fn notification_click_matches_stream_delivery() {
        let mut stream = Harness::new();
        stream.connect("abc123");
        stream.signal(StreamSignal::Incoming(CALL.into()));

        let mut worker = Harness::new();
        worker.connect("abc123");
        let payload: Value = serde_json::from_str(CALL).unwrap();
        let commands = worker
            .machine
            .worker_message(json!({"type": "PUSH_NOTIFICATION_CLICK", "data": payload}));
        worker.apply(commands);

        assert_eq!(stream.active, worker.active);
        assert_eq!(worker.vibrations, 0);
    }

    #[test]
    fn worker_noise_is_dropped() {
        let mut machine = LiveEventMachine::new(BASE, ReconnectBackoff::new(1_000, 30_000));
        assert!(machine.worker_message(json!({"type": "CACHE_UPDATED"})).is_empty());
        assert!(machine.worker_message(json!({"type": "PUSH_NOTIFICATION_CLICK"})).is_empty());
        assert!(machine
            .worker_message(json!({"type": "PUSH_NOTIFICATION_CLICK", "data": {}}))
            .is_empty());
        assert!(machine.worker_message(json!("hello")).is_empty());

        machine.disconnect();
        let click = json!({"type": "PUSH_NOTIFICATION_CLICK", "data": {"type": "incoming_text"}});
        assert!(machine.worker_message(click).is_empty());
    }

    #[test]
    fn worker_click_before_connect_is_delivered() {
        let mut machine = LiveEventMachine::new(BASE, ReconnectBackoff::new(1_000, 30_000));
        let click = json!({"type": "PUSH_NOTIFICATION_CLICK", "data": {"type": "incoming_text", "phone": "+1"}});
        assert!(matches!(machine.worker_message(click).as_slice(), [LiveCommand::Deliver(_)]));
    }
}
