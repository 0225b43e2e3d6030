// ============================================================================
// EVENTOS EN VIVO (SSE + CLICKS DE NOTIFICACIONES PUSH)
// ============================================================================

pub mod backoff;
pub mod machine;
pub mod client;
pub mod worker_bridge;

pub use backoff::ReconnectBackoff;
pub use client::LiveEventClient;
pub use machine::{ConnectionId, LiveCommand, LiveEventMachine, LiveState, StreamSignal};
pub use worker_bridge::WorkerBridge;
