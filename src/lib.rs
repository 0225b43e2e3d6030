// ============================================================================
// SUPPORTBASE CONSOLE - FRONTEND (RUST + YEW)
// ============================================================================
// Capas:
// - Models: estructuras compartidas con el backend
// - Services: HTTP, eventos en vivo (SSE) y push
// - Stores: sesión persistida
// - ViewModels: estado de UI puro, testeable en nativo
// - Hooks/Components: vistas Yew
// ============================================================================

pub mod config;
pub mod models;
pub mod utils;
pub mod stores;
pub mod services;
pub mod viewmodels;
pub mod hooks;
pub mod components;

pub use components::App;
