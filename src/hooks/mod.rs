pub mod use_session;
pub mod use_live_events;
pub mod use_push_registration;

pub use use_session::{use_session, UseSessionHandle};
pub use use_live_events::{use_live_events, UseLiveEventsHandle};
pub use use_push_registration::use_push_registration;
