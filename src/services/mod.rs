pub mod error;
pub mod api_client;
pub mod live_events;
pub mod push_registration;

pub use error::{ApiError, PushError};
pub use api_client::ApiClient;
pub use live_events::LiveEventClient;
pub use push_registration::{PushOutcome, PushRegistrar};
