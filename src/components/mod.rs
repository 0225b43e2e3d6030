pub mod app;
pub mod login_screen;
pub mod tab_bar;
pub mod inbox;
pub mod quick_resolve_sheet;
pub mod ticket_detail;
pub mod search;
pub mod customer_screen;
pub mod reship_screen;
pub mod refund_screen;
pub mod analytics;
pub mod settings;
pub mod incoming_popup;

pub use app::App;
pub use login_screen::LoginScreen;
pub use tab_bar::TabBar;
pub use inbox::Inbox;
pub use quick_resolve_sheet::QuickResolveSheet;
pub use ticket_detail::TicketDetail;
pub use search::Search;
pub use customer_screen::CustomerScreen;
pub use reship_screen::ReshipScreen;
pub use refund_screen::RefundScreen;
pub use analytics::Analytics;
pub use settings::Settings;
pub use incoming_popup::IncomingPopup;

use yew::prelude::*;

/// Cabecera con botón de volver, común a las pantallas de detalle
pub(crate) fn back_header(title: &str, on_back: Callback<()>) -> Html {
    html! {
        <header class="screen-header">
            <button class="btn-back" onclick={on_back.reform(|_| ())}>{"‹ Back"}</button>
            <h2>{title.to_string()}</h2>
        </header>
    }
}

pub(crate) fn spinner() -> Html {
    html! {
        <div class="spinner-wrap"><div class="spinner"></div></div>
    }
}

pub(crate) fn error_banner(message: &str) -> Html {
    html! { <div class="error-banner">{message.to_string()}</div> }
}
