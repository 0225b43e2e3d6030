// ============================================================================
// APP
// ============================================================================
// Raíz: sesión, conexión de eventos en vivo, registro de push y navegación.
// Sin sesión solo se muestra el login.
// ============================================================================

use yew::prelude::*;

use super::{
    Analytics, CustomerScreen, IncomingPopup, Inbox, LoginScreen, RefundScreen, ReshipScreen, Search, Settings,
    TabBar, TicketDetail,
};
use crate::hooks::{use_live_events, use_push_registration, use_session};
use crate::models::{Customer, Order};
use crate::services::ApiClient;
use crate::stores::AuthStore;
use crate::viewmodels::{IncomingAction, NavAction, NavState, Screen, Tab};

#[function_component(App)]
pub fn app() -> Html {
    let auth = use_memo((), |_| AuthStore::browser());
    let api = use_memo((*auth).clone(), |auth| ApiClient::new(auth.clone()));
    let session = use_session(&auth);
    let token = session.token();

    let nav = use_reducer(NavState::default);
    let live = use_live_events(token.clone());
    use_push_registration(&api, token.clone());

    // Cada sesión empieza en el inbox
    {
        let nav = nav.clone();
        use_effect_with(token, move |_| {
            nav.dispatch(NavAction::Reset);
            || ()
        });
    }

    let api = (*api).clone();
    let Some(current) = session.session.clone() else {
        return html! { <LoginScreen {api} /> };
    };

    let dispatch = |action: NavAction| {
        let nav = nav.clone();
        Callback::from(move |_: ()| nav.dispatch(action.clone()))
    };

    let on_incoming = {
        let act = live.act.clone();
        let nav = nav.clone();
        Callback::from(move |action: IncomingAction| {
            if let Some(next) = act.emit(action) {
                nav.dispatch(next);
            }
        })
    };
    let on_open_ticket = {
        let nav = nav.clone();
        Callback::from(move |id: String| nav.dispatch(NavAction::OpenTicket(id)))
    };
    let on_select_tab = {
        let nav = nav.clone();
        Callback::from(move |tab: Tab| nav.dispatch(NavAction::SelectTab(tab)))
    };
    let open_customer = |from_ticket: Option<String>| {
        let nav = nav.clone();
        Callback::from(move |customer: Customer| {
            nav.dispatch(NavAction::OpenCustomer {
                customer,
                from_ticket: from_ticket.clone(),
            })
        })
    };

    let screen = match &nav.screen {
        Screen::Tabs => match nav.tab {
            Tab::Inbox => html! {
                <Inbox
                    api={api.clone()}
                    on_open_ticket={on_open_ticket.clone()}
                    on_new={dispatch(NavAction::SelectTab(Tab::Search))}
                />
            },
            Tab::Search => html! { <Search api={api.clone()} on_select={open_customer(None)} /> },
            Tab::Analytics => html! { <Analytics api={api.clone()} /> },
            Tab::Settings => html! {
                <Settings api={api.clone()} session={current.clone()} on_logout={session.logout.clone()} />
            },
        },
        Screen::Ticket { ticket_id } => html! {
            <TicketDetail
                api={api.clone()}
                ticket_id={ticket_id.clone()}
                on_back={dispatch(NavAction::Back)}
                on_open_customer={open_customer(Some(ticket_id.clone()))}
            />
        },
        Screen::Customer { customer, .. } => {
            let nav_reship = nav.clone();
            let nav_refund = nav.clone();
            html! {
                <CustomerScreen
                    api={api.clone()}
                    customer={customer.clone()}
                    on_back={dispatch(NavAction::Back)}
                    on_reship={Callback::from(move |order: Order| nav_reship.dispatch(NavAction::StartReship(order)))}
                    on_refund={Callback::from(move |order: Order| nav_refund.dispatch(NavAction::StartRefund(order)))}
                />
            }
        }
        Screen::Reship { order, customer, .. } => html! {
            <ReshipScreen
                key={order.id.clone()}
                api={api.clone()}
                order={order.clone()}
                customer={customer.clone()}
                on_back={dispatch(NavAction::Back)}
                on_done={dispatch(NavAction::Finish)}
            />
        },
        Screen::Refund { order, customer, .. } => html! {
            <RefundScreen
                key={order.id.clone()}
                api={api.clone()}
                order={order.clone()}
                customer={customer.clone()}
                on_back={dispatch(NavAction::Back)}
                on_done={dispatch(NavAction::Finish)}
            />
        },
    };

    html! {
        <div class="app">
            <main class="app-content">{ screen }</main>
            if nav.shows_tab_bar() {
                <TabBar active={nav.tab} on_select={on_select_tab} />
            }
            if let Some(event) = live.active.clone() {
                <IncomingPopup {event} on_action={on_incoming} />
            }
        </div>
    }
}
