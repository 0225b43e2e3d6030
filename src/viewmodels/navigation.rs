// ============================================================================
// NAVEGACIÓN
// ============================================================================
// Tabs raíz + pila implícita de pantallas de detalle. `from_ticket` recuerda
// el ticket de origen para volver a él al terminar.
// ============================================================================

use std::rc::Rc;
use yew::Reducible;

use crate::models::{Customer, Order};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Inbox,
    Search,
    Analytics,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Inbox, Tab::Search, Tab::Analytics, Tab::Settings];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Inbox => "Inbox",
            Tab::Search => "Resolve",
            Tab::Analytics => "Analytics",
            Tab::Settings => "Settings",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Tab::Inbox => "✉️",
            Tab::Search => "🔍",
            Tab::Analytics => "📊",
            Tab::Settings => "⚙️",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Screen {
    #[default]
    Tabs,
    Ticket {
        ticket_id: String,
    },
    Customer {
        customer: Customer,
        from_ticket: Option<String>,
    },
    Reship {
        order: Order,
        customer: Customer,
        from_ticket: Option<String>,
    },
    Refund {
        order: Order,
        customer: Customer,
        from_ticket: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NavState {
    pub tab: Tab,
    pub screen: Screen,
}

impl NavState {
    /// La barra de tabs solo se ve en la raíz
    pub fn shows_tab_bar(&self) -> bool {
        self.screen == Screen::Tabs
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NavAction {
    SelectTab(Tab),
    OpenTicket(String),
    OpenCustomer {
        customer: Customer,
        from_ticket: Option<String>,
    },
    StartReship(Order),
    StartRefund(Order),
    /// Reship/refund desde el popup de llamada entrante
    PopupReship {
        order: Order,
        customer: Customer,
    },
    PopupRefund {
        order: Order,
        customer: Customer,
    },
    Back,
    /// "Done" tras un reship/refund correcto
    Finish,
    Reset,
}

fn ticket_or_tabs(from_ticket: Option<String>) -> Screen {
    match from_ticket {
        Some(ticket_id) => Screen::Ticket { ticket_id },
        None => Screen::Tabs,
    }
}

impl NavState {
    pub fn apply(&self, action: NavAction) -> NavState {
        let tab = self.tab;
        let screen = match (action, self.screen.clone()) {
            (NavAction::Reset, _) => return NavState::default(),
            (NavAction::SelectTab(tab), _) => {
                return NavState {
                    tab,
                    screen: Screen::Tabs,
                }
            }
            (NavAction::OpenTicket(ticket_id), _) => Screen::Ticket { ticket_id },
            (NavAction::OpenCustomer { customer, from_ticket }, _) => Screen::Customer { customer, from_ticket },
            (NavAction::StartReship(order), Screen::Customer { customer, from_ticket }) => Screen::Reship {
                order,
                customer,
                from_ticket,
            },
            (NavAction::StartRefund(order), Screen::Customer { customer, from_ticket }) => Screen::Refund {
                order,
                customer,
                from_ticket,
            },
            (NavAction::PopupReship { order, customer }, _) => Screen::Reship {
                order,
                customer,
                from_ticket: None,
            },
            (NavAction::PopupRefund { order, customer }, _) => Screen::Refund {
                order,
                customer,
                from_ticket: None,
            },
            (NavAction::Back, Screen::Customer { from_ticket, .. }) => ticket_or_tabs(from_ticket),
            (NavAction::Back, Screen::Reship { customer, from_ticket, .. })
            | (NavAction::Back, Screen::Refund { customer, from_ticket, .. }) => Screen::Customer {
                customer,
                from_ticket,
            },
            (NavAction::Back, _) => Screen::Tabs,
            (NavAction::Finish, Screen::Reship { from_ticket, .. })
            | (NavAction::Finish, Screen::Refund { from_ticket, .. }) => ticket_or_tabs(from_ticket),
            (action, current) => {
                log::warn!("⚠️ [NAV] Acción {:?} ignorada en {:?}", action, current);
                current
            }
        };
        NavState { tab, screen }
    }
}

impl Reducible for NavState {
    type Action = NavAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(self.apply(action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer() -> Customer {
        serde_json::from_str(r#"{"id": 5, "name": "Ann"}"#).unwrap()
    }

    fn order() -> Order {
        serde_json::from_str(r##"{"id": 1001, "name": "#1001"}"##).unwrap()
    }

    #[test]
    fn starts_on_inbox_with_tab_bar() {
        let nav = NavState::default();
        assert_eq!(nav.tab, Tab::Inbox);
        assert!(nav.shows_tab_bar());
        assert_eq!(Tab::Search.label(), "Resolve");
    }

    #[test]
    fn ticket_flow_returns_to_origin_ticket() {
        let nav = NavState::default()
            .apply(NavAction::OpenTicket("t9".into()))
            .apply(NavAction::OpenCustomer {
                customer: customer(),
                from_ticket: Some("t9".into()),
            })
            .apply(NavAction::StartReship(order()));
        assert!(!nav.shows_tab_bar());
        assert!(matches!(&nav.screen, Screen::Reship { from_ticket: Some(t), .. } if t == "t9"));

        let back = nav.apply(NavAction::Back);
        assert!(matches!(&back.screen, Screen::Customer { from_ticket: Some(t), .. } if t == "t9"));
        assert_eq!(
            back.apply(NavAction::Back).screen,
            Screen::Ticket { ticket_id: "t9".into() }
        );

        assert_eq!(nav.apply(NavAction::Finish).screen, Screen::Ticket { ticket_id: "t9".into() });
    }

    #[test]
    fn search_flow_returns_to_tabs() {
        let nav = NavState::default()
            .apply(NavAction::SelectTab(Tab::Search))
            .apply(NavAction::OpenCustomer {
                customer: customer(),
                from_ticket: None,
            })
            .apply(NavAction::StartRefund(order()));

        let done = nav.apply(NavAction::Finish);
        assert_eq!(done.screen, Screen::Tabs);
        assert_eq!(done.tab, Tab::Search);

        let customer_screen = nav.apply(NavAction::Back);
        assert_eq!(customer_screen.apply(NavAction::Back).screen, Screen::Tabs);
    }

    #[test]
    fn ticket_back_goes_to_tabs() {
        let nav = NavState::default().apply(NavAction::OpenTicket("t1".into()));
        assert_eq!(nav.apply(NavAction::Back).screen, Screen::Tabs);
    }

    #[test]
    fn popup_actions_open_forms_without_origin() {
        let nav = NavState::default()
            .apply(NavAction::OpenTicket("t1".into()))
            .apply(NavAction::PopupRefund {
                order: order(),
                customer: customer(),
            });
        assert!(matches!(&nav.screen, Screen::Refund { from_ticket: None, .. }));
        assert_eq!(nav.apply(NavAction::Finish).screen, Screen::Tabs);
    }

    #[test]
    fn invalid_actions_leave_state_untouched() {
        let nav = NavState::default();
        assert_eq!(nav.apply(NavAction::StartReship(order())), nav);
        assert_eq!(nav.apply(NavAction::Finish), nav);
    }

    #[test]
    fn reset_returns_to_inbox() {
        let nav = NavState::default()
            .apply(NavAction::SelectTab(Tab::Settings))
            .apply(NavAction::Reset);
        assert_eq!(nav, NavState::default());
    }
}
