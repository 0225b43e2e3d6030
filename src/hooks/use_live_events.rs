// ============================================================================
// USE LIVE EVENTS HOOK
// ============================================================================
// Un LiveEventClient por token: se crea al autenticar y se desconecta al
// cambiar de token o al desmontar. El evento activo vive en un IncomingSlot.
// ============================================================================

use yew::prelude::*;

use crate::models::IncomingEvent;
use crate::services::LiveEventClient;
use crate::viewmodels::{IncomingAction, IncomingSlot, NavAction};

#[derive(Clone)]
pub struct UseLiveEventsHandle {
    pub active: Option<IncomingEvent>,
    /// Aplica una acción del popup y devuelve la navegación resultante
    pub act: Callback<IncomingAction, Option<NavAction>>,
}

#[hook]
pub fn use_live_events(token: Option<String>) -> UseLiveEventsHandle {
    let slot = use_state(IncomingSlot::default);

    {
        let slot = slot.clone();
        use_effect_with(token, move |token| {
            let client = token.as_ref().map(|token| {
                let sink = Callback::from(move |event: IncomingEvent| {
                    log::info!("📞 [LIVE] {} de {}", event.kind.headline(), event.caller_label());
                    let mut next = IncomingSlot::default();
                    next.receive(event);
                    slot.set(next);
                });
                let client = LiveEventClient::new(sink);
                client.listen_to_worker();
                client.connect(token);
                client
            });
            move || {
                if let Some(client) = client {
                    client.disconnect();
                }
            }
        });
    }

    let act = {
        let slot = slot.clone();
        Callback::from(move |action: IncomingAction| {
            let mut next = (*slot).clone();
            let nav = next.act(action);
            slot.set(next);
            nav
        })
    };

    UseLiveEventsHandle {
        active: slot.active().cloned(),
        act,
    }
}
