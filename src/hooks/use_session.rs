// ============================================================================
// USE SESSION HOOK
// ============================================================================
// Refleja el AuthStore en estado de Yew: login, logout y 401 re-renderizan
// la app sin recargar.
// ============================================================================

use yew::prelude::*;

use crate::models::Session;
use crate::stores::{AuthStore, InvalidationReason};

#[derive(Clone, PartialEq)]
pub struct UseSessionHandle {
    pub session: Option<Session>,
    pub logout: Callback<()>,
}

impl UseSessionHandle {
    pub fn token(&self) -> Option<String> {
        self.session.as_ref().map(|s| s.token.clone())
    }
}

#[hook]
pub fn use_session(store: &AuthStore) -> UseSessionHandle {
    let session = use_state(|| store.session());

    {
        let session = session.clone();
        use_effect_with(store.clone(), move |store| {
            // Puede haber cambiado entre el render y el efecto
            session.set(store.session());
            let id = {
                let session = session.clone();
                store.subscribe(move |current| session.set(current.cloned()))
            };
            let store = store.clone();
            move || store.unsubscribe(id)
        });
    }

    let logout = {
        let store = store.clone();
        Callback::from(move |_| store.invalidate(InvalidationReason::Logout))
    };

    UseSessionHandle {
        session: (*session).clone(),
        logout,
    }
}
