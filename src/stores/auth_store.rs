// ============================================================================
// AUTH STORE - SESIÓN EXPLÍCITA DEL AGENTE
// ============================================================================
// Dueño único de la sesión: se crea en login, se invalida en logout o 401.
// Se pasa por handle (Rc) al ApiClient y a los hooks; nadie más lee
// localStorage directamente.
// ============================================================================

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::models::{Agent, Session};
use crate::utils::storage::{load_json, save_json, LocalSessionStorage, MemoryStorage, SessionStorage, StorageError};
use crate::utils::{STORAGE_KEY_AGENT, STORAGE_KEY_TOKEN};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidationReason {
    Logout,
    Unauthorized,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListenerId(u64);

type Listener = Rc<dyn Fn(Option<&Session>)>;

struct AuthInner {
    storage: Rc<dyn SessionStorage>,
    session: Option<Session>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

#[derive(Clone)]
pub struct AuthStore {
    inner: Rc<RefCell<AuthInner>>,
}

impl PartialEq for AuthStore {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for AuthStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthStore")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl AuthStore {
    /// Restaura la sesión persistida (token + agente) si ambos existen
    pub fn new(storage: Rc<dyn SessionStorage>) -> Self {
        let session = restore(storage.as_ref());
        match &session {
            Some(s) => log::info!("🔐 [AUTH] Sesión restaurada para {}", s.agent.email),
            None => log::info!("🔐 [AUTH] Sin sesión guardada"),
        }
        Self {
            inner: Rc::new(RefCell::new(AuthInner {
                storage,
                session,
                listeners: Vec::new(),
                next_listener: 0,
            })),
        }
    }

    /// Store respaldado por localStorage (o memoria si no hay localStorage)
    pub fn browser() -> Self {
        if LocalSessionStorage::is_available() {
            Self::new(Rc::new(LocalSessionStorage))
        } else {
            log::warn!("⚠️ [AUTH] localStorage no disponible, sesión solo en memoria");
            Self::new(Rc::new(MemoryStorage::new()))
        }
    }

    pub fn session(&self) -> Option<Session> {
        self.inner.borrow().session.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.inner.borrow().session.as_ref().map(|s| s.token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.borrow().session.is_some()
    }

    /// Login correcto: persiste y notifica
    pub fn establish(&self, session: Session) -> Result<(), StorageError> {
        {
            let mut inner = self.inner.borrow_mut();
            inner.storage.set_raw(STORAGE_KEY_TOKEN, &session.token)?;
            save_json(inner.storage.as_ref(), STORAGE_KEY_AGENT, &session.agent)?;
            log::info!("✅ [AUTH] Sesión creada para {}", session.agent.email);
            inner.session = Some(session);
        }
        self.notify();
        Ok(())
    }

    /// Actualiza la disponibilidad del agente en la sesión activa
    pub fn set_availability(&self, is_available: bool) -> Result<(), StorageError> {
        {
            let mut inner = self.inner.borrow_mut();
            let storage = inner.storage.clone();
            let Some(session) = inner.session.as_mut() else {
                return Ok(());
            };
            session.agent.is_available = is_available;
            save_json(storage.as_ref(), STORAGE_KEY_AGENT, &session.agent)?;
        }
        self.notify();
        Ok(())
    }

    /// Logout o 401: borra la sesión persistida. Idempotente.
    pub fn invalidate(&self, reason: InvalidationReason) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.storage.remove(STORAGE_KEY_TOKEN);
            inner.storage.remove(STORAGE_KEY_AGENT);
            if inner.session.take().is_none() {
                return;
            }
        }
        match reason {
            InvalidationReason::Logout => log::info!("👋 [AUTH] Logout"),
            InvalidationReason::Unauthorized => log::warn!("🔒 [AUTH] 401 del servidor, sesión invalidada"),
        }
        self.notify();
    }

    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(Option<&Session>) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = ListenerId(inner.next_listener);
        inner.next_listener += 1;
        inner.listeners.push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: ListenerId) {
        self.inner.borrow_mut().listeners.retain(|(l, _)| *l != id);
    }

    // Los listeners se llaman sin el borrow activo para que puedan leer el store
    fn notify(&self) {
        let (session, listeners): (Option<Session>, Vec<Listener>) = {
            let inner = self.inner.borrow();
            (
                inner.session.clone(),
                inner.listeners.iter().map(|(_, l)| l.clone()).collect(),
            )
        };
        for listener in listeners {
            listener(session.as_ref());
        }
    }
}

fn restore(storage: &dyn SessionStorage) -> Option<Session> {
    let token = storage.get_raw(STORAGE_KEY_TOKEN).filter(|t| !t.trim().is_empty())?;
    let agent: Agent = load_json(storage, STORAGE_KEY_AGENT)?;
    Some(Session::new(token, agent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AgentRole;
    use std::cell::Cell;

    fn agent() -> Agent {
        Agent {
            id: "7".into(),
            name: "Dana".into(),
            email: "dana@example.com".into(),
            role: AgentRole::Agent,
            is_available: true,
        }
    }

    #[test]
    fn session_persists_across_store_instances() {
        let storage: Rc<dyn SessionStorage> = Rc::new(MemoryStorage::new());
        let store = AuthStore::new(storage.clone());
        assert!(!store.is_authenticated());

        store.establish(Session::new("abc123", agent())).unwrap();
        assert_eq!(storage.get_raw(STORAGE_KEY_TOKEN).as_deref(), Some("abc123"));

        let restored = AuthStore::new(storage.clone());
        assert_eq!(restored.token().as_deref(), Some("abc123"));
        assert_eq!(restored.session().map(|s| s.agent.name), Some("Dana".to_string()));
    }

    #[test]
    fn token_without_agent_is_not_a_session() {
        let storage = Rc::new(MemoryStorage::new());
        storage.set_raw(STORAGE_KEY_TOKEN, "abc123").unwrap();
        let store = AuthStore::new(storage);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn invalidate_clears_storage_and_notifies_once() {
        let storage: Rc<dyn SessionStorage> = Rc::new(MemoryStorage::new());
        let store = AuthStore::new(storage.clone());
        store.establish(Session::new("abc123", agent())).unwrap();

        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        let id = store.subscribe(move |session| {
            assert!(session.is_none());
            seen.set(seen.get() + 1);
        });

        store.invalidate(InvalidationReason::Unauthorized);
        store.invalidate(InvalidationReason::Logout);
        assert_eq!(calls.get(), 1);
        assert_eq!(storage.get_raw(STORAGE_KEY_TOKEN), None);
        assert_eq!(storage.get_raw(STORAGE_KEY_AGENT), None);

        store.unsubscribe(id);
    }

    #[test]
    fn availability_is_persisted() {
        let storage: Rc<dyn SessionStorage> = Rc::new(MemoryStorage::new());
        let store = AuthStore::new(storage.clone());
        store.establish(Session::new("abc123", agent())).unwrap();
        store.set_availability(false).unwrap();

        let restored = AuthStore::new(storage);
        assert_eq!(restored.session().map(|s| s.agent.is_available), Some(false));
    }

    #[test]
    fn listeners_can_read_the_store() {
        let store = AuthStore::new(Rc::new(MemoryStorage::new()));
        let observed = store.clone();
        let seen = Rc::new(Cell::new(false));
        let flag = seen.clone();
        store.subscribe(move |_| flag.set(observed.is_authenticated()));
        store.establish(Session::new("t", agent())).unwrap();
        assert!(seen.get());
    }
}
