// ============================================================================
// LIVE EVENT CLIENT - DRIVER DEL NAVEGADOR
// ============================================================================
// Ejecuta los comandos de LiveEventMachine: un único EventSource, un único
// timer de reconexión y el puente del service worker. Los closures guardan
// Weak para no mantener vivo el cliente.
// ============================================================================

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, EventSource, MessageEvent};
use yew::Callback;

use super::backoff::ReconnectBackoff;
use super::machine::{ConnectionId, LiveCommand, LiveEventMachine, LiveState, StreamSignal};
use super::worker_bridge::WorkerBridge;
use crate::config::CONFIG;
use crate::models::IncomingEvent;
use crate::utils::{browser, SSE_EVENT_CONNECTED, SSE_EVENT_INCOMING};

struct ClientInner {
    machine: LiveEventMachine,
    stream: Option<StreamHandle>,
    reconnect: Option<Timeout>,
    bridge: Option<WorkerBridge>,
    sink: Callback<IncomingEvent>,
}

pub struct LiveEventClient {
    inner: Rc<RefCell<ClientInner>>,
}

impl LiveEventClient {
    pub fn new(sink: Callback<IncomingEvent>) -> Self {
        Self::with_machine(
            LiveEventMachine::new(CONFIG.api_base.clone(), ReconnectBackoff::default()),
            sink,
        )
    }

    pub fn with_machine(machine: LiveEventMachine, sink: Callback<IncomingEvent>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ClientInner {
                machine,
                stream: None,
                reconnect: None,
                bridge: None,
                sink,
            })),
        }
    }

    pub fn connect(&self, token: &str) {
        let commands = self.inner.borrow_mut().machine.connect(token);
        execute(&self.inner, commands);
    }

    pub fn disconnect(&self) {
        let commands = self.inner.borrow_mut().machine.disconnect();
        execute(&self.inner, commands);
    }

    pub fn state(&self) -> LiveState {
        self.inner.borrow().machine.state()
    }

    /// Suscribe el cliente a los mensajes del service worker
    pub fn listen_to_worker(&self) {
        if self.inner.borrow().bridge.is_some() {
            return;
        }
        let weak = Rc::downgrade(&self.inner);
        let bridge = WorkerBridge::attach(move |message| {
            if let Some(inner) = weak.upgrade() {
                let commands = inner.borrow_mut().machine.worker_message(message);
                execute(&inner, commands);
            }
        });
        self.inner.borrow_mut().bridge = bridge;
    }
}

impl Drop for LiveEventClient {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.try_borrow_mut() {
            let commands = inner.machine.disconnect();
            drop(inner);
            execute(&self.inner, commands);
        }
    }
}

// Nunca se mantiene el borrow mientras se emite al sink o se libera un recurso
fn execute(inner: &Rc<RefCell<ClientInner>>, commands: Vec<LiveCommand>) {
    for command in commands {
        match command {
            LiveCommand::Open { id, url } => match StreamHandle::open(&url, id, Rc::downgrade(inner)) {
                Ok(handle) => {
                    let previous = inner.borrow_mut().stream.replace(handle);
                    release(previous);
                }
                Err(e) => {
                    log::error!("❌ [SSE] No se pudo crear EventSource: {:?}", e);
                    // Se reporta como error de transporte fuera de este ciclo
                    let weak = Rc::downgrade(inner);
                    spawn_local(async move {
                        dispatch(&weak, id, StreamSignal::Error);
                    });
                }
            },
            LiveCommand::Close { id } => {
                let handle = {
                    let mut guard = inner.borrow_mut();
                    let current = guard.stream.as_ref().map(|s| s.id == id).unwrap_or(false);
                    if current {
                        guard.stream.take()
                    } else {
                        None
                    }
                };
                release(handle);
            }
            LiveCommand::ScheduleReconnect { delay_ms } => {
                let weak = Rc::downgrade(inner);
                let timer = Timeout::new(delay_ms, move || {
                    if let Some(inner) = weak.upgrade() {
                        let commands = inner.borrow_mut().machine.reconnect_due();
                        execute(&inner, commands);
                    }
                });
                let previous = inner.borrow_mut().reconnect.replace(timer);
                drop(previous);
            }
            LiveCommand::CancelReconnect => {
                let timer = inner.borrow_mut().reconnect.take();
                drop(timer);
            }
            LiveCommand::Deliver(event) => {
                let sink = inner.borrow().sink.clone();
                sink.emit(event);
            }
            LiveCommand::Vibrate(pattern) => browser::vibrate(pattern),
        }
    }
}

fn dispatch(weak: &Weak<RefCell<ClientInner>>, id: ConnectionId, signal: StreamSignal) {
    if let Some(inner) = weak.upgrade() {
        let commands = inner.borrow_mut().machine.handle(id, signal);
        execute(&inner, commands);
    }
}

/// Cierra ya el EventSource y libera sus closures en otra tarea, porque
/// puede que estemos dentro de uno de ellos
fn release(handle: Option<StreamHandle>) {
    if let Some(handle) = handle {
        handle.source.close();
        spawn_local(async move {
            drop(handle);
        });
    }
}

// ============================================================================
// EVENTSOURCE
// ============================================================================

struct StreamHandle {
    id: ConnectionId,
    source: EventSource,
    on_connected: Closure<dyn FnMut(MessageEvent)>,
    on_incoming: Closure<dyn FnMut(MessageEvent)>,
    _on_error: Closure<dyn FnMut(Event)>,
}

impl StreamHandle {
    fn open(url: &str, id: ConnectionId, client: Weak<RefCell<ClientInner>>) -> Result<Self, JsValue> {
        let source = EventSource::new(url)?;

        let on_connected = {
            let client = client.clone();
            Closure::wrap(Box::new(move |event: MessageEvent| {
                let payload = event.data().as_string().unwrap_or_default();
                dispatch(&client, id, StreamSignal::Connected(payload));
            }) as Box<dyn FnMut(MessageEvent)>)
        };

        let on_incoming = {
            let client = client.clone();
            Closure::wrap(Box::new(move |event: MessageEvent| {
                let raw = event.data().as_string().unwrap_or_default();
                dispatch(&client, id, StreamSignal::Incoming(raw));
            }) as Box<dyn FnMut(MessageEvent)>)
        };

        let on_error = Closure::wrap(Box::new(move |_event: Event| {
            dispatch(&client, id, StreamSignal::Error);
        }) as Box<dyn FnMut(Event)>);

        source.add_event_listener_with_callback(SSE_EVENT_CONNECTED, on_connected.as_ref().unchecked_ref())?;
        source.add_event_listener_with_callback(SSE_EVENT_INCOMING, on_incoming.as_ref().unchecked_ref())?;
        source.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        Ok(Self {
            id,
            source,
            on_connected,
            on_incoming,
            _on_error: on_error,
        })
    }
}

impl Drop for StreamHandle {
    fn drop(&mut self) {
        let _ = self
            .source
            .remove_event_listener_with_callback(SSE_EVENT_CONNECTED, self.on_connected.as_ref().unchecked_ref());
        let _ = self
            .source
            .remove_event_listener_with_callback(SSE_EVENT_INCOMING, self.on_incoming.as_ref().unchecked_ref());
        self.source.set_onerror(None);
        self.source.close();
        log::debug!("🔌 [SSE] Recursos de la conexión #{} liberados", self.id.value());
    }
}
