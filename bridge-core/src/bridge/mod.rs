//! The bridge context: connection state, readiness, and remote invocation.
//!
//! # Architecture
//!
//! A [`Bridge`] is a cheap clone handle over one shared [`BridgeInner`].
//! [`Bridge::connect`] spawns two background tasks:
//!
//! 1. the dispatch loop, draining inbound frames and routing them to the
//!    pending-call registry, the callback table, and the lifecycle listeners.
//!    It owns a strong reference, so the bridge keeps answering the host
//!    (function calls, close queries) for as long as the inbound channel is
//!    open, even after the caller drops every handle;
//! 2. the lifecycle task, which negotiates readiness as soon as the bridge
//!    exists and then emits periodic heartbeats. It holds only a `Weak`
//!    reference and exits once the dispatch loop and all handles are gone.
//!
//! Readiness is negotiated exactly once per bridge. The first task or caller
//! to need it claims negotiation, which then runs in its own spawned task;
//! every caller, the claimant included, parks on a watch channel until the
//! outcome lands. Cancelling a waiting caller never cancels negotiation.
//! Both outcomes are terminal: a bridge that reached `Ready` stays ready, and
//! one that reached `Failed` reports the same error to every later caller.

pub mod callbacks;
pub mod lifecycle;
pub mod pending;

mod dispatch;

use crate::config::{self, BridgeConfig, Z_INDEX_SEED};
use crate::error::BridgeError;
use crate::snapshot::HostSnapshot;
use crate::transport::{BoundaryTransport, DataListener};
use crate::value::BridgeValue;
use crate::wire::{self, BeforeUnload, Frame, MethodCall, ReadyAnnounce};

use callbacks::CallbackTable;
use lifecycle::{CloseInterceptor, ListenerGuard, ListenerSet, MenuClickListener};
use pending::PendingCalls;

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use backoff::backoff::{Backoff, Constant};
use log::{debug, info, warn};
use serde_json::Value;
use tokio::sync::{mpsc, watch};

/// Observer for inbound frames the dispatch loop could not route.
pub type FrameObserver = Arc<dyn Fn(&Value) + Send + Sync>;

/// Where the bridge stands in readiness negotiation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadyState {
    /// No one has needed the host yet.
    Uninitialized,
    /// One caller is polling the transport for the host context.
    Negotiating,
    /// Host context acquired and activation announced. Terminal.
    Ready,
    /// Negotiation failed; the message repeats for every later caller.
    /// Terminal.
    Failed(String),
}

/// Failure of one remote invocation.
///
/// Remote errors keep the host's payload verbatim so callers that understand
/// its shape (the API gateway does) can recover structure from it.
#[derive(Debug)]
pub enum InvokeError {
    Bridge(BridgeError),
    Remote(Value),
}

impl InvokeError {
    /// Collapse into a [`BridgeError`], stringifying a remote payload.
    #[track_caller]
    pub fn into_bridge_error(self) -> BridgeError {
        match self {
            InvokeError::Bridge(error) => error,
            InvokeError::Remote(payload) => {
                let message = match &payload {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                };
                BridgeError::remote_invocation(message)
            }
        }
    }
}

enum CallStrategy {
    Local(crate::snapshot::HostMethod),
    Remote,
}

pub(crate) struct BridgeInner {
    transport: Arc<dyn BoundaryTransport>,
    config: BridgeConfig,
    pending: PendingCalls,
    callbacks: CallbackTable,
    snapshot: RwLock<Option<HostSnapshot>>,
    ready: watch::Sender<ReadyState>,
    negotiation_claimed: AtomicBool,
    close_interceptors: ListenerSet<CloseInterceptor>,
    menu_listeners: ListenerSet<MenuClickListener>,
    frame_observer: Mutex<Option<FrameObserver>>,
    z_index: AtomicI64,
}

/// Handle to one guest ↔ host connection.
#[derive(Clone)]
pub struct Bridge {
    inner: Arc<BridgeInner>,
}

impl Bridge {
    /// Connect over `transport`, draining host frames from `inbound`.
    ///
    /// Uses the process-wide config override when one is set, otherwise the
    /// defaults. Readiness negotiation starts immediately in the background.
    pub fn connect(
        transport: Arc<dyn BoundaryTransport>,
        inbound: mpsc::UnboundedReceiver<Value>,
    ) -> Self {
        let config = config::get_override_config().unwrap_or_default();
        Self::with_config(transport, inbound, config)
    }

    /// Connect with explicit timing configuration.
    pub fn with_config(
        transport: Arc<dyn BoundaryTransport>,
        inbound: mpsc::UnboundedReceiver<Value>,
        config: BridgeConfig,
    ) -> Self {
        let (ready, _) = watch::channel(ReadyState::Uninitialized);

        let inner = Arc::new(BridgeInner {
            transport,
            config,
            pending: PendingCalls::new(),
            callbacks: CallbackTable::new(),
            snapshot: RwLock::new(None),
            ready,
            negotiation_claimed: AtomicBool::new(false),
            close_interceptors: ListenerSet::new(),
            menu_listeners: ListenerSet::new(),
            frame_observer: Mutex::new(None),
            z_index: AtomicI64::new(Z_INDEX_SEED),
        });

        tokio::spawn(dispatch::run(Arc::clone(&inner), inbound));
        tokio::spawn(dispatch::lifecycle(Arc::downgrade(&inner)));

        Self { inner }
    }

    /// Block until the bridge is ready, or surface why it never will be.
    ///
    /// Every host-touching operation calls this first. Outside a host
    /// container it fails immediately rather than polling.
    pub async fn ensure_ready(&self) -> Result<(), BridgeError> {
        Arc::clone(&self.inner).ensure_ready().await
    }

    /// Invoke a host operation, waiting indefinitely for the result.
    pub async fn invoke(
        &self,
        method: &str,
        args: Vec<BridgeValue>,
    ) -> Result<Value, BridgeError> {
        self.invoke_raw(method, args, None)
            .await
            .map_err(InvokeError::into_bridge_error)
    }

    /// Invoke a host operation with a caller-supplied expiry.
    ///
    /// On expiry the correlation entry is reclaimed and a late host reply is
    /// dropped silently.
    pub async fn invoke_with_timeout(
        &self,
        method: &str,
        args: Vec<BridgeValue>,
        timeout: Duration,
    ) -> Result<Value, BridgeError> {
        self.invoke_raw(method, args, Some(timeout))
            .await
            .map_err(InvokeError::into_bridge_error)
    }

    /// Invoke a host operation, preserving a remote error payload verbatim.
    ///
    /// When the host injected an in-process implementation of `method`, it is
    /// called directly and the message channel is bypassed.
    pub async fn invoke_raw(
        &self,
        method: &str,
        args: Vec<BridgeValue>,
        timeout: Option<Duration>,
    ) -> Result<Value, InvokeError> {
        self.ensure_ready().await.map_err(InvokeError::Bridge)?;

        match self.inner.call_strategy(method) {
            CallStrategy::Local(host_method) => {
                debug!("invoking {method} locally");
                host_method(args).await.map_err(InvokeError::Remote)
            }
            CallStrategy::Remote => self.invoke_remote(method, args, timeout).await,
        }
    }

    async fn invoke_remote(
        &self,
        method: &str,
        args: Vec<BridgeValue>,
        timeout: Option<Duration>,
    ) -> Result<Value, InvokeError> {
        let args: Vec<Value> = args
            .iter()
            .map(|arg| arg.encode(&self.inner.callbacks))
            .collect();

        // Register before sending so the response can never race the entry.
        let (id, receiver) = self.inner.pending.register();
        let frame = Frame::Method(MethodCall {
            id: id.clone(),
            method: method.to_string(),
            args,
        });

        if let Err(error) = self.inner.send_frame(&frame) {
            self.inner.pending.abandon(&id);
            return Err(InvokeError::Bridge(error));
        }

        let settlement = match timeout {
            Some(limit) => match tokio::time::timeout(limit, receiver).await {
                Ok(settled) => settled,
                Err(_) => {
                    self.inner.pending.abandon(&id);
                    return Err(InvokeError::Bridge(BridgeError::timeout(format!(
                        "no response to {method} within {limit:?}"
                    ))));
                }
            },
            None => receiver.await,
        };

        match settlement {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(payload)) => Err(InvokeError::Remote(payload)),
            Err(_) => Err(InvokeError::Bridge(BridgeError::remote_invocation(
                format!("call to {method} was abandoned before a response arrived"),
            ))),
        }
    }

    /// Read a host property by dot path; `Null` when absent or not ready.
    pub fn property(&self, path: &str) -> Value {
        self.inner
            .snapshot
            .read()
            .ok()
            .and_then(|slot| slot.as_ref().map(|snapshot| snapshot.property(path)))
            .unwrap_or(Value::Null)
    }

    /// Clone the current host snapshot, if one has been acquired.
    pub fn snapshot(&self) -> Option<HostSnapshot> {
        self.inner.snapshot.read().ok().and_then(|slot| slot.clone())
    }

    /// Whether the transport believes a host container is present.
    pub fn is_embedded(&self) -> bool {
        self.inner.transport.is_embedded()
    }

    /// Current readiness, without waiting.
    pub fn ready_state(&self) -> ReadyState {
        self.inner.ready.borrow().clone()
    }

    pub fn config(&self) -> BridgeConfig {
        self.inner.config
    }

    /// Register a close interceptor; return true from it to veto the close.
    pub fn on_before_close(&self, interceptor: CloseInterceptor) -> ListenerGuard {
        self.inner.close_interceptors.register(interceptor)
    }

    /// Register a listener for host menu clicks.
    pub fn on_menu_click(&self, listener: MenuClickListener) -> ListenerGuard {
        self.inner.menu_listeners.register(listener)
    }

    /// Subscribe to host context pushes on the underlying transport.
    pub fn add_data_listener(&self, listener: DataListener, auto_trigger: bool) -> Option<u64> {
        self.inner.transport.add_data_listener(listener, auto_trigger)
    }

    pub fn remove_data_listener(&self, listener_id: u64) {
        self.inner.transport.remove_data_listener(listener_id);
    }

    /// Install an observer for inbound frames the dispatch loop dropped.
    pub fn set_frame_observer(&self, observer: Option<FrameObserver>) {
        if let Ok(mut slot) = self.inner.frame_observer.lock() {
            *slot = observer;
        }
    }

    /// Best-effort final notice that the guest is tearing down.
    ///
    /// Fire-and-forget: a send failure at teardown is logged, not surfaced.
    pub fn notify_unload(&self) {
        let frame = Frame::BeforeUnload(BeforeUnload {
            timestamp: unix_millis(),
        });
        if let Err(error) = self.inner.send_frame(&frame) {
            debug!("unload notice not delivered: {error}");
        }
    }

    pub(crate) fn bump_z_index(&self) -> i64 {
        self.inner.z_index.fetch_add(1, Ordering::Relaxed)
    }

    /// Raise the fallback counter so it never re-issues a value at or below
    /// one the host already allocated.
    pub(crate) fn seed_z_index(&self, floor: i64) {
        self.inner.z_index.fetch_max(floor, Ordering::Relaxed);
    }
}

impl BridgeInner {
    pub(crate) async fn ensure_ready(self: Arc<Self>) -> Result<(), BridgeError> {
        let mut receiver = self.ready.subscribe();
        match receiver.borrow().clone() {
            ReadyState::Ready => return Ok(()),
            ReadyState::Failed(message) => {
                return Err(BridgeError::unsupported_environment(message));
            }
            ReadyState::Uninitialized | ReadyState::Negotiating => {}
        }

        let claimed = self
            .negotiation_claimed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();

        // Negotiation runs detached. The claimant waits on the watch channel
        // like everyone else, so cancelling its future cannot strand the
        // channel in `Negotiating`.
        if claimed {
            let _ = self.ready.send(ReadyState::Negotiating);
            let negotiator = Arc::clone(&self);
            tokio::spawn(async move {
                match negotiator.negotiate().await {
                    Ok(()) => {
                        info!("bridge is ready");
                        let _ = negotiator.ready.send(ReadyState::Ready);
                    }
                    Err(error) => {
                        warn!("readiness negotiation failed: {error}");
                        let _ = negotiator.ready.send(ReadyState::Failed(error.to_string()));
                    }
                }
            });
        }

        let settled = receiver
            .wait_for(|state| matches!(state, ReadyState::Ready | ReadyState::Failed(_)))
            .await;

        match settled {
            Ok(state) => match (*state).clone() {
                ReadyState::Ready => Ok(()),
                ReadyState::Failed(message) => {
                    Err(BridgeError::unsupported_environment(message))
                }
                ReadyState::Uninitialized | ReadyState::Negotiating => {
                    Err(BridgeError::unsupported_environment(
                        "readiness channel settled in a non-terminal state",
                    ))
                }
            },
            Err(_) => Err(BridgeError::unsupported_environment(
                "bridge was dropped during readiness negotiation",
            )),
        }
    }

    /// Poll the transport for the host context, then announce activation.
    async fn negotiate(&self) -> Result<(), BridgeError> {
        if !self.transport.is_embedded() {
            return Err(BridgeError::unsupported_environment(
                "not running inside a host container",
            ));
        }

        let mut backoff = Constant::new(self.config.poll_interval);
        let mut attempts = 0;

        let snapshot = loop {
            if let Some(snapshot) = self.stored_or_transport_snapshot() {
                break snapshot;
            }

            attempts += 1;
            if attempts >= self.config.poll_max_attempts {
                return Err(BridgeError::unsupported_environment(format!(
                    "host context never appeared after {attempts} probes"
                )));
            }

            let delay = backoff.next_backoff().unwrap_or(self.config.poll_interval);
            tokio::time::sleep(delay).await;
        };

        debug!(
            "acquired host snapshot (kind {:?}) after {attempts} probes",
            snapshot.kind
        );
        self.store_snapshot(snapshot);

        self.send_frame(&Frame::Ready(ReadyAnnounce {
            support_before_close: true,
        }))?;

        Ok(())
    }

    fn stored_or_transport_snapshot(&self) -> Option<HostSnapshot> {
        if let Some(stored) = self.snapshot.read().ok().and_then(|slot| slot.clone()) {
            return Some(stored);
        }
        self.transport.snapshot()
    }

    pub(crate) fn store_snapshot(&self, snapshot: HostSnapshot) {
        if let Ok(mut slot) = self.snapshot.write() {
            *slot = Some(snapshot);
        }
    }

    fn call_strategy(&self, method: &str) -> CallStrategy {
        match self
            .snapshot
            .read()
            .ok()
            .and_then(|slot| slot.as_ref().and_then(|snapshot| snapshot.method(method)))
        {
            Some(host_method) => CallStrategy::Local(host_method),
            None => CallStrategy::Remote,
        }
    }

    pub(crate) fn send_frame(&self, frame: &Frame) -> Result<(), BridgeError> {
        self.transport.send(wire::encode(frame))?;
        Ok(())
    }

    pub(crate) fn observe_unrouted(&self, raw: &Value) {
        debug!("dropping unroutable inbound frame");
        if let Some(observer) = self
            .frame_observer
            .lock()
            .ok()
            .and_then(|slot| slot.clone())
        {
            observer(raw);
        }
    }

    pub(crate) fn pending(&self) -> &PendingCalls {
        &self.pending
    }

    pub(crate) fn callbacks(&self) -> &CallbackTable {
        &self.callbacks
    }

    pub(crate) fn close_interceptors(&self) -> &ListenerSet<CloseInterceptor> {
        &self.close_interceptors
    }

    pub(crate) fn menu_listeners(&self) -> &ListenerSet<MenuClickListener> {
        &self.menu_listeners
    }

    pub(crate) fn heartbeat_interval(&self) -> Duration {
        self.config.heartbeat_interval
    }
}

pub(crate) fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
