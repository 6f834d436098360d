//! Theme preference controller.

use std::sync::{Arc, Mutex, Weak};

use tracing::{debug, warn};

use crate::ambient::{AmbientSignal, AmbientWatch, OsAmbient};
use crate::error::ThemeError;
use crate::mode::{ColorMode, ThemeMode};
use crate::store::{FileStore, PreferenceStore};

type SubscriberFn = dyn Fn(ThemeMode, ColorMode) + Send + Sync;

struct Shared {
    mode: ThemeMode,
    next_id: u64,
    subscribers: Vec<(u64, Arc<SubscriberFn>)>,
}

impl Shared {
    fn snapshot(&self) -> Vec<Arc<SubscriberFn>> {
        self.subscribers
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect()
    }
}

/// Single source of truth for the current [`ThemeMode`].
///
/// The controller mediates between durable storage, the ambient
/// environment signal and presentation consumers: it loads the stored
/// preference at [`initialize`](Self::initialize), answers mode queries,
/// persists explicit selections and notifies subscribers on every change.
///
/// Construct one instance per process and pass it by reference to
/// consumers; tests can run any number of independent instances. Dropping
/// the controller releases its ambient watch.
///
/// # Example
///
/// ```rust
/// use nightswitch::{ColorMode, ManualAmbient, MemoryStore, ThemeController, ThemeMode};
///
/// let ambient = ManualAmbient::new(Some(ColorMode::Dark));
/// let mut controller = ThemeController::new(MemoryStore::new(), ambient.clone());
/// controller.initialize();
///
/// assert_eq!(controller.mode(), ThemeMode::System);
/// assert_eq!(controller.resolved_mode(), ColorMode::Dark);
///
/// controller.set_mode(ThemeMode::Light);
/// assert_eq!(controller.resolved_mode(), ColorMode::Light);
/// ```
pub struct ThemeController {
    shared: Arc<Mutex<Shared>>,
    store: Box<dyn PreferenceStore + Send + Sync>,
    ambient: Arc<dyn AmbientSignal + Send + Sync>,
    watch: Option<AmbientWatch>,
}

impl ThemeController {
    /// Controller over the given store and ambient source.
    ///
    /// The mode starts at `system` until [`initialize`](Self::initialize)
    /// reads the preference record.
    pub fn new<S, A>(store: S, ambient: A) -> Self
    where
        S: PreferenceStore + Send + Sync + 'static,
        A: AmbientSignal + Send + Sync + 'static,
    {
        Self {
            shared: Arc::new(Mutex::new(Shared {
                mode: ThemeMode::System,
                next_id: 0,
                subscribers: Vec::new(),
            })),
            store: Box::new(store),
            ambient: Arc::new(ambient),
            watch: None,
        }
    }

    /// Controller wired to OS detection and the per-user preference file
    /// for the given application name.
    pub fn for_app(app: &str) -> Self {
        Self::new(FileStore::for_app(app), OsAmbient::new())
    }

    /// Reads the preference record and starts watching the ambient signal.
    ///
    /// An absent or unreadable record yields `system`. Calling again while
    /// already initialized is a no-op.
    pub fn initialize(&mut self) {
        if self.watch.is_some() {
            return;
        }

        let mode = self.store.load().unwrap_or_default();
        self.shared.lock().unwrap().mode = mode;
        debug!(mode = mode.as_str(), "theme preference loaded");

        let shared = Arc::downgrade(&self.shared);
        self.watch = Some(
            self.ambient
                .watch(Box::new(move |ambient| fan_out_ambient(&shared, ambient))),
        );
    }

    /// Current theme mode.
    pub fn mode(&self) -> ThemeMode {
        self.shared.lock().unwrap().mode
    }

    /// Concrete display mode after resolving `system` against the ambient
    /// signal. Computed on demand, never cached.
    pub fn resolved_mode(&self) -> ColorMode {
        self.mode().resolve(self.ambient.current())
    }

    /// Selects a mode: updates in-memory state, persists the record and
    /// synchronously notifies every subscriber before returning.
    ///
    /// Persistence is best-effort. A failed write is reported at `warn`
    /// and the new mode stays active for the session.
    pub fn set_mode(&self, mode: ThemeMode) {
        let subscribers = {
            let mut shared = self.shared.lock().unwrap();
            shared.mode = mode;
            shared.snapshot()
        };

        if let Err(err) = self.store.save(mode) {
            warn!(mode = mode.as_str(), error = %err, "theme preference not persisted");
        }

        let resolved = mode.resolve(self.ambient.current());
        // Callbacks run outside the lock and may re-enter the controller.
        for subscriber in subscribers {
            (*subscriber)(mode, resolved);
        }
    }

    /// Selects a mode from untyped input, e.g. a menu item id.
    ///
    /// Anything outside the `light` / `dark` / `system` enumeration is
    /// rejected with [`ThemeError::InvalidMode`]; state is unchanged and
    /// nothing is notified.
    pub fn set_mode_str(&self, input: &str) -> Result<(), ThemeError> {
        let mode = input.parse::<ThemeMode>()?;
        self.set_mode(mode);
        Ok(())
    }

    /// Registers a callback invoked with the new mode and its resolved
    /// display mode on every [`set_mode`](Self::set_mode), and on ambient
    /// changes while the mode is `system`.
    ///
    /// Callbacks fire in registration order.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(ThemeMode, ColorMode) + Send + Sync + 'static,
    {
        let callback: Arc<SubscriberFn> = Arc::new(callback);
        let mut shared = self.shared.lock().unwrap();
        let id = shared.next_id;
        shared.next_id += 1;
        shared.subscribers.push((id, callback));
        Subscription {
            id,
            shared: Arc::downgrade(&self.shared),
        }
    }
}

impl std::fmt::Debug for ThemeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeController")
            .field("mode", &self.mode())
            .field("initialized", &self.watch.is_some())
            .finish_non_exhaustive()
    }
}

/// Delivers an ambient change to subscribers while the mode is `system`.
/// Explicit modes ignore the environment.
fn fan_out_ambient(shared: &Weak<Mutex<Shared>>, ambient: ColorMode) {
    let shared = match shared.upgrade() {
        Some(shared) => shared,
        None => return,
    };

    let subscribers = {
        let shared = shared.lock().unwrap();
        if shared.mode != ThemeMode::System {
            return;
        }
        shared.snapshot()
    };
    for subscriber in subscribers {
        (*subscriber)(ThemeMode::System, ambient);
    }
}

/// Handle returned by [`ThemeController::subscribe`].
///
/// [`cancel`](Self::cancel) removes the callback; a second cancel is a
/// no-op. Dropping the handle without cancelling leaves the subscription
/// active for the controller's lifetime.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    shared: Weak<Mutex<Shared>>,
}

impl Subscription {
    /// Removes the callback from the registry.
    pub fn cancel(&self) {
        if let Some(shared) = self.shared.upgrade() {
            shared
                .lock()
                .unwrap()
                .subscribers
                .retain(|(id, _)| *id != self.id);
        }
    }
}
