//! Ambient light/dark preference reported by the host environment.

use std::sync::{Arc, Mutex};

use dark_light::{detect as detect_os_mode, Mode as OsMode};
use once_cell::sync::Lazy;

use crate::mode::ColorMode;

/// Change listener registered through [`AmbientSignal::watch`].
pub type AmbientListener = Box<dyn Fn(ColorMode) + Send + Sync>;

type SharedListener = Arc<dyn Fn(ColorMode) + Send + Sync>;

/// Source of the host environment's light/dark preference.
///
/// Exposes the two capabilities the controller needs: a synchronous query
/// of the preference right now, and a registration for change
/// notifications. [`OsAmbient`] reads the operating system;
/// [`ManualAmbient`] is driven by the embedder.
pub trait AmbientSignal {
    /// Current ambient preference, or `None` when the environment cannot
    /// report one.
    fn current(&self) -> Option<ColorMode>;

    /// Registers a change listener. The registration lives until the
    /// returned guard is dropped.
    fn watch(&self, listener: AmbientListener) -> AmbientWatch;
}

/// Guard for an ambient watch registration.
///
/// Dropping the guard removes the listener from the source, so a watch
/// established at controller initialization is released on every teardown
/// path.
pub struct AmbientWatch {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl AmbientWatch {
    /// Guard that unregisters by running `cancel` when dropped.
    pub fn new(cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Guard for sources with nothing to unregister.
    pub fn inert() -> Self {
        Self { cancel: None }
    }
}

impl Drop for AmbientWatch {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for AmbientWatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AmbientWatch")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Ambient preference read from the operating system.
///
/// Detection goes through a process-wide probe so tests can force a
/// reading; see [`set_ambient_probe`]. The OS backend emits no change
/// notifications, so [`watch`](AmbientSignal::watch) registrations are
/// inert; `system` mode stays accurate because the controller re-queries
/// [`current`](AmbientSignal::current) on every resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsAmbient;

impl OsAmbient {
    pub fn new() -> Self {
        Self
    }
}

impl AmbientSignal for OsAmbient {
    fn current(&self) -> Option<ColorMode> {
        probe_ambient()
    }

    fn watch(&self, _listener: AmbientListener) -> AmbientWatch {
        AmbientWatch::inert()
    }
}

type AmbientProbe = fn() -> Option<ColorMode>;

static AMBIENT_PROBE: Lazy<Mutex<AmbientProbe>> = Lazy::new(|| Mutex::new(os_ambient_probe));

/// Overrides the probe used to read the OS light/dark preference.
///
/// This is useful for testing or when you want to force a specific
/// reading for every [`OsAmbient`] in the process.
pub fn set_ambient_probe(probe: AmbientProbe) {
    let mut guard = AMBIENT_PROBE.lock().unwrap();
    *guard = probe;
}

fn probe_ambient() -> Option<ColorMode> {
    let probe = AMBIENT_PROBE.lock().unwrap();
    (*probe)()
}

fn os_ambient_probe() -> Option<ColorMode> {
    match detect_os_mode() {
        OsMode::Dark => Some(ColorMode::Dark),
        OsMode::Light => Some(ColorMode::Light),
    }
}

/// Embedder-driven ambient source.
///
/// Holds a current value and a listener registry; [`set`](Self::set)
/// updates the value and fires watchers synchronously. Clones share the
/// same underlying state, so a host can hand one clone to the controller
/// and keep another to push environment events from its own event loop.
///
/// # Example
///
/// ```rust
/// use nightswitch::{AmbientSignal, ColorMode, ManualAmbient};
///
/// let ambient = ManualAmbient::new(Some(ColorMode::Light));
/// assert_eq!(ambient.current(), Some(ColorMode::Light));
///
/// ambient.set(ColorMode::Dark);
/// assert_eq!(ambient.current(), Some(ColorMode::Dark));
/// ```
#[derive(Clone, Default)]
pub struct ManualAmbient {
    inner: Arc<Mutex<ManualInner>>,
}

#[derive(Default)]
struct ManualInner {
    current: Option<ColorMode>,
    next_id: u64,
    listeners: Vec<(u64, SharedListener)>,
}

impl ManualAmbient {
    /// Source starting at `initial`; `None` models an environment that
    /// cannot report a preference.
    pub fn new(initial: Option<ColorMode>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ManualInner {
                current: initial,
                ..ManualInner::default()
            })),
        }
    }

    /// Updates the ambient value and synchronously notifies watchers.
    pub fn set(&self, value: ColorMode) {
        let listeners: Vec<SharedListener> = {
            let mut inner = self.inner.lock().unwrap();
            inner.current = Some(value);
            inner
                .listeners
                .iter()
                .map(|(_, listener)| Arc::clone(listener))
                .collect()
        };
        // Listeners run outside the lock so they may query the source.
        for listener in listeners {
            (*listener)(value);
        }
    }

    /// Clears the value, so subsequent queries report unavailable.
    pub fn clear(&self) {
        self.inner.lock().unwrap().current = None;
    }

    #[cfg(test)]
    pub(crate) fn watcher_count(&self) -> usize {
        self.inner.lock().unwrap().listeners.len()
    }
}

impl std::fmt::Debug for ManualAmbient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock().unwrap();
        f.debug_struct("ManualAmbient")
            .field("current", &inner.current)
            .finish_non_exhaustive()
    }
}

impl AmbientSignal for ManualAmbient {
    fn current(&self) -> Option<ColorMode> {
        self.inner.lock().unwrap().current
    }

    fn watch(&self, listener: AmbientListener) -> AmbientWatch {
        let id = {
            let mut inner = self.inner.lock().unwrap();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.push((id, Arc::from(listener)));
            id
        };

        let inner = Arc::downgrade(&self.inner);
        AmbientWatch::new(move || {
            if let Some(inner) = inner.upgrade() {
                inner
                    .lock()
                    .unwrap()
                    .listeners
                    .retain(|(listener_id, _)| *listener_id != id);
            }
        })
    }
}
