//! Theme preference controller for light/dark/system display modes.
//!
//! This crate provides:
//!
//! - [`ThemeMode`]: the persisted user selection among light, dark and system
//! - [`ColorMode`]: the binary display mode actually applied
//! - [`ThemeController`]: single source of truth for the current mode,
//!   with durable persistence and subscriber notification
//! - [`AmbientSignal`], [`OsAmbient`], [`ManualAmbient`]: the host
//!   environment's own light/dark preference
//! - [`PreferenceStore`], [`FileStore`], [`MemoryStore`]: storage for the
//!   preference record
//!
//! The controller owns the mode, loads it from storage at initialization,
//! persists explicit selections and notifies subscribers synchronously on
//! every change. `system` mode resolves against the ambient environment
//! preference at read time, so it tracks the host without polling.
//!
//! # Example
//!
//! ```rust
//! use nightswitch::{ColorMode, ManualAmbient, MemoryStore, ThemeController, ThemeMode};
//!
//! let ambient = ManualAmbient::new(Some(ColorMode::Dark));
//! let mut controller = ThemeController::new(MemoryStore::new(), ambient.clone());
//! controller.initialize();
//!
//! // No stored preference: system mode, resolved against the environment.
//! assert_eq!(controller.mode(), ThemeMode::System);
//! assert_eq!(controller.resolved_mode(), ColorMode::Dark);
//!
//! let subscription = controller.subscribe(|mode, resolved| {
//!     println!("{mode} renders as {resolved:?}");
//! });
//!
//! controller.set_mode(ThemeMode::Light);
//! assert_eq!(controller.resolved_mode(), ColorMode::Light);
//!
//! subscription.cancel();
//! ```
//!
//! Applications persisting to the user's config directory construct the
//! controller with [`ThemeController::for_app`], which wires up
//! [`FileStore`] and OS detection.

mod ambient;
mod controller;
mod error;
mod mode;
mod store;

pub use ambient::{
    set_ambient_probe, AmbientListener, AmbientSignal, AmbientWatch, ManualAmbient, OsAmbient,
};
pub use controller::{Subscription, ThemeController};
pub use error::ThemeError;
pub use mode::{ColorMode, ThemeMode};
pub use store::{FileStore, MemoryStore, PreferenceStore};
