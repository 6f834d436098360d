//! Controller error taxonomy.

use thiserror::Error;

/// Errors surfaced by the theme preference controller.
///
/// An environment that cannot report an ambient preference is not an
/// error: `system` mode simply resolves to light. See
/// [`ThemeMode::resolve`](crate::ThemeMode::resolve).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    /// Input outside the `light` / `dark` / `system` enumeration.
    /// Rejected synchronously; state is left unchanged.
    #[error("unknown theme mode '{0}', expected one of: light, dark, system")]
    InvalidMode(String),

    /// The durable preference write failed. Non-fatal: the in-memory
    /// mode stays authoritative for the session.
    #[error("could not persist theme preference: {0}")]
    Persist(String),
}
