//! Optional process-wide engine handle.
//!
//! Libraries that cannot thread an [`Alog`] handle through their call
//! graph can install one globally. The global is optional: nothing in the
//! engine requires it, and tests that build their own handles never touch
//! it.

use std::sync::{PoisonError, RwLock};

use crate::Alog;

static GLOBAL: RwLock<Option<Alog>> = RwLock::new(None);

/// Installs the engine as the process-wide handle, replacing any previous
/// one.
pub fn install(engine: Alog) {
    *GLOBAL.write().unwrap_or_else(PoisonError::into_inner) = Some(engine);
}

/// Returns a clone of the installed engine, if any.
#[must_use]
pub fn current() -> Option<Alog> {
    GLOBAL
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Removes the installed engine.
pub fn reset() {
    *GLOBAL.write().unwrap_or_else(PoisonError::into_inner) = None;
}
