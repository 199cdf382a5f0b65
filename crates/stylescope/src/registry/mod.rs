//! Style registry: scoped id allocation, style storage and change events.
//!
//! This module provides:
//!
//! - [`Registry`]: Mints [`StyleBinding`](crate::StyleBinding)s and aggregates their style text
//! - [`ChangeEvent`]: Notification sent to listeners on add, remove and clear
//! - [`Subscription`]: Handle returned by [`Registry::on_change`]
//!
//! A registry runs in one of two storage profiles selected by
//! [`StoreMode`](crate::StoreMode): an addressable map supporting removal and
//! overwrite by id, or an append-only list.

mod events;
#[allow(clippy::module_inception)]
mod registry;
mod store;

use std::sync::{Mutex, MutexGuard, PoisonError};

pub use events::{ChangeEvent, ChangeKind, Subscription};
pub use registry::{create_registry, Registry};

pub(crate) use registry::Shared;

/// Locks a registry mutex, recovering the data if a listener panicked while
/// another lock holder was active.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
