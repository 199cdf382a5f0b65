//! The registry itself.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use tracing::debug;

use super::events::{ChangeEvent, Listeners, Subscription};
use super::lock;
use super::store::StyleStore;
use crate::binding::{BindingOptions, StyleBinding};
use crate::config::RegistryConfig;

/// State shared by a registry handle, its bindings and its subscriptions.
pub(crate) struct Shared {
    pub(crate) config: RegistryConfig,
    pub(crate) state: Mutex<RegistryState>,
    pub(crate) listeners: Mutex<Listeners>,
}

pub(crate) struct RegistryState {
    /// Last counter value used per scope name. Never decreases.
    counters: HashMap<String, u64>,
    /// Every id handed out so far, across all scopes.
    allocated: HashSet<String>,
    store: StyleStore,
}

/// Allocates scoped ids and collects the style text registered under them.
///
/// `Registry` is a cheap handle: clones share the same counters, store and
/// listeners. Every mutating operation runs under a single lock per registry,
/// so a registry can be shared across threads, although rendering is
/// normally a single-threaded pass.
///
/// No operation on a registry fails. Unknown ids are ignored, re-registering
/// an id overwrites it (or appends, for [`StoreMode::AppendOnly`](crate::StoreMode::AppendOnly)).
///
/// # Example
///
/// ```rust
/// use stylescope::{BindingOptions, Registry};
///
/// let registry = Registry::default();
/// let first = registry.mint_binding("box", BindingOptions::new().defer(true));
/// let second = registry.mint_binding("box", BindingOptions::new().defer(true));
/// assert_eq!(first.id(), "box");
/// assert_eq!(second.id(), "box__2");
///
/// assert_eq!(first.invoke("## { color: red; }"), None);
/// second.invoke("## { color: blue; }");
///
/// assert_eq!(
///     registry.all_css(),
///     "#box { color: red; } #box__2 { color: blue; }"
/// );
/// ```
#[derive(Clone)]
pub struct Registry {
    shared: Arc<Shared>,
}

/// Creates an independent registry with its own counters and store.
pub fn create_registry(config: RegistryConfig) -> Registry {
    Registry::new(config)
}

impl Registry {
    /// Creates a registry using `config` for every binding it mints.
    pub fn new(config: RegistryConfig) -> Self {
        let store = StyleStore::new(config.store);
        Self {
            shared: Arc::new(Shared {
                config,
                state: Mutex::new(RegistryState {
                    counters: HashMap::new(),
                    allocated: HashSet::new(),
                    store,
                }),
                listeners: Mutex::new(Listeners::default()),
            }),
        }
    }

    pub(crate) fn from_shared(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.shared.config
    }

    /// Mints a binding with the next id for `scope_name`.
    ///
    /// The first binding of a scope gets the bare scope name (under
    /// [`IdScheme::Readable`](crate::IdScheme::Readable)); later ones append
    /// the scope's count. Options left unset inherit the registry config.
    ///
    /// Ids never repeat within a registry. When the derived id was already
    /// handed out under another scope (minting `box` twice, then `box__2`),
    /// the scope's counter advances until the id is free.
    pub fn mint_binding(&self, scope_name: &str, options: BindingOptions) -> StyleBinding {
        let settings = options.resolve(&self.shared.config);
        let scheme = self.shared.config.id_scheme;

        let (id, count) = {
            let mut guard = lock(&self.shared.state);
            let state = &mut *guard;
            let counter = state.counters.entry(scope_name.to_string()).or_insert(0);
            loop {
                *counter += 1;
                let id = scheme.derive(&settings.prefix, scope_name, *counter);
                if state.allocated.insert(id.clone()) {
                    break (id, *counter);
                }
            }
        };

        debug!(scope = scope_name, id = %id, count, "minted style binding");

        StyleBinding::new(id, scope_name, settings, Arc::downgrade(&self.shared))
    }

    /// Mints a binding for `scope_name` with the registry defaults.
    pub fn mint(&self, scope_name: &str) -> StyleBinding {
        self.mint_binding(scope_name, BindingOptions::default())
    }

    /// Mints a binding in the configured default scope.
    pub fn mint_default(&self, options: BindingOptions) -> StyleBinding {
        let scope = self.shared.config.default_scope.clone();
        self.mint_binding(&scope, options)
    }

    /// Returns the counter for `scope_name`: the number of bindings minted for
    /// it, plus any counts skipped to avoid a colliding id.
    pub fn count_for(&self, scope_name: &str) -> u64 {
        lock(&self.shared.state)
            .counters
            .get(scope_name)
            .copied()
            .unwrap_or(0)
    }

    /// Stores `text` under `id` and notifies listeners.
    pub fn register_style(&self, id: impl Into<String>, text: impl Into<String>) {
        let id = id.into();
        let text = text.into();

        debug!(id = %id, bytes = text.len(), "registered style");

        lock(&self.shared.state)
            .store
            .insert(id.clone(), text.clone());
        self.dispatch(ChangeEvent::Added { id, text });
    }

    /// Returns every stored style text joined by single spaces, in storage order.
    pub fn all_css(&self) -> String {
        lock(&self.shared.state).store.joined()
    }

    /// Returns the text stored under `id`.
    pub fn get(&self, id: &str) -> Option<String> {
        lock(&self.shared.state).store.get(id).map(str::to_string)
    }

    /// Returns the stored ids in storage order.
    pub fn ids(&self) -> Vec<String> {
        lock(&self.shared.state).store.ids()
    }

    pub fn len(&self) -> usize {
        lock(&self.shared.state).store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes the entry for `id`, returning whether anything was removed.
    ///
    /// Missing ids are ignored and produce no event. Append-only registries
    /// never remove entries.
    pub fn remove_css(&self, id: &str) -> bool {
        let removed = lock(&self.shared.state).store.remove(id);

        match removed {
            Some(text) => {
                debug!(id, "removed style");
                self.dispatch(ChangeEvent::Removed {
                    id: id.to_string(),
                    text,
                });
                true
            }
            None => false,
        }
    }

    /// Empties the store and sends a single clear event.
    ///
    /// Scope counters are untouched, so ids minted afterwards stay unique.
    pub fn clear_css(&self) {
        let ids = lock(&self.shared.state).store.clear();
        debug!(removed = ids.len(), "cleared styles");
        self.dispatch(ChangeEvent::Cleared { ids });
    }

    /// Registers a listener for store changes.
    ///
    /// Listeners run synchronously, in subscription order, after the store
    /// has been updated and with no registry lock held.
    pub fn on_change<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        let id = lock(&self.shared.listeners).add(Arc::new(listener));
        Subscription::new(Arc::downgrade(&self.shared), id)
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        lock(&self.shared.listeners).len()
    }

    /// Delivers `event` to the listeners registered once the store has been
    /// updated. A listener unsubscribed by an earlier listener in the same
    /// dispatch is skipped.
    fn dispatch(&self, event: ChangeEvent) {
        let listeners = lock(&self.shared.listeners).snapshot();
        for (id, listener) in &listeners {
            if !lock(&self.shared.listeners).contains(*id) {
                continue;
            }
            listener(&event);
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("config", &self.shared.config)
            .field("entries", &self.len())
            .field("listeners", &self.listener_count())
            .finish()
    }
}
