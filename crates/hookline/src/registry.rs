//! Hook registry — declared hook points and their bound implementations.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Mutex;

use dashmap::mapref::entry::Entry;
use dashmap::{DashMap, DashSet};
use tracing::{debug, info, warn};

use crate::callable::HookCallable;
use crate::category::InvocationCategory;
use crate::error::{HookError, HookResult};
use crate::spec_ref::SpecRef;

/// A bound implementation: its invocation category plus the callable.
#[derive(Debug, Clone)]
pub struct Hook {
    /// Category of the bound callable.
    pub category: InvocationCategory,
    /// The implementation itself.
    pub callable: HookCallable,
}

type DuplicateObserver = Box<dyn Fn(&SpecRef) + Send + Sync>;

/// Process-wide table of declared hook points and bound implementations.
///
/// An explicit context object rather than a global: the host creates one
/// registry, hands it to hook-point constructors and to plugin loading, and
/// tests can instantiate as many independent registries as they like.
///
/// Declarations and registrations are expected during a startup phase;
/// binding is monotonic (`Declared → Bound`, no unbinding). Reads are safe
/// at any time, including concurrently with hook invocation.
pub struct HookRegistry {
    declared: DashSet<SpecRef>,
    bound: DashMap<SpecRef, Hook>,
    on_duplicate: Mutex<Option<DuplicateObserver>>,
}

impl HookRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            declared: DashSet::new(),
            bound: DashMap::new(),
            on_duplicate: Mutex::new(None),
        }
    }

    /// Declares a hook point. Idempotent; re-declaring is a silent no-op.
    pub fn declare_spec(&self, spec_ref: SpecRef) {
        if self.declared.insert(spec_ref.clone()) {
            debug!(spec_ref = %spec_ref, "hook spec declared");
        }
    }

    /// Returns whether a reference has been declared.
    pub fn is_declared(&self, spec_ref: &SpecRef) -> bool {
        self.declared.contains(spec_ref)
    }

    /// Binds an implementation to a reference.
    ///
    /// Re-registering the identical implementation is a no-op (the
    /// duplicate observer fires, see [`Self::on_duplicate_registration`]).
    /// Registering a *different* implementation fails with
    /// [`HookError::Conflict`] and leaves the existing binding untouched.
    /// A failed call never partially mutates the registry.
    pub fn register_impl(&self, spec_ref: SpecRef, callable: HookCallable) -> HookResult<()> {
        match self.bound.entry(spec_ref.clone()) {
            Entry::Occupied(entry) => {
                if entry.get().callable.same_implementation(&callable) {
                    drop(entry);
                    debug!(spec_ref = %spec_ref, "identical implementation re-registered, ignoring");
                    self.notify_duplicate(&spec_ref);
                    Ok(())
                } else {
                    let existing = entry.get().category;
                    drop(entry);
                    warn!(spec_ref = %spec_ref, existing = %existing, "conflicting implementation rejected");
                    Err(HookError::Conflict { spec_ref, existing })
                }
            }
            Entry::Vacant(entry) => {
                let category = callable.category();
                entry.insert(Hook { category, callable });
                info!(spec_ref = %spec_ref, category = %category, "hook implementation bound");
                Ok(())
            }
        }
    }

    /// Looks up the bound implementation for a reference, if any.
    pub fn lookup(&self, spec_ref: &SpecRef) -> Option<Hook> {
        self.bound.get(spec_ref).map(|hook| hook.clone())
    }

    /// Declared references with no bound implementation.
    ///
    /// These hook points silently fall back to their defaults — a useful
    /// startup sanity check, not an error.
    pub fn declared_without_impl(&self) -> BTreeSet<SpecRef> {
        self.declared
            .iter()
            .filter(|entry| !self.bound.contains_key(entry.key()))
            .map(|entry| entry.key().clone())
            .collect()
    }

    /// Bound references nobody declared — a likely plugin-targeting
    /// mistake, surfaced as a diagnostic rather than raised.
    pub fn impl_without_declared(&self) -> BTreeSet<SpecRef> {
        self.bound
            .iter()
            .filter(|entry| !self.declared.contains(entry.key()))
            .map(|entry| entry.key().clone())
            .collect()
    }

    /// Installs an observer fired whenever an identical implementation is
    /// re-registered (e.g. a plugin loaded twice). Registration itself
    /// stays a silent no-op.
    pub fn on_duplicate_registration(&self, observer: impl Fn(&SpecRef) + Send + Sync + 'static) {
        if let Ok(mut slot) = self.on_duplicate.lock() {
            *slot = Some(Box::new(observer));
        }
    }

    fn notify_duplicate(&self, spec_ref: &SpecRef) {
        if let Ok(slot) = self.on_duplicate.lock()
            && let Some(observer) = slot.as_ref()
        {
            observer(spec_ref);
        }
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("declared", &self.declared.len())
            .field("bound", &self.bound.len())
            .finish()
    }
}
