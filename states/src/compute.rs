use std::any::TypeId;

use crate::{Dep, State, Updater};

/// Dependencies of a compute: `(state ids, compute ids)`.
pub type ComputeDeps = (Vec<TypeId>, Vec<TypeId>);

/// A value derived from other states or computes.
///
/// `compute` runs whenever one of its dependencies changed since the last
/// run. It never mutates in place: the new value goes through the
/// [`Updater`] so every write follows the same path as command results.
///
/// Command-fed caches are computes with no dependencies and a no-op
/// `compute`; their value only changes through `Updater::set`.
pub trait Compute: State {
    fn deps(&self) -> ComputeDeps;

    fn compute(&self, deps: Dep<'_>, updater: Updater);
}

/// Deps for caches that are only written by commands.
pub fn no_deps() -> ComputeDeps {
    (Vec::new(), Vec::new())
}
