use std::any::{TypeId, type_name};
use std::collections::BTreeMap;

use crate::{Compute, State};

pub(crate) struct ComputeSlot {
    pub(crate) value: Box<dyn Compute>,
    pub(crate) status: crate::StateSyncStatus,
}

/// Read-only view over the context handed to `Compute::compute`.
pub struct Dep<'a> {
    states: &'a BTreeMap<TypeId, Box<dyn State>>,
    computes: &'a BTreeMap<TypeId, ComputeSlot>,
}

impl<'a> Dep<'a> {
    pub(crate) fn new(
        states: &'a BTreeMap<TypeId, Box<dyn State>>,
        computes: &'a BTreeMap<TypeId, ComputeSlot>,
    ) -> Self {
        Self { states, computes }
    }

    pub fn try_state<T: State>(&self) -> Option<&'a T> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|state| state.as_any().downcast_ref::<T>())
    }

    /// # Panics
    /// Panics if `T` was not registered; a compute declaring a dependency it
    /// cannot read is a wiring bug.
    pub fn state<T: State>(&self) -> &'a T {
        self.try_state::<T>()
            .unwrap_or_else(|| panic!("Dep: state {} is not registered", type_name::<T>()))
    }

    pub fn try_compute<T: Compute>(&self) -> Option<&'a T> {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.value.as_any().downcast_ref::<T>())
    }

    /// # Panics
    /// Panics if `T` was not recorded.
    pub fn compute<T: Compute>(&self) -> &'a T {
        self.try_compute::<T>()
            .unwrap_or_else(|| panic!("Dep: compute {} is not recorded", type_name::<T>()))
    }
}
