use std::any::{TypeId, type_name};
use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::task::{Context, Waker};

use flume::{Receiver, Sender};
use log::{debug, error, warn};
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use crate::dep::ComputeSlot;
use crate::error::Error;
use crate::graph::Graph;
use crate::snapshot::{CommandSnapshot, ComputeSnapshot, StateSnapshot};
use crate::task::{TaskHandle, TaskId};
use crate::updater::Update;
use crate::{Command, Compute, Dep, State, StateSyncStatus, Updater};

/// Owner of every state, compute and command of the application.
///
/// Lives on the UI thread. The per-frame protocol is:
/// 1. `sync_computes()` applies updates sent by commands and computes;
/// 2. the UI reads with `state` / `cached` and writes inputs with `update`;
/// 3. the UI calls `dispatch::<Cmd>()` for user intents;
/// 4. `run_computed()` refreshes derived values whose inputs changed.
pub struct StateCtx {
    states: BTreeMap<TypeId, Box<dyn State>>,
    computes: BTreeMap<TypeId, ComputeSlot>,
    commands: BTreeMap<TypeId, Box<dyn Command>>,

    graph: Graph<TypeId>,
    // insertion order of computes, and the order they are run in
    compute_ids: Vec<TypeId>,
    order: Vec<TypeId>,

    send: Sender<Update>,
    recv: Receiver<Update>,

    runtime: Option<Handle>,
    cancel: CancellationToken,
    tasks: Vec<TaskHandle>,
    generation: u64,
}

impl fmt::Debug for StateCtx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateCtx")
            .field("states", &self.states.len())
            .field("computes", &self.computes.len())
            .field("commands", &self.commands.len())
            .field("pending_updates", &self.recv.len())
            .field("tasks", &self.tasks.len())
            .finish_non_exhaustive()
    }
}

impl Default for StateCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for StateCtx {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl StateCtx {
    /// Creates an empty context bound to the current Tokio runtime, if any.
    pub fn new() -> Self {
        let (send, recv) = flume::unbounded();
        Self {
            states: BTreeMap::new(),
            computes: BTreeMap::new(),
            commands: BTreeMap::new(),
            graph: Graph::new(),
            compute_ids: Vec::new(),
            order: Vec::new(),
            send,
            recv,
            runtime: Handle::try_current().ok(),
            cancel: CancellationToken::new(),
            tasks: Vec::new(),
            generation: 0,
        }
    }

    pub fn updater(&self) -> Updater {
        Updater::new(self.send.clone())
    }

    // ---------------------------------------------------------------------
    // registration
    // ---------------------------------------------------------------------

    pub fn add_state<T: State>(&mut self, state: T) {
        if self.states.insert(TypeId::of::<T>(), Box::new(state)).is_some() {
            debug!("add_state: replaced existing {}", type_name::<T>());
        }
        self.mark_dependents_dirty(TypeId::of::<T>());
    }

    pub fn record_compute<T: Compute>(&mut self, compute: T) {
        let id = TypeId::of::<T>();
        let (state_deps, compute_deps) = compute.deps();
        for dep in state_deps.into_iter().chain(compute_deps) {
            self.graph.route_to(dep, id);
        }

        let slot = ComputeSlot {
            value: Box::new(compute),
            status: StateSyncStatus::BeforeInit,
        };
        if self.computes.insert(id, slot).is_none() {
            self.compute_ids.push(id);
        }

        self.rebuild_order();
    }

    pub fn record_command<T: Command>(&mut self, command: T) {
        self.commands.insert(TypeId::of::<T>(), Box::new(command));
    }

    fn rebuild_order(&mut self) {
        let sorted = match self.graph.topology_sort() {
            Ok(sorted) => sorted,
            Err(e) => {
                error!("StateCtx: invalid compute dependencies: {e}");
                Vec::new()
            }
        };

        let mut order: Vec<TypeId> = sorted
            .into_iter()
            .filter(|id| self.computes.contains_key(id))
            .collect();
        for id in &self.compute_ids {
            if !order.contains(id) {
                order.push(*id);
            }
        }
        self.order = order;
    }

    // ---------------------------------------------------------------------
    // reads
    // ---------------------------------------------------------------------

    pub fn try_state<T: State>(&self) -> Result<&T, Error> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|state| state.as_any().downcast_ref::<T>())
            .ok_or_else(|| Error::state_not_found(type_name::<T>(), "StateCtx::state"))
    }

    /// # Panics
    /// Panics if `T` was never added; that is a setup bug, not a runtime
    /// condition.
    pub fn state<T: State>(&self) -> &T {
        self.try_state::<T>().unwrap_or_else(|e| panic!("{e}"))
    }

    /// Latest value of a compute, `None` if it was never recorded.
    pub fn cached<T: Compute>(&self) -> Option<&T> {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.value.as_any().downcast_ref::<T>())
    }

    pub fn compute_status<T: Compute>(&self) -> Option<StateSyncStatus> {
        self.computes
            .get(&TypeId::of::<T>())
            .map(|slot| slot.status)
    }

    // ---------------------------------------------------------------------
    // writes
    // ---------------------------------------------------------------------

    /// Mutable access to a state. Computes reading it are marked dirty.
    ///
    /// # Panics
    /// Panics if `T` was never added.
    pub fn state_mut<T: State>(&mut self) -> &mut T {
        let id = TypeId::of::<T>();
        self.mark_dependents_dirty(id);
        self.states
            .get_mut(&id)
            .and_then(|state| state.as_any_mut().downcast_mut::<T>())
            .unwrap_or_else(|| {
                panic!(
                    "{}",
                    Error::state_not_found(type_name::<T>(), "StateCtx::state_mut")
                )
            })
    }

    /// Mutate a state in place; the usual way to set a command's input.
    pub fn update<T: State>(&mut self, f: impl FnOnce(&mut T)) {
        f(self.state_mut::<T>());
    }

    pub fn mark_dirty(&mut self, id: &TypeId) {
        if let Some(slot) = self.computes.get_mut(id) {
            slot.status = StateSyncStatus::Dirty;
        }
    }

    pub fn mark_clean(&mut self, id: &TypeId) {
        if let Some(slot) = self.computes.get_mut(id) {
            slot.status = StateSyncStatus::Clean;
        }
    }

    fn mark_dependents_dirty(&mut self, id: TypeId) {
        for dependent in self.graph.dependents(id) {
            self.mark_dirty(&dependent);
        }
    }

    /// Apply every queued update. Call once at the start of each frame.
    pub fn sync_computes(&mut self) {
        let updates: Vec<Update> = self.recv.try_iter().collect();
        for update in updates {
            self.apply(update);
        }
    }

    fn slot_mut(&mut self, id: &TypeId) -> Option<&mut (dyn State + 'static)> {
        if self.states.contains_key(id) {
            return self.states.get_mut(id).map(|state| &mut **state);
        }
        self.computes.get_mut(id).map(|slot| {
            let value: &mut (dyn State + 'static) = &mut *slot.value;
            value
        })
    }

    fn apply(&mut self, update: Update) {
        let id = update.id();
        let Some(target) = self.slot_mut(&id) else {
            warn!(
                "sync_computes: {} is not registered, update dropped",
                update.name()
            );
            return;
        };

        match update {
            Update::Replace { value, .. } => target.assign_box(value),
            Update::Mutate { apply, .. } => apply(target.as_any_mut()),
        }

        self.mark_dependents_dirty(id);
    }

    /// Re-run every compute whose dependencies changed, in dependency order.
    pub fn run_computed(&mut self) {
        let updater = self.updater();
        let order = self.order.clone();

        for id in order {
            let Some(slot) = self.computes.get(&id) else {
                continue;
            };
            if !slot.status.needs_run() {
                continue;
            }

            slot.value
                .compute(Dep::new(&self.states, &self.computes), updater.clone());
            self.mark_clean(&id);

            // Apply now so computes later in the order see the new value.
            self.sync_computes();
        }
    }

    // ---------------------------------------------------------------------
    // commands
    // ---------------------------------------------------------------------

    fn snapshot(&self) -> CommandSnapshot {
        let mut states = StateSnapshot::new();
        for (id, state) in &self.states {
            if let Some(cloned) = state.snapshot() {
                states.insert_cloned(*id, cloned);
            }
        }

        let mut computes = ComputeSnapshot::new();
        for (id, slot) in &self.computes {
            if let Some(cloned) = slot.value.snapshot() {
                computes.insert_cloned(*id, cloned);
            }
        }

        CommandSnapshot::new(states, computes)
    }

    /// Run command `T`.
    ///
    /// The command future is polled once right here; if it completes (no
    /// IO), its updates are already queued when this returns. Otherwise the
    /// remainder is spawned on the runtime and reports back via `Updater`.
    pub fn dispatch<T: Command>(&mut self) {
        let id = TypeId::of::<T>();
        let token = self.cancel.child_token();

        let mut future = {
            let Some(command) = self.commands.get(&id) else {
                error!(
                    "{}",
                    Error::CommandNotFound {
                        name: type_name::<T>()
                    }
                );
                return;
            };
            command.run(self.snapshot(), self.updater(), token.clone())
        };

        let runtime = self.runtime.clone().or_else(|| Handle::try_current().ok());
        let _enter = runtime.as_ref().map(Handle::enter);

        let mut cx = Context::from_waker(Waker::noop());
        if future.as_mut().poll(&mut cx).is_ready() {
            return;
        }

        let Some(handle) = runtime.as_ref() else {
            error!(
                "dispatch: {} needs a Tokio runtime to finish, dropping it",
                type_name::<T>()
            );
            return;
        };

        self.generation += 1;
        let join = handle.spawn(future);
        self.tasks.retain(|task| !task.is_finished());
        self.tasks
            .push(TaskHandle::new(TaskId::new(id, self.generation), token, join));
    }

    /// Number of spawned commands that have not finished yet.
    pub fn pending_tasks(&mut self) -> usize {
        self.tasks.retain(|task| !task.is_finished());
        self.tasks.len()
    }

    /// Request cancellation of every spawned command.
    pub fn cancel_all(&mut self) {
        for task in &self.tasks {
            task.cancel();
        }
        self.tasks.clear();
    }
}
