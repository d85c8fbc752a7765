use std::any::{Any, TypeId, type_name};
use std::fmt;

use flume::Sender;
use log::{debug, warn};

use crate::State;

type ApplyFn = Box<dyn FnOnce(&mut dyn Any) + Send>;

/// A pending write to a registered state or compute.
pub enum Update {
    /// Replace the whole value.
    Replace {
        id: TypeId,
        name: &'static str,
        value: Box<dyn Any + Send>,
    },
    /// Run a closure against the value current at apply time.
    Mutate {
        id: TypeId,
        name: &'static str,
        apply: ApplyFn,
    },
}

impl Update {
    pub fn id(&self) -> TypeId {
        match self {
            Self::Replace { id, .. } | Self::Mutate { id, .. } => *id,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Replace { name, .. } | Self::Mutate { name, .. } => name,
        }
    }
}

impl fmt::Debug for Update {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Replace { name, .. } => f.debug_tuple("Replace").field(name).finish(),
            Self::Mutate { name, .. } => f.debug_tuple("Mutate").field(name).finish(),
        }
    }
}

/// Write handle given to computes and commands.
///
/// Updates are queued on a channel and applied by `StateCtx::sync_computes`
/// on the UI thread, in the order they were sent.
#[derive(Clone)]
pub struct Updater {
    send: Sender<Update>,
}

impl fmt::Debug for Updater {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Updater")
            .field("pending", &self.send.len())
            .finish()
    }
}

impl Updater {
    pub fn new(send: Sender<Update>) -> Self {
        Self { send }
    }

    /// Replace the registered value of type `T`.
    pub fn set<T: State + Send>(&self, value: T) {
        self.push(Update::Replace {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            value: Box::new(value),
        });
    }

    /// Mutate the registered value of type `T` in place.
    ///
    /// Use this instead of `set` when the write must be based on the value
    /// current when it is applied, not on the snapshot the command started
    /// from (a late network response, for example).
    pub fn update<T: State>(&self, f: impl FnOnce(&mut T) + Send + 'static) {
        let apply = move |value: &mut dyn Any| match value.downcast_mut::<T>() {
            Some(value) => f(value),
            None => warn!("Updater::update: target is not a {}", type_name::<T>()),
        };

        self.push(Update::Mutate {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            apply: Box::new(apply),
        });
    }

    fn push(&self, update: Update) {
        let name = update.name();
        if self.send.send(update).is_err() {
            // The context is gone; nobody is left to observe the write.
            debug!("Updater: context dropped, discarding update for {name}");
        }
    }
}
