//! Bookkeeping for command futures that outlive `StateCtx::dispatch`.
//!
//! A dispatched command first runs inline; if it is still pending after that
//! first poll, the rest is spawned on the Tokio runtime and tracked here so
//! the context can report and cancel outstanding work.

use std::any::TypeId;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Identifies one spawned command run.
///
/// `generation` increases with every spawn, so two runs of the same command
/// type stay distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId {
    type_id: TypeId,
    generation: u64,
}

impl TaskId {
    pub fn new(type_id: TypeId, generation: u64) -> Self {
        Self {
            type_id,
            generation,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A spawned command together with its cooperative cancellation token.
#[derive(Debug)]
pub struct TaskHandle {
    id: TaskId,
    cancel_token: CancellationToken,
    join: JoinHandle<()>,
}

impl TaskHandle {
    pub fn new(id: TaskId, cancel_token: CancellationToken, join: JoinHandle<()>) -> Self {
        Self {
            id,
            cancel_token,
            join,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Ask the command to stop at its next cancellation check point.
    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_id_equality() {
        let type_id = TypeId::of::<String>();

        let id1 = TaskId::new(type_id, 1);
        let id2 = TaskId::new(type_id, 1);
        let id3 = TaskId::new(type_id, 2);
        let id4 = TaskId::new(TypeId::of::<i32>(), 1);

        assert_eq!(id1, id2);
        assert_ne!(id1, id3, "different generation");
        assert_ne!(id1, id4, "different command type");
        assert_eq!(id3.generation(), 2);
        assert_eq!(id4.type_id(), TypeId::of::<i32>());
    }

    #[tokio::test]
    async fn task_handle_cancel_reaches_the_task() {
        let token = CancellationToken::new();
        let child = token.clone();
        let join = tokio::spawn(async move { child.cancelled().await });
        let handle = TaskHandle::new(TaskId::new(TypeId::of::<String>(), 1), token, join);

        assert!(!handle.is_cancelled());
        handle.cancel();
        assert!(handle.is_cancelled());

        for _ in 0..10 {
            if handle.is_finished() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(handle.is_finished(), "cancelled task should complete");
    }
}
