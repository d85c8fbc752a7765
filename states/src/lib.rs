//! Small reactive state runtime for immediate-mode UIs.
//!
//! - [`State`]: plain data owned by [`StateCtx`].
//! - [`Compute`]: derived values (or command-fed caches) read via `cached`.
//! - [`Command`]: explicitly dispatched intents; the only place for IO.
//! - [`Updater`]: the single write path back into the context.

mod command;
mod compute;
mod ctx;
mod dep;
mod error;
mod graph;
mod snapshot;
mod state;
mod state_sync_status;
mod task;
mod time;
mod updater;

pub use command::{Command, CommandFuture};
pub use compute::{Compute, ComputeDeps, no_deps};
pub use ctx::StateCtx;
pub use dep::Dep;
pub use error::Error;
pub use graph::{DepRoute, Graph, TopologyError};
pub use snapshot::{CommandSnapshot, ComputeSnapshot, StateSnapshot};
pub use state::{State, state_assign_impl};
pub use state_sync_status::StateSyncStatus;
pub use task::{TaskHandle, TaskId};
pub use time::Time;
pub use updater::{Update, Updater};

#[cfg(test)]
mod state_runtime_test {
    use std::any::{Any, TypeId};
    use std::time::Duration;

    use tokio_util::sync::CancellationToken;

    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Numbers {
        values: Vec<i32>,
    }

    impl State for Numbers {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }

        fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
            Some(Box::new(self.clone()))
        }

        fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
            state_assign_impl(self, new_self);
        }
    }

    #[derive(Debug, Clone, Default)]
    struct Sum {
        total: i32,
    }

    impl State for Sum {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }

        fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
            state_assign_impl(self, new_self);
        }
    }

    impl Compute for Sum {
        fn deps(&self) -> ComputeDeps {
            (vec![TypeId::of::<Numbers>()], Vec::new())
        }

        fn compute(&self, deps: Dep<'_>, updater: Updater) {
            let total = deps.state::<Numbers>().values.iter().sum();
            updater.set(Sum { total });
        }
    }

    #[derive(Debug, Clone, Default)]
    struct DoubledSum {
        total: i32,
    }

    impl State for DoubledSum {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }

        fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
            state_assign_impl(self, new_self);
        }
    }

    impl Compute for DoubledSum {
        fn deps(&self) -> ComputeDeps {
            (Vec::new(), vec![TypeId::of::<Sum>()])
        }

        fn compute(&self, deps: Dep<'_>, updater: Updater) {
            let total = deps.compute::<Sum>().total * 2;
            updater.set(DoubledSum { total });
        }
    }

    /// Appends `42` synchronously.
    struct PushAnswer;

    impl Command for PushAnswer {
        fn run(
            &self,
            snap: CommandSnapshot,
            updater: Updater,
            _cancel: CancellationToken,
        ) -> CommandFuture {
            let seen = snap.state::<Numbers>().values.len();
            Box::pin(async move {
                updater.update::<Numbers>(move |numbers| {
                    assert_eq!(numbers.values.len(), seen);
                    numbers.values.push(42);
                });
            })
        }
    }

    /// Appends `7` after a short sleep.
    struct PushLater;

    impl Command for PushLater {
        fn run(
            &self,
            _snap: CommandSnapshot,
            updater: Updater,
            cancel: CancellationToken,
        ) -> CommandFuture {
            Box::pin(async move {
                tokio::select! {
                    _ = cancel.cancelled() => {}
                    _ = tokio::time::sleep(Duration::from_millis(20)) => {
                        updater.update::<Numbers>(|numbers| numbers.values.push(7));
                    }
                }
            })
        }
    }

    fn setup_ctx() -> StateCtx {
        let mut ctx = StateCtx::new();
        ctx.add_state(Numbers::default());
        ctx.record_compute(DoubledSum::default());
        ctx.record_compute(Sum::default());
        ctx.record_command(PushAnswer);
        ctx.record_command(PushLater);
        ctx
    }

    #[test]
    fn computes_run_in_dependency_order() {
        let mut ctx = setup_ctx();
        ctx.update::<Numbers>(|n| n.values = vec![1, 2, 3]);

        ctx.run_computed();

        assert_eq!(ctx.cached::<Sum>().map(|s| s.total), Some(6));
        assert_eq!(ctx.cached::<DoubledSum>().map(|s| s.total), Some(12));
        assert_eq!(ctx.compute_status::<Sum>(), Some(StateSyncStatus::Clean));
    }

    #[test]
    fn clean_compute_is_not_rerun_until_input_changes() {
        let mut ctx = setup_ctx();
        ctx.run_computed();
        assert_eq!(ctx.compute_status::<Sum>(), Some(StateSyncStatus::Clean));

        ctx.update::<Numbers>(|n| n.values.push(10));
        assert_eq!(ctx.compute_status::<Sum>(), Some(StateSyncStatus::Dirty));
        assert_eq!(
            ctx.compute_status::<DoubledSum>(),
            Some(StateSyncStatus::Dirty),
            "dirtiness propagates transitively"
        );

        ctx.run_computed();
        assert_eq!(ctx.cached::<DoubledSum>().map(|s| s.total), Some(20));
    }

    #[test]
    fn local_command_completes_inside_dispatch() {
        let mut ctx = setup_ctx();

        ctx.dispatch::<PushAnswer>();
        assert!(ctx.state::<Numbers>().values.is_empty(), "not applied yet");

        ctx.sync_computes();
        assert_eq!(ctx.state::<Numbers>().values, vec![42]);
        assert_eq!(ctx.pending_tasks(), 0);
    }

    #[test]
    fn unknown_command_is_ignored() {
        struct Unregistered;
        impl Command for Unregistered {
            fn run(&self, _: CommandSnapshot, _: Updater, _: CancellationToken) -> CommandFuture {
                Box::pin(async {})
            }
        }

        let mut ctx = setup_ctx();
        ctx.dispatch::<Unregistered>();
        ctx.sync_computes();
        assert!(ctx.state::<Numbers>().values.is_empty());
    }

    #[test]
    fn try_state_reports_missing_state() {
        let ctx = StateCtx::new();
        let err = ctx.try_state::<Numbers>().unwrap_err();
        assert!(err.to_string().contains("Numbers"), "got {err}");
    }

    #[tokio::test]
    async fn async_command_is_spawned_and_reports_back() {
        let mut ctx = setup_ctx();

        ctx.dispatch::<PushLater>();
        assert_eq!(ctx.pending_tasks(), 1);

        tokio::time::sleep(Duration::from_millis(100)).await;
        ctx.sync_computes();

        assert_eq!(ctx.state::<Numbers>().values, vec![7]);
        assert_eq!(ctx.pending_tasks(), 0);
    }

    #[tokio::test]
    async fn cancel_all_stops_spawned_commands() {
        let mut ctx = setup_ctx();

        ctx.dispatch::<PushLater>();
        ctx.cancel_all();

        tokio::time::sleep(Duration::from_millis(100)).await;
        ctx.sync_computes();

        assert!(ctx.state::<Numbers>().values.is_empty());
    }
}
