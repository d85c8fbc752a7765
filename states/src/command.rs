use std::any::Any;
use std::future::Future;
use std::pin::Pin;

use tokio_util::sync::CancellationToken;

use crate::{CommandSnapshot, Updater};

/// Future returned by [`Command::run`].
pub type CommandFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// A manually dispatched intent.
///
/// Commands are the only place where side effects (network IO) happen.
/// They never run implicitly: the UI (or a test) calls
/// `StateCtx::dispatch::<T>()`.
///
/// `run` receives an owned snapshot of every snapshot-able state and compute,
/// so the returned future is `'static` and can be moved onto the runtime.
/// Everything before the first `.await` executes synchronously inside
/// `dispatch`; purely local commands therefore complete immediately and
/// their updates are visible after the next `StateCtx::sync_computes`.
pub trait Command: Any {
    fn run(&self, snap: CommandSnapshot, updater: Updater, cancel: CancellationToken)
    -> CommandFuture;
}
