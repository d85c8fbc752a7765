use std::any::{Any, type_name};

use log::warn;

/// A piece of application state owned by [`crate::StateCtx`].
///
/// States are plain data. They are read by the UI, fed into computes, and
/// cloned into a [`crate::CommandSnapshot`] when a command is dispatched.
pub trait State: Any {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Clone of this state handed to commands.
    ///
    /// States returning `None` are invisible to commands.
    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        None
    }

    /// Replace `self` with a boxed value of the same concrete type.
    fn assign_box(&mut self, new_self: Box<dyn Any + Send>);
}

/// Shared `assign_box` body: downcast and overwrite, or log a type mismatch.
pub fn state_assign_impl<T: State>(target: &mut T, new_self: Box<dyn Any + Send>) {
    match new_self.downcast::<T>() {
        Ok(value) => *target = *value,
        Err(_) => warn!(
            "assign_box: value is not a {}, update ignored",
            type_name::<T>()
        ),
    }
}
