use std::sync::atomic::{AtomicBool, Ordering};

/// Runs an action at most once over the lifetime of the gate.
///
/// The gate trips before the action runs, so a failing action is not retried.
/// It is never reset.
#[derive(Debug, Default)]
pub struct OnceGate {
    done: AtomicBool,
}

impl OnceGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `action` if this is the first call; later calls return `Ok(())` untouched.
    pub fn run<E, F>(&self, action: F) -> Result<(), E>
    where
        F: FnOnce() -> Result<(), E>,
    {
        if self.done.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        action()
    }

    pub fn has_run(&self) -> bool {
        self.done.load(Ordering::Acquire)
    }
}
