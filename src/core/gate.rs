//! Single-use completion gates
//!
//! Platform photo library calls complete through callbacks fired on an
//! arbitrary thread. A gate turns one such callback into a blocking return
//! value: hand the [`CompletionSignal`] to the platform, then [`CompletionGate::wait`].
//!
//! ```rust
//! use library_saver::core::gate::completion_gate;
//!
//! let (signal, gate) = completion_gate::<u32>();
//! std::thread::spawn(move || signal.fire(7));
//! assert_eq!(gate.wait().unwrap(), 7);
//! ```

use crate::library::traits::Completion;
use crossbeam_channel::{bounded, Receiver, Sender};
use thiserror::Error;

/// Error returned when a gate can never open
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateError {
    /// The signal was dropped without firing
    #[error("completion callback was dropped without being called")]
    Dropped,
}

/// Sending half of a gate; firing consumes it
#[derive(Debug)]
pub struct CompletionSignal<T> {
    tx: Sender<T>,
}

/// Receiving half of a gate; waiting consumes it
#[derive(Debug)]
pub struct CompletionGate<T> {
    rx: Receiver<T>,
}

/// Create a connected signal/gate pair
pub fn completion_gate<T>() -> (CompletionSignal<T>, CompletionGate<T>) {
    let (tx, rx) = bounded(1);
    (CompletionSignal { tx }, CompletionGate { rx })
}

impl<T: Send + 'static> CompletionSignal<T> {
    /// Deliver the value and open the gate
    pub fn fire(self, value: T) {
        // The waiter may already be gone; nothing left to notify then.
        let _ = self.tx.send(value);
    }

    /// Wrap the signal as a platform completion callback
    pub fn into_completion(self) -> Completion<T> {
        Box::new(move |value| self.fire(value))
    }
}

impl<T> CompletionGate<T> {
    /// Block the current thread until the signal fires.
    ///
    /// There is no timeout: a callback that is retained but never invoked
    /// blocks forever.
    pub fn wait(self) -> Result<T, GateError> {
        self.rx.recv().map_err(|_| GateError::Dropped)
    }
}

/// Run a callback-based call and block until its completion fires
pub fn block_on_completion<T, F>(call: F) -> Result<T, GateError>
where
    T: Send + 'static,
    F: FnOnce(Completion<T>),
{
    let (signal, gate) = completion_gate();
    call(signal.into_completion());
    gate.wait()
}
