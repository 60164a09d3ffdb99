//! One-shot readiness signal.
//!
//! The host fires a [`ReadyTrigger`] once its startup is complete; the
//! reloader waits on the matching [`ReadySignal`] before touching the store.

use tokio::sync::oneshot;

use crate::error::{Error, Result};

/// Sending half of the readiness channel.
#[derive(Debug)]
pub struct ReadyTrigger(oneshot::Sender<()>);

/// Receiving half of the readiness channel.
#[derive(Debug)]
pub struct ReadySignal(oneshot::Receiver<()>);

/// Creates a connected trigger/signal pair.
///
/// # Examples
///
/// ```
/// use reserva::ready_channel;
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let (trigger, signal) = ready_channel();
/// trigger.fire();
/// assert!(signal.wait().await.is_ok());
/// # });
/// ```
#[must_use]
pub fn ready_channel() -> (ReadyTrigger, ReadySignal) {
    let (tx, rx) = oneshot::channel();
    (ReadyTrigger(tx), ReadySignal(rx))
}

impl ReadyTrigger {
    /// Signals readiness. Consumes the trigger, so it fires at most once.
    pub fn fire(self) {
        if self.0.send(()).is_err() {
            log::debug!("ready signal fired with no listener");
        }
    }
}

impl ReadySignal {
    /// Waits until the trigger fires.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Lifecycle`] if the trigger is dropped without firing.
    pub async fn wait(self) -> Result<()> {
        self.0.await.map_err(|_| Error::Lifecycle {
            message: "ready trigger dropped before firing".into(),
        })
    }
}
