//! Deployment orchestration: resolve → compose → submit.
//!
//! Two operations are exposed on [`Orchestrator`]:
//!
//! - [`Orchestrator::install_operating_system`] reads the answer file,
//!   resolves the server, organization, OS image and SCU image concurrently,
//!   and submits a single OS-install bulk request. It returns as soon as the
//!   remote side accepts the request; installation runs asynchronously there.
//! - [`Orchestrator::deploy_profile`] resolves a server profile and schedules
//!   a `Deploy` action on it.
//!
//! Neither operation retries. Any failure ends the run and is returned as a
//! [`DeployError`] naming the stage (and, for lookups, the resource) at fault.

use tokio::sync::watch;

use crate::files::{FileReader, FsReader};
use crate::remote::Transport;

mod error;
pub use self::error::{DeployError, SubmissionCause};
mod stage;
pub use self::stage::Stage;
use self::stage::Run;

mod install;
mod profile;

pub struct Orchestrator<T, F = FsReader> {
    transport: T,
    files: F,
    cancel: Option<watch::Receiver<bool>>,
}

impl<T: Transport> Orchestrator<T, FsReader> {
    pub fn new(transport: T) -> Self {
        Self::with_files(transport, FsReader)
    }
}

impl<T: Transport, F: FileReader> Orchestrator<T, F> {
    pub fn with_files(transport: T, files: F) -> Self {
        Self {
            transport,
            files,
            cancel: None,
        }
    }

    /// Abort runs that have not started submitting once `true` is sent.
    pub fn with_cancel(mut self, cancel: watch::Receiver<bool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Drive `fut` unless cancellation arrives first; dropping `fut` cancels
    /// whatever lookups it still has in flight.
    async fn until_cancelled<O>(
        &self,
        stage: Stage,
        fut: impl Future<Output = Result<O, DeployError>>,
    ) -> Result<O, DeployError> {
        let Some(cancel) = &self.cancel else {
            return fut.await;
        };
        let mut cancel = cancel.clone();
        tokio::select! {
            biased;
            _ = cancelled(&mut cancel) => Err(DeployError::Cancelled { stage }),
            out = fut => out,
        }
    }
}

async fn cancelled(rx: &mut watch::Receiver<bool>) {
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        if rx.changed().await.is_err() {
            // Sender gone without cancelling; never resolve.
            std::future::pending::<()>().await;
        }
    }
}
