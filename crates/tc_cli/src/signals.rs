use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Cancels a token when the user presses Ctrl-C.
///
/// The listener stops when this value is dropped.
pub(crate) struct Interrupt {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl Interrupt {
    pub(crate) fn listen() -> Self {
        let token = CancellationToken::new();
        let task = tokio::spawn({
            let token = token.clone();
            async move {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => {
                        info!("Received interrupt signal.");
                        token.cancel();
                    }
                    Err(error) => error!(%error, "Unable to listen for interrupt signal."),
                }
            }
        });

        Self { token, task }
    }

    pub(crate) fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}

impl Drop for Interrupt {
    fn drop(&mut self) {
        self.task.abort();
    }
}
