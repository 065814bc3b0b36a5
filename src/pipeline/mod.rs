mod loop_worker;

pub(crate) use loop_worker::PipelineContext;

use loop_worker::detection_loop;

use anyhow::{bail, Context, Result};
use log::info;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Drives the capture→detect→ingest cycle for one session. Idle until
/// `start`, Idle again after `stop`; stopping while idle is a no-op.
pub struct DetectionPipeline {
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
}

impl DetectionPipeline {
    pub fn new() -> Self {
        Self {
            handle: None,
            cancel_token: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub(crate) fn start(&mut self, ctx: PipelineContext) -> Result<()> {
        if self.handle.is_some() {
            bail!("detection pipeline already running");
        }

        let cancel_token = CancellationToken::new();
        let token_clone = cancel_token.clone();

        let handle = tokio::spawn(detection_loop(ctx, token_clone));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        Ok(())
    }

    /// Cancels the tick schedule and waits for the loop to wind down. Pending
    /// detector replies after this point go nowhere.
    pub async fn stop(&mut self) -> Result<()> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            info!("detection pipeline stopping");
            handle
                .await
                .context("detection loop task failed to join")
                .map(|_| ())
        } else {
            Ok(())
        }
    }
}

impl Default for DetectionPipeline {
    fn default() -> Self {
        Self::new()
    }
}
