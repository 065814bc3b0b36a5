use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::time::{Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::config::EngineConfig;
use crate::detector::{DetectorReply, DetectorRequest};
use crate::guidance::{bin_label, guide};
use crate::models::{ArSession, DetectedBin, DetectedObject, ObjectKind, OverlayElement};
use crate::overlay::OverlayStore;
use crate::resource::{CameraStream, ResourceAdapter};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

/// Everything the detection loop needs for one session. Built by the session
/// manager at start; dropped when the loop exits.
pub(crate) struct PipelineContext {
    pub config: EngineConfig,
    pub adapter: Arc<dyn ResourceAdapter>,
    pub camera: Arc<CameraStream>,
    pub session: Arc<Mutex<ArSession>>,
    pub store: OverlayStore,
    pub requests: mpsc::Sender<DetectorRequest>,
    pub replies: mpsc::Receiver<DetectorReply>,
}

/// One select loop handles ticks, detector replies, and cancellation, so
/// overlay mutations from a reply are never interleaved with a capture tick.
pub(crate) async fn detection_loop(mut ctx: PipelineContext, cancel_token: CancellationToken) {
    let mut ticker = tokio::time::interval(Duration::from_millis(ctx.config.tick_interval_ms));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                capture_tick(&ctx).await;
            }
            reply = ctx.replies.recv() => {
                match reply {
                    Some(reply) => {
                        apply_reply(reply, &ctx.session, &ctx.store, &ctx.config).await;
                    }
                    None => {
                        log_info!("detector reply channel closed, stopping loop");
                        break;
                    }
                }
            }
            _ = cancel_token.cancelled() => {
                log_info!("detection loop shutting down");
                break;
            }
        }
    }
}

/// Capture one frame and hand it to the detector without waiting for the
/// reply. A stream that has not produced a frame yet is skipped silently.
async fn capture_tick(ctx: &PipelineContext) {
    let capture = ctx.adapter.capture_frame(&ctx.camera);
    let timeout = Duration::from_millis(ctx.config.capture_timeout_ms);

    let frame = match tokio::time::timeout(timeout, capture).await {
        Ok(Some(frame)) => frame,
        Ok(None) => return,
        Err(_) => {
            log_warn!(
                "frame capture timeout (> {}ms) on stream {}",
                ctx.config.capture_timeout_ms,
                ctx.camera.id
            );
            return;
        }
    };

    let timestamp = frame.timestamp;
    let request = DetectorRequest::DetectFrame {
        image_data: frame,
        timestamp,
    };

    // Fire-and-forget: a full queue means the detector is behind, and the
    // next tick will carry a fresher frame anyway.
    if let Err(err) = ctx.requests.try_send(request) {
        log_warn!("detect_frame dropped: {err}");
    }
}

/// Ingest one detector reply: overwrite the tracking snapshot for that
/// category, then write the derived overlays. Stale or duplicate replies are
/// absorbed by the overwrite.
pub(crate) async fn apply_reply(
    reply: DetectorReply,
    session: &Mutex<ArSession>,
    store: &OverlayStore,
    config: &EngineConfig,
) {
    match reply {
        DetectorReply::ObjectsDetected { objects } => {
            let known_bins = {
                let mut guard = session.lock().await;
                guard.tracking.objects = objects.clone();
                guard.tracking.bins.clone()
            };

            for directive in guidance_for_objects(&objects, &known_bins, config) {
                store.insert(directive).await;
            }
        }
        DetectorReply::BinsDetected { bins } => {
            {
                let mut guard = session.lock().await;
                guard.tracking.bins = bins.clone();
            }

            // Same element id per bin, so a later cycle overwrites the label
            // instead of accumulating.
            for bin in &bins {
                store.insert(bin_label(bin)).await;
            }
        }
        DetectorReply::Unknown => {}
    }
}

/// Guidance for one cycle's object list: waste items above the confidence
/// threshold, matched against the bins known this cycle.
pub(crate) fn guidance_for_objects(
    objects: &[DetectedObject],
    known_bins: &[DetectedBin],
    config: &EngineConfig,
) -> Vec<OverlayElement> {
    objects
        .iter()
        .filter(|object| object.kind == ObjectKind::WasteItem)
        .filter(|object| object.confidence > config.confidence_threshold)
        .flat_map(|object| guide(object, known_bins, config))
        .collect()
}
