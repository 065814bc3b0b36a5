//! End-to-end: a scripted detector answers every captured frame with one bin
//! and one waste item, and the session surfaces guidance overlays.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use binsight::{
    ArSession, BinStatus, BoundingBox, CameraFacing, CameraStream, DetectedBin, DetectedObject,
    DetectorChannel, DetectorReply, DetectorRequest, DeviceCapabilities, EngineConfig,
    EngineError, FrameBuffer, FrameConstraints, ObjectKind, OverlayKind, Position3,
    ResourceAdapter, SessionManager, SessionMode, WasteCategory,
};

/// Adapter whose detector echoes a fixed scene back for every frame.
struct ScriptedDevice {
    frames_captured: AtomicUsize,
}

impl ScriptedDevice {
    fn new() -> Self {
        Self {
            frames_captured: AtomicUsize::new(0),
        }
    }

    fn scene_bins() -> Vec<DetectedBin> {
        vec![DetectedBin {
            id: "b1".into(),
            category: WasteCategory::Recyclable,
            color_tag: Some("blue".into()),
            position: Position3 {
                x: 300.0,
                y: 200.0,
                z: 1.5,
            },
            confidence: 0.97,
            capacity: Some(0.4),
            status: BinStatus::Available,
        }]
    }

    fn scene_objects() -> Vec<DetectedObject> {
        vec![DetectedObject {
            id: "item-1".into(),
            kind: ObjectKind::WasteItem,
            waste_category: Some(WasteCategory::Recyclable),
            confidence: 0.91,
            bounding_box: BoundingBox {
                x: 100.0,
                y: 100.0,
                width: 50.0,
                height: 50.0,
            },
            classification: Some("Plastic bottle".into()),
            suggestions: vec!["Rinse before recycling".into()],
        }]
    }
}

#[async_trait]
impl ResourceAdapter for ScriptedDevice {
    fn capabilities(&self) -> DeviceCapabilities {
        DeviceCapabilities {
            camera: true,
            detector: true,
            graphics: true,
        }
    }

    async fn acquire_camera(
        &self,
        _facing: CameraFacing,
        constraints: FrameConstraints,
    ) -> Result<CameraStream, EngineError> {
        // A freshly acquired stream has not produced a frame yet.
        self.frames_captured.store(0, Ordering::SeqCst);
        Ok(CameraStream {
            id: "cam-integration".into(),
            width: constraints.ideal_width,
            height: constraints.ideal_height,
        })
    }

    async fn release_camera(&self, _stream: &CameraStream) {}

    async fn spawn_detector(&self) -> Result<DetectorChannel, EngineError> {
        let (request_tx, mut request_rx) = mpsc::channel::<DetectorRequest>(16);
        let (reply_tx, reply_rx) = mpsc::channel::<DetectorReply>(16);

        tokio::spawn(async move {
            while let Some(request) = request_rx.recv().await {
                let DetectorRequest::DetectFrame { .. } = request;
                let bins = DetectorReply::BinsDetected {
                    bins: ScriptedDevice::scene_bins(),
                };
                let objects = DetectorReply::ObjectsDetected {
                    objects: ScriptedDevice::scene_objects(),
                };
                if reply_tx.send(bins).await.is_err() || reply_tx.send(objects).await.is_err() {
                    break;
                }
            }
        });

        Ok(DetectorChannel::new(request_tx, reply_rx))
    }

    async fn terminate_detector(&self, _channel: &DetectorChannel) {}

    async fn capture_frame(&self, _stream: &CameraStream) -> Option<FrameBuffer> {
        // First tick: stream not producing yet.
        if self.frames_captured.fetch_add(1, Ordering::SeqCst) == 0 {
            return None;
        }
        Some(FrameBuffer {
            width: 1280,
            height: 720,
            data: vec![0; 64],
            timestamp: chrono::Utc::now().timestamp_millis(),
        })
    }
}

async fn wait_for_session<F>(manager: &SessionManager, mut done: F) -> ArSession
where
    F: FnMut(&ArSession) -> bool,
{
    for _ in 0..200 {
        if let Some(session) = manager.session().await {
            if done(&session) {
                return session;
            }
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("session never reached the expected state");
}

#[tokio::test]
async fn full_session_produces_guidance_overlays() {
    binsight::init_logging();

    let device = Arc::new(ScriptedDevice::new());
    let manager = SessionManager::new(device.clone(), EngineConfig::default());

    let session = manager.start(SessionMode::Sorting).await.unwrap();
    assert!(session.active);
    assert_eq!(session.camera.stream_id, "cam-integration");

    let session = wait_for_session(&manager, |session| {
        !session.tracking.bins.is_empty() && !session.tracking.objects.is_empty()
    })
    .await;
    assert_eq!(session.tracking.bins[0].id, "b1");
    assert_eq!(session.tracking.objects[0].id, "item-1");

    let snapshot = manager.overlay_snapshot().await;
    let ids: Vec<&str> = snapshot.iter().map(|element| element.id.as_str()).collect();
    assert!(ids.contains(&"bin-b1"), "missing bin label in {ids:?}");
    assert!(ids.contains(&"arrow-item-1-b1"), "missing arrow in {ids:?}");
    assert!(ids.contains(&"info-item-1"), "missing info label in {ids:?}");
    assert!(ids.contains(&"tips-item-1"), "missing suggestions in {ids:?}");

    let bin_label = snapshot.iter().find(|e| e.id == "bin-b1").unwrap();
    assert_eq!(bin_label.content, "RECYCLABLE");
    assert_eq!(bin_label.ttl_ms, None);
    assert_eq!(bin_label.style.color, "#3b82f6");

    let info = snapshot.iter().find(|e| e.id == "info-item-1").unwrap();
    assert_eq!(info.content, "Plastic bottle → recyclable");
    assert_eq!(info.kind, OverlayKind::Label);

    assert!(device.frames_captured.load(Ordering::SeqCst) >= 2);

    manager.stop().await;
    assert!(manager.overlay_snapshot().await.is_empty());
    assert!(manager.session().await.is_none());

    // A second session starts clean.
    let session = manager.start(SessionMode::Sorting).await.unwrap();
    assert!(session.tracking.bins.is_empty());
    let snapshot = manager.overlay_snapshot().await;
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id, "welcome");
    manager.stop().await;
}
