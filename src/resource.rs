//! Device seam: camera stream and detector worker acquisition. Everything
//! behind this trait is an external collaborator; the engine only holds the
//! handles and the message channels.

use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};

use crate::detector::{DetectorReply, DetectorRequest, FrameBuffer};
use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraFacing {
    Environment,
    User,
}

/// Requested capture resolution. Ideal, not mandatory: the device may hand
/// back a stream with different dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameConstraints {
    pub ideal_width: u32,
    pub ideal_height: u32,
}

/// What the device can do. Checked before any resource is acquired.
#[derive(Debug, Clone, Copy)]
pub struct DeviceCapabilities {
    pub camera: bool,
    pub detector: bool,
    pub graphics: bool,
}

impl DeviceCapabilities {
    /// Names the first missing capability, if any.
    pub fn missing(&self) -> Option<&'static str> {
        if !self.camera {
            Some("camera")
        } else if !self.detector {
            Some("detector worker")
        } else if !self.graphics {
            Some("graphics context")
        } else {
            None
        }
    }
}

/// An acquired camera stream.
#[derive(Debug)]
pub struct CameraStream {
    pub id: String,
    pub width: u32,
    pub height: u32,
}

/// Channel pair for one spawned detector worker. Requests go out
/// fire-and-forget; replies arrive asynchronously on `replies`.
pub struct DetectorChannel {
    pub requests: mpsc::Sender<DetectorRequest>,
    pub replies: Mutex<Option<mpsc::Receiver<DetectorReply>>>,
}

impl DetectorChannel {
    pub fn new(
        requests: mpsc::Sender<DetectorRequest>,
        replies: mpsc::Receiver<DetectorReply>,
    ) -> Self {
        Self {
            requests,
            replies: Mutex::new(Some(replies)),
        }
    }

    /// Hands the reply receiver to the pipeline. Yields `None` once taken.
    pub async fn take_replies(&self) -> Option<mpsc::Receiver<DetectorReply>> {
        self.replies.lock().await.take()
    }
}

/// Acquires and releases the camera and the detector worker. `release_camera`
/// and `terminate_detector` must be idempotent: releasing an already-released
/// handle is a no-op, never an error.
#[async_trait]
pub trait ResourceAdapter: Send + Sync {
    fn capabilities(&self) -> DeviceCapabilities;

    /// May suspend while the user decides on the permission prompt.
    async fn acquire_camera(
        &self,
        facing: CameraFacing,
        constraints: FrameConstraints,
    ) -> Result<CameraStream, EngineError>;

    async fn release_camera(&self, stream: &CameraStream);

    async fn spawn_detector(&self) -> Result<DetectorChannel, EngineError>;

    async fn terminate_detector(&self, channel: &DetectorChannel);

    /// Returns `None` until the stream starts producing frames (width/height
    /// still zero on the source). Never blocks the tick loop.
    async fn capture_frame(&self, stream: &CameraStream) -> Option<FrameBuffer>;
}
