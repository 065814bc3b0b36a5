use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::detection::{DetectedBin, DetectedObject};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SessionMode {
    Sorting,
    Education,
    Game,
    Assessment,
}

impl SessionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionMode::Sorting => "sorting",
            SessionMode::Education => "education",
            SessionMode::Game => "game",
            SessionMode::Assessment => "assessment",
        }
    }
}

/// Latest detector output, per category. Replies overwrite the matching list
/// wholesale; lists from different cycles are never merged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingSnapshot {
    pub objects: Vec<DetectedObject>,
    pub bins: Vec<DetectedBin>,
}

/// Describes the acquired camera stream for external callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraDescriptor {
    pub stream_id: String,
    pub width: u32,
    pub height: u32,
}

/// One bounded lifetime of camera-driven guidance activity. Mutated only by
/// the session manager and the pipeline's reply handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArSession {
    pub id: String,
    pub active: bool,
    pub mode: SessionMode,
    pub camera: CameraDescriptor,
    pub tracking: TrackingSnapshot,
    pub started_at: DateTime<Utc>,
}

impl ArSession {
    pub fn new(mode: SessionMode, camera: CameraDescriptor) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            active: true,
            mode,
            camera,
            tracking: TrackingSnapshot::default(),
            started_at: Utc::now(),
        }
    }
}
