//! Message protocol spoken with the detector worker. The worker is an opaque
//! classifier; the engine only consumes this contract.

use serde::{Deserialize, Serialize};

use crate::models::{DetectedBin, DetectedObject};

/// A captured frame handed to the detector. Pixel data is opaque to the
/// engine; only the detector decodes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameBuffer {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    /// Unix ms at capture time.
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DetectorRequest {
    #[serde(rename_all = "camelCase")]
    DetectFrame {
        image_data: FrameBuffer,
        timestamp: i64,
    },
}

/// Worker replies are asynchronous and may arrive out of order or duplicated.
/// Ingestion overwrites the latest snapshot per category, so stale replies
/// cost nothing but a cosmetically outdated overlay.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum DetectorReply {
    ObjectsDetected { objects: Vec<DetectedObject> },
    BinsDetected { bins: Vec<DetectedBin> },
    /// Any message type the engine does not understand.
    Unknown,
}

#[derive(Deserialize)]
struct ObjectsPayload {
    objects: Vec<DetectedObject>,
}

#[derive(Deserialize)]
struct BinsPayload {
    bins: Vec<DetectedBin>,
}

/// Dispatch on the `type` tag first so an unrecognized message maps to
/// `Unknown` no matter what its `data` payload looks like.
impl<'de> serde::Deserialize<'de> for DetectorReply {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let value = serde_json::Value::deserialize(deserializer)?;
        let tag = value.get("type").and_then(|tag| tag.as_str());

        match tag {
            Some("objects_detected") => {
                let data = value.get("data").cloned().unwrap_or_default();
                let payload: ObjectsPayload =
                    serde_json::from_value(data).map_err(D::Error::custom)?;
                Ok(DetectorReply::ObjectsDetected {
                    objects: payload.objects,
                })
            }
            Some("bins_detected") => {
                let data = value.get("data").cloned().unwrap_or_default();
                let payload: BinsPayload =
                    serde_json::from_value(data).map_err(D::Error::custom)?;
                Ok(DetectorReply::BinsDetected { bins: payload.bins })
            }
            _ => Ok(DetectorReply::Unknown),
        }
    }
}
