mod detection;
mod overlay;
mod session;

pub use detection::{
    BinStatus, BoundingBox, DetectedBin, DetectedObject, ObjectKind, Position3, WasteCategory,
};
pub use overlay::{
    ArAnimation, Keyframe, KeyframeProps, OverlayElement, OverlayKind, OverlayStyle,
    ScreenPosition,
};
pub use session::{ArSession, CameraDescriptor, SessionMode, TrackingSnapshot};
