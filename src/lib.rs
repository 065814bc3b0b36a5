//! AR waste-sorting guidance engine.
//!
//! The engine owns session lifecycle, the capture→detect→ingest pipeline,
//! the overlay store, and item-to-bin guidance matching. The detector, the
//! renderer, and content catalogs are external collaborators reached through
//! the seams in [`ResourceAdapter`], the detector protocol, and the catalog
//! types.

mod config;
mod content;
mod detector;
mod error;
mod guidance;
mod models;
mod overlay;
mod pipeline;
mod resource;
mod session;
mod utils;

pub use config::EngineConfig;
pub use content::{EducationContent, EducationStep, GameDefinition};
pub use detector::{DetectorReply, DetectorRequest, FrameBuffer};
pub use error::EngineError;
pub use guidance::{bin_label, category_color, guide};
pub use models::{
    ArAnimation, ArSession, BinStatus, BoundingBox, CameraDescriptor, DetectedBin, DetectedObject,
    Keyframe, KeyframeProps, ObjectKind, OverlayElement, OverlayKind, OverlayStyle, Position3,
    ScreenPosition, SessionMode, TrackingSnapshot, WasteCategory,
};
pub use overlay::OverlayStore;
pub use pipeline::DetectionPipeline;
pub use resource::{
    CameraFacing, CameraStream, DetectorChannel, DeviceCapabilities, FrameConstraints,
    ResourceAdapter,
};
pub use session::SessionManager;
pub use utils::logging::init_logging;
