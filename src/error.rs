use thiserror::Error;

/// Caller-visible failures. Only `start` can surface one of these; everything
/// transient inside a running session is absorbed or logged.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The device lacks camera, worker, or graphics capability. Reported
    /// before any resource is touched; not retried.
    #[error("device does not support AR guidance: {0}")]
    Unsupported(&'static str),

    /// The user declined camera access.
    #[error("camera permission denied")]
    PermissionDenied,

    /// No usable camera device.
    #[error("camera device unavailable")]
    DeviceUnavailable,

    /// The detector worker failed to spawn.
    #[error("detector worker unavailable: {0}")]
    DetectorUnavailable(String),

    /// A session is already live on this manager.
    #[error("a session is already active")]
    SessionActive,
}
