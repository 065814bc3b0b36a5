/// Engine tunables with sensible defaults.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Capture tick interval. Bounded below by the display refresh rate;
    /// there is no point capturing faster than frames are produced.
    pub tick_interval_ms: u64,

    /// Abort a single capture that exceeds this bound.
    pub capture_timeout_ms: u64,

    /// Waste items at or below this confidence produce no guidance.
    pub confidence_threshold: f32,

    /// TTLs for generated overlay directives.
    pub guidance_ttl_ms: u64,
    pub warning_ttl_ms: u64,
    pub suggestion_ttl_ms: u64,

    /// Requested capture resolution.
    pub frame_width: u32,
    pub frame_height: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 33,
            capture_timeout_ms: 1_000,
            confidence_threshold: 0.70,
            guidance_ttl_ms: 3_000,
            warning_ttl_ms: 2_000,
            suggestion_ttl_ms: 4_000,
            frame_width: 1280,
            frame_height: 720,
        }
    }
}
