use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum OverlayKind {
    Arrow,
    Label,
    Animation,
    Tutorial,
    Feedback,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScreenPosition {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OverlayStyle {
    pub color: String,
    pub size: f32,
    pub opacity: f32,
    #[serde(default)]
    pub animation: Option<String>,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            color: "#ffffff".into(),
            size: 16.0,
            opacity: 1.0,
            animation: None,
        }
    }
}

/// A directive for the external renderer. Ids are unique within the store;
/// re-inserting an id replaces the prior element in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayElement {
    pub id: String,
    pub kind: OverlayKind,
    pub position: ScreenPosition,
    pub content: String,
    pub style: OverlayStyle,
    /// Element self-destructs this many ms after insertion; `None` persists
    /// until explicit removal or session end.
    #[serde(default)]
    pub ttl_ms: Option<u64>,
    #[serde(default)]
    pub target: Option<String>,
}

/// Closed keyframe property schema. Absent fields are not animated.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KeyframeProps {
    #[serde(default)]
    pub x: Option<f32>,
    #[serde(default)]
    pub y: Option<f32>,
    #[serde(default)]
    pub scale: Option<f32>,
    #[serde(default)]
    pub opacity: Option<f32>,
    #[serde(default)]
    pub rotation: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Keyframe {
    /// Offset from animation start, in ms.
    pub at_ms: u64,
    pub props: KeyframeProps,
}

/// Descriptive animation payload. The engine never interprets keyframes; they
/// pass through to the renderer untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArAnimation {
    pub id: String,
    pub animation_type: String,
    pub target: String,
    pub keyframes: Vec<Keyframe>,
    pub duration_ms: u64,
    pub looped: bool,
}
