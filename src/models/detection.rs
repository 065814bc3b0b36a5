use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    WasteItem,
    Bin,
    Hand,
    Surface,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum WasteCategory {
    Biodegradable,
    Recyclable,
    Hazardous,
}

impl WasteCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            WasteCategory::Biodegradable => "biodegradable",
            WasteCategory::Recyclable => "recyclable",
            WasteCategory::Hazardous => "hazardous",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum BinStatus {
    Available,
    Full,
    Contaminated,
}

impl Default for BinStatus {
    fn default() -> Self {
        BinStatus::Available
    }
}

/// Axis-aligned box in frame pixel space.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Position3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// One detected item from a detection cycle. Immutable once emitted; the next
/// cycle's list supersedes it wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedObject {
    pub id: String,
    pub kind: ObjectKind,
    #[serde(default)]
    pub waste_category: Option<WasteCategory>,
    pub confidence: f32,
    pub bounding_box: BoundingBox,
    #[serde(default)]
    pub classification: Option<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedBin {
    pub id: String,
    pub category: WasteCategory,
    #[serde(default)]
    pub color_tag: Option<String>,
    #[serde(default)]
    pub position: Position3,
    pub confidence: f32,
    #[serde(default)]
    pub capacity: Option<f32>,
    #[serde(default)]
    pub status: BinStatus,
}
