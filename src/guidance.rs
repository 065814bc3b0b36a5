//! Item-to-bin matching. Pure functions: detected items and known bins in,
//! overlay directives out. The pipeline decides what gets inserted where.

use crate::config::EngineConfig;
use crate::models::{
    DetectedBin, DetectedObject, OverlayElement, OverlayKind, OverlayStyle, ScreenPosition,
    WasteCategory,
};

const COLOR_BIODEGRADABLE: &str = "#4ade80";
const COLOR_RECYCLABLE: &str = "#3b82f6";
const COLOR_HAZARDOUS: &str = "#ef4444";
const COLOR_UNKNOWN: &str = "#6b7280";

/// Display color for a waste category. Total: anything unrecognized maps to
/// the neutral gray.
pub fn category_color(category: Option<WasteCategory>) -> &'static str {
    match category {
        Some(WasteCategory::Biodegradable) => COLOR_BIODEGRADABLE,
        Some(WasteCategory::Recyclable) => COLOR_RECYCLABLE,
        Some(WasteCategory::Hazardous) => COLOR_HAZARDOUS,
        None => COLOR_UNKNOWN,
    }
}

/// Produce guidance directives for one detected item against the bins known
/// this cycle. Items without a category emit nothing. Matching is first-bin
/// in detected order, not nearest-by-distance.
pub fn guide(
    item: &DetectedObject,
    known_bins: &[DetectedBin],
    config: &EngineConfig,
) -> Vec<OverlayElement> {
    let Some(category) = item.waste_category else {
        return Vec::new();
    };

    let Some(bin) = known_bins.iter().find(|bin| bin.category == category) else {
        return vec![no_bin_warning(item, config)];
    };

    let (center_x, center_y) = item.bounding_box.center();
    let mut directives = vec![
        OverlayElement {
            id: format!("arrow-{}-{}", item.id, bin.id),
            kind: OverlayKind::Arrow,
            position: ScreenPosition {
                x: center_x,
                y: center_y,
            },
            content: String::new(),
            style: OverlayStyle {
                color: category_color(Some(bin.category)).into(),
                size: 32.0,
                opacity: 0.9,
                animation: Some("pulse".into()),
            },
            ttl_ms: Some(config.guidance_ttl_ms),
            target: Some(bin.id.clone()),
        },
        OverlayElement {
            id: format!("info-{}", item.id),
            kind: OverlayKind::Label,
            position: ScreenPosition {
                x: item.bounding_box.x,
                y: item.bounding_box.y - 24.0,
            },
            content: format!(
                "{} → {}",
                item.classification.as_deref().unwrap_or("Item"),
                category.as_str()
            ),
            style: OverlayStyle {
                color: category_color(Some(bin.category)).into(),
                ..OverlayStyle::default()
            },
            ttl_ms: Some(config.guidance_ttl_ms),
            target: Some(item.id.clone()),
        },
    ];

    if !item.suggestions.is_empty() {
        directives.push(OverlayElement {
            id: format!("tips-{}", item.id),
            kind: OverlayKind::Feedback,
            position: ScreenPosition {
                x: item.bounding_box.x,
                y: item.bounding_box.y + item.bounding_box.height + 8.0,
            },
            content: item.suggestions.join("\n"),
            style: OverlayStyle::default(),
            ttl_ms: Some(config.suggestion_ttl_ms),
            target: Some(item.id.clone()),
        });
    }

    directives
}

fn no_bin_warning(item: &DetectedObject, config: &EngineConfig) -> OverlayElement {
    let (center_x, center_y) = item.bounding_box.center();
    OverlayElement {
        id: format!("warning-{}", item.id),
        kind: OverlayKind::Feedback,
        position: ScreenPosition {
            x: center_x,
            y: center_y,
        },
        content: "No appropriate bin detected".into(),
        style: OverlayStyle {
            color: COLOR_UNKNOWN.into(),
            ..OverlayStyle::default()
        },
        ttl_ms: Some(config.warning_ttl_ms),
        target: Some(item.id.clone()),
    }
}

/// Persistent label for a detected bin. Reuses the `bin-<id>` element id so a
/// later cycle overwrites the prior label instead of accumulating.
pub fn bin_label(bin: &DetectedBin) -> OverlayElement {
    OverlayElement {
        id: format!("bin-{}", bin.id),
        kind: OverlayKind::Label,
        position: ScreenPosition {
            x: bin.position.x,
            y: bin.position.y,
        },
        content: bin.category.as_str().to_uppercase(),
        style: OverlayStyle {
            color: category_color(Some(bin.category)).into(),
            ..OverlayStyle::default()
        },
        ttl_ms: None,
        target: Some(bin.id.clone()),
    }
}
