//! Notification banner styling and placement.

use client_core::{AnchorOrigin, HorizontalAnchor, Severity, VerticalAnchor};

const BANNER_MARGIN: f32 = 16.0;

pub struct BannerStyle {
    pub icon: &'static str,
    pub fill: egui::Color32,
    pub stroke: egui::Color32,
}

pub fn style_for(severity: Severity) -> BannerStyle {
    match severity {
        Severity::Success => BannerStyle {
            icon: "✔",
            fill: egui::Color32::from_rgb(67, 160, 71),
            stroke: egui::Color32::from_rgb(46, 125, 50),
        },
        Severity::Info => BannerStyle {
            icon: "ℹ",
            fill: egui::Color32::from_rgb(63, 81, 181),
            stroke: egui::Color32::from_rgb(48, 63, 159),
        },
        Severity::Warning => BannerStyle {
            icon: "⚠",
            fill: egui::Color32::from_rgb(255, 160, 0),
            stroke: egui::Color32::from_rgb(255, 111, 0),
        },
        Severity::Error => BannerStyle {
            icon: "✖",
            fill: egui::Color32::from_rgb(211, 47, 47),
            stroke: egui::Color32::from_rgb(183, 28, 28),
        },
    }
}

/// Screen anchor and inward offset for a notification origin.
pub fn placement(origin: AnchorOrigin) -> (egui::Align2, egui::Vec2) {
    let (x_align, dx) = match origin.horizontal {
        HorizontalAnchor::Left => (egui::Align::Min, BANNER_MARGIN),
        HorizontalAnchor::Center => (egui::Align::Center, 0.0),
        HorizontalAnchor::Right => (egui::Align::Max, -BANNER_MARGIN),
    };
    let (y_align, dy) = match origin.vertical {
        VerticalAnchor::Top => (egui::Align::Min, BANNER_MARGIN),
        VerticalAnchor::Bottom => (egui::Align::Max, -BANNER_MARGIN),
    };
    (egui::Align2([x_align, y_align]), egui::vec2(dx, dy))
}
