// Focus ring rendering (egui-dependent)

use eframe::egui::{Color32, Painter, Rect, Stroke, StrokeKind};

/// Focus ring styling configuration
pub struct FocusRingStyle {
    pub stroke_width: f32,
    pub color: Color32,
    pub corner_radius: f32,
    pub padding: f32,
}

impl Default for FocusRingStyle {
    fn default() -> Self {
        Self {
            stroke_width: 2.5,
            color: Color32::from_rgb(100, 200, 255),
            corner_radius: 6.0,
            padding: 2.0,
        }
    }
}

impl FocusRingStyle {
    /// Thinner ring for a control activated by the pointer but not navigation
    pub fn pointer() -> Self {
        Self {
            stroke_width: 1.5,
            color: Color32::from_rgb(80, 180, 255).gamma_multiply(0.7),
            ..Default::default()
        }
    }
}

/// Draw a focus ring around a rectangle
pub fn draw_focus_ring(painter: &Painter, rect: Rect, style: &FocusRingStyle) {
    let expanded = rect.expand(style.padding);
    painter.rect_stroke(
        expanded,
        style.corner_radius as u8,
        Stroke::new(style.stroke_width, style.color),
        StrokeKind::Outside,
    );
}
