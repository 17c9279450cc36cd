//! Retained display list.
//!
//! Scenes describe a frame as a flat list of draw commands; the platform
//! painter (Canvas2D in `drift-web`) replays them in order. Keeping the
//! engine free of any canvas handle is what lets scenes run under
//! `cargo test` on the host.
//!
//! # Usage
//!
//! ```ignore
//! list.clear_surface(bounds);
//! list.fill_rect(Vec2::ZERO, bounds, Paint::vertical(0.0, bounds.y, &[
//!     (0.0, Color::rgb8(0x14, 0x16, 0x1c)),
//!     (1.0, Color::rgb8(0x2b, 0x2e, 0x38)),
//! ]));
//! list.stroke_segments(drops, Stroke::new(Color::rgba8(170, 200, 255, 0.45), 2.0));
//! ```

use glam::Vec2;

use crate::assets::registry::AssetKey;
use super::color::Color;

/// A single gradient stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    /// Position along the gradient, 0.0 - 1.0.
    pub offset: f32,
    pub color: Color,
}

/// Fill source for shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Gradient along the line `from` → `to`.
    Linear { from: Vec2, to: Vec2, stops: Vec<ColorStop> },
    /// Gradient between two concentric circles.
    Radial { center: Vec2, inner_radius: f32, outer_radius: f32, stops: Vec<ColorStop> },
}

impl Paint {
    fn stops(stops: &[(f32, Color)]) -> Vec<ColorStop> {
        stops
            .iter()
            .map(|&(offset, color)| ColorStop { offset, color })
            .collect()
    }

    /// Top-to-bottom linear gradient between `y0` and `y1`.
    pub fn vertical(y0: f32, y1: f32, stops: &[(f32, Color)]) -> Self {
        Paint::Linear {
            from: Vec2::new(0.0, y0),
            to: Vec2::new(0.0, y1),
            stops: Self::stops(stops),
        }
    }

    pub fn radial(center: Vec2, inner_radius: f32, outer_radius: f32, stops: &[(f32, Color)]) -> Self {
        Paint::Radial {
            center,
            inner_radius,
            outer_radius,
            stops: Self::stops(stops),
        }
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

/// Line end style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
}

/// Compositing mode for subsequent commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Blend {
    /// Standard source-over.
    #[default]
    Normal,
    /// Lightening blend used for sun glints.
    Screen,
}

/// Stroke parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
    pub cap: LineCap,
    /// Dash and gap lengths; `None` for a solid line.
    pub dash: Option<[f32; 2]>,
}

impl Stroke {
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            cap: LineCap::Butt,
            dash: None,
        }
    }

    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_dash(mut self, dash: f32, gap: f32) -> Self {
        self.dash = Some([dash, gap]);
        self
    }
}

/// One drawing instruction, replayed in order by the painter.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Wipe the whole surface to transparent.
    Clear { size: Vec2 },
    FillRect { origin: Vec2, size: Vec2, paint: Paint },
    StrokeRect { origin: Vec2, size: Vec2, stroke: Stroke },
    /// Circles filled as a single path (overlaps do not double the alpha).
    FillCircles { circles: Vec<(Vec2, f32)>, paint: Paint },
    FillPolygon { points: Vec<Vec2>, paint: Paint },
    StrokePolyline { points: Vec<Vec2>, stroke: Stroke },
    /// Independent line segments stroked as one path.
    StrokeSegments { segments: Vec<(Vec2, Vec2)>, stroke: Stroke },
    /// Image asset centered on `center`, optionally mirrored horizontally.
    Sprite { asset: AssetKey, center: Vec2, size: Vec2, mirrored: bool },
    /// Current frame of a video asset stretched over the rectangle.
    VideoFrame { asset: AssetKey, origin: Vec2, size: Vec2 },
    /// Centered text.
    Text { text: String, position: Vec2, size_px: f32, color: Color },
    /// Global alpha for subsequent commands.
    SetAlpha(f32),
    SetBlend(Blend),
}

/// Ordered list of draw commands for one frame.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(256),
        }
    }

    /// Drop all commands. Called at the start of each frame.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawCommand> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    // -- Builders --

    pub fn clear_surface(&mut self, size: Vec2) {
        self.push(DrawCommand::Clear { size });
    }

    pub fn fill_rect(&mut self, origin: Vec2, size: Vec2, paint: impl Into<Paint>) {
        self.push(DrawCommand::FillRect { origin, size, paint: paint.into() });
    }

    pub fn stroke_rect(&mut self, origin: Vec2, size: Vec2, stroke: Stroke) {
        self.push(DrawCommand::StrokeRect { origin, size, stroke });
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, paint: impl Into<Paint>) {
        self.fill_circles(vec![(center, radius)], paint);
    }

    pub fn fill_circles(&mut self, circles: Vec<(Vec2, f32)>, paint: impl Into<Paint>) {
        if circles.is_empty() {
            return;
        }
        self.push(DrawCommand::FillCircles { circles, paint: paint.into() });
    }

    pub fn fill_polygon(&mut self, points: Vec<Vec2>, paint: impl Into<Paint>) {
        if points.len() < 3 {
            return;
        }
        self.push(DrawCommand::FillPolygon { points, paint: paint.into() });
    }

    pub fn stroke_polyline(&mut self, points: Vec<Vec2>, stroke: Stroke) {
        if points.len() < 2 {
            return;
        }
        self.push(DrawCommand::StrokePolyline { points, stroke });
    }

    pub fn stroke_segments(&mut self, segments: Vec<(Vec2, Vec2)>, stroke: Stroke) {
        if segments.is_empty() {
            return;
        }
        self.push(DrawCommand::StrokeSegments { segments, stroke });
    }

    pub fn sprite(&mut self, asset: AssetKey, center: Vec2, size: Vec2, mirrored: bool) {
        self.push(DrawCommand::Sprite { asset, center, size, mirrored });
    }

    pub fn video_frame(&mut self, asset: AssetKey, origin: Vec2, size: Vec2) {
        self.push(DrawCommand::VideoFrame { asset, origin, size });
    }

    pub fn text(&mut self, text: impl Into<String>, position: Vec2, size_px: f32, color: Color) {
        self.push(DrawCommand::Text { text: text.into(), position, size_px, color });
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.push(DrawCommand::SetAlpha(alpha.clamp(0.0, 1.0)));
    }

    pub fn set_blend(&mut self, blend: Blend) {
        self.push(DrawCommand::SetBlend(blend));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_shapes_are_skipped() {
        let mut list = DisplayList::new();
        list.stroke_polyline(vec![Vec2::ZERO], Stroke::new(Color::WHITE, 1.0));
        list.fill_polygon(vec![Vec2::ZERO, Vec2::X], Color::WHITE);
        list.fill_circles(Vec::new(), Color::WHITE);
        list.stroke_segments(Vec::new(), Stroke::new(Color::WHITE, 1.0));
        assert!(list.is_empty());
    }

    #[test]
    fn commands_keep_insertion_order() {
        let mut list = DisplayList::new();
        list.clear_surface(Vec2::new(800.0, 600.0));
        list.fill_rect(Vec2::ZERO, Vec2::new(10.0, 10.0), Color::BLACK);
        list.set_alpha(0.5);
        assert_eq!(list.len(), 3);
        assert!(matches!(list.commands()[0], DrawCommand::Clear { .. }));
        assert!(matches!(list.commands()[2], DrawCommand::SetAlpha(a) if a == 0.5));
    }

    #[test]
    fn alpha_is_clamped() {
        let mut list = DisplayList::new();
        list.set_alpha(3.0);
        assert_eq!(list.commands()[0], DrawCommand::SetAlpha(1.0));
    }

    #[test]
    fn vertical_gradient_builds_stops() {
        let paint = Paint::vertical(0.0, 100.0, &[(0.0, Color::BLACK), (1.0, Color::WHITE)]);
        match paint {
            Paint::Linear { from, to, stops } => {
                assert_eq!(from, Vec2::ZERO);
                assert_eq!(to, Vec2::new(0.0, 100.0));
                assert_eq!(stops.len(), 2);
                assert_eq!(stops[1].color, Color::WHITE);
            }
            other => panic!("expected linear gradient, got {:?}", other),
        }
    }

    #[test]
    fn clear_drops_commands() {
        let mut list = DisplayList::new();
        list.text("loading", Vec2::ZERO, 16.0, Color::WHITE);
        list.clear();
        assert!(list.is_empty());
    }
}
