//! Drawing seam between the race scene and whatever paints it.
//!
//! The scene only ever issues lines, circles and text through [`Canvas`];
//! [`PainterCanvas`] forwards them to an egui `Painter`.

use egui::{Align2, Color32, FontId, Pos2, Stroke, Vec2};

use crate::render::animator::Animator;
use crate::render::layout::{Primitive, RaceLayout, TextRole};

pub trait Canvas {
    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke);
    fn circle(&mut self, center: Pos2, radius: f32, fill: Color32, stroke: Stroke);
    fn text(&mut self, pos: Pos2, anchor: Align2, text: &str, role: TextRole);
}

/// Theme colors for the race canvas.
struct Theme {
    caption: Color32,
    name: Color32,
}

impl Theme {
    fn light() -> Self {
        Self {
            caption: Color32::from_rgb(90, 90, 100),
            name: Color32::from_rgb(25, 25, 38),
        }
    }

    fn dark() -> Self {
        Self {
            caption: Color32::from_rgb(150, 150, 160),
            name: Color32::from_rgb(230, 230, 240),
        }
    }
}

/// [`Canvas`] over an egui painter; scene coordinates are offset by `origin`.
pub struct PainterCanvas<'a> {
    painter: &'a egui::Painter,
    origin: Vec2,
    theme: Theme,
}

impl<'a> PainterCanvas<'a> {
    pub fn new(painter: &'a egui::Painter, origin: Pos2, dark_mode: bool) -> Self {
        Self {
            painter,
            origin: origin.to_vec2(),
            theme: if dark_mode { Theme::dark() } else { Theme::light() },
        }
    }
}

impl Canvas for PainterCanvas<'_> {
    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke) {
        self.painter
            .line_segment([from + self.origin, to + self.origin], stroke);
    }

    fn circle(&mut self, center: Pos2, radius: f32, fill: Color32, stroke: Stroke) {
        self.painter.circle(center + self.origin, radius, fill, stroke);
    }

    fn text(&mut self, pos: Pos2, anchor: Align2, text: &str, role: TextRole) {
        let (font, color) = match role {
            TextRole::Caption => (FontId::proportional(12.0), self.theme.caption),
            TextRole::Name => (FontId::proportional(13.0), self.theme.name),
        };
        self.painter.text(pos + self.origin, anchor, text, font, color);
    }
}

/// Paint `layout` with each racer displaced by its current animation frame.
///
/// Racers without a running task are drawn at rest with no pulse ring.
pub fn paint_race(canvas: &mut dyn Canvas, layout: &RaceLayout, animator: &Animator, now: f64) {
    for primitive in layout.primitives() {
        match primitive {
            Primitive::Line { from, to, stroke } => canvas.line(from, to, stroke),
            Primitive::Text {
                pos,
                anchor,
                text,
                role,
            } => canvas.text(pos, anchor, &text, role),
            Primitive::Marker {
                racer,
                center,
                radius,
                fill,
                stroke,
            } => {
                let dy = animator.drift(&racer, now);
                canvas.circle(center + Vec2::new(0.0, dy), radius, fill, stroke);
            }
            Primitive::RacerLabel { racer, pos, text } => {
                let dy = animator.drift(&racer, now);
                canvas.text(pos + Vec2::new(0.0, dy), Align2::CENTER_TOP, &text, TextRole::Name);
            }
            Primitive::Pulse {
                racer,
                center,
                color,
            } => {
                if let Some(frame) = animator.frame(&racer, now) {
                    if frame.pulse_opacity > 0.001 {
                        canvas.circle(
                            center + Vec2::new(0.0, frame.dy),
                            frame.pulse_radius,
                            Color32::TRANSPARENT,
                            Stroke::new(1.5, color.gamma_multiply(frame.pulse_opacity)),
                        );
                    }
                }
            }
        }
    }
}
