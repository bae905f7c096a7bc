//! egui-Implementierung des `Surface`-Traits.

use glam::Vec2;

use crate::render::{Paint, Rgba, Surface};

/// Zeichnet die Szene über einen `egui::Painter` in ein Panel-Rect.
///
/// Alle eingehenden Koordinaten sind Pixel relativ zur linken oberen
/// Ecke des Rects; die Umrechnung in den egui-Screen-Raum passiert hier.
pub struct EguiSurface {
    painter: egui::Painter,
    rect: egui::Rect,
}

impl EguiSurface {
    pub fn new(painter: egui::Painter, rect: egui::Rect) -> Self {
        Self { painter, rect }
    }

    fn to_pos(&self, p: Vec2) -> egui::Pos2 {
        self.rect.min + egui::vec2(p.x, p.y)
    }

    fn to_color(c: Rgba) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(
            (c[0] * 255.0) as u8,
            (c[1] * 255.0) as u8,
            (c[2] * 255.0) as u8,
            (c[3] * 255.0) as u8,
        )
    }

    fn to_stroke(paint: &Paint) -> egui::Stroke {
        match paint.stroke {
            Some(color) => egui::Stroke::new(paint.stroke_width, Self::to_color(color)),
            None => egui::Stroke::NONE,
        }
    }

    fn to_fill(paint: &Paint) -> egui::Color32 {
        match paint.fill {
            Some(color) => Self::to_color(color),
            None => egui::Color32::TRANSPARENT,
        }
    }
}

impl Surface for EguiSurface {
    fn size(&self) -> Vec2 {
        Vec2::new(self.rect.width(), self.rect.height())
    }

    fn clear(&mut self, color: Rgba) {
        self.painter.rect_filled(self.rect, 0.0, Self::to_color(color));
    }

    fn line(&mut self, a: Vec2, b: Vec2, paint: &Paint) {
        self.painter
            .line_segment([self.to_pos(a), self.to_pos(b)], Self::to_stroke(paint));
    }

    fn ellipse(&mut self, center: Vec2, radius: Vec2, paint: &Paint) {
        self.painter.add(egui::epaint::EllipseShape {
            center: self.to_pos(center),
            radius: egui::vec2(radius.x, radius.y),
            fill: Self::to_fill(paint),
            stroke: Self::to_stroke(paint),
        });
    }

    fn cubic_bezier(&mut self, p0: Vec2, c1: Vec2, c2: Vec2, p3: Vec2, paint: &Paint) {
        self.painter.add(egui::epaint::CubicBezierShape::from_points_stroke(
            [
                self.to_pos(p0),
                self.to_pos(c1),
                self.to_pos(c2),
                self.to_pos(p3),
            ],
            false,
            egui::Color32::TRANSPARENT,
            Self::to_stroke(paint),
        ));
    }
}
