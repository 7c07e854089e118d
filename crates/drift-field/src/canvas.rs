//! Terminal rendering of a recorded draw list.

use drift_core::Rgb;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::{
        Widget,
        canvas::{Canvas, Circle, Line},
    },
};

use crate::surface::{DrawCommand, DrawList};

/// Braille dots give a 2x4 grid per cell, the finest a terminal offers.
const MARKER: Marker = Marker::Braille;

/// Paints a [`DrawList`] onto a braille canvas.
///
/// Terminal cells have no alpha channel, so every color is flattened onto
/// `backdrop` with its alpha scaled by `gain`. Stroke widths are ignored.
#[derive(Debug, Clone, Copy)]
pub struct FieldCanvas<'a> {
    list: &'a DrawList,
    backdrop: Rgb,
    gain: f64,
}

impl<'a> FieldCanvas<'a> {
    pub fn new(list: &'a DrawList) -> Self {
        Self {
            list,
            backdrop: Rgb::BLACK,
            gain: 1.0,
        }
    }

    pub fn backdrop(mut self, backdrop: Rgb) -> Self {
        self.backdrop = backdrop;
        self
    }

    pub fn gain(mut self, gain: f64) -> Self {
        self.gain = gain;
        self
    }
}

impl Widget for FieldCanvas<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let size = self.list.size();
        if size.width <= 0.0 || size.height <= 0.0 {
            return;
        }

        // Surface y grows downward, canvas y grows upward.
        let flip = |y: f64| size.height - y;

        Canvas::default()
            .background_color(Color::from(self.backdrop))
            .marker(MARKER)
            .x_bounds([0.0, size.width])
            .y_bounds([0.0, size.height])
            .paint(|ctx| {
                for command in self.list.commands() {
                    match *command {
                        DrawCommand::Circle {
                            center,
                            radius,
                            color,
                        } => ctx.draw(&Circle {
                            x: center.x,
                            y: flip(center.y),
                            radius,
                            color: color.composite(self.backdrop, self.gain),
                        }),
                        DrawCommand::Line {
                            from, to, color, ..
                        } => ctx.draw(&Line::new(
                            from.x,
                            flip(from.y),
                            to.x,
                            flip(to.y),
                            color.composite(self.backdrop, self.gain),
                        )),
                    }
                }
            })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use drift_core::{Bounds, Vec2};

    use super::*;
    use crate::surface::Surface;

    #[test]
    fn test_paints_circle_with_flattened_color() {
        let mut list = DrawList::new();
        list.set_size(Bounds::new(80.0, 80.0));
        let color = Rgb::new(200, 100, 50).with_alpha(0.25);
        list.fill_circle(Vec2::new(40.0, 40.0), 3.0, color);

        let area = Rect::new(0, 0, 20, 10);
        let mut buf = Buffer::empty(area);
        FieldCanvas::new(&list).gain(2.0).render(area, &mut buf);

        let expected = color.composite(Rgb::BLACK, 2.0);
        assert_eq!(expected, Color::Rgb(100, 50, 25));
        assert!(
            buf.content()
                .iter()
                .any(|cell| cell.symbol() != " " && cell.fg == expected)
        );
    }

    #[test]
    fn test_unsized_list_renders_nothing() {
        let mut list = DrawList::new();
        list.fill_circle(Vec2::new(1.0, 1.0), 1.0, Rgb::new(255, 255, 255).with_alpha(1.0));

        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        FieldCanvas::new(&list).render(area, &mut buf);

        assert!(buf.content().iter().all(|cell| cell.symbol() == " "));
    }
}
