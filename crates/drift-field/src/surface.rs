//! Drawing surfaces the animator paints onto.

use drift_core::{Bounds, Rgba, Vec2};

/// A 2D drawing target.
pub trait Surface {
    /// Set the backing size of the surface.
    fn set_size(&mut self, size: Bounds);

    /// Erase everything drawn so far.
    fn clear(&mut self);

    /// Fill a circle.
    fn fill_circle(&mut self, center: Vec2, radius: f64, color: Rgba);

    /// Stroke a straight line.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f64, color: Rgba);
}

/// A recorded drawing operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Circle {
        center: Vec2,
        radius: f64,
        color: Rgba,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f64,
        color: Rgba,
    },
}

/// A surface that records draw commands for later painting.
///
/// Holds the commands issued since the last [`Surface::clear`], along with
/// a running count of every drawing call (clears included).
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    size: Bounds,
    commands: Vec<DrawCommand>,
    draw_calls: u64,
}

impl DrawList {
    /// Create an empty, zero-sized draw list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Backing size.
    pub fn size(&self) -> Bounds {
        self.size
    }

    /// Commands since the last clear, in issue order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Total number of clear, fill and stroke calls received.
    pub fn draw_calls(&self) -> u64 {
        self.draw_calls
    }

    pub fn circles(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    pub fn lines(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }
}

impl Surface for DrawList {
    fn set_size(&mut self, size: Bounds) {
        self.size = size;
    }

    fn clear(&mut self) {
        self.draw_calls += 1;
        self.commands.clear();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f64, color: Rgba) {
        self.draw_calls += 1;
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f64, color: Rgba) {
        self.draw_calls += 1;
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use drift_core::Rgb;

    use super::*;

    #[test]
    fn test_clear_drops_commands_but_counts() {
        let mut list = DrawList::new();
        let color = Rgb::new(1, 2, 3).with_alpha(0.2);
        list.fill_circle(Vec2::new(1.0, 1.0), 2.0, color);
        list.stroke_line(Vec2::new(0.0, 0.0), Vec2::new(3.0, 3.0), 0.5, color);
        assert_eq!(list.circles(), 1);
        assert_eq!(list.lines(), 1);

        list.clear();
        assert!(list.commands().is_empty());
        assert_eq!(list.draw_calls(), 3);
    }

    #[test]
    fn test_set_size_is_not_a_draw_call() {
        let mut list = DrawList::new();
        list.set_size(Bounds::new(640.0, 384.0));
        assert_eq!(list.size(), Bounds::new(640.0, 384.0));
        assert_eq!(list.draw_calls(), 0);
    }
}
