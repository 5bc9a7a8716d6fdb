//! Drawing figure trees onto a board.

use std::collections::BTreeSet;
use std::fmt;

use crate::model::{DrawInfo, DrawMethod, IntPoint, Point};

/// A drawing surface.
pub trait Board {
    /// Plot individual pixels.
    fn draw_pixels(&mut self, pixels: &[IntPoint]);

    /// Draw a polyline through `points`, in order.
    fn draw_lines(&mut self, points: &[Point]);
}

/// Draw every item of a draw projection.
pub fn draw_all<B: Board + ?Sized>(board: &mut B, infos: &[DrawInfo]) {
    for info in infos {
        draw(board, info);
    }
}

/// Draw one item, dispatching on its draw method.
///
/// Pixels are rounded to integers and deduplicated. Closed shapes repeat their
/// first vertex at the end.
pub fn draw<B: Board + ?Sized>(board: &mut B, info: &DrawInfo) {
    match info.method {
        DrawMethod::Pixels => {
            let pixels: BTreeSet<IntPoint> = info.points.iter().map(|p| p.to_int()).collect();
            board.draw_pixels(&pixels.into_iter().collect::<Vec<_>>());
        }
        DrawMethod::PointsOpen => board.draw_lines(&info.points),
        DrawMethod::PointsClosed => {
            let mut points = info.points.clone();
            if let Some(&first) = points.first() {
                points.push(first);
            }
            board.draw_lines(&points);
        }
    }
}

/// Board that records every draw call as a line of text.
#[derive(Debug, Default, Clone)]
pub struct TextBoard {
    lines: Vec<String>,
}

impl TextBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

fn format_int(p: IntPoint) -> String {
    format!("({}, {})", p.x, p.y)
}

impl Board for TextBoard {
    fn draw_pixels(&mut self, pixels: &[IntPoint]) {
        let points: Vec<_> = pixels.iter().copied().map(format_int).collect();
        self.lines.push(format!("Pixels[{}]", points.join(", ")));
    }

    fn draw_lines(&mut self, points: &[Point]) {
        let points: Vec<_> = points.iter().map(|p| format_int(p.to_int())).collect();
        self.lines.push(format!("Line {}", points.join(" -> ")));
    }
}

impl fmt::Display for TextBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::figures::{Circle, Line, Square};
    use crate::model::{Container, Figure, Node};

    #[test]
    fn test_open_line() {
        let mut board = TextBoard::new();
        draw(&mut board, &Line::new(Point::new(0, 0), Point::new(30, 30)).draw_info());
        assert_eq!(board.lines(), ["Line (0, 0) -> (30, 30)"]);
    }

    #[test]
    fn test_closed_shape_repeats_first_vertex() {
        let mut board = TextBoard::new();
        draw(&mut board, &Square::new(10).unwrap().draw_info());

        let line = &board.lines()[0];
        let points: Vec<_> = line.trim_start_matches("Line ").split(" -> ").collect();
        assert_eq!(points.len(), 5);
        assert_eq!(points.first(), points.last());
    }

    #[test]
    fn test_pixels_are_deduplicated() {
        let info = DrawInfo::new(
            DrawMethod::Pixels,
            vec![Point::new(1, 1), Point::new(1, 1), Point::new(0, 2)],
        );
        let mut board = TextBoard::new();
        draw(&mut board, &info);
        assert_eq!(board.lines(), ["Pixels[(0, 2), (1, 1)]"]);
    }

    #[test]
    fn test_draw_all_follows_container_offsets() {
        let tree = Container::new(
            vec![
                Node::figure(Line::new(Point::ORIGIN, Point::new(1, 0))),
                Node::figure(Circle::new(1).unwrap()),
            ],
            Point::new(10, 20),
        );
        let mut board = TextBoard::new();
        draw_all(&mut board, &tree.draw_info().unwrap());

        assert_eq!(board.lines().len(), 2);
        assert_eq!(board.lines()[0], "Line (10, 20) -> (11, 20)");
        assert!(board.lines()[1].starts_with("Pixels["));
        assert!(board.to_string().ends_with('\n'));
    }
}
