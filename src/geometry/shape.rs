//! Editable polygon / rectangle point list in image space.

use super::transform::ViewTransform;
use glam::DVec2;
use log::debug;
use serde::{Deserialize, Serialize};

/// Default view-space radius for grabbing a point.
pub const DEFAULT_HIT_RADIUS_PIXELS: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShapeMode {
    /// Free-form polygon, one point per click.
    #[default]
    Polygon,
    /// Axis-aligned rectangle from two corner picks, stored as 4 points.
    Rectangle,
}

/// Progress of the two-click rectangle pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RectanglePhase {
    #[default]
    AwaitingFirstCorner,
    AwaitingSecondCorner,
}

/// Four corners spanned by two opposite corners `a` and `c`:
/// `[a, (c.x, a.y), c, (a.x, c.y)]`.
pub fn rectangle_from_corners(a: DVec2, c: DVec2) -> [DVec2; 4] {
    [a, DVec2::new(c.x, a.y), c, DVec2::new(a.x, c.y)]
}

/// Even-odd point-in-polygon test.
pub fn polygon_contains(polygon: &[DVec2], point: DVec2) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (pi, pj) = (polygon[i], polygon[j]);
        if (pi.y > point.y) != (pj.y > point.y) {
            let x_cross = (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Ordered image-space points plus the editing mode.
///
/// In rectangle mode the list holds either nothing, a single pending corner,
/// or exactly four points forming an axis-aligned rectangle where indices
/// 0/2 and 1/3 are opposite corners.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapeEditor {
    points: Vec<DVec2>,
    mode: ShapeMode,
    phase: RectanglePhase,
}

impl ShapeEditor {
    pub fn new(mode: ShapeMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    pub fn mode(&self) -> ShapeMode {
        self.mode
    }

    pub fn rectangle_phase(&self) -> RectanglePhase {
        self.phase
    }

    /// Switch modes. The point list is cleared since a polygon is not a
    /// valid rectangle and vice versa.
    pub fn set_mode(&mut self, mode: ShapeMode) {
        if self.mode != mode {
            self.mode = mode;
            self.clear();
        }
    }

    /// The two defining corners of a committed rectangle.
    pub fn rectangle_corners(&self) -> Option<(DVec2, DVec2)> {
        match (self.mode, self.points.as_slice()) {
            (ShapeMode::Rectangle, [a, _, c, _]) => Some((*a, *c)),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.phase = RectanglePhase::AwaitingFirstCorner;
    }

    /// Replace the point list wholesale, e.g. from parsed text.
    ///
    /// In rectangle mode only 0, 1, 2 (two opposite corners) or 4 points are
    /// accepted; four points are rebuilt from corners 0 and 2. Returns
    /// `false` and leaves the editor untouched otherwise.
    pub fn set_points(&mut self, points: Vec<DVec2>) -> bool {
        match self.mode {
            ShapeMode::Polygon => {
                self.points = points;
                self.phase = RectanglePhase::AwaitingFirstCorner;
            }
            ShapeMode::Rectangle => match points.as_slice() {
                [] => self.clear(),
                [corner] => {
                    self.points = vec![*corner];
                    self.phase = RectanglePhase::AwaitingSecondCorner;
                }
                [a, c] | [a, _, c, _] => {
                    self.points = rectangle_from_corners(*a, *c).to_vec();
                    self.phase = RectanglePhase::AwaitingFirstCorner;
                }
                _ => return false,
            },
        }
        true
    }

    /// Add a click at a view position.
    ///
    /// The click is mapped to image space and clamped to the image. Polygon
    /// mode appends it. Rectangle mode alternates: the first click stores a
    /// pending corner (replacing any previous rectangle), the second commits
    /// the four corners.
    ///
    /// Returns whether the point list changed; without an image nothing happens.
    pub fn add_point(&mut self, transform: &ViewTransform, view_click: DVec2) -> bool {
        let Some(point) = transform
            .to_image(view_click)
            .and_then(|p| transform.clamp_to_image(p))
        else {
            return false;
        };

        match self.mode {
            ShapeMode::Polygon => self.points.push(point),
            ShapeMode::Rectangle => match self.phase {
                RectanglePhase::AwaitingFirstCorner => {
                    self.points = vec![point];
                    self.phase = RectanglePhase::AwaitingSecondCorner;
                }
                RectanglePhase::AwaitingSecondCorner => {
                    let first = self.points.first().copied().unwrap_or(point);
                    self.points = rectangle_from_corners(first, point).to_vec();
                    self.phase = RectanglePhase::AwaitingFirstCorner;
                    debug!("rectangle committed from {first} to {point}");
                }
            },
        }
        true
    }

    /// Undo the last click.
    ///
    /// In rectangle mode a committed rectangle loses its three derived
    /// corners and the first pick becomes pending again. No-op when empty.
    pub fn remove_last_point(&mut self) -> bool {
        if self.points.is_empty() {
            return false;
        }

        match self.mode {
            ShapeMode::Polygon => {
                self.points.pop();
            }
            ShapeMode::Rectangle => {
                if self.points.len() == 4 {
                    self.points.truncate(1);
                    self.phase = RectanglePhase::AwaitingSecondCorner;
                } else {
                    self.clear();
                }
            }
        }
        true
    }

    /// Index of the first point within `radius` view pixels of `view_pos`.
    pub fn hit_test_point(
        &self,
        transform: &ViewTransform,
        view_pos: DVec2,
        radius: f64,
    ) -> Option<usize> {
        self.points.iter().position(|&p| {
            transform
                .to_view(p)
                .is_some_and(|v| v.distance(view_pos) <= radius)
        })
    }

    /// Whether `view_pos` falls inside the shape (needs at least 3 points).
    pub fn hit_test_shape(&self, transform: &ViewTransform, view_pos: DVec2) -> bool {
        if self.points.len() < 3 {
            return false;
        }
        transform
            .to_image(view_pos)
            .is_some_and(|p| polygon_contains(&self.points, p))
    }

    /// Move point `index` to a view position, clamped to the image.
    ///
    /// For a committed rectangle the opposite corner stays put and the other
    /// two corners follow, so the shape stays axis-aligned; dragging past the
    /// opposite corner simply flips it. The dragged point keeps its index.
    pub fn drag_point(&mut self, transform: &ViewTransform, index: usize, view_pos: DVec2) -> bool {
        if index >= self.points.len() {
            return false;
        }
        let Some(point) = transform
            .to_image(view_pos)
            .and_then(|p| transform.clamp_to_image(p))
        else {
            return false;
        };

        if self.mode == ShapeMode::Rectangle && self.points.len() == 4 {
            let opposite = self.points[index ^ 2];
            let corners = if index % 2 == 0 {
                let (p0, p2) = if index == 0 {
                    (point, opposite)
                } else {
                    (opposite, point)
                };
                rectangle_from_corners(p0, p2)
            } else {
                let (p1, p3) = if index == 1 {
                    (point, opposite)
                } else {
                    (opposite, point)
                };
                [
                    DVec2::new(p3.x, p1.y),
                    p1,
                    DVec2::new(p1.x, p3.y),
                    p3,
                ]
            };
            self.points.copy_from_slice(&corners);
        } else {
            self.points[index] = point;
        }
        true
    }

    /// Translate the whole shape by an image-space delta.
    ///
    /// The move is all-or-nothing: if any point would leave the image the
    /// step is rejected and `false` is returned.
    pub fn drag_shape(&mut self, transform: &ViewTransform, delta: DVec2) -> bool {
        if self.points.is_empty() || !delta.is_finite() {
            return false;
        }
        if !self
            .points
            .iter()
            .all(|&p| transform.contains_image_point(p + delta))
        {
            return false;
        }

        for point in &mut self.points {
            *point += delta;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 100x100 image shown 1:1 in a 100x100 viewport, so view == image.
    fn identity_transform() -> ViewTransform {
        let mut transform = ViewTransform::new(DVec2::new(100.0, 100.0));
        transform.load_image(DVec2::new(100.0, 100.0));
        transform
    }

    fn v(x: f64, y: f64) -> DVec2 {
        DVec2::new(x, y)
    }

    #[test]
    fn test_polygon_add_and_remove() {
        let t = identity_transform();
        let mut editor = ShapeEditor::new(ShapeMode::Polygon);
        assert!(editor.add_point(&t, v(10.0, 10.0)));
        assert!(editor.add_point(&t, v(150.0, -5.0)));
        assert_eq!(editor.points(), &[v(10.0, 10.0), v(99.0, 0.0)]);

        assert!(editor.remove_last_point());
        assert_eq!(editor.points(), &[v(10.0, 10.0)]);
    }

    #[test]
    fn test_add_point_without_image() {
        let t = ViewTransform::new(DVec2::new(100.0, 100.0));
        let mut editor = ShapeEditor::default();
        assert!(!editor.add_point(&t, v(10.0, 10.0)));
        assert!(editor.points().is_empty());
    }

    #[test]
    fn test_rectangle_two_clicks() {
        let t = identity_transform();
        let mut editor = ShapeEditor::new(ShapeMode::Rectangle);
        editor.add_point(&t, v(0.0, 0.0));
        assert_eq!(editor.rectangle_phase(), RectanglePhase::AwaitingSecondCorner);
        editor.add_point(&t, v(10.0, 20.0));

        assert_eq!(
            editor.points(),
            &[v(0.0, 0.0), v(10.0, 0.0), v(10.0, 20.0), v(0.0, 20.0)]
        );
        assert_eq!(editor.rectangle_phase(), RectanglePhase::AwaitingFirstCorner);
        assert_eq!(editor.rectangle_corners(), Some((v(0.0, 0.0), v(10.0, 20.0))));
    }

    #[test]
    fn test_rectangle_third_click_starts_over() {
        let t = identity_transform();
        let mut editor = ShapeEditor::new(ShapeMode::Rectangle);
        editor.add_point(&t, v(0.0, 0.0));
        editor.add_point(&t, v(10.0, 20.0));
        editor.add_point(&t, v(50.0, 50.0));
        assert_eq!(editor.points(), &[v(50.0, 50.0)]);
        assert_eq!(editor.rectangle_phase(), RectanglePhase::AwaitingSecondCorner);
    }

    #[test]
    fn test_rectangle_remove_last_point() {
        let t = identity_transform();
        let mut editor = ShapeEditor::new(ShapeMode::Rectangle);
        editor.add_point(&t, v(5.0, 5.0));
        editor.add_point(&t, v(10.0, 20.0));

        assert!(editor.remove_last_point());
        assert_eq!(editor.points(), &[v(5.0, 5.0)]);
        assert_eq!(editor.rectangle_phase(), RectanglePhase::AwaitingSecondCorner);

        assert!(editor.remove_last_point());
        assert!(editor.points().is_empty());
        assert_eq!(editor.rectangle_phase(), RectanglePhase::AwaitingFirstCorner);

        assert!(!editor.remove_last_point());
    }

    #[test]
    fn test_hit_test_point_first_wins() {
        let t = identity_transform();
        let mut editor = ShapeEditor::default();
        editor.set_points(vec![v(10.0, 10.0), v(12.0, 10.0), v(50.0, 50.0)]);

        assert_eq!(editor.hit_test_point(&t, v(11.0, 10.0), 8.0), Some(0));
        assert_eq!(editor.hit_test_point(&t, v(50.0, 58.0), 8.0), Some(2));
        assert_eq!(editor.hit_test_point(&t, v(30.0, 30.0), 8.0), None);
    }

    #[test]
    fn test_hit_test_shape() {
        let t = identity_transform();
        let mut editor = ShapeEditor::default();
        editor.set_points(vec![v(10.0, 10.0), v(50.0, 10.0)]);
        assert!(!editor.hit_test_shape(&t, v(30.0, 10.0)));

        editor.set_points(vec![v(10.0, 10.0), v(50.0, 10.0), v(50.0, 50.0), v(10.0, 50.0)]);
        assert!(editor.hit_test_shape(&t, v(30.0, 30.0)));
        assert!(!editor.hit_test_shape(&t, v(60.0, 30.0)));
    }

    #[test]
    fn test_polygon_contains_concave() {
        // U shape opening upwards
        let polygon = [
            v(0.0, 0.0),
            v(10.0, 0.0),
            v(10.0, 10.0),
            v(7.0, 10.0),
            v(7.0, 3.0),
            v(3.0, 3.0),
            v(3.0, 10.0),
            v(0.0, 10.0),
        ];
        assert!(polygon_contains(&polygon, v(1.0, 8.0)));
        assert!(!polygon_contains(&polygon, v(5.0, 8.0)));
        assert!(polygon_contains(&polygon, v(5.0, 1.0)));
    }

    #[test]
    fn test_drag_polygon_point() {
        let t = identity_transform();
        let mut editor = ShapeEditor::default();
        editor.set_points(vec![v(10.0, 10.0), v(50.0, 10.0), v(50.0, 50.0)]);

        assert!(editor.drag_point(&t, 1, v(60.0, 200.0)));
        assert_eq!(editor.points()[1], v(60.0, 99.0));
        assert!(!editor.drag_point(&t, 7, v(0.0, 0.0)));
    }

    #[test]
    fn test_drag_rectangle_corner_keeps_rectangle() {
        let t = identity_transform();
        let mut editor = ShapeEditor::new(ShapeMode::Rectangle);
        editor.add_point(&t, v(10.0, 10.0));
        editor.add_point(&t, v(40.0, 30.0));

        // Drag corner 1 (top-right) outward
        editor.drag_point(&t, 1, v(60.0, 5.0));
        assert_eq!(
            editor.points(),
            &[v(10.0, 5.0), v(60.0, 5.0), v(60.0, 30.0), v(10.0, 30.0)]
        );

        // Drag corner 2 past the opposite corner 0
        editor.drag_point(&t, 2, v(2.0, 1.0));
        assert_eq!(
            editor.points(),
            &[v(10.0, 5.0), v(2.0, 5.0), v(2.0, 1.0), v(10.0, 1.0)]
        );
    }

    #[test]
    fn test_drag_shape_all_or_nothing() {
        let t = identity_transform();
        let mut editor = ShapeEditor::default();
        editor.set_points(vec![v(10.0, 10.0), v(90.0, 10.0), v(90.0, 50.0)]);

        assert!(editor.drag_shape(&t, v(5.0, 5.0)));
        assert_eq!(editor.points(), &[v(15.0, 15.0), v(95.0, 15.0), v(95.0, 55.0)]);

        // One point would land at x = 105
        assert!(!editor.drag_shape(&t, v(10.0, 0.0)));
        assert_eq!(editor.points(), &[v(15.0, 15.0), v(95.0, 15.0), v(95.0, 55.0)]);
    }

    #[test]
    fn test_drag_rectangle_shape() {
        let t = identity_transform();
        let mut editor = ShapeEditor::new(ShapeMode::Rectangle);
        editor.add_point(&t, v(10.0, 10.0));
        editor.add_point(&t, v(40.0, 30.0));

        assert!(editor.drag_shape(&t, v(5.0, 5.0)));
        assert_eq!(editor.rectangle_corners(), Some((v(15.0, 15.0), v(45.0, 35.0))));
        assert_eq!(
            editor.points(),
            &[v(15.0, 15.0), v(45.0, 15.0), v(45.0, 35.0), v(15.0, 35.0)]
        );

        // Right edge would reach x = 105
        assert!(!editor.drag_shape(&t, v(60.0, 0.0)));
        assert_eq!(editor.rectangle_corners(), Some((v(15.0, 15.0), v(45.0, 35.0))));

        // Flush against the last pixel column is allowed
        assert!(editor.drag_shape(&t, v(54.0, 0.0)));
        assert_eq!(editor.rectangle_corners(), Some((v(69.0, 15.0), v(99.0, 35.0))));
    }

    #[test]
    fn test_set_points_rectangle_mode() {
        let mut editor = ShapeEditor::new(ShapeMode::Rectangle);
        assert!(editor.set_points(vec![v(0.0, 0.0), v(10.0, 20.0)]));
        assert_eq!(editor.points().len(), 4);
        assert!(!editor.set_points(vec![v(0.0, 0.0), v(1.0, 1.0), v(2.0, 2.0)]));
        assert_eq!(editor.points().len(), 4);
    }

    #[test]
    fn test_editor_serde_keeps_pending_corner() {
        let t = identity_transform();
        let mut editor = ShapeEditor::new(ShapeMode::Rectangle);
        editor.add_point(&t, v(12.0, 34.0));

        let json = serde_json::to_string(&editor).unwrap();
        let restored: ShapeEditor = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, editor);
        assert_eq!(restored.rectangle_phase(), RectanglePhase::AwaitingSecondCorner);
    }

    #[test]
    fn test_set_mode_clears() {
        let mut editor = ShapeEditor::default();
        editor.set_points(vec![v(1.0, 1.0), v(2.0, 2.0), v(3.0, 1.0)]);
        editor.set_mode(ShapeMode::Rectangle);
        assert!(editor.points().is_empty());
        assert_eq!(editor.mode(), ShapeMode::Rectangle);
    }
}
