//! Retained scene mirroring the document.
//!
//! [`SceneRenderer`] keeps one [`SceneObject`] per shape, the active tool
//! previews and the selection/hover highlights. It owns the camera, so it is
//! also where screen positions become world points and where picking happens.
//! A drawing backend walks [`SceneRenderer::draw_list`] each frame.

use crate::camera::Camera;
use crate::color::resolve_color;
use crate::hit::hit_test;
use kurbo::{BezPath, Point, Shape as KurboShape};
use peniko::Color;
use sketcher_core::{Preview, Renderer, Shape, ShapeId, ShapeKind};
use std::collections::HashMap;

/// Default pick tolerance in screen pixels.
pub const DEFAULT_PICK_TOLERANCE: f64 = 6.0;

/// Flattening tolerance for curved outlines.
const PATH_TOLERANCE: f64 = 0.1;

/// How a scene object should be emphasized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    None,
    Hovered,
    Selected,
}

/// The scene's copy of one shape.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub shape: Shape,
    pub paint: Color,
    /// Bumped whenever the object is recreated.
    pub revision: u64,
}

impl SceneObject {
    fn new(shape: &Shape) -> Self {
        Self {
            shape: shape.clone(),
            paint: resolve_color(shape.color()),
            revision: 0,
        }
    }

    /// Stroke outline in world coordinates.
    pub fn outline(&self) -> BezPath {
        shape_outline(&self.shape)
    }
}

/// One visible object ready to stroke.
#[derive(Debug, Clone)]
pub struct DrawItem {
    pub id: ShapeId,
    pub path: BezPath,
    pub paint: Color,
    pub highlight: Highlight,
}

fn shape_outline(shape: &Shape) -> BezPath {
    match shape {
        Shape::Line(line) => line.as_kurbo().to_path(PATH_TOLERANCE),
        Shape::Circle(circle) => circle.as_kurbo().to_path(PATH_TOLERANCE),
        Shape::Ellipse(ellipse) => ellipse.as_kurbo().to_path(PATH_TOLERANCE),
        Shape::Polyline(polyline) => polyline.to_path(),
    }
}

fn preview_outline(preview: &Preview) -> BezPath {
    match preview {
        Preview::Line { start, end } => kurbo::Line::new(*start, *end).to_path(PATH_TOLERANCE),
        Preview::Circle { center, radius } => {
            kurbo::Circle::new(*center, *radius).to_path(PATH_TOLERANCE)
        }
        Preview::Ellipse {
            center,
            radius_x,
            radius_y,
        } => kurbo::Ellipse::new(*center, (*radius_x, *radius_y), 0.0).to_path(PATH_TOLERANCE),
        Preview::Polyline { points } => {
            let mut path = BezPath::new();
            let mut iter = points.iter();
            if let Some(first) = iter.next() {
                path.move_to(*first);
                for p in iter {
                    path.line_to(*p);
                }
            }
            path
        }
    }
}

/// In-memory scene implementing [`Renderer`].
#[derive(Debug)]
pub struct SceneRenderer {
    pub camera: Camera,
    /// Pick tolerance in screen pixels.
    pub pick_tolerance: f64,
    objects: HashMap<ShapeId, SceneObject>,
    draw_order: Vec<ShapeId>,
    previews: HashMap<ShapeKind, Preview>,
    selection: Option<ShapeId>,
    hovered: Option<ShapeId>,
    frames: u64,
}

impl Default for SceneRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::with_camera(Camera::default())
    }

    pub fn with_camera(camera: Camera) -> Self {
        Self {
            camera,
            pick_tolerance: DEFAULT_PICK_TOLERANCE,
            objects: HashMap::new(),
            draw_order: Vec::new(),
            previews: HashMap::new(),
            selection: None,
            hovered: None,
            frames: 0,
        }
    }

    pub fn object(&self, id: ShapeId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    /// Objects in draw order (bottom to top).
    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.draw_order.iter().filter_map(|id| self.objects.get(id))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn preview(&self, kind: ShapeKind) -> Option<&Preview> {
        self.previews.get(&kind)
    }

    pub fn has_previews(&self) -> bool {
        !self.previews.is_empty()
    }

    pub fn selection(&self) -> Option<ShapeId> {
        self.selection
    }

    pub fn hovered(&self) -> Option<ShapeId> {
        self.hovered
    }

    /// Number of full rebuilds so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn highlight(&self, id: ShapeId) -> Highlight {
        if self.selection == Some(id) {
            Highlight::Selected
        } else if self.hovered == Some(id) {
            Highlight::Hovered
        } else {
            Highlight::None
        }
    }

    /// Visible objects in draw order, ready to stroke.
    pub fn draw_list(&self) -> Vec<DrawItem> {
        self.objects()
            .filter(|object| object.shape.is_visible())
            .map(|object| DrawItem {
                id: object.shape.id(),
                path: object.outline(),
                paint: object.paint,
                highlight: self.highlight(object.shape.id()),
            })
            .collect()
    }

    /// Outlines of the active previews.
    pub fn preview_paths(&self) -> Vec<BezPath> {
        ShapeKind::ALL
            .iter()
            .filter_map(|kind| self.previews.get(kind))
            .map(preview_outline)
            .collect()
    }

    fn replace_object(&mut self, shape: &Shape) {
        let id = shape.id();
        let revision = self.objects.get(&id).map_or(0, |o| o.revision + 1);
        if !self.objects.contains_key(&id) {
            self.draw_order.push(id);
        }
        let mut object = SceneObject::new(shape);
        object.revision = revision;
        self.objects.insert(id, object);
    }
}

impl Renderer for SceneRenderer {
    fn render(&mut self, shapes: &[&Shape]) {
        self.objects.clear();
        self.draw_order.clear();
        for shape in shapes {
            self.draw_order.push(shape.id());
            self.objects.insert(shape.id(), SceneObject::new(shape));
        }
        self.selection = self.selection.filter(|id| self.objects.contains_key(id));
        self.hovered = self.hovered.filter(|id| self.objects.contains_key(id));
        self.frames += 1;
        log::trace!("Scene rebuilt with {} objects", self.objects.len());
    }

    fn clear(&mut self) {
        self.objects.clear();
        self.draw_order.clear();
        self.previews.clear();
        self.selection = None;
        self.hovered = None;
    }

    fn remove_shape(&mut self, id: ShapeId) {
        if self.objects.remove(&id).is_some() {
            self.draw_order.retain(|existing| *existing != id);
        }
        if self.selection == Some(id) {
            self.selection = None;
        }
        if self.hovered == Some(id) {
            self.hovered = None;
        }
    }

    fn update_object(&mut self, shape: &Shape) {
        self.replace_object(shape);
    }

    fn update_transform(&mut self, shape: &Shape) {
        match self.objects.get_mut(&shape.id()) {
            Some(object) => object.shape = shape.clone(),
            None => self.replace_object(shape),
        }
    }

    fn update_material(&mut self, shape: &Shape) {
        if let Some(object) = self.objects.get_mut(&shape.id()) {
            object.shape.set_color(shape.color());
            object.paint = resolve_color(shape.color());
        }
    }

    fn update_visibility(&mut self, shape: &Shape) {
        let id = shape.id();
        if let Some(object) = self.objects.get_mut(&id) {
            object.shape.set_visible(shape.is_visible());
        }
        if !shape.is_visible() && self.hovered == Some(id) {
            self.hovered = None;
        }
    }

    fn update_selection(&mut self, id: Option<ShapeId>) {
        self.selection = id.filter(|id| self.objects.contains_key(id));
    }

    fn update_hover(&mut self, id: Option<ShapeId>) {
        self.hovered = id.filter(|id| self.objects.contains_key(id));
    }

    fn pick(&self, position: Point) -> Option<ShapeId> {
        let world = self.camera.screen_to_world(position);
        let tolerance = self.camera.screen_to_world_distance(self.pick_tolerance);
        self.draw_order
            .iter()
            .rev()
            .filter_map(|id| self.objects.get(id))
            .filter(|object| object.shape.is_visible())
            .find(|object| hit_test(&object.shape, world, tolerance))
            .map(|object| object.shape.id())
    }

    fn world_point(&self, position: Point) -> Point {
        self.camera.screen_to_world(position)
    }

    fn update_preview(&mut self, preview: Preview) {
        self.previews.insert(preview.kind(), preview);
    }

    fn clear_preview(&mut self, kind: ShapeKind) {
        self.previews.remove(&kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;
    use sketcher_core::{Circle, Line, Polyline};

    fn scene_with(shapes: &[Shape]) -> SceneRenderer {
        let mut scene = SceneRenderer::new();
        let refs: Vec<&Shape> = shapes.iter().collect();
        scene.render(&refs);
        scene
    }

    fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> Shape {
        Line::new(Point::new(x0, y0), Point::new(x1, y1)).into()
    }

    #[test]
    fn test_render_mirrors_shapes_in_order() {
        let shapes = vec![
            line(0.0, 0.0, 10.0, 0.0),
            Circle::new(Point::new(5.0, 5.0), 2.0).into(),
        ];
        let scene = scene_with(&shapes);

        let ids: Vec<ShapeId> = scene.objects().map(|o| o.shape.id()).collect();
        assert_eq!(ids, vec![shapes[0].id(), shapes[1].id()]);
        assert_eq!(scene.frames(), 1);
        assert_eq!(scene.draw_list().len(), 2);
    }

    #[test]
    fn test_pick_returns_topmost_visible_shape() {
        let shapes = vec![line(0.0, 0.0, 100.0, 0.0), line(0.0, 1.0, 100.0, 1.0)];
        let mut scene = scene_with(&shapes);

        assert_eq!(scene.pick(Point::new(50.0, 0.5)), Some(shapes[1].id()));

        let mut hidden = shapes[1].clone();
        hidden.set_visible(false);
        scene.update_visibility(&hidden);
        assert_eq!(scene.pick(Point::new(50.0, 0.5)), Some(shapes[0].id()));
        assert_eq!(scene.draw_list().len(), 1);
    }

    #[test]
    fn test_pick_miss() {
        let scene = scene_with(&[line(0.0, 0.0, 100.0, 0.0)]);
        assert_eq!(scene.pick(Point::new(50.0, 40.0)), None);
    }

    #[test]
    fn test_pick_uses_camera() {
        let shapes = vec![line(0.0, 0.0, 100.0, 0.0)];
        let mut scene = scene_with(&shapes);
        scene.camera.pan(Vec2::new(0.0, 200.0));

        assert_eq!(scene.pick(Point::new(50.0, 0.0)), None);
        assert_eq!(scene.pick(Point::new(50.0, 200.0)), Some(shapes[0].id()));
        assert_eq!(scene.world_point(Point::new(50.0, 200.0)), Point::new(50.0, 0.0));
    }

    #[test]
    fn test_selection_survives_rerender_only_if_shape_exists() {
        let shapes = vec![line(0.0, 0.0, 1.0, 1.0), line(2.0, 2.0, 3.0, 3.0)];
        let mut scene = scene_with(&shapes);
        scene.update_selection(Some(shapes[0].id()));
        scene.update_hover(Some(shapes[1].id()));

        scene.render(&[&shapes[0]]);
        assert_eq!(scene.selection(), Some(shapes[0].id()));
        assert_eq!(scene.hovered(), None);

        scene.render(&[]);
        assert_eq!(scene.selection(), None);
    }

    #[test]
    fn test_selection_ignores_unknown_ids() {
        let mut scene = scene_with(&[line(0.0, 0.0, 1.0, 1.0)]);
        let stranger = line(5.0, 5.0, 6.0, 6.0);
        scene.update_selection(Some(stranger.id()));
        assert_eq!(scene.selection(), None);
    }

    #[test]
    fn test_update_object_bumps_revision() {
        let mut shape = line(0.0, 0.0, 1.0, 1.0);
        let mut scene = scene_with(std::slice::from_ref(&shape));
        assert_eq!(scene.object(shape.id()).unwrap().revision, 0);

        if let Shape::Line(l) = &mut shape {
            l.end = Point::new(9.0, 9.0);
        }
        scene.update_object(&shape);
        let object = scene.object(shape.id()).unwrap();
        assert_eq!(object.revision, 1);
        assert_eq!(object.shape, shape);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_update_transform_and_material() {
        let mut shape = line(0.0, 0.0, 1.0, 1.0);
        let mut scene = scene_with(std::slice::from_ref(&shape));

        shape.translate(Vec2::new(10.0, 0.0));
        shape.set_color("#ff0000");
        scene.update_transform(&shape);
        scene.update_material(&shape);

        let object = scene.object(shape.id()).unwrap();
        assert_eq!(object.shape.bounds(), shape.bounds());
        assert_eq!(object.revision, 0);
        let rgba = object.paint.to_rgba8();
        assert_eq!((rgba.r, rgba.g, rgba.b), (255, 0, 0));
    }

    #[test]
    fn test_hiding_hovered_shape_clears_hover() {
        let shape = line(0.0, 0.0, 10.0, 0.0);
        let mut scene = scene_with(std::slice::from_ref(&shape));
        assert_eq!(scene.hover(Point::new(5.0, 1.0)), Some(shape.id()));

        let mut hidden = shape.clone();
        hidden.set_visible(false);
        scene.update_visibility(&hidden);
        assert_eq!(scene.hovered(), None);
    }

    #[test]
    fn test_remove_shape() {
        let shapes = vec![line(0.0, 0.0, 1.0, 1.0), line(2.0, 2.0, 3.0, 3.0)];
        let mut scene = scene_with(&shapes);
        scene.update_selection(Some(shapes[0].id()));

        scene.remove_shape(shapes[0].id());
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.selection(), None);
        assert!(scene.object(shapes[0].id()).is_none());
    }

    #[test]
    fn test_previews_per_tool_slot() {
        let mut scene = SceneRenderer::new();
        scene.update_preview(Preview::Circle {
            center: Point::ZERO,
            radius: 1.0,
        });
        scene.update_preview(Preview::Circle {
            center: Point::ZERO,
            radius: 2.0,
        });
        scene.update_preview(Preview::Polyline {
            points: vec![Point::ZERO, Point::new(1.0, 1.0)],
        });

        assert_eq!(
            scene.preview(ShapeKind::Circle),
            Some(&Preview::Circle {
                center: Point::ZERO,
                radius: 2.0
            })
        );
        assert_eq!(scene.preview_paths().len(), 2);

        scene.clear_preview(ShapeKind::Circle);
        assert!(scene.preview(ShapeKind::Circle).is_none());

        scene.clear();
        assert!(!scene.has_previews());
    }

    #[test]
    fn test_draw_list_highlights() {
        let shapes: Vec<Shape> = vec![
            line(0.0, 0.0, 1.0, 1.0),
            Polyline::new(vec![Point::ZERO, Point::new(5.0, 0.0)]).into(),
        ];
        let mut scene = scene_with(&shapes);
        scene.update_selection(Some(shapes[0].id()));
        scene.update_hover(Some(shapes[1].id()));

        let list = scene.draw_list();
        assert_eq!(list[0].highlight, Highlight::Selected);
        assert_eq!(list[1].highlight, Highlight::Hovered);
        assert!(!list[1].path.elements().is_empty());
    }
}
