/// The world: owner of every scene object and of the per-frame
/// viewport transform
use log::debug;
use nalgebra::Point2;

use crate::error::{EngineError, EngineResult};
use crate::geometry::Color;
use crate::object::Object;

/// Polylines-with-color snapshot handed to the rendering layer, in
/// world insertion order.
pub type RenderList = Vec<(Vec<Vec<Point2<f64>>>, Color)>;

/// Insertion-ordered collection of named objects. Always holds the
/// window, created from the requested initial size, as its first
/// entry. Objects are owned exclusively by the world and live as long
/// as it does; callers keep names, not references.
#[derive(Debug, Clone)]
pub struct World {
    objects: Vec<Object>,
    created: usize,
}

impl World {
    /// Create a world whose window starts with the given size. The
    /// window counts as the first successful add.
    pub fn new(window_width: f64, window_height: f64) -> Self {
        Self {
            objects: vec![Object::window(window_width, window_height)],
            created: 1,
        }
    }

    /// Default name for the next object. Counts every successful add,
    /// window included, and is never reused.
    pub fn next_name(&self) -> String {
        format!("object{}", self.created)
    }

    /// Add an object, rejecting duplicate names (including the
    /// reserved window name). The world is unchanged on failure.
    pub fn add_object(&mut self, object: Object) -> EngineResult<()> {
        if self.objects.iter().any(|o| o.name() == object.name()) {
            return Err(EngineError::NameCollision(object.name().to_string()));
        }
        debug!("adding object {:?}", object.name());
        self.objects.push(object);
        self.created += 1;
        Ok(())
    }

    /// Look up an object by name.
    pub fn get(&self, name: &str) -> EngineResult<&Object> {
        self.objects
            .iter()
            .find(|o| o.name() == name)
            .ok_or_else(|| EngineError::NotFound(name.to_string()))
    }

    /// Look up an object by name for mutation.
    pub fn get_mut(&mut self, name: &str) -> EngineResult<&mut Object> {
        self.objects
            .iter_mut()
            .find(|o| o.name() == name)
            .ok_or_else(|| EngineError::NotFound(name.to_string()))
    }

    /// All objects in insertion order.
    pub fn objects(&self) -> impl Iterator<Item = &Object> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Produce the per-frame render list for a viewport of the given
    /// pixel size.
    ///
    /// Works on a deep copy of every object, so the persistent world
    /// is never observed in a partially transformed state: the scene
    /// is counter-rotated into the window's reference frame, projected
    /// to 2D, clipped against the window's exact boundaries and mapped
    /// from the expanded boundaries onto the viewport with the y axis
    /// flipped. The window itself and objects that clip away entirely
    /// are not drawn.
    pub fn viewport_transform(&self, viewport_width: f64, viewport_height: f64) -> RenderList {
        let mut snapshot = self.objects.clone();

        let Some(window) = snapshot.iter().find(|o| o.is_window()) else {
            return RenderList::new();
        };
        let (Some(real), Some(expanded)) =
            (window.real_boundaries(), window.expanded_boundaries())
        else {
            return RenderList::new();
        };
        let window_center = window.center();
        let window_angles = window.window_rotation().angles();

        for object in snapshot.iter_mut() {
            if object.is_window() {
                continue;
            }
            // Rotating the scene the opposite way simulates the window
            // rotation while keeping the drawing axis-aligned.
            object.rotate(-window_angles, Some(window_center));
            object.project();
            object.clip(&real);
        }

        let span_x = expanded.max.x - expanded.min.x;
        let span_y = expanded.max.y - expanded.min.y;

        let mut rendered = RenderList::new();
        for object in &snapshot {
            if object.is_window() || object.geometry().is_empty() {
                continue;
            }
            let polylines = object
                .geometry()
                .polylines()
                .into_iter()
                .filter(|line| !line.is_empty())
                .map(|line| {
                    line.into_iter()
                        .map(|p| {
                            Point2::new(
                                (p.x - expanded.min.x) / span_x * viewport_width,
                                (1.0 - (p.y - expanded.min.y) / span_y) * viewport_height,
                            )
                        })
                        .collect()
                })
                .collect();
            rendered.push((polylines, object.color()));
        }
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point2, Vector3};

    fn triangle(name: &str) -> Object {
        Object::new(
            name,
            [0.0, 1.0, 0.0],
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(20.0, 0.0),
                Point2::new(0.0, 20.0),
                Point2::new(0.0, 0.0),
            ],
        )
    }

    #[test]
    fn test_world_starts_with_window() {
        let world = World::new(100.0, 100.0);
        assert_eq!(world.len(), 1);
        assert!(world.get("window").unwrap().is_window());
    }

    #[test]
    fn test_default_names_count_successful_adds() {
        let mut world = World::new(100.0, 100.0);
        assert_eq!(world.next_name(), "object1");
        world.add_object(triangle("object1")).unwrap();
        assert_eq!(world.next_name(), "object2");

        // Failed adds do not advance the counter.
        assert!(world.add_object(triangle("object1")).is_err());
        assert_eq!(world.next_name(), "object2");
    }

    #[test]
    fn test_name_collision_leaves_world_unchanged() {
        let mut world = World::new(100.0, 100.0);
        world.add_object(triangle("a")).unwrap();
        let before = world.len();
        assert_eq!(
            world.add_object(triangle("a")),
            Err(EngineError::NameCollision("a".to_string()))
        );
        assert_eq!(world.len(), before);

        assert!(matches!(
            world.add_object(Object::window(10.0, 10.0)),
            Err(EngineError::NameCollision(_))
        ));
    }

    #[test]
    fn test_get_unknown_name() {
        let world = World::new(100.0, 100.0);
        assert_eq!(
            world.get("ghost").err(),
            Some(EngineError::NotFound("ghost".to_string()))
        );
    }

    #[test]
    fn test_viewport_transform_does_not_mutate_world() {
        let mut world = World::new(100.0, 100.0);
        world.add_object(triangle("t")).unwrap();
        let before = world.get("t").unwrap().clone();
        let _ = world.viewport_transform(500.0, 500.0);
        assert_eq!(world.get("t").unwrap(), &before);
    }

    #[test]
    fn test_viewport_transform_skips_window_and_clipped_objects() {
        let mut world = World::new(100.0, 100.0);
        world.add_object(triangle("visible")).unwrap();
        world
            .add_object(Object::new(
                "far away",
                [0.0, 0.0, 1.0],
                vec![Point2::new(1000.0, 1000.0), Point2::new(1100.0, 1000.0)],
            ))
            .unwrap();

        let rendered = world.viewport_transform(500.0, 500.0);
        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].1, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_viewport_mapping_flips_y() {
        let mut world = World::new(100.0, 100.0);
        world
            .add_object(Object::new(
                "marker",
                [0.0, 0.0, 0.0],
                vec![Point2::new(0.0, 40.0), Point2::new(0.0, -40.0)],
            ))
            .unwrap();

        let rendered = world.viewport_transform(500.0, 500.0);
        let line = &rendered[0].0[0];
        // World-up maps to smaller pixel rows.
        assert!(line[0].y < line[1].y);
        // The window center lands in the middle of the viewport.
        assert!((line[0].x - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_viewport_margin_keeps_window_content_inset() {
        let mut world = World::new(100.0, 100.0);
        world
            .add_object(Object::new(
                "edge",
                [0.0, 0.0, 0.0],
                vec![Point2::new(-50.0, 0.0), Point2::new(50.0, 0.0)],
            ))
            .unwrap();

        let rendered = world.viewport_transform(500.0, 500.0);
        let line = &rendered[0].0[0];
        // Clip boundary is inset by the 5% border on each side.
        for p in line {
            assert!(p.x > 0.0 && p.x < 500.0);
        }
    }

    #[test]
    fn test_counter_rotation_tracks_window_facing() {
        let mut world = World::new(100.0, 100.0);
        world
            .add_object(Object::new(
                "dot",
                [0.0, 0.0, 0.0],
                vec![Point2::new(30.0, 0.0), Point2::new(30.0, 0.0)],
            ))
            .unwrap();

        // Rotate the window a quarter turn; the scene must appear
        // rotated the opposite way.
        world
            .get_mut("window")
            .unwrap()
            .rotate(Vector3::new(0.0, 0.0, std::f64::consts::FRAC_PI_2), None);

        let rendered = world.viewport_transform(500.0, 500.0);
        let p = rendered[0].0[0][0];
        // World point (30, 0) counter-rotates to (0, -30): below the
        // center, which after the y flip is a larger pixel row.
        assert!((p.x - 250.0).abs() < 1e-6);
        assert!(p.y > 250.0);
    }
}
