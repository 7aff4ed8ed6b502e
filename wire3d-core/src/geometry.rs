/// Geometry primitives for wireframe objects
use nalgebra::{Point2, Point3};

/// RGB color with components in `[0, 1]`.
pub type Color = [f64; 3];

/// One polygon boundary of a 3D wireframe: an ordered point run.
/// Closed polygons repeat their first point last; curve traces stay
/// open.
pub type Face = Vec<Point3<f64>>;

/// The point data behind a scene object.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// 2D wireframe: a single ordered polyline.
    Flat(Vec<Point2<f64>>),
    /// 3D wireframe: ordered faces.
    Solid(Vec<Face>),
    /// A solid after parallel projection: per-face 2D outlines. Only
    /// produced by `project()` on render snapshots.
    Sheet(Vec<Vec<Point2<f64>>>),
}

impl Geometry {
    /// True when no drawable point remains (e.g. after clipping).
    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Flat(points) => points.is_empty(),
            Geometry::Solid(faces) => faces.iter().all(Vec::is_empty),
            Geometry::Sheet(faces) => faces.iter().all(Vec::is_empty),
        }
    }

    /// Coordinate-wise average of the deduplicated point set, so that
    /// the closure vertex repeated at the end of a polygon does not
    /// bias the centroid. Flat and projected geometry report z = 0.
    pub fn center(&self) -> Point3<f64> {
        let mut seen = std::collections::HashSet::new();
        let mut sum = [0.0f64; 3];
        let mut count = 0usize;

        let mut tally = |x: f64, y: f64, z: f64| {
            if seen.insert((x.to_bits(), y.to_bits(), z.to_bits())) {
                sum[0] += x;
                sum[1] += y;
                sum[2] += z;
                count += 1;
            }
        };

        match self {
            Geometry::Flat(points) => {
                for p in points {
                    tally(p.x, p.y, 0.0);
                }
            }
            Geometry::Solid(faces) => {
                for p in faces.iter().flatten() {
                    tally(p.x, p.y, p.z);
                }
            }
            Geometry::Sheet(faces) => {
                for p in faces.iter().flatten() {
                    tally(p.x, p.y, 0.0);
                }
            }
        }

        if count == 0 {
            return Point3::origin();
        }
        let n = count as f64;
        Point3::new(sum[0] / n, sum[1] / n, sum[2] / n)
    }

    /// The 2D polylines to draw, one per face. Unprojected solids have
    /// no 2D footprint yet and yield nothing.
    pub fn polylines(&self) -> Vec<Vec<Point2<f64>>> {
        match self {
            Geometry::Flat(points) => vec![points.clone()],
            Geometry::Sheet(faces) => faces.clone(),
            Geometry::Solid(_) => Vec::new(),
        }
    }

    /// Create a simple cube wireframe for testing: six closed quad
    /// faces centered on the origin.
    pub fn cube(size: f64) -> Self {
        let h = size / 2.0;
        let quad = |a: [f64; 3], b: [f64; 3], c: [f64; 3], d: [f64; 3]| -> Face {
            vec![
                Point3::new(a[0], a[1], a[2]),
                Point3::new(b[0], b[1], b[2]),
                Point3::new(c[0], c[1], c[2]),
                Point3::new(d[0], d[1], d[2]),
                Point3::new(a[0], a[1], a[2]),
            ]
        };

        Geometry::Solid(vec![
            // Front and back
            quad([-h, -h, h], [h, -h, h], [h, h, h], [-h, h, h]),
            quad([-h, -h, -h], [-h, h, -h], [h, h, -h], [h, -h, -h]),
            // Top and bottom
            quad([-h, h, -h], [-h, h, h], [h, h, h], [h, h, -h]),
            quad([-h, -h, -h], [h, -h, -h], [h, -h, h], [-h, -h, h]),
            // Right and left
            quad([h, -h, -h], [h, h, -h], [h, h, h], [h, -h, h]),
            quad([-h, -h, -h], [-h, -h, h], [-h, h, h], [-h, h, -h]),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_ignores_repeated_closure_point() {
        let square = Geometry::Flat(vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
            Point2::new(0.0, 0.0),
        ]);
        let center = square.center();
        assert!((center.x - 5.0).abs() < 1e-9);
        assert!((center.y - 5.0).abs() < 1e-9);
        assert_eq!(center.z, 0.0);
    }

    #[test]
    fn test_cube_center_is_origin() {
        let cube = Geometry::cube(10.0);
        let center = cube.center();
        assert!(center.coords.norm() < 1e-9);
    }

    #[test]
    fn test_cube_faces_are_closed() {
        if let Geometry::Solid(faces) = Geometry::cube(4.0) {
            assert_eq!(faces.len(), 6);
            for face in faces {
                assert_eq!(face.len(), 5);
                assert_eq!(face.first(), face.last());
            }
        } else {
            panic!("cube should be solid geometry");
        }
    }

    #[test]
    fn test_empty_geometry() {
        assert!(Geometry::Flat(Vec::new()).is_empty());
        assert!(Geometry::Sheet(vec![Vec::new()]).is_empty());
        assert!(!Geometry::cube(1.0).is_empty());
    }
}
