/// Scene objects: wireframes, generated curves and the window
use log::warn;
use nalgebra::{Matrix2, Matrix3, Point2, Point3, Vector2, Vector3};

use crate::clip::{clip_polyline, WindowRect};
use crate::curve;
use crate::error::{EngineError, EngineResult};
use crate::geometry::{Color, Face, Geometry};
use crate::transform::{apply2, apply3, compose2, compose3, rotation2, rotation3, RotationState};
use crate::wavefront;

/// Reserved name of the world's window object.
pub const WINDOW_NAME: &str = "window";

/// Smallest width/height (window units) a zoom may leave the window with.
pub const MIN_WINDOW_SIZE: f64 = 10.0;

/// Fraction added to each window axis when mapping to the viewport, so
/// the viewport always shows a margin around the nominal window.
const WINDOW_BORDER: f64 = 0.05;

/// How an object behaves under transforms and clipping. Plain
/// wireframes and curves share everything; the window overrides zoom,
/// move and rotate policy and is never clipped.
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    Wireframe,
    Curve,
    Window(RotationState),
}

/// A wireframe entity: ordered points (2D) or ordered faces (3D),
/// drawn as connected lines in the object's color.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    name: String,
    color: Color,
    geometry: Geometry,
    kind: Kind,
}

impl Object {
    /// 2D wireframe from an explicit point list.
    pub fn new(name: impl Into<String>, color: Color, points: Vec<Point2<f64>>) -> Self {
        Self {
            name: name.into(),
            color,
            geometry: Geometry::Flat(points),
            kind: Kind::Wireframe,
        }
    }

    /// 3D wireframe from explicit faces.
    pub fn with_faces(name: impl Into<String>, color: Color, faces: Vec<Face>) -> Self {
        Self {
            name: name.into(),
            color,
            geometry: Geometry::Solid(faces),
            kind: Kind::Wireframe,
        }
    }

    /// Cube wireframe, handy for demos and tests.
    pub fn cube(name: impl Into<String>, color: Color, size: f64) -> Self {
        Self {
            name: name.into(),
            color,
            geometry: Geometry::cube(size),
            kind: Kind::Wireframe,
        }
    }

    /// Cubic Bezier curve from exactly four control points. The final
    /// control point is appended once more after the samples so the
    /// trace has a defined last edge for clipping.
    pub fn bezier_curve(
        name: impl Into<String>,
        color: Color,
        control: &[Point3<f64>],
    ) -> EngineResult<Self> {
        let mut trace = curve::bezier(control)?;
        trace.push(control[control.len() - 1]);
        Ok(Self {
            name: name.into(),
            color,
            geometry: Geometry::Solid(vec![trace]),
            kind: Kind::Curve,
        })
    }

    /// Uniform cubic B-spline from four or more control points.
    pub fn bspline_curve(
        name: impl Into<String>,
        color: Color,
        control: &[Point3<f64>],
    ) -> EngineResult<Self> {
        let trace = curve::bspline(control)?;
        Ok(Self {
            name: name.into(),
            color,
            geometry: Geometry::Solid(vec![trace]),
            kind: Kind::Curve,
        })
    }

    /// Build an object from wavefront-style `v`/`f` text. Files with
    /// faces become 3D wireframes; vertex-only files become a flat
    /// polyline.
    pub fn from_wavefront(
        name: impl Into<String>,
        color: Color,
        text: &str,
    ) -> EngineResult<Self> {
        Ok(Self {
            name: name.into(),
            color,
            geometry: wavefront::parse(text)?,
            kind: Kind::Wireframe,
        })
    }

    /// The window: a closed axis-aligned quad centered on the origin,
    /// carrying its own accumulated rotation.
    pub fn window(width: f64, height: f64) -> Self {
        let (w, h) = (width / 2.0, height / 2.0);
        let face = vec![
            Point3::new(-w, h, 0.0),
            Point3::new(w, h, 0.0),
            Point3::new(w, -h, 0.0),
            Point3::new(-w, -h, 0.0),
            Point3::new(-w, h, 0.0),
        ];
        Self {
            name: WINDOW_NAME.to_string(),
            color: [0.0, 0.0, 0.0],
            geometry: Geometry::Solid(vec![face]),
            kind: Kind::Window(RotationState::zero()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn is_window(&self) -> bool {
        matches!(self.kind, Kind::Window(_))
    }

    /// The window's accumulated rotation; zero for other objects.
    pub fn window_rotation(&self) -> RotationState {
        match self.kind {
            Kind::Window(state) => state,
            _ => RotationState::zero(),
        }
    }

    /// Center of the object, recomputed from the current point set.
    pub fn center(&self) -> Point3<f64> {
        self.geometry.center()
    }

    /// Translate every point by `offset`. For the window the offset is
    /// first rotated by its accumulated angles, so "forward" follows
    /// the direction the window currently faces.
    pub fn move_by(&mut self, offset: Vector3<f64>) {
        let offset = match &self.kind {
            Kind::Window(state) => rotation3(state.x, state.y, state.z) * offset,
            _ => offset,
        };
        match &mut self.geometry {
            Geometry::Flat(points) => {
                for p in points.iter_mut() {
                    p.x += offset.x;
                    p.y += offset.y;
                }
            }
            Geometry::Solid(faces) => {
                for p in faces.iter_mut().flatten() {
                    *p += offset;
                }
            }
            Geometry::Sheet(faces) => {
                for p in faces.iter_mut().flatten() {
                    p.x += offset.x;
                    p.y += offset.y;
                }
            }
        }
    }

    /// Scale about the object's own center.
    ///
    /// Plain objects scale by `factor` directly. The window applies the
    /// inverse factor (zooming in shrinks its world footprint) and
    /// rolls back if either side would drop below [`MIN_WINDOW_SIZE`].
    pub fn zoom(&mut self, factor: f64) -> EngineResult<()> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(EngineError::invalid_argument(format!(
                "zoom factor must be positive, got {factor}"
            )));
        }

        match self.kind {
            Kind::Window(_) => {
                let candidate = self.scaled(factor.recip());
                let (width, height) = window_size(&candidate);
                if width < MIN_WINDOW_SIZE || height < MIN_WINDOW_SIZE {
                    warn!(
                        "window zoom to {width:.2}x{height:.2} rejected, \
                         minimum is {MIN_WINDOW_SIZE}"
                    );
                    return Err(EngineError::ZoomLimitExceeded);
                }
                self.geometry = candidate;
            }
            _ => {
                self.geometry = self.scaled(factor);
            }
        }
        Ok(())
    }

    /// Rotate by `angles` (radians) about `pivot`, defaulting to the
    /// object's center recomputed at call time. Flat geometry rotates
    /// in-plane by `angles.z`; solids compose X, then Y, then Z. The
    /// window also accumulates the angles into its rotation state.
    pub fn rotate(&mut self, angles: Vector3<f64>, pivot: Option<Point3<f64>>) {
        let pivot = pivot.unwrap_or_else(|| self.center());
        match &mut self.geometry {
            Geometry::Flat(points) => {
                let m = compose2(&rotation2(angles.z), &Vector2::zeros(), &pivot.xy());
                apply2(&m, points);
            }
            Geometry::Sheet(faces) => {
                let m = compose2(&rotation2(angles.z), &Vector2::zeros(), &pivot.xy());
                for face in faces.iter_mut() {
                    apply2(&m, face);
                }
            }
            Geometry::Solid(faces) => {
                let m = compose3(
                    &rotation3(angles.x, angles.y, angles.z),
                    &Vector3::zeros(),
                    &pivot,
                );
                for face in faces.iter_mut() {
                    apply3(&m, face);
                }
            }
        }
        if let Kind::Window(state) = &mut self.kind {
            state.rotate(angles.x, angles.y, angles.z);
        }
    }

    /// Parallel projection: drop the z coordinate of every face. The
    /// object is 2D from this point on; callers that need the solid to
    /// persist must project a copy.
    pub fn project(&mut self) {
        if let Geometry::Solid(faces) = &self.geometry {
            let projected = faces
                .iter()
                .map(|face| face.iter().map(|p| p.xy()).collect())
                .collect();
            self.geometry = Geometry::Sheet(projected);
        }
    }

    /// Clip against the window rectangle. Flat geometry clips its
    /// point run; projected solids clip per face, dropping faces that
    /// clip away entirely. The window itself is never clipped.
    pub fn clip(&mut self, rect: &WindowRect) {
        if self.is_window() {
            return;
        }
        match &mut self.geometry {
            Geometry::Flat(points) => {
                *points = clip_polyline(points, rect);
            }
            Geometry::Sheet(faces) => {
                *faces = faces
                    .iter()
                    .map(|face| clip_polyline(face, rect))
                    .filter(|face| !face.is_empty())
                    .collect();
            }
            // Solids are projected before clipping.
            Geometry::Solid(_) => {}
        }
    }

    /// The exact clip rectangle: the window's unexpanded bottom-left
    /// and top-right corners in its local frame.
    pub fn real_boundaries(&self) -> Option<WindowRect> {
        if !self.is_window() {
            return None;
        }
        let center = self.center();
        let (width, height) = window_size(&self.geometry);
        Some(WindowRect::new(
            Point2::new(center.x - width / 2.0, center.y - height / 2.0),
            Point2::new(center.x + width / 2.0, center.y + height / 2.0),
        ))
    }

    /// The clip rectangle inflated by the border fraction on each
    /// axis, used for the viewport mapping.
    pub fn expanded_boundaries(&self) -> Option<WindowRect> {
        let rect = self.real_boundaries()?;
        let dx = (rect.max.x - rect.min.x) * WINDOW_BORDER;
        let dy = (rect.max.y - rect.min.y) * WINDOW_BORDER;
        Some(WindowRect::new(
            Point2::new(rect.min.x - dx, rect.min.y - dy),
            Point2::new(rect.max.x + dx, rect.max.y + dy),
        ))
    }

    /// Rebuild the geometry scaled about the object's center. The
    /// original buffer is untouched until the caller commits.
    fn scaled(&self, factor: f64) -> Geometry {
        let center = self.center();
        match &self.geometry {
            Geometry::Flat(points) => {
                let m = compose2(
                    &(Matrix2::identity() * factor),
                    &Vector2::zeros(),
                    &center.xy(),
                );
                let mut points = points.clone();
                apply2(&m, &mut points);
                Geometry::Flat(points)
            }
            Geometry::Sheet(faces) => {
                let m = compose2(
                    &(Matrix2::identity() * factor),
                    &Vector2::zeros(),
                    &center.xy(),
                );
                let mut faces = faces.clone();
                for face in faces.iter_mut() {
                    apply2(&m, face);
                }
                Geometry::Sheet(faces)
            }
            Geometry::Solid(faces) => {
                let m = compose3(&(Matrix3::identity() * factor), &Vector3::zeros(), &center);
                let mut faces = faces.clone();
                for face in faces.iter_mut() {
                    apply3(&m, face);
                }
                Geometry::Solid(faces)
            }
        }
    }
}

/// Width and height of the window quad measured along its own sides,
/// so the result does not change when the window is rotated.
fn window_size(geometry: &Geometry) -> (f64, f64) {
    if let Geometry::Solid(faces) = geometry {
        if let Some(face) = faces.first() {
            if face.len() >= 3 {
                let width = (face[1] - face[0]).norm();
                let height = (face[2] - face[1]).norm();
                return (width, height);
            }
        }
    }
    (0.0, 0.0)
}
