/// Homogeneous transform composition and rotation state
use nalgebra::{
    Matrix2, Matrix3, Matrix4, Point2, Point3, Rotation2, Rotation3, Translation2, Translation3,
    Vector2, Vector3,
};

/// Accumulated rotation around three axes (in radians).
///
/// The window keeps one of these so that later moves can be expressed
/// relative to its current facing rather than the world axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationState {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }

    pub fn angles(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// 2D rotation as a plain linear matrix.
pub fn rotation2(angle: f64) -> Matrix2<f64> {
    Rotation2::new(angle).into_inner()
}

/// 3D rotation composed from elementary rotations about X, then Y,
/// then Z. The application order is fixed; composite rotations depend
/// on it.
pub fn rotation3(x: f64, y: f64, z: f64) -> Matrix3<f64> {
    // from_euler_angles builds Rz * Ry * Rx, i.e. X applied first
    Rotation3::from_euler_angles(x, y, z).into_inner()
}

/// Compose a pivot-relative 2D transform into one homogeneous matrix:
/// translate the pivot to the origin, apply `linear` plus
/// `translation`, translate back.
pub fn compose2(
    linear: &Matrix2<f64>,
    translation: &Vector2<f64>,
    pivot: &Point2<f64>,
) -> Matrix3<f64> {
    let mut op = Matrix3::identity();
    op.fixed_view_mut::<2, 2>(0, 0).copy_from(linear);
    op.fixed_view_mut::<2, 1>(0, 2).copy_from(translation);

    Translation2::new(pivot.x, pivot.y).to_homogeneous()
        * op
        * Translation2::new(-pivot.x, -pivot.y).to_homogeneous()
}

/// 3D counterpart of [`compose2`].
pub fn compose3(
    linear: &Matrix3<f64>,
    translation: &Vector3<f64>,
    pivot: &Point3<f64>,
) -> Matrix4<f64> {
    let mut op = Matrix4::identity();
    op.fixed_view_mut::<3, 3>(0, 0).copy_from(linear);
    op.fixed_view_mut::<3, 1>(0, 3).copy_from(translation);

    Translation3::new(pivot.x, pivot.y, pivot.z).to_homogeneous()
        * op
        * Translation3::new(-pivot.x, -pivot.y, -pivot.z).to_homogeneous()
}

/// Apply a homogeneous 2D transform to every point in place.
pub fn apply2(matrix: &Matrix3<f64>, points: &mut [Point2<f64>]) {
    for point in points.iter_mut() {
        *point = matrix.transform_point(point);
    }
}

/// Apply a homogeneous 3D transform to every point in place.
pub fn apply3(matrix: &Matrix4<f64>, points: &mut [Point3<f64>]) {
    for point in points.iter_mut() {
        *point = matrix.transform_point(point);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_state() {
        let mut state = RotationState::zero();
        assert_eq!(state.x, 0.0);
        assert_eq!(state.y, 0.0);
        assert_eq!(state.z, 0.0);

        state.rotate(0.1, 0.2, 0.3);
        assert!((state.x - 0.1).abs() < 1e-6);
        assert!((state.y - 0.2).abs() < 1e-6);
        assert!((state.z - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_identity_composition() {
        let pivot = Point2::new(7.0, -3.0);
        let matrix = compose2(&Matrix2::identity(), &Vector2::zeros(), &pivot);
        assert!((matrix - Matrix3::identity()).norm() < 1e-9);
    }

    #[test]
    fn test_scale_about_pivot_keeps_pivot_fixed() {
        let pivot = Point2::new(10.0, 20.0);
        let matrix = compose2(&(Matrix2::identity() * 3.0), &Vector2::zeros(), &pivot);
        let moved = matrix.transform_point(&pivot);
        assert!((moved - pivot).norm() < 1e-9);

        let other = matrix.transform_point(&Point2::new(11.0, 20.0));
        assert!((other - Point2::new(13.0, 20.0)).norm() < 1e-9);
    }

    #[test]
    fn test_rotation3_axis_order() {
        // Rotating a unit X vector by 90 degrees about Z only.
        let m = rotation3(0.0, 0.0, std::f64::consts::FRAC_PI_2);
        let v = m * Vector3::new(1.0, 0.0, 0.0);
        assert!((v - Vector3::new(0.0, 1.0, 0.0)).norm() < 1e-9);
    }

    #[test]
    fn test_rotation3_matches_manual_composition() {
        let (x, y, z) = (0.3, -0.7, 1.1);
        let composed = rotation3(x, y, z);
        let manual = Rotation3::from_axis_angle(&Vector3::z_axis(), z).into_inner()
            * Rotation3::from_axis_angle(&Vector3::y_axis(), y).into_inner()
            * Rotation3::from_axis_angle(&Vector3::x_axis(), x).into_inner();
        assert!((composed - manual).norm() < 1e-9);
    }
}
