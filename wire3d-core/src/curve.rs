/// Curve generators: cubic Bezier and uniform cubic B-spline
use nalgebra::{Matrix4, Point3, Vector4};

use crate::error::{EngineError, EngineResult};

/// Samples per curve segment: t = 0 to 1 inclusive in steps of 1/50.
const SEGMENT_STEPS: usize = 50;

#[rustfmt::skip]
fn bezier_basis() -> Matrix4<f64> {
    Matrix4::new(
        -1.0,  3.0, -3.0, 1.0,
         3.0, -6.0,  3.0, 0.0,
        -3.0,  3.0,  0.0, 0.0,
         1.0,  0.0,  0.0, 0.0,
    )
}

#[rustfmt::skip]
fn bspline_basis() -> Matrix4<f64> {
    Matrix4::new(
        -1.0,  3.0, -3.0, 1.0,
         3.0, -6.0,  3.0, 0.0,
        -3.0,  0.0,  3.0, 0.0,
         1.0,  4.0,  1.0, 0.0,
    ) / 6.0
}

fn axis_coefficients(
    basis: &Matrix4<f64>,
    control: &[Point3<f64>],
    axis: usize,
) -> Vector4<f64> {
    basis
        * Vector4::new(
            control[0][axis],
            control[1][axis],
            control[2][axis],
            control[3][axis],
        )
}

/// Sample a cubic Bezier curve defined by exactly four control points.
///
/// Returns 51 points for t = 0, 0.02, ..., 1.0; the first and last
/// samples coincide with the first and last control points.
pub fn bezier(control: &[Point3<f64>]) -> EngineResult<Vec<Point3<f64>>> {
    if control.len() != 4 {
        return Err(EngineError::invalid_argument(format!(
            "bezier curves take exactly 4 control points, got {}",
            control.len()
        )));
    }

    let basis = bezier_basis();
    let coefficients: Vec<Vector4<f64>> = (0..3)
        .map(|axis| axis_coefficients(&basis, control, axis))
        .collect();

    let mut points = Vec::with_capacity(SEGMENT_STEPS + 1);
    for i in 0..=SEGMENT_STEPS {
        let t = i as f64 / SEGMENT_STEPS as f64;
        let powers = Vector4::new(t * t * t, t * t, t, 1.0);
        points.push(Point3::new(
            powers.dot(&coefficients[0]),
            powers.dot(&coefficients[1]),
            powers.dot(&coefficients[2]),
        ));
    }
    Ok(points)
}

/// Forward-difference stepper for one cubic polynomial axis: after the
/// initial evaluation each further sample costs three additions.
struct ForwardDiff {
    value: f64,
    d1: f64,
    d2: f64,
    d3: f64,
}

impl ForwardDiff {
    fn new(c: &Vector4<f64>, h: f64) -> Self {
        let (a, b, cc, d) = (c[0], c[1], c[2], c[3]);
        let h2 = h * h;
        let h3 = h2 * h;
        Self {
            value: d,
            d1: a * h3 + b * h2 + cc * h,
            d2: 6.0 * a * h3 + 2.0 * b * h2,
            d3: 6.0 * a * h3,
        }
    }

    fn step(&mut self) -> f64 {
        self.value += self.d1;
        self.d1 += self.d2;
        self.d2 += self.d3;
        self.value
    }
}

/// Sample a uniform cubic B-spline over a sliding window of four
/// control points at a time.
///
/// Each window yields one segment of 51 forward-difference samples;
/// segments are concatenated as generated, so the shared boundary
/// point between consecutive segments appears twice.
pub fn bspline(control: &[Point3<f64>]) -> EngineResult<Vec<Point3<f64>>> {
    if control.len() < 4 {
        return Err(EngineError::invalid_argument(format!(
            "b-spline curves take at least 4 control points, got {}",
            control.len()
        )));
    }

    let basis = bspline_basis();
    let h = 1.0 / SEGMENT_STEPS as f64;
    let mut points = Vec::with_capacity((control.len() - 3) * (SEGMENT_STEPS + 1));

    for window in control.windows(4) {
        let mut steppers: Vec<ForwardDiff> = (0..3)
            .map(|axis| ForwardDiff::new(&axis_coefficients(&basis, window, axis), h))
            .collect();

        points.push(Point3::new(
            steppers[0].value,
            steppers[1].value,
            steppers[2].value,
        ));
        for _ in 0..SEGMENT_STEPS {
            let x = steppers[0].step();
            let y = steppers[1].step();
            let z = steppers[2].step();
            points.push(Point3::new(x, y, z));
        }
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn control_quad() -> Vec<Point3<f64>> {
        vec![
            Point3::new(-100.0, 0.0, 0.0),
            Point3::new(300.0, 200.0, 0.0),
            Point3::new(-100.0, 300.0, 0.0),
            Point3::new(100.0, 0.0, 0.0),
        ]
    }

    #[test]
    fn test_bezier_sample_count_and_endpoints() {
        let control = control_quad();
        let points = bezier(&control).unwrap();
        assert_eq!(points.len(), 51);
        assert!((points[0] - control[0]).norm() < 1e-9);
        assert!((points[50] - control[3]).norm() < 1e-9);
    }

    #[test]
    fn test_bezier_rejects_wrong_control_count() {
        let control = control_quad();
        assert!(matches!(
            bezier(&control[..3]),
            Err(EngineError::InvalidArgument(_))
        ));
        let five: Vec<_> = control.iter().chain(control.first()).cloned().collect();
        assert!(matches!(
            bezier(&five),
            Err(EngineError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_bezier_midpoint_matches_bernstein_form() {
        let control = control_quad();
        let points = bezier(&control).unwrap();
        // B(0.5) = (P0 + 3 P1 + 3 P2 + P3) / 8
        let expected = (control[0].coords
            + control[1].coords * 3.0
            + control[2].coords * 3.0
            + control[3].coords)
            / 8.0;
        assert!((points[25].coords - expected).norm() < 1e-9);
    }

    #[test]
    fn test_bspline_rejects_short_control_list() {
        let control = control_quad();
        assert!(matches!(
            bspline(&control[..3]),
            Err(EngineError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_bspline_segment_counts() {
        let mut control = control_quad();
        assert_eq!(bspline(&control).unwrap().len(), 51);
        control.push(Point3::new(400.0, -100.0, 0.0));
        assert_eq!(bspline(&control).unwrap().len(), 102);
    }

    #[test]
    fn test_bspline_keeps_shared_boundary_point_twice() {
        let mut control = control_quad();
        control.push(Point3::new(400.0, -100.0, 0.0));
        let points = bspline(&control).unwrap();
        // End of segment one and start of segment two are the same
        // curve point, sampled once by each segment.
        assert!((points[50] - points[51]).norm() < 1e-6);
    }

    #[test]
    fn test_forward_differences_match_direct_evaluation() {
        let control = control_quad();
        let points = bspline(&control).unwrap();
        let basis = bspline_basis();
        let coefficients: Vec<Vector4<f64>> = (0..3)
            .map(|axis| axis_coefficients(&basis, &control, axis))
            .collect();

        for (i, point) in points.iter().enumerate() {
            let t = i as f64 / SEGMENT_STEPS as f64;
            let powers = Vector4::new(t * t * t, t * t, t, 1.0);
            let direct = Point3::new(
                powers.dot(&coefficients[0]),
                powers.dot(&coefficients[1]),
                powers.dot(&coefficients[2]),
            );
            assert!((point - direct).norm() < 1e-6, "sample {i} drifted");
        }
    }
}
