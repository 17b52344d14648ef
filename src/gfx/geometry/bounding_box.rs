//! Axis-aligned bounding boxes
//!
//! A [`BoundingBox`] keeps its eight corners next to its extents so that it can be
//! re-fitted under an arbitrary affine transform. Re-fitting a rotated box is
//! conservative: the result encloses the rotated shape but is not minimal. That is
//! fine for coarse picking, which is the only thing these boxes are used for.

use cgmath::{EuclideanSpace, Matrix4, Point3, Vector3};

/// Axis-aligned box described by its minimum and maximum corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    min: Point3<f32>,
    max: Point3<f32>,
    corners: [Point3<f32>; 8],
}

impl BoundingBox {
    /// Creates a box from its extents.
    pub fn new(min: Point3<f32>, max: Point3<f32>) -> Self {
        let corners = [
            Point3::new(min.x, min.y, min.z),
            Point3::new(max.x, min.y, min.z),
            Point3::new(max.x, max.y, min.z),
            Point3::new(min.x, max.y, min.z),
            Point3::new(min.x, min.y, max.z),
            Point3::new(max.x, min.y, max.z),
            Point3::new(max.x, max.y, max.z),
            Point3::new(min.x, max.y, max.z),
        ];

        Self { min, max, corners }
    }

    /// Fits a box around a set of points.
    ///
    /// An empty set yields a degenerate box at the origin.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point3<f32>>,
    {
        let mut points = points.into_iter();

        let Some(first) = points.next() else {
            return Self::new(Point3::origin(), Point3::origin());
        };

        let (min, max) = points.fold((first, first), |(min, max), p| {
            (
                Point3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z)),
                Point3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z)),
            )
        });

        Self::new(min, max)
    }

    pub fn min(&self) -> Point3<f32> {
        self.min
    }

    pub fn max(&self) -> Point3<f32> {
        self.max
    }

    /// The eight corners, bottom face (min z) first.
    pub fn corners(&self) -> &[Point3<f32>; 8] {
        &self.corners
    }

    pub fn center(&self) -> Point3<f32> {
        Point3::from_vec((self.min.to_vec() + self.max.to_vec()) * 0.5)
    }

    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }

    /// Returns true if `point` lies inside or on the surface of the box.
    pub fn contains(&self, point: Point3<f32>) -> bool {
        (0..3).all(|axis| point[axis] >= self.min[axis] && point[axis] <= self.max[axis])
    }

    /// Smallest box enclosing both `self` and `other`.
    pub fn union(&self, other: &BoundingBox) -> Self {
        Self::from_points([self.min, self.max, other.min, other.max])
    }

    /// Re-fits the box around its eight corners after transforming them by `transform`.
    ///
    /// Transforming only `min` and `max` would be wrong as soon as the matrix rotates,
    /// so every corner goes through the full affine matrix (translation, rotation and
    /// non-uniform scale) before the new extents are taken.
    pub fn apply_transform(&self, transform: &Matrix4<f32>) -> Self {
        Self::from_points(self.corners.iter().map(|corner| {
            let transformed = *transform * corner.to_homogeneous();
            Point3::new(transformed.x, transformed.y, transformed.z)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use cgmath::{Deg, SquareMatrix};
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn unit_cube() -> BoundingBox {
        BoundingBox::new(Point3::new(-0.5, -0.5, -0.5), Point3::new(0.5, 0.5, 0.5))
    }

    fn assert_box_eq(actual: &BoundingBox, expected: &BoundingBox) {
        assert_abs_diff_eq!(actual.min(), expected.min(), epsilon = 1e-5);
        assert_abs_diff_eq!(actual.max(), expected.max(), epsilon = 1e-5);
    }

    #[test]
    fn test_from_points() {
        let bbox = BoundingBox::from_points([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(-1.0, -2.0, -1.0),
        ]);

        assert_eq!(bbox.min(), Point3::new(-1.0, -2.0, -1.0));
        assert_eq!(bbox.max(), Point3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_from_no_points_is_degenerate_at_origin() {
        let bbox = BoundingBox::from_points(std::iter::empty());
        assert_eq!(bbox.min(), Point3::origin());
        assert_eq!(bbox.max(), Point3::origin());
    }

    #[test]
    fn test_corners_cover_every_extent_combination() {
        let bbox = unit_cube();
        for corner in bbox.corners() {
            for axis in 0..3 {
                assert!(corner[axis] == -0.5 || corner[axis] == 0.5);
            }
        }
        assert_eq!(bbox.corners()[0], bbox.min());
        assert_eq!(bbox.corners()[6], bbox.max());
    }

    #[test]
    fn test_identity_transform_keeps_random_boxes() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..100 {
            let a = Point3::new(
                rng.random_range(-50.0..50.0),
                rng.random_range(-50.0..50.0),
                rng.random_range(-50.0..50.0),
            );
            let size = Vector3::new(
                rng.random_range(0.0..20.0),
                rng.random_range(0.0..20.0),
                rng.random_range(0.0..20.0),
            );
            let bbox = BoundingBox::new(a, a + size);

            assert_box_eq(&bbox.apply_transform(&Matrix4::identity()), &bbox);
        }
    }

    #[test]
    fn test_unit_cube_invariant_under_quarter_turns() {
        let cube = unit_cube();
        for angle in [90.0, 180.0, 270.0] {
            for rotation in [
                Matrix4::from_angle_x(Deg(angle)),
                Matrix4::from_angle_y(Deg(angle)),
                Matrix4::from_angle_z(Deg(angle)),
            ] {
                assert_box_eq(&cube.apply_transform(&rotation), &cube);
            }
        }
    }

    #[test]
    fn test_rotation_grows_box_conservatively() {
        let rotated = unit_cube().apply_transform(&Matrix4::from_angle_y(Deg(45.0)));
        let half_diagonal = 0.5 * 2.0f32.sqrt();

        assert_abs_diff_eq!(rotated.max().x, half_diagonal, epsilon = 1e-5);
        assert_abs_diff_eq!(rotated.max().z, half_diagonal, epsilon = 1e-5);
        assert_abs_diff_eq!(rotated.max().y, 0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_translation_and_nonuniform_scale() {
        let transform = Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0))
            * Matrix4::from_nonuniform_scale(2.0, 1.0, 4.0);
        let moved = unit_cube().apply_transform(&transform);

        assert_box_eq(
            &moved,
            &BoundingBox::new(Point3::new(0.0, 1.5, 1.0), Point3::new(2.0, 2.5, 5.0)),
        );
    }

    #[test]
    fn test_union_and_contains() {
        let a = unit_cube();
        let b = BoundingBox::new(Point3::new(1.0, 1.0, 1.0), Point3::new(2.0, 3.0, 2.0));
        let both = a.union(&b);

        assert_eq!(both.min(), Point3::new(-0.5, -0.5, -0.5));
        assert_eq!(both.max(), Point3::new(2.0, 3.0, 2.0));
        assert!(both.contains(Point3::new(0.0, 2.5, 0.0)));
        assert!(!a.contains(Point3::new(0.0, 2.5, 0.0)));
        assert_eq!(a.center(), Point3::origin());
        assert_eq!(b.size(), Vector3::new(1.0, 2.0, 1.0));
    }
}
