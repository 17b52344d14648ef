//! # Object Picking System
//!
//! Lets a user click on a model in the viewport to select it.
//!
//! ## How it works
//!
//! 1. **Mouse to Ray**: unproject the cursor through the active camera into a world-space ray
//! 2. **Ray-Box Intersection**: test the ray against every model's world bounding box (slab method)
//! 3. **Selection**: keep the strictly closest hit; on a tie the first model wins
//!
//! ## Usage
//!
//! ```no_run
//! use model_viewer::gfx::scene::Scene;
//!
//! let scene = Scene::new();
//! if let Some(model) = scene.select_model(400.0, 300.0, 800, 600) {
//!     println!("Selected model: {}", model.name());
//! }
//! ```

use cgmath::{InnerSpace, Matrix4, Point3, SquareMatrix, Vector3, Vector4};

use crate::gfx::{camera::Camera, geometry::BoundingBox};

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Point3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Create a new ray, normalizing `direction`
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// False for a ray whose direction is zero or not finite.
    pub fn is_valid(&self) -> bool {
        let d = self.direction;
        d.x.is_finite() && d.y.is_finite() && d.z.is_finite() && d.magnitude2() > 0.0
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction * t
    }

    /// Slab test against an axis-aligned box.
    ///
    /// Returns the hit distance, or `None` on a miss. When the origin is inside the
    /// box the exit distance is returned, so a hit distance is never negative.
    pub fn intersect_box(&self, bbox: &BoundingBox) -> Option<f32> {
        // A zero or NaN direction has no slabs to cross.
        if !self.is_valid() {
            return None;
        }

        let (min, max) = (bbox.min(), bbox.max());
        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;

        for axis in 0..3 {
            let origin = self.origin[axis];
            let direction = self.direction[axis];

            if direction != 0.0 {
                let t1 = (min[axis] - origin) / direction;
                let t2 = (max[axis] - origin) / direction;

                t_min = t_min.max(t1.min(t2));
                t_max = t_max.min(t1.max(t2));
            } else if origin < min[axis] || origin > max[axis] {
                // Parallel to this slab and outside it.
                return None;
            }
        }

        if !t_min.is_finite() || !t_max.is_finite() || t_max < 0.0 || t_min > t_max {
            return None;
        }

        Some(if t_min >= 0.0 { t_min } else { t_max })
    }
}

/// Result of an object picking operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickResult {
    /// Index of the picked model in the scene
    pub model_index: usize,
    /// Distance from the ray origin to the intersection point
    pub distance: f32,
    /// World space intersection point
    pub intersection_point: Point3<f32>,
}

/// Convert screen coordinates to a world-space ray.
///
/// The pixel is mapped to NDC (y flipped, the screen origin is top-left), placed on
/// the far plane, unprojected by the inverse projection, turned into a direction by
/// zeroing w, then taken to world space by the inverse view matrix. The ray starts at
/// the camera position.
pub fn screen_to_ray(
    screen_pos: (f32, f32),
    viewport_size: (f32, f32),
    camera: &Camera,
) -> Ray {
    let (mouse_x, mouse_y) = screen_pos;
    let (width, height) = viewport_size;

    let ndc_x = (2.0 * mouse_x) / width - 1.0;
    let ndc_y = 1.0 - (2.0 * mouse_y) / height;
    let clip = Vector4::new(ndc_x, ndc_y, 1.0, 1.0);

    let view_from_clip = camera
        .projection_matrix()
        .invert()
        .unwrap_or_else(Matrix4::identity);
    let world_from_view = camera
        .view_matrix()
        .invert()
        .unwrap_or_else(Matrix4::identity);

    let mut eye = view_from_clip * clip;
    eye.w = 0.0;

    let world = world_from_view * eye;

    Ray::new(camera.position(), world.truncate())
}

/// Tests `ray` against each box in order and returns the strictly closest hit.
pub fn closest_hit<I>(ray: &Ray, boxes: I) -> Option<PickResult>
where
    I: IntoIterator<Item = BoundingBox>,
{
    let mut closest: Option<PickResult> = None;

    for (model_index, bbox) in boxes.into_iter().enumerate() {
        let Some(distance) = ray.intersect_box(&bbox) else {
            continue;
        };

        if closest.map_or(true, |best| distance < best.distance) {
            closest = Some(PickResult {
                model_index,
                distance,
                intersection_point: ray.point_at(distance),
            });
        }
    }

    closest
}
