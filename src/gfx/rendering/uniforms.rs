//! Per-frame uniform data
//!
//! Everything a renderer needs to draw a [`Scene`]: camera, lights split by type, and
//! one draw item per mesh with its object and material uniforms. All uniform structs
//! are `Pod` with 16-byte aligned fields so they can be copied straight into GPU
//! buffers.

use cgmath::{Matrix, Matrix4, SquareMatrix};

use crate::gfx::{
    camera::{convert_matrix4_to_array, CameraUniform},
    resources::{
        backend::MeshBuffers,
        material::Material,
        texture::{TextureHandle, TextureKind},
    },
    scene::{Light, LightType, Mesh, Scene},
};

/// Upper bound on lights of each type submitted per frame.
pub const MAX_LIGHTS: usize = 64;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DirectionalLightUniform {
    pub direction: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
}

impl DirectionalLightUniform {
    pub fn from_light(light: &Light) -> Self {
        let d = light.direction;
        Self {
            direction: [d.x, d.y, d.z, 0.0],
            ambient: extend(light.ambient, 0.0),
            diffuse: extend(light.diffuse, 0.0),
            specular: extend(light.specular, 0.0),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLightUniform {
    pub position: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 3],
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
    _padding: [f32; 2],
}

impl PointLightUniform {
    pub fn from_light(light: &Light) -> Self {
        let p = light.position;
        Self {
            position: [p.x, p.y, p.z, 1.0],
            ambient: extend(light.ambient, 0.0),
            diffuse: extend(light.diffuse, 0.0),
            specular: light.specular,
            constant: light.constant_attenuation,
            linear: light.linear_attenuation,
            quadratic: light.quadratic_attenuation,
            _padding: [0.0; 2],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 3],
    pub shininess: f32,
    /// Texture unit of the diffuse map, or -1 when there is none.
    pub diffuse_map: i32,
    /// Texture unit of the specular highlight map, or -1 when there is none.
    pub specular_map: i32,
    _padding: [i32; 2],
}

impl MaterialUniform {
    pub fn from_material(material: &Material) -> Self {
        let unit = |kind: TextureKind| {
            material
                .texture(kind)
                .map_or(-1, |_| kind.unit() as i32)
        };

        Self {
            ambient: extend(material.ambient_color, 1.0),
            diffuse: extend(material.diffuse_color, 1.0),
            specular: material.specular_color,
            shininess: material.specular_exponent,
            diffuse_map: unit(TextureKind::Diffuse),
            specular_map: unit(TextureKind::SpecularHighlight),
            _padding: [0; 2],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    /// Inverse transpose of `model`, for transforming normals.
    pub normal: [[f32; 4]; 4],
}

impl ObjectUniform {
    pub fn new(model: Matrix4<f32>) -> Self {
        // A zero scale has no inverse; its normals are meaningless anyway.
        let normal = model
            .invert()
            .map(|inverse| inverse.transpose())
            .unwrap_or_else(Matrix4::identity);

        Self {
            model: convert_matrix4_to_array(model),
            normal: convert_matrix4_to_array(normal),
        }
    }
}

/// One mesh ready to draw.
#[derive(Debug, Clone, Copy)]
pub struct DrawItem<'a> {
    pub model_index: usize,
    pub mesh: &'a Mesh,
    pub object: ObjectUniform,
    pub material: MaterialUniform,
}

impl<'a> DrawItem<'a> {
    /// `None` until the mesh has been uploaded.
    pub fn buffers(&self) -> Option<&'a MeshBuffers> {
        let mesh: &'a Mesh = self.mesh;
        mesh.buffers()
    }

    /// Texture handles to bind, paired with their texture units.
    pub fn textures(&self) -> impl Iterator<Item = (u32, TextureHandle)> + 'a {
        let mesh: &'a Mesh = self.mesh;
        let material = mesh.material();
        [
            TextureKind::Diffuse,
            TextureKind::SpecularColour,
            TextureKind::SpecularHighlight,
        ]
        .into_iter()
        .filter_map(move |kind| material.texture(kind).map(|texture| (kind.unit(), texture)))
    }
}

/// Snapshot of everything the renderer submits for one frame.
#[derive(Debug, Clone)]
pub struct FrameUniforms<'a> {
    pub camera: CameraUniform,
    pub directional_lights: Vec<DirectionalLightUniform>,
    pub point_lights: Vec<PointLightUniform>,
    pub draws: Vec<DrawItem<'a>>,
}

impl<'a> FrameUniforms<'a> {
    pub fn from_scene(scene: &'a Scene) -> Self {
        let enabled = |light_type: LightType| {
            scene
                .lights()
                .iter()
                .filter(move |light| light.enabled && light.light_type == light_type)
                .take(MAX_LIGHTS)
        };

        let directional_lights: Vec<_> = enabled(LightType::Directional)
            .map(DirectionalLightUniform::from_light)
            .collect();
        let point_lights: Vec<_> = enabled(LightType::Point)
            .map(PointLightUniform::from_light)
            .collect();

        let draws = scene
            .models()
            .iter()
            .enumerate()
            .flat_map(|(model_index, model)| {
                let object = ObjectUniform::new(model.model_matrix());
                model.meshes().iter().map(move |mesh| DrawItem {
                    model_index,
                    mesh,
                    object,
                    material: MaterialUniform::from_material(mesh.material()),
                })
            })
            .collect();

        Self {
            camera: CameraUniform::from_camera(scene.active_camera()),
            directional_lights,
            point_lights,
            draws,
        }
    }
}

fn extend(rgb: [f32; 3], w: f32) -> [f32; 4] {
    [rgb[0], rgb[1], rgb[2], w]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        resources::material::Material,
        scene::{Model, Vertex},
    };
    use approx::assert_abs_diff_eq;
    use cgmath::{Vector3, Vector4};
    use std::sync::Arc;

    fn triangle_model(material: Option<Arc<Material>>) -> Model {
        let vertices = vec![
            Vertex::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0; 2]),
            Vertex::new([1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0; 2]),
            Vertex::new([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [0.0; 2]),
        ];
        Model::new(vec![Mesh::new(vertices, vec![0, 1, 2], material)], "tri")
    }

    #[test]
    fn test_uniform_sizes_are_16_byte_multiples() {
        assert_eq!(std::mem::size_of::<DirectionalLightUniform>(), 64);
        assert_eq!(std::mem::size_of::<PointLightUniform>(), 80);
        assert_eq!(std::mem::size_of::<MaterialUniform>(), 64);
        assert_eq!(std::mem::size_of::<ObjectUniform>(), 128);
    }

    #[test]
    fn test_lights_are_split_and_filtered() {
        let mut scene = Scene::new();
        scene.add_light(Light::default_directional(Vector3::new(0.0, -1.0, 0.0)));
        let mut disabled = Light::default_point(Vector3::new(0.0, 5.0, 0.0));
        disabled.enabled = false;
        scene.add_light(disabled);

        let frame = FrameUniforms::from_scene(&scene);
        assert_eq!(frame.directional_lights.len(), 1);
        assert_eq!(frame.point_lights.len(), 1);
        assert_eq!(frame.point_lights[0].position, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(frame.point_lights[0].quadratic, 0.032);
        assert_eq!(frame.directional_lights[0].direction, [0.0, -1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_light_lists_are_capped() {
        let mut scene = Scene::new();
        for i in 0..MAX_LIGHTS + 10 {
            scene.add_light(Light::default_point(Vector3::new(i as f32, 0.0, 0.0)));
        }
        let frame = FrameUniforms::from_scene(&scene);
        assert_eq!(frame.point_lights.len(), MAX_LIGHTS);
    }

    #[test]
    fn test_material_uniform_texture_units() {
        let mut material = Material::new("textured").with_diffuse(0.8, 0.1, 0.1);
        material.set_texture(TextureKind::Diffuse, TextureHandle(7));
        material.set_texture(TextureKind::SpecularHighlight, TextureHandle(9));

        let uniform = MaterialUniform::from_material(&material);
        assert_eq!(uniform.diffuse, [0.8, 0.1, 0.1, 1.0]);
        assert_eq!(uniform.diffuse_map, 0);
        assert_eq!(uniform.specular_map, 2);

        let plain = MaterialUniform::from_material(&Material::default());
        assert_eq!(plain.diffuse_map, -1);
        assert_eq!(plain.specular_map, -1);
    }

    #[test]
    fn test_draw_items_follow_model_transform() {
        let mut material = Material::new("m");
        material.set_texture(TextureKind::SpecularColour, TextureHandle(3));
        let mut scene = Scene::new();
        let index = scene.add_model(triangle_model(Some(Arc::new(material))));
        scene
            .model_mut(index)
            .expect("model")
            .set_scale(Vector3::new(2.0, 2.0, 2.0));

        let frame = FrameUniforms::from_scene(&scene);
        assert_eq!(frame.draws.len(), 1);
        let draw = &frame.draws[0];
        assert_eq!(draw.model_index, index);
        assert!(draw.buffers().is_none());
        assert_eq!(draw.textures().collect::<Vec<_>>(), [(1, TextureHandle(3))]);

        let model = Matrix4::from(draw.object.model);
        assert_abs_diff_eq!(
            model * Vector4::new(1.0, 0.0, 0.0, 1.0),
            Vector4::new(2.0, 0.0, 0.0, 1.0),
            epsilon = 1e-6
        );
        // Uniform scale: the normal matrix is the inverse scale.
        assert_abs_diff_eq!(draw.object.normal[0][0], 0.5, epsilon = 1e-6);
    }
}
