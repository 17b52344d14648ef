use cgmath::Vector3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightType {
    Directional,
    Point,
}

/// Scene light. Directional lights ignore `position`, point lights ignore `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub light_type: LightType,
    pub position: Vector3<f32>,
    pub direction: Vector3<f32>,
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub constant_attenuation: f32,
    pub linear_attenuation: f32,
    pub quadratic_attenuation: f32,
    pub enabled: bool,
}

impl Light {
    pub fn default_point(position: Vector3<f32>) -> Self {
        Self {
            light_type: LightType::Point,
            position,
            direction: Vector3::new(0.0, -1.0, 0.0),
            ..Self::base()
        }
    }

    pub fn default_directional(direction: Vector3<f32>) -> Self {
        Self {
            light_type: LightType::Directional,
            position: Vector3::new(0.0, 0.0, 0.0),
            direction,
            ..Self::base()
        }
    }

    fn base() -> Self {
        Self {
            light_type: LightType::Point,
            position: Vector3::new(0.0, 0.0, 0.0),
            direction: Vector3::new(0.0, -1.0, 0.0),
            ambient: [0.2, 0.2, 0.2],
            diffuse: [0.5, 0.5, 0.5],
            specular: [1.0, 1.0, 1.0],
            constant_attenuation: 1.0,
            linear_attenuation: 0.09,
            quadratic_attenuation: 0.032,
            enabled: true,
        }
    }
}
