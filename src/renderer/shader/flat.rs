// --- SOMBREADO PLANO CON UNA LUZ DIRECCIONAL ---
use super::Shader;
use crate::renderer::core::math::Vector;

/// Ley que convierte el coseno normal·luz en brillo
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LightingLaw {
    /// `intensity = dot(n, L)`
    #[default]
    Linear,
    /// `intensity = dot(n, L)²`, conservando el signo para el descarte
    Squared,
}

pub struct FlatShader {
    light_dir: Vector, // Dirección de la luz (normalizada)
    law: LightingLaw,
}

impl FlatShader {
    /// Crea el shader; devuelve `None` si la dirección de luz es nula.
    pub fn new(light_dir: Vector, law: LightingLaw) -> Option<Self> {
        Some(Self {
            light_dir: light_dir.normalize()?,
            law,
        })
    }

    pub fn new_default() -> Self {
        Self {
            light_dir: Vector::new_with_values(0.0, 0.0, -1.0),
            law: LightingLaw::Linear,
        }
    }

    pub fn light_dir(&self) -> Vector {
        self.light_dir
    }

    pub fn law(&self) -> LightingLaw {
        self.law
    }

    /// Normal unitaria de la cara según su orden de vértices
    pub fn face_normal(world: &[Vector; 3]) -> Option<Vector> {
        let edge2 = world[2].subtract(&world[0]);
        let edge1 = world[1].subtract(&world[0]);
        edge2.cross(&edge1).normalize()
    }
}

impl Shader for FlatShader {
    fn get_shader_name(&self) -> String {
        "FlatShader".to_string()
    }

    fn face_intensity(&self, world: &[Vector; 3]) -> f32 {
        // Cara sin área en mundo: sin normal, se descarta
        let Some(normal) = Self::face_normal(world) else {
            return 0.0;
        };
        let cosine = normal.dot(&self.light_dir);
        match self.law {
            LightingLaw::Linear => cosine,
            LightingLaw::Squared => cosine * cosine.abs(),
        }
    }
}
