use crate::renderer::core::math::Vector;

/// Calcula la intensidad de luz constante de una cara a partir de sus
/// vértices en espacio de mundo. Una intensidad `<= 0` descarta la cara.
pub trait Shader {
    fn face_intensity(&self, world: &[Vector; 3]) -> f32;
    fn get_shader_name(&self) -> String;
}

pub mod flat;
pub use flat::{FlatShader, LightingLaw};
