use super::math::Vector;
use crate::error::{RenderError, Result};

/// Proyección perspectiva simplificada con la cámara fija en `(0, 0, camera_z)`
/// mirando hacia el origen.
///
/// No es una matriz de proyección completa: divide x, y, z entre
/// `1 - z / camera_z` y lleva x, y de `[-1, 1]` a píxeles. La z resultante
/// crece al acercarse a la cámara.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projector {
    camera_z: f32,
    width: u32,
    height: u32,
}

impl Projector {
    pub fn new(camera_z: f32, width: u32, height: u32) -> Result<Self> {
        if !camera_z.is_finite() || camera_z <= 0.0 {
            return Err(RenderError::InvalidConfig(format!(
                "la cámara debe estar en z > 0 (z = {})",
                camera_z
            )));
        }
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidConfig(format!(
                "dimensiones nulas {}x{}",
                width, height
            )));
        }
        Ok(Self { camera_z, width, height })
    }

    pub fn camera_z(&self) -> f32 {
        self.camera_z
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Convierte un vértice de mundo en vértice de pantalla.
    ///
    /// Si `world.z` se acerca a `camera_z` el divisor tiende a cero y las
    /// coordenadas crecen sin límite (o dejan de ser finitas); el
    /// rasterizador descarta los triángulos con vértices no finitos.
    #[inline]
    pub fn project(&self, world: &Vector) -> Vector {
        let denom = 1.0 - world.z / self.camera_z;
        Vector::new_with_values(
            (world.x / denom + 1.0) * self.width as f32 / 2.0,
            (world.y / denom + 1.0) * self.height as f32 / 2.0,
            world.z / denom,
        )
    }

    /// Proyecta los tres vértices de una cara
    pub fn project_triangle(&self, world: &[Vector; 3]) -> [Vector; 3] {
        [
            self.project(&world[0]),
            self.project(&world[1]),
            self.project(&world[2]),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_camera_behind_origin() {
        assert!(Projector::new(0.0, 800, 800).is_err());
        assert!(Projector::new(-3.0, 800, 800).is_err());
        assert!(Projector::new(f32::NAN, 800, 800).is_err());
        assert!(Projector::new(3.0, 0, 800).is_err());
    }

    #[test]
    fn test_origin_plane_is_plain_viewport_mapping() {
        let projector = Projector::new(3.0, 800, 600).unwrap();
        let v = Vector::new_with_values(0.5, -0.25, 0.0);
        let s = projector.project(&v);
        assert_eq!(s.x, (0.5 + 1.0) * 800.0 / 2.0);
        assert_eq!(s.y, (-0.25 + 1.0) * 600.0 / 2.0);
        assert_eq!(s.z, 0.0);
    }

    #[test]
    fn test_closer_vertices_are_magnified_and_deeper() {
        let projector = Projector::new(3.0, 800, 800).unwrap();
        let near = projector.project(&Vector::new_with_values(0.5, 0.5, 1.0));
        let far = projector.project(&Vector::new_with_values(0.5, 0.5, -1.0));
        assert!(near.x > far.x);
        assert!(near.y > far.y);
        assert!(near.z > far.z);
        // denom = 1 - 1/3
        assert!((near.z - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_vertex_on_camera_plane_is_not_finite() {
        let projector = Projector::new(3.0, 800, 800).unwrap();
        let s = projector.project(&Vector::new_with_values(0.5, 0.5, 3.0));
        assert!(!s.is_finite());
    }
}
