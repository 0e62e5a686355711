use crate::error::{RenderError, Result};
use crate::renderer::core::math::{Vector, Vector2};

/// Esquina de una cara: índice de vértice y, opcionalmente, de coordenada
/// de textura (son arrays distintos, los índices pueden no coincidir).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FaceCorner {
    pub vertex: usize,
    pub tex_coord: Option<usize>,
}

impl FaceCorner {
    pub fn new(vertex: usize, tex_coord: Option<usize>) -> Self {
        Self { vertex, tex_coord }
    }
}

/// Triángulo de la malla. El orden de las esquinas define el sentido de
/// giro y por tanto el signo de la normal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Face {
    pub corners: [FaceCorner; 3],
}

impl Face {
    pub fn new(corners: [FaceCorner; 3]) -> Self {
        Self { corners }
    }

    /// Cara sin coordenadas de textura
    pub fn from_vertices(a: usize, b: usize, c: usize) -> Self {
        Self::new([
            FaceCorner::new(a, None),
            FaceCorner::new(b, None),
            FaceCorner::new(c, None),
        ])
    }
}

/// Malla de solo lectura: vértices en espacio de modelo (normalmente
/// `[-1, 1]`), coordenadas de textura normalizadas `[0, 1]` y caras.
///
/// Todos los índices se validan al construirla.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    vertices: Vec<Vector>,
    tex_coords: Vec<Vector2>,
    faces: Vec<Face>,
    pub name: Option<String>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vector>, tex_coords: Vec<Vector2>, faces: Vec<Face>) -> Result<Self> {
        for (face_idx, face) in faces.iter().enumerate() {
            for corner in &face.corners {
                if corner.vertex >= vertices.len() {
                    return Err(RenderError::InvalidMesh(format!(
                        "la cara {} usa el vértice {} de {}",
                        face_idx,
                        corner.vertex,
                        vertices.len()
                    )));
                }
                if let Some(t) = corner.tex_coord {
                    if t >= tex_coords.len() {
                        return Err(RenderError::InvalidMesh(format!(
                            "la cara {} usa la coordenada de textura {} de {}",
                            face_idx,
                            t,
                            tex_coords.len()
                        )));
                    }
                }
            }
        }
        Ok(Self {
            vertices,
            tex_coords,
            faces,
            name: None,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn vertices(&self) -> &[Vector] {
        &self.vertices
    }

    pub fn tex_coords(&self) -> &[Vector2] {
        &self.tex_coords
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn get_vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn get_face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Vértices de mundo de la cara `face`, o `None` si no existe
    pub fn face_vertices(&self, face: usize) -> Option<[Vector; 3]> {
        let [a, b, c] = self.faces.get(face)?.corners;
        Some([
            *self.vertices.get(a.vertex)?,
            *self.vertices.get(b.vertex)?,
            *self.vertices.get(c.vertex)?,
        ])
    }

    /// Coordenadas de textura de la cara `face`, si las tres esquinas las tienen
    pub fn face_tex_coords(&self, face: usize) -> Option<[Vector2; 3]> {
        let [a, b, c] = self.faces.get(face)?.corners;
        Some([
            *self.tex_coords.get(a.tex_coord?)?,
            *self.tex_coords.get(b.tex_coord?)?,
            *self.tex_coords.get(c.tex_coord?)?,
        ])
    }

    /// Centra la malla en el punto medio de su caja envolvente y la escala
    /// para que el eje más largo ocupe `[-1, 1]`.
    pub fn normalize_vertices(&mut self) {
        if self.vertices.is_empty() {
            return;
        }
        let mut min = [f32::INFINITY; 3];
        let mut max = [f32::NEG_INFINITY; 3];
        for v in &self.vertices {
            for (i, c) in v.to_array().into_iter().enumerate() {
                min[i] = min[i].min(c);
                max[i] = max[i].max(c);
            }
        }
        let center = Vector::new_with_values(
            (min[0] + max[0]) / 2.0,
            (min[1] + max[1]) / 2.0,
            (min[2] + max[2]) / 2.0,
        );
        let half_extent = (0..3).map(|i| (max[i] - min[i]) / 2.0).fold(0.0f32, f32::max);
        let scale = if half_extent > 0.0 { 1.0 / half_extent } else { 1.0 };
        for v in &mut self.vertices {
            *v = v.subtract(&center).scale(scale);
        }
    }
}

pub mod obj_loader;
pub use obj_loader::{load_obj, parse_obj};

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_vertices() -> Vec<Vector> {
        vec![
            Vector::new_with_values(0.0, 0.0, 0.0),
            Vector::new_with_values(1.0, 0.0, 0.0),
            Vector::new_with_values(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_rejects_out_of_range_vertex() {
        let err = Mesh::new(quad_vertices(), vec![], vec![Face::from_vertices(0, 1, 3)]);
        assert!(matches!(err, Err(RenderError::InvalidMesh(_))));
    }

    #[test]
    fn test_rejects_out_of_range_tex_coord() {
        let face = Face::new([
            FaceCorner::new(0, Some(0)),
            FaceCorner::new(1, Some(1)),
            FaceCorner::new(2, Some(1)),
        ]);
        let err = Mesh::new(quad_vertices(), vec![Vector2::new(0.0, 0.0)], vec![face]);
        assert!(matches!(err, Err(RenderError::InvalidMesh(_))));
    }

    #[test]
    fn test_empty_mesh_is_valid() {
        let mesh = Mesh::new(vec![], vec![], vec![]).unwrap();
        assert!(mesh.is_empty());
        assert_eq!(mesh.face_vertices(0), None);
        assert_eq!(mesh.face_tex_coords(0), None);
    }

    #[test]
    fn test_face_lookup_by_index() {
        let mesh = Mesh::new(quad_vertices(), vec![], vec![Face::from_vertices(2, 0, 1)]).unwrap();
        let v = quad_vertices();
        assert_eq!(mesh.face_vertices(0), Some([v[2], v[0], v[1]]));
        assert_eq!(mesh.face_vertices(1), None);
        assert_eq!(mesh.face_tex_coords(0), None);
    }

    #[test]
    fn test_face_tex_coords_need_all_corners() {
        let uvs = vec![Vector2::new(0.0, 0.0), Vector2::new(1.0, 0.0), Vector2::new(0.0, 1.0)];
        let partial = Face::new([
            FaceCorner::new(0, Some(0)),
            FaceCorner::new(1, None),
            FaceCorner::new(2, Some(2)),
        ]);
        let full = Face::new([
            FaceCorner::new(0, Some(2)),
            FaceCorner::new(1, Some(1)),
            FaceCorner::new(2, Some(0)),
        ]);
        let mesh = Mesh::new(quad_vertices(), uvs, vec![partial, full]).unwrap();
        assert!(mesh.face_tex_coords(0).is_none());
        assert_eq!(
            mesh.face_tex_coords(1),
            Some([Vector2::new(0.0, 1.0), Vector2::new(1.0, 0.0), Vector2::new(0.0, 0.0)])
        );
    }

    #[test]
    fn test_normalize_vertices_fits_unit_cube() {
        let vertices = vec![
            Vector::new_with_values(10.0, 20.0, 30.0),
            Vector::new_with_values(14.0, 21.0, 30.0),
            Vector::new_with_values(12.0, 22.0, 31.0),
        ];
        let mut mesh = Mesh::new(vertices, vec![], vec![Face::from_vertices(0, 1, 2)]).unwrap();
        mesh.normalize_vertices();
        let v = mesh.vertices();
        assert_eq!(v[0], Vector::new_with_values(-1.0, -0.5, -0.25));
        assert_eq!(v[1], Vector::new_with_values(1.0, 0.0, -0.25));
        assert_eq!(v[2], Vector::new_with_values(0.0, 0.5, 0.25));
    }
}
