// Tipos vectoriales y utilidades geométricas del rasterizador

/// Umbral por debajo del cual el área con signo de un triángulo se considera nula
pub const DEGENERATE_AREA_EPSILON: f32 = 1e-6;

/// Vector de tres componentes usado para posiciones de mundo y de pantalla
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vector {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector {
    pub const fn new_with_values(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn new() -> Self {
        Self::new_with_values(0.0, 0.0, 0.0)
    }

    pub fn add(&self, other: &Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }

    pub fn subtract(&self, other: &Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }

    pub fn scale(&self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }

    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Producto vectorial en forma de determinante
    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    pub fn length_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Devuelve el vector unitario, o `None` si la norma es cero (o no finita)
    pub fn normalize(&self) -> Option<Self> {
        let length = self.length();
        if length == 0.0 || !length.is_finite() {
            return None;
        }
        Some(self.scale(1.0 / length))
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Proyección sobre el plano XY
    pub fn xy(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Vector {
    fn from(arr: [f32; 3]) -> Self {
        Self::new_with_values(arr[0], arr[1], arr[2])
    }
}

/// Vector de dos componentes (coordenadas de pantalla o de textura)
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    pub fn scale(&self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }

    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Componente z del producto vectorial 3D de dos vectores del plano
    pub fn cross(&self, other: &Self) -> f32 {
        cross_2d(*self, *other)
    }
}

/// Producto vectorial escalar en 2D (área con signo del paralelogramo)
#[inline]
pub fn cross_2d(a: Vector2, b: Vector2) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Área con signo (doble) del triángulo `v0 v1 v2`
#[inline]
pub fn signed_area(v0: Vector2, v1: Vector2, v2: Vector2) -> f32 {
    cross_2d(v1.subtract(&v0), v2.subtract(&v0))
}

/// Coordenadas baricéntricas de `point` respecto al triángulo `v0 v1 v2`.
///
/// Cada peso es el cociente entre el área del subtriángulo opuesto al
/// vértice y el área total, de modo que `alpha + beta + gamma == 1`.
/// Devuelve `None` si el triángulo es degenerado (área nula o no finita).
#[inline]
pub fn compute_barycentric_coordinates(
    point: Vector2,
    v0: Vector2,
    v1: Vector2,
    v2: Vector2,
) -> Option<(f32, f32, f32)> {
    let area = signed_area(v0, v1, v2);
    if !area.is_finite() || area.abs() < DEGENERATE_AREA_EPSILON {
        return None;
    }
    Some(barycentric_with_area(point, v0, v1, v2, area))
}

/// Variante sin comprobación para el bucle interno; `area` debe ser la de
/// `signed_area(v0, v1, v2)` y no nula.
#[inline]
pub(crate) fn barycentric_with_area(
    point: Vector2,
    v0: Vector2,
    v1: Vector2,
    v2: Vector2,
    area: f32,
) -> (f32, f32, f32) {
    // cross(v2 - v1, v0 - v1) coincide con el área total, basta un divisor
    let alpha = cross_2d(v1.subtract(&point), v2.subtract(&point)) / area;
    let beta = cross_2d(v2.subtract(&point), v0.subtract(&point)) / area;
    let gamma = 1.0 - alpha - beta;
    (alpha, beta, gamma)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_cross_follows_right_hand_rule() {
        let x = Vector::new_with_values(1.0, 0.0, 0.0);
        let y = Vector::new_with_values(0.0, 1.0, 0.0);
        assert_eq!(x.cross(&y), Vector::new_with_values(0.0, 0.0, 1.0));
        assert_eq!(y.cross(&x), Vector::new_with_values(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_normalize() {
        let v = Vector::new_with_values(3.0, 0.0, 4.0).normalize().unwrap();
        assert!(approx(v.length(), 1.0));
        assert!(approx(v.x, 0.6));
        assert!(approx(v.z, 0.8));
    }

    #[test]
    fn test_normalize_zero_vector_is_none() {
        assert!(Vector::new().normalize().is_none());
    }

    #[test]
    fn test_cross_2d_sign() {
        let a = Vector2::new(1.0, 0.0);
        let b = Vector2::new(0.0, 1.0);
        assert_eq!(cross_2d(a, b), 1.0);
        assert_eq!(b.cross(&a), -1.0);
    }

    #[test]
    fn test_barycentric_sums_to_one() {
        let v0 = Vector2::new(10.0, 10.0);
        let v1 = Vector2::new(200.0, 40.0);
        let v2 = Vector2::new(70.0, 300.0);
        for point in [
            Vector2::new(50.0, 50.0),
            Vector2::new(0.0, 0.0),
            Vector2::new(500.0, -20.0),
            Vector2::new(123.25, 77.5),
        ] {
            let (a, b, c) = compute_barycentric_coordinates(point, v0, v1, v2).unwrap();
            assert!(approx(a + b + c, 1.0), "suma {} en {:?}", a + b + c, point);
        }
    }

    #[test]
    fn test_barycentric_at_vertices() {
        let v0 = Vector2::new(0.0, 0.0);
        let v1 = Vector2::new(8.0, 0.0);
        let v2 = Vector2::new(0.0, 6.0);
        let at = |p| compute_barycentric_coordinates(p, v0, v1, v2).unwrap();

        let (a, b, c) = at(v0);
        assert!(approx(a, 1.0) && approx(b, 0.0) && approx(c, 0.0));
        let (a, b, c) = at(v1);
        assert!(approx(a, 0.0) && approx(b, 1.0) && approx(c, 0.0));
        let (a, b, c) = at(v2);
        assert!(approx(a, 0.0) && approx(b, 0.0) && approx(c, 1.0));
    }

    #[test]
    fn test_barycentric_independent_of_winding() {
        let v0 = Vector2::new(0.0, 0.0);
        let v1 = Vector2::new(0.0, 6.0);
        let v2 = Vector2::new(8.0, 0.0);
        let (a, b, c) =
            compute_barycentric_coordinates(Vector2::new(1.0, 1.0), v0, v1, v2).unwrap();
        assert!(a > 0.0 && b > 0.0 && c > 0.0);
    }

    #[test]
    fn test_barycentric_degenerate_is_none() {
        let v0 = Vector2::new(0.0, 0.0);
        let v1 = Vector2::new(5.0, 5.0);
        let v2 = Vector2::new(10.0, 10.0);
        assert!(compute_barycentric_coordinates(Vector2::new(1.0, 1.0), v0, v1, v2).is_none());
        assert!(compute_barycentric_coordinates(Vector2::new(1.0, 1.0), v0, v0, v0).is_none());
    }
}
