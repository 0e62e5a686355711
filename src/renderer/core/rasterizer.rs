use super::framebuffer::{Band, Color, FrameBuffer};
use super::math::{self, Vector, Vector2};
use crate::renderer::texture::Texture;

/// Cómo se colorea cada píxel cubierto por un triángulo
#[derive(Copy, Clone)]
pub enum FillMode<'a> {
    /// Color base multiplicado por la intensidad, constante en todo el triángulo
    Flat { color: Color },
    /// Textura muestreada en coordenadas interpoladas en espacio de pantalla
    /// (sin corrección de perspectiva); `uvs` ya en píxeles de la textura.
    Textured { texture: &'a Texture, uvs: [Vector2; 3] },
}

impl<'a> FillMode<'a> {
    /// Modo texturizado a partir de coordenadas normalizadas `[0, 1]`
    pub fn textured(texture: &'a Texture, uvs: [Vector2; 3]) -> Self {
        FillMode::Textured {
            texture,
            uvs: [
                texture.to_pixel_space(uvs[0]),
                texture.to_pixel_space(uvs[1]),
                texture.to_pixel_space(uvs[2]),
            ],
        }
    }
}

/// Rectángulo de píxeles (inclusivo) a recorrer para un triángulo
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

/// Caja envolvente entera de los tres vértices ajustada a `[0, width) x [0, height)`.
///
/// Los píxeles se muestrean en puntos enteros, así que basta con
/// `ceil(min) ..= floor(max)`. Devuelve `None` si la caja queda vacía o
/// algún vértice no es finito.
pub fn bounding_box(screen: &[Vector; 3], width: u32, height: u32) -> Option<BoundingBox> {
    if width == 0 || height == 0 || screen.iter().any(|v| !v.is_finite()) {
        return None;
    }
    let (lo_x, hi_x) = extent(screen.iter().map(|v| v.x));
    let (lo_y, hi_y) = extent(screen.iter().map(|v| v.y));
    let min_x = lo_x.ceil().max(0.0);
    let max_x = hi_x.floor().min((width - 1) as f32);
    let min_y = lo_y.ceil().max(0.0);
    let max_y = hi_y.floor().min((height - 1) as f32);
    if min_x > max_x || min_y > max_y {
        return None;
    }
    Some(BoundingBox {
        min_x: min_x as u32,
        min_y: min_y as u32,
        max_x: max_x as u32,
        max_y: max_y as u32,
    })
}

fn extent(values: impl Iterator<Item = f32>) -> (f32, f32) {
    values.fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

/// `true` si el triángulo de pantalla no tiene área (vértices colineales
/// o coincidentes) o alguna coordenada no es finita.
pub fn is_degenerate(screen: &[Vector; 3]) -> bool {
    if screen.iter().any(|v| !v.is_finite()) {
        return true;
    }
    let area = math::signed_area(screen[0].xy(), screen[1].xy(), screen[2].xy());
    !area.is_finite() || area.abs() < math::DEGENERATE_AREA_EPSILON
}

/// Rellena un triángulo de pantalla en todo el framebuffer.
///
/// Devuelve el número de píxeles que pasaron el test de profundidad.
pub fn draw_triangle(
    target: &mut FrameBuffer,
    screen: &[Vector; 3],
    intensity: f32,
    fill: &FillMode<'_>,
) -> usize {
    draw_triangle_in_band(&mut target.as_band(), screen, intensity, fill)
}

/// Rellena la parte de un triángulo que cae dentro de una franja.
///
/// Para cada punto entero de la caja envolvente se calculan las
/// baricéntricas; si las tres son `>= 0` se interpola z y se aplica el
/// test de profundidad (más cercano = z mayor, estrictamente). Los
/// triángulos degenerados no escriben nada.
pub fn draw_triangle_in_band(
    band: &mut Band<'_>,
    screen: &[Vector; 3],
    intensity: f32,
    fill: &FillMode<'_>,
) -> usize {
    if is_degenerate(screen) {
        log::trace!("Triángulo degenerado descartado: {:?}", screen);
        return 0;
    }
    let Some(bbox) = bounding_box(screen, band.width(), band.frame_height()) else {
        return 0;
    };
    // Limitar el procesamiento a la franja
    let start_y = bbox.min_y.max(band.y_start());
    let end_y = bbox.max_y.min(band.y_end().saturating_sub(1));
    if band.y_end() == band.y_start() || start_y > end_y {
        return 0;
    }

    let s0 = screen[0].xy();
    let s1 = screen[1].xy();
    let s2 = screen[2].xy();
    let area = math::signed_area(s0, s1, s2);

    // El modo plano tiene un único color por triángulo
    let flat_color = match fill {
        FillMode::Flat { color } => Some(color.scale(intensity)),
        FillMode::Textured { .. } => None,
    };

    let mut written = 0;
    for y in start_y..=end_y {
        for x in bbox.min_x..=bbox.max_x {
            let point = Vector2::new(x as f32, y as f32);
            let (alpha, beta, gamma) = math::barycentric_with_area(point, s0, s1, s2, area);
            if alpha < 0.0 || beta < 0.0 || gamma < 0.0 {
                continue;
            }
            let depth = alpha * screen[0].z + beta * screen[1].z + gamma * screen[2].z;

            let color = match (flat_color, fill) {
                (Some(color), _) => color,
                (None, FillMode::Textured { texture, uvs }) => {
                    let u = alpha * uvs[0].x + beta * uvs[1].x + gamma * uvs[2].x;
                    let v = alpha * uvs[0].y + beta * uvs[1].y + gamma * uvs[2].y;
                    texture.sample_nearest(u, v).scale(intensity)
                }
                (None, FillMode::Flat { color }) => color.scale(intensity),
            };

            if band.set_pixel(x, y, color, depth) {
                written += 1;
            }
        }
    }
    written
}
