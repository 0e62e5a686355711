use crate::error::{RenderError, Result};
use crate::renderer::core::framebuffer::Color;
use crate::renderer::core::math::Vector2;

/// Imagen RGBA8 usada como textura difusa. La fila 0 es la primera en memoria.
///
/// Solo se construye con [`Texture::new`] o [`Texture::create_checkerboard`],
/// que garantizan dimensiones no nulas y `width * height * 4` bytes:
///
/// ```compile_fail
/// let tex = rastro3d::Texture { width: 0, height: 0, data: vec![] };
/// ```
#[derive(Clone, Debug)]
pub struct Texture {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Texture {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidTexture(format!(
                "dimensiones nulas {}x{}",
                width, height
            )));
        }
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(RenderError::InvalidTexture(format!(
                "se esperaban {} bytes para {}x{} RGBA, hay {}",
                expected,
                width,
                height,
                data.len()
            )));
        }
        Ok(Self { width, height, data })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes RGBA8 fila a fila
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Texel en `(x, y)`; las coordenadas fuera de la imagen se ajustan al borde
    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        let index = (y as usize * self.width as usize + x as usize) * 4;
        Color::new(self.data[index], self.data[index + 1], self.data[index + 2])
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = (y as usize * self.width as usize + x as usize) * 4;
        self.data[index..index + 4].copy_from_slice(&[color.r, color.g, color.b, 255]);
    }

    /// Lleva una coordenada normalizada `[0, 1]` al espacio de píxeles de la imagen
    #[inline]
    pub fn to_pixel_space(&self, uv: Vector2) -> Vector2 {
        Vector2::new(uv.x * self.width as f32, uv.y * self.height as f32)
    }

    /// Muestreo por vecino más cercano (truncado) en espacio de píxeles,
    /// sin filtrado. Las coordenadas negativas, no finitas o más allá del
    /// borde se ajustan a la imagen.
    #[inline]
    pub fn sample_nearest(&self, u: f32, v: f32) -> Color {
        self.get_pixel(texel_index(u, self.width), texel_index(v, self.height))
    }

    /// Muestreo a partir de coordenadas normalizadas
    pub fn sample(&self, uv: Vector2) -> Color {
        let p = self.to_pixel_space(uv);
        self.sample_nearest(p.x, p.y)
    }

    /// Crea una textura de prueba con un patrón de tablero de ajedrez
    pub fn create_checkerboard(width: u32, height: u32, cell_size: u32) -> Result<Self> {
        let cell_size = cell_size.max(1);
        let mut texture = Self::new(width, height, vec![0; width as usize * height as usize * 4])?;
        for y in 0..height {
            for x in 0..width {
                let is_white = ((x / cell_size) + (y / cell_size)) % 2 == 0;
                let color = if is_white { Color::WHITE } else { Color::BLACK };
                texture.set_pixel(x, y, color);
            }
        }
        Ok(texture)
    }
}

#[inline]
fn texel_index(coord: f32, size: u32) -> u32 {
    if !(coord > 0.0) {
        return 0;
    }
    (coord as u32).min(size - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> Texture {
        let mut data = Vec::new();
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[x as u8, y as u8, 7, 255]);
            }
        }
        Texture::new(width, height, data).unwrap()
    }

    #[test]
    fn test_rejects_mismatched_data() {
        assert!(Texture::new(2, 2, vec![0; 15]).is_err());
        assert!(Texture::new(0, 2, vec![]).is_err());
    }

    #[test]
    fn test_constructed_texture_is_always_sampleable() {
        let tex = Texture::create_checkerboard(4, 4, 1).unwrap();
        assert_eq!((tex.width(), tex.height()), (4, 4));
        assert_eq!(tex.data().len(), 4 * 4 * 4);
        assert_eq!(tex.get_pixel(3, 3), Color::WHITE);
        assert_eq!(tex.get_pixel(u32::MAX, u32::MAX), Color::WHITE);

        // 1x1: cualquier coordenada cae en el único texel
        let tiny = Texture::new(1, 1, vec![9, 8, 7, 255]).unwrap();
        assert_eq!(tiny.sample_nearest(1e9, -1e9), Color::new(9, 8, 7));
        assert_eq!(tiny.sample(Vector2::new(f32::NAN, 2.0)), Color::new(9, 8, 7));

        assert!(Texture::create_checkerboard(0, 4, 1).is_err());
    }

    #[test]
    fn test_set_pixel_out_of_bounds_is_ignored() {
        let mut tex = Texture::create_checkerboard(2, 2, 1).unwrap();
        tex.set_pixel(2, 0, Color::new(1, 2, 3));
        tex.set_pixel(0, 5, Color::new(1, 2, 3));
        assert_eq!(tex.data().len(), 2 * 2 * 4);
        tex.set_pixel(1, 1, Color::new(1, 2, 3));
        assert_eq!(tex.get_pixel(1, 1), Color::new(1, 2, 3));
    }

    #[test]
    fn test_origin_samples_origin_texel() {
        let tex = gradient(16, 8);
        assert_eq!(tex.to_pixel_space(Vector2::new(0.0, 0.0)), Vector2::new(0.0, 0.0));
        assert_eq!(tex.sample(Vector2::new(0.0, 0.0)), Color::new(0, 0, 7));
    }

    #[test]
    fn test_normalized_coords_scale_by_dimensions() {
        let tex = gradient(16, 8);
        assert_eq!(tex.to_pixel_space(Vector2::new(0.5, 0.25)), Vector2::new(8.0, 2.0));
        assert_eq!(tex.sample(Vector2::new(0.5, 0.25)), Color::new(8, 2, 7));
    }

    #[test]
    fn test_sampling_truncates() {
        let tex = gradient(16, 8);
        assert_eq!(tex.sample_nearest(3.9, 1.99), Color::new(3, 1, 7));
    }

    #[test]
    fn test_sampling_clamps_to_edges() {
        let tex = gradient(16, 8);
        assert_eq!(tex.sample(Vector2::new(1.0, 1.0)), Color::new(15, 7, 7));
        assert_eq!(tex.sample_nearest(-4.0, 100.0), Color::new(0, 7, 7));
        assert_eq!(tex.sample_nearest(f32::NAN, f32::INFINITY), Color::new(0, 7, 7));
    }

    #[test]
    fn test_checkerboard() {
        let tex = Texture::create_checkerboard(4, 4, 2).unwrap();
        assert_eq!(tex.get_pixel(0, 0), Color::WHITE);
        assert_eq!(tex.get_pixel(2, 0), Color::BLACK);
        assert_eq!(tex.get_pixel(2, 2), Color::WHITE);
    }
}
