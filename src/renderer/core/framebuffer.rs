//! Buffers de color y profundidad de una pasada de renderizado.
//!
//! Ambos buffers viven en la misma estructura, así que siempre tienen las
//! mismas dimensiones. Se indexan por `y * width + x` con la fila 0 arriba
//! en memoria; la inversión vertical al guardar es cosa de `renderer::io`.

/// Profundidad inicial: "infinitamente lejos". Una z mayor está más cerca.
pub const FAR_DEPTH: f32 = f32::NEG_INFINITY;

/// Color RGB de 8 bits por canal
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Multiplica cada canal por `factor` saturando en `[0, 255]`.
    /// La parte fraccionaria se trunca.
    #[inline]
    pub fn scale(&self, factor: f32) -> Self {
        Self {
            r: scale_channel(self.r, factor),
            g: scale_channel(self.g, factor),
            b: scale_channel(self.b, factor),
        }
    }

    pub fn to_array(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Color {
    fn from(rgb: [u8; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }
}

#[inline]
fn scale_channel(channel: u8, factor: f32) -> u8 {
    let value = channel as f32 * factor;
    // NaN cae en 0
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 255.0) as u8
}

pub struct FrameBuffer {
    width: u32,
    height: u32,
    color_buffer: Vec<Color>,
    depth_buffer: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            color_buffer: vec![background; size],
            depth_buffer: vec![FAR_DEPTH; size],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    pub fn color_at(&self, x: u32, y: u32) -> Option<Color> {
        self.index(x, y).map(|i| self.color_buffer[i])
    }

    pub fn depth_at(&self, x: u32, y: u32) -> Option<f32> {
        self.index(x, y).map(|i| self.depth_buffer[i])
    }

    pub fn colors(&self) -> &[Color] {
        &self.color_buffer
    }

    pub fn depths(&self) -> &[f32] {
        &self.depth_buffer
    }

    /// Escribe el píxel solo si `depth` es estrictamente más cercana que la
    /// almacenada. Devuelve `true` si hubo escritura.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color, depth: f32) -> bool {
        match self.index(x, y) {
            Some(i) => depth_test_and_write(
                &mut self.color_buffer[i],
                &mut self.depth_buffer[i],
                color,
                depth,
            ),
            None => false,
        }
    }

    /// Vista mutable sobre todas las filas
    pub fn as_band(&mut self) -> Band<'_> {
        Band {
            y_start: 0,
            y_end: self.height,
            width: self.width,
            height: self.height,
            color: &mut self.color_buffer,
            depth: &mut self.depth_buffer,
        }
    }

    /// Divide el buffer en franjas horizontales disjuntas de `band_height`
    /// filas (la última puede ser más corta).
    pub fn bands_mut(&mut self, band_height: u32) -> Vec<Band<'_>> {
        let band_height = band_height.max(1);
        let width = self.width;
        let height = self.height;
        if width == 0 || height == 0 {
            return Vec::new();
        }
        let chunk = band_height as usize * width as usize;
        self.color_buffer
            .chunks_mut(chunk)
            .zip(self.depth_buffer.chunks_mut(chunk))
            .enumerate()
            .map(|(band_idx, (color, depth))| {
                let y_start = band_idx as u32 * band_height;
                let y_end = (y_start + band_height).min(height);
                Band {
                    y_start,
                    y_end,
                    width,
                    height,
                    color,
                    depth,
                }
            })
            .collect()
    }
}

/// Franja de filas `[y_start, y_end)` de un `FrameBuffer` con acceso
/// exclusivo a sus píxeles.
pub struct Band<'a> {
    y_start: u32,
    y_end: u32,
    width: u32,
    height: u32,
    color: &'a mut [Color],
    depth: &'a mut [f32],
}

impl<'a> Band<'a> {
    pub fn y_start(&self) -> u32 {
        self.y_start
    }

    pub fn y_end(&self) -> u32 {
        self.y_end
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Alto del framebuffer completo, no de la franja
    pub fn frame_height(&self) -> u32 {
        self.height
    }

    /// Igual que `FrameBuffer::set_pixel` con `y` en coordenadas del
    /// framebuffer completo; las filas ajenas a la franja se ignoran.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color, depth: f32) -> bool {
        if x >= self.width || y < self.y_start || y >= self.y_end {
            return false;
        }
        let i = (y - self.y_start) as usize * self.width as usize + x as usize;
        depth_test_and_write(&mut self.color[i], &mut self.depth[i], color, depth)
    }
}

#[inline]
fn depth_test_and_write(
    color_slot: &mut Color,
    depth_slot: &mut f32,
    color: Color,
    depth: f32,
) -> bool {
    // Empates y NaN no sobrescriben
    if depth > *depth_slot {
        *depth_slot = depth;
        *color_slot = color;
        true
    } else {
        false
    }
}
