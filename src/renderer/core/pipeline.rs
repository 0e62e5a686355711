use super::framebuffer::{Band, Color, FrameBuffer};
use super::math::{Vector, Vector2};
use super::projector::Projector;
use super::rasterizer::{self, FillMode};
use crate::error::{RenderError, Result};
use crate::renderer::geometry::Mesh;
use crate::renderer::shader::{FlatShader, LightingLaw, Shader};
use crate::renderer::texture::Texture;
use rayon::prelude::*;

/// Parámetros de una pasada de renderizado
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Posición z de la cámara en `(0, 0, camera_z)`
    pub camera_z: f32,
    pub light_dir: Vector,
    pub lighting: LightingLaw,
    pub background: Color,
    /// Color de las caras sin textura
    pub base_color: Color,
    /// Rasterizar por franjas horizontales en paralelo
    pub parallel: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            camera_z: 3.0,
            light_dir: Vector::new_with_values(0.0, 0.0, -1.0),
            lighting: LightingLaw::Linear,
            background: Color::BLACK,
            base_color: Color::WHITE,
            parallel: true,
        }
    }
}

impl RenderConfig {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_camera_z(mut self, camera_z: f32) -> Self {
        self.camera_z = camera_z;
        self
    }

    pub fn with_light_dir(mut self, light_dir: Vector) -> Self {
        self.light_dir = light_dir;
        self
    }

    pub fn with_lighting(mut self, lighting: LightingLaw) -> Self {
        self.lighting = lighting;
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_base_color(mut self, base_color: Color) -> Self {
        self.base_color = base_color;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Comprueba los parámetros y construye proyector y shader
    pub fn validate(&self) -> Result<(Projector, FlatShader)> {
        let projector = Projector::new(self.camera_z, self.width, self.height)?;
        let shader = FlatShader::new(self.light_dir, self.lighting).ok_or_else(|| {
            RenderError::InvalidConfig(format!(
                "dirección de luz nula o no finita: {:?}",
                self.light_dir
            ))
        })?;
        Ok((projector, shader))
    }
}

/// Contadores de una pasada
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub faces: usize,
    /// Caras con intensidad `<= 0`
    pub culled: usize,
    /// Caras sin área en pantalla o con vértices no finitos
    pub degenerate: usize,
    pub rasterized: usize,
    pub pixels_written: usize,
}

/// Triángulo ya proyectado y sombreado, listo para rasterizar
struct PreparedTriangle {
    screen: [Vector; 3],
    intensity: f32,
    uvs: Option<[Vector2; 3]>,
}

enum Prepared {
    Culled,
    Degenerate,
    Ready(PreparedTriangle),
}

/// Proyección, sombreado y rasterizado de una malla completa
pub struct Pipeline {
    config: RenderConfig,
    projector: Projector,
    shader: FlatShader,
}

impl Pipeline {
    pub fn new(config: RenderConfig) -> Result<Self> {
        let (projector, shader) = config.validate()?;
        log::debug!(
            "Pipeline: {}x{}, cámara z={}, {} (luz={:?}, ley={:?}), paralelo={}",
            config.width,
            config.height,
            config.camera_z,
            shader.get_shader_name(),
            shader.light_dir(),
            shader.law(),
            config.parallel
        );
        Ok(Self {
            config,
            projector,
            shader,
        })
    }

    /// Renderiza la malla en un framebuffer nuevo.
    ///
    /// Se usa la textura en las caras con coordenadas de textura en sus tres
    /// esquinas; el resto se pinta con `base_color`. Una malla vacía produce
    /// solo el fondo.
    pub fn render(&self, mesh: &Mesh, texture: Option<&Texture>) -> (FrameBuffer, RenderStats) {
        let mut framebuffer = FrameBuffer::new(
            self.config.width,
            self.config.height,
            self.config.background,
        );
        let face_count = mesh.get_face_count();
        let mut stats = RenderStats {
            faces: face_count,
            ..Default::default()
        };

        let textured = texture.is_some();
        let prepared: Vec<Prepared> = if self.config.parallel {
            (0..face_count)
                .into_par_iter()
                .map(|face| self.prepare(mesh, face, textured))
                .collect()
        } else {
            (0..face_count)
                .map(|face| self.prepare(mesh, face, textured))
                .collect()
        };

        let mut triangles = Vec::with_capacity(prepared.len());
        for p in prepared {
            match p {
                Prepared::Culled => stats.culled += 1,
                Prepared::Degenerate => stats.degenerate += 1,
                Prepared::Ready(tri) => triangles.push(tri),
            }
        }
        stats.rasterized = triangles.len();

        stats.pixels_written = if self.config.parallel {
            self.rasterize_parallel(&mut framebuffer, &triangles, texture)
        } else {
            let mut band = framebuffer.as_band();
            triangles
                .iter()
                .map(|tri| self.draw(&mut band, tri, texture))
                .sum()
        };

        log::info!(
            "Render {}: {} caras, {} descartadas, {} degeneradas, {} rasterizadas, {} píxeles escritos",
            mesh.name.as_deref().unwrap_or("<sin nombre>"),
            stats.faces,
            stats.culled,
            stats.degenerate,
            stats.rasterized,
            stats.pixels_written
        );
        (framebuffer, stats)
    }

    fn prepare(&self, mesh: &Mesh, face: usize, textured: bool) -> Prepared {
        // Los índices de una malla se validan al construirla
        let Some(world) = mesh.face_vertices(face) else {
            return Prepared::Degenerate;
        };
        let intensity = self.shader.face_intensity(&world);
        // NaN también se descarta
        if !(intensity > 0.0) {
            return Prepared::Culled;
        }
        let screen = self.projector.project_triangle(&world);
        if rasterizer::is_degenerate(&screen) {
            if screen.iter().any(|v| !v.is_finite()) {
                log::warn!("Cara con vértices en el plano de la cámara: {:?}", world);
            }
            return Prepared::Degenerate;
        }
        let uvs = if textured { mesh.face_tex_coords(face) } else { None };
        Prepared::Ready(PreparedTriangle { screen, intensity, uvs })
    }

    fn draw(
        &self,
        band: &mut Band<'_>,
        tri: &PreparedTriangle,
        texture: Option<&Texture>,
    ) -> usize {
        let fill = self.fill_mode(tri, texture);
        rasterizer::draw_triangle_in_band(band, &tri.screen, tri.intensity, &fill)
    }

    fn fill_mode<'a>(&self, tri: &PreparedTriangle, texture: Option<&'a Texture>) -> FillMode<'a> {
        match (texture, tri.uvs) {
            (Some(texture), Some(uvs)) => FillMode::textured(texture, uvs),
            _ => FillMode::Flat {
                color: self.config.base_color,
            },
        }
    }

    /// Rasteriza por franjas horizontales en paralelo. Cada franja recorre
    /// todos los triángulos en el orden de la malla, así que el resultado
    /// es idéntico al secuencial.
    fn rasterize_parallel(
        &self,
        framebuffer: &mut FrameBuffer,
        triangles: &[PreparedTriangle],
        texture: Option<&Texture>,
    ) -> usize {
        let height = framebuffer.height();
        let num_bands = (num_cpus::get_physical() as u32 * 2).clamp(1, height.max(1));
        let band_height = (height + num_bands - 1) / num_bands;

        framebuffer
            .bands_mut(band_height)
            .into_par_iter()
            .map(|mut band| {
                triangles
                    .iter()
                    .map(|tri| self.draw(&mut band, tri, texture))
                    .sum::<usize>()
            })
            .sum()
    }
}
