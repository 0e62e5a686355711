// Rasterizador 3D por software (solo CPU) en Rust
// Exportación de módulos

pub mod error;

pub mod renderer {
    pub mod core {
        pub mod framebuffer;
        pub mod math;
        pub mod pipeline;
        pub mod projector;
        pub mod rasterizer;
    }

    pub mod geometry;
    pub mod io;
    pub mod shader;
    pub mod texture;
}

pub use error::{RenderError, Result};
pub use renderer::core::framebuffer::{Color, FrameBuffer};
pub use renderer::core::math::{Vector, Vector2};
pub use renderer::core::pipeline::{Pipeline, RenderConfig, RenderStats};
pub use renderer::geometry::{Face, FaceCorner, Mesh};
pub use renderer::shader::{FlatShader, LightingLaw, Shader};
pub use renderer::texture::Texture;

/// Inicializa la librería y configura el logger (nivel en `RUST_LOG`)
pub fn init() {
    // Un segundo init (p. ej. desde tests) no es un error
    let _ = env_logger::try_init();
    log::info!("Inicializando rastro3d v{}", env!("CARGO_PKG_VERSION"));
}
