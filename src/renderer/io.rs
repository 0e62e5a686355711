// Lectura de texturas y escritura del framebuffer con el crate `image`
use crate::error::Result;
use crate::renderer::core::framebuffer::FrameBuffer;
use crate::renderer::texture::Texture;
use image::{imageops, Rgb, RgbImage, RgbaImage};
use std::path::Path;

/// Carga una imagen de disco como textura RGBA8.
///
/// Con `flip_vertical` la última fila del fichero pasa a ser la fila 0, de
/// modo que `v = 0` direcciona la parte inferior de la imagen.
pub fn load_texture(path: impl AsRef<Path>, flip_vertical: bool) -> Result<Texture> {
    let path = path.as_ref();
    let mut rgba = image::open(path)?.to_rgba8();
    if flip_vertical {
        imageops::flip_vertical_in_place(&mut rgba);
    }
    let texture = texture_from_rgba(rgba)?;
    log::info!("Textura {:?}: {}x{}", path, texture.width(), texture.height());
    Ok(texture)
}

pub fn texture_from_rgba(image: RgbaImage) -> Result<Texture> {
    let (w, h) = image.dimensions();
    Texture::new(w, h, image.into_raw())
}

/// Copia el framebuffer a una imagen RGB. Con `flip_vertical` la fila 0
/// del framebuffer queda abajo (origen en la esquina inferior izquierda).
pub fn framebuffer_to_image(framebuffer: &FrameBuffer, flip_vertical: bool) -> RgbImage {
    let mut img = RgbImage::from_fn(framebuffer.width(), framebuffer.height(), |x, y| {
        // Las coordenadas vienen de las dimensiones del propio framebuffer
        let color = framebuffer.color_at(x, y).unwrap_or_default();
        Rgb(color.to_array())
    });
    if flip_vertical {
        imageops::flip_vertical_in_place(&mut img);
    }
    img
}

/// Guarda el framebuffer con el origen abajo a la izquierda; el formato se
/// deduce de la extensión.
pub fn save_framebuffer(framebuffer: &FrameBuffer, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    framebuffer_to_image(framebuffer, true).save(path)?;
    log::info!(
        "Imagen guardada en {:?} ({}x{})",
        path,
        framebuffer.width(),
        framebuffer.height()
    );
    Ok(())
}
