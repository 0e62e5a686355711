// Renderiza un OBJ (con textura opcional) a un fichero de imagen.
//
// Uso: render_obj [malla.obj] [textura.png] [salida.png]

use rastro3d::renderer::geometry::load_obj;
use rastro3d::renderer::io::{load_texture, save_framebuffer};
use rastro3d::{Pipeline, RenderConfig};
use std::error::Error;

const DEFAULT_MESH: &str = "obj/african_head.obj";
const DEFAULT_OUTPUT: &str = "output.png";

fn main() -> Result<(), Box<dyn Error>> {
    rastro3d::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mesh_path = args.first().map(String::as_str).unwrap_or(DEFAULT_MESH);
    let texture_path = args.get(1).filter(|p| !p.is_empty() && p.as_str() != "-");
    let output_path = args.get(2).map(String::as_str).unwrap_or(DEFAULT_OUTPUT);

    let mesh = load_obj(mesh_path)?;
    // Las texturas se guardan con el origen arriba; v = 0 es la fila inferior
    let texture = texture_path.map(|p| load_texture(p, true)).transpose()?;

    let pipeline = Pipeline::new(RenderConfig::default())?;
    let (framebuffer, stats) = pipeline.render(&mesh, texture.as_ref());
    println!(
        "{} caras, {} rasterizadas, {} píxeles escritos",
        stats.faces, stats.rasterized, stats.pixels_written
    );

    save_framebuffer(&framebuffer, output_path)?;
    Ok(())
}
