/// Errores que puede producir la librería.
///
/// Los problemas geométricos (triángulos degenerados, píxeles fuera de
/// pantalla, texeles fuera de rango) se resuelven localmente y nunca
/// llegan aquí; solo los recursos externos y la configuración fallan.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Error de E/S al leer o escribir ficheros.
    #[error("Error de E/S: {0}")]
    Io(#[from] std::io::Error),

    /// Error al decodificar o codificar una imagen.
    #[error("Error de imagen: {0}")]
    Image(#[from] image::ImageError),

    /// Línea mal formada en un fichero OBJ.
    #[error("Error en OBJ, línea {line}: {message}")]
    ObjParse { line: usize, message: String },

    /// La malla referencia índices inexistentes.
    #[error("Malla inválida: {0}")]
    InvalidMesh(String),

    /// Datos de textura incoherentes con sus dimensiones.
    #[error("Textura inválida: {0}")]
    InvalidTexture(String),

    /// Parámetros de renderizado fuera de rango.
    #[error("Configuración inválida: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;
