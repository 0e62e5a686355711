use crate::error::{RenderError, Result};
use crate::renderer::core::math::{Vector, Vector2};
use crate::renderer::geometry::{Face, FaceCorner, Mesh};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Carga un modelo OBJ simple (solo usa v, vt y f)
pub fn load_obj(path: impl AsRef<Path>) -> Result<Mesh> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mesh = parse_obj(BufReader::new(file))?;
    log::info!(
        "OBJ {:?}: {} vértices, {} caras, {} coordenadas de textura",
        path,
        mesh.get_vertex_count(),
        mesh.get_face_count(),
        mesh.tex_coords().len()
    );
    let name = path.file_stem().map(|s| s.to_string_lossy().into_owned());
    Ok(match name {
        Some(name) => mesh.with_name(name),
        None => mesh,
    })
}

/// Interpreta texto OBJ.
///
/// Las esquinas de cara admiten `v`, `v/vt`, `v//vn` y `v/vt/vn`; los
/// índices negativos son relativos al final. Los polígonos de más de tres
/// esquinas se triangulan en abanico. El resto de directivas se ignora.
pub fn parse_obj<R: BufRead>(reader: R) -> Result<Mesh> {
    let mut positions: Vec<Vector> = Vec::new();
    let mut texcoords: Vec<Vector2> = Vec::new();
    let mut faces: Vec<Face> = Vec::new();

    for (line_idx, line) in reader.lines().enumerate() {
        let line_no = line_idx + 1;
        let line = line?;
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }
        match parts[0] {
            "v" => {
                let coords = parse_floats(&parts[1..], 3, line_no)?;
                positions.push(Vector::new_with_values(coords[0], coords[1], coords[2]));
            }
            "vt" => {
                // La tercera componente (w) se descarta
                let coords = parse_floats(&parts[1..], 2, line_no)?;
                texcoords.push(Vector2::new(coords[0], coords[1]));
            }
            "f" => {
                if parts.len() < 4 {
                    return Err(parse_error(line_no, "una cara necesita al menos tres esquinas"));
                }
                let corners = parts[1..]
                    .iter()
                    .map(|token| parse_corner(token, positions.len(), texcoords.len(), line_no))
                    .collect::<Result<Vec<_>>>()?;
                for i in 1..corners.len() - 1 {
                    faces.push(Face::new([corners[0], corners[i], corners[i + 1]]));
                }
            }
            _ => {}
        }
    }

    Mesh::new(positions, texcoords, faces)
}

fn parse_error(line: usize, message: impl Into<String>) -> RenderError {
    RenderError::ObjParse {
        line,
        message: message.into(),
    }
}

fn parse_floats(tokens: &[&str], count: usize, line: usize) -> Result<Vec<f32>> {
    if tokens.len() < count {
        return Err(parse_error(
            line,
            format!("se esperaban {} números, hay {}", count, tokens.len()),
        ));
    }
    tokens[..count]
        .iter()
        .map(|t| {
            t.parse::<f32>()
                .map_err(|e| parse_error(line, format!("número inválido {:?}: {}", t, e)))
        })
        .collect()
}

fn parse_corner(
    token: &str,
    vertex_count: usize,
    texcoord_count: usize,
    line: usize,
) -> Result<FaceCorner> {
    let mut fields = token.split('/');
    let vertex = match fields.next() {
        Some(v) if !v.is_empty() => resolve_index(v, vertex_count, line)?,
        _ => return Err(parse_error(line, format!("esquina sin vértice: {:?}", token))),
    };
    let tex_coord = match fields.next() {
        Some(t) if !t.is_empty() => Some(resolve_index(t, texcoord_count, line)?),
        _ => None,
    };
    Ok(FaceCorner::new(vertex, tex_coord))
}

/// Índice OBJ (base 1, o negativo relativo al final) a índice base 0
fn resolve_index(token: &str, count: usize, line: usize) -> Result<usize> {
    let raw: i64 = token
        .parse()
        .map_err(|e| parse_error(line, format!("índice inválido {:?}: {}", token, e)))?;
    let resolved = if raw > 0 {
        raw - 1
    } else if raw < 0 {
        count as i64 + raw
    } else {
        return Err(parse_error(line, "los índices OBJ empiezan en 1"));
    };
    if resolved < 0 || resolved >= count as i64 {
        return Err(parse_error(
            line,
            format!("índice {} fuera de rango ({} elementos)", raw, count),
        ));
    }
    Ok(resolved as usize)
}
