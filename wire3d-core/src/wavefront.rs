/// Parser for the minimal wavefront-style vertex/face text format
///
/// Two record kinds are understood: `v x y [z]` declares a vertex
/// (two coordinates get z = 0) and `f i j ...` declares a face of
/// 1-based vertex indices, implicitly closed by repeating its first
/// vertex. Blank lines and `#` comments are skipped; anything else
/// fails the whole import.
use nom::{
    character::complete::{char, digit1, space0, space1},
    combinator::{all_consuming, map_res, opt},
    multi::many1,
    number::complete::double,
    sequence::preceded,
    IResult,
};

use crate::error::{EngineError, EngineResult};
use crate::geometry::{Face, Geometry};
use nalgebra::{Point2, Point3};

/// Parse vertex/face text into geometry: `Solid` when faces are
/// present, otherwise a `Flat` polyline over the vertex list.
pub fn parse(input: &str) -> EngineResult<Geometry> {
    let mut vertices: Vec<Point3<f64>> = Vec::new();
    let mut face_indices: Vec<Vec<usize>> = Vec::new();

    for (number, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Ok((_, (x, y, z))) = all_consuming(parse_vertex)(line) {
            vertices.push(Point3::new(x, y, z.unwrap_or(0.0)));
        } else if let Ok((_, indices)) = all_consuming(parse_face)(line) {
            face_indices.push(indices);
        } else {
            return Err(EngineError::invalid_argument(format!(
                "malformed line {}: {raw:?}",
                number + 1
            )));
        }
    }

    if vertices.is_empty() {
        return Err(EngineError::invalid_argument(
            "mesh text declares no vertices",
        ));
    }

    if face_indices.is_empty() {
        return Ok(Geometry::Flat(
            vertices.iter().map(|v| Point2::new(v.x, v.y)).collect(),
        ));
    }

    let mut faces: Vec<Face> = Vec::with_capacity(face_indices.len());
    for indices in face_indices {
        let mut face: Face = Vec::with_capacity(indices.len() + 1);
        for index in &indices {
            let vertex = index
                .checked_sub(1)
                .and_then(|i| vertices.get(i))
                .ok_or_else(|| {
                    EngineError::invalid_argument(format!(
                        "face references missing vertex {index}"
                    ))
                })?;
            face.push(*vertex);
        }
        face.push(face[0]);
        faces.push(face);
    }
    Ok(Geometry::Solid(faces))
}

fn parse_vertex(input: &str) -> IResult<&str, (f64, f64, Option<f64>)> {
    let (input, _) = char('v')(input)?;
    let (input, x) = preceded(space1, double)(input)?;
    let (input, y) = preceded(space1, double)(input)?;
    let (input, z) = opt(preceded(space1, double))(input)?;
    let (input, _) = space0(input)?;
    Ok((input, (x, y, z)))
}

fn parse_face(input: &str) -> IResult<&str, Vec<usize>> {
    let (input, _) = char('f')(input)?;
    let (input, indices) = many1(preceded(space1, map_res(digit1, str::parse)))(input)?;
    let (input, _) = space0(input)?;
    Ok((input, indices))
}
