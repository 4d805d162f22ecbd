//! Wavefront OBJ mesh loader.
//!
//! Supports the subset the pipeline consumes: `v` vertex positions and `f`
//! faces with 3 or 4 one-based indices, with `a/b/c` index groups accepted
//! (texture and normal references are dropped). Everything else in the
//! file is ignored.

use std::path::{Path, PathBuf};

use nom::{
    character::complete::{char, digit1, multispace0, multispace1},
    combinator::{map_res, opt},
    multi::separated_list1,
    number::complete::float,
    sequence::{preceded, tuple},
    IResult,
};
use thiserror::Error;

use crate::entity::Face;
use crate::math::Vec3;

#[derive(Debug, Error)]
pub enum MeshError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("face references vertex {index} but the mesh has {count}")]
    IndexOutOfRange { index: usize, count: usize },
}

/// Raw geometry ready to become an [`crate::entity::Entity`].
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub points: Vec<Vec3>,
    pub faces: Vec<Face>,
    pub centers: Vec<Vec3>,
}

pub fn load_obj(path: &Path) -> Result<MeshData, MeshError> {
    let text = std::fs::read_to_string(path).map_err(|source| MeshError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mesh = parse_obj(&text)?;
    log::info!(
        "loaded {}: {} vertices, {} faces",
        path.display(),
        mesh.points.len(),
        mesh.faces.len()
    );
    Ok(mesh)
}

/// Parses OBJ text. An input with no geometry yields a valid empty mesh.
pub fn parse_obj(input: &str) -> Result<MeshData, MeshError> {
    let mut points = Vec::new();
    let mut faces = Vec::new();

    for (i, line) in input.lines().enumerate() {
        let line = line.trim();
        let lineno = i + 1;

        if line.starts_with("v ") || line == "v" {
            let (_, point) = parse_vertex(line).map_err(|e| MeshError::Parse {
                line: lineno,
                message: format!("{e:?}"),
            })?;
            points.push(point);
        } else if line.starts_with("f ") || line == "f" {
            let (_, indices) = parse_face(line).map_err(|e| MeshError::Parse {
                line: lineno,
                message: format!("{e:?}"),
            })?;
            if indices.len() != 3 && indices.len() != 4 {
                return Err(MeshError::Parse {
                    line: lineno,
                    message: format!("face with {} indices, expected 3 or 4", indices.len()),
                });
            }
            faces.push(indices);
        }
        // Comments, vt/vn, object and material statements are skipped.
    }

    // Indices may reference vertices declared after the face, so resolve
    // them only once the whole file is read.
    let mut resolved = Vec::with_capacity(faces.len());
    for indices in faces {
        let mut face = Vec::with_capacity(indices.len());
        for index in indices {
            if index == 0 || index > points.len() {
                return Err(MeshError::IndexOutOfRange {
                    index,
                    count: points.len(),
                });
            }
            face.push(index - 1);
        }
        resolved.push(Face::new(face));
    }

    let centers = face_centers(&points, &resolved);
    Ok(MeshData {
        points,
        faces: resolved,
        centers,
    })
}

/// Midpoint of each face's 0/2 diagonal.
pub fn face_centers(points: &[Vec3], faces: &[Face]) -> Vec<Vec3> {
    faces
        .iter()
        .map(|face| {
            let a = points[face.points[0]];
            let c = points[face.points[2]];
            (a - c) * 0.5 + c
        })
        .collect()
}

fn parse_vertex(input: &str) -> IResult<&str, Vec3> {
    let (input, _) = char('v')(input)?;
    let (input, _) = multispace1(input)?;
    let (input, x) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, y) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, z) = float(input)?;
    Ok((input, Vec3::new(x, y, z)))
}

fn parse_face(input: &str) -> IResult<&str, Vec<usize>> {
    let (input, _) = char('f')(input)?;
    let (input, _) = multispace1(input)?;
    let (input, indices) = separated_list1(multispace1, parse_face_index)(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, indices))
}

/// One face corner: a vertex index optionally followed by `/vt` and `/vn`
/// references, which are parsed and dropped.
fn parse_face_index(input: &str) -> IResult<&str, usize> {
    let (input, index) = map_res(digit1, str::parse::<usize>)(input)?;
    let (input, _) = opt(tuple((
        char('/'),
        opt(digit1),
        opt(preceded(char('/'), digit1)),
    )))(input)?;
    Ok((input, index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_triangles_and_quads() {
        let input = "\
# comment
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3
f 1 2 3 4
";
        let mesh = parse_obj(input).unwrap();
        assert_eq!(mesh.points.len(), 4);
        assert_eq!(mesh.faces.len(), 2);
        assert_eq!(mesh.faces[0].points, vec![0, 1, 2]);
        assert_eq!(mesh.faces[1].points, vec![0, 1, 2, 3]);
        // Midpoint of the 0/2 diagonal of the quad.
        assert_eq!(mesh.centers[1], Vec3::new(0.5, 0.5, 0.0));
    }

    #[test]
    fn test_parse_slash_index_groups() {
        let input = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vn 0 0 1
f 1/1/1 2/1/1 3/1/1
";
        let mesh = parse_obj(input).unwrap();
        assert_eq!(mesh.faces[0].points, vec![0, 1, 2]);
    }

    #[test]
    fn test_out_of_range_index() {
        let input = "v 0 0 0\nf 1 2 3\n";
        match parse_obj(input) {
            Err(MeshError::IndexOutOfRange { index: 2, count: 1 }) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_empty_input_is_empty_mesh() {
        let mesh = parse_obj("").unwrap();
        assert!(mesh.points.is_empty());
        assert!(mesh.faces.is_empty());
    }

    #[test]
    fn test_bad_face_arity() {
        let input = "v 0 0 0\nv 1 0 0\nf 1 2\n";
        assert!(matches!(
            parse_obj(input),
            Err(MeshError::Parse { line: 3, .. })
        ));
    }
}
