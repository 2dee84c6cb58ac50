//! Triangle mesh data model and Wavefront OBJ loading.
//!
//! Attributes live in three independent arrays. Each face corner carries its
//! own index into each of them, so one position can be shared by corners with
//! different texture coordinates or normals (UV seams, hard edges).
//!
//! # Missing attributes
//!
//! Slot 0 of the texcoord and normal arrays always holds a zero placeholder
//! and [`Corner::MISSING`] points at it. A corner without a texcoord samples
//! UV (0, 0); a corner without a normal gets zero intensity.

use std::io::{BufRead, Read};
use std::path::Path;

use crate::error::Error;
use crate::math::{Mat4, Vec2, Vec3};

/// Indices of one triangle corner into the mesh attribute arrays (0-based).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Corner {
    pub position: usize,
    pub texcoord: usize,
    pub normal: usize,
}

impl Corner {
    /// Index of the zero placeholder in the texcoord and normal arrays.
    pub const MISSING: usize = 0;

    pub const fn new(position: usize, texcoord: usize, normal: usize) -> Self {
        Self {
            position,
            texcoord,
            normal,
        }
    }

    /// A corner with only a position; texcoord and normal use the placeholder.
    pub const fn position_only(position: usize) -> Self {
        Self::new(position, Self::MISSING, Self::MISSING)
    }
}

/// A triangle made of three corners.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Face {
    pub corners: [Corner; 3],
}

impl Face {
    pub const fn new(a: Corner, b: Corner, c: Corner) -> Self {
        Self { corners: [a, b, c] }
    }
}

/// A triangle mesh plus its model transform.
///
/// Face indices are trusted: drawing a face that points past the end of an
/// attribute array panics.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    positions: Vec<Vec3>,
    texcoords: Vec<Vec2>,
    normals: Vec<Vec3>,
    faces: Vec<Face>,
    model_matrix: Mat4,
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

impl Mesh {
    /// Creates an empty mesh: no positions or faces, placeholders only.
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            texcoords: vec![Vec2::ZERO],
            normals: vec![Vec3::ZERO],
            faces: Vec::new(),
            model_matrix: Mat4::identity(),
        }
    }

    /// Loads an OBJ file, returning an empty mesh if anything goes wrong.
    ///
    /// Loading is all-or-nothing: a single malformed line anywhere discards
    /// the whole file. The cause is logged at `warn`.
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Self {
        Self::try_from_obj(path).unwrap_or_else(|err| {
            tracing::warn!(error = %err, cause = ?std::error::Error::source(&err), "using empty mesh");
            Self::new()
        })
    }

    /// Loads an OBJ file, reporting why it could not be loaded.
    pub fn try_from_obj<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let mesh = std::fs::read_to_string(path)
            .map_err(|_| tobj::LoadError::OpenFileFailed)
            .and_then(|text| Self::parse_obj_text(&text))
            .map_err(|source| Error::Mesh {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(
            path = %path.display(),
            positions = mesh.positions.len(),
            faces = mesh.faces.len(),
            "loaded mesh"
        );
        Ok(mesh)
    }

    /// Parses OBJ text from a reader. Material libraries are not loaded.
    pub fn parse_obj<R: BufRead>(reader: &mut R) -> Result<Self, tobj::LoadError> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|_| tobj::LoadError::ReadError)?;
        Self::parse_obj_text(&text)
    }

    fn parse_obj_text(text: &str) -> Result<Self, tobj::LoadError> {
        let loaded = tobj::load_obj_buf(&mut text.as_bytes(), &load_options(), |_| {
            Err(tobj::LoadError::OpenFileFailed)
        });
        Self::from_tobj(loaded, &scan_face_attributes(text))
    }

    /// Merges every object of a tobj result into one mesh.
    ///
    /// tobj fills the index of a missing `vt`/`vn` with its neighbour's, so
    /// whether a face really has texcoords or normals comes from
    /// `attributes`: one entry per triangle, in file order.
    fn from_tobj(
        loaded: tobj::LoadResult,
        attributes: &[FaceAttributes],
    ) -> Result<Self, tobj::LoadError> {
        let (models, _materials) = loaded?;

        let triangle_count: usize = models.iter().map(|m| m.mesh.indices.len() / 3).sum();
        let attributes: &[FaceAttributes] = if attributes.len() == triangle_count {
            attributes
        } else {
            tracing::warn!(
                scanned = attributes.len(),
                loaded = triangle_count,
                "face records do not line up with loaded triangles, dropping texcoords and normals"
            );
            &[]
        };

        let mut mesh = Self::new();
        let mut triangle = 0;
        for model in models {
            let source = model.mesh;
            let position_base = mesh.positions.len();
            let texcoord_base = mesh.texcoords.len();
            let normal_base = mesh.normals.len();

            mesh.positions.extend(
                source
                    .positions
                    .chunks_exact(3)
                    .map(|p| Vec3::new(p[0], p[1], p[2])),
            );
            mesh.texcoords.extend(
                source
                    .texcoords
                    .chunks_exact(2)
                    .map(|t| Vec2::new(t[0], t[1])),
            );
            mesh.normals.extend(
                source
                    .normals
                    .chunks_exact(3)
                    .map(|n| Vec3::new(n[0], n[1], n[2]).normalize_or_zero()),
            );

            let corner_count = source.indices.len();
            let has_texcoords = source.texcoord_indices.len() == corner_count;
            let has_normals = source.normal_indices.len() == corner_count;

            for f in 0..corner_count / 3 {
                let present = attributes.get(triangle).copied().unwrap_or_default();
                triangle += 1;

                let corner = |i: usize| Corner {
                    position: position_base + source.indices[i] as usize,
                    texcoord: if present.texcoord && has_texcoords {
                        texcoord_base + source.texcoord_indices[i] as usize
                    } else {
                        Corner::MISSING
                    },
                    normal: if present.normal && has_normals {
                        normal_base + source.normal_indices[i] as usize
                    } else {
                        Corner::MISSING
                    },
                };
                mesh.faces
                    .push(Face::new(corner(3 * f), corner(3 * f + 1), corner(3 * f + 2)));
            }
        }

        Ok(mesh)
    }

    // ============ Building ============

    /// Appends a position and returns its index.
    pub fn push_position(&mut self, position: Vec3) -> usize {
        self.positions.push(position);
        self.positions.len() - 1
    }

    /// Appends a texture coordinate and returns its index (never the placeholder).
    pub fn push_texcoord(&mut self, texcoord: Vec2) -> usize {
        self.texcoords.push(texcoord);
        self.texcoords.len() - 1
    }

    /// Appends a normal, normalizing it, and returns its index.
    pub fn push_normal(&mut self, normal: Vec3) -> usize {
        self.normals.push(normal.normalize_or_zero());
        self.normals.len() - 1
    }

    pub fn push_face(&mut self, face: Face) {
        self.faces.push(face);
    }

    // ============ Access ============

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Texture coordinates, including the placeholder at index 0.
    pub fn texcoords(&self) -> &[Vec2] {
        &self.texcoords
    }

    /// Normals, including the placeholder at index 0.
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.model_matrix
    }

    pub fn set_model_matrix(&mut self, model_matrix: Mat4) -> &mut Self {
        self.model_matrix = model_matrix;
        self
    }
}

/// Which attributes one triangle's face record references.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct FaceAttributes {
    texcoord: bool,
    normal: bool,
}

/// Reads the `f` records of OBJ text, one entry per triangle they
/// triangulate into (a polygon of n corners gives n - 2).
///
/// A face has an attribute only if every one of its corners names it.
fn scan_face_attributes(text: &str) -> Vec<FaceAttributes> {
    let mut triangles = Vec::new();
    for line in text.lines() {
        let line = line.split_once('#').map_or(line, |(body, _)| body);
        let mut words = line.split_whitespace();
        if words.next() != Some("f") {
            continue;
        }
        let corners: Vec<&str> = words.collect();
        if corners.len() < 3 {
            continue;
        }
        let names = |field: usize| {
            corners
                .iter()
                .all(|c| c.split('/').nth(field).is_some_and(|index| !index.is_empty()))
        };
        let face = FaceAttributes {
            texcoord: names(1),
            normal: names(2),
        };
        triangles.extend(std::iter::repeat(face).take(corners.len() - 2));
    }
    triangles
}

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: false,
        triangulate: true,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(text: &str) -> Result<Mesh, tobj::LoadError> {
        Mesh::parse_obj(&mut Cursor::new(text))
    }

    const QUAD: &str = "\
# a unit quad
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0

vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 2
f 1/1/1 2/2/1 3/3/1 4/4/1
";

    #[test]
    fn new_mesh_has_only_placeholders() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert!(mesh.positions().is_empty());
        assert_eq!(mesh.texcoords(), &[Vec2::ZERO]);
        assert_eq!(mesh.normals(), &[Vec3::ZERO]);
        assert_eq!(mesh.model_matrix(), Mat4::identity());
    }

    #[test]
    fn pushed_attributes_start_after_placeholder() {
        let mut mesh = Mesh::new();
        assert_eq!(mesh.push_position(Vec3::ONE), 0);
        assert_eq!(mesh.push_texcoord(Vec2::ONE), 1);
        assert_eq!(mesh.push_normal(Vec3::new(0.0, 3.0, 0.0)), 1);
        assert_eq!(mesh.normals()[1], Vec3::UP);
    }

    #[test]
    fn loads_quad_as_two_triangles_with_offset_attributes() {
        let mesh = parse(QUAD).expect("valid obj");
        assert_eq!(mesh.positions().len(), 4);
        assert_eq!(mesh.texcoords().len(), 5);
        assert_eq!(mesh.face_count(), 2);

        for face in mesh.faces() {
            for corner in face.corners {
                assert_ne!(corner.texcoord, Corner::MISSING);
                assert_eq!(corner.normal, 1);
                let uv = mesh.texcoords()[corner.texcoord];
                let p = mesh.positions()[corner.position];
                assert_eq!((uv.x, uv.y), (p.x, p.y));
            }
        }
        // Normals are normalized on load.
        assert_eq!(mesh.normals()[1], Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn merges_objects_with_their_own_attributes() {
        let mesh = parse(
            "\
o a
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vt 1 0
vt 0 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1
o b
v 5 5 5
v 6 5 5
v 5 6 5
vt 0.5 0.5
vt 0.75 0.5
vt 0.5 0.75
vn 0 1 0
f 4/4/2 5/5/2 6/6/2
",
        )
        .expect("valid obj");
        assert_eq!(mesh.positions().len(), 6);
        assert_eq!(mesh.face_count(), 2);

        let second = mesh.faces()[1].corners;
        let positions = second.map(|c| mesh.positions()[c.position]);
        assert_eq!(positions, [
            Vec3::new(5.0, 5.0, 5.0),
            Vec3::new(6.0, 5.0, 5.0),
            Vec3::new(5.0, 6.0, 5.0),
        ]);
        let uvs = second.map(|c| mesh.texcoords()[c.texcoord]);
        assert_eq!(uvs, [
            Vec2::new(0.5, 0.5),
            Vec2::new(0.75, 0.5),
            Vec2::new(0.5, 0.75),
        ]);
        assert!(second.iter().all(|c| mesh.normals()[c.normal] == Vec3::UP));

        let first = mesh.faces()[0].corners;
        assert_eq!(mesh.texcoords()[first[1].texcoord], Vec2::new(1.0, 0.0));
        assert_eq!(mesh.normals()[first[0].normal], Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn face_without_texcoords_next_to_one_with_them() {
        let mesh = parse(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nvt 0 0\nvt 1 0\nvt 0.75 0.25\n\
             f 1/1 2/2 3/3\nf 2 4 3\n",
        )
        .expect("valid obj");

        let [textured, bare] = [mesh.faces()[0], mesh.faces()[1]];
        assert_eq!(mesh.texcoords()[textured.corners[2].texcoord], Vec2::new(0.75, 0.25));
        for corner in bare.corners {
            assert_eq!(corner.texcoord, Corner::MISSING);
            assert_eq!(corner.normal, Corner::MISSING);
        }
    }

    #[test]
    fn face_with_texcoords_after_one_without() {
        let mesh = parse(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nvt 0 0\nvt 1 0\nvt 0.75 0.25\n\
             f 1 2 3\nf 2/1 4/2 3/3\n",
        )
        .expect("valid obj");

        assert!(mesh.faces()[0].corners.iter().all(|c| c.texcoord == Corner::MISSING));
        let uvs = mesh.faces()[1].corners.map(|c| mesh.texcoords()[c.texcoord]);
        assert_eq!(uvs, [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.75, 0.25)]);
    }

    #[test]
    fn face_without_normals_next_to_one_with_them() {
        let mesh = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nvn 0 0 1\nf 1//1 2//1 3//1\nf 2 4 3\n")
            .expect("valid obj");

        assert!(mesh.faces()[0]
            .corners
            .iter()
            .all(|c| mesh.normals()[c.normal] == Vec3::new(0.0, 0.0, 1.0)));
        assert!(mesh.faces()[1].corners.iter().all(|c| c.normal == Corner::MISSING));
    }

    #[test]
    fn scans_one_record_per_triangle() {
        let text = "f 1/1 2/2 3/3 4/4 # a quad\nf 1//1 2//1 3//1\nf 1/1/1 2/2 3/3/3\nl 1 2\n";
        let present = |texcoord, normal| FaceAttributes { texcoord, normal };
        assert_eq!(scan_face_attributes(text), vec![
            present(true, false),
            present(true, false),
            present(false, true),
            present(true, false),
        ]);
    }

    #[test]
    fn faces_without_attributes_use_placeholder() {
        let mesh = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").expect("valid obj");
        assert_eq!(mesh.faces(), &[Face::new(
            Corner::position_only(0),
            Corner::position_only(1),
            Corner::position_only(2),
        )]);
    }

    #[test]
    fn position_normal_faces_skip_texcoords() {
        let mesh = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1\n")
            .expect("valid obj");
        let corner = mesh.faces()[0].corners[2];
        assert_eq!(corner, Corner::new(2, Corner::MISSING, 1));
    }

    #[test]
    fn empty_input_is_an_empty_mesh() {
        let mesh = parse("").expect("empty obj is valid");
        assert!(mesh.is_empty());
        assert!(mesh.positions().is_empty());
    }

    #[test]
    fn malformed_vertex_rejects_whole_file() {
        assert!(parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\nv 1\n").is_err());
    }

    #[test]
    fn missing_file_yields_empty_mesh() {
        let mesh = Mesh::from_obj("does/not/exist.obj");
        assert!(mesh.is_empty());
        assert!(mesh.positions().is_empty());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Mesh::try_from_obj("does/not/exist.obj").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.obj"));
    }
}
