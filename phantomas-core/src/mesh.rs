//! Mesh data structures and functionality

use crate::point::*;
use crate::transform::Transform3D;
use serde::{Deserialize, Serialize};

/// A triangle mesh with vertices and faces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: Vec<Point3f>,
    pub faces: Vec<[usize; 3]>,
    pub normals: Option<Vec<Vector3f>>,
}

impl TriangleMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            normals: None,
        }
    }

    /// Create an empty mesh with room for the given number of vertices and faces
    pub fn with_capacity(vertices: usize, faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            faces: Vec::with_capacity(faces),
            normals: None,
        }
    }

    /// Create a mesh from vertices and faces
    pub fn from_vertices_and_faces(vertices: Vec<Point3f>, faces: Vec<[usize; 3]>) -> Self {
        Self {
            vertices,
            faces,
            normals: None,
        }
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Add a vertex to the mesh
    pub fn add_vertex(&mut self, vertex: Point3f) -> usize {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    /// Add a face to the mesh
    pub fn add_face(&mut self, face: [usize; 3]) {
        self.faces.push(face);
    }

    /// Flat `[x, y, z, ...]` view of the vertex buffer
    pub fn positions(&self) -> &[f32] {
        flatten_points(&self.vertices)
    }

    /// Unit normal per face; degenerate faces get the zero vector
    pub fn calculate_face_normals(&self) -> Vec<Vector3f> {
        self.faces
            .iter()
            .map(|face| {
                let v0 = self.vertices[face[0]];
                let v1 = self.vertices[face[1]];
                let v2 = self.vertices[face[2]];

                let edge1 = v1 - v0;
                let edge2 = v2 - v0;

                edge1.cross(&edge2).try_normalize(f32::EPSILON).unwrap_or_else(Vector3f::zeros)
            })
            .collect()
    }

    /// Set vertex normals
    pub fn set_normals(&mut self, normals: Vec<Vector3f>) {
        if normals.len() == self.vertices.len() {
            self.normals = Some(normals);
        }
    }

    /// Append `other` to this mesh after applying `transform` to it.
    ///
    /// Faces of `other` are reindexed past the existing vertices. Vertex
    /// normals survive only when both meshes carry them (an empty
    /// receiver adopts whatever `other` has).
    pub fn merge(&mut self, other: &TriangleMesh, transform: &Transform3D) {
        let offset = self.vertices.len();
        let adopt = offset == 0;

        self.vertices.reserve(other.vertices.len());
        self.vertices
            .extend(other.vertices.iter().map(|v| transform.transform_point(v)));
        self.faces.extend(
            other
                .faces
                .iter()
                .map(|f| [f[0] + offset, f[1] + offset, f[2] + offset]),
        );

        self.normals = match (self.normals.take(), &other.normals) {
            (Some(mut own), Some(theirs)) => {
                own.extend(theirs.iter().map(|n| transform.transform_normal(n)));
                Some(own)
            }
            (None, Some(theirs)) if adopt => Some(
                theirs.iter().map(|n| transform.transform_normal(n)).collect(),
            ),
            _ => None,
        };
    }
}

impl Default for TriangleMesh {
    fn default() -> Self {
        Self::new()
    }
}
