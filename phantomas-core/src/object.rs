//! Renderable objects handed to a scene graph
//!
//! A builder owns its objects and swaps their geometry in place on refresh;
//! `revision` counts those swaps so consumers can tell when a GPU upload
//! is stale.

use crate::{color::Color, mesh::TriangleMesh, point::*, polyline::Polyline};
use serde::{Deserialize, Serialize};

/// Shading model of a material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialKind {
    /// Unlit lines
    LineBasic,
    /// Unlit surfaces
    MeshBasic,
    /// Lit surfaces with specular highlights
    MeshPhong,
}

/// Which faces of a surface are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Side {
    #[default]
    Front,
    Back,
    Double,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Shading {
    #[default]
    Smooth,
    Flat,
}

/// Appearance of a renderable object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub kind: MaterialKind,
    pub color: Color,
    pub side: Side,
    pub shading: Shading,
    /// Blending enabled; the renderer decides how `opacity` is used
    pub transparent: bool,
    pub opacity: f32,
    pub line_width: f32,
}

impl Material {
    pub fn line_basic(color: Color) -> Self {
        Self {
            kind: MaterialKind::LineBasic,
            color,
            side: Side::Front,
            shading: Shading::Smooth,
            transparent: false,
            opacity: 1.0,
            line_width: 1.0,
        }
    }

    pub fn mesh_basic(color: Color) -> Self {
        Self {
            kind: MaterialKind::MeshBasic,
            ..Self::line_basic(color)
        }
    }

    pub fn mesh_phong(color: Color) -> Self {
        Self {
            kind: MaterialKind::MeshPhong,
            ..Self::line_basic(color)
        }
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    pub fn with_shading(mut self, shading: Shading) -> Self {
        self.shading = shading;
        self
    }

    pub fn with_transparency(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }
}

/// A triangle mesh placed in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshObject {
    pub geometry: TriangleMesh,
    pub material: Material,
    /// Translation applied to the geometry when drawn
    pub position: Point3f,
    pub revision: u64,
}

impl MeshObject {
    pub fn new(geometry: TriangleMesh, material: Material) -> Self {
        Self {
            geometry,
            material,
            position: Point3f::origin(),
            revision: 0,
        }
    }

    pub fn with_position(mut self, position: Point3f) -> Self {
        self.position = position;
        self
    }

    /// Swap in a regenerated buffer
    pub fn replace_geometry(&mut self, geometry: TriangleMesh) {
        self.geometry = geometry;
        self.revision += 1;
    }

    /// Vertices in scene coordinates
    pub fn world_vertices(&self) -> impl Iterator<Item = Point3f> + '_ {
        let offset = self.position.coords;
        self.geometry.vertices.iter().map(move |v| v + offset)
    }
}

/// A polyline placed in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineObject {
    pub geometry: Polyline,
    pub material: Material,
    pub revision: u64,
}

impl LineObject {
    pub fn new(geometry: Polyline, material: Material) -> Self {
        Self {
            geometry,
            material,
            revision: 0,
        }
    }

    pub fn replace_geometry(&mut self, geometry: Polyline) {
        self.geometry = geometry;
        self.revision += 1;
    }
}
