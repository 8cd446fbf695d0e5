//! Wavefront OBJ export of built scenes

use crate::Result;
use phantomas_core::{LineObject, MeshObject};
use phantomas_geometry::PhantomScene;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Writes every mesh and line of a scene as named OBJ objects
pub struct ObjWriter;

/// Running 1-based index bases shared by all objects in one file
#[derive(Default)]
struct Offsets {
    vertices: usize,
    normals: usize,
}

impl ObjWriter {
    pub fn write_scene<P: AsRef<Path>>(scene: &PhantomScene, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        Self::write_scene_to(scene, &mut writer)?;
        writer.flush()?;
        info!(
            path = %path.display(),
            vertices = scene.total_vertices(),
            faces = scene.total_faces(),
            "scene exported"
        );
        Ok(())
    }

    /// Object order: per fiber path then markers, then tubes, then regions
    pub fn write_scene_to<W: Write>(scene: &PhantomScene, writer: &mut W) -> Result<()> {
        writeln!(writer, "# phantomas scene")?;
        let mut offsets = Offsets::default();

        for (i, skeleton) in scene.skeletons.iter().enumerate() {
            Self::write_line(writer, &format!("skeleton_{}_path", i), &skeleton.line, &mut offsets)?;
            Self::write_mesh(writer, &format!("skeleton_{}_markers", i), &skeleton.spheres, &mut offsets)?;
        }
        for (i, tube) in scene.tubes.iter().enumerate() {
            Self::write_mesh(writer, &format!("tube_{}", i), &tube.mesh, &mut offsets)?;
        }
        for (i, region) in scene.regions.iter().enumerate() {
            Self::write_mesh(writer, &format!("region_{}", i), &region.mesh, &mut offsets)?;
        }
        Ok(())
    }

    fn write_mesh<W: Write>(
        writer: &mut W,
        name: &str,
        object: &MeshObject,
        offsets: &mut Offsets,
    ) -> Result<()> {
        writeln!(writer, "o {}", name)?;
        for v in object.world_vertices() {
            writeln!(writer, "v {} {} {}", v.x, v.y, v.z)?;
        }

        let mesh = &object.geometry;
        let vertex_normals = mesh
            .normals
            .as_ref()
            .filter(|normals| normals.len() == mesh.vertex_count());

        match vertex_normals {
            Some(normals) => {
                for n in normals {
                    writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
                }
                for face in &mesh.faces {
                    let [a, b, c] = face.map(|i| i + offsets.vertices + 1);
                    let [na, nb, nc] = face.map(|i| i + offsets.normals + 1);
                    writeln!(writer, "f {}//{} {}//{} {}//{}", a, na, b, nb, c, nc)?;
                }
                offsets.normals += normals.len();
            }
            None => {
                // One normal per face, shared by its three corners
                let face_normals = mesh.calculate_face_normals();
                for n in &face_normals {
                    writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
                }
                for (k, face) in mesh.faces.iter().enumerate() {
                    let [a, b, c] = face.map(|i| i + offsets.vertices + 1);
                    let n = k + offsets.normals + 1;
                    writeln!(writer, "f {}//{} {}//{} {}//{}", a, n, b, n, c, n)?;
                }
                offsets.normals += face_normals.len();
            }
        }

        offsets.vertices += mesh.vertex_count();
        Ok(())
    }

    fn write_line<W: Write>(
        writer: &mut W,
        name: &str,
        object: &LineObject,
        offsets: &mut Offsets,
    ) -> Result<()> {
        writeln!(writer, "o {}", name)?;
        let points = &object.geometry.points;
        for p in points {
            writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
        }

        if points.len() > 1 {
            write!(writer, "l")?;
            for i in 0..points.len() {
                write!(writer, " {}", i + offsets.vertices + 1)?;
            }
            writeln!(writer)?;
        }

        offsets.vertices += points.len();
        Ok(())
    }
}
