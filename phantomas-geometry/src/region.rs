//! Region representation: sphere mesh for an isotropic region

use crate::config::RegionConfig;
use crate::source::{validate_region, RegionSource};
use crate::sphere::SphereGeometry;
use phantomas_core::{Color, Material, MeshObject, Point3f, Result, Shading, TriangleMesh};
use tracing::{debug, trace};

/// Sphere mesh placed at a region's center
#[derive(Debug, Clone)]
pub struct RegionSphere {
    /// Geometry is centered on the origin; `mesh.position` carries the center
    pub mesh: MeshObject,
    color: Color,
    config: RegionConfig,
}

impl RegionSphere {
    pub fn build<R: RegionSource + ?Sized>(region: &R, config: &RegionConfig, color: Color) -> Result<Self> {
        validate_region(region)?;
        let geometry = tessellate(region, config)?;

        let material = Material::mesh_phong(color)
            .with_shading(Shading::Flat)
            .with_transparency(true);
        let mesh = MeshObject::new(geometry, material).with_position(region.center());

        debug!(
            radius = region.radius(),
            width = config.width_segments,
            height = config.height_segments,
            "built region sphere"
        );

        Ok(Self {
            mesh,
            color,
            config: *config,
        })
    }

    /// Rebuild with the current radius and move to the current center.
    /// On error the sphere is left as it was.
    pub fn refresh<R: RegionSource + ?Sized>(&mut self, region: &R) -> Result<()> {
        let update = self.prepare(region)?;
        self.apply(update);
        Ok(())
    }

    pub(crate) fn prepare<R: RegionSource + ?Sized>(&self, region: &R) -> Result<RegionUpdate> {
        validate_region(region)?;
        Ok(RegionUpdate {
            geometry: tessellate(region, &self.config)?,
            center: region.center(),
        })
    }

    pub(crate) fn apply(&mut self, update: RegionUpdate) {
        self.mesh.replace_geometry(update.geometry);
        self.mesh.position = update.center;
        trace!(revision = self.mesh.revision, "refreshed region sphere");
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn config(&self) -> &RegionConfig {
        &self.config
    }
}

/// A tessellated sphere and its new position
#[derive(Debug)]
pub(crate) struct RegionUpdate {
    geometry: TriangleMesh,
    center: Point3f,
}

fn tessellate<R: RegionSource + ?Sized>(region: &R, config: &RegionConfig) -> Result<TriangleMesh> {
    let sphere = SphereGeometry::new(region.radius(), config.width_segments, config.height_segments)?;
    Ok(sphere.to_mesh())
}
