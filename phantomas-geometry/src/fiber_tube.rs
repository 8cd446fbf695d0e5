//! Tube representation: swept surface around the fiber path

use crate::config::TubeConfig;
use crate::curve::FiberCurve;
use crate::source::{validate_fiber, FiberSource};
use crate::tube::TubeGeometry;
use phantomas_core::{Color, Material, MeshObject, Result, Shading, Side, TriangleMesh};
use tracing::{debug, trace};

/// Tube mesh following a fiber at the fiber's radius
#[derive(Debug, Clone)]
pub struct FiberTube {
    /// Ready to hand to a scene
    pub mesh: MeshObject,
    color: Color,
    radius: f32,
    config: TubeConfig,
}

impl FiberTube {
    pub fn build<F: FiberSource + ?Sized>(fiber: &F, config: &TubeConfig, color: Color) -> Result<Self> {
        validate_fiber(fiber)?;
        let radius = resolve_radius(fiber, config);
        let geometry = sweep(fiber, config, radius)?;

        let material = Material::mesh_phong(color)
            .with_shading(Shading::Flat)
            .with_side(Side::Double)
            .with_transparency(true);

        debug!(
            radius,
            axial = config.axial_segments,
            radial = config.radial_segments,
            "built fiber tube"
        );

        Ok(Self {
            mesh: MeshObject::new(geometry, material),
            color,
            radius,
            config: *config,
        })
    }

    /// Re-sweep along the current path with the current radius.
    /// On error the tube is left as it was.
    pub fn refresh<F: FiberSource + ?Sized>(&mut self, fiber: &F) -> Result<()> {
        let update = self.prepare(fiber)?;
        self.apply(update);
        Ok(())
    }

    pub(crate) fn prepare<F: FiberSource + ?Sized>(&self, fiber: &F) -> Result<TubeUpdate> {
        validate_fiber(fiber)?;
        let radius = resolve_radius(fiber, &self.config);
        Ok(TubeUpdate {
            geometry: sweep(fiber, &self.config, radius)?,
            radius,
        })
    }

    pub(crate) fn apply(&mut self, update: TubeUpdate) {
        self.radius = update.radius;
        self.mesh.replace_geometry(update.geometry);
        trace!(radius = self.radius, revision = self.mesh.revision, "refreshed fiber tube");
    }

    /// Radius the current geometry was swept with
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn config(&self) -> &TubeConfig {
        &self.config
    }
}

/// A swept tube waiting to replace the current one
#[derive(Debug)]
pub(crate) struct TubeUpdate {
    geometry: TriangleMesh,
    radius: f32,
}

fn resolve_radius<F: FiberSource + ?Sized>(fiber: &F, config: &TubeConfig) -> f32 {
    fiber.radius().unwrap_or(config.default_radius)
}

fn sweep<F: FiberSource + ?Sized>(fiber: &F, config: &TubeConfig, radius: f32) -> Result<TriangleMesh> {
    let tube = TubeGeometry::new(config.axial_segments, radius, config.radial_segments)?;
    Ok(tube.build(&FiberCurve::new(fiber)))
}
