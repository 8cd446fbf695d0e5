//! Whole-phantom assembly

use crate::config::{DiscretizationConfig, MeshConstraints};
use crate::fiber_tube::FiberTube;
use crate::region::RegionSphere;
use crate::skeleton::FiberSkeleton;
use crate::source::{FiberSource, HermiteFiber, IsotropicRegion};
use phantomas_core::{bounds_of, ColorStrategy, Drawable, Error, LineObject, MeshObject, Point3f, Result};
use tracing::{debug, info};

/// Camera placement multiplier applied to the phantom diameter
const VIEWING_MARGIN: f32 = 1.5;

/// Fibers and isotropic regions making up a phantom
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Phantom {
    pub fibers: Vec<HermiteFiber>,
    pub regions: Vec<IsotropicRegion>,
}

impl Phantom {
    pub fn new(fibers: Vec<HermiteFiber>, regions: Vec<IsotropicRegion>) -> Self {
        Self { fibers, regions }
    }

    pub fn is_empty(&self) -> bool {
        self.fibers.is_empty() && self.regions.is_empty()
    }

    /// Radius of the origin-centered ball holding every control point
    /// (padded by the fiber radius) and every region
    pub fn radius(&self) -> f32 {
        let fibers = self.fibers.iter().flat_map(|fiber| {
            let pad = fiber.radius().unwrap_or(0.0);
            fiber.control_points().iter().map(move |p| p.coords.norm() + pad)
        });
        let regions = self
            .regions
            .iter()
            .map(|region| region.center.coords.norm() + region.radius);

        fibers.chain(regions).fold(0.0, f32::max)
    }

    /// Distance from the origin at which the whole phantom fits in view
    pub fn viewing_distance(&self) -> f32 {
        self.radius() * 2.0 * VIEWING_MARGIN
    }
}

/// Every representation of a phantom, in source order
#[derive(Debug, Clone, Default)]
pub struct PhantomScene {
    pub skeletons: Vec<FiberSkeleton>,
    pub tubes: Vec<FiberTube>,
    pub regions: Vec<RegionSphere>,
}

impl PhantomScene {
    /// Build a skeleton and a tube per fiber and a sphere per region.
    ///
    /// Colors are drawn from `colors` with a running key: skeleton, then
    /// tube for each fiber, then each region.
    pub fn build(
        phantom: &Phantom,
        config: &DiscretizationConfig,
        colors: &mut dyn ColorStrategy,
    ) -> Result<Self> {
        let mut key = 0;
        let mut next_color = || {
            let color = colors.pick(key);
            key += 1;
            color
        };

        let mut scene = Self::default();
        for (index, fiber) in phantom.fibers.iter().enumerate() {
            debug!(index, "building fiber representations");
            scene
                .skeletons
                .push(FiberSkeleton::build(fiber, &config.skeleton, next_color())?);
            scene.tubes.push(FiberTube::build(fiber, &config.tube, next_color())?);
        }
        for region in &phantom.regions {
            scene
                .regions
                .push(RegionSphere::build(region, &config.region, next_color())?);
        }

        info!(
            fibers = scene.tubes.len(),
            regions = scene.regions.len(),
            vertices = scene.total_vertices(),
            faces = scene.total_faces(),
            "phantom scene built"
        );
        Ok(scene)
    }

    /// Build with per-mesh resolutions shared out from `constraints`
    pub fn build_budgeted(
        phantom: &Phantom,
        constraints: &MeshConstraints,
        colors: &mut dyn ColorStrategy,
    ) -> Result<Self> {
        let config = constraints.budget(phantom.fibers.len(), phantom.regions.len());
        Self::build(phantom, &config, colors)
    }

    /// Refresh every representation from the phantom's current state.
    ///
    /// All new buffers are computed first; if any source is rejected the
    /// scene is left exactly as it was.
    pub fn refresh(&mut self, phantom: &Phantom) -> Result<()> {
        self.check_shape(phantom)?;

        let fibers = phantom
            .fibers
            .iter()
            .enumerate()
            .map(|(index, fiber)| {
                Ok((
                    self.skeletons[index].prepare(fiber)?,
                    self.tubes[index].prepare(fiber)?,
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        let regions = phantom
            .regions
            .iter()
            .zip(&self.regions)
            .map(|(region, sphere)| sphere.prepare(region))
            .collect::<Result<Vec<_>>>()?;

        for (index, (skeleton, tube)) in fibers.into_iter().enumerate() {
            self.skeletons[index].apply(skeleton);
            self.tubes[index].apply(tube);
        }
        for (sphere, update) in self.regions.iter_mut().zip(regions) {
            sphere.apply(update);
        }
        debug!(fibers = self.tubes.len(), regions = self.regions.len(), "phantom scene refreshed");
        Ok(())
    }

    /// Refresh the skeleton and tube of one fiber; both or neither change
    pub fn refresh_fiber(&mut self, phantom: &Phantom, index: usize) -> Result<()> {
        let fiber = phantom.fibers.get(index).ok_or_else(|| out_of_range("fiber", index))?;
        let skeleton = self.skeletons.get(index).ok_or_else(|| out_of_range("skeleton", index))?;
        let tube = self.tubes.get(index).ok_or_else(|| out_of_range("tube", index))?;

        let skeleton_update = skeleton.prepare(fiber)?;
        let tube_update = tube.prepare(fiber)?;
        self.skeletons[index].apply(skeleton_update);
        self.tubes[index].apply(tube_update);
        Ok(())
    }

    pub fn refresh_region(&mut self, phantom: &Phantom, index: usize) -> Result<()> {
        let region = phantom.regions.get(index).ok_or_else(|| out_of_range("region", index))?;
        let sphere = self.regions.get_mut(index).ok_or_else(|| out_of_range("region sphere", index))?;
        sphere.refresh(region)
    }

    /// Marker meshes, tubes and region spheres
    pub fn meshes(&self) -> impl Iterator<Item = &MeshObject> {
        self.skeletons
            .iter()
            .map(|s| &s.spheres)
            .chain(self.tubes.iter().map(|t| &t.mesh))
            .chain(self.regions.iter().map(|r| &r.mesh))
    }

    /// Skeleton path lines
    pub fn lines(&self) -> impl Iterator<Item = &LineObject> {
        self.skeletons.iter().map(|s| &s.line)
    }

    pub fn total_vertices(&self) -> usize {
        self.meshes().map(|m| m.geometry.vertex_count()).sum::<usize>()
            + self.lines().map(|l| l.geometry.len()).sum::<usize>()
    }

    pub fn total_faces(&self) -> usize {
        self.meshes().map(|m| m.geometry.face_count()).sum()
    }

    fn check_shape(&self, phantom: &Phantom) -> Result<()> {
        let fibers = self.tubes.len();
        if fibers != phantom.fibers.len()
            || self.skeletons.len() != fibers
            || self.regions.len() != phantom.regions.len()
        {
            return Err(Error::InvalidData(format!(
                "scene holds {} fibers and {} regions, phantom has {} and {}; rebuild instead",
                self.tubes.len(),
                self.regions.len(),
                phantom.fibers.len(),
                phantom.regions.len()
            )));
        }
        Ok(())
    }
}

impl Drawable for PhantomScene {
    /// Box around every buffer in scene coordinates
    fn bounding_box(&self) -> (Point3f, Point3f) {
        let points: Vec<Point3f> = self
            .meshes()
            .flat_map(|m| m.world_vertices())
            .chain(self.lines().flat_map(|l| l.geometry.points.iter().copied()))
            .collect();
        bounds_of(&points)
    }
}

fn out_of_range(what: &str, index: usize) -> Error {
    Error::InvalidData(format!("no {} at index {}", what, index))
}
