use bevy::{
    prelude::*,
    reflect::TypePath,
    render::render_resource::{AsBindGroup, ShaderRef, ShaderType},
};
use bytemuck::{Pod, Zeroable};

const SHADER_ASSET_PATH: &str = "shaders/galaxy_points.wgsl";

// This struct is duplicated in galaxy_points.wgsl, so make sure to update both
#[derive(ShaderType, Pod, Zeroable, Clone, Copy, Debug)]
#[repr(C)]
pub struct PointsParams {
    pub point_size: f32,
}

/// Additive billboard material for the galaxy point cloud. Per-particle
/// color rides on the vertex color attribute; `AlphaMode::Add` keeps the
/// draw in the transparent pass with depth writes off, so overlapping
/// points accumulate instead of occluding each other.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct GalaxyPointsMaterial {
    #[uniform(0)]
    pub params: PointsParams,
    alpha_mode: AlphaMode,
}

impl GalaxyPointsMaterial {
    pub fn new(point_size: f32) -> Self {
        Self {
            params: PointsParams { point_size },
            alpha_mode: AlphaMode::Add,
        }
    }
}

impl Material for GalaxyPointsMaterial {
    fn vertex_shader() -> ShaderRef {
        SHADER_ASSET_PATH.into()
    }

    fn fragment_shader() -> ShaderRef {
        SHADER_ASSET_PATH.into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        self.alpha_mode
    }
}
