use bevy::prelude::*;

mod galaxy_config;
mod galaxy_scene;
mod point_cloud;

pub use galaxy_config::{GalaxyConfig, GalaxyConfigPlugin, GalaxyConfigUi, PanelInteraction};
pub use galaxy_scene::{GalaxyScene, GalaxyScenePlugin};
pub use point_cloud::{generate, generate_seeded, PointCloudBuffers};

#[derive(Resource)]
pub struct ParticleCount {
    pub count: usize,
}
