use crate::graphics::GalaxyPointsMaterial;
use crate::prelude::*;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::view::NoFrustumCulling;

use super::point_cloud::{self, PointCloudBuffers};

pub struct GalaxyScenePlugin;

impl Plugin for GalaxyScenePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(GalaxyScene::default())
            .insert_resource(ParticleCount { count: 0 })
            .add_systems(Update, sync_galaxy_scene);
    }
}

/// Scene-resident half of the point cloud: the entity plus the asset handles
/// it currently renders with. Starts at generation -1 so the first frame
/// always builds.
#[derive(Resource)]
pub struct GalaxyScene {
    generation: i32,
    entity: Option<Entity>,
    mesh: Option<Handle<Mesh>>,
    material: Option<Handle<GalaxyPointsMaterial>>,
}

impl Default for GalaxyScene {
    fn default() -> Self {
        Self {
            generation: -1,
            entity: None,
            mesh: None,
            material: None,
        }
    }
}

impl GalaxyScene {
    /// Builds a fresh point cloud for `config` and swaps it into the scene.
    /// The previous mesh asset is removed once the new one is attached, so
    /// its GPU buffers are released instead of leaking across regenerations.
    fn regenerate(
        &mut self,
        commands: &mut Commands,
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<GalaxyPointsMaterial>,
        config: &GalaxyConfig,
    ) {
        let buffers = point_cloud::generate(config);
        let mesh = meshes.add(build_points_mesh(&buffers));

        let material = match &self.material {
            Some(handle) => {
                if let Some(material) = materials.get_mut(handle) {
                    material.params.point_size = config.size;
                }
                handle.clone()
            }
            None => {
                let handle = materials.add(GalaxyPointsMaterial::new(config.size));
                self.material = Some(handle.clone());
                handle
            }
        };

        match self.entity {
            Some(entity) => {
                commands.entity(entity).insert(Mesh3d(mesh.clone()));
            }
            None => {
                self.entity = Some(
                    commands
                        .spawn((
                            Mesh3d(mesh.clone()),
                            MeshMaterial3d(material),
                            Transform::IDENTITY,
                            Visibility::Inherited,
                            // corners are pushed out in the vertex shader, so
                            // the CPU-side AABB understates the drawn extent
                            NoFrustumCulling,
                        ))
                        .id(),
                );
            }
        }

        if let Some(old) = self.mesh.replace(mesh) {
            meshes.remove(&old);
        }

        self.generation = config.generation;
    }
}

fn sync_galaxy_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<GalaxyPointsMaterial>>,
    mut particle_count: ResMut<ParticleCount>,
    mut scene: ResMut<GalaxyScene>,
    config: Res<GalaxyConfig>,
) {
    if scene.generation == config.generation {
        return;
    }

    info!(
        "Galaxy config updated, rebuilding point cloud ({} particles)",
        config.count
    );
    scene.regenerate(&mut commands, &mut meshes, &mut materials, &config);
    particle_count.count = config.count as usize;
}

/// Expands each particle into a 4-vertex quad. All corners share the
/// particle position and carry the particle color; the UV corner tells the
/// vertex shader which way to push the vertex to billboard the quad.
fn build_points_mesh(buffers: &PointCloudBuffers) -> Mesh {
    let count = buffers.particle_count();
    let centers: &[[f32; 3]] = bytemuck::cast_slice(&buffers.positions);
    let tints: &[[f32; 3]] = bytemuck::cast_slice(&buffers.colors);

    let mut positions = Vec::with_capacity(count * 4);
    let mut colors = Vec::with_capacity(count * 4);
    let mut uvs = Vec::with_capacity(count * 4);
    let mut indices = Vec::with_capacity(count * 6);

    for i in 0..count {
        let color = [tints[i][0], tints[i][1], tints[i][2], 1.0];
        let base = (i * 4) as u32;

        for corner in [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]] {
            positions.push(centers[i]);
            colors.push(color);
            uvs.push(corner);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
    .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colors)
    .with_inserted_indices(Indices::U32(indices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::galaxy::point_cloud::generate_seeded;

    #[test]
    fn mesh_expands_each_particle_into_a_quad() {
        let config = GalaxyConfig {
            count: 257,
            ..default()
        };
        let buffers = generate_seeded(&config, 1);
        let mesh = build_points_mesh(&buffers);

        assert_eq!(mesh.count_vertices(), 257 * 4);
        assert_eq!(mesh.indices().map(|indices| indices.len()), Some(257 * 6));
    }
}
