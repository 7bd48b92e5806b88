use crate::prelude::*;
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera)
            .add_systems(PostUpdate, camera_control_system);
    }
}

fn spawn_camera(mut commands: Commands, mut clearcolor: ResMut<ClearColor>) {
    *clearcolor = ClearColor(Color::BLACK);
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(4.0, 4.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
        OrbitCamera::default(),
    ));
}

/// Damped orbit rig around the galaxy center. Drags feed the target angles,
/// the actual angles ease toward them every frame, and scroll input goes
/// through a smoothing buffer before it reaches the zoom distance.
#[derive(Component, Clone)]
pub struct OrbitCamera {
    yaw: f32,
    pitch: f32,
    target_yaw: f32,
    target_pitch: f32,
    distance: f32,
    smooth_zoom_buffer: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            yaw: 0.8,
            pitch: 0.9,
            target_yaw: 0.8,
            target_pitch: 0.9,
            distance: 7.0,
            smooth_zoom_buffer: 0.0,
        }
    }
}

const ROTATE_SPEED: f32 = 0.005;
const DAMPING: f32 = 10.0;
// keep the pitch off the poles so look_at never degenerates
const PITCH_LIMIT: f32 = 1.45;

pub fn camera_control_system(
    mut query: Query<(&mut Transform, &mut OrbitCamera)>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut motion_evr: EventReader<MouseMotion>,
    mut scroll_evr: EventReader<MouseWheel>,
    time: Res<Time>,
    galaxy_config: Res<GalaxyConfig>,
    panel: Res<PanelInteraction>,
) {
    let (mut transform, mut rig) = query.single_mut().expect("Error: Require ONE camera");

    // input captured by the panel stays in the panel
    if panel.active {
        motion_evr.clear();
        scroll_evr.clear();
    } else {
        if mouse_buttons.pressed(MouseButton::Left) {
            for ev in motion_evr.read() {
                rig.target_yaw += ev.delta.x * ROTATE_SPEED;
                rig.target_pitch =
                    (rig.target_pitch + ev.delta.y * ROTATE_SPEED).clamp(-PITCH_LIMIT, PITCH_LIMIT);
            }
        } else {
            motion_evr.clear();
        }

        // scroll delta is cached to a buffer and folded into the distance
        // over a few frames for a smooth zooming effect
        for ev in scroll_evr.read() {
            match ev.unit {
                MouseScrollUnit::Line => rig.smooth_zoom_buffer += ev.y * 0.1,
                MouseScrollUnit::Pixel => rig.smooth_zoom_buffer += ev.y * 0.005,
            }
        }
    }

    let zoom_step = rig.smooth_zoom_buffer * 0.2;
    rig.smooth_zoom_buffer -= zoom_step;
    rig.distance = (rig.distance * (1.0 - zoom_step)).clamp(0.5, galaxy_config.radius * 4.0);

    let t = (DAMPING * time.delta_secs()).min(1.0);
    rig.yaw += (rig.target_yaw - rig.yaw) * t;
    rig.pitch += (rig.target_pitch - rig.pitch) * t;

    let offset = Vec3::new(
        rig.pitch.cos() * rig.yaw.cos(),
        rig.pitch.sin(),
        rig.pitch.cos() * rig.yaw.sin(),
    ) * rig.distance;

    transform.translation = offset;
    transform.look_at(Vec3::ZERO, Vec3::Y);
}
