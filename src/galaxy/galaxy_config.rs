use bevy::prelude::*;

/// Committed galaxy parameters. `generation` is bumped on every accepted
/// edit; anything scene-resident watches it to know when to rebuild.
#[derive(Resource, Clone, PartialEq)]
pub struct GalaxyConfig {
    pub generation: i32,

    pub count: u32,
    pub size: f32,
    pub radius: f32,
    pub branches: u32,
    pub spin: f32,
    pub randomness: f32,
    pub randomness_power: f32,
    pub inside_color: Vec3,
    pub outside_color: Vec3,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            generation: 1,
            count: 100_000,
            size: 0.02,
            radius: 5.0,
            branches: 3,
            spin: 1.0,
            randomness: 0.2,
            randomness_power: 3.0,
            inside_color: Vec3::new(1.0, 0.42, 0.19),
            outside_color: Vec3::new(0.11, 0.22, 0.52),
        }
    }
}

impl GalaxyConfig {
    pub const MIN: Self = Self {
        generation: 0,
        count: 1_000,
        size: 0.001,
        radius: 0.01,
        branches: 1,
        spin: -5.0,
        randomness: 0.0,
        randomness_power: 1.0,
        inside_color: Vec3::ZERO,
        outside_color: Vec3::ZERO,
    };
    pub const MAX: Self = Self {
        generation: 0,
        count: 1_000_000,
        size: 0.5,
        radius: 20.0,
        branches: 20,
        spin: 5.0,
        randomness: 2.0,
        randomness_power: 10.0,
        inside_color: Vec3::ONE,
        outside_color: Vec3::ONE,
    };

    /// Copy with every field forced into the editable range. The ranges keep
    /// `radius > 0` and `branches >= 1`, so the generator never divides by
    /// zero no matter what a caller stuffs into the resource.
    pub fn clamped(&self) -> Self {
        Self {
            generation: self.generation,
            count: self.count.clamp(Self::MIN.count, Self::MAX.count),
            size: self.size.clamp(Self::MIN.size, Self::MAX.size),
            radius: self.radius.clamp(Self::MIN.radius, Self::MAX.radius),
            branches: self.branches.clamp(Self::MIN.branches, Self::MAX.branches),
            spin: self.spin.clamp(Self::MIN.spin, Self::MAX.spin),
            randomness: self
                .randomness
                .clamp(Self::MIN.randomness, Self::MAX.randomness),
            randomness_power: self
                .randomness_power
                .clamp(Self::MIN.randomness_power, Self::MAX.randomness_power),
            inside_color: self.inside_color.clamp(Vec3::ZERO, Vec3::ONE),
            outside_color: self.outside_color.clamp(Vec3::ZERO, Vec3::ONE),
        }
    }
}

/// Working copy the panel edits freely, including mid-drag values. Committed
/// into [`GalaxyConfig`] only once the interaction has ended.
#[derive(Resource, Clone, PartialEq)]
pub struct GalaxyConfigUi(pub GalaxyConfig);

/// Whether the pointer or keyboard is still inside a panel widget this frame.
#[derive(Resource, Default)]
pub struct PanelInteraction {
    pub active: bool,
}

pub struct GalaxyConfigPlugin;

impl Plugin for GalaxyConfigPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(GalaxyConfig::default())
            .insert_resource(GalaxyConfigUi(GalaxyConfig::default()))
            .insert_resource(PanelInteraction::default())
            .add_systems(Update, apply_ui_updates);
    }
}

/// Commits completed panel edits. Held back while a widget is still being
/// dragged or typed into, so a full regeneration only happens once per edit
/// rather than on every intermediate slider tick.
fn apply_ui_updates(
    panel: Res<PanelInteraction>,
    ui_config: Res<GalaxyConfigUi>,
    mut galaxy_config: ResMut<GalaxyConfig>,
) {
    if panel.active {
        return;
    }

    let edited = ui_config.0.clamped();
    let mut current = galaxy_config.clone();
    current.generation = edited.generation;

    if current != edited {
        let generation = galaxy_config.generation + 1;
        *galaxy_config = edited;
        galaxy_config.generation = generation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_lifts_degenerate_parameters() {
        let config = GalaxyConfig {
            radius: 0.0,
            branches: 0,
            randomness: -1.0,
            randomness_power: 0.0,
            ..default()
        };

        let clamped = config.clamped();
        assert!(clamped.radius > 0.0);
        assert!(clamped.branches >= 1);
        assert!(clamped.randomness >= 0.0);
        assert!(clamped.randomness_power >= 1.0);
    }

    #[test]
    fn clamp_keeps_valid_parameters_untouched() {
        let config = GalaxyConfig::default();
        assert!(config.clamped() == config);
    }

    #[test]
    fn clamp_limits_colors_to_unit_cube() {
        let config = GalaxyConfig {
            inside_color: Vec3::new(2.0, -0.5, 0.3),
            ..default()
        };

        let clamped = config.clamped();
        assert_eq!(clamped.inside_color, Vec3::new(1.0, 0.0, 0.3));
    }
}
