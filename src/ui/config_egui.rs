use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::prelude::*;

pub struct ConfigEguiPlugin;

impl Plugin for ConfigEguiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, configure_visuals_system)
            .add_systems(Update, ui_system);
    }
}

fn configure_visuals_system(mut contexts: EguiContexts) {
    contexts.ctx_mut().set_visuals(egui::Visuals {
        window_corner_radius: 0.0.into(),
        ..Default::default()
    });
}

fn color_ui(label: &str, color: &mut Vec3, ui: &mut egui::Ui) {
    let mut rgb = color.to_array();
    ui.horizontal(|ui| {
        ui.color_edit_button_rgb(&mut rgb);
        ui.label(label);
    });
    *color = Vec3::from_array(rgb);
}

fn ui_system(
    mut contexts: EguiContexts,
    mut ui_config: ResMut<GalaxyConfigUi>,
    mut panel: ResMut<PanelInteraction>,
    particle_count: Res<ParticleCount>,
) {
    let ctx = contexts.ctx_mut();
    let config = &mut ui_config.0;

    let minval = GalaxyConfig::MIN;
    let maxval = GalaxyConfig::MAX;

    egui::SidePanel::left("side_panel")
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading("Galaxy");
            ui.label(format!("{} particles placed", particle_count.count));
            ui.separator();

            egui::CollapsingHeader::new("Shape")
                .default_open(true)
                .show(ui, |ui| {
                    ui.add(
                        egui::Slider::new(&mut config.count, minval.count..=maxval.count)
                            .step_by(100.0)
                            .text("Count"),
                    );
                    ui.add(
                        egui::Slider::new(&mut config.radius, minval.radius..=maxval.radius)
                            .text("Radius"),
                    );
                    ui.add(
                        egui::Slider::new(&mut config.branches, minval.branches..=maxval.branches)
                            .text("Branches"),
                    );
                    ui.add(
                        egui::Slider::new(&mut config.spin, minval.spin..=maxval.spin).text("Spin"),
                    );
                });

            egui::CollapsingHeader::new("Scatter")
                .default_open(true)
                .show(ui, |ui| {
                    ui.add(
                        egui::Slider::new(
                            &mut config.randomness,
                            minval.randomness..=maxval.randomness,
                        )
                        .text("Randomness"),
                    );
                    ui.add(
                        egui::Slider::new(
                            &mut config.randomness_power,
                            minval.randomness_power..=maxval.randomness_power,
                        )
                        .text("Randomness Power"),
                    );
                });

            egui::CollapsingHeader::new("Look")
                .default_open(true)
                .show(ui, |ui| {
                    ui.add(
                        egui::Slider::new(&mut config.size, minval.size..=maxval.size)
                            .text("Point Size"),
                    );
                    color_ui("Inside Color", &mut config.inside_color, ui);
                    color_ui("Outside Color", &mut config.outside_color, ui);
                });
        });

    // while this is set the committed config is left alone, so a slider drag
    // only costs one regeneration when it ends instead of one per tick
    panel.active = ctx.is_using_pointer() || ctx.wants_keyboard_input();
}
