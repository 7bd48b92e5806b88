pub use crate::galaxy::{GalaxyConfig, GalaxyConfigUi, PanelInteraction, ParticleCount};
