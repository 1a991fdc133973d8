// ./src/main.rs
use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use scratch_collider::{ScratchColliderPlugin, setup::setup_scene};

fn main() {
    // Optionaler Pfad zu einer JSON-Pinselkonfiguration
    let plugin = std::env::args()
        .nth(1)
        .map(ScratchColliderPlugin::with_config_path)
        .unwrap_or_default();

    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(EguiPlugin)
        .add_plugins(plugin)
        .add_systems(Startup, setup_scene)
        .run();
}
