// ./src/setup.rs
use crate::erosion::BrushConfig;
use crate::plugin::ScratchCollider;
use bevy::prelude::*;

/// Kantenlänge des Start-Quadrats in lokalen Einheiten
const SQUARE_SIZE: f32 = 4.0;
/// Pixel pro lokaler Einheit
const WORLD_SCALE: f32 = 60.0;

pub fn setup_scene(mut commands: Commands, brush: Res<BrushConfig>) {
    // Kamera
    commands.spawn(Camera2dBundle::default());

    // Quadrat, zentriert im Ursprung
    let square = vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(SQUARE_SIZE, 0.0),
        Vec2::new(SQUARE_SIZE, SQUARE_SIZE),
        Vec2::new(0.0, SQUARE_SIZE),
    ];
    match ScratchCollider::from_boundary(brush.clone(), square) {
        Ok(collider) => {
            let offset = -SQUARE_SIZE * WORLD_SCALE / 2.0;
            commands.spawn((
                collider,
                SpatialBundle::from_transform(
                    Transform::from_xyz(offset, offset, 0.0).with_scale(Vec3::splat(WORLD_SCALE)),
                ),
            ));
            info!("Spawned scratch collider ({0}x{0})", SQUARE_SIZE);
        }
        Err(err) => warn!("Could not create scratch collider: {}", err),
    }
}
