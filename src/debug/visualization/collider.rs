// src/debug/visualization/collider.rs
use crate::erosion::BrushConfig;
use crate::input::{ContactId, CONTACT_CAPACITY};
use crate::plugin::{ScratchCollider, local_to_world_2d};
use bevy::prelude::*;

const OUTER_COLOR: Color = Color::YELLOW;
const HOLE_COLOR: Color = Color::ORANGE;
const CONTACT_COLOR: Color = Color::rgba(1.0, 0.2, 0.2, 0.8);

/// Zeichnet die aktuelle Form jedes Colliders als geschlossene Linienzüge.
/// Außenränder gelb, Löcher orange; aktive Kontakte als Pinselkreis.
pub fn draw_collider_paths_system(
    query: Query<(&ScratchCollider, &GlobalTransform)>,
    brush: Res<BrushConfig>,
    mut gizmos: Gizmos,
) {
    for (collider, transform) in query.iter() {
        let local_to_world = local_to_world_2d(transform);

        for path in collider.paths().paths() {
            let color = if path.signed_area() > 0.0 {
                OUTER_COLOR
            } else {
                HOLE_COLOR
            };
            let world_path = path.transformed(&local_to_world);
            let vertices = world_path.vertices();
            gizmos.linestrip_2d(vertices.iter().chain(vertices.first()).copied(), color);
        }

        let tracker = collider.pipeline().tracker();
        for index in 0..CONTACT_CAPACITY {
            let Some(contact) = tracker.contact(ContactId(index)) else {
                continue;
            };
            if let (true, Some(position)) = (contact.is_active(), contact.last_position()) {
                let world = local_to_world.transform_point2(position);
                let radius = local_to_world.transform_vector2(Vec2::X * brush.radius).length();
                gizmos.circle_2d(world, radius, CONTACT_COLOR);
            }
        }
    }
}
