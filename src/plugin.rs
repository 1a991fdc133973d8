// src/plugin.rs
use crate::debug::{ui::collider_panel_ui_system, visualization::collider::draw_collider_paths_system};
use crate::erosion::{BrushConfig, ColliderPathSet, ErosionEngine, ErosionPipeline};
use crate::input::{InputFrame, PointerSample, SamplePhase};
use crate::math::error::*;
use bevy::input::touch::Touches;
use bevy::math::Affine2;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Ein radierbarer Collider. Die Form liegt in lokalen Koordinaten, die Lage in
/// der Welt kommt aus dem `GlobalTransform` der Entität.
#[derive(Component, Debug)]
pub struct ScratchCollider {
    pipeline: ErosionPipeline,
}

impl ScratchCollider {
    pub fn new(brush: BrushConfig, paths: ColliderPathSet) -> ErosionResult<Self> {
        Ok(Self {
            pipeline: ErosionPipeline::new(ErosionEngine::new(brush, paths)?),
        })
    }

    /// Collider mit einem einzelnen Außenrand.
    pub fn from_boundary(brush: BrushConfig, vertices: Vec<Vec2>) -> ErosionResult<Self> {
        Self::new(brush, ColliderPathSet::from_boundary(vertices)?)
    }

    pub fn pipeline(&self) -> &ErosionPipeline {
        &self.pipeline
    }

    pub fn pipeline_mut(&mut self) -> &mut ErosionPipeline {
        &mut self.pipeline
    }

    pub fn paths(&self) -> &ColliderPathSet {
        self.pipeline.paths()
    }
}

/// Roh-Samples des aktuellen Frames in Weltkoordinaten.
#[derive(Resource, Debug, Default)]
pub struct PointerFrame(pub InputFrame);

/// Registriert Pinsel-Konfiguration, Eingabe, Erosion und Debug-Anzeige.
#[derive(Debug, Clone, Default)]
pub struct ScratchColliderPlugin {
    /// Optionale JSON-Datei mit einer `BrushConfig`
    pub config_path: Option<String>,
}

impl ScratchColliderPlugin {
    pub fn with_config_path(path: impl Into<String>) -> Self {
        Self {
            config_path: Some(path.into()),
        }
    }

    fn load_brush(&self) -> BrushConfig {
        let Some(path) = &self.config_path else {
            return BrushConfig::default();
        };
        let loaded = std::fs::read_to_string(path)
            .map_err(ErosionError::from)
            .and_then(|json| BrushConfig::from_json_str(&json));
        match loaded {
            Ok(config) => {
                info!("Loaded brush config from '{}': {:?}", path, config);
                config
            }
            Err(err) => {
                warn!("Could not load brush config '{}': {}. Using defaults.", path, err);
                BrushConfig::default()
            }
        }
    }
}

impl Plugin for ScratchColliderPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.load_brush().sanitized())
            .init_resource::<PointerFrame>()
            .add_systems(
                Update,
                (collect_pointer_samples_system, erode_colliders_system).chain(),
            )
            .add_systems(
                Update,
                (draw_collider_paths_system, collider_panel_ui_system),
            );
    }
}

/// Maus- und Touch-Eingaben dieses Frames in Weltkoordinaten sammeln.
pub fn collect_pointer_samples_system(
    mut frame: ResMut<PointerFrame>,
    touches: Res<Touches>,
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
) {
    frame.0.clear();

    let Ok((camera, camera_transform)) = cameras.get_single() else {
        return;
    };
    let to_world = |screen: Vec2| camera.viewport_to_world_2d(camera_transform, screen);

    for touch in touches.iter_just_pressed() {
        if let Some(world) = to_world(touch.position()) {
            frame
                .0
                .push(PointerSample::touch(touch.id(), SamplePhase::Began, world));
        }
    }
    for touch in touches.iter() {
        if touches.just_pressed(touch.id()) {
            continue;
        }
        let phase = if touch.delta() == Vec2::ZERO {
            SamplePhase::Stationary
        } else {
            SamplePhase::Moved
        };
        if let Some(world) = to_world(touch.position()) {
            frame.0.push(PointerSample::touch(touch.id(), phase, world));
        }
    }
    for touch in touches.iter_just_released() {
        let world = to_world(touch.position()).unwrap_or_default();
        frame
            .0
            .push(PointerSample::touch(touch.id(), SamplePhase::Ended, world));
    }
    for touch in touches.iter_just_canceled() {
        frame.0.push(PointerSample::touch(
            touch.id(),
            SamplePhase::Canceled,
            Vec2::ZERO,
        ));
    }

    let cursor = windows
        .get_single()
        .ok()
        .and_then(Window::cursor_position)
        .and_then(to_world);

    if mouse.just_released(MouseButton::Left) {
        frame.0.push(PointerSample::mouse(
            SamplePhase::Ended,
            cursor.unwrap_or_default(),
        ));
    } else if let Some(world) = cursor {
        if mouse.just_pressed(MouseButton::Left) {
            frame.0.push(PointerSample::mouse(SamplePhase::Began, world));
        } else if mouse.pressed(MouseButton::Left) {
            frame.0.push(PointerSample::mouse(SamplePhase::Moved, world));
        }
    }
}

/// Wendet die gesammelten Samples auf jeden Collider an.
pub fn erode_colliders_system(
    frame: Res<PointerFrame>,
    mut colliders: Query<(Entity, &mut ScratchCollider, &GlobalTransform)>,
) {
    if frame.0.is_empty() {
        return;
    }
    for (entity, mut collider, transform) in colliders.iter_mut() {
        let pipeline = collider.pipeline_mut();
        pipeline.set_local_to_world(local_to_world_2d(transform));
        let report = pipeline.tick(&frame.0);
        if report.changed {
            debug!(
                "Collider {:?} eroded: {} stamps applied, {} paths left",
                entity,
                report.stroke.applied,
                pipeline.paths().len()
            );
        }
    }
}

/// Projektion eines `GlobalTransform` auf die xy-Ebene.
pub fn local_to_world_2d(transform: &GlobalTransform) -> Affine2 {
    let (scale, rotation, translation) = transform.to_scale_rotation_translation();
    let (angle, _, _) = rotation.to_euler(EulerRot::ZYX);
    Affine2::from_scale_angle_translation(scale.truncate(), angle, translation.truncate())
}
