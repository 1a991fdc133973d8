// ./src/debug/ui.rs
use crate::debug::visualization::svg::export_collider_svg;
use crate::erosion::BrushConfig;
use crate::plugin::ScratchCollider;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui::Window};

pub fn collider_panel_ui_system(
    mut contexts: EguiContexts,
    brush: Res<BrushConfig>,
    mut colliders: Query<(Entity, &mut ScratchCollider)>,
) {
    Window::new("Radierbare Collider")
        .default_width(300.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.collapsing("Pinsel", |ui| {
                ui.label(format!("Radius: {:.3}", brush.radius));
                ui.label(format!("Auflösung: {} Ecken", brush.resolution));
                ui.label(format!("Stempelabstand: {:.2} × Radius", brush.spacing));
                ui.label(format!("Gitter: 1/{}", brush.scale));
                ui.label(format!("Füllregel: {:?}", brush.fill_rule));
            });

            for (entity, mut collider) in colliders.iter_mut() {
                let summary = collider.pipeline().engine().summary();
                ui.separator();
                ui.heading(format!("Collider {:?}", entity));
                ui.label(format!(
                    "Pfade: {}  Ecken: {}",
                    summary.path_count, summary.vertex_count
                ));
                ui.label(format!(
                    "Fläche: {:.3} von {:.3} ({:.1} % entfernt)",
                    summary.area,
                    summary.initial_area,
                    summary.erased_fraction() * 100.0
                ));
                ui.label(format!(
                    "Stempel: {} angewandt, {} ohne Wirkung, {} übersprungen, {} fehlgeschlagen",
                    summary.stats.stamps_applied,
                    summary.stats.stamps_unchanged,
                    summary.stats.stamps_skipped,
                    summary.stats.stamps_failed
                ));
                if collider.paths().is_fully_erased() {
                    ui.label("Vollständig gelöscht.");
                }

                ui.horizontal(|ui| {
                    if ui.button("↺ Reset").clicked() {
                        collider.pipeline_mut().reset();
                    }
                    if ui.button("SVG exportieren").clicked() {
                        let filename = format!("scratch_collider_{}.svg", entity.index());
                        if let Err(err) = export_collider_svg(&filename, collider.paths(), true) {
                            warn!("SVG export failed: {}", err);
                        }
                    }
                });
            }
        });
}
