//! Bezier-Keyframe-Editor.
//!
//! Interaktiver Editor für stückweise kubische Bezier-Kurven über
//! Keyframes, mit egui + glow als Host.

use eframe::egui;

use bezier_keyframe_editor::core::Scene;
use bezier_keyframe_editor::{ui, AppState, EditorController, EditorOptions, KeyframeSpec};
use glam::Vec2;

fn main() -> Result<(), eframe::Error> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!(
        "Bezier-Keyframe-Editor v{} startet...",
        env!("CARGO_PKG_VERSION")
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 800.0])
            .with_title("Bezier-Keyframe-Editor"),
        ..Default::default()
    };

    eframe::run_native(
        "Bezier-Keyframe-Editor",
        options,
        Box::new(|_cc| Ok(Box::new(EditorApp::new()))),
    )
}

/// Haupt-Anwendungsstruktur
struct EditorApp {
    state: AppState,
    controller: EditorController,
    input: ui::InputState,
}

impl EditorApp {
    fn new() -> Self {
        // Optionen aus TOML laden (oder Standardwerte)
        let config_path = EditorOptions::config_path();
        let editor_options = EditorOptions::load_from_file(&config_path);

        let mut state = AppState::with_options(editor_options);
        if let Err(e) = seed_demo_scene(&mut state.scene) {
            log::error!("Demo-Szene konnte nicht aufgebaut werden: {:#}", e);
        }

        Self {
            state,
            controller: EditorController::new(),
            input: ui::InputState::new(),
        }
    }
}

/// Baut die Startszene: Gitter, Frame-Cursor und zwei Beispielkurven.
fn seed_demo_scene(scene: &mut Scene) -> anyhow::Result<()> {
    scene.add_grid();
    scene.add_cursor();

    scene.add_curve(&[
        KeyframeSpec::new(
            Vec2::new(-3.2945266, -2.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(5.2945266, 0.0),
        ),
        KeyframeSpec::new(
            Vec2::new(7.7054734, 2.0),
            Vec2::new(12.0, 0.0),
            Vec2::new(16.684938, 0.0),
        ),
        KeyframeSpec::new(
            Vec2::new(19.315062, -2.0),
            Vec2::new(24.0, 0.0),
            Vec2::new(28.684938, 0.0),
        ),
    ])?;

    scene.add_curve(&[
        KeyframeSpec::new(
            Vec2::new(-3.2945266, 8.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(5.2945266, 0.0),
        ),
        KeyframeSpec::new(
            Vec2::new(7.7054734, 10.0),
            Vec2::new(12.0, 0.0),
            Vec2::new(16.684938, 0.0),
        ),
        KeyframeSpec::new(
            Vec2::new(19.315062, 8.0),
            Vec2::new(24.0, 0.0),
            Vec2::new(28.684938, 0.0),
        ),
    ])?;

    Ok(())
}

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut has_events = false;

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let (rect, response) =
                    ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

                let events = self.input.collect_events(ui, &response);
                has_events = !events.is_empty();
                for event in events {
                    self.controller.handle_event(&mut self.state, event);
                }

                let mut surface = ui::EguiSurface::new(ui.painter_at(rect), rect);
                self.state
                    .scene
                    .draw(&self.state.view, &self.state.options, &mut surface);
            });

        ctx.set_cursor_icon(ui::cursor_icon(&self.state));

        if has_events || ctx.input(|i| i.pointer.is_moving()) {
            ctx.request_repaint();
        }
    }
}
