use crate::app::player_app::CameraPermission;
use crate::app::MoodPlayerApp;
use crate::constants::MOOD_GRID_COLUMNS;
use crate::models::Mood;
use eframe::egui;

/// Home screen: mood detection entry point, the mood grid and the fetched
/// track list for the selected mood.
pub fn render_home_view(app: &mut MoodPlayerApp, ui: &mut egui::Ui) {
    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.add_space(8.0);
        ui.heading("How are you feeling?");
        ui.add_space(8.0);

        render_detection_controls(app, ui);
        ui.add_space(12.0);

        render_mood_grid(app, ui);
        ui.add_space(12.0);

        render_mood_tracks(app, ui);
    });
}

fn render_detection_controls(app: &mut MoodPlayerApp, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        if app.ui.detecting {
            ui.spinner();
            ui.label("Detecting your mood...");
            if ui.button("Cancel").clicked() {
                app.stop_detection();
            }
        } else if ui.button("📷 Detect my mood").clicked() {
            app.start_detection();
        }
    });

    if app.ui.camera_permission == CameraPermission::Denied {
        ui.colored_label(
            egui::Color32::from_rgb(230, 160, 60),
            "Camera access was denied. Grant permission and retry, or pick a mood below.",
        );
    }
    if let Some(notice) = &app.ui.detect_notice {
        ui.weak(notice.clone());
    }
}

fn render_mood_grid(app: &mut MoodPlayerApp, ui: &mut egui::Ui) {
    for row in Mood::ALL.chunks(MOOD_GRID_COLUMNS) {
        ui.horizontal(|ui| {
            for &mood in row {
                let selected = app.session.selected_mood == Some(mood);
                let text = format!("{} {}", mood.emoji(), mood.label());
                if ui
                    .add_sized([130.0, 36.0], egui::Button::selectable(selected, text))
                    .clicked()
                {
                    app.select_mood(mood);
                }
            }
        });
    }

    if let Some(mood) = app.session.selected_mood {
        ui.add_space(4.0);
        ui.weak(mood.description());
    }
}

fn render_mood_tracks(app: &mut MoodPlayerApp, ui: &mut egui::Ui) {
    if app.session.selected_mood.is_none() {
        ui.weak("Pick a mood to see matching tracks.");
        return;
    }

    if app.content.mood_loading {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Finding tracks...");
        });
        return;
    }

    if app.content.used_fallback {
        ui.colored_label(
            egui::Color32::from_rgb(230, 160, 60),
            "Catalog unavailable - showing local samples (not streamable).",
        );
        ui.add_space(4.0);
    }

    if app.content.mood_tracks.is_empty() {
        ui.weak("No tracks found for this mood.");
        return;
    }

    let tracks = app.content.mood_tracks.clone();
    super::render_track_rows(app, ui, &tracks);
}
