use crate::app::MoodPlayerApp;
use crate::models::Track;
use crate::utils::formatting::format_time;
use eframe::egui;

/// Library screen: the upcoming queue and the recently-played history.
pub fn render_library_view(app: &mut MoodPlayerApp, ui: &mut egui::Ui) {
    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.add_space(8.0);
        render_queue_section(app, ui);
        ui.add_space(16.0);
        render_history_section(app, ui);
    });
}

fn render_queue_section(app: &mut MoodPlayerApp, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.heading("Up next");
        if !app.session.queue().is_empty() && ui.button("Clear queue").clicked() {
            app.session.clear_queue();
        }
    });
    ui.add_space(4.0);

    if app.session.queue().is_empty() {
        ui.weak("The queue is empty. Add tracks from Home or Search.");
        return;
    }

    let queued: Vec<Track> = app.session.queue().iter().cloned().collect();
    for (index, track) in queued.iter().enumerate() {
        ui.horizontal(|ui| {
            ui.weak(format!("{}.", index + 1));
            ui.label(&track.title);
            ui.weak(format!("- {}", track.artist));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("✖").on_hover_text("Remove from queue").clicked() {
                    app.session.dequeue_by_id(&track.id);
                }
                ui.weak(format_time(track.duration));
            });
        });
        ui.separator();
    }
}

fn render_history_section(app: &mut MoodPlayerApp, ui: &mut egui::Ui) {
    ui.heading("Recently played");
    ui.add_space(4.0);

    if app.session.history().is_empty() {
        ui.weak("Nothing played yet.");
        return;
    }

    // Most recent first
    let played: Vec<Track> = app.session.history().iter().cloned().collect();
    super::render_track_rows(app, ui, &played);
}
