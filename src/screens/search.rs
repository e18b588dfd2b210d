use crate::app::MoodPlayerApp;
use eframe::egui;

/// Free-text catalog search.
pub fn render_search_view(app: &mut MoodPlayerApp, ui: &mut egui::Ui) {
    ui.add_space(8.0);
    ui.heading("Search");
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(&mut app.content.search_query)
                .hint_text("Track or artist")
                .desired_width(280.0),
        );
        let submitted =
            response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("🔍 Search").clicked() || submitted {
            app.submit_search();
        }
        if ui.button("Clear").clicked() {
            app.content.search_query.clear();
            app.content.clear_search();
        }
    });
    ui.add_space(12.0);

    if app.content.search_loading {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Searching...");
        });
        return;
    }

    if app.content.search_results.is_empty() {
        if !app.content.search_query.trim().is_empty() {
            ui.weak("No results.");
        }
        return;
    }

    let tracks = app.content.search_results.clone();
    egui::ScrollArea::vertical().show(ui, |ui| {
        super::render_track_rows(app, ui, &tracks);
    });
}
