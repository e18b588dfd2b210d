use crate::app::MoodPlayerApp;
use eframe::egui;

/// Now Playing screen: large artwork, track details, mood chip and lyrics.
pub fn render_now_playing_view(app: &mut MoodPlayerApp, ui: &mut egui::Ui) {
    if let Some(error) = app.ui.last_playback_error.clone() {
        render_error_state(ui, &error);
        return;
    }

    let Some(track) = app.session.current_track.clone() else {
        render_empty_state(ui);
        return;
    };

    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            render_artwork(app, ui);
            ui.add_space(16.0);

            ui.label(egui::RichText::new(&track.title).size(26.0).strong());
            ui.add_space(4.0);
            ui.label(egui::RichText::new(&track.artist).size(18.0));

            if let Some(mood) = track.mood {
                ui.add_space(8.0);
                ui.label(format!("{} {}", mood.emoji(), mood.label()));
            }

            if let Some(next) = app.session.peek_next() {
                ui.add_space(8.0);
                ui.weak(format!("Up next: {} - {}", next.title, next.artist));
            }

            ui.add_space(20.0);
            render_lyrics(app, ui);
        });
    });
}

fn render_artwork(app: &MoodPlayerApp, ui: &mut egui::Ui) {
    let size = egui::Vec2::splat(280.0);

    if let Some(texture) = &app.ui.artwork_texture {
        ui.add(
            egui::Image::new(texture)
                .fit_to_exact_size(size)
                .corner_radius(12.0),
        );
        return;
    }

    // Placeholder while loading or when the track has no artwork
    let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
    ui.painter()
        .rect_filled(rect, 12.0, egui::Color32::from_rgb(50, 50, 56));
    let glyph = if app.ui.artwork_loading { "⏳" } else { "🎵" };
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        glyph,
        egui::FontId::proportional(64.0),
        egui::Color32::from_rgb(130, 130, 140),
    );
}

fn render_lyrics(app: &MoodPlayerApp, ui: &mut egui::Ui) {
    ui.heading("Lyrics");
    ui.add_space(6.0);

    if app.content.lyrics_loading {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Looking up lyrics...");
        });
        return;
    }

    match &app.content.lyrics {
        Some(lyrics) => {
            ui.label(lyrics);
        }
        None => {
            ui.weak("Lyrics not available for this track.");
        }
    }
}

fn render_error_state(ui: &mut egui::Ui, error: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(80.0);
        ui.label(
            egui::RichText::new("⚠")
                .size(56.0)
                .color(egui::Color32::from_rgb(255, 100, 100)),
        );
        ui.add_space(16.0);
        ui.label(
            egui::RichText::new("Playback Error")
                .size(22.0)
                .color(egui::Color32::from_rgb(255, 100, 100)),
        );
        ui.add_space(10.0);
        ui.label(error);
        ui.add_space(10.0);
        ui.weak("Try another track");
    });
}

fn render_empty_state(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(120.0);
        ui.label(
            egui::RichText::new("🎵")
                .size(56.0)
                .color(egui::Color32::from_rgb(120, 120, 120)),
        );
        ui.add_space(16.0);
        ui.label(egui::RichText::new("No track playing").size(22.0));
        ui.add_space(8.0);
        ui.weak("Pick a mood or search for a track to get started");
    });
}
