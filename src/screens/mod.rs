pub mod home;
pub mod library;
pub mod now_playing;
pub mod search;

use crate::app::player_app::MainTab;
use crate::app::MoodPlayerApp;
use crate::models::Track;
use crate::state::Theme;
use crate::utils::formatting::{format_duration, format_time};
use eframe::egui;

/// Top navigation: app title, tab switcher and the theme toggle.
pub fn render_nav_bar(app: &mut MoodPlayerApp, ui: &mut egui::Ui) {
    ui.add_space(6.0);
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("🎵 MoodTune").size(20.0).strong());
        ui.add_space(16.0);

        let tabs = [
            (MainTab::Home, "Home"),
            (MainTab::Search, "Search"),
            (MainTab::Library, "Library"),
            (MainTab::NowPlaying, "Now Playing"),
        ];
        for (tab, label) in tabs {
            if ui
                .selectable_label(app.ui.selected_tab == tab, label)
                .clicked()
            {
                app.ui.selected_tab = tab;
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let icon = match app.session.theme {
                Theme::Dark => "☀",
                Theme::Light => "🌙",
            };
            if ui.button(icon).on_hover_text("Toggle theme").clicked() {
                app.session.toggle_theme();
            }
        });
    });
    ui.add_space(6.0);
}

/// Bottom transport bar. Hidden entirely while no track is current.
pub fn render_player_bar(app: &mut MoodPlayerApp, ui: &mut egui::Ui) {
    let Some(track) = app.session.current_track.clone() else {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.weak("Nothing playing");
        });
        ui.add_space(4.0);
        return;
    };

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.set_width(220.0);
            ui.label(egui::RichText::new(&track.title).strong());
            ui.weak(&track.artist);
        });

        ui.separator();

        if ui
            .add_enabled(
                !app.session.history().is_empty(),
                egui::Button::new("⏮"),
            )
            .on_hover_text("Previous")
            .clicked()
        {
            app.retreat_track();
        }

        let play_icon = if app.session.is_playing { "⏸" } else { "▶" };
        if ui.button(play_icon).clicked() {
            app.toggle_play_pause();
        }

        if ui.button("⏭").on_hover_text("Next").clicked() {
            app.advance_track();
        }

        ui.separator();

        // Progress slider: show the drag target while seeking, the live
        // position otherwise; commit on release
        let mut pct = if app.ui.is_seeking {
            app.ui.seek_target_pct
        } else {
            app.session.progress()
        };
        ui.label(format_duration(app.audio.get_position()));
        let slider = ui.add(
            egui::Slider::new(&mut pct, 0.0..=100.0)
                .show_value(false)
                .trailing_fill(true),
        );
        if slider.dragged() {
            app.ui.is_seeking = true;
            app.ui.seek_target_pct = pct;
        }
        if slider.drag_stopped() {
            app.seek_to_pct(app.ui.seek_target_pct);
            app.ui.is_seeking = false;
        }
        ui.label(format_time(app.playback_duration_secs()));

        ui.separator();

        ui.label("🔊");
        let mut volume = app.session.volume();
        if ui
            .add(egui::Slider::new(&mut volume, 0.0..=1.0).show_value(false))
            .changed()
        {
            app.set_volume(volume);
        }
    });
    ui.add_space(6.0);
}

/// Toast notifications stacked in the bottom-right corner.
pub fn render_toasts(app: &MoodPlayerApp, ctx: &egui::Context) {
    if app.ui.toasts.is_empty() {
        return;
    }

    egui::Area::new(egui::Id::new("toasts"))
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-12.0, -72.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            for toast in &app.ui.toasts {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.label(&toast.message);
                });
                ui.add_space(4.0);
            }
        });
}

/// A list of track rows with play and enqueue actions. Shared by the home,
/// search and library screens.
pub fn render_track_rows(app: &mut MoodPlayerApp, ui: &mut egui::Ui, tracks: &[Track]) {
    for track in tracks {
        let is_current = app
            .session
            .current_track
            .as_ref()
            .map(|t| t.id == track.id)
            .unwrap_or(false);

        ui.horizontal(|ui| {
            if ui.button("▶").on_hover_text("Play now").clicked() {
                app.play_track(track.clone());
            }
            if ui.button("➕").on_hover_text("Add to queue").clicked() {
                app.enqueue_track(track.clone());
            }

            let title = if is_current {
                egui::RichText::new(&track.title).strong()
            } else {
                egui::RichText::new(&track.title)
            };
            ui.label(title);
            ui.weak(format!("- {}", track.artist));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.weak(format_time(track.duration));
                if !track.is_streamable() {
                    ui.weak("(sample)");
                }
            });
        });
        ui.separator();
    }
}
