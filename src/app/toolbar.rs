//! Toolbar rendering for `RaceApp`.
//!
//! Draws the query field, the refresh button, a loading spinner, the status
//! line and the dark-mode toggle.

use eframe::egui;

use super::RaceApp;

impl RaceApp {
    /// Render the top toolbar strip.
    pub fn draw_toolbar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            ui.add_space(4.0);

            let response = ui.add_sized(
                [260.0, 24.0],
                egui::TextEdit::singleline(&mut self.query_input)
                    .hint_text(self.config.default_query.as_str()),
            );
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                self.refresh(ctx);
            }

            if ui.button("가져오기").clicked() {
                self.refresh(ctx);
            }

            if self.loading {
                ui.spinner();
            }

            ui.separator();
            ui.label(self.status_line());

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let dark_label = if self.dark_mode { "\u{263E}" } else { "\u{2600}" };
                if ui.button(dark_label).clicked() {
                    self.dark_mode = !self.dark_mode;
                }
            });
        });
    }

    fn status_line(&self) -> String {
        if let Some(err) = self.session.last_error() {
            return err.to_string();
        }
        match self.session.dataset() {
            Some(data) => {
                let tracks = self.view.layout().map(|l| l.tracks.len()).unwrap_or(0);
                let query = data.query.as_deref().unwrap_or(&self.config.default_query);
                let listed = self.session.article_list().article_count();
                format!(
                    "\"{}\" · 트랙 {} · 기사 {}/{}",
                    query,
                    tracks,
                    listed,
                    data.articles.len()
                )
            }
            None if self.loading => "불러오는 중...".to_string(),
            None => String::new(),
        }
    }
}
