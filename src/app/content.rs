//! Content-area rendering for `RaceApp`.
//!
//! - `draw_race`:     the animated race canvas and its pointer handling
//! - `draw_articles`: the filtered article list

use eframe::egui;

use news_race::render::canvas::PainterCanvas;

use crate::ui::render_list_entry;
use super::RaceApp;

impl RaceApp {
    pub fn draw_race(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, now: f64) {
        let Some(size) = self.view.layout().map(|l| l.size()) else {
            if !self.loading {
                ui.colored_label(egui::Color32::GRAY, "No race data");
            }
            return;
        };

        egui::ScrollArea::horizontal().show(ui, |ui| {
            let (rect, mut response) =
                ui.allocate_exact_size(size, egui::Sense::click().union(egui::Sense::hover()));
            let origin = rect.min;
            let to_scene = |p: egui::Pos2| (p - origin).to_pos2();

            let over_racer = self.view.hover(response.hover_pos().map(to_scene), now);
            let over_target = response
                .hover_pos()
                .and_then(|p| self.view.click(to_scene(p), now))
                .is_some();
            if over_racer || over_target {
                ctx.set_cursor_icon(egui::CursorIcon::PointingHand);
            }
            if let Some(racer) = self.view.hovered_racer() {
                let tip = format!(
                    "{} → {} · {}위 · 점수 {:.1}",
                    racer.id.chaser,
                    racer.id.target,
                    racer.rank + 1,
                    racer.score
                );
                response = response.on_hover_text(tip);
            }

            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    if let Some(selection) = self.view.click(to_scene(pos), now) {
                        log::debug!("selected {:?}", selection);
                        self.session.apply_selection(&selection);
                    }
                }
            }

            let painter = ui.painter_at(rect);
            let mut canvas = PainterCanvas::new(&painter, origin, self.dark_mode);
            self.view.paint(&mut canvas, now);
        });
    }

    pub fn draw_articles(&self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let list = self.session.article_list();
        ui.add_space(4.0);
        ui.heading(egui::RichText::new(&list.title).size(18.0).strong());
        ui.separator();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for entry in &list.entries {
                    render_list_entry(ui, ctx, entry);
                    ui.add_space(6.0);
                }
            });
    }
}
