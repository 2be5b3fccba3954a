//! egui widgets for the article list.
//!
//! Stateless functions that turn projected `ListEntry` rows into widgets,
//! plus a small text utility.

use eframe::egui;
use news_race::render::list::{ArticleRow, ListEntry};

// ─── List rendering ───────────────────────────────────────────────────────────

pub fn render_list_entry(ui: &mut egui::Ui, ctx: &egui::Context, entry: &ListEntry) {
    match entry {
        ListEntry::Notice(message) => {
            ui.horizontal(|ui| {
                ui.label("  \u{2022}");
                ui.label(message);
            });
        }
        ListEntry::Article(row) => render_article_row(ui, ctx, row),
    }
}

fn render_article_row(ui: &mut egui::Ui, ctx: &egui::Context, row: &ArticleRow) {
    let title = egui::RichText::new(&row.title).size(15.0).strong();
    match row.safe_link() {
        Some(url) => {
            let link = ui.add(
                egui::Label::new(title.color(egui::Color32::from_rgb(0, 100, 200)).underline())
                    .sense(egui::Sense::click()),
            );
            if link.clicked() {
                // handed to the system browser: a fresh context with no opener
                ctx.open_url(egui::OpenUrl::new_tab(url.as_str()));
            }
            link.on_hover_cursor(egui::CursorIcon::PointingHand)
                .on_hover_text(truncate_str(url.as_str(), 96));
        }
        None => {
            ui.label(title);
        }
    }

    if !row.description.is_empty() {
        ui.label(&row.description);
    }

    let mut meta = row.tags.clone();
    if let Some(date) = &row.published {
        if !meta.is_empty() {
            meta.push_str(" · ");
        }
        meta.push_str(date);
    }
    if !meta.is_empty() {
        ui.label(egui::RichText::new(meta).small().color(egui::Color32::GRAY));
    }
}

// ─── Text utilities ───────────────────────────────────────────────────────────

/// Truncate `s` to at most `max_chars` Unicode scalar values, appending `"..."` if truncated.
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let t: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", t)
    }
}
