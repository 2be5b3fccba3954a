//! `RaceApp`: the top-level egui application state.
//!
//! This module declares the `RaceApp` struct and its constructor.
//! All methods are split across the sibling sub-modules:
//!
//! - `navigation`: background fetch and response polling
//! - `toolbar`:    query field, refresh button, status line
//! - `content`:    race canvas and article list

pub mod content;
pub mod navigation;
pub mod toolbar;

use std::sync::mpsc;

use eframe::egui;

use news_race::config::RaceConfig;
use news_race::model::RaceDataset;
use news_race::net::fetch::FetchError;
use news_race::render::RaceView;
use news_race::state::{RaceSession, RequestTicket};

pub type FetchMessage = (RequestTicket, Result<RaceDataset, FetchError>);

// ─── Application state ───────────────────────────────────────────────────────

pub struct RaceApp {
    pub config: RaceConfig,
    pub query_input: String,
    pub session: RaceSession,
    pub view: RaceView,
    pub loading: bool,
    pub fetch_rx: Option<mpsc::Receiver<FetchMessage>>,
    pub dark_mode: bool,
    /// The startup load has been issued.
    pub started: bool,
}

impl RaceApp {
    pub fn new(config: RaceConfig) -> Self {
        Self {
            query_input: config.default_query.clone(),
            config,
            session: RaceSession::new(),
            view: RaceView::new(),
            loading: false,
            fetch_rx: None,
            dark_mode: false,
            started: false,
        }
    }
}

impl eframe::App for RaceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.started {
            self.started = true;
            self.refresh(ctx);
        }

        let now = ctx.input(|i| i.time);
        self.check_fetch(now);
        self.view.tick(now);

        if self.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui, ctx);
        });

        egui::TopBottomPanel::bottom("articles")
            .resizable(true)
            .default_height(320.0)
            .show(ctx, |ui| {
                self.draw_articles(ui, ctx);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_race(ui, ctx, now);
        });

        if self.view.is_animating() {
            ctx.request_repaint();
        }
    }
}
