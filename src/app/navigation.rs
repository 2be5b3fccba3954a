//! Fetch lifecycle for `RaceApp`.
//!
//! `refresh` issues a request on a worker thread; `check_fetch` polls the
//! channel once per frame and hands the result to the session.

use std::sync::mpsc;

use eframe::egui;

use news_race::net::fetch::{effective_query, fetch_race};
use news_race::state::FetchOutcome;

use super::RaceApp;

impl RaceApp {
    /// Start a fetch for the current query.
    ///
    /// An in-flight request is not cancelled; its receiver is dropped so the
    /// worker's late send goes nowhere, and the session ticket rejects it
    /// regardless.
    pub fn refresh(&mut self, ctx: &egui::Context) {
        let ticket = self.session.begin_fetch();
        self.loading = true;

        let (tx, rx) = mpsc::channel();
        self.fetch_rx = Some(rx);

        let config = self.config.clone();
        let query = effective_query(&self.query_input, &self.config).to_string();
        let ctx = ctx.clone();
        log::info!("fetch {:?} issued for {:?}", ticket, query);

        std::thread::spawn(move || {
            let result = fetch_race(&config, &query);
            let _ = tx.send((ticket, result));
            ctx.request_repaint();
        });
    }

    /// Poll the fetch channel and apply a finished response.
    pub fn check_fetch(&mut self, now: f64) {
        let Some(rx) = &self.fetch_rx else {
            return;
        };

        match rx.try_recv() {
            Ok((ticket, result)) => {
                match self.session.complete_fetch(ticket, result) {
                    FetchOutcome::Applied => {
                        if let Some(dataset) = self.session.dataset() {
                            self.view.rebuild(&dataset.relations, now);
                        }
                    }
                    FetchOutcome::Failed | FetchOutcome::Stale => {}
                }
                if self.session.is_latest(ticket) {
                    self.loading = false;
                    self.fetch_rx = None;
                }
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => {
                log::warn!("fetch worker exited without a response");
                self.loading = false;
                self.fetch_rx = None;
            }
        }
    }
}
