//! `RaceSession`: the single owner of the dataset and the filter selection.
//!
//! Every mutation goes through a named transition:
//!
//! - `begin_fetch` / `complete_fetch`: request sequencing and dataset swap
//! - `select_target` / `select_chaser`: pointer clicks
//!
//! Each transition recomputes the article list; the dataset itself is never
//! modified after it arrives.

use crate::model::RaceDataset;
use crate::net::fetch::FetchError;
use crate::render::layout::Selection;
use crate::render::list::ArticleListView;
use crate::state::filter::FilterState;

/// Identifies one issued fetch; only the newest ticket may land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// New dataset in place, selection cleared. The race must be re-laid out.
    Applied,
    /// Error shown in the list; dataset and selection untouched.
    Failed,
    /// A newer request was issued since; the response was dropped.
    Stale,
}

pub struct RaceSession {
    dataset: Option<RaceDataset>,
    filter: FilterState,
    list: ArticleListView,
    issued: u64,
    last_error: Option<String>,
}

impl RaceSession {
    pub fn new() -> Self {
        let filter = FilterState::new();
        Self {
            dataset: None,
            list: ArticleListView::project(&[], &filter),
            filter,
            issued: 0,
            last_error: None,
        }
    }

    pub fn dataset(&self) -> Option<&RaceDataset> {
        self.dataset.as_ref()
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn article_list(&self) -> &ArticleListView {
        &self.list
    }

    /// Message of the most recent failed fetch, cleared by the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn begin_fetch(&mut self) -> RequestTicket {
        self.issued += 1;
        RequestTicket(self.issued)
    }

    pub fn is_latest(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.issued
    }

    pub fn complete_fetch(
        &mut self,
        ticket: RequestTicket,
        result: Result<RaceDataset, FetchError>,
    ) -> FetchOutcome {
        if !self.is_latest(ticket) {
            log::warn!(
                "dropping stale response #{} (latest is #{})",
                ticket.0,
                self.issued
            );
            return FetchOutcome::Stale;
        }

        match result {
            Ok(dataset) => {
                self.dataset = Some(dataset);
                self.filter.reset();
                self.last_error = None;
                self.refresh_list();
                FetchOutcome::Applied
            }
            Err(err) => {
                log::error!("fetch #{} failed: {}", ticket.0, err);
                self.last_error = Some(err.to_string());
                self.list = ArticleListView::fetch_failed(&self.filter);
                FetchOutcome::Failed
            }
        }
    }

    pub fn select_target(&mut self, target: &str) {
        self.filter.select_target(target);
        self.refresh_list();
    }

    pub fn select_chaser(&mut self, target: &str, chaser: &str) {
        self.filter.select_chaser(target, chaser);
        self.refresh_list();
    }

    /// Route a canvas click to the matching transition.
    pub fn apply_selection(&mut self, selection: &Selection) {
        match selection {
            Selection::Target(target) => self.select_target(target),
            Selection::Chaser { target, chaser } => self.select_chaser(target, chaser),
        }
    }

    fn refresh_list(&mut self) {
        let articles = self
            .dataset
            .as_ref()
            .map(|d| d.articles.as_slice())
            .unwrap_or(&[]);
        self.list = ArticleListView::project(articles, &self.filter);
    }
}

impl Default for RaceSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::list::{ListEntry, EMPTY_MESSAGE, FETCH_ERROR_MESSAGE};

    const SCENARIO: &str = r#"{
        "articles": [{"title": "<b>Co</b> wins", "description": "d",
                      "link": "https://x", "companies": ["Alpha", "Beta"]}],
        "relations": {"Alpha": {"chasers": {"Beta": {"score": 10}, "기타": {"score": 99}}}}
    }"#;

    fn scenario() -> RaceDataset {
        RaceDataset::from_json(SCENARIO).unwrap()
    }

    fn titles(session: &RaceSession) -> Vec<String> {
        session
            .article_list()
            .entries
            .iter()
            .map(|e| match e {
                ListEntry::Article(row) => row.title.clone(),
                ListEntry::Notice(msg) => msg.clone(),
            })
            .collect()
    }

    #[test]
    fn load_then_click_chaser() {
        let mut session = RaceSession::new();
        let ticket = session.begin_fetch();
        assert_eq!(session.complete_fetch(ticket, Ok(scenario())), FetchOutcome::Applied);
        assert_eq!(titles(&session), ["Co wins"]);
        assert_eq!(session.article_list().title, "관련 기사");

        session.apply_selection(&Selection::Chaser {
            target: "Alpha".to_string(),
            chaser: "Beta".to_string(),
        });
        assert_eq!(session.filter().target(), Some("Alpha"));
        assert_eq!(session.filter().chaser(), Some("Beta"));
        assert_eq!(titles(&session), ["Co wins"]);
        assert!(session.article_list().title.contains("Beta → Alpha"));
    }

    #[test]
    fn empty_before_first_load() {
        let session = RaceSession::new();
        assert!(session.dataset().is_none());
        assert_eq!(titles(&session), [EMPTY_MESSAGE]);
    }

    #[test]
    fn new_dataset_resets_selection() {
        let mut session = RaceSession::new();
        let t = session.begin_fetch();
        session.complete_fetch(t, Ok(scenario()));
        session.select_target("Alpha");

        let t = session.begin_fetch();
        assert_eq!(session.filter().target(), Some("Alpha"));
        session.complete_fetch(t, Ok(scenario()));
        assert_eq!(*session.filter(), FilterState::new());
    }

    #[test]
    fn failure_keeps_previous_state() {
        let mut session = RaceSession::new();
        let t = session.begin_fetch();
        session.complete_fetch(t, Ok(scenario()));
        session.select_target("Alpha");

        let t = session.begin_fetch();
        let outcome = session.complete_fetch(t, Err(FetchError::Status { status: 502 }));
        assert_eq!(outcome, FetchOutcome::Failed);
        assert_eq!(titles(&session), [FETCH_ERROR_MESSAGE]);
        assert_eq!(session.filter().target(), Some("Alpha"));
        assert_eq!(session.dataset(), Some(&scenario()));
        assert!(session.last_error().unwrap().contains("502"));

        // next click redraws from the retained articles
        session.select_chaser("Alpha", "Beta");
        assert_eq!(titles(&session), ["Co wins"]);
    }

    #[test]
    fn failure_on_first_load_shows_only_error() {
        let mut session = RaceSession::new();
        let t = session.begin_fetch();
        session.complete_fetch(t, Err(FetchError::Status { status: 500 }));
        assert!(session.dataset().is_none());
        assert_eq!(titles(&session), [FETCH_ERROR_MESSAGE]);
    }

    #[test]
    fn stale_responses_are_dropped() {
        let mut session = RaceSession::new();
        let slow = session.begin_fetch();
        let fast = session.begin_fetch();
        assert!(slow < fast);

        assert_eq!(session.complete_fetch(fast, Ok(scenario())), FetchOutcome::Applied);
        assert_eq!(
            session.complete_fetch(slow, Ok(RaceDataset::default())),
            FetchOutcome::Stale
        );
        assert_eq!(session.dataset(), Some(&scenario()));

        let failing_slow = slow;
        assert_eq!(
            session.complete_fetch(failing_slow, Err(FetchError::Status { status: 500 })),
            FetchOutcome::Stale
        );
        assert_eq!(titles(&session), ["Co wins"]);
    }

    #[test]
    fn target_click_on_unmatched_target_shows_placeholder() {
        let mut session = RaceSession::new();
        let t = session.begin_fetch();
        session.complete_fetch(t, Ok(scenario()));
        session.select_target("Nobody");
        assert_eq!(titles(&session), [EMPTY_MESSAGE]);
        assert_eq!(session.article_list().title, "관련 기사 · 리더 Nobody");
    }
}
