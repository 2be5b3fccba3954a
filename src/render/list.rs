//! Article list projection.
//!
//! Turns (articles, filter) into the title and rows the list panel shows.
//! Pure: no egui types, no state.

use url::Url;

use crate::model::Article;
use crate::state::filter::{filter_articles, FilterMode, FilterState};

/// Rows beyond this are silently dropped.
pub const MAX_LISTED: usize = 80;

pub const LIST_TITLE: &str = "관련 기사";
pub const EMPTY_MESSAGE: &str = "표시할 기사가 없습니다.";
pub const FETCH_ERROR_MESSAGE: &str = "API 오류가 발생했습니다. 서버 설정을 확인하세요.";

const EMPHASIS_MARKERS: &[&str] = &["<b>", "</b>"];

#[derive(Debug, Clone, PartialEq)]
pub struct ArticleListView {
    pub title: String,
    pub entries: Vec<ListEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListEntry {
    Article(ArticleRow),
    /// Plain message row (empty result or fetch failure).
    Notice(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArticleRow {
    pub title: String,
    pub description: String,
    pub link: String,
    /// Space-separated entity tags.
    pub tags: String,
    pub published: Option<String>,
}

impl ArticleRow {
    pub fn from_article(article: &Article) -> Self {
        Self {
            title: strip_emphasis(&article.title),
            description: strip_emphasis(&article.description),
            link: article.link.clone(),
            tags: article.companies.join(" "),
            published: article.pub_date.clone().filter(|d| !d.is_empty()),
        }
    }

    /// The link, if it is safe to hand to the system browser.
    pub fn safe_link(&self) -> Option<Url> {
        Url::parse(&self.link)
            .ok()
            .filter(|u| matches!(u.scheme(), "http" | "https"))
    }
}

impl ArticleListView {
    /// Project `articles` through `filter`.
    pub fn project(articles: &[Article], filter: &FilterState) -> Self {
        let matched = filter_articles(articles, filter);
        let entries = if matched.is_empty() {
            vec![ListEntry::Notice(EMPTY_MESSAGE.to_string())]
        } else {
            matched
                .into_iter()
                .take(MAX_LISTED)
                .map(|a| ListEntry::Article(ArticleRow::from_article(a)))
                .collect()
        };
        Self {
            title: list_title(filter),
            entries,
        }
    }

    /// The single-entry list shown after a failed fetch.
    pub fn fetch_failed(filter: &FilterState) -> Self {
        Self {
            title: list_title(filter),
            entries: vec![ListEntry::Notice(FETCH_ERROR_MESSAGE.to_string())],
        }
    }

    pub fn article_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, ListEntry::Article(_)))
            .count()
    }
}

pub fn list_title(filter: &FilterState) -> String {
    match filter.mode() {
        FilterMode::All => LIST_TITLE.to_string(),
        FilterMode::Target(target) => format!("{} · 리더 {}", LIST_TITLE, target),
        FilterMode::Pair { target, chaser } => {
            format!("{} · {} → {}", LIST_TITLE, chaser, target)
        }
    }
}

/// Remove literal `<b>` / `</b>` emphasis markers.
pub fn strip_emphasis(text: &str) -> String {
    EMPHASIS_MARKERS
        .iter()
        .fold(text.to_string(), |acc, marker| acc.replace(marker, ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, companies: &[&str]) -> Article {
        Article {
            title: title.to_string(),
            description: format!("<b>{}</b> desc", title),
            link: "https://news.example.com/1".to_string(),
            pub_date: None,
            companies: companies.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn strips_bold_markers_only() {
        assert_eq!(strip_emphasis("<b>Co</b> wins"), "Co wins");
        assert_eq!(strip_emphasis("a <i>b</i> <b>c"), "a <i>b</i> c");
        assert_eq!(strip_emphasis(""), "");
    }

    #[test]
    fn titles_follow_filter_state() {
        let mut filter = FilterState::new();
        assert_eq!(list_title(&filter), "관련 기사");
        filter.select_target("Alpha");
        assert_eq!(list_title(&filter), "관련 기사 · 리더 Alpha");
        filter.select_chaser("Alpha", "Beta");
        assert_eq!(list_title(&filter), "관련 기사 · Beta → Alpha");
    }

    #[test]
    fn empty_result_yields_one_placeholder() {
        let articles = vec![article("x", &["Alpha"])];
        let mut filter = FilterState::new();
        filter.select_target("Gamma");
        let view = ArticleListView::project(&articles, &filter);
        assert_eq!(view.entries, vec![ListEntry::Notice(EMPTY_MESSAGE.to_string())]);
        assert_eq!(view.article_count(), 0);

        let view = ArticleListView::project(&[], &FilterState::new());
        assert_eq!(view.entries.len(), 1);
    }

    #[test]
    fn caps_at_eighty_rows() {
        let articles: Vec<Article> = (0..120)
            .map(|i| article(&format!("t{}", i), &["Alpha"]))
            .collect();
        let view = ArticleListView::project(&articles, &FilterState::new());
        assert_eq!(view.entries.len(), MAX_LISTED);
        match &view.entries[79] {
            ListEntry::Article(row) => assert_eq!(row.title, "t79"),
            other => panic!("unexpected entry {:?}", other),
        }
    }

    #[test]
    fn rows_are_sanitized_and_tagged() {
        let mut a = article("<b>Co</b> wins", &["Alpha", "Beta"]);
        a.pub_date = Some("Mon, 01 Jan 2024".to_string());
        let row = ArticleRow::from_article(&a);
        assert_eq!(row.title, "Co wins");
        assert_eq!(row.description, "Co wins desc");
        assert_eq!(row.tags, "Alpha Beta");
        assert_eq!(row.published.as_deref(), Some("Mon, 01 Jan 2024"));
    }

    #[test]
    fn only_web_links_are_openable() {
        let mut row = ArticleRow::from_article(&article("x", &[]));
        assert!(row.safe_link().is_some());
        row.link = "javascript:alert(1)".to_string();
        assert!(row.safe_link().is_none());
        row.link = "not a link".to_string();
        assert!(row.safe_link().is_none());
    }

    #[test]
    fn projection_is_idempotent() {
        let articles = vec![article("a", &["Alpha", "Beta"]), article("b", &["Beta"])];
        let mut filter = FilterState::new();
        filter.select_chaser("Alpha", "Beta");
        assert_eq!(
            ArticleListView::project(&articles, &filter),
            ArticleListView::project(&articles, &filter)
        );
    }

    #[test]
    fn fetch_failure_is_a_single_entry() {
        let view = ArticleListView::fetch_failed(&FilterState::new());
        assert_eq!(
            view.entries,
            vec![ListEntry::Notice(FETCH_ERROR_MESSAGE.to_string())]
        );
    }
}
