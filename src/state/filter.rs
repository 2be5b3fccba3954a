use crate::model::Article;

/// Current article selection.
///
/// A chaser can only be selected together with the target whose track it
/// runs on, so there are exactly three reachable states (see [`FilterMode`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    target: Option<String>,
    chaser: Option<String>,
}

/// Borrowed view of a [`FilterState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode<'a> {
    All,
    Target(&'a str),
    Pair { target: &'a str, chaser: &'a str },
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finish-line click: show the target's articles.
    pub fn select_target(&mut self, target: &str) {
        self.target = Some(target.to_string());
        self.chaser = None;
    }

    /// Racer click: show articles naming both the chaser and its target.
    pub fn select_chaser(&mut self, target: &str, chaser: &str) {
        self.target = Some(target.to_string());
        self.chaser = Some(chaser.to_string());
    }

    pub fn reset(&mut self) {
        self.target = None;
        self.chaser = None;
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn chaser(&self) -> Option<&str> {
        self.chaser.as_deref()
    }

    pub fn mode(&self) -> FilterMode<'_> {
        match (self.target.as_deref(), self.chaser.as_deref()) {
            (Some(target), Some(chaser)) => FilterMode::Pair { target, chaser },
            (Some(target), None) => FilterMode::Target(target),
            _ => FilterMode::All,
        }
    }

    pub fn matches(&self, article: &Article) -> bool {
        match self.mode() {
            FilterMode::All => true,
            FilterMode::Target(target) => article.mentions(target),
            FilterMode::Pair { target, chaser } => {
                article.mentions(target) && article.mentions(chaser)
            }
        }
    }
}

/// Articles selected by `state`, in source order.
pub fn filter_articles<'a>(articles: &'a [Article], state: &FilterState) -> Vec<&'a Article> {
    articles.iter().filter(|a| state.matches(a)).collect()
}
