//! Race payload as delivered by the news backend.
//!
//! Decoding is lenient: absent or `null` collections become empty. Numeric
//! strings are accepted as scores; any other score that is missing, negative,
//! not finite or not a number becomes `0.0`.
//! Only a body that is not a JSON object at all is rejected.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Entity that is never drawn as a racer ("other").
pub const SENTINEL_ENTITY: &str = "기타";

/// Root object returned by `/api/news`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RaceDataset {
    /// Search string echoed back by the backend.
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub articles: Vec<Article>,
    /// Target name → relation, in the order the backend emitted them.
    #[serde(default, deserialize_with = "null_as_default")]
    pub relations: IndexMap<String, TargetRelation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub link: String,
    #[serde(default, rename = "pubDate")]
    pub pub_date: Option<String>,
    /// Entity tags, unique per article.
    #[serde(default, deserialize_with = "null_as_default")]
    pub companies: Vec<String>,
}

impl Article {
    pub fn mentions(&self, entity: &str) -> bool {
        self.companies.iter().any(|c| c == entity)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetRelation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub chasers: IndexMap<String, ChaserStat>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChaserStat {
    #[serde(default, deserialize_with = "score_or_zero")]
    pub score: f64,
}

impl RaceDataset {
    /// Decode a response body.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty() && self.relations.is_empty()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Any JSON value found under `score`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawScore {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

fn score_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let score = match Option::<RawScore>::deserialize(deserializer)? {
        Some(RawScore::Number(n)) => n,
        Some(RawScore::Text(text)) => text.trim().parse().unwrap_or(0.0),
        Some(RawScore::Other(value)) => {
            log::debug!("non-numeric score {}, using 0", value);
            0.0
        }
        None => 0.0,
    };
    if score.is_finite() && score > 0.0 {
        Ok(score)
    } else {
        Ok(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_payload() {
        let body = r#"{
            "query": "게섰거라",
            "articles": [{
                "title": "<b>Co</b> wins",
                "description": "d",
                "link": "https://x",
                "pubDate": "Mon, 01 Jan 2024 00:00:00 +0900",
                "companies": ["Alpha", "Beta"],
                "raw": "ignored"
            }],
            "relations": {
                "Alpha": {"target": "Alpha", "chasers": {"Beta": {"score": 10, "articles": []}}}
            },
            "positions": {"Beta": 0.95}
        }"#;
        let data = RaceDataset::from_json(body).unwrap();
        assert_eq!(data.query.as_deref(), Some("게섰거라"));
        assert_eq!(data.articles.len(), 1);
        assert!(data.articles[0].mentions("Beta"));
        assert_eq!(data.relations["Alpha"].chasers["Beta"].score, 10.0);
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let data = RaceDataset::from_json("{}").unwrap();
        assert!(data.is_empty());

        let data = RaceDataset::from_json(r#"{"articles": null, "relations": null}"#).unwrap();
        assert!(data.is_empty());

        let data = RaceDataset::from_json(r#"{"relations": {"A": {}}}"#).unwrap();
        assert!(data.relations["A"].chasers.is_empty());
    }

    #[test]
    fn degenerate_scores_become_zero() {
        let body = r#"{"relations": {"A": {"chasers": {
            "B": {}, "C": {"score": null}, "D": {"score": -3.5}, "E": {"score": 0.3}
        }}}}"#;
        let data = RaceDataset::from_json(body).unwrap();
        let chasers = &data.relations["A"].chasers;
        assert_eq!(chasers["B"].score, 0.0);
        assert_eq!(chasers["C"].score, 0.0);
        assert_eq!(chasers["D"].score, 0.0);
        assert_eq!(chasers["E"].score, 0.3);
    }

    #[test]
    fn mistyped_scores_do_not_sink_the_payload() {
        let body = r#"{"relations": {"A": {"chasers": {
            "B": {"score": "10"}, "C": {"score": "lots"}, "D": {"score": [1]},
            "E": {"score": {"v": 2}}, "F": {"score": true}, "G": {"score": 4}
        }}}}"#;
        let data = RaceDataset::from_json(body).unwrap();
        let scores: Vec<f64> = data.relations["A"]
            .chasers
            .values()
            .map(|c| c.score)
            .collect();
        assert_eq!(scores, [10.0, 0.0, 0.0, 0.0, 0.0, 4.0]);
    }

    #[test]
    fn relations_keep_source_order() {
        let body = r#"{"relations": {"Zeta": {}, "Alpha": {}, "Mu": {}}}"#;
        let data = RaceDataset::from_json(body).unwrap();
        let order: Vec<&str> = data.relations.keys().map(String::as_str).collect();
        assert_eq!(order, ["Zeta", "Alpha", "Mu"]);
    }

    #[test]
    fn rejects_non_object_body() {
        assert!(RaceDataset::from_json("<html>502</html>").is_err());
        assert!(RaceDataset::from_json("[1, 2]").is_err());
    }
}
