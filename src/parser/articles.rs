// Quote extraction from press articles

use std::io::Read;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use log::trace;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::config::subsystems::ExtractionConfig;
use super::{parse_date, QuoteRow, Result};

lazy_static! {
    // Straight double quotes and French guillemets both open and close quotes
    static ref QUOTE_MARKS: Regex = Regex::new(r#"["«»]"#).unwrap();
}

/// One press article as found in the corpus dump.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub id: Value,
    #[serde(rename = "nativeId", default)]
    pub native_id: Value,
    #[serde(rename = "docTime", default)]
    pub doc_time: Option<String>,
    #[serde(default)]
    pub media: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub document: Option<String>,
    // Either a single url or a list of them
    #[serde(default)]
    pub urls: Value,
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(value_to_string).collect::<Vec<_>>().join("/"),
        other => other.to_string(),
    }
}

impl Article {
    pub fn id_string(&self) -> String {
        value_to_string(&self.id)
    }

    /// Urls joined with `/`.
    pub fn urls_string(&self) -> String {
        value_to_string(&self.urls)
    }
}

/// Stream articles out of a reader holding concatenated JSON values (JSON
/// lines included).
pub fn read_articles<R: Read>(reader: R) -> impl Iterator<Item = Result<Article>> {
    serde_json::Deserializer::from_reader(reader)
        .into_iter::<Article>()
        .map(|article| article.map_err(Into::into))
}

/// Text spans between quote marks: every odd segment once the text is split
/// on `"`, `«` and `»`.
pub fn quoted_spans(document: &str) -> impl Iterator<Item = &str> {
    QUOTE_MARKS.split(document).skip(1).step_by(2)
}

/// Turns articles into quote rows, applying the corpus filters.
pub struct QuoteExtractor {
    min_quote_chars: usize,
    exclude: Option<Regex>,
    min_doc_date: Option<NaiveDate>,
}

impl QuoteExtractor {
    pub fn new(config: &ExtractionConfig) -> crate::error::Result<Self> {
        Ok(Self {
            min_quote_chars: config.min_quote_chars,
            exclude: config.exclude_regex()?,
            min_doc_date: config.min_doc_date,
        })
    }

    /// Whether the article passes the corpus filters at all.
    pub fn accepts(&self, article: &Article) -> bool {
        let document = match &article.document {
            Some(document) => document,
            None => return false,
        };
        if let Some(exclude) = &self.exclude {
            if exclude.is_match(document) {
                trace!("Article {} excluded by pattern", article.id_string());
                return false;
            }
        }
        if let Some(min_date) = self.min_doc_date {
            // Undated articles are kept here and dropped when quotes are read
            let date = article.doc_time.as_deref().and_then(parse_date);
            if matches!(date, Some(date) if date <= min_date) {
                return false;
            }
        }
        true
    }

    /// Quotes longer than the minimum, numbered per article from 0.
    ///
    /// Corpus filters are not applied here; callers check `accepts` first.
    pub fn extract(&self, article: &Article) -> Vec<QuoteRow> {
        let document = article.document.as_deref().unwrap_or_default();
        let article_id = article.id_string();
        let native_id = value_to_string(&article.native_id);
        let doc_time = article.doc_time.clone().unwrap_or_default();
        let media = article.media.clone().unwrap_or_default();
        let title = article.title.clone().unwrap_or_default();
        let urls = article.urls_string();

        quoted_spans(document)
            .filter(|span| span.chars().count() > self.min_quote_chars)
            .enumerate()
            .map(|(sequence, span)| QuoteRow {
                quote_id: format!("{}_{}", sequence, article_id),
                native_id: native_id.clone(),
                doc_time: doc_time.clone(),
                media: media.clone(),
                title: title.clone(),
                quote: span.to_string(),
                urls: urls.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> QuoteExtractor {
        QuoteExtractor::new(&ExtractionConfig::default()).unwrap()
    }

    #[test]
    fn spans_between_any_quote_mark() {
        let document = r#"Il a dit "premier" puis « deuxième » et enfin "troisième"."#;
        let spans: Vec<&str> = quoted_spans(document).collect();
        assert_eq!(spans, vec!["premier", " deuxième ", "troisième"]);
    }

    #[test]
    fn document_starting_with_a_quote() {
        let spans: Vec<&str> = quoted_spans(r#""ouverture" puis rien"#).collect();
        assert_eq!(spans, vec!["ouverture"]);
    }

    #[test]
    fn extraction_filters_short_quotes_and_numbers_the_rest() {
        let json = r#"{"id": 42, "nativeId": "n-42", "docTime": "2021-03-05", "media": "lemonde", "title": "Titre",
            "document": "Le président a déclaré « nous allons reconstruire ensemble une France plus juste » puis \"court\" et \"une autre citation assez longue pour être gardée\".",
            "urls": ["https://a/1", "https://a/2"]}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        let rows = extractor().extract(&article);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].quote_id, "0_42");
        assert_eq!(rows[0].quote, " nous allons reconstruire ensemble une France plus juste ");
        assert_eq!(rows[1].quote_id, "1_42");
        assert_eq!(rows[1].urls, "https://a/1/https://a/2");
        assert_eq!(rows[1].native_id, "n-42");
    }

    #[test]
    fn missing_optional_fields_default_to_empty() {
        let json = r#"{"id": "x", "docTime": "2021-03-05", "title": "T",
            "document": "\"une citation qui dépasse bien les trente-cinq caractères\""}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        let rows = extractor().extract(&article);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].media, "");
        assert_eq!(rows[0].urls, "");
    }

    #[test]
    fn articles_without_document_are_skipped() {
        let article: Article = serde_json::from_str(r#"{"id": 1, "title": "sans texte"}"#).unwrap();
        assert!(extractor().extract(&article).is_empty());
    }

    #[test]
    fn exclusion_pattern_and_minimum_date() {
        let mut config = ExtractionConfig::default();
        config.exclude_pattern = "hollandais|en Hollande".to_string();
        config.min_doc_date = NaiveDate::from_ymd_opt(1995, 1, 1);
        let extractor = QuoteExtractor::new(&config).unwrap();

        let quote = "\"une citation qui dépasse bien les trente-cinq caractères\"";
        let dutch = Article {
            document: Some(format!("Le gouvernement hollandais {}", quote)),
            doc_time: Some("2012-01-01".to_string()),
            ..Article::default()
        };
        let old = Article {
            document: Some(quote.to_string()),
            doc_time: Some("1994-12-31".to_string()),
            ..Article::default()
        };
        let recent = Article {
            document: Some(quote.to_string()),
            doc_time: Some("2012-01-01".to_string()),
            ..Article::default()
        };
        assert!(!extractor.accepts(&dutch));
        assert!(!extractor.accepts(&old));
        assert!(extractor.accepts(&recent));
    }

    #[test]
    fn extract_does_not_filter_again() {
        let mut config = ExtractionConfig::default();
        config.exclude_pattern = "hollandais".to_string();
        let extractor = QuoteExtractor::new(&config).unwrap();
        let dutch = Article {
            document: Some("Le gouvernement hollandais \"une citation qui dépasse bien les trente-cinq caractères\"".to_string()),
            doc_time: Some("2012-01-01".to_string()),
            ..Article::default()
        };
        assert!(!extractor.accepts(&dutch));
        assert_eq!(extractor.extract(&dutch).len(), 1);
    }

    #[test]
    fn articles_stream_from_json_lines() {
        let input = "{\"id\": 1, \"document\": \"a\"}\n{\"id\": 2}\n";
        let articles: Vec<Article> = read_articles(input.as_bytes()).map(|a| a.unwrap()).collect();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[1].id_string(), "2");
    }
}
