use chrono::NaiveDate;

/// Row number of a speech in its source table.
pub type SpeechId = usize;

/// Dense cluster identifier, allocated in creation order.
pub type ClusterId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRecord {
    pub id: SpeechId,
    pub speaker: String,
    pub date: NaiveDate,
    pub content: String,
}

/// A quoted span extracted from one press article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRecord {
    /// `{sequence}_{article_id}`, sequence counting kept quotes in the article
    pub id: String,
    /// Identifier of the originating article in the publisher's system
    pub native_id: String,
    pub date: NaiveDate,
    pub media: String,
    pub title: String,
    pub text: String,
    /// `/`-joined url list
    pub urls: String,
}

/// A quote bound to the discourse it was attributed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributedQuote {
    /// Arrival index of the quote in the quote stream
    pub position: usize,
    pub discourse: SpeechId,
    pub quote: QuoteRecord,
}

impl AttributedQuote {
    /// Identifier used on the source side of the bipartite graph.
    pub fn source_id(&self) -> String {
        format!("{}_{}", self.discourse, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_id_combines_discourse_and_position() {
        let quote = QuoteRecord {
            id: "0_42".to_string(),
            native_id: "n42".to_string(),
            date: NaiveDate::from_ymd_opt(2021, 3, 5).unwrap(),
            media: "lemonde".to_string(),
            title: "Titre".to_string(),
            text: "une phrase".to_string(),
            urls: String::new(),
        };
        let attributed = AttributedQuote { position: 17, discourse: 3, quote };
        assert_eq!(attributed.source_id(), "3_17");
    }
}
