use crate::types::{ClusterId, QuoteRecord, SpeechId};
use crate::matcher::similarity::{char_slice, longest_common_substring_prepared, PreparedText};

#[derive(Debug, Clone)]
struct ClusterMember {
    quote: QuoteRecord,
    // Members are compared against every later quote of the discourse
    prepared: PreparedText,
}

/// Quotes of one discourse judged to restate the same passage.
///
/// The first member is the quote that created the cluster. `matched` holds the
/// longest substring shared by a joining quote and a member so far; it only
/// ever grows.
#[derive(Debug, Clone)]
pub struct QuoteCluster {
    id: ClusterId,
    discourse: SpeechId,
    members: Vec<ClusterMember>,
    matched: String,
    matched_len: usize,
}

impl QuoteCluster {
    pub fn new(id: ClusterId, seed: QuoteRecord, discourse: SpeechId) -> Self {
        let mut cluster = Self {
            id,
            discourse,
            members: Vec::with_capacity(1),
            matched: String::new(),
            matched_len: 0,
        };
        cluster.add_quote(seed);
        cluster
    }

    pub fn id(&self) -> ClusterId {
        self.id
    }

    pub fn discourse(&self) -> SpeechId {
        self.discourse
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> impl Iterator<Item = &QuoteRecord> + '_ {
        self.members.iter().map(|member| &member.quote)
    }

    pub fn add_quote(&mut self, quote: QuoteRecord) {
        let prepared = PreparedText::new(&quote.text);
        self.members.push(ClusterMember { quote, prepared });
    }

    /// Keep `candidate` if it is longer than the current match.
    pub fn add_match(&mut self, candidate: &str) {
        let len = candidate.chars().count();
        if len > self.matched_len {
            self.matched = candidate.to_string();
            self.matched_len = len;
        }
    }

    /// Longest substring recorded so far, empty for a lone seed.
    pub fn matched(&self) -> &str {
        &self.matched
    }

    /// Text reported for the cluster: the shared substring, or the seed's
    /// own text when no other quote ever joined.
    pub fn display_match(&self) -> &str {
        if self.members.len() > 1 {
            &self.matched
        } else {
            self.members.first().map(|m| m.quote.text.as_str()).unwrap_or("")
        }
    }

    /// First member, in insertion order, sharing more than `min_common_len`
    /// contiguous characters with `quote_chars`; returns the shared text.
    pub fn common_substring_with(
        &self,
        quote_text: &str,
        quote_chars: &[char],
        min_common_len: usize,
    ) -> Option<String> {
        self.members.iter().find_map(|member| {
            let (offset, len) = longest_common_substring_prepared(quote_chars, &member.prepared);
            if len > min_common_len {
                Some(char_slice(quote_text, offset, len))
            } else {
                None
            }
        })
    }

    pub fn urls(&self) -> Vec<&str> {
        self.members().map(|q| q.urls.as_str()).collect()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.members().map(|q| q.title.as_str()).collect()
    }

    pub fn dates(&self) -> Vec<String> {
        self.members().map(|q| q.date.format("%Y-%m-%d").to_string()).collect()
    }

    /// Originating article ids of the members.
    pub fn origin_ids(&self) -> Vec<&str> {
        self.members().map(|q| q.native_id.as_str()).collect()
    }

    pub(crate) fn renumber(&mut self, id: ClusterId) {
        self.id = id;
    }
}
