use chrono::{Days, NaiveDate};
use log::{debug, trace};

use crate::types::{SpeechId, SpeechRecord};
use super::similarity::{partial_ratio_prepared, PreparedText};

struct IndexedSpeech {
    record: SpeechRecord,
    prepared: PreparedText,
}

/// All speeches of a run, queryable by trailing date window.
///
/// Speeches keep their table order, which decides ties between equal scores.
/// A separate date-sorted index answers window queries without a full scan.
pub struct DiscourseIndex {
    speeches: Vec<IndexedSpeech>,
    // (date, slot in `speeches`), sorted
    by_date: Vec<(NaiveDate, usize)>,
}

impl DiscourseIndex {
    pub fn new(records: Vec<SpeechRecord>) -> Self {
        let speeches: Vec<IndexedSpeech> = records
            .into_iter()
            .map(|record| {
                let prepared = PreparedText::new(&record.content);
                IndexedSpeech { record, prepared }
            })
            .collect();

        let mut by_date: Vec<(NaiveDate, usize)> = speeches
            .iter()
            .enumerate()
            .map(|(slot, speech)| (speech.record.date, slot))
            .collect();
        by_date.sort_unstable();

        debug!("Indexed {} speeches", speeches.len());
        Self { speeches, by_date }
    }

    pub fn len(&self) -> usize {
        self.speeches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.speeches.is_empty()
    }

    /// Slots of speeches dated within `[date - trailing_days, date]`, in table order.
    fn window_slots(&self, date: NaiveDate, trailing_days: u32) -> Vec<usize> {
        let start = date
            .checked_sub_days(Days::new(u64::from(trailing_days)))
            .unwrap_or(NaiveDate::MIN);

        let lo = self.by_date.partition_point(|(d, _)| *d < start);
        let hi = self.by_date.partition_point(|(d, _)| *d <= date);

        let mut slots: Vec<usize> = self.by_date[lo..hi].iter().map(|(_, slot)| *slot).collect();
        slots.sort_unstable();
        slots
    }

    /// Speeches with `date - trailing_days <= speech.date <= date`, in table order.
    pub fn candidates_within_window(&self, date: NaiveDate, trailing_days: u32) -> Vec<&SpeechRecord> {
        self.window_slots(date, trailing_days)
            .into_iter()
            .map(|slot| &self.speeches[slot].record)
            .collect()
    }

    /// Partial-ratio score of every candidate in the window, in table order.
    pub fn score_candidates(&self, quote_text: &str, date: NaiveDate, trailing_days: u32) -> Vec<(SpeechId, f64)> {
        let slots = self.window_slots(date, trailing_days);
        if slots.is_empty() {
            return Vec::new();
        }
        let quote = PreparedText::new(quote_text);
        slots
            .into_iter()
            .map(|slot| {
                let speech = &self.speeches[slot];
                (speech.record.id, partial_ratio_prepared(&speech.prepared, &quote))
            })
            .collect()
    }

    /// The best-scoring speech in the window if its score strictly exceeds
    /// `threshold`. The first maximum in table order wins ties.
    pub fn best_match(
        &self,
        quote_text: &str,
        date: NaiveDate,
        trailing_days: u32,
        threshold: f64,
    ) -> Option<SpeechId> {
        let scores = self.score_candidates(quote_text, date, trailing_days);
        if scores.is_empty() {
            trace!("No speech within {} days before {}", trailing_days, date);
            return None;
        }

        let mut best: Option<(SpeechId, f64)> = None;
        for (id, score) in scores {
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((id, score));
            }
        }

        match best {
            Some((id, score)) if score > threshold => {
                trace!("Quote dated {} attributed to speech {} (score {:.1})", date, id, score);
                Some(id)
            }
            Some((id, score)) => {
                trace!("Best speech {} scored {:.1}, not above {:.1}", id, score, threshold);
                None
            }
            None => None,
        }
    }
}
