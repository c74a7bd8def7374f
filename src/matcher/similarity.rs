use ahash::{AHashMap, AHashSet};

// Scores at or above this are a full containment, no need to look further
const PERFECT_SCORE: f64 = 100.0;

/// A text split into characters, with a position index per character.
///
/// Speeches are long and scored against every quote in their window, so the
/// index is built once when the speech is loaded rather than per comparison.
#[derive(Debug, Clone)]
pub struct PreparedText {
    chars: Vec<char>,
    positions: AHashMap<char, Vec<usize>>,
}

impl PreparedText {
    pub fn new(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let mut positions: AHashMap<char, Vec<usize>> = AHashMap::new();
        for (i, &c) in chars.iter().enumerate() {
            positions.entry(c).or_default().push(i);
        }
        Self { chars, positions }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }
}

/// A run of identical characters: `a[a..a+size] == b[b..b+size]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchingBlock {
    pub a: usize,
    pub b: usize,
    pub size: usize,
}

/// Longest common run between `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Among runs of equal length the one starting earliest in `a` wins, then the
/// one starting earliest in `b`.
fn find_longest_match(
    a: &[char],
    b: &PreparedText,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> MatchingBlock {
    let mut best = MatchingBlock { a: alo, b: blo, size: 0 };
    // Length of the run ending at b[j] for the previous row of a
    let mut j2len: AHashMap<usize, usize> = AHashMap::new();
    let mut new_j2len: AHashMap<usize, usize> = AHashMap::new();

    for i in alo..ahi {
        new_j2len.clear();
        if let Some(js) = b.positions.get(&a[i]) {
            let first = js.partition_point(|&j| j < blo);
            for &j in &js[first..] {
                if j >= bhi {
                    break;
                }
                let k = j
                    .checked_sub(1)
                    .and_then(|prev| j2len.get(&prev).copied())
                    .unwrap_or(0)
                    + 1;
                new_j2len.insert(j, k);
                if k > best.size {
                    best = MatchingBlock { a: i + 1 - k, b: j + 1 - k, size: k };
                }
            }
        }
        std::mem::swap(&mut j2len, &mut new_j2len);
    }

    best
}

/// Recursive longest-match decomposition of `a` against `b`, sorted by
/// position, terminated by the `(len_a, len_b, 0)` sentinel.
pub fn matching_blocks(a: &[char], b: &PreparedText) -> Vec<MatchingBlock> {
    let mut queue = vec![(0, a.len(), 0, b.len())];
    let mut blocks = Vec::new();

    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let block = find_longest_match(a, b, alo, ahi, blo, bhi);
        if block.size == 0 {
            continue;
        }
        blocks.push(block);
        if alo < block.a && blo < block.b {
            queue.push((alo, block.a, blo, block.b));
        }
        if block.a + block.size < ahi && block.b + block.size < bhi {
            queue.push((block.a + block.size, ahi, block.b + block.size, bhi));
        }
    }

    blocks.sort_by_key(|block| (block.a, block.b));
    blocks.push(MatchingBlock { a: a.len(), b: b.len(), size: 0 });
    blocks
}

/// Length of the longest common subsequence, two-row dynamic programming.
fn lcs_length(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
        curr.fill(0);
    }
    prev[b.len()]
}

/// Normalized indel similarity in `[0, 100]`.
fn indel_ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 0.0;
    }
    200.0 * lcs_length(a, b) as f64 / total as f64
}

/// Fuzzy partial match of two prepared texts, see [`partial_ratio`].
pub fn partial_ratio_prepared(a: &PreparedText, b: &PreparedText) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let (shorter, longer) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    let mut best: f64 = 0.0;
    let mut tried = AHashSet::new();

    for block in matching_blocks(shorter.chars(), longer) {
        // Align the shorter text on the block and score the window it covers
        let long_start = block.b.saturating_sub(block.a);
        if !tried.insert(long_start) {
            continue;
        }
        let long_end = (long_start + shorter.len()).min(longer.len());
        let score = indel_ratio(shorter.chars(), &longer.chars()[long_start..long_end]);
        if score >= PERFECT_SCORE {
            return PERFECT_SCORE;
        }
        best = best.max(score);
    }

    best
}

/// Best local alignment score of the shorter string inside the longer one.
///
/// Candidate alignments come from the matching blocks of the two texts; each
/// aligned window of the longer text is scored with the indel similarity.
/// Symmetric in its arguments. Empty input scores 0.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    partial_ratio_prepared(&PreparedText::new(a), &PreparedText::new(b))
}

/// Longest common substring of a plain character slice against a prepared
/// text, as `(offset_in_a, length)` in characters.
pub fn longest_common_substring_prepared(a: &[char], b: &PreparedText) -> (usize, usize) {
    let block = find_longest_match(a, b, 0, a.len(), 0, b.len());
    if block.size == 0 {
        return (0, 0);
    }
    (block.a, block.size)
}

/// Exact longest common contiguous substring, as `(offset_in_a, length)`
/// counted in characters. The earliest occurrence in `a` wins ties; no
/// overlap gives a length of 0.
pub fn longest_common_substring(a: &str, b: &str) -> (usize, usize) {
    let a_chars: Vec<char> = a.chars().collect();
    longest_common_substring_prepared(&a_chars, &PreparedText::new(b))
}

/// Extract `len` characters of `text` starting at character `offset`.
pub fn char_slice(text: &str, offset: usize, len: usize) -> String {
    text.chars().skip(offset).take(len).collect()
}
