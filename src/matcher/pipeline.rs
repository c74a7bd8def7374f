// matcher/pipeline.rs

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, trace, warn};
use rayon::prelude::*;

use crate::config::subsystems::{
    AttributionConfig, ClusteringConfig, ExtractionConfig, PipelineMode, ProcessorConfig,
};
use crate::config::DiscoursConfig;
use crate::error::{Error, Result};
use crate::matcher::cluster::ClusterStore;
use crate::matcher::discourse::DiscourseIndex;
use crate::matcher::graph::BipartiteGraph;
use crate::parser::articles::{read_articles, QuoteExtractor};
use crate::parser::{read_attributed_quotes, AttributedRow, QuoteRow};
use crate::storage::TableWriter;
use crate::types::{AttributedQuote, ClusterId, QuoteRecord, SpeechId};

/// Counters of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchStats {
    pub quotes_seen: usize,
    pub quotes_attributed: usize,
    pub quotes_unassigned: usize,
    pub batches: usize,
    pub discourses: usize,
    pub clusters: usize,
    pub edges: usize,
}

/// Everything a run produces; tables are written from it by `storage`.
#[derive(Debug)]
pub struct MatchOutcome {
    pub clusters: ClusterStore,
    pub graph: BipartiteGraph,
    pub stats: MatchStats,
}

// Clusters and edges of a single discourse, ids local to `store`
struct GroupClusters {
    store: ClusterStore,
    edges: Vec<(String, ClusterId)>,
}

/// Attribution, then per-discourse clustering, then edge recording.
pub struct MatchingPipeline<'a> {
    index: &'a DiscourseIndex,
    attribution: AttributionConfig,
    clustering: ClusteringConfig,
    processor: ProcessorConfig,
    attributed_path: PathBuf,
    thread_pool: Option<Arc<rayon::ThreadPool>>,
    interrupt: Option<Arc<AtomicBool>>,
    show_progress: bool,
}

impl<'a> MatchingPipeline<'a> {
    pub fn new(config: &DiscoursConfig, index: &'a DiscourseIndex) -> Result<Self> {
        let processor = config.processor.clone();
        let thread_pool = if processor.parallel_thread_count > 0 {
            Some(rayon::ThreadPoolBuilder::new()
                .num_threads(processor.parallel_thread_count)
                .thread_name(|i| format!("discours-worker-{}", i))
                .build()?)
        } else {
            None // rayon's global pool
        };
        let threads = if processor.parallel_thread_count > 0 {
            processor.parallel_thread_count
        } else {
            num_cpus::get()
        };
        debug!("Matching pipeline using {} worker threads, batches of {}", threads, processor.batch_size);

        Ok(Self {
            index,
            attribution: config.attribution.clone(),
            clustering: config.clustering.clone(),
            processor,
            attributed_path: config.files.attributed_file.clone(),
            thread_pool: thread_pool.map(Arc::new),
            interrupt: None,
            show_progress: false,
        })
    }

    /// Stop between attribution batches once `flag` is raised.
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    fn install<T: Send>(&self, op: impl FnOnce() -> T + Send) -> T {
        match &self.thread_pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    fn progress_bar(&self, len: Option<u64>, template: &str) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let bar = match len {
            Some(len) => ProgressBar::new(len),
            None => ProgressBar::new_spinner(),
        };
        if let Ok(style) = ProgressStyle::default_bar().template(template) {
            bar.set_style(style.progress_chars("#>-"));
        }
        bar
    }

    fn check_interrupt(&self, batches_done: usize) -> Result<()> {
        match &self.interrupt {
            Some(flag) if flag.load(Ordering::SeqCst) => {
                warn!("Interrupt received, stopping after {} batches", batches_done);
                Err(Error::interrupted(format!(
                    "stopped after {} attribution batches",
                    batches_done
                )))
            }
            _ => Ok(()),
        }
    }

    /// Attribute one batch in parallel. Results come back in input order and
    /// unassigned quotes are dropped.
    pub fn attribute_batch(&self, batch: Vec<(usize, QuoteRecord)>) -> (Vec<AttributedQuote>, usize) {
        let index = self.index;
        let trailing_days = self.attribution.trailing_days;
        let threshold = self.attribution.threshold();

        let decisions: Vec<Option<SpeechId>> = self.install(|| {
            batch
                .par_iter()
                .map(|(_, quote)| index.best_match(&quote.text, quote.date, trailing_days, threshold))
                .collect()
        });

        let mut unassigned = 0;
        let attributed = batch
            .into_iter()
            .zip(decisions)
            .filter_map(|((position, quote), decision)| match decision {
                Some(discourse) => Some(AttributedQuote { position, discourse, quote }),
                None => {
                    debug!("Quote {} at position {} left unassigned", quote.id, position);
                    unassigned += 1;
                    None
                }
            })
            .collect();
        (attributed, unassigned)
    }

    /// Run attribution over the quote stream, handing every attributed batch
    /// to `sink` in order.
    fn attribute_stream<I, E, F>(&self, quotes: I, stats: &mut MatchStats, mut sink: F) -> Result<()>
    where
        I: IntoIterator<Item = std::result::Result<(usize, QuoteRecord), E>>,
        E: Into<Error>,
        F: FnMut(Vec<AttributedQuote>) -> Result<()>,
    {
        let batch_size = self.processor.batch_size.max(1);
        let progress = self.progress_bar(
            None,
            "{spinner:.green} [{elapsed_precise}] {pos} quotes read, {msg}",
        );

        let mut quotes = quotes.into_iter().peekable();
        // Interrupts only matter while quotes remain to be read
        while quotes.peek().is_some() {
            self.check_interrupt(stats.batches)?;

            let mut batch = Vec::with_capacity(batch_size);
            for item in quotes.by_ref() {
                batch.push(item.map_err(Into::into)?);
                if batch.len() == batch_size {
                    break;
                }
            }

            let read = batch.len();
            let (attributed, unassigned) = self.attribute_batch(batch);
            stats.quotes_seen += read;
            stats.quotes_attributed += attributed.len();
            stats.quotes_unassigned += unassigned;
            stats.batches += 1;

            if self.processor.debug {
                info!("Batch {}: {} quotes, {} attributed", stats.batches, read, attributed.len());
            }
            sink(attributed)?;

            progress.inc(read as u64);
            progress.set_message(format!("{} attributed", stats.quotes_attributed));
        }
        progress.finish_and_clear();
        Ok(())
    }

    /// Attribute every quote of the stream to a discourse, according to the
    /// configured mode. Streaming mode persists each batch to the attributed
    /// table before reading the whole table back.
    pub fn attribute<I, E>(&self, quotes: I, stats: &mut MatchStats) -> Result<Vec<AttributedQuote>>
    where
        I: IntoIterator<Item = std::result::Result<(usize, QuoteRecord), E>>,
        E: Into<Error>,
    {
        let threshold = self.attribution.threshold();
        info!("Attributing quotes ({} mode, threshold {}, {} trailing days)",
            self.attribution.mode.as_str(), threshold, self.attribution.trailing_days);

        match self.attribution.mode {
            PipelineMode::Exact => {
                let mut attributed = Vec::new();
                self.attribute_stream(quotes, stats, |batch| {
                    attributed.extend(batch);
                    Ok(())
                })?;
                Ok(attributed)
            }
            PipelineMode::Streaming => {
                if let Some(parent) = self.attributed_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)?;
                }
                let mut writer = TableWriter::<AttributedRow>::create(&self.attributed_path)?;
                self.attribute_stream(quotes, stats, |batch| {
                    let rows: Vec<AttributedRow> = batch.iter().map(AttributedRow::from).collect();
                    writer.write_batch(&rows)?;
                    Ok(())
                })?;
                writer.flush()?;
                drop(writer);

                debug!("Reading attributed quotes back from {}", self.attributed_path.display());
                let file = File::open(&self.attributed_path)?;
                Ok(read_attributed_quotes(BufReader::new(file))?)
            }
        }
    }

    /// Cluster attributed quotes discourse by discourse and record one edge
    /// per quote.
    ///
    /// Groups are ordered by first appearance and keep their input order.
    /// Each group clusters into its own store; ids are then shifted by the
    /// number of clusters of the groups before it, which gives the ids a
    /// single sequential pass would.
    pub fn cluster(&self, attributed: Vec<AttributedQuote>, stats: &mut MatchStats) -> Result<(ClusterStore, BipartiteGraph)> {
        let groups = group_by_discourse(attributed);
        stats.discourses = groups.len();
        let min_common_len = self.clustering.cluster_min_common_len;
        info!("Clustering quotes of {} discourses (min common length {})", groups.len(), min_common_len);

        let progress = self.progress_bar(
            Some(groups.len() as u64),
            "{spinner:.green} Clustering: [{wide_bar:.cyan/blue}] {pos}/{len} discourses ({eta})",
        );

        let results: Vec<GroupClusters> = if self.processor.parallel_clustering {
            self.install(|| {
                groups
                    .into_par_iter()
                    .map(|(_, quotes)| {
                        let group = cluster_group(quotes, min_common_len);
                        progress.inc(1);
                        group
                    })
                    .collect()
            })
        } else {
            groups
                .into_iter()
                .map(|(_, quotes)| {
                    let group = cluster_group(quotes, min_common_len);
                    progress.inc(1);
                    group
                })
                .collect()
        };
        progress.finish_and_clear();

        let mut clusters = ClusterStore::new();
        let mut graph = BipartiteGraph::new();
        for GroupClusters { mut store, edges } in results {
            let offset = clusters.next_id();
            store.rebase(offset);
            for (source, local_id) in edges {
                graph.add_edge(source, local_id + offset)?;
            }
            clusters.absorb(store)?;
        }

        stats.clusters = clusters.len();
        stats.edges = graph.len();
        Ok((clusters, graph))
    }

    /// Full run over a stream of `(position, quote)` pairs.
    pub fn run<I, E>(&self, quotes: I) -> Result<MatchOutcome>
    where
        I: IntoIterator<Item = std::result::Result<(usize, QuoteRecord), E>>,
        E: Into<Error>,
    {
        let start = Instant::now();
        let mut stats = MatchStats::default();

        let attributed = self.attribute(quotes, &mut stats)?;
        info!("Attributed {} of {} quotes ({} unassigned) in {:?}",
            stats.quotes_attributed, stats.quotes_seen, stats.quotes_unassigned, start.elapsed());

        let (clusters, graph) = self.cluster(attributed, &mut stats)?;
        info!("Built {} clusters and {} edges in {:?}", stats.clusters, stats.edges, start.elapsed());

        Ok(MatchOutcome { clusters, graph, stats })
    }
}

/// Attributed quotes grouped by discourse, groups in order of first
/// appearance.
fn group_by_discourse(attributed: Vec<AttributedQuote>) -> Vec<(SpeechId, Vec<AttributedQuote>)> {
    let mut slots: ahash::AHashMap<SpeechId, usize> = ahash::AHashMap::new();
    let mut groups: Vec<(SpeechId, Vec<AttributedQuote>)> = Vec::new();
    for quote in attributed {
        let slot = *slots.entry(quote.discourse).or_insert_with(|| {
            groups.push((quote.discourse, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(quote);
    }
    groups
}

fn cluster_group(quotes: Vec<AttributedQuote>, min_common_len: usize) -> GroupClusters {
    let mut store = ClusterStore::new();
    let mut edges = Vec::with_capacity(quotes.len());
    for attributed in quotes {
        let source = attributed.source_id();
        let (cluster_id, created) = store.assign_or_create(attributed.quote, attributed.discourse, min_common_len);
        if created {
            trace!("{} seeds cluster {}", source, cluster_id);
        }
        edges.push((source, cluster_id));
    }
    GroupClusters { store, edges }
}

/// Counters of a quote extraction pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    pub articles: usize,
    pub articles_skipped: usize,
    pub quotes: usize,
}

/// Extract quotes from an article stream into a quote table at `out_path`.
pub fn extract_quotes<R: Read>(articles: R, out_path: &Path, config: &ExtractionConfig) -> Result<ExtractionStats> {
    let extractor = QuoteExtractor::new(config)?;
    if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = TableWriter::<QuoteRow>::create(out_path)?;
    let mut stats = ExtractionStats::default();

    for article in read_articles(articles) {
        let article = article?;
        stats.articles += 1;
        if !extractor.accepts(&article) {
            stats.articles_skipped += 1;
            continue;
        }
        let rows = extractor.extract(&article);
        for row in &rows {
            writer.write_row(row)?;
        }
        stats.quotes += rows.len();
    }
    writer.flush()?;

    info!("Extracted {} quotes from {} articles ({} skipped) into {}",
        stats.quotes, stats.articles, stats.articles_skipped, out_path.display());
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SpeechRecord;
    use chrono::NaiveDate;

    const SHARED: &str = "nous devons reconstruire ensemble une france plus juste et plus forte";

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 3, day).unwrap()
    }

    fn quote(id: &str, text: &str, day: u32) -> QuoteRecord {
        QuoteRecord {
            id: id.to_string(),
            native_id: format!("n-{}", id),
            date: date(day),
            media: "lemonde".to_string(),
            title: format!("Titre {}", id),
            text: text.to_string(),
            urls: format!("https://a/{}", id),
        }
    }

    fn index() -> DiscourseIndex {
        DiscourseIndex::new(vec![
            SpeechRecord {
                id: 0,
                speaker: "EMacron".to_string(),
                date: date(1),
                content: format!("Mes chers compatriotes, {}. Vive la République.", SHARED),
            },
            SpeechRecord {
                id: 1,
                speaker: "EMacron".to_string(),
                date: date(10),
                content: "Un tout autre discours sur l'agriculture et les territoires ruraux.".to_string(),
            },
        ])
    }

    fn config(mode: PipelineMode, dir: &Path) -> DiscoursConfig {
        let mut config = DiscoursConfig::default();
        config.attribution.mode = mode;
        config.attribution.discourse_threshold = Some(85.0);
        config.files.attributed_file = dir.join("quotes_disc.csv");
        config.processor.batch_size = 2;
        config
    }

    // Positions are indices, as a quote table without dropped rows yields
    fn numbered(quotes: Vec<QuoteRecord>) -> impl Iterator<Item = Result<(usize, QuoteRecord)>> {
        quotes.into_iter().enumerate().map(Ok)
    }

    fn quotes() -> Vec<QuoteRecord> {
        vec![
            quote("0_a", &format!("il a dit {}", SHARED), 5),
            quote("0_b", "ZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZ", 2),
            quote("1_a", SHARED, 6),
            quote("0_c", "un tout autre discours sur l'agriculture et les territoires", 11),
        ]
    }

    #[test]
    fn attribution_then_clustering() {
        let dir = tempfile::tempdir().unwrap();
        let index = index();
        let pipeline = MatchingPipeline::new(&config(PipelineMode::Exact, dir.path()), &index).unwrap();
        let outcome = pipeline.run(numbered(quotes())).unwrap();

        assert_eq!(outcome.stats.quotes_seen, 4);
        assert_eq!(outcome.stats.quotes_attributed, 3);
        assert_eq!(outcome.stats.quotes_unassigned, 1);
        assert_eq!(outcome.stats.batches, 2);
        assert_eq!(outcome.stats.edges, outcome.stats.quotes_attributed);

        let edges: Vec<(&str, ClusterId)> = outcome.graph.edges().collect();
        assert_eq!(edges, vec![("0_0", 0), ("0_2", 0), ("1_3", 1)]);

        let first = outcome.clusters.get(0).unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first.display_match(), SHARED);
        assert_eq!(outcome.clusters.get(1).unwrap().discourse(), 1);
    }

    #[test]
    fn streaming_mode_matches_exact_mode() {
        let dir = tempfile::tempdir().unwrap();
        let index = index();

        let exact = MatchingPipeline::new(&config(PipelineMode::Exact, dir.path()), &index)
            .unwrap()
            .run(numbered(quotes()))
            .unwrap();
        let streaming_pipeline = MatchingPipeline::new(&config(PipelineMode::Streaming, dir.path()), &index).unwrap();
        let streaming = streaming_pipeline.run(numbered(quotes())).unwrap();

        let exact_edges: Vec<_> = exact.graph.edges().collect();
        let streaming_edges: Vec<_> = streaming.graph.edges().collect();
        assert_eq!(exact_edges, streaming_edges);
        assert_eq!(exact.stats, streaming.stats);

        let persisted = std::fs::read_to_string(dir.path().join("quotes_disc.csv")).unwrap();
        assert_eq!(persisted.lines().count(), 4);
    }

    #[test]
    fn parallel_and_sequential_clustering_agree() {
        let dir = tempfile::tempdir().unwrap();
        let index = index();
        let mut attributed = Vec::new();
        for (position, discourse) in [(0, 3), (1, 1), (2, 3), (3, 2), (4, 1), (5, 3)] {
            let text = format!("{} discours {} numéro {}", SHARED, discourse, position % 2);
            attributed.push(AttributedQuote {
                position,
                discourse,
                quote: quote(&format!("{}_x", position), &text, 5),
            });
        }

        let mut parallel_config = config(PipelineMode::Exact, dir.path());
        parallel_config.processor.parallel_clustering = true;
        parallel_config.processor.parallel_thread_count = 3;
        let mut sequential_config = parallel_config.clone();
        sequential_config.processor.parallel_clustering = false;

        let (par_store, par_graph) = MatchingPipeline::new(&parallel_config, &index)
            .unwrap()
            .cluster(attributed.clone(), &mut MatchStats::default())
            .unwrap();
        let (seq_store, seq_graph) = MatchingPipeline::new(&sequential_config, &index)
            .unwrap()
            .cluster(attributed, &mut MatchStats::default())
            .unwrap();

        assert_eq!(par_graph.edges().collect::<Vec<_>>(), seq_graph.edges().collect::<Vec<_>>());
        let discourses = |store: &ClusterStore| store.iter().map(|c| (c.id(), c.discourse(), c.len())).collect::<Vec<_>>();
        assert_eq!(discourses(&par_store), discourses(&seq_store));
        // discourse 3 appears first, so its cluster is 0
        assert_eq!(par_graph.cluster_of("3_0"), Some(0));
        assert_eq!(par_graph.cluster_of("1_1"), Some(1));
        assert_eq!(par_graph.cluster_of("2_3"), Some(2));
    }

    #[test]
    fn raised_interrupt_stops_before_first_batch() {
        let dir = tempfile::tempdir().unwrap();
        let index = index();
        let flag = Arc::new(AtomicBool::new(true));
        let pipeline = MatchingPipeline::new(&config(PipelineMode::Exact, dir.path()), &index)
            .unwrap()
            .with_interrupt(flag);
        assert!(matches!(pipeline.run(numbered(quotes())), Err(Error::Interrupted(_))));
    }

    // Raises `flag` as the quote at `raise_at` is read
    fn raising_at(flag: Arc<AtomicBool>, raise_at: usize) -> impl Iterator<Item = Result<(usize, QuoteRecord)>> {
        numbered(quotes()).map(move |item| {
            if matches!(&item, Ok((position, _)) if *position == raise_at) {
                flag.store(true, Ordering::SeqCst);
            }
            item
        })
    }

    #[test]
    fn interrupt_during_last_batch_keeps_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let index = index();
        let flag = Arc::new(AtomicBool::new(false));
        let pipeline = MatchingPipeline::new(&config(PipelineMode::Exact, dir.path()), &index)
            .unwrap()
            .with_interrupt(flag.clone());
        let outcome = pipeline.run(raising_at(flag.clone(), 3)).unwrap();
        assert!(flag.load(Ordering::SeqCst));
        assert_eq!(outcome.stats.quotes_seen, 4);
        assert_eq!(outcome.stats.edges, 3);
    }

    #[test]
    fn interrupt_with_quotes_left_stops_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let index = index();
        let flag = Arc::new(AtomicBool::new(false));
        let pipeline = MatchingPipeline::new(&config(PipelineMode::Exact, dir.path()), &index)
            .unwrap()
            .with_interrupt(flag.clone());
        match pipeline.run(raising_at(flag, 1)) {
            Err(Error::Interrupted(msg)) => assert!(msg.contains("after 1 attribution batches")),
            other => panic!("expected an interrupt, got {:?}", other.map(|o| o.stats)),
        }
    }

    #[test]
    fn duplicate_position_aborts_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let index = index();
        let pipeline = MatchingPipeline::new(&config(PipelineMode::Exact, dir.path()), &index).unwrap();
        let stream: Vec<Result<(usize, QuoteRecord)>> = vec![
            Ok((0, quote("0_a", SHARED, 5))),
            Ok((0, quote("0_b", &format!("il a dit {}", SHARED), 6))),
        ];
        match pipeline.run(stream) {
            Err(Error::DuplicateEdge { quote_id, existing, attempted }) => {
                assert_eq!(quote_id, "0_0");
                assert_eq!((existing, attempted), (0, 0));
            }
            other => panic!("expected a duplicate edge, got {:?}", other.map(|o| o.stats)),
        }
    }

    #[test]
    fn read_errors_abort_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let index = index();
        let pipeline = MatchingPipeline::new(&config(PipelineMode::Exact, dir.path()), &index).unwrap();
        let stream = vec![
            Ok((0, quote("0_a", SHARED, 5))),
            Err(Error::text("broken input")),
        ];
        assert!(pipeline.run(stream).is_err());
    }

    #[test]
    fn grouping_keeps_first_appearance_order() {
        let attributed: Vec<AttributedQuote> = [(0, 5), (1, 2), (2, 5), (3, 9), (4, 2)]
            .iter()
            .map(|&(position, discourse)| AttributedQuote {
                position,
                discourse,
                quote: quote("q", "texte", 5),
            })
            .collect();
        let groups = group_by_discourse(attributed);
        let layout: Vec<(SpeechId, Vec<usize>)> = groups
            .iter()
            .map(|(d, quotes)| (*d, quotes.iter().map(|q| q.position).collect()))
            .collect();
        assert_eq!(layout, vec![(5, vec![0, 2]), (2, vec![1, 4]), (9, vec![3])]);
    }

    #[test]
    fn extraction_writes_quote_table() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out").join("quotes.csv");
        let articles = r#"{"id": 7, "nativeId": "n7", "docTime": "2021-03-05", "media": "lemonde", "title": "T", "document": "Il a dit « une citation suffisamment longue pour être retenue ici » puis \"non\".", "urls": "https://a/7"}
{"id": 8, "docTime": "2021-03-06", "title": "Sans citation", "document": "rien"}
"#;
        let stats = extract_quotes(articles.as_bytes(), &out, &ExtractionConfig::default()).unwrap();
        assert_eq!(stats, ExtractionStats { articles: 2, articles_skipped: 0, quotes: 1 });

        let content = std::fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "0_7,n7,2021-03-05,lemonde,T, une citation suffisamment longue pour être retenue ici ,https://a/7"
        );
    }

    #[test]
    fn excluded_articles_are_counted_as_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("quotes.csv");
        let articles = r#"{"id": 9, "docTime": "2021-03-05", "title": "T", "document": "Le gouvernement hollandais a dit « une citation suffisamment longue pour être retenue ici »."}
"#;
        let mut config = ExtractionConfig::default();
        config.exclude_pattern = "hollandais".to_string();
        let stats = extract_quotes(articles.as_bytes(), &out, &config).unwrap();
        assert_eq!(stats, ExtractionStats { articles: 1, articles_skipped: 1, quotes: 0 });
    }
}
