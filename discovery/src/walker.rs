//! Recursive traversal of an external program's help tree.
//!
//! Starting at the root command, each node fetches its help text, appends
//! the catalog entries derived from it and fans out one child walk per
//! discovered sub-command, joining on all of them before it returns.
//! Child walks are polled concurrently; the number of help invocations in
//! flight at once is bounded by a [`Semaphore`].
//!
//! # Example
//!
//! ```
//! use async_trait::async_trait;
//! use help_catalog_core::CommandPath;
//! use help_catalog_discovery::error::ProbeError;
//! use help_catalog_discovery::probe::HelpSource;
//! use help_catalog_discovery::walker::{TreeWalker, WalkConfig};
//!
//! struct Canned;
//!
//! #[async_trait]
//! impl HelpSource for Canned {
//!     async fn fetch_help(&self, _program: &str, path: &CommandPath) -> Result<String, ProbeError> {
//!         Ok(match path.to_string().as_str() {
//!             "" => "Usage: demo\n\nCommands:\n  run  Run it.".to_string(),
//!             "run" => "Usage: demo run\n\n  Run it.".to_string(),
//!             _ => String::new(),
//!         })
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let config = WalkConfig { program: "demo".into(), ..WalkConfig::default() };
//! let outcome = TreeWalker::new(Canned, config).unwrap().run().await;
//! assert_eq!(outcome.catalog.len(), 1);
//! assert_eq!(outcome.catalog.entries[0].command, "demo run");
//! # }
//! ```

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures::FutureExt;
use futures::future::{BoxFuture, join_all};
use help_catalog_core::{Catalog, CatalogEntry, CommandPath, node_entries};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::error::ConfigError;
use crate::parser::parse_help;
use crate::probe::{DEFAULT_HELP_TIMEOUT_SECS, HelpSource, ProcessHelpSource};

/// Program walked when none is configured.
pub const DEFAULT_PROGRAM: &str = "verdi";

/// Default number of help invocations allowed in flight at once.
pub const DEFAULT_CONCURRENCY_LIMIT: usize = 10;

/// Traversal configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkConfig {
    /// External program whose help tree is walked.
    pub program: String,
    /// Maximum number of help invocations in flight.
    pub concurrency: usize,
    /// Timeout for one help invocation.
    pub timeout: Duration,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            concurrency: DEFAULT_CONCURRENCY_LIMIT,
            timeout: Duration::from_secs(DEFAULT_HELP_TIMEOUT_SECS),
        }
    }
}

impl WalkConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.program.trim().is_empty() {
            return Err(ConfigError::EmptyProgram);
        }
        if self.concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        if self.concurrency > Semaphore::MAX_PERMITS {
            return Err(ConfigError::ConcurrencyTooLarge(self.concurrency));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

/// Collects the entries and counters of one traversal.
///
/// A node's entries are appended under a single lock, so they stay
/// contiguous and in derivation order. Each run owns its own sink, so
/// overlapping runs on the same walker never mix their results.
#[derive(Debug, Default)]
pub struct EntrySink {
    entries: Mutex<Vec<CatalogEntry>>,
    visited: AtomicUsize,
    failed: AtomicUsize,
    empty: AtomicUsize,
}

impl EntrySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, entries: Vec<CatalogEntry>) {
        if entries.is_empty() {
            return;
        }
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .extend(entries);
    }

    /// Counters recorded so far.
    pub fn stats(&self) -> WalkStats {
        WalkStats {
            nodes_visited: self.visited.load(Ordering::Relaxed),
            failed_nodes: self.failed.load(Ordering::Relaxed),
            empty_nodes: self.empty.load(Ordering::Relaxed),
        }
    }

    pub fn into_catalog(self) -> Catalog {
        Catalog::new(
            self.entries
                .into_inner()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }

    pub fn into_outcome(self) -> WalkOutcome {
        let stats = self.stats();
        WalkOutcome {
            catalog: self.into_catalog(),
            stats,
        }
    }
}

/// Counters collected over one traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Nodes whose help was requested.
    pub nodes_visited: usize,
    /// Nodes whose help invocation failed.
    pub failed_nodes: usize,
    /// Nodes that answered with empty help text.
    pub empty_nodes: usize,
}

/// Result of [`TreeWalker::run`].
#[derive(Debug, Clone)]
pub struct WalkOutcome {
    pub catalog: Catalog,
    pub stats: WalkStats,
}

/// Walks the help tree of one program through a [`HelpSource`].
pub struct TreeWalker<S> {
    source: S,
    program: String,
    permits: Semaphore,
}

impl TreeWalker<ProcessHelpSource> {
    /// Walker that runs the real program, using the configured timeout.
    pub fn with_process_source(config: WalkConfig) -> Result<Self, ConfigError> {
        let source = ProcessHelpSource::new(config.timeout);
        Self::new(source, config)
    }
}

impl<S: HelpSource> TreeWalker<S> {
    pub fn new(source: S, config: WalkConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            source,
            permits: Semaphore::new(config.concurrency),
            program: config.program,
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Walks the whole tree from the root command and returns the catalog.
    pub async fn run(&self) -> WalkOutcome {
        let sink = EntrySink::new();
        self.walk(CommandPath::root(), &sink).await;

        let outcome = sink.into_outcome();
        info!(
            program = %self.program,
            nodes = outcome.stats.nodes_visited,
            failed = outcome.stats.failed_nodes,
            entries = outcome.catalog.len(),
            "Help tree walk finished"
        );
        outcome
    }

    /// Processes the node at `path` and, recursively, everything below it.
    ///
    /// Entries and counters go to `sink`. Resolves once every descendant
    /// has finished. Invocation failures are logged and end this branch
    /// only.
    pub fn walk<'a>(&'a self, path: CommandPath, sink: &'a EntrySink) -> BoxFuture<'a, ()> {
        async move {
            let command = path.command_line(&self.program);
            info!(command = %command, "Processing command");
            sink.visited.fetch_add(1, Ordering::Relaxed);

            let fetched = {
                let Ok(_permit) = self.permits.acquire().await else {
                    warn!(command = %command, "Permit pool closed, skipping");
                    return;
                };
                self.source.fetch_help(&self.program, &path).await
            };
            let help_text = match fetched {
                Ok(text) => text,
                Err(e) => {
                    warn!(
                        command = %path.help_argv(&self.program).join(" "),
                        error = %e,
                        "Failed to fetch help"
                    );
                    sink.failed.fetch_add(1, Ordering::Relaxed);
                    return;
                }
            };
            if help_text.trim().is_empty() {
                debug!(command = %command, "No help text, skipping");
                sink.empty.fetch_add(1, Ordering::Relaxed);
                return;
            }

            let parsed = parse_help(&help_text);
            debug!(
                command = %command,
                options = parsed.options.len(),
                sub_commands = parsed.sub_commands.len(),
                "Parsed help"
            );
            sink.append(node_entries(&self.program, &path, &parsed));

            let children = parsed
                .sub_commands
                .iter()
                .map(|name| self.walk(path.child(name.as_str()), sink));
            join_all(children).await;
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use async_trait::async_trait;

    use super::*;
    use crate::error::ProbeError;

    const ROOT_HELP: &str = "\
Usage: tool [OPTIONS] COMMAND [ARGS]...

  The tool.

Options:
  -h, --help     Show help.
  --version      Show version.
Commands:
  sub   Sub group.
  leaf  A leaf.
";

    const SUB_HELP: &str = "\
Usage: tool sub [OPTIONS]

Does a thing.

Options:
  -h, --help     Show help.
  -v, --verbose  Be verbose.
                 Very verbose.
Commands:
  foo  Does foo.
  bar  Does bar.
";

    const LEAF_HELP: &str = "\
Usage: tool leaf [OPTIONS]

  A leaf.

Options:
  -f, --force  Force it.
  -h, --help   Show help.
";

    #[derive(Default)]
    struct MapSource {
        pages: HashMap<String, String>,
        failing: HashSet<String>,
        calls: Mutex<Vec<Vec<String>>>,
    }

    impl MapSource {
        fn sample() -> Self {
            let mut source = Self::default();
            source.page("", ROOT_HELP);
            source.page("sub", SUB_HELP);
            source.page("leaf", LEAF_HELP);
            source.page("sub foo", "Usage: tool sub foo\n\n  Foo it.");
            source.page("sub bar", "Usage: tool sub bar\n\n  Bar it.");
            source
        }

        fn page(&mut self, path: &str, text: &str) {
            self.pages.insert(path.to_string(), text.to_string());
        }
    }

    #[async_trait]
    impl HelpSource for MapSource {
        async fn fetch_help(&self, program: &str, path: &CommandPath) -> Result<String, ProbeError> {
            self.calls.lock().unwrap().push(path.help_argv(program));
            let key = path.to_string();
            if self.failing.contains(&key) {
                return Err(ProbeError::Timeout(Duration::from_secs(30)));
            }
            Ok(self.pages.get(&key).cloned().unwrap_or_default())
        }
    }

    fn config(concurrency: usize) -> WalkConfig {
        WalkConfig {
            program: "tool".to_string(),
            concurrency,
            ..WalkConfig::default()
        }
    }

    fn commands(catalog: &Catalog) -> HashSet<String> {
        catalog
            .entries
            .iter()
            .map(|entry| entry.command.clone())
            .collect()
    }

    #[tokio::test]
    async fn test_walk_collects_option_and_leaf_entries() {
        let walker = TreeWalker::new(MapSource::sample(), config(4)).unwrap();
        let outcome = walker.run().await;

        let expected = [
            "tool --version",
            "tool sub -v / --verbose",
            "tool sub foo",
            "tool sub bar",
            "tool leaf -f / --force",
            "tool leaf",
        ]
        .into_iter()
        .map(String::from)
        .collect::<HashSet<_>>();
        assert_eq!(commands(&outcome.catalog), expected);
        assert_eq!(outcome.catalog.len(), expected.len());

        let verbose = outcome.catalog.find("tool sub -v / --verbose").unwrap();
        assert_eq!(verbose.usage, "tool sub [OPTIONS]");
        assert_eq!(verbose.description, "Does a thing. Be verbose. Very verbose.");

        assert_eq!(
            outcome.stats,
            WalkStats {
                nodes_visited: 5,
                failed_nodes: 0,
                empty_nodes: 0,
            }
        );
    }

    #[tokio::test]
    async fn test_branch_nodes_have_no_leaf_entry() {
        let outcome = TreeWalker::new(MapSource::sample(), config(2)).unwrap().run().await;
        assert!(outcome.catalog.find("tool").is_none());
        assert!(outcome.catalog.find("tool sub").is_none());
    }

    #[tokio::test]
    async fn test_option_entries_precede_leaf_entry_of_same_node() {
        let outcome = TreeWalker::new(MapSource::sample(), config(4)).unwrap().run().await;
        let position = |command: &str| {
            outcome
                .catalog
                .entries
                .iter()
                .position(|entry| entry.command == command)
                .unwrap()
        };
        assert!(position("tool leaf -f / --force") < position("tool leaf"));
    }

    #[tokio::test]
    async fn test_invocations_use_program_path_and_help_flag() {
        let source = MapSource::sample();
        let walker = TreeWalker::new(&source, config(4)).unwrap();
        walker.run().await;

        let calls = source.calls.lock().unwrap();
        assert_eq!(calls.len(), 5);
        assert!(calls.contains(&vec!["tool".to_string(), "--help".to_string()]));
        assert!(calls.contains(&vec![
            "tool".to_string(),
            "sub".to_string(),
            "foo".to_string(),
            "--help".to_string(),
        ]));
    }

    #[tokio::test]
    async fn test_failed_node_contributes_nothing_and_does_not_recurse() {
        let mut source = MapSource::sample();
        source.failing.insert("sub".to_string());
        let walker = TreeWalker::new(&source, config(4)).unwrap();
        let outcome = walker.run().await;

        let expected = ["tool --version", "tool leaf -f / --force", "tool leaf"]
            .into_iter()
            .map(String::from)
            .collect::<HashSet<_>>();
        assert_eq!(commands(&outcome.catalog), expected);
        assert_eq!(outcome.stats.failed_nodes, 1);

        let calls = source.calls.lock().unwrap();
        assert!(!calls.iter().any(|argv| argv.contains(&"foo".to_string())));
    }

    #[tokio::test]
    async fn test_empty_help_ends_branch() {
        let mut source = MapSource::sample();
        source.page("sub", "");
        let outcome = TreeWalker::new(source, config(4)).unwrap().run().await;
        assert!(
            !outcome
                .catalog
                .entries
                .iter()
                .any(|entry| entry.command.starts_with("tool sub"))
        );
        assert_eq!(outcome.stats.empty_nodes, 1);
        assert_eq!(outcome.stats.nodes_visited, 3);
    }

    #[tokio::test]
    async fn test_failing_root_yields_empty_catalog() {
        let mut source = MapSource::sample();
        source.failing.insert(String::new());
        let outcome = TreeWalker::new(source, config(1)).unwrap().run().await;
        assert!(outcome.catalog.is_empty());
        assert_eq!(outcome.stats.nodes_visited, 1);
    }

    #[tokio::test]
    async fn test_root_leaf_entry_is_bare_program() {
        let mut source = MapSource::default();
        source.page("", "Usage: tool\n\n  Single command.");
        let outcome = TreeWalker::new(source, config(1)).unwrap().run().await;
        assert_eq!(outcome.catalog.entries.len(), 1);
        assert_eq!(outcome.catalog.entries[0].command, "tool");
        assert_eq!(outcome.catalog.entries[0].description, "Single command.");
    }

    #[tokio::test]
    async fn test_repeated_runs_yield_same_entry_set() {
        let walker = TreeWalker::new(MapSource::sample(), config(3)).unwrap();
        let first = walker.run().await;
        let second = walker.run().await;
        assert_eq!(first.catalog.sorted_entries(), second.catalog.sorted_entries());
        assert_eq!(first.stats, second.stats);
    }

    /// Wide tree whose source records how many fetches overlap.
    struct InstrumentedSource {
        fan_out: usize,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl HelpSource for InstrumentedSource {
        async fn fetch_help(&self, _program: &str, path: &CommandPath) -> Result<String, ProbeError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            let text = match path.depth() {
                0 | 1 => {
                    let rows = (0..self.fan_out)
                        .map(|index| format!("  c{index}  Child {index}."))
                        .collect::<Vec<_>>()
                        .join("\n");
                    format!("Usage: wide\n\nCommands:\n{rows}")
                }
                _ => "Usage: wide leaf\n\n  Leaf.".to_string(),
            };
            Ok(text)
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_in_flight_fetches_never_exceed_permit_capacity() {
        let source = InstrumentedSource {
            fan_out: 6,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        };
        let walker = TreeWalker::new(&source, config(3)).unwrap();
        let outcome = walker.run().await;

        assert_eq!(outcome.catalog.len(), 36);
        assert_eq!(outcome.stats.nodes_visited, 1 + 6 + 36);
        let peak = source.peak.load(Ordering::SeqCst);
        assert!(peak <= 3, "peak in-flight fetches was {peak}");
        assert!(peak > 1, "child walks never overlapped");
    }

    #[tokio::test]
    async fn test_overlapping_runs_keep_separate_stats() {
        let mut source = MapSource::sample();
        source.failing.insert("leaf".to_string());
        let walker = TreeWalker::new(source, config(2)).unwrap();

        let (first, second) = tokio::join!(walker.run(), walker.run());
        let expected = WalkStats {
            nodes_visited: 5,
            failed_nodes: 1,
            empty_nodes: 0,
        };
        assert_eq!(first.stats, expected);
        assert_eq!(second.stats, expected);
        assert_eq!(first.catalog.len(), 4);
        assert_eq!(first.catalog.sorted_entries(), second.catalog.sorted_entries());
    }

    #[test]
    fn test_sink_counts_only_its_own_walk() {
        let sink = EntrySink::new();
        sink.visited.fetch_add(2, Ordering::Relaxed);
        sink.append(vec![CatalogEntry::new("tool", "", "")]);
        let outcome = sink.into_outcome();
        assert_eq!(outcome.stats.nodes_visited, 2);
        assert_eq!(outcome.catalog.len(), 1);
        assert_eq!(EntrySink::new().stats(), WalkStats::default());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let zero = WalkConfig {
            concurrency: 0,
            ..WalkConfig::default()
        };
        assert!(matches!(
            TreeWalker::new(MapSource::default(), zero),
            Err(ConfigError::ZeroConcurrency)
        ));

        let huge = WalkConfig {
            concurrency: usize::MAX,
            ..WalkConfig::default()
        };
        assert_eq!(huge.validate(), Err(ConfigError::ConcurrencyTooLarge(usize::MAX)));

        let no_timeout = WalkConfig {
            timeout: Duration::ZERO,
            ..WalkConfig::default()
        };
        assert_eq!(no_timeout.validate(), Err(ConfigError::ZeroTimeout));

        let blank = WalkConfig {
            program: "  ".to_string(),
            ..WalkConfig::default()
        };
        assert_eq!(blank.validate(), Err(ConfigError::EmptyProgram));
    }

    #[test]
    fn test_default_config_matches_documented_defaults() {
        let config = WalkConfig::default();
        assert_eq!(config.program, "verdi");
        assert_eq!(config.concurrency, 10);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }
}
