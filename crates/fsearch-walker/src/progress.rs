//! Live console progress for a search run.
//!
//! [`SearchProgress`] owns the run's [`SearchStats`] and a start instant, and
//! periodically overwrites a single console line with the current totals:
//!
//! ```text
//! Matches: 12 | Searches: 3500 | Search Size: 1.27 GB | Elapsed Time: 840.12 ms
//! ```
//!
//! The line is rewritten in place with a carriage return. When a new line is
//! narrower than the previous one, it is padded with spaces so no stale
//! characters survive.

use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use camino::Utf8Path;
use fsearch_core::ProgressConfig;
use tracing::debug;
use unicode_width::UnicodeWidthStr;

use crate::format::{format_elapsed, format_size};
use crate::stats::{SearchStats, StatsSnapshot};

/// Progress reporter for one search run.
///
/// Output goes to any [`Write`] sink; [`SearchProgress::stdout`] is what the
/// command line uses. A disabled reporter keeps counting but writes nothing.
///
/// # Examples
///
/// ```
/// use fsearch_core::ProgressConfig;
/// use fsearch_walker::SearchProgress;
///
/// let mut progress = SearchProgress::new(Vec::new(), ProgressConfig::default());
/// progress.record_visit();
/// progress.record_bytes(4096);
/// progress.record_match();
/// progress.finalize();
///
/// let output = String::from_utf8(progress.into_inner()).unwrap();
/// assert!(output.starts_with("\rMatches: 1 | Searches: 1 | Search Size: 4.00 KB"));
/// assert!(output.ends_with('\n'));
/// ```
#[derive(Debug)]
pub struct SearchProgress<W: Write = Stdout> {
    out: W,
    enabled: bool,
    render_interval: u64,
    stats: SearchStats,
    started: Instant,
    /// Column width of the last rendered status line.
    previous_width: usize,
}

impl SearchProgress<Stdout> {
    /// Creates a reporter writing to standard output.
    #[must_use]
    pub fn stdout(config: ProgressConfig) -> Self {
        Self::new(io::stdout(), config)
    }
}

impl<W: Write> SearchProgress<W> {
    /// Creates a reporter writing to `out`. The elapsed-time clock starts now.
    pub fn new(out: W, config: ProgressConfig) -> Self {
        Self {
            out,
            enabled: config.enabled,
            render_interval: config.render_interval.max(1),
            stats: SearchStats::new(),
            started: Instant::now(),
            previous_width: 0,
        }
    }

    /// Records one classified entry.
    #[inline]
    pub fn record_visit(&mut self) {
        self.stats.increment_scanned();
    }

    /// Adds the size of a scanned regular file.
    #[inline]
    pub fn record_bytes(&mut self, bytes: u64) {
        self.stats.add_bytes(bytes);
    }

    /// Records a file added to the result set.
    #[inline]
    pub fn record_match(&mut self) {
        self.stats.increment_matches();
    }

    /// Records a directory whose listing was read.
    #[inline]
    pub fn record_directory(&mut self) {
        self.stats.increment_directories();
    }

    /// Records a non-fatal error.
    #[inline]
    pub fn record_error(&mut self) {
        self.stats.increment_errors();
    }

    /// Zeroes the counters and restarts the elapsed-time clock.
    ///
    /// Output stays disabled if an earlier write failed.
    pub fn reset(&mut self) {
        self.stats = SearchStats::new();
        self.started = Instant::now();
        self.previous_width = 0;
    }

    /// Renders the status line if the visit count is on a render boundary.
    pub fn maybe_render(&mut self) {
        if self.stats.scanned() % self.render_interval == 0 {
            self.render();
        }
    }

    /// Prints the root being searched on its own line.
    pub fn announce_root(&mut self, root: &Utf8Path) {
        let line = format!("Searching In: [{root}]\n");
        self.emit(&line);
    }

    /// Renders the final status line and ends it with a line break.
    pub fn finalize(&mut self) {
        self.render();
        self.emit("\n");
        self.previous_width = 0;
    }

    /// Returns the time since this reporter was created.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Returns a snapshot of the counters and the elapsed time.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        self.stats.snapshot(self.elapsed())
    }

    /// Consumes the reporter and returns the output sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&mut self) {
        let line = status_line(&self.stats, self.elapsed());
        let width = line.width();
        let fill = self.previous_width.saturating_sub(width);

        let rendered = format!("\r{line}{:fill$}", "");
        self.emit(&rendered);
        self.previous_width = width;
    }

    fn emit(&mut self, text: &str) {
        if !self.enabled {
            return;
        }

        let written = self
            .out
            .write_all(text.as_bytes())
            .and_then(|()| self.out.flush());
        if let Err(error) = written {
            // A closed stdout must not take the search down with it.
            debug!(%error, "Progress output failed, disabling further rendering");
            self.enabled = false;
        }
    }
}

fn status_line(stats: &SearchStats, elapsed: Duration) -> String {
    format!(
        "Matches: {} | Searches: {} | Search Size: {} | Elapsed Time: {}",
        stats.matches(),
        stats.scanned(),
        format_size(stats.bytes()),
        format_elapsed(elapsed),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(interval: u64) -> ProgressConfig {
        ProgressConfig {
            enabled: true,
            render_interval: interval,
        }
    }

    fn output(progress: SearchProgress<Vec<u8>>) -> String {
        String::from_utf8(progress.into_inner()).unwrap()
    }

    #[test]
    fn test_status_line() {
        let mut stats = SearchStats::new();
        for _ in 0..1500 {
            stats.increment_scanned();
        }
        stats.increment_matches();
        stats.add_bytes(3 * 1024 * 1024);

        insta::assert_snapshot!(
            status_line(&stats, Duration::from_micros(2_500)),
            @"Matches: 1 | Searches: 1500 | Search Size: 3.00 MB | Elapsed Time: 2.50 ms"
        );
    }

    #[test]
    fn test_renders_on_interval_boundaries_only() {
        let mut progress = SearchProgress::new(Vec::new(), config(3));
        for _ in 0..7 {
            progress.record_visit();
            progress.maybe_render();
        }

        let out = output(progress);
        assert_eq!(out.matches('\r').count(), 2);
        assert!(out.contains("Searches: 3 |"));
        assert!(out.contains("Searches: 6 |"));
        assert!(!out.contains("Searches: 7 |"));
    }

    #[test]
    fn test_zero_interval_renders_every_visit() {
        let mut progress = SearchProgress::new(Vec::new(), config(0));
        progress.record_visit();
        progress.maybe_render();
        progress.record_visit();
        progress.maybe_render();
        assert_eq!(output(progress).matches('\r').count(), 2);
    }

    #[test]
    fn test_shorter_line_is_padded() {
        let mut progress = SearchProgress::new(Vec::new(), config(1));
        for _ in 0..1_000_000 {
            progress.record_visit();
            progress.record_match();
        }
        progress.render();
        let first_width = progress.previous_width;

        // Counters never shrink within a run, so swap in fresh ones to get
        // a line twelve columns narrower.
        progress.stats = SearchStats::new();
        progress.record_visit();
        progress.render();

        let out = output(progress);
        let second = out.rsplit('\r').next().unwrap();
        assert!(second.starts_with("Matches: 0 | Searches: 1 |"));
        assert_eq!(second.width(), first_width);
        assert!(second.ends_with(' '));
    }

    #[test]
    fn test_announce_root_and_finalize() {
        let mut progress = SearchProgress::new(Vec::new(), config(500));
        progress.announce_root(Utf8Path::new("/data/music"));
        progress.record_visit();
        progress.record_match();
        progress.finalize();

        let out = output(progress);
        assert!(out.starts_with("Searching In: [/data/music]\n\rMatches: 1 | Searches: 1 |"));
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn test_disabled_reporter_writes_nothing_but_counts() {
        let mut progress = SearchProgress::new(
            Vec::new(),
            ProgressConfig {
                enabled: false,
                render_interval: 1,
            },
        );
        progress.announce_root(Utf8Path::new("/"));
        progress.record_visit();
        progress.record_match();
        progress.record_directory();
        progress.record_error();
        progress.maybe_render();
        progress.finalize();

        let snap = progress.snapshot();
        assert_eq!(snap.scanned, 1);
        assert_eq!(snap.matches, 1);
        assert_eq!(snap.directories, 1);
        assert_eq!(snap.errors, 1);
        assert!(output(progress).is_empty());
    }

    #[test]
    fn test_reset_starts_counting_from_zero() {
        let mut progress = SearchProgress::new(Vec::new(), config(1));
        progress.record_visit();
        progress.record_bytes(2048);
        progress.record_match();
        progress.record_directory();
        progress.record_error();
        progress.maybe_render();
        assert!(progress.previous_width > 0);

        progress.reset();

        let snap = progress.snapshot();
        assert_eq!(snap.scanned, 0);
        assert_eq!(snap.matches, 0);
        assert_eq!(snap.bytes, 0);
        assert_eq!(snap.directories, 0);
        assert_eq!(snap.errors, 0);
        assert_eq!(progress.previous_width, 0);
    }

    #[test]
    fn test_write_failure_disables_output() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut progress = SearchProgress::new(Broken, config(1));
        progress.record_visit();
        progress.maybe_render();
        assert!(!progress.enabled);
        progress.finalize();
        assert_eq!(progress.snapshot().scanned, 1);
    }
}
