//! CSV report sink.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::{AnalysisResult, CorpusMetrics, ReadabilityScores, WordFrequency};

pub const SUMMARY_HEADER: &str = "Syllables, Words, Sentences, Reading Ease, Reading Level";

pub const TOP_WORDS_HEADER: &str = "TOP WORDS HERE";

pub fn write_summary<W: Write>(
    out: &mut W,
    metrics: &CorpusMetrics,
    scores: &ReadabilityScores,
) -> std::io::Result<()> {
    writeln!(out, "{SUMMARY_HEADER}")?;
    writeln!(
        out,
        "{},{},{},{:6.2},{:6.2}",
        metrics.total_syllables,
        metrics.total_words,
        metrics.total_sentences,
        scores.reading_ease,
        scores.grade_level
    )
}

pub fn write_top_words<W: Write>(out: &mut W, top_words: &[WordFrequency]) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{TOP_WORDS_HEADER}")?;
    for entry in top_words {
        writeln!(out, "{},{}", entry.count, entry.word)?;
    }
    Ok(())
}

/// Overwrite `path` with the summary, then append the top-words section.
pub fn write_report(path: &Path, analysis: &AnalysisResult) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_summary(&mut out, &analysis.metrics, &analysis.scores)?;
    out.flush()?;
    drop(out);

    let mut out = BufWriter::new(OpenOptions::new().append(true).open(path)?);
    write_top_words(&mut out, &analysis.top_words)?;
    out.flush()?;

    info!(path = %path.display(), rows = analysis.top_words.len(), "report written");
    Ok(())
}

/// Console summary printed after the report is written.
pub fn print_summary<W: Write>(
    out: &mut W,
    metrics: &CorpusMetrics,
    scores: &ReadabilityScores,
) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "total syllables:  {}", metrics.total_syllables)?;
    writeln!(out, "total words:      {}", metrics.total_words)?;
    writeln!(out, "total sentences:  {}", metrics.total_sentences)?;
    writeln!(out)?;
    writeln!(out, "Reading Ease:    {:5.2}", scores.reading_ease)?;
    writeln!(out, "Grade Level:     {:5.2}", scores.grade_level)
}
