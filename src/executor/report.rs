use std::collections::HashSet;

use serde::Serialize;

/// One location of a duplicated block.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DuplicateLocation {
    /// `None` when the duplicate is in the same file as the origin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub start_line: usize,
    pub end_line: usize,
}

/// One reported duplication: the origin occurrence plus everywhere else the
/// same block sequence appears.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Duplication {
    pub file: String,
    pub start_line: usize,
    pub end_line: usize,
    /// Number of consecutive comparison blocks the occurrences share.
    pub blocks: usize,
    pub duplicates: Vec<DuplicateLocation>,
}

impl Duplication {
    pub fn line_count(&self) -> usize {
        self.end_line - self.start_line + 1
    }
}

/// Summary metrics for the duplication analysis.
#[derive(Serialize)]
pub struct DuplicationMetrics {
    pub files_analyzed: usize,
    pub total_code_lines: usize,
    pub duplicated_lines: usize,
    pub duplications: usize,
    pub files_with_duplications: usize,
    pub largest_duplication: usize,
}

impl DuplicationMetrics {
    pub fn percentage(&self) -> f64 {
        if self.total_code_lines == 0 {
            0.0
        } else {
            (self.duplicated_lines as f64 / self.total_code_lines as f64) * 100.0
        }
    }
}

/// Compute summary metrics in one pass. Duplicated lines are counted as
/// distinct `(file, line)` pairs across every occurrence, so overlapping
/// duplications do not inflate the total.
pub fn metrics(
    duplications: &[Duplication],
    files_analyzed: usize,
    total_code_lines: usize,
) -> DuplicationMetrics {
    let mut lines: HashSet<(&str, usize)> = HashSet::new();
    let mut files: HashSet<&str> = HashSet::new();
    let mut largest = 0;

    for dup in duplications {
        files.insert(&dup.file);
        largest = largest.max(dup.line_count());
        lines.extend((dup.start_line..=dup.end_line).map(|l| (dup.file.as_str(), l)));
        for loc in &dup.duplicates {
            let file = loc.file.as_deref().unwrap_or(&dup.file);
            files.insert(file);
            lines.extend((loc.start_line..=loc.end_line).map(|l| (file, l)));
        }
    }

    DuplicationMetrics {
        files_analyzed,
        total_code_lines,
        duplicated_lines: lines.len(),
        duplications: duplications.len(),
        files_with_duplications: files.len(),
        largest_duplication: largest,
    }
}

/// Classify duplication percentage into a human-readable assessment label.
fn assessment(percentage: f64) -> &'static str {
    if percentage < 3.0 {
        "Excellent"
    } else if percentage < 5.0 {
        "Good"
    } else if percentage < 10.0 {
        "Moderate"
    } else if percentage < 20.0 {
        "High"
    } else {
        "Very High"
    }
}

fn separator(width: usize) -> String {
    "\u{2500}".repeat(width)
}

/// Print a summary of the duplication metrics.
pub fn print_summary(metrics: &DuplicationMetrics) {
    let separator = separator(68);
    let pct = metrics.percentage();

    println!("{separator}");
    println!(" Copy-Paste Detection");
    println!();
    println!(" Files analyzed:       {:>42}", metrics.files_analyzed);
    println!(" Total code lines:     {:>42}", metrics.total_code_lines);
    println!(" Duplicated lines:     {:>42}", metrics.duplicated_lines);
    println!(" Duplication:          {:>41.1}%", pct);
    println!();
    println!(" Duplications:         {:>42}", metrics.duplications);
    println!(
        " Files with duplicates:{:>42}",
        metrics.files_with_duplications
    );
    if metrics.largest_duplication > 0 {
        println!(
            " Largest duplication:  {:>37} lines",
            metrics.largest_duplication
        );
    }
    println!();
    println!(" Assessment:           {:>42}", assessment(pct));
    println!("{separator}");
}

/// Maximum duplications shown by default (use `--show-all` to override).
pub const DEFAULT_GROUP_LIMIT: usize = 20;

/// Compute how many duplications to display based on the `--show-all` flag.
pub fn display_limit(total: usize, show_all: bool) -> usize {
    if show_all {
        total
    } else {
        DEFAULT_GROUP_LIMIT.min(total)
    }
}

/// Print the summary followed by a detailed listing of each duplication
/// with every location it occurs at.
pub fn print_detailed(
    metrics: &DuplicationMetrics,
    duplications: &[Duplication],
    total: usize,
) {
    print_summary(metrics);

    if duplications.is_empty() {
        return;
    }

    let separator = separator(68);

    println!();
    println!(" Duplications (sorted by file, then position)");

    for (i, dup) in duplications.iter().enumerate() {
        println!();
        println!("{separator}");
        println!(
            " [{}] {} lines duplicated in {} places",
            i + 1,
            dup.line_count(),
            dup.duplicates.len() + 1
        );
        println!();
        println!("   {}:{}-{}", dup.file, dup.start_line, dup.end_line);
        for loc in &dup.duplicates {
            println!(
                "   {}:{}-{}",
                loc.file.as_deref().unwrap_or(&dup.file),
                loc.start_line,
                loc.end_line
            );
        }
    }

    println!("{separator}");

    if duplications.len() < total {
        println!();
        println!(
            " Showing top {} of {} duplications.",
            duplications.len(),
            total
        );
        println!(" Use --show-all to see all duplications.");
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    metrics: JsonMetrics,
    duplications: &'a [Duplication],
}

#[derive(Serialize)]
struct JsonMetrics {
    files_analyzed: usize,
    total_code_lines: usize,
    duplicated_lines: usize,
    duplication_percentage: f64,
    duplications: usize,
    files_with_duplications: usize,
    largest_duplication: usize,
    assessment: &'static str,
}

/// Serialize metrics and duplications to a pretty-printed JSON string.
pub fn format_json(
    metrics: &DuplicationMetrics,
    duplications: &[Duplication],
) -> Result<String, Box<dyn std::error::Error>> {
    let output = JsonOutput {
        metrics: JsonMetrics {
            files_analyzed: metrics.files_analyzed,
            total_code_lines: metrics.total_code_lines,
            duplicated_lines: metrics.duplicated_lines,
            duplication_percentage: metrics.percentage(),
            duplications: metrics.duplications,
            files_with_duplications: metrics.files_with_duplications,
            largest_duplication: metrics.largest_duplication,
            assessment: assessment(metrics.percentage()),
        },
        duplications,
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Print metrics and duplications as pretty-printed JSON to stdout.
pub fn print_json(
    metrics: &DuplicationMetrics,
    duplications: &[Duplication],
) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", format_json(metrics, duplications)?);
    Ok(())
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
