//! The copy-paste detection run: walk the tree, build statements, chunk
//! them into blocks, index every file, then detect each file's clones
//! against the full index and convert surviving groups into duplication
//! records for reporting.
//!
//! All files are indexed before any detection starts, so self-duplication
//! and cross-file duplication are found in the same pass. Detection for one
//! file runs under a wall-clock budget; a file that exceeds it is skipped
//! with a warning and the run continues.

mod report;
mod timeout;

use std::collections::HashMap;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::clones::{Block, Chunker, CloneGroup, CloneIndex, MemoryCloneIndex, detect_interruptible};
use crate::lang::Lang;
use crate::statements;
use crate::walk::{self, ExcludeFilter};

use report::{DuplicateLocation, Duplication};
use timeout::Outcome;

/// Most clone groups reported for one file; the rest are dropped with a
/// warning.
pub const MAX_CLONE_GROUPS_PER_FILE: usize = 100;

/// Most duplicate locations reported for one group; the rest are dropped
/// with a warning.
pub const MAX_DUPLICATES_PER_GROUP: usize = 100;

pub struct Options {
    pub root: PathBuf,
    pub block_size: usize,
    /// Overrides every language's minimum clone size when set.
    pub min_tokens: Option<usize>,
    /// Wall-clock budget for one file's detection.
    pub timeout: Duration,
    pub include_tests: bool,
    pub excludes: Vec<String>,
    pub report: bool,
    pub show_all: bool,
    pub json: bool,
}

/// One scanned file with its comparison blocks.
struct SourceFile {
    resource_id: Arc<str>,
    lang: &'static Lang,
    statement_count: usize,
    blocks: Vec<Block>,
}

struct Analysis {
    duplications: Vec<Duplication>,
    files_analyzed: usize,
    total_code_lines: usize,
}

/// Run the analysis and print the requested report.
pub fn run(opts: &Options) -> Result<(), Box<dyn Error>> {
    let analysis = analyze(opts)?;
    let metrics = report::metrics(
        &analysis.duplications,
        analysis.files_analyzed,
        analysis.total_code_lines,
    );

    if opts.json {
        report::print_json(&metrics, &analysis.duplications)?;
    } else if opts.report {
        let limit = report::display_limit(analysis.duplications.len(), opts.show_all);
        report::print_detailed(
            &metrics,
            &analysis.duplications[..limit],
            analysis.duplications.len(),
        );
    } else {
        report::print_summary(&metrics);
    }
    Ok(())
}

fn analyze(opts: &Options) -> Result<Analysis, Box<dyn Error>> {
    let filter = ExcludeFilter::new(&opts.excludes);
    let chunker = Chunker::new(opts.block_size);

    let mut index = MemoryCloneIndex::new();
    let mut sources: Vec<SourceFile> = Vec::new();

    for (path, lang) in walk::source_files(&opts.root, opts.include_tests, &filter) {
        match scan_file(&path, &opts.root, lang, &chunker) {
            Ok(Some(source)) => {
                for block in &source.blocks {
                    index.insert(block.clone());
                }
                sources.push(source);
            }
            Ok(None) => {} // binary file
            Err(err) => eprintln!("warning: skipping {}: {err}", path.display()),
        }
    }

    // Every file is indexed before the first detection runs.
    let index = Arc::new(index);
    let resolver: HashMap<Arc<str>, usize> = sources
        .iter()
        .enumerate()
        .map(|(i, s)| (Arc::clone(&s.resource_id), i))
        .collect();

    let mut duplications = Vec::new();
    for source in &sources {
        if source.blocks.is_empty() {
            continue;
        }

        let worker_index = Arc::clone(&index);
        let worker_blocks = source.blocks.clone();
        let outcome = timeout::run_with_budget(
            move |cancel| detect_interruptible(worker_index.as_ref(), &worker_blocks, cancel),
            opts.timeout,
            &source.resource_id,
        )?;
        let mut groups = match outcome {
            Outcome::Finished(groups) => groups,
            Outcome::TimedOut => {
                eprintln!(
                    "warning: clone detection timed out for {}, skipping file",
                    source.resource_id
                );
                continue;
            }
        };

        // A group spans length + block_size - 1 statements per occurrence.
        if !source.lang.upstream_filtered {
            let min = opts.min_tokens.unwrap_or(source.lang.min_tokens);
            groups.retain(|g| g.clone_unit_length + chunker.block_size() - 1 >= min);
        }

        if groups.len() > MAX_CLONE_GROUPS_PER_FILE {
            eprintln!(
                "warning: {}: keeping {MAX_CLONE_GROUPS_PER_FILE} of {} clone groups",
                source.resource_id,
                groups.len()
            );
            groups.truncate(MAX_CLONE_GROUPS_PER_FILE);
        }

        for group in groups {
            duplications.push(to_duplication(&group, &sources, &resolver)?);
        }
    }

    Ok(Analysis {
        duplications,
        files_analyzed: sources.len(),
        total_code_lines: sources.iter().map(|s| s.statement_count).sum(),
    })
}

/// Read one file into a scanned record, or `None` for binary content.
fn scan_file(
    path: &Path,
    root: &Path,
    lang: &'static Lang,
    chunker: &Chunker,
) -> Result<Option<SourceFile>, Box<dyn Error>> {
    let mut file = File::open(path)?;
    if is_binary(&mut file)? {
        return Ok(None);
    }

    let statements = statements::build(BufReader::new(file), lang);
    let resource_id = resource_id(path, root);
    let blocks = chunker.chunk(&resource_id, &statements);

    Ok(Some(SourceFile {
        resource_id,
        lang,
        statement_count: statements.len(),
        blocks,
    }))
}

/// Path relative to the scan root, as the file's id in the index and in
/// reports. Scanning a single file keeps its given path.
fn resource_id(path: &Path, root: &Path) -> Arc<str> {
    let relative = path
        .strip_prefix(root)
        .ok()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(path);
    Arc::from(relative.to_string_lossy().as_ref())
}

/// Check for null bytes in the first 512 bytes, then rewind.
fn is_binary(file: &mut File) -> io::Result<bool> {
    let mut header = [0u8; 512];
    let mut read = 0;
    while read < header.len() {
        let n = file.read(&mut header[read..])?;
        if n == 0 {
            break;
        }
        read += n;
    }
    file.seek(SeekFrom::Start(0))?;
    Ok(header[..read].contains(&0))
}

/// Convert one clone group into a duplication record, resolving every
/// referenced resource id back to a scanned file. A miss means the index
/// and the scan disagree; the run cannot be trusted past that point.
fn to_duplication(
    group: &CloneGroup,
    sources: &[SourceFile],
    resolver: &HashMap<Arc<str>, usize>,
) -> Result<Duplication, Box<dyn Error>> {
    let resolve = |id: &Arc<str>| -> Result<&SourceFile, Box<dyn Error>> {
        resolver
            .get(id)
            .map(|&i| &sources[i])
            .ok_or_else(|| format!("unknown resource in clone index: {id}").into())
    };

    let origin = &group.origin_part;
    let origin_file = resolve(&origin.resource_id)?;

    let mut duplicates = Vec::new();
    for part in group.duplicates() {
        let part_file = resolve(&part.resource_id)?;
        duplicates.push(DuplicateLocation {
            file: (part.resource_id != origin.resource_id)
                .then(|| part_file.resource_id.to_string()),
            start_line: part.start_line,
            end_line: part.end_line,
        });
    }
    if duplicates.len() > MAX_DUPLICATES_PER_GROUP {
        eprintln!(
            "warning: {}:{}: keeping {MAX_DUPLICATES_PER_GROUP} of {} duplicate locations",
            origin_file.resource_id,
            origin.start_line,
            duplicates.len()
        );
        duplicates.truncate(MAX_DUPLICATES_PER_GROUP);
    }

    Ok(Duplication {
        file: origin_file.resource_id.to_string(),
        start_line: origin.start_line,
        end_line: origin.end_line,
        blocks: group.clone_unit_length,
        duplicates,
    })
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
