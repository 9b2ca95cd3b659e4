//! Running the rewrite over files or stdin.

use anyhow::{Context, Result, bail};
use autoimport::{AutoImport, AutoImportConfig, ExcludeGlobs, TransformResult, load_config};
use autoimport_common::Diagnostic;
use rayon::prelude::*;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::args::{CliArgs, OutputFormat};
use crate::fs::{discover_files, display_name};
use crate::reporter::Reporter;

pub const DEFAULT_CONFIG_FILE: &str = "autoimport.json";

/// Worker stacks are larger than the default: the parser recurses once per
/// nesting level.
const WORKER_STACK_SIZE: usize = 8 * 1024 * 1024;

/// What happened to one input.
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub source: String,
    pub result: TransformResult,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub files: usize,
    pub changed: Vec<PathBuf>,
    pub skipped: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl RunSummary {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Load the config named on the command line, or `autoimport.json` in
/// `cwd` when there is one. No config means no declarations.
pub fn resolve_config(args: &CliArgs, cwd: &Path) -> Result<AutoImportConfig> {
    if let Some(path) = &args.config {
        return load_config(&cwd.join(path));
    }
    let default_path = cwd.join(DEFAULT_CONFIG_FILE);
    if default_path.is_file() {
        debug!(path = %default_path.display(), "using default config file");
        return load_config(&default_path);
    }
    warn!("no {DEFAULT_CONFIG_FILE} found; nothing will be imported");
    Ok(AutoImportConfig::default())
}

pub fn build_rewriter(args: &CliArgs, config: &AutoImportConfig) -> Result<AutoImport> {
    let mut rewriter = AutoImport::from_config(config)?;
    if let Some(order) = args.insertion_order {
        rewriter = rewriter.with_insertion_order(order.into());
    }
    Ok(rewriter)
}

/// Rewrite stdin to `out`. Parse errors leave the text as it was.
pub fn run_stdin(
    args: &CliArgs,
    rewriter: &AutoImport,
    input: &mut dyn Read,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<RunSummary> {
    let mut source = String::new();
    input.read_to_string(&mut source).context("failed to read stdin")?;
    let file_name = args.stdin_filename.as_deref();
    let result = rewriter.transform(&source, file_name);

    let display = file_name.unwrap_or("<stdin>");
    let outcome = FileOutcome {
        path: PathBuf::from(display),
        source,
        result,
    };
    report_diagnostics(args, std::slice::from_ref(&outcome), err)?;
    if !args.check {
        out.write_all(outcome.result.code.as_bytes())?;
    }
    summarize(vec![outcome], args, out)
}

/// Rewrite every file under `args.paths`.
pub fn run_files(
    args: &CliArgs,
    config: &AutoImportConfig,
    rewriter: &AutoImport,
    cwd: &Path,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<RunSummary> {
    let filter = ExcludeGlobs::new(&config.exclude_patterns())?;
    let roots: Vec<PathBuf> = args.paths.iter().map(|p| cwd.join(p)).collect();
    let files = discover_files(&roots, &config.extensions(), &filter)?;
    if files.len() > 1 && !args.write && !args.check {
        bail!("{} files matched; pass --write or --check to process more than one file", files.len());
    }
    info!(files = files.len(), "rewriting");

    let outcomes = process_files(rewriter, &files, cwd, args.jobs)?;
    report_diagnostics(args, &outcomes, err)?;

    for outcome in &outcomes {
        if args.write {
            if outcome.result.changed {
                std::fs::write(&outcome.path, &outcome.result.code)
                    .with_context(|| format!("failed to write {}", outcome.path.display()))?;
            }
        } else if !args.check {
            out.write_all(outcome.result.code.as_bytes())?;
        }
    }
    summarize(outcomes, args, out)
}

/// Read and rewrite `files` on a rayon pool. Output order follows `files`.
pub fn process_files(
    rewriter: &AutoImport,
    files: &[PathBuf],
    cwd: &Path,
    jobs: Option<usize>,
) -> Result<Vec<FileOutcome>> {
    let mut builder = rayon::ThreadPoolBuilder::new().stack_size(WORKER_STACK_SIZE);
    if let Some(jobs) = jobs {
        builder = builder.num_threads(jobs);
    }
    let pool = builder.build().context("failed to start worker threads")?;

    pool.install(|| {
        files
            .par_iter()
            .map(|path| -> Result<FileOutcome> {
                let source = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                let name = display_name(path.strip_prefix(cwd).unwrap_or(path));
                let result = rewriter.transform(&source, Some(&name));
                Ok(FileOutcome {
                    path: path.clone(),
                    source,
                    result,
                })
            })
            .collect()
    })
}

fn report_diagnostics(args: &CliArgs, outcomes: &[FileOutcome], err: &mut dyn Write) -> Result<()> {
    let diagnostics: Vec<&Diagnostic> = outcomes
        .iter()
        .flat_map(|outcome| outcome.result.diagnostics.iter())
        .collect();
    if diagnostics.is_empty() {
        return Ok(());
    }
    match args.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *err, &diagnostics)?;
            writeln!(err)?;
        }
        OutputFormat::Text => {
            let mut reporter = Reporter::new(!args.no_color);
            for outcome in outcomes.iter().filter(|o| o.result.has_errors()) {
                let file = &outcome.result.diagnostics[0].file;
                reporter.add_source(file, &outcome.source);
            }
            let owned: Vec<Diagnostic> = diagnostics.into_iter().cloned().collect();
            writeln!(err, "{}", reporter.render(&owned))?;
        }
    }
    Ok(())
}

fn summarize(outcomes: Vec<FileOutcome>, args: &CliArgs, out: &mut dyn Write) -> Result<RunSummary> {
    let mut summary = RunSummary {
        files: outcomes.len(),
        ..RunSummary::default()
    };
    for outcome in outcomes {
        if outcome.result.skipped {
            summary.skipped += 1;
        }
        if outcome.result.changed {
            if args.check {
                writeln!(out, "{}", display_name(&outcome.path))?;
            }
            summary.changed.push(outcome.path);
        }
        summary.diagnostics.extend(outcome.result.diagnostics);
    }
    debug!(
        files = summary.files,
        changed = summary.changed.len(),
        skipped = summary.skipped,
        "run finished"
    );
    Ok(summary)
}
