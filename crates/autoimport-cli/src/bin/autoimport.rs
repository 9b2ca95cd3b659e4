use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;

use autoimport_cli::args::CliArgs;
use autoimport_cli::driver;

const EXIT_SUCCESS: i32 = 0;
/// Parse errors, or `--check` found files that need imports.
const EXIT_CHANGES_OR_ERRORS: i32 = 1;

fn main() -> Result<()> {
    // Installs a subscriber only when AUTOIMPORT_LOG or RUST_LOG is set.
    autoimport::tracing_config::init_tracing();

    let mut args = CliArgs::parse();
    if !std::io::stderr().is_terminal() {
        args.no_color = true;
    }
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;

    let config = driver::resolve_config(&args, &cwd)?;
    let rewriter = driver::build_rewriter(&args, &config)?;

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let summary = if args.paths.is_empty() {
        driver::run_stdin(
            &args,
            &rewriter,
            &mut std::io::stdin().lock(),
            &mut stdout.lock(),
            &mut stderr.lock(),
        )?
    } else {
        driver::run_files(
            &args,
            &config,
            &rewriter,
            &cwd,
            &mut stdout.lock(),
            &mut stderr.lock(),
        )?
    };

    let exit_code = if summary.has_errors() || (args.check && !summary.changed.is_empty()) {
        EXIT_CHANGES_OR_ERRORS
    } else {
        EXIT_SUCCESS
    };
    std::process::exit(exit_code);
}
