use std::path::Path;

use clap::Args;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use console::style;
use dialoguer::Confirm;

use remnant_lib::config::{load_config_file, CleanupConfig, Mode};
use remnant_lib::resolve::{CandidateKind, CandidateSet};
use remnant_lib::util::{create_spinner, format_bytes, format_timestamp};
use remnant_lib::{RealFilesystem, Result, Runner};

#[derive(Args)]
pub struct CleanOpts {
    #[arg(long, short = 'p', help = "Root of the media library to scan")]
    pub path: std::path::PathBuf,

    #[arg(long, help = "List candidates without logging or deleting anything")]
    pub preview: bool,

    #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
    pub yes: bool,

    #[arg(long, help = "Print the candidate set as JSON")]
    pub json: bool,

    #[arg(long, help = "Override the size threshold (e.g. \"100MB\", \"500KB\")")]
    pub threshold: Option<String>,
}

pub fn handle_clean_command(
    mode: Mode,
    opts: &CleanOpts,
    config_path: Option<&Path>,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    let file = load_config_file(config_path)?;
    let config = CleanupConfig::build(mode, file.as_ref(), opts.threshold.as_deref(), opts.preview)?;

    let fs = RealFilesystem;
    let runner = Runner::new(&fs, &config);
    let root = opts.path.to_string_lossy().to_string();

    let spinner = if quiet {
        None
    } else {
        Some(create_spinner(&format!(
            "Scanning {}...",
            opts.path.display()
        )))
    };
    let planned = runner.plan(&root);
    if let Some(spinner) = &spinner {
        spinner.finish_and_clear();
    }

    let ((root_dir, set), notes) = match planned.into_result() {
        Ok(success) => success,
        Err(err) if err.is_silent() => {
            log::debug!("{} run matched nothing: {}", mode, err);
            if verbose && !quiet {
                println!("{}", style("Nothing to clean").dim());
            }
            return Ok(());
        }
        Err(err) => return Err(err),
    };

    if verbose && !quiet {
        for note in &notes {
            println!("{} {}", style(">>>").cyan(), note);
        }
    }

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&set)?);
    } else if !quiet {
        print_candidates(&config, &set);
    }

    if config.preview {
        if !quiet && !opts.json {
            println!(
                "\n{} Preview only; nothing was logged or deleted",
                style("!").yellow()
            );
        }
        return Ok(());
    }

    if !opts.yes {
        let prompt = format!("Delete {} {}?", set.len(), kind_noun(set.kind));
        if !Confirm::new().with_prompt(prompt).default(false).interact()? {
            if !quiet {
                println!("{}", style("Aborted").yellow());
            }
            return Ok(());
        }
    }

    let (report, _) = runner.commit(&root_dir, set).into_result()?;

    if !quiet {
        println!("\n{} Cleanup completed", style("✓").green());
        println!("  Deleted: {}", style(report.deleted).cyan());
        println!(
            "  Reclaimed: {}",
            style(format_bytes(report.reclaimed_bytes)).cyan()
        );
        if let Some(ref log_path) = report.log_path {
            println!("  Logged to: {}", log_path.display());
        }
        println!("  Finished: {}", format_timestamp(&chrono::Utc::now()));
    }

    Ok(())
}

fn print_candidates(config: &CleanupConfig, set: &CandidateSet) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Path", "Size"]);

    for candidate in &set.items {
        table.add_row(vec![
            Cell::new(candidate.path.display()),
            Cell::new(format_bytes(candidate.size_bytes)),
        ]);
    }

    println!("{}", table);
    println!(
        "\n{} orphaned {} ({}), threshold {}",
        set.len(),
        kind_noun(set.kind),
        format_bytes(set.total_bytes()),
        format_bytes(config.threshold_bytes)
    );
}

fn kind_noun(kind: CandidateKind) -> &'static str {
    match kind {
        CandidateKind::Files => "files",
        CandidateKind::Directories => "folders",
    }
}
