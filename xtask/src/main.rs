use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "xtask")]
struct Xtask {
    #[command(subcommand)]
    command: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Regenerate the CLI reference in docs/cli/reference.md
    GenDocs,
}

fn main() -> Result<()> {
    match Xtask::parse().command {
        Task::GenDocs => gen_docs(),
    }
}

fn gen_docs() -> Result<()> {
    let out = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("docs")
        .join("cli")
        .join("reference.md");
    fs::create_dir_all(out.parent().context("invalid docs path")?)?;

    let markdown = clap_markdown::help_markdown::<tmux_harness::cli::Cli>();
    fs::write(&out, markdown).with_context(|| format!("writing {}", out.display()))?;
    println!("✓ Wrote {}", out.display());
    Ok(())
}
