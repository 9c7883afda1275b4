//! Workspace tasks: `cargo run -p aldees-xtask -- <command>`.

use std::{
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(about = "Build tasks for the aldees workspace")]
struct Cli {
    #[command(subcommand)]
    command: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Build the Dioxus web front end with `dx`.
    Ui {
        /// Build with optimizations.
        #[arg(long)]
        release: bool,
    },
    /// Write the options JSON Schema.
    Schema {
        /// Output file.
        #[arg(long, default_value = "assets/options.schema.json")]
        out: PathBuf,
    },
}

fn workspace_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask has no parent directory")
}

fn run(command: &mut Command) -> Result<Vec<u8>> {
    let output = command
        .output()
        .with_context(|| format!("failed to spawn {command:?}"))?;
    if !output.status.success() {
        bail!(
            "{command:?} exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(output.stdout)
}

fn build_ui(root: &Path, release: bool) -> Result<()> {
    let mut dx = Command::new("dx");
    let _ = dx
        .current_dir(root.join("crates/aldees-ui"))
        .args(["build", "--platform", "web"]);
    if release {
        let _ = dx.arg("--release");
    }
    let _ = run(&mut dx).context("is the Dioxus CLI (`dx`) installed?")?;
    Ok(())
}

fn write_schema(root: &Path, out: &Path) -> Result<()> {
    let schema = run(Command::new(env!("CARGO"))
        .current_dir(root)
        .args(["run", "--quiet", "--bin", "aldees", "--", "--schema"]))?;
    let path = root.join(out);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, schema).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let root = workspace_root()?;
    match cli.command {
        Task::Ui { release } => build_ui(&root, release),
        Task::Schema { out } => write_schema(&root, &out),
    }
}
