// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `kvtags-gen`: write the generated tag-update functions to disk.
//!
//! Runs with no arguments as a build step: renders every service of the
//! built-in registry into `update_tags_gen.rs` in the working directory.
//! The file is written only once rendering has fully succeeded.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use kvtags_gen::{generate, GenerateOptions, DEFAULT_OUTPUT};
use kvtags_registry::{Registry, UPDATE_TAGS_SERVICES};
use tempfile::NamedTempFile;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "kvtags-gen",
    about = "Generate <service>_update_tags functions from the service registry"
)]
struct Cli {
    /// Output file (`-` writes to stdout).
    #[arg(long, short, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// JSON service table replacing the built-in registry.
    #[arg(long, value_name = "FILE")]
    registry: Option<PathBuf>,

    /// Generate only this service (repeatable).
    ///
    /// Defaults to the built-in service list, or to every entry of `--registry`.
    #[arg(long = "service", value_name = "ID")]
    services: Vec<String>,

    /// Module path the service packages are imported from (e.g. `crate::aws`).
    #[arg(long, value_name = "PATH")]
    service_root: Option<String>,

    /// Path of the runtime crate providing `KeyValueTags`.
    #[arg(long, value_name = "PATH", default_value = "kvtags")]
    runtime_crate: String,

    /// Fail if the output file is not up to date instead of writing it.
    #[arg(long)]
    check: bool,

    /// Print the registry as JSON and exit.
    #[arg(long, conflicts_with = "check")]
    dump_registry: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    run(Cli::parse())
}

fn run(cli: Cli) -> Result<()> {
    let registry = match &cli.registry {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read registry {}", path.display()))?;
            Registry::from_json(&json)
                .with_context(|| format!("failed to load registry {}", path.display()))?
        }
        None => Registry::builtin().context("built-in registry is invalid")?,
    };

    if cli.dump_registry {
        let json = registry.to_json()?;
        return write_stdout(format!("{json}\n").as_bytes());
    }

    let services: Vec<String> = if !cli.services.is_empty() {
        cli.services.clone()
    } else if cli.registry.is_some() {
        registry.service_ids().map(str::to_owned).collect()
    } else {
        UPDATE_TAGS_SERVICES.iter().map(|s| (*s).to_owned()).collect()
    };

    let mut options = GenerateOptions::default().runtime_crate(&cli.runtime_crate)?;
    if let Some(root) = &cli.service_root {
        options = options.service_root(root)?;
    }

    let code =
        generate(&registry, &services, &options).context("error generating update functions")?;

    if cli.output == Path::new("-") {
        if cli.check {
            bail!("--check needs an output file");
        }
        return write_stdout(code.as_bytes());
    }

    if cli.check {
        return check(&cli.output, &code);
    }

    write_atomically(&cli.output, &code)
        .with_context(|| format!("error writing to file ({})", cli.output.display()))?;
    info!(
        services = services.len(),
        output = %cli.output.display(),
        "wrote tag-update functions"
    );
    Ok(())
}

fn check(path: &Path, expected: &str) -> Result<()> {
    let current = match fs::read_to_string(path) {
        Ok(current) => current,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read {}", path.display()));
        }
    };
    if current != expected {
        bail!("{} is out of date; rerun kvtags-gen", path.display());
    }
    info!(output = %path.display(), "generated file is up to date");
    Ok(())
}

/// Write through a temporary file in the target directory, then rename it into
/// place. A failed write leaves the destination untouched.
fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create a temporary file in {}", dir.display()))?;
    if let Ok(existing) = fs::metadata(path) {
        fs::set_permissions(file.path(), existing.permissions())?;
    }
    file.write_all(contents.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path)?;
    Ok(())
}

fn write_stdout(bytes: &[u8]) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(bytes).context("failed to write to stdout")?;
    stdout.flush().context("failed to flush stdout")
}
