use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use shoal_archive::{
    Backend, Compression, ExtractOptions, Extractor, UnknownEntryPolicy, detect_from_reader,
    extract_to_workspace,
};

#[derive(Clone, Debug, Parser)]
#[command(name = "shoal", version = env!("CARGO_PKG_VERSION"), about = "Extract tar and tar.gz archives", long_about = None)]
pub struct App {
    /// Archive to extract (.tar or .tar.gz)
    pub archive: PathBuf,

    /// Destination directory, created if necessary
    #[arg(short = 'C', long = "directory", default_value = ".")]
    pub directory: PathBuf,

    /// Force gzip decompression instead of magic-byte detection
    #[arg(short = 'z', long)]
    pub gzip: bool,

    /// Extraction backend
    #[arg(long, value_enum, default_value_t = BackendArg::Stream)]
    pub backend: BackendArg,

    /// Drop the first N components of every entry name
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub strip_components: usize,

    /// Fail on entry kinds that cannot be materialized instead of skipping them
    #[arg(long)]
    pub strict: bool,

    /// Apply unix mode bits from entry headers
    #[arg(short = 'p', long)]
    pub preserve_modes: bool,

    /// Stage into a temporary directory and rename into place on full
    /// success; the destination must not already exist
    #[arg(long)]
    pub atomic: bool,

    /// Suppress the summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    /// In-process (tar + flate2)
    Stream,
    /// Delegate to the platform tar binary
    System,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Stream => Backend::Stream,
            BackendArg::System => Backend::System,
        }
    }
}

pub fn run(app: App) -> anyhow::Result<()> {
    let compression = if app.gzip {
        Compression::Gzip
    } else {
        detect(&app.archive)?
    };

    let options = ExtractOptions::default()
        .strip_components(app.strip_components)
        .unknown_entries(if app.strict {
            UnknownEntryPolicy::Fail
        } else {
            UnknownEntryPolicy::Skip
        })
        .preserve_modes(app.preserve_modes);

    let extractor = Extractor::new(app.backend.into(), compression)
        .context("selecting extraction backend")?;

    let report = if app.atomic {
        let staged = extract_to_workspace(&extractor, &app.archive, &app.directory, &options)
            .with_context(|| format!("extracting '{}'", app.archive.display()))?;
        staged.commit().context("committing staged extraction")?
    } else {
        extractor
            .extract(&app.archive, &app.directory, &options)
            .with_context(|| format!("extracting '{}'", app.archive.display()))?
    };

    if !app.quiet {
        println!(
            "{} entries, {} bytes -> {}",
            report.entry_count,
            report.total_bytes,
            app.directory.display()
        );
    }

    Ok(())
}

fn detect(path: &Path) -> anyhow::Result<Compression> {
    let mut file =
        File::open(path).with_context(|| format!("opening '{}'", path.display()))?;
    detect_from_reader(&mut file)
        .with_context(|| format!("reading '{}'", path.display()))?
        .ok_or_else(|| anyhow::anyhow!("'{}' is not a tar or tar.gz archive", path.display()))
}
