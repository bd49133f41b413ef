//! Digit Classifier Demo
//!
//! Command line front end: replays recorded gestures into feature vectors,
//! sends them to the prediction service, and tabulates labeled results.

pub mod board;
pub mod gesture_file;
pub mod settings;

use anyhow::{bail, Context, Result};
use board::ResultsBoard;
use clap::{Parser, Subcommand};
use confusion::ConfusionMatrix;
use feature_engine::{FeatureVector, GestureRecorder};
use gesture_file::GestureFile;
use prediction_client::{ClientConfig, Dispatcher, PredictionClient};
use std::fs;
use std::path::{Path, PathBuf};
use storage::{Label, PredictionRecord, RecordStore, Repository};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use settings::Settings;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "digit-demo", version, about = "Handwritten digit classifier demo")]
pub struct Cli {
    /// Settings file (defaults to ./digit-demo.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send each drawing in a gesture file (or a 28x28 PNG) for prediction
    Predict { input: PathBuf },
    /// Print the feature vectors of a gesture file (or a 28x28 PNG) as JSON
    Extract { input: PathBuf },
    /// Print the confusion matrix for a records file
    Matrix {
        records: PathBuf,
        /// Print cell intensities instead of counts
        #[arg(long)]
        intensity: bool,
    },
    /// Write a record's drawing as a 28x28 PNG
    Thumbnail { records: PathBuf, id: String, out: PathBuf },
    /// Set the ground-truth digit of a record
    Label { records: PathBuf, id: String, digit: u8 },
    /// Remove a record
    Delete { records: PathBuf, id: String },
}

/// Initialize logging; `RUST_LOG` overrides the default `info` level
pub fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

/// Execute one command
pub async fn run(cli: Cli, settings: Settings) -> Result<()> {
    match cli.command {
        Command::Predict { input } => predict(&input, &settings).await,
        Command::Extract { input } => extract(&input, &settings),
        Command::Matrix { records, intensity } => {
            let matrix = ConfusionMatrix::from_records(&load_records(&records)?);
            if intensity {
                print!("{}", matrix.intensity_table());
            } else {
                print!("{}", matrix);
            }
            println!("{}", matrix.summary());
            Ok(())
        }
        Command::Thumbnail { records, id, out } => thumbnail(&records, &id, &out),
        Command::Label {
            records,
            id,
            digit,
        } => {
            let label = Label::new(digit)?;
            edit_records(&records, |repo| repo.update_actual_label(&id, label))
        }
        Command::Delete { records, id } => edit_records(&records, |repo| repo.delete(&id)),
    }
}

async fn predict(path: &Path, settings: &Settings) -> Result<()> {
    let vectors = drawn_vectors(path, settings)?;
    if vectors.is_empty() {
        warn!("No strokes drawn in {}; nothing sent", path.display());
        return Ok(());
    }

    let dispatcher = Dispatcher::new(PredictionClient::new(&ClientConfig {
        base_url: settings.api_url.clone(),
        timeout: settings.request_timeout(),
    })?);

    // Every drawing is in flight before the first answer is awaited
    let pending: Vec<_> = vectors
        .into_iter()
        .map(|vector| {
            let request = dispatcher.dispatch(vector);
            println!("{}", request.status().notification());
            request
        })
        .collect();

    info!("Waiting for {} prediction(s)", pending.len());
    for request in pending {
        println!("{}", request.settled().await.notification());
    }
    Ok(())
}

fn extract(path: &Path, settings: &Settings) -> Result<()> {
    let vectors = drawn_vectors(path, settings)?;
    for vector in &vectors {
        println!("{}", serde_json::to_string(vector)?);
    }
    info!("Extracted {} feature vector(s)", vectors.len());
    Ok(())
}

/// Feature vectors of every completed drawing in `path`.
///
/// A `.png` is read as one saved 28x28 drawing (dark ink on a light
/// background); anything else is replayed as a gesture file.
fn drawn_vectors(path: &Path, settings: &Settings) -> Result<Vec<FeatureVector>> {
    let is_png = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if is_png {
        let image = image::open(path)
            .with_context(|| format!("reading drawing {}", path.display()))?
            .to_rgb8();
        return Ok(vec![FeatureVector::from_image(image)?]);
    }

    let file = GestureFile::load(path)?;
    let mut recorder =
        GestureRecorder::new(file.surface(settings.display_width, settings.display_height)?);
    let mut vectors = Vec::new();
    for event in file.gesture_events() {
        if let Some(vector) = recorder.handle(&event)? {
            vectors.push(vector);
        }
    }
    Ok(vectors)
}

fn thumbnail(records: &Path, id: &str, out: &Path) -> Result<()> {
    let repo = Repository::with_records(load_records(records)?);
    let record = repo.get(id)?;
    let Some(input) = record.input_data else {
        bail!("record {} has no input data", id);
    };
    input
        .to_image()
        .save_with_format(out, image::ImageFormat::Png)
        .with_context(|| format!("writing {}", out.display()))?;
    info!("Wrote thumbnail of {} to {}", id, out.display());
    Ok(())
}

/// Apply one edit through the repository, show the refreshed board, save the file
fn edit_records<F>(path: &Path, edit: F) -> Result<()>
where
    F: FnOnce(&Repository) -> Result<(), storage::StorageError>,
{
    let repo = Repository::with_records(load_records(path)?);
    let mut board = ResultsBoard::new(&repo);

    edit(&repo)?;

    match board.poll() {
        Some(view) => {
            print!("{}", view);
            save_records(path, &repo.snapshot()?)?;
        }
        None => println!("No changes"),
    }
    Ok(())
}

/// Read a JSON array of records
pub fn load_records(path: &Path) -> Result<Vec<PredictionRecord>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading records {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing records {}", path.display()))
}

/// Write records as pretty JSON
pub fn save_records(path: &Path, records: &[PredictionRecord]) -> Result<()> {
    let text = serde_json::to_string_pretty(records)?;
    fs::write(path, text).with_context(|| format!("writing records {}", path.display()))
}
