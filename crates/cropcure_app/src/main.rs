use anyhow::{Context, Result};
use clap::Parser;
use cropcure_core::{AppConfig, Classifier, Diagnoser, FixedScores, LanguagePreference};
use directories_next::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod render;

const CONFIG_FILE: &str = "cropcure.toml";

/// Diagnose a plant-leaf photo.
#[derive(Debug, Parser)]
#[command(name = "cropcure", version = env!("CROPCURE_VERSION"))]
struct Args {
    /// Leaf image (.jpg, .jpeg or .png).
    image: PathBuf,

    /// english, tamil, hindi, a selector label, or "system".
    #[arg(short, long)]
    language: Option<LanguagePreference>,

    /// Configuration file; defaults to cropcure.toml in the user config dir.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Replay a recorded score vector (JSON array) instead of running the model.
    #[arg(long)]
    scores: Option<PathBuf>,

    /// Print the diagnosis as JSON.
    #[arg(long)]
    json: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "CropCure", "cropcure").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = explicit {
        return AppConfig::load(path).context("configuration could not be loaded");
    }
    match default_config_path() {
        Some(path) if path.exists() => {
            AppConfig::load(&path).context("configuration could not be loaded")
        }
        _ => {
            tracing::debug!("no configuration file, using defaults");
            Ok(AppConfig::default())
        }
    }
}

fn read_scores(path: &Path) -> Result<Vec<f32>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("cannot read scores file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("scores file {} is not a JSON number array", path.display()))
}

#[cfg(feature = "ort")]
fn load_model(config: &AppConfig) -> Result<Arc<dyn Classifier>> {
    let model = cropcure_core::OnnxClassifier::load(&config.model_path)
        .with_context(|| format!("cannot load model {}", config.model_path.display()))?;
    Ok(Arc::new(model))
}

#[cfg(not(feature = "ort"))]
fn load_model(config: &AppConfig) -> Result<Arc<dyn Classifier>> {
    anyhow::bail!(
        "cannot load {}: built without the `ort` feature; pass --scores to replay a recorded output",
        config.model_path.display()
    )
}

fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let preference = args
        .language
        .unwrap_or(LanguagePreference::Fixed(config.language));
    let locale = sys_locale::get_locale();
    let language = preference.resolve(locale.as_deref());
    tracing::debug!("display language: {}", language.code());

    let classifier: Arc<dyn Classifier> = match &args.scores {
        Some(path) => Arc::new(FixedScores::new(read_scores(path)?)),
        None => load_model(&config)?,
    };
    let diagnoser =
        Diagnoser::from_config(classifier, &config).context("startup validation failed")?;

    let diagnosis = diagnoser
        .diagnose_path(&args.image, language)
        .with_context(|| format!("cannot diagnose {}", args.image.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&diagnosis)?);
    } else {
        print!("{}", render::report(&diagnosis));
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);
    if let Err(e) = run(args) {
        eprintln!("cropcure: {e:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cropcure_core::Language;
    use std::ffi::OsStr;
    use tempfile::tempdir;

    #[test]
    fn parses_language_and_flags() {
        let args = Args::try_parse_from([
            "cropcure",
            "leaf.jpg",
            "--language",
            "tamil",
            "--json",
        ])
        .unwrap();
        assert_eq!(args.language, Some(LanguagePreference::Fixed(Language::Tamil)));
        assert!(args.json);
        assert!(args.scores.is_none());
    }

    #[test]
    fn rejects_unknown_language() {
        assert!(Args::try_parse_from(["cropcure", "leaf.jpg", "-l", "klingon"]).is_err());
    }

    #[test]
    fn explicit_config_is_loaded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "top_k = 2\nlanguage = \"hindi\"\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.top_k, 2);
        assert_eq!(config.language, Language::Hindi);
    }

    #[test]
    fn unsupported_upload_is_rejected_by_ingestion() {
        let dir = tempdir().unwrap();
        let config = dir.path().join(CONFIG_FILE);
        let scores = dir.path().join("scores.json");
        let image = dir.path().join("leaf.gif");
        fs::write(&config, "").unwrap();
        fs::write(&scores, serde_json::to_string(&vec![1.0 / 15.0; 15]).unwrap()).unwrap();
        fs::write(&image, b"GIF89a").unwrap();

        let args = Args::try_parse_from([
            OsStr::new("cropcure"),
            image.as_os_str(),
            OsStr::new("--config"),
            config.as_os_str(),
            OsStr::new("--scores"),
            scores.as_os_str(),
        ])
        .unwrap();
        let message = format!("{:#}", run(args).unwrap_err());
        assert!(message.contains("upload rejected: unsupported file type: gif"), "{message}");
    }

    #[test]
    fn scores_file_must_be_a_number_array() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.json");
        let bad = dir.path().join("bad.json");
        fs::write(&good, "[0.5, 0.25, 0.25]").unwrap();
        fs::write(&bad, "{\"a\": 1}").unwrap();
        assert_eq!(read_scores(&good).unwrap(), vec![0.5, 0.25, 0.25]);
        assert!(read_scores(&bad).is_err());
    }
}
