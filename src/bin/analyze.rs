use anyhow::{bail, Context};
use verifact_lib::models::ImageFile;
use verifact_lib::services::{CredibilityEngine, EngineConfig};

const USAGE: &str = "Usage:
  analyze <text>
  analyze --file <path.txt>
  analyze --url <url>
  analyze --image <path> [--mime <type>]

Options:
  --warm   load the classifier before analyzing text

Environment:
  VERIFACT_CLASSIFIER_MODEL, VERIFACT_CLASSIFIER_URL, VERIFACT_CLASSIFIER_GPU_URL,
  VERIFACT_HF_TOKEN, VERIFACT_ANALYSIS_TIMEOUT_SECS, VERIFACT_LOG_DIR";

fn parse_arg_value(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn has_flag(args: &[String], key: &str) -> bool {
    args.iter().any(|a| a == key)
}

fn guess_mime(path: &str) -> String {
    let ext = std::path::Path::new(path)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
    .to_string()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || has_flag(&args, "--help") {
        eprintln!("{}", USAGE);
        return Ok(());
    }

    verifact_lib::init_logging();
    let engine = CredibilityEngine::new(EngineConfig::from_env());

    let result = if let Some(url) = parse_arg_value(&args, "--url") {
        engine.analyze_url(&url)?
    } else if let Some(path) = parse_arg_value(&args, "--image") {
        let meta = std::fs::metadata(&path).with_context(|| format!("read image {}", path))?;
        let name = std::path::Path::new(&path)
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path.clone());
        let mime = parse_arg_value(&args, "--mime").unwrap_or_else(|| guess_mime(&path));
        engine.analyze_image(&ImageFile::new(name, meta.len(), mime))
    } else {
        let text = match parse_arg_value(&args, "--file") {
            Some(path) => {
                std::fs::read_to_string(&path).with_context(|| format!("read text file {}", path))?
            }
            None => args
                .iter()
                .filter(|a| !a.starts_with("--"))
                .cloned()
                .collect::<Vec<_>>()
                .join(" "),
        };
        if text.trim().is_empty() {
            bail!("no text to analyze\n\n{}", USAGE);
        }
        if has_flag(&args, "--warm") {
            engine.initialize().await?;
        }
        engine.analyze_text(&text).await?
    };

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
