// Command line front end for the identity card scanner
use clap::Parser;
use kimlik::models::ScanResponse;
use kimlik::utils::ScanError;
use kimlik::{IdCardScanner, ScannerConfig};
use log::info;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "kimlik", version, about = "Read identity fields from Turkish ID card scans")]
struct Args {
    /// Front side image
    #[arg(long, required_unless_present = "front_lines", conflicts_with = "front_lines")]
    front: Option<PathBuf>,

    /// Back side image
    #[arg(long, requires = "front")]
    back: Option<PathBuf>,

    /// Already recognised front side text, one OCR line per line
    #[arg(long)]
    front_lines: Option<PathBuf>,

    /// Already recognised back side text, one OCR line per line
    #[arg(long, requires = "front_lines")]
    back_lines: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Lines searched after each caption
    #[arg(long)]
    window: Option<usize>,

    /// Tesseract language code
    #[arg(long)]
    lang: Option<String>,

    /// Tesseract traineddata directory
    #[arg(long)]
    tessdata: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn load_config(args: &Args) -> Result<ScannerConfig, ScanError> {
    let mut config = match &args.config {
        Some(path) => ScannerConfig::from_file(path)?,
        None => ScannerConfig::default(),
    };

    if let Some(window) = args.window {
        config.label_window = window;
    }
    if let Some(lang) = &args.lang {
        config.ocr_language = lang.clone();
    }
    if let Some(dir) = &args.tessdata {
        config.tessdata_dir = Some(dir.to_string_lossy().into_owned());
    }

    config.validate()?;
    Ok(config)
}

fn read_lines(path: &Path) -> Result<Vec<String>, ScanError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(contents.lines().map(str::to_string).collect())
}

fn run(args: &Args) -> Result<ScanResponse, ScanError> {
    let config = load_config(args)?;
    let scanner = IdCardScanner::new(config);

    if let Some(front_path) = &args.front_lines {
        info!("Extracting fields from {}", front_path.display());
        let front = read_lines(front_path)?;
        let back = args.back_lines.as_deref().map(read_lines).transpose()?;
        return Ok(ScanResponse::ok(scanner.scan_lines(&front, back.as_deref())));
    }

    match &args.front {
        Some(front_path) => {
            info!("Scanning {}", front_path.display());
            Ok(scanner.scan_files(front_path, args.back.as_deref()))
        }
        None => Err(ScanError::ConfigError(
            "either --front or --front-lines is required".to_string(),
        )),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let response = match run(&args) {
        Ok(response) => response,
        Err(err) => ScanResponse::failed(err),
    };

    let output = if args.pretty {
        serde_json::to_string_pretty(&response)
    } else {
        serde_json::to_string(&response)
    };
    match output {
        Ok(json) => println!("{}", json),
        Err(err) => {
            eprintln!("Failed to serialize response: {}", err);
            return ExitCode::FAILURE;
        }
    }

    if response.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
