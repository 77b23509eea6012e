use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

use bilan_extractor::renderer::save_rendered_text;
use bilan_extractor::{BilanExtractor, Catalog, OllamaClient, Result};

/// Extract financial variables from a financial statement document.
#[derive(Parser, Debug)]
#[command(name = "bilan-extractor", version)]
struct Args {
    /// Path to the financial statement file (PDF or text)
    filepath: PathBuf,

    /// Ollama model to use
    #[arg(long)]
    model: Option<String>,

    /// Path to save the output JSON
    #[arg(long)]
    output: Option<PathBuf>,

    /// Path to save the intermediate rendered text
    #[arg(long)]
    markdown: Option<PathBuf>,

    /// Path to a variable catalog JSON file
    #[arg(long)]
    variables: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<()> {
    let catalog = match &args.variables {
        Some(path) => Catalog::load(path),
        None => Catalog::builtin(),
    };

    info!("Processing file: {}", args.filepath.display());
    let text = bilan_extractor::render_document(&args.filepath)?;

    if let Some(path) = &args.markdown {
        save_rendered_text(&text, path)?;
    }

    let client = OllamaClient::from_env();
    let mut extractor = BilanExtractor::new(client).with_catalog(catalog);
    if let Some(model) = &args.model {
        extractor = extractor.with_model(model.clone());
    }

    let variables = extractor.extract_from_text(&text).await?;
    let result_json = variables.to_json_string_pretty()?;

    if let Some(output) = &args.output {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(output, &result_json)?;
        info!("Results saved to: {}", output.display());
    }

    println!("{}", result_json);
    info!("Processing completed successfully");
    Ok(())
}
