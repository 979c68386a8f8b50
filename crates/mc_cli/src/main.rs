use clap::Parser;
use mc_core::Result;
use mc_inference::{ModelConfig, ModelKind, DEFAULT_MODEL_PATH};
use mc_pipeline::cli::{handle_command, PredictCommands};
use mc_pipeline::init_logging;
use mc_web::{AppState, ServerConfig, DEFAULT_MAX_UPLOAD_BYTES};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Categorize medical articles into 20 categories",
    long_about = None
)]
pub struct Cli {
    #[arg(long, value_enum, default_value_t = ModelKind::Keyword)]
    model: ModelKind,
    /// Model artifact used by the linear model
    #[arg(long, default_value = DEFAULT_MODEL_PATH)]
    model_path: PathBuf,
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Serve the HTTP front-end
    Serve {
        #[arg(long, default_value = "127.0.0.1:8501")]
        addr: SocketAddr,
        #[arg(long, default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
        max_upload_bytes: usize,
    },
    #[command(flatten)]
    Predict(PredictCommands),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli).await?;
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config = ModelConfig::new(cli.model).with_model_path(&cli.model_path);
    let classifier = mc_inference::create_model(Some(config)).await?;

    match cli.command {
        Commands::Serve { addr, max_upload_bytes } => {
            info!("🚀 Starting server (model: {})", classifier.name());
            let config = ServerConfig { addr, max_upload_bytes };
            mc_web::serve(AppState::new(classifier), config).await
        }
        Commands::Predict(command) => handle_command(command, classifier).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_batch() {
        let cli = Cli::parse_from(["medcat", "batch", "articles.csv", "-o", "out.csv"]);
        assert_eq!(cli.model, ModelKind::Keyword);
        match cli.command {
            Commands::Predict(PredictCommands::Batch { file, output }) => {
                assert_eq!(file, PathBuf::from("articles.csv"));
                assert_eq!(output, Some(PathBuf::from("out.csv")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_serve_with_linear_model() {
        let cli = Cli::parse_from([
            "medcat",
            "--model",
            "linear",
            "--model-path",
            "m.json",
            "serve",
            "--addr",
            "0.0.0.0:9000",
        ]);
        assert_eq!(cli.model, ModelKind::Linear);
        assert_eq!(cli.model_path, PathBuf::from("m.json"));
        match cli.command {
            Commands::Serve { addr, max_upload_bytes } => {
                assert_eq!(addr.port(), 9000);
                assert_eq!(max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_predict() {
        let cli =
            Cli::parse_from(["medcat", "predict", "--title", "Heart", "--item-text", "cardiac"]);
        assert!(matches!(
            cli.command,
            Commands::Predict(PredictCommands::Predict { ref title, ref authors, .. })
                if title == "Heart" && authors.is_empty()
        ));
    }
}
