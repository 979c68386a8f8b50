use std::path::{Path, PathBuf};
use std::sync::Arc;
use clap::Subcommand;
use mc_core::{ArticleForm, CategorySummary, Classifier, PredictionResult, Result};
use tracing::info;
use crate::batch::{BatchOutcome, BatchPipeline};
use crate::demo::TEMPLATE_CSV;
use crate::export::FILE_NAME;
use crate::single::SinglePredictor;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum PredictCommands {
    /// Classify a single article
    Predict {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        authors: String,
        /// The article text or abstract
        #[arg(long, default_value = "")]
        item_text: String,
    },
    /// Classify every article of a CSV file and write the predictions
    Batch {
        file: PathBuf,
        /// Where to write the predictions (defaults to NLP-Predictions.csv)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Classify the bundled sample articles
    Demo {
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print the CSV upload template
    Template,
    /// List the categories of the loaded model
    Categories,
}

pub async fn handle_command(
    command: PredictCommands,
    classifier: Arc<dyn Classifier>,
) -> Result<()> {
    match command {
        PredictCommands::Predict { title, authors, item_text } => {
            let predictor = SinglePredictor::new(classifier);
            let form = ArticleForm { title, authors, item_text };
            match predictor.submit(form).await {
                Ok(label) => println!("The predicted article category is {}.", label),
                Err(e) => {
                    eprintln!("{}", e.user_message());
                    return Err(e);
                }
            }
        }
        PredictCommands::Batch { file, output } => {
            let pipeline = BatchPipeline::new(classifier);
            let input = tokio::fs::read(&file).await?;
            info!("📄 Classifying articles from {}", file.display());
            let outcome = report(pipeline.run(&input).await)?;
            write_export(&outcome, output.as_deref()).await?;
        }
        PredictCommands::Demo { output } => {
            let pipeline = BatchPipeline::new(classifier);
            let outcome = report(pipeline.run_demo().await)?;
            write_export(&outcome, output.as_deref()).await?;
        }
        PredictCommands::Template => {
            print!("{}", TEMPLATE_CSV);
        }
        PredictCommands::Categories => {
            println!("Categories of the {} model:", classifier.name());
            for label in classifier.labels() {
                println!("  {}", label);
            }
        }
    }
    Ok(())
}

fn report(outcome: Result<BatchOutcome>) -> Result<BatchOutcome> {
    match outcome {
        Ok(outcome) => {
            print!("{}", render_result(&outcome.result));
            print!("{}", render_summary(&outcome.summary));
            Ok(outcome)
        }
        Err(e) => {
            eprintln!("{}", e.user_message());
            Err(e)
        }
    }
}

/// Where an export lands when no `--output` is given.
fn export_path(output: Option<&Path>) -> PathBuf {
    output.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(FILE_NAME))
}

async fn write_export(outcome: &BatchOutcome, output: Option<&Path>) -> Result<()> {
    let path = export_path(output);
    tokio::fs::write(&path, outcome.export.as_bytes()).await?;
    info!("💾 Wrote {} bytes to {}", outcome.export.len(), path.display());
    Ok(())
}

pub fn render_result(result: &PredictionResult) -> String {
    let width = result
        .predictions()
        .map(|label| label.as_str().chars().count())
        .max()
        .unwrap_or(0)
        .max("category_prediction".len());

    let mut out = format!("{:>5}  {:<width$}  title\n", "", "category_prediction", width = width);
    for row in result.rows() {
        out.push_str(&format!(
            "{:>5}  {:<width$}  {}\n",
            row.index,
            row.category_prediction.as_str(),
            row.record.title,
            width = width
        ));
    }
    out
}

pub fn render_summary(summary: &CategorySummary) -> String {
    let mut out = format!("\n{} articles in {} categories\n", summary.total(), summary.len());
    for (label, count) in summary.iter() {
        out.push_str(&format!("  {:>4}  {}\n", count, label));
    }
    out
}
