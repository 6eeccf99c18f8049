use crate::models::CleaningParameters;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "basic-cleaning")]
#[command(about = "Download the raw dataset, apply basic data cleaning and publish the result as a new artifact")]
#[command(version)]
pub struct Cli {
    #[arg(
        long = "input_artifact",
        alias = "input-artifact",
        help = "Name of the input artifact to be cleaned (name, name:latest or name:vN)"
    )]
    pub input_artifact: String,

    #[arg(
        long = "output_artifact",
        alias = "output-artifact",
        help = "Name for the output cleaned data artifact"
    )]
    pub output_artifact: String,

    #[arg(
        long = "output_type",
        alias = "output-type",
        help = "Type of the output artifact, e.g. 'clean_data'"
    )]
    pub output_type: String,

    #[arg(
        long = "output_description",
        alias = "output-description",
        help = "Description of the cleaned dataset"
    )]
    pub output_description: String,

    #[arg(
        long = "min_price",
        alias = "min-price",
        allow_negative_numbers = true,
        help = "Minimum price to include in the dataset"
    )]
    pub min_price: f64,

    #[arg(
        long = "max_price",
        alias = "max-price",
        allow_negative_numbers = true,
        help = "Maximum price to include in the dataset"
    )]
    pub max_price: f64,

    #[arg(
        long = "input_file",
        alias = "input-file",
        help = "CSV file to use when the input artifact holds several"
    )]
    pub input_file: Option<String>,

    #[arg(long, help = "Settings file (TOML)")]
    pub config: Option<PathBuf>,

    #[arg(
        long = "store_root",
        alias = "store-root",
        help = "Root directory of the artifact store"
    )]
    pub store_root: Option<PathBuf>,

    #[arg(
        long = "dry_run",
        alias = "dry-run",
        help = "Clean and report without publishing the output artifact"
    )]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long = "log_file", alias = "log-file", help = "Log file path")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn parameters(&self) -> CleaningParameters {
        CleaningParameters {
            input_artifact: self.input_artifact.clone(),
            output_artifact: self.output_artifact.clone(),
            output_type: self.output_type.clone(),
            output_description: self.output_description.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
        }
    }
}
