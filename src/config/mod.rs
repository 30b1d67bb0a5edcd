pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::genre::Genre;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "realty-report")]
#[command(about = "Summarise real-estate listings into a valuation report")]
pub struct CliConfig {
    /// `#`-delimited listing file
    #[arg(short, long, default_value = "data.txt")]
    pub input: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// City whose most expensive listing is reported
    #[arg(long, default_value = "Budapest")]
    pub city: String,

    /// Genre listed below the average total price
    #[arg(long, default_value = "CONDOMINIUM")]
    pub genre: Genre,

    /// Output formats: txt, csv, json
    #[arg(long, value_delimiter = ',', default_value = "txt")]
    pub formats: Vec<String>,

    /// Discount percentage applied to every listing before reporting
    #[arg(long, allow_negative_numbers = true)]
    pub discount: Option<i32>,

    /// TOML configuration file; replaces the flags above when given
    #[arg(short, long)]
    pub config: Option<String>,

    /// Append log output to this file as well
    #[arg(long)]
    pub log_file: Option<String>,

    #[arg(long, help = "Emit console logs as JSON")]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn report_city(&self) -> &str {
        &self.city
    }

    fn report_genre(&self) -> Genre {
        self.genre
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }

    fn discount(&self) -> Option<i32> {
        self.discount
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_non_empty_string("city", &self.city)?;
        validation::validate_output_formats("formats", &self.formats)?;
        if let Some(log_file) = &self.log_file {
            validation::validate_path("log_file", log_file)?;
        }
        Ok(())
    }
}
