pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use core::{engine::ReportEngine, pipeline::ReportPipeline};
pub use domain::genre::Genre;
pub use domain::listing::ListingStore;
pub use domain::property::{PanelProperty, Property, StandardProperty, Valuation};
pub use utils::error::{FormatError, RealtyError, Result};
