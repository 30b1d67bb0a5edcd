use crate::core::parser::ingest_source;
use crate::core::report::{build_report, listings_csv, ReportOptions};
use crate::core::{ConfigProvider, Ingestion, ListingStore, Pipeline, Report, Storage};
use crate::utils::error::Result;

pub const TEXT_REPORT_FILE: &str = "report.txt";
pub const CSV_LISTINGS_FILE: &str = "listings.csv";
pub const JSON_REPORT_FILE: &str = "report.json";

pub const SUPPORTED_FORMATS: [&str; 3] = ["txt", "csv", "json"];

/// Reads the listing file, reduces it into a report and writes the report
/// in every configured format.
pub struct ReportPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ReportPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn report_options(&self) -> ReportOptions {
        ReportOptions {
            city: self.config.report_city().to_string(),
            genre: self.config.report_genre(),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ReportPipeline<S, C> {
    async fn extract(&self) -> Result<Ingestion> {
        tracing::debug!("Reading listings from: {}", self.config.input_path());
        Ok(ingest_source(&self.storage, self.config.input_path()).await)
    }

    async fn transform(&self, listings: &ListingStore) -> Result<Report> {
        build_report(listings, &self.report_options())
    }

    async fn load(&self, report: &Report, listings: &ListingStore) -> Result<String> {
        let mut written = Vec::new();

        for format in self.config.output_formats() {
            let (file_name, data) = match format.as_str() {
                "txt" => (TEXT_REPORT_FILE, report.render_text().into_bytes()),
                "csv" => (CSV_LISTINGS_FILE, listings_csv(listings)?),
                "json" => (
                    JSON_REPORT_FILE,
                    report.render_json(chrono::Utc::now())?.into_bytes(),
                ),
                other => {
                    // 設定驗證已擋下，這裡只記錄
                    tracing::warn!("Unsupported output format '{}' skipped", other);
                    continue;
                }
            };

            tracing::debug!("Writing {} ({} bytes) to storage", file_name, data.len());
            self.storage.write_file(file_name, &data).await?;
            written.push(file_name);
        }

        let primary = written.first().copied().unwrap_or(TEXT_REPORT_FILE);
        Ok(format!("{}/{}", self.config.output_path(), primary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::genre::Genre;
    use crate::utils::error::RealtyError;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn put_file(&self, path: &str, content: &str) {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), content.as_bytes().to_vec());
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                RealtyError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        input_path: String,
        output_path: String,
        output_formats: Vec<String>,
    }

    impl MockConfig {
        fn new(formats: &[&str]) -> Self {
            Self {
                input_path: "data.txt".to_string(),
                output_path: "test_output".to_string(),
                output_formats: formats.iter().map(|f| f.to_string()).collect(),
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn input_path(&self) -> &str {
            &self.input_path
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn report_city(&self) -> &str {
            "Budapest"
        }

        fn report_genre(&self) -> Genre {
            Genre::Condominium
        }

        fn output_formats(&self) -> &[String] {
            &self.output_formats
        }

        fn discount(&self) -> Option<i32> {
            None
        }
    }

    const DATA: &str = "\
REALESTATE#Budapest#250000#100#4#FLAT
PANEL#Budapest#200000#60#3#CONDOMINIUM#4#no
REALESTATE#Szeged#100000#50#2#CONDOMINIUM
";

    #[tokio::test]
    async fn test_extract_reads_input_file() {
        let storage = MockStorage::new();
        storage.put_file("data.txt", DATA).await;
        let pipeline = ReportPipeline::new(storage, MockConfig::new(&["txt"]));

        let ingestion = pipeline.extract().await.unwrap();

        assert_eq!(ingestion.listings.len(), 3);
        assert!(ingestion.errors.is_empty());
    }

    #[tokio::test]
    async fn test_extract_missing_source_yields_empty_ingestion() {
        let pipeline = ReportPipeline::new(MockStorage::new(), MockConfig::new(&["txt"]));

        let ingestion = pipeline.extract().await.unwrap();

        assert!(ingestion.listings.is_empty());
        assert!(matches!(
            ingestion.source_error,
            Some(RealtyError::SourceUnavailable { ref path, .. }) if path == "data.txt"
        ));
    }

    #[tokio::test]
    async fn test_load_writes_every_format() {
        let storage = MockStorage::new();
        storage.put_file("data.txt", DATA).await;
        let pipeline = ReportPipeline::new(storage.clone(), MockConfig::new(&["txt", "csv", "json"]));

        let ingestion = pipeline.extract().await.unwrap();
        let report = pipeline.transform(&ingestion.listings).await.unwrap();
        let output = pipeline.load(&report, &ingestion.listings).await.unwrap();

        assert_eq!(output, "test_output/report.txt");

        let text = String::from_utf8(storage.get_file(TEXT_REPORT_FILE).await.unwrap()).unwrap();
        assert!(text.starts_with("Average square meter price: "));
        assert!(text.contains("--- Condominiums below average total price ---"));

        assert!(storage.get_file(CSV_LISTINGS_FILE).await.is_some());
        let json = storage.get_file(JSON_REPORT_FILE).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(json["listing_count"], 3);
    }

    #[tokio::test]
    async fn test_transform_empty_store() {
        let pipeline = ReportPipeline::new(MockStorage::new(), MockConfig::new(&["txt"]));
        let result = pipeline.transform(&ListingStore::new()).await;
        assert!(matches!(result, Err(RealtyError::EmptyStore)));
    }
}
