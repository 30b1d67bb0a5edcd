use anyhow::Result;
use realty_report::core::pipeline::{CSV_LISTINGS_FILE, JSON_REPORT_FILE, TEXT_REPORT_FILE};
use realty_report::{LocalStorage, ReportEngine, ReportPipeline, TomlConfig};
use tempfile::TempDir;

const LISTINGS: &str = "\
REALESTATE#Budapest#250000#100#4#FLAT
REALESTATE#Debrecen#220000#120#5#FAMILYHOUSE
PANEL#Budapest#200000#60#3#CONDOMINIUM#4#no
REALESTATE#Szeged#100000#50#2#condominium
PANEL#Debrecen#120000#35#2#CONDOMINIUM#1#yes
REALESTATE#Pécs#400000#100#4#CONDOMINIUM
";

fn write_input(dir: &TempDir, content: &str) -> Result<String> {
    let path = dir.path().join("data.txt");
    std::fs::write(&path, content)?;
    Ok(path.to_string_lossy().into_owned())
}

fn config_for(input: &str, output: &str, formats: &str) -> Result<TomlConfig> {
    let toml = format!(
        r#"
[source]
input = "{input}"

[load]
output_path = "{output}"
output_formats = {formats}
"#
    );
    Ok(TomlConfig::from_toml_str(&toml)?)
}

#[tokio::test]
async fn test_end_to_end_text_report() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_input(&temp_dir, LISTINGS)?;
    let output_path = temp_dir.path().join("out").to_string_lossy().into_owned();

    let config = config_for(&input, &output_path, r#"["txt"]"#)?;
    let storage = LocalStorage::new(output_path.clone());
    let engine = ReportEngine::new(ReportPipeline::new(storage, config));

    let summary = engine.run().await?;

    assert_eq!(summary.listings, 6);
    assert_eq!(summary.rejected_lines, 0);
    assert!(!summary.source_unavailable);
    assert!(summary.output_path.unwrap().ends_with(TEXT_REPORT_FILE));

    let text = std::fs::read_to_string(temp_dir.path().join("out").join(TEXT_REPORT_FILE))?;
    let lines: Vec<&str> = text.lines().collect();

    // 5_000_000 + 5_556_600 + 15_600_000 + 31_680_000 + 32_500_000 + 40_000_000
    assert_eq!(lines[0], "Average square meter price: 215000.00");
    assert_eq!(lines[1], "Cheapest property price: 5000000");
    assert_eq!(lines[2], "Average sqm per room of most expensive in Budapest: 25.00");
    assert_eq!(lines[3], "Total price of all properties: 130336600.00");
    assert_eq!(lines[4], "");
    assert_eq!(lines[5], "--- Condominiums below average total price ---");

    let condos = &lines[6..];
    assert_eq!(condos.len(), 3);
    assert!(condos[0].contains("Szeged"));
    assert!(condos[1].contains("Debrecen"));
    assert!(condos[2].contains("Budapest"));

    Ok(())
}

#[tokio::test]
async fn test_malformed_lines_do_not_stop_ingestion() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_input(
        &temp_dir,
        "REALESTATE#Budapest#abc#100#4#FLAT\n\
         VILLA#Budapest#250000#100#4#FLAT\n\
         PANEL#Budapest#250000#100#4#FLAT#3\n\
         REALESTATE#Budapest#250000#100#4#MANSION\n\
         REALESTATE#Budapest#250000#100#4#FLAT\n",
    )?;
    let output_path = temp_dir.path().to_string_lossy().into_owned();

    let config = config_for(&input, &output_path, r#"["txt"]"#)?;
    let engine = ReportEngine::new(ReportPipeline::new(LocalStorage::new(output_path), config));

    let summary = engine.run().await?;

    assert_eq!(summary.listings, 1);
    assert_eq!(summary.rejected_lines, 4);
    assert!(summary.output_path.is_some());

    let text = std::fs::read_to_string(temp_dir.path().join(TEXT_REPORT_FILE))?;
    assert!(text.contains("Cheapest property price: 32500000"));

    Ok(())
}

#[tokio::test]
async fn test_missing_source_writes_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let missing = temp_dir.path().join("nope.txt").to_string_lossy().into_owned();
    let output_path = temp_dir.path().join("out").to_string_lossy().into_owned();

    let config = config_for(&missing, &output_path, r#"["txt", "csv"]"#)?;
    let engine = ReportEngine::new(ReportPipeline::new(
        LocalStorage::new(output_path.clone()),
        config,
    ));

    let summary = engine.run().await?;

    assert!(summary.source_unavailable);
    assert_eq!(summary.listings, 0);
    assert!(summary.output_path.is_none());
    assert!(!std::path::Path::new(&output_path).exists());

    Ok(())
}

#[tokio::test]
async fn test_empty_input_skips_report() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_input(&temp_dir, "\n\n")?;
    let output_path = temp_dir.path().join("out").to_string_lossy().into_owned();

    let config = config_for(&input, &output_path, r#"["txt"]"#)?;
    let engine = ReportEngine::new(ReportPipeline::new(
        LocalStorage::new(output_path.clone()),
        config,
    ));

    let summary = engine.run().await?;

    assert!(!summary.source_unavailable);
    assert_eq!(summary.rejected_lines, 0);
    assert!(summary.output_path.is_none());
    assert!(!temp_dir.path().join("out").join(TEXT_REPORT_FILE).exists());

    Ok(())
}

#[tokio::test]
async fn test_csv_and_json_exports() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_input(&temp_dir, LISTINGS)?;
    let output_path = temp_dir.path().to_string_lossy().into_owned();

    let config = config_for(&input, &output_path, r#"["csv", "json"]"#)?;
    let engine = ReportEngine::new(ReportPipeline::new(
        LocalStorage::new(output_path),
        config,
    ));

    let summary = engine.run().await?;
    assert!(summary.output_path.unwrap().ends_with(CSV_LISTINGS_FILE));
    assert!(!temp_dir.path().join(TEXT_REPORT_FILE).exists());

    let mut reader = csv::Reader::from_path(temp_dir.path().join(CSV_LISTINGS_FILE))?;
    let totals: Vec<i64> = reader
        .records()
        .map(|r| r.map(|rec| rec[8].parse::<i64>().unwrap_or(-1)))
        .collect::<std::result::Result<_, _>>()?;
    assert_eq!(
        totals,
        vec![5_000_000, 5_556_600, 15_600_000, 31_680_000, 32_500_000, 40_000_000]
    );

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(temp_dir.path().join(JSON_REPORT_FILE))?)?;
    assert_eq!(json["listing_count"], 6);
    assert_eq!(json["city"], "Budapest");
    assert!(json["generated_at"].is_string());
    assert_eq!(json["below_average"].as_array().map(Vec::len), Some(3));

    Ok(())
}

#[tokio::test]
async fn test_discount_is_reflected_in_report() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_input(&temp_dir, "REALESTATE#Szeged#200000#50#2#FLAT\n")?;
    let output_path = temp_dir.path().to_string_lossy().into_owned();

    let config = config_for(&input, &output_path, r#"["txt"]"#)?;
    let engine = ReportEngine::new(ReportPipeline::new(
        LocalStorage::new(output_path),
        config,
    ))
    .with_discount(Some(50));

    engine.run().await?;

    let text = std::fs::read_to_string(temp_dir.path().join(TEXT_REPORT_FILE))?;
    assert!(text.contains("Average square meter price: 100000.00"));
    assert!(text.contains("Cheapest property price: 5000000"));

    Ok(())
}
