#![cfg(feature = "cli")]

use anyhow::Result;
use churn_predict::config::cli::Command;
use churn_predict::utils::validation::Validate;
use churn_predict::CliConfig;
use clap::Parser;
use tempfile::TempDir;

/// 測試 TOML 設定與命令列參數的優先順序
#[test]
fn test_cli_flags_override_toml_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("churn.toml");
    std::fs::write(
        &config_path,
        r#"
[model]
path = "models/churn.json"

[prediction]
threshold = 0.3

[batch]
output_path = "./from-file"
output_filename = "scored.csv"

[monitoring]
enabled = true
"#,
    )?;

    let cli = CliConfig::try_parse_from([
        "churn-predict",
        "--config",
        config_path.to_str().unwrap(),
        "--threshold",
        "0.6",
        "batch",
        "--input",
        "customers.csv",
    ])?;

    let settings = cli.settings()?;
    assert_eq!(settings.model_path, "models/churn.json");
    assert_eq!(settings.threshold, 0.6);
    assert_eq!(settings.output_path, "./from-file");
    assert_eq!(settings.output_filename, "scored.csv");
    assert!(settings.monitor);
    assert!(settings.validate().is_ok());

    assert!(matches!(cli.command, Command::Batch(_)));
    Ok(())
}

#[test]
fn test_invalid_threshold_in_file_is_rejected() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("churn.toml");
    std::fs::write(&config_path, "[prediction]\nthreshold = 0.99\n")?;

    let cli = CliConfig::try_parse_from([
        "churn-predict",
        "--config",
        config_path.to_str().unwrap(),
        "predict",
    ])?;

    assert!(cli.settings().is_err());
    Ok(())
}

#[test]
fn test_demo_config_reads_model_path_from_env() -> Result<()> {
    std::env::set_var("CHURN_MODEL_PATH", "demos/model.json");
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/churn-config.toml");

    let cli = CliConfig::try_parse_from(["churn-predict", "--config", path.to_str().unwrap(), "predict"])?;
    let settings = cli.settings()?;
    std::env::remove_var("CHURN_MODEL_PATH");

    assert_eq!(settings.model_path, "demos/model.json");
    assert_eq!(settings.threshold, 0.5);
    Ok(())
}
