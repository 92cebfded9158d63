use churn_predict::config::cli::{BatchArgs, Command, PredictArgs};
use churn_predict::core::online::{predict_customer, render_json, render_text};
use churn_predict::core::ConfigProvider;
use churn_predict::utils::error::{ChurnError, ErrorSeverity};
use churn_predict::utils::{logger, validation::Validate};
use churn_predict::{BatchPipeline, ChurnModel, CliConfig, LocalStorage, PredictionEngine, Settings};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting churn-predict CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli).await {
        report_and_exit(e);
    }

    Ok(())
}

async fn run(cli: &CliConfig) -> churn_predict::Result<()> {
    // 驗證配置
    let settings = cli.settings()?;
    settings.validate()?;

    // 模型只在啟動時載入一次
    let model = ChurnModel::from_file(settings.model_path())?;
    tracing::info!(
        "✅ Model loaded from {} ({} features)",
        settings.model_path(),
        model.n_features()
    );

    match &cli.command {
        Command::Predict(args) => run_online(&model, &settings, args),
        Command::Batch(args) => run_batch(model, settings, args).await,
    }
}

fn run_online(model: &ChurnModel, settings: &Settings, args: &PredictArgs) -> churn_predict::Result<()> {
    let prediction = predict_customer(model, &args.customer, settings.threshold())?;

    if args.json {
        println!("{}", render_json(&prediction, settings.threshold(), &args.customer)?);
    } else {
        println!("{}", render_text(&prediction));
    }
    Ok(())
}

async fn run_batch(model: ChurnModel, settings: Settings, args: &BatchArgs) -> churn_predict::Result<()> {
    args.validate()?;

    // 輸入檔以絕對路徑讀取，儲存層的根目錄是輸出目錄
    let input = std::env::current_dir()?.join(&args.input);
    let input = input.to_string_lossy().to_string();

    let monitor_enabled = settings.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(settings.output_path.clone());
    let pipeline = BatchPipeline::new(storage, settings, model, input);
    let engine = PredictionEngine::new_with_monitoring(pipeline, monitor_enabled);

    let summary = engine.run().await?;

    tracing::info!("✅ Batch prediction completed successfully!");
    println!("✅ Predictions completed successfully!");
    println!(
        "📊 {} customers scored, {} flagged as churn risk, {} skipped",
        summary.rows_scored, summary.churn_count, summary.rows_dropped
    );
    println!("🕒 Generated at: {}", summary.generated_at.to_rfc3339());
    println!("📁 Results saved to: {}", summary.output_path);
    Ok(())
}

fn report_and_exit(e: ChurnError) {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ churn-predict failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    // 輸出用戶友好的錯誤信息
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };

    if exit_code > 0 {
        std::process::exit(exit_code);
    }
}
