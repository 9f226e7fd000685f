use clap::Parser;
use secret_santa::core::ConfigProvider;
use secret_santa::utils::error::{ErrorSeverity, SantaError};
use secret_santa::utils::{logger, validation::Validate};
use secret_santa::{AssignmentEngine, AssignmentPipeline, CliConfig, LocalStorage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting secret-santa CLI");
    if cli.verbose {
        tracing::debug!("CLI args: {:?}", cli);
    }

    let settings = match cli.resolve() {
        Ok(settings) => settings,
        Err(e) => exit_with(&e),
    };

    // 驗證配置
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!(
        "Strategy: {:?}, max attempts: {}, output: {} ({:?})",
        settings.strategy(),
        settings.max_attempts(),
        settings.output_path(),
        settings.output_format()
    );

    let storage = LocalStorage::new(".");
    let pipeline = AssignmentPipeline::new(storage, settings);
    let engine = AssignmentEngine::new(pipeline);

    if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - output file will not be written");
        match engine.preview().await {
            Ok(result) => {
                for pairing in &result.pairings {
                    println!("{}", pairing);
                }
                println!(
                    "✅ {} pairings generated in {} attempt(s)",
                    result.pairings.len(),
                    result.attempts
                );
            }
            Err(e) => exit_with(&e),
        }
        return Ok(());
    }

    match engine.run().await {
        Ok(summary) => {
            tracing::info!("✅ Assignment completed successfully!");
            println!(
                "✅ Assigned {} participants ({} prior assignments respected, {} attempt(s))",
                summary.participants, summary.prior_assignments, summary.attempts
            );
            println!("📁 Output saved to: {}", summary.output_path);
        }
        Err(e) => exit_with(&e),
    }

    Ok(())
}

fn exit_with(e: &SantaError) -> ! {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2, // 重新執行可能成功
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
