use clap::Parser;
use docs_gen::utils::error::ErrorSeverity;
use docs_gen::utils::{logger, validation::Validate};
use docs_gen::{CliConfig, DocsEngine, HttpFetcher, LocalStorage, ReleasePipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting docs-gen");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }
    let print_json = cli.json;

    // 解析並驗證配置
    let config = match cli.into_build_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load configuration: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let fetcher = HttpFetcher::new(config.request_timeout)?;
    let storage = LocalStorage::new(config.docs_dir.clone());
    let pipeline = ReleasePipeline::new(storage, fetcher, config);
    let engine = DocsEngine::new(pipeline);

    match engine.run().await {
        Ok(report) => {
            tracing::info!("✅ Documentation generated successfully!");
            tracing::info!("📁 Output saved to: {}", report.output_path);
            if print_json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("✅ Documentation generated successfully!");
                println!("📁 Output saved to: {}", report.output_path);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Documentation build failed: {} (Severity: {:?})",
                e,
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Recoverable => 2,
                ErrorSeverity::Fatal => 1,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
