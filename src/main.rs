use aspect_loader::domain::model::{EXIT_FATAL, EXIT_SUCCESS};
use aspect_loader::utils::{logger, validation::Validate};
use aspect_loader::{AspectLoader, CliConfig, LoaderError};
use clap::Parser;

fn fail(e: &LoaderError) -> ! {
    tracing::error!("❌ {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(EXIT_FATAL);
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => fail(&e),
    };
    tracing::debug!("Resolved config: {:?}", config);

    if let Err(e) = config.validate() {
        fail(&e);
    }

    let tokens = match config.build_token_provider() {
        Ok(tokens) => tokens,
        Err(e) => fail(&e),
    };
    let client = match config.build_client() {
        Ok(client) => client,
        Err(e) => fail(&e),
    };

    let loader = AspectLoader::new(tokens, config, client);
    let report = match loader.run().await {
        Ok(report) => report,
        Err(e) => fail(&e),
    };

    if cli.verbose {
        if let Ok(json) = serde_json::to_string_pretty(&report) {
            tracing::debug!("Run report:\n{}", json);
        }
    }

    let exit_code = report.exit_code();
    if exit_code != EXIT_SUCCESS {
        eprintln!(
            "⚠️  {} of {} definition file(s) were not created",
            report.not_created(),
            report.files.len()
        );
        std::process::exit(exit_code);
    }
}
