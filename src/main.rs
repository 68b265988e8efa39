use clap::Parser;
use iss_flyover::core::PassPipeline;
use iss_flyover::utils::{logger, validation::Validate};
use iss_flyover::{
    presenter, Address, CliConfig, Command, Coordinates, FlyoverEngine, FlyoverError,
    HttpPassPipeline, PassRecord, ReqwestFetcher, TomlConfig,
};

fn render_passes(passes: &[PassRecord], json: bool) -> iss_flyover::Result<String> {
    if json {
        presenter::render_json(passes)
    } else {
        Ok(presenter::render_passes(passes)?.join("\n"))
    }
}

fn report_failure(e: &FlyoverError) {
    let kind = if e.is_upstream() { "upstream" } else { "configuration" };
    tracing::error!("❌ Lookup failed ({} error): {}", kind, e);
    println!("{}", presenter::format_failure(e));
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = presenter::failure_exit_code(e);
    if exit_code > 0 {
        std::process::exit(exit_code);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let file_config = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => None,
    };

    let verbose = cli.verbose || file_config.as_ref().is_some_and(|c| c.verbose());
    if cli.log_json || file_config.as_ref().is_some_and(|c| c.json_logs()) {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    let endpoints = cli.apply_overrides(
        file_config
            .map(|c| c.endpoint_config())
            .unwrap_or_default(),
    );
    tracing::debug!("Endpoint config: {:?}", endpoints);

    if let Err(e) = endpoints.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(presenter::failure_exit_code(&e));
    }

    let fetcher = ReqwestFetcher::from_config(&endpoints)?;
    let engine = FlyoverEngine::new(HttpPassPipeline::new(fetcher, endpoints));
    let json = cli.json;

    match cli.command() {
        Command::Next => {
            engine
                .resolve_next_passes(|outcome| {
                    match outcome.and_then(|passes| render_passes(&passes, json)) {
                        Ok(output) => println!("{}", output),
                        Err(e) => report_failure(&e),
                    }
                })
                .await;
        }
        Command::Ip => match engine.pipeline().resolve_address().await {
            Ok(address) if json => println!("{}", serde_json::json!({ "ip": address })),
            Ok(address) => println!("{}", presenter::format_address(&address)),
            Err(e) => report_failure(&e),
        },
        Command::Locate { ip } => {
            let pipeline = engine.pipeline();
            let address = match ip {
                Some(ip) => Ok(Address::new(ip)),
                None => pipeline.resolve_address().await,
            };
            let located = match address {
                Ok(address) => pipeline.resolve_location(&address).await,
                Err(e) => Err(e),
            };
            match located {
                Ok(coords) if json => println!("{}", serde_json::to_string_pretty(&coords)?),
                Ok(coords) => println!("{}", presenter::format_coordinates(&coords)),
                Err(e) => report_failure(&e),
            }
        }
        Command::Passes { lat, lon } => {
            let coords = Coordinates::new(lat, lon);
            match engine
                .pipeline()
                .resolve_passes(&coords)
                .await
                .and_then(|passes| render_passes(&passes, json))
            {
                Ok(output) => println!("{}", output),
                Err(e) => report_failure(&e),
            }
        }
    }

    Ok(())
}
