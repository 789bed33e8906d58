use clap::Parser;
use face_report::{analyze, cli, config, error, transport};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use face_report_common::Feature;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // エラーはここで表示して終了コードだけ返す
    if let Err(err) = run(cli).await {
        eprintln!("✖ {}", err);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { image, base_url, timeout, output } => {
            let client_config = config.client_config(base_url.as_deref(), timeout)?;
            let transport = transport::HttpTransport::new(&client_config)?;

            let spinner = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
                spinner.set_style(style);
            }
            spinner.set_message("Processing facial features...");
            spinner.enable_steady_tick(Duration::from_millis(100));

            let report = analyze::analyze_image(&transport, &client_config, &image).await;
            spinner.finish_and_clear();
            let report = report?;

            println!("{}", report.render_text());

            if let Some(output) = output {
                let json = serde_json::to_string_pretty(&report)?;
                std::fs::write(&output, json)?;
                println!("✔ Report saved: {}", output.display());
            }
        }

        Commands::Features => {
            for feature in Feature::ALL {
                println!("{:<15} {}", feature.label(), feature.description());
            }
        }

        Commands::Config { set_base_url, set_timeout, show } => {
            let mut config = config;

            if let Some(url) = set_base_url {
                config.set_base_url(url)?;
                println!("✔ Base URL saved");
            }

            if let Some(seconds) = set_timeout {
                config.set_timeout(seconds)?;
                println!("✔ Timeout saved");
            }

            if show {
                let resolved = config.client_config(None, None)?;
                println!("Settings:");
                println!("  Base URL: {}", resolved.base_url());
                println!("  Timeout: {}s", resolved.timeout.as_secs());
                println!("  Config file: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}
