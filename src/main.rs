use anyhow::Context;
use clap::Parser;
use mp_crawler::cli::Cli;
use mp_crawler::config::Config;
use mp_crawler::utils::articles::fetch_and_store_articles;
use mp_crawler::utils::logger::setup_logger;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    setup_logger();
    let cli = Cli::parse();
    let target = cli.validated_target().unwrap_or_else(|e| e.exit());

    let mut cfg = Config::new();
    cli.apply(&mut cfg);
    info!("Config: {}", cfg);

    let summary = fetch_and_store_articles(&cfg, &target, cli.max_count)
        .await
        .context("crawl failed")?;
    info!(
        "Done: {} articles in {} ({} pages)",
        summary.emitted, summary.output, summary.pages
    );
    Ok(())
}
