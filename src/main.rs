use std::{fs::File, io::{self, Write}, path::Path, sync::{Arc, Mutex}};
use anyhow::Context;
use clap::Parser;
use termion::raw::IntoRawMode;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tui::{backend::TermionBackend, Terminal};

mod catalog;
mod cli;
mod config;
mod detail;
mod inquiry;
mod pages;
mod routes;
mod ui;

use catalog::{filter_listing, Card, CatalogSource, Category, HttpCatalog, Listing};
use cli::{Args, Command};
use config::Config;
use inquiry::EmailJsClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let args = Args::parse();
  if let Some(path) = &args.log_file {
    init_logging(path)?;
  }

  let config = Config::baked();
  let source = Arc::new(HttpCatalog::new(config.api_url.clone()));

  if let Some(Command::List { category, search, category_filter, index }) = args.command {
    return list(source.as_ref(), &config, category, &search, &category_filter, index).await;
  }

  let email = Arc::new(EmailJsClient::new(config.email.clone()));

  let stdout = io::stdout()
    .into_raw_mode()
    .context("failed to put terminal into raw mode")?;
  let terminal = Terminal::new(TermionBackend::new(stdout)).context("failed to initialize terminal")?;

  let mut app = ui::App::new(terminal, config, source, email, args.route)?;
  app.listen(ui::user_input()).await?;

  // drop returns terminal to normal mode
  drop(app);

  // the stdin reader is parked in a blocking read, don't wait on it
  std::process::exit(0);
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
  let file = File::create(path).with_context(|| format!("failed to create log file {}", path.display()))?;

  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("medcat=info")))
    .with_writer(Mutex::new(file))
    .with_ansi(false)
    .init();

  Ok(())
}

/// Non-interactive listing, same cards and filter as the products screen
async fn list(
  source: &dyn CatalogSource,
  config: &Config,
  category: Category,
  search: &str,
  category_filter: &str,
  index: bool
) -> anyhow::Result<()> {
  let listing = match (category, index) {
    (Category::Machines, true) => Listing::machines(source.machine_index().await.context("failed to fetch machine index")?),
    (_, true) => anyhow::bail!("--index only applies to machines"),
    (category, false) => source.listing(category).await.with_context(|| format!("failed to fetch {}", category.noun()))?
  };

  let visible = filter_listing(&listing, search, category_filter);
  info!(%category, total = listing.len(), shown = visible.len(), "listed");

  let stdout = io::stdout();
  let mut out = stdout.lock();

  if visible.is_empty() {
    writeln!(out, "No {} found matching your criteria", category.noun())?;
  }
  for entry in visible {
    writeln!(out, "{}", Card::new(entry, &config.images).plain())?;
  }

  Ok(())
}
