use std::path::PathBuf;
use clap::{Parser, Subcommand};

use crate::{catalog::Category, routes::Route};

/// Terminal storefront for the GMPOL medical equipment catalog
#[derive(Debug, Parser)]
#[command(name = "medcat", version, about)]
pub struct Args {
  /// Screen to open first, e.g. `/products` or `/products/evita_v300.jpg`
  #[arg(default_value = "/", value_parser = parse_route)]
  pub route: Route,

  /// Write logs here. Without it nothing is logged, the terminal belongs to the UI.
  #[arg(long, global = true)]
  pub log_file: Option<PathBuf>,

  #[command(subcommand)]
  pub command: Option<Command>
}

#[derive(Debug, Subcommand)]
pub enum Command {
  /// Print one listing as plain text and exit
  List {
    /// machines, instruments or parts
    #[arg(value_parser = parse_category)]
    category: Category,

    /// Case-insensitive substring of the name
    #[arg(long, default_value = "")]
    search: String,

    /// One of All, Monitors, Surgical, Imaging, Respiratory, Accessories
    #[arg(long = "category", default_value = "")]
    category_filter: String,

    /// Machines only: read the plain index instead of the described listing
    #[arg(long)]
    index: bool
  }
}

fn parse_route(s: &str) -> Result<Route, String> {
  s.parse::<Route>().map_err(|e| e.to_string())
}

fn parse_category(s: &str) -> Result<Category, String> {
  s.parse::<Category>()
}
