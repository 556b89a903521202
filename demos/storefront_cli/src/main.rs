// demos/storefront_cli/src/main.rs

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use storefront::models::{CartItem, ReportRange};
use storefront::{CookieToken, MutationOutcome, StoreConfig, Storefront};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

/// Drives the storefront state layer against a live backend.
#[derive(Debug, Parser)]
#[command(name = "storefront", version, about)]
struct Cli {
  /// Session token; falls back to STOREFRONT_TOKEN, then to the cookie in STOREFRONT_COOKIE.
  #[arg(long, global = true)]
  token: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
  /// List one catalog page.
  Products {
    #[arg(long, default_value_t = 1)]
    page: u32,
  },
  /// Search the catalog server-side, then rank the page locally.
  Search { term: String },
  /// Show the cart.
  Cart,
  /// Add units of a product to the cart.
  CartAdd {
    product_id: u64,
    #[arg(default_value_t = 1)]
    quantity: u32,
    #[arg(long)]
    unit: Option<String>,
  },
  /// Remove units of a product from the cart.
  CartRemove {
    product_id: u64,
    #[arg(default_value_t = 1)]
    quantity: u32,
  },
  /// Show favorite lists.
  Favorites,
  /// Show notifications.
  Notifications {
    #[arg(long, default_value_t = 1)]
    page: u32,
  },
  /// Print the sales report for a date range (YYYY-MM-DD).
  Report { from: String, to: String },
  /// Download the transactions spreadsheet for a date range.
  Export {
    from: String,
    to: String,
    #[arg(long, default_value = "ventas.xlsx")]
    out: PathBuf,
  },
}

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  let cli = Cli::parse();
  let config = StoreConfig::from_env().context("Failed to load storefront configuration")?;
  let tokens = Arc::new(session_tokens(&config, cli.token.clone()));
  let store = Storefront::connect(config, tokens);

  match cli.command {
    Command::Products { page } => {
      store.products.load_page(page).await?;
      let pages = store.products.pages();
      print_json(&pages.items())?;
      println!(
        "page {} of {}",
        pages.current_page().unwrap_or(page),
        pages.last_page().unwrap_or(page)
      );
    }
    Command::Search { term } => {
      store.products.search_remote(&term).await?;
      print_json(&store.products.search_local(&term))?;
    }
    Command::Cart => {
      store.cart.fetch().await?;
      print_cart(&store.cart.items(), store.cart.total());
    }
    Command::CartAdd {
      product_id,
      quantity,
      unit,
    } => {
      store.products.load_page(1).await?;
      let product = store
        .products
        .product(product_id)
        .ok_or_else(|| anyhow!("Product {} is not on the first catalog page", product_id))?;
      store.cart.fetch().await?;
      let outcome = store
        .cart
        .add_product_optimistic(product_id, quantity, unit.as_deref(), &product)
        .await;
      report_outcome(&outcome)?;
      print_cart(&store.cart.items(), store.cart.total());
    }
    Command::CartRemove { product_id, quantity } => {
      store.cart.fetch().await?;
      let line = store
        .cart
        .line(product_id)
        .ok_or_else(|| anyhow!("Product {} is not in the cart", product_id))?;
      let outcome = store.cart.remove_product_optimistic(&line, quantity).await;
      report_outcome(&outcome)?;
      print_cart(&store.cart.items(), store.cart.total());
    }
    Command::Favorites => {
      store.favorites.fetch().await?;
      for list in store.favorites.lists() {
        println!("[{}] {} ({} products)", list.id, list.name, list.favorites.len());
      }
    }
    Command::Notifications { page } => {
      store.notifications.load_page(page).await?;
      print_json(&store.notifications.pages().items())?;
      println!("{} unread", store.notifications.unread_count());
    }
    Command::Report { from, to } => {
      let report = store.orders.load_report(parse_range(&from, &to)?).await?;
      print_json(&report)?;
    }
    Command::Export { from, to, out } => {
      let bytes = store.orders.export_transactions(parse_range(&from, &to)?).await?;
      std::fs::write(&out, &bytes).with_context(|| format!("Failed to write {}", out.display()))?;
      tracing::info!(path = %out.display(), bytes = bytes.len(), "Export saved.");
    }
  }
  Ok(())
}

fn session_tokens(config: &StoreConfig, token: Option<String>) -> CookieToken {
  if let Ok(header) = std::env::var("STOREFRONT_COOKIE") {
    let tokens = CookieToken::from_header(config.auth_cookie_name.clone(), &header);
    if let Some(token) = token {
      tokens.sign_in(token);
    }
    return tokens;
  }
  let tokens = CookieToken::new(config.auth_cookie_name.clone());
  if let Some(token) = token.or_else(|| std::env::var("STOREFRONT_TOKEN").ok()) {
    tokens.sign_in(token);
  }
  tokens
}

fn parse_range(from: &str, to: &str) -> Result<ReportRange> {
  let parse = |s: &str| {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
  };
  ReportRange::new(parse(from)?, parse(to)?).ok_or_else(|| anyhow!("'{}' is after '{}'", from, to))
}

fn report_outcome(outcome: &MutationOutcome) -> Result<()> {
  match outcome.failure() {
    None => Ok(()),
    Some(failure) => Err(anyhow!(
      "{} (status {})",
      failure.message,
      failure.status.map(|s| s.to_string()).unwrap_or_else(|| "n/a".to_string())
    )),
  }
}

fn print_cart(items: &[CartItem], total: i64) {
  for line in items {
    println!("{:>4} x {:<40} {:>10}", line.quantity, line.product.name, line.subtotal);
  }
  println!("{:>57}", format!("total {}", total));
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}
