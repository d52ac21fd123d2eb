use std::{fmt::Write as _, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    config,
    presentation::ProductCard,
    CatalogAction, CatalogClient, CatalogSource, CatalogStore, Transition,
};
use shared::domain::ProductId;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Fetch the shopping catalog and print it as cards")]
struct Args {
    /// Product list endpoint; overrides catalog.toml and environment.
    #[arg(long)]
    endpoint: Option<String>,
    /// Settings file to read instead of ./catalog.toml.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Store action to apply after loading, in order: add:ID, inc:ID or dec:ID.
    #[arg(long = "action", value_parser = parse_action)]
    actions: Vec<CatalogAction>,
    /// Print the final product list as JSON instead of cards.
    #[arg(long)]
    json: bool,
}

fn parse_action(raw: &str) -> Result<CatalogAction, String> {
    let (verb, id) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected VERB:ID, got '{raw}'"))?;
    let id = id
        .trim()
        .parse::<i64>()
        .map(ProductId)
        .map_err(|_| format!("invalid product id in '{raw}'"))?;
    match verb.trim() {
        "add" => Ok(CatalogAction::AddToCart(id)),
        "inc" => Ok(CatalogAction::Increment(id)),
        "dec" => Ok(CatalogAction::Decrement(id)),
        other => Err(format!("unknown action '{other}' (expected add, inc or dec)")),
    }
}

fn action_label(action: &CatalogAction) -> String {
    match action {
        CatalogAction::SetProducts(list) => format!("set:{}", list.len()),
        CatalogAction::Increment(id) => format!("inc:{id}"),
        CatalogAction::Decrement(id) => format!("dec:{id}"),
        CatalogAction::AddToCart(id) => format!("add:{id}"),
    }
}

fn render_card(card: &ProductCard) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}] {}", card.id, card.title);
    let _ = writeln!(out, "    {} {}", card.stars, card.rating_count);
    let _ = writeln!(out, "    {}", card.price);
    let _ = writeln!(out, "    {}", card.category);
    out
}

fn render_transition(action: &CatalogAction, transition: &Transition) -> String {
    let label = action_label(action);
    match transition {
        Transition::Applied { quantity, .. } => format!("{label} -> quantity {quantity}"),
        Transition::Replaced { len } => format!("{label} -> {len} products"),
        Transition::Ignored(diagnostic) => format!("{label} -> ignored: {diagnostic}"),
    }
}

fn render_cart(store: &CatalogStore) -> String {
    let mut out = String::from("Cart:\n");
    let mut lines = 0;
    for product in store.cart_lines() {
        lines += 1;
        let _ = writeln!(
            out,
            "    {} x {} ({})",
            product.quantity(),
            product.title,
            product.price
        );
    }
    if lines == 0 {
        out.push_str("    (empty)\n");
    }
    let _ = writeln!(out, "Total: Rs. {:.2}", store.cart_total());
    out
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let config_path = args
        .config
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_SETTINGS_FILE));
    let mut settings = config::load_settings_from(&config_path, |key| std::env::var(key).ok())
        .context("failed to load catalog settings")?;
    if let Some(endpoint) = args.endpoint.as_deref() {
        settings = settings.with_endpoint(endpoint)?;
    }

    let client = CatalogClient::new(&settings)?;
    let snapshot = client
        .fetch_catalog()
        .await
        .with_context(|| format!("failed to fetch catalog from {}", client.endpoint()))?;

    let mut store = CatalogStore::new();
    store.dispatch(CatalogAction::SetProducts(snapshot.products));

    if !args.json {
        for product in store.products() {
            print!(
                "{}",
                render_card(&ProductCard::from_product(product, settings.title_max_len))
            );
        }
    }

    for action in args.actions {
        let label_source = action.clone();
        let transition = store.dispatch(action);
        if !args.json {
            println!("{}", render_transition(&label_source, &transition));
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(store.products())?);
    } else {
        print!("{}", render_cart(&store));
    }
    Ok(())
}
