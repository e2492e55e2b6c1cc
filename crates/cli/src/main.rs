//! GoMarketplace cart CLI - Inspect and edit a stored cart.
//!
//! # Usage
//!
//! ```bash
//! # Show the stored cart
//! gm-cart show
//!
//! # Add a product (or bump its quantity if already present)
//! gm-cart add --id 1 --title "Shirt" --image-url https://cdn.example/shirt.png --price 20
//!
//! # Change quantities
//! gm-cart increment 1
//! gm-cart decrement 1
//!
//! # Use a different data directory
//! gm-cart --data-dir /tmp/cart show
//! ```
//!
//! # Environment Variables
//!
//! - `GOMARKETPLACE_DATA_DIR` - Directory holding stored carts
//! - `GOMARKETPLACE_CART_KEY` - Storage key for the cart snapshot
//! - `RUST_LOG` - Log filter (default: `gomarketplace_cart=info,gomarketplace_cli=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gomarketplace_cart::CartConfig;
use rust_decimal::Decimal;

mod commands;

#[derive(Parser)]
#[command(name = "gm-cart")]
#[command(author, version, about = "GoMarketplace cart tools")]
struct Cli {
    /// Directory holding stored carts (overrides `GOMARKETPLACE_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the stored cart
    Show,
    /// Add a product to the cart
    Add {
        /// Product ID
        #[arg(long)]
        id: String,

        /// Product title
        #[arg(long)]
        title: String,

        /// Product image URL
        #[arg(long)]
        image_url: String,

        /// Unit price
        #[arg(long)]
        price: Decimal,
    },
    /// Raise a product's quantity by one
    Increment {
        /// Product ID
        id: String,
    },
    /// Lower a product's quantity by one, removing it at zero
    Decrement {
        /// Product ID
        id: String,
    },
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "gomarketplace_cart=info,gomarketplace_cli=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    let mut config = CartConfig::from_env()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    let output = match cli.command {
        Commands::Show => commands::cart::show(&config).await?,
        Commands::Add {
            id,
            title,
            image_url,
            price,
        } => commands::cart::add(&config, &id, title, image_url, price).await?,
        Commands::Increment { id } => commands::cart::increment(&config, &id).await?,
        Commands::Decrement { id } => commands::cart::decrement(&config, &id).await?,
    };

    emit(&output);
    Ok(())
}

#[allow(clippy::print_stdout)]
fn emit(output: &str) {
    print!("{output}");
}
