//! Non-interactive CLI for `create`/`read`/`write`/`delete`/`ping`, standing
//! in for the reference implementation's keystroke-driven terminal menu.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use shoplist_client::{Client, TcpTransport};
use shoplist_crdt::ShoppingList;
use shoplist_types::ListId;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "shoplist-client")]
#[command(about = "Talks to a shopping-list broker")]
struct Args {
    /// Broker address to connect to.
    #[arg(long, default_value = "127.0.0.1:5558")]
    broker: String,

    /// Enable verbose debug logging.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check whether the broker is reachable.
    Ping,
    /// Create a new list under the given id.
    Create { list_id: String },
    /// Fetch a list's current merged state.
    Read { list_id: String },
    /// Add items to a list and merge the result into the primary's copy.
    ///
    /// Items are given as `name:quantity`, e.g. `milk:2`.
    Write {
        list_id: String,
        #[arg(long = "item")]
        items: Vec<String>,
    },
    /// Delete a list.
    Delete { list_id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    let transport = TcpTransport::connect(&args.broker)
        .await
        .with_context(|| format!("failed to connect to broker at {}", args.broker))?;
    let client = Client::new(Arc::new(transport));

    match args.command {
        Command::Ping => {
            if client.ping().await {
                println!("pong");
            } else {
                bail!("server is not available");
            }
        }
        Command::Create { list_id } => {
            let id = client
                .create_shopping_list(ListId::from_string(list_id))
                .await?;
            println!("created list {id}");
        }
        Command::Read { list_id } => {
            let list = client
                .get_shopping_list(ListId::from_string(list_id))
                .await?;
            print_items(&list);
        }
        Command::Write { list_id, items } => {
            let mut list = ShoppingList::new();
            for item in &items {
                let (name, qty) = parse_item(item)?;
                list.add_item(name, qty);
            }
            let merged = client
                .write_shopping_list(ListId::from_string(list_id), &list)
                .await?;
            print_items(&merged);
        }
        Command::Delete { list_id } => {
            let id = client
                .delete_shopping_list(ListId::from_string(list_id))
                .await?;
            println!("deleted list {id}");
        }
    }

    Ok(())
}

fn parse_item(spec: &str) -> Result<(&str, u64)> {
    let (name, qty) = spec
        .split_once(':')
        .with_context(|| format!("item `{spec}` must be in `name:quantity` form"))?;
    Ok((name, qty.parse().with_context(|| format!("invalid quantity in `{spec}`"))?))
}

fn print_items(list: &ShoppingList) {
    for (id, (name, qty, acquired)) in list.items() {
        println!("{id}\t{name}\tx{qty}\tacquired={acquired}");
    }
}
