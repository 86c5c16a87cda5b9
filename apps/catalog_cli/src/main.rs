mod config;
mod render;

use std::{io::Write as _, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    CatalogController, CatalogStore, CocktailFormDraft, DrinkFilter, HttpTransport, OrderBoard,
    StatusFilter, Transition,
};
use shared::domain::{CocktailId, OrderId};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Browse and manage the cocktail catalog and its orders")]
struct Args {
    /// Overrides the configured cocktail collection URL.
    #[arg(long, global = true)]
    cocktails_url: Option<String>,
    /// Overrides the configured order list URL.
    #[arg(long, global = true)]
    orders_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List cocktails.
    List {
        #[arg(long, default_value = "all")]
        filter: DrinkFilter,
    },
    /// Show one cocktail in full.
    Show { id: String },
    /// Add a cocktail.
    Add(DraftFields),
    /// Edit a cocktail. Fields not given keep their current value.
    Edit {
        id: String,
        #[command(flatten)]
        fields: DraftFields,
    },
    /// Delete a cocktail.
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// List orders.
    Orders {
        #[arg(long, default_value = "all")]
        status: StatusFilter,
    },
    /// Approve a pending order.
    Approve { order_id: String },
    /// Reject a pending order.
    Reject { order_id: String },
}

#[derive(clap::Args, Debug, Default)]
struct DraftFields {
    #[arg(long)]
    name: Option<String>,
    /// Comma-separated, e.g. "Vodka, 2 oz, Lime".
    #[arg(long)]
    ingredients: Option<String>,
    #[arg(long)]
    instructions: Option<String>,
    #[arg(long)]
    image: Option<String>,
    #[arg(long)]
    price: Option<String>,
}

impl DraftFields {
    fn apply(self, draft: &mut CocktailFormDraft) {
        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(ingredients) = self.ingredients {
            draft.ingredients_text = ingredients;
        }
        if let Some(instructions) = self.instructions {
            draft.instructions = instructions;
        }
        if let Some(image) = self.image {
            draft.image = image;
        }
        if let Some(price) = self.price {
            draft.price = price;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = config::load_settings();
    if let Some(url) = args.cocktails_url {
        settings.cocktails_url = config::normalize_url(&url, &settings.cocktails_url);
    }
    if let Some(url) = args.orders_url {
        settings.orders_url = config::normalize_url(&url, &settings.orders_url);
    }

    let transport = Arc::new(
        HttpTransport::new(&settings.cocktails_url)?.with_orders_url(&settings.orders_url)?,
    );
    let store = Arc::new(CatalogStore::new(transport.clone()));
    let mut controller = CatalogController::new(store.clone());

    match args.command {
        Command::List { filter } => {
            store.refresh().await?;
            controller.set_filter(filter);
            if controller.is_empty_catalog().await {
                println!("No cocktails found. Add your first one with `catalog_cli add`.");
                return Ok(());
            }
            for cocktail in controller.visible_cocktails().await {
                println!("{}", render::cocktail_card(&cocktail));
            }
        }
        Command::Show { id } => {
            let cocktail = store.fetch_one(&CocktailId::new(id)).await?;
            print!("{}", render::cocktail_details(&cocktail));
        }
        Command::Add(fields) => {
            controller.toggle_form();
            fields.apply(controller.draft_mut());
            controller.submit().await?;
            println!("Cocktail added. The catalog now holds {}.", store.cocktails().await.len());
        }
        Command::Edit { id, fields } => {
            let id = CocktailId::new(id);
            store.refresh().await?;
            let cocktail = match store.find(&id).await {
                Some(cocktail) => cocktail,
                None => store.fetch_one(&id).await?,
            };
            controller.begin_edit(cocktail);
            fields.apply(controller.draft_mut());
            controller.submit().await?;
            if let Some(updated) = store.find(&id).await {
                print!("{}", render::cocktail_details(&updated));
            } else {
                println!("Cocktail {id} updated.");
            }
        }
        Command::Delete { id, yes } => {
            let id = CocktailId::new(id);
            if !yes && !confirm("Are you sure you want to delete this cocktail?")? {
                println!("Cancelled.");
                return Ok(());
            }
            controller.delete(&id).await?;
            println!("Cocktail {id} deleted.");
        }
        Command::Orders { status } => {
            let mut board = OrderBoard::seeded();
            board.load(transport.as_ref()).await;
            println!("{}\n", render::status_summary(board.counts()));
            for order in board.filter(status) {
                println!("{}", render::order_entry(order, board.can_approve(&order.id)));
            }
        }
        Command::Approve { order_id } => {
            let order_id = OrderId::new(order_id);
            let mut board = OrderBoard::seeded();
            board.load(transport.as_ref()).await;
            report_transition(&order_id, board.approve(&order_id)?);
        }
        Command::Reject { order_id } => {
            let order_id = OrderId::new(order_id);
            let mut board = OrderBoard::seeded();
            board.load(transport.as_ref()).await;
            report_transition(&order_id, board.reject(&order_id)?);
        }
    }

    Ok(())
}

fn report_transition(order_id: &OrderId, transition: Transition) {
    match transition {
        Transition::Applied(status) => println!("Order {order_id} is now {status}."),
        Transition::Unchanged(status) => {
            println!("Order {order_id} was already {status}; nothing changed.")
        }
    }
}

fn confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    std::io::stdout().flush().context("failed to flush prompt")?;
    let mut answer = String::new();
    if std::io::stdin()
        .read_line(&mut answer)
        .context("failed to read confirmation")?
        == 0
    {
        bail!("no confirmation given; pass --yes to delete without prompting");
    }
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
