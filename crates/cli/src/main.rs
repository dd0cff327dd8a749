//! Cryptfield CLI - customer and address management against the REST API.
//!
//! # Usage
//!
//! ```bash
//! # Addresses not yet assigned to a customer
//! cryptfield addresses list --unassigned
//!
//! # Create an address
//! cryptfield addresses new --postcode 20121 --country IT --city Milano
//!
//! # Assign address 40575 to customer 456
//! cryptfield customers edit 456 --address 40575
//!
//! # Unlink the address of customer 456
//! cryptfield customers remove-address 456
//! ```
//!
//! # Environment Variables
//!
//! - `CRYPTFIELD_API_URL` - API base URL (required)
//! - `CRYPTFIELD_API_TOKEN` - Bearer token
//! - `CRYPTFIELD_LOG_JSON` - Emit logs as JSON when set
//! - `RUST_LOG` - Log filter (default: `cryptfield_webapp=info,cryptfield_cli=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use cryptfield_core::{CustomerAddressId, CustomerId};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::Context;
use commands::addresses::AddressFields;
use commands::customers::CustomerFields;

const DEFAULT_LOG_FILTER: &str = "cryptfield_webapp=info,cryptfield_cli=info";

#[derive(Parser)]
#[command(name = "cryptfield")]
#[command(author, version, about = "Cryptfield customer and address CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage customer addresses
    Addresses {
        #[command(subcommand)]
        action: AddressAction,
    },
    /// Manage customers
    Customers {
        #[command(subcommand)]
        action: CustomerAction,
    },
}

#[derive(Subcommand)]
enum AddressAction {
    /// List addresses sorted by id
    List {
        /// Only addresses not assigned to any customer
        #[arg(long)]
        unassigned: bool,
    },
    /// Show one address
    Show { id: String },
    /// Create an address
    New {
        #[command(flatten)]
        fields: AddressFields,
    },
    /// Edit an address, replacing it on the server
    Edit {
        id: String,
        #[command(flatten)]
        fields: AddressFields,
    },
    /// Send only the given fields
    Patch {
        id: CustomerAddressId,
        #[command(flatten)]
        fields: AddressFields,
    },
    /// Delete an address
    Delete { id: CustomerAddressId },
}

#[derive(Subcommand)]
enum CustomerAction {
    /// List customers sorted by id
    List,
    /// Show one customer
    Show { id: String },
    /// Create a customer
    New {
        #[command(flatten)]
        fields: CustomerFields,
    },
    /// Edit a customer
    Edit {
        id: String,
        #[command(flatten)]
        fields: CustomerFields,
    },
    /// Unlink the customer's address
    RemoveAddress { id: String },
    /// Delete a customer
    Delete { id: CustomerId },
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if std::env::var_os("CRYPTFIELD_LOG_JSON").is_some() {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    let mut ctx = Context::from_env()?;

    let result = match cli.command {
        Commands::Addresses { action } => match action {
            AddressAction::List { unassigned } => commands::addresses::list(&ctx, unassigned).await,
            AddressAction::Show { id } => commands::addresses::show(&ctx, &id).await,
            AddressAction::New { fields } => commands::addresses::edit(&ctx, None, fields).await,
            AddressAction::Edit { id, fields } => {
                commands::addresses::edit(&ctx, Some(&id), fields).await
            }
            AddressAction::Patch { id, fields } => {
                commands::addresses::patch(&ctx, id, fields).await
            }
            AddressAction::Delete { id } => commands::addresses::delete(&ctx, id).await,
        },
        Commands::Customers { action } => match action {
            CustomerAction::List => commands::customers::list(&ctx).await,
            CustomerAction::Show { id } => commands::customers::show(&ctx, &id).await,
            CustomerAction::New { fields } => commands::customers::edit(&ctx, None, fields).await,
            CustomerAction::Edit { id, fields } => {
                commands::customers::edit(&ctx, Some(&id), fields).await
            }
            CustomerAction::RemoveAddress { id } => {
                commands::customers::remove_address(&ctx, &id).await
            }
            CustomerAction::Delete { id } => commands::customers::delete(&ctx, id).await,
        },
    };

    ctx.report_events();
    result
}
