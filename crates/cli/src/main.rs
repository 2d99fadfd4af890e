//! Shopfront CLI - drive the storefront from a terminal.
//!
//! State persists in `SHOPFRONT_DATA_DIR` (default `.shopfront`), one JSON
//! file per store key, so the cart survives between invocations.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! shopfront catalog list --category shoes
//! shopfront catalog list --search leather
//! shopfront catalog view p1
//!
//! # Manage the cart
//! shopfront cart add p1 --qty 2
//! shopfront cart update p1 -1
//! shopfront cart show
//!
//! # Demo accounts and checkout
//! shopfront account signup -e ann@example.com -p secret -c secret
//! shopfront account login -e ann@example.com -p secret
//! shopfront pay --name "Ann Buyer" --number 4242424242424242 --expiry 12/29 --cvv 123
//!
//! # Watch the carousel autoplay
//! shopfront carousel --slides 3 --ticks 5
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shopfront_storefront::config::{LogFormat, StorefrontConfig};

mod commands;

#[derive(Parser)]
#[command(name = "shopfront")]
#[command(author, version, about = "Shopfront storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse products
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Demo signup, login and logout
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
    /// Submit the demo payment form (clears the cart)
    Pay {
        /// Name on the card
        #[arg(long, default_value = "")]
        name: String,

        /// Card number
        #[arg(long, default_value = "")]
        number: String,

        /// Expiry (MM/YY)
        #[arg(long, default_value = "")]
        expiry: String,

        /// Card verification value
        #[arg(long, default_value = "")]
        cvv: String,
    },
    /// Run the hero carousel autoplay
    Carousel {
        /// Number of slides
        #[arg(short, long, default_value_t = 3)]
        slides: usize,

        /// Number of autoplay ticks to run before exiting
        #[arg(short, long, default_value_t = 3)]
        ticks: usize,

        /// Print the rendered indicator dots markup
        #[arg(long)]
        html: bool,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products, optionally filtered by category or search text
    List {
        /// Category to show (`all` shows everything)
        #[arg(short, long)]
        category: Option<String>,

        /// Case-insensitive text to find in name or description
        #[arg(short, long)]
        search: Option<String>,

        /// Print the rendered grid markup
        #[arg(long)]
        html: bool,
    },
    /// Open a product's detail page
    View {
        /// Product id
        id: String,

        /// Print the rendered detail markup
        #[arg(long)]
        html: bool,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and total
    Show {
        /// Print the rendered cart markup
        #[arg(long)]
        html: bool,
    },
    /// Add a catalog product
    Add {
        /// Product id
        id: String,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        qty: u32,
    },
    /// Change a line's quantity by a signed amount
    Update {
        /// Product id
        id: String,

        /// Amount to add (negative to remove units)
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },
    /// Remove a line
    Remove {
        /// Product id
        id: String,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum AccountAction {
    /// Create a demo account
    Signup {
        #[arg(short, long, default_value = "")]
        email: String,

        #[arg(short, long, default_value = "")]
        password: String,

        /// Repeat the password
        #[arg(short, long, default_value = "")]
        confirm: String,
    },
    /// Log in to a demo account
    Login {
        #[arg(short, long, default_value = "")]
        email: String,

        #[arg(short, long, default_value = "")]
        password: String,
    },
    /// Log out
    Logout,
    /// Show the logged-in email
    Whoami,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = StorefrontConfig::from_env();

    init_tracing(config.as_ref().map_or(LogFormat::Pretty, |c| c.log_format));

    let result: Result<(), Box<dyn std::error::Error>> = match config {
        Ok(config) => run(cli, &config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Install the tracing subscriber. Logs go to stderr so command output on
/// stdout stays clean.
fn init_tracing(format: LogFormat) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopfront_storefront=info,shopfront_cli=info".into());

    let json = format == LogFormat::Json;
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn run(cli: Cli, config: &StorefrontConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List {
                category,
                search,
                html,
            } => commands::catalog::list(config, category.as_deref(), search.as_deref(), html)?,
            CatalogAction::View { id, html } => commands::catalog::view(config, &id, html)?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show { html } => commands::cart::show(config, html)?,
            CartAction::Add { id, qty } => commands::cart::add(config, &id, qty)?,
            CartAction::Update { id, delta } => commands::cart::update(config, &id, delta)?,
            CartAction::Remove { id } => commands::cart::remove(config, &id)?,
            CartAction::Clear => commands::cart::clear(config)?,
        },
        Commands::Account { action } => match action {
            AccountAction::Signup {
                email,
                password,
                confirm,
            } => commands::account::signup(config, email, password, confirm)?,
            AccountAction::Login { email, password } => {
                commands::account::login(config, email, password)?;
            }
            AccountAction::Logout => commands::account::logout(config)?,
            AccountAction::Whoami => commands::account::whoami(config)?,
        },
        Commands::Pay {
            name,
            number,
            expiry,
            cvv,
        } => commands::checkout::pay(config, &name, &number, &expiry, &cvv)?,
        Commands::Carousel {
            slides,
            ticks,
            html,
        } => {
            commands::carousel::run(config, slides, ticks, html).await?;
        }
    }
    Ok(())
}
