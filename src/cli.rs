//! Command-line interface parsing for the Fake Store CLI
//!
//! Every storefront action is a subcommand. Running with no subcommand shows
//! the cart.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Fake Store CLI - browse the catalog and manage a shopping cart
#[derive(Parser, Debug)]
#[command(name = "fakestore")]
#[command(about = "Browse the Fake Store catalog and manage a persistent shopping cart")]
#[command(version)]
pub struct Cli {
    /// Catalog API base URL [env: FAKESTORE_API_URL]
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Directory holding the saved cart [env: FAKESTORE_DATA_DIR]
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Directory for cached catalog responses [env: FAKESTORE_CACHE_DIR]
    #[arg(long, global = true, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Use cached catalog data only, never the network
    #[arg(long, global = true)]
    pub offline: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Storefront actions
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List products, optionally only one category
    ///
    /// Examples:
    ///   fakestore products
    ///   fakestore products --category electronics
    ///   fakestore products -c "men's clothing"
    Products {
        /// Category name as the API spells it ("all" lists everything)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// List product categories
    Categories,
    /// Show one product in detail
    Show { id: u64 },
    /// Add one unit of a product to the cart
    Add { id: u64 },
    /// Remove a product from the cart
    Remove { id: u64 },
    /// Set the quantity of a product already in the cart (0 or less removes it)
    Set {
        id: u64,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Show cart contents and totals
    Cart,
    /// Empty the cart
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

impl Cli {
    /// The subcommand to run, defaulting to showing the cart
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Cart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args_shows_cart() {
        let cli = Cli::parse_from(["fakestore"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.command(), Command::Cart);
        assert!(!cli.offline);
    }

    #[test]
    fn test_cli_parse_products_with_category() {
        let cli = Cli::parse_from(["fakestore", "products", "--category", "men's clothing"]);
        assert_eq!(
            cli.command(),
            Command::Products {
                category: Some("men's clothing".to_string())
            }
        );
    }

    #[test]
    fn test_cli_parse_products_without_category() {
        let cli = Cli::parse_from(["fakestore", "products"]);
        assert_eq!(cli.command(), Command::Products { category: None });
    }

    #[test]
    fn test_cli_parse_add_and_remove() {
        let cli = Cli::parse_from(["fakestore", "add", "3"]);
        assert_eq!(cli.command(), Command::Add { id: 3 });

        let cli = Cli::parse_from(["fakestore", "remove", "3"]);
        assert_eq!(cli.command(), Command::Remove { id: 3 });
    }

    #[test]
    fn test_cli_parse_set_accepts_negative_quantity() {
        let cli = Cli::parse_from(["fakestore", "set", "4", "-1"]);
        assert_eq!(cli.command(), Command::Set { id: 4, quantity: -1 });
    }

    #[test]
    fn test_cli_parse_clear_yes() {
        let cli = Cli::parse_from(["fakestore", "clear", "--yes"]);
        assert_eq!(cli.command(), Command::Clear { yes: true });

        let cli = Cli::parse_from(["fakestore", "clear"]);
        assert_eq!(cli.command(), Command::Clear { yes: false });
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "fakestore",
            "cart",
            "--offline",
            "--data-dir",
            "/tmp/cart",
            "--api-url",
            "http://localhost:9000",
            "-v",
        ]);
        assert!(cli.offline);
        assert!(cli.verbose);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/cart")));
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:9000"));
    }

    #[test]
    fn test_cli_rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["fakestore", "add", "backpack"]).is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["fakestore", "checkout"]).is_err());
    }
}
