//! Storefront commands and their text rendering
//!
//! [`Storefront`] pairs the catalog client with the cart and runs one
//! [`Command`] at a time, printing to whatever writers the caller hands in.

use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::cart::{CartLine, CartManager, CartUpdate, QuantityChange, Totals};
use crate::catalog::{format_category_name, CatalogClient, CatalogError, Product};
use crate::cli::Command;
use crate::storage::CartStorage;

/// Category filter value that means "every product"
pub const ALL_CATEGORIES: &str = "all";

/// Errors that end a command
#[derive(Debug, Error)]
pub enum CommandError {
    /// The catalog could not be reached or gave a bad answer
    #[error("{message}: {source}")]
    Catalog {
        message: &'static str,
        #[source]
        source: CatalogError,
    },

    /// Writing output or reading the confirmation prompt failed
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl CommandError {
    fn catalog(message: &'static str) -> impl FnOnce(CatalogError) -> Self {
        move |source| CommandError::Catalog { message, source }
    }

    /// Whether retrying later might help
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CommandError::Catalog {
                source: CatalogError::Http(_) | CatalogError::Status(_),
                ..
            }
        )
    }
}

/// Catalog plus cart for one session
#[derive(Debug)]
pub struct Storefront<S> {
    pub catalog: CatalogClient,
    pub cart: CartManager<S>,
}

impl<S: CartStorage> Storefront<S> {
    pub fn new(catalog: CatalogClient, cart: CartManager<S>) -> Self {
        Self { catalog, cart }
    }

    /// Runs one command
    ///
    /// Normal output goes to `out`. Persistence warnings go to `err`. `input`
    /// is only read by `clear` without `--yes`.
    pub async fn execute<W, E, R>(
        &mut self,
        command: &Command,
        out: &mut W,
        err: &mut E,
        input: &mut R,
    ) -> Result<(), CommandError>
    where
        W: Write,
        E: Write,
        R: BufRead,
    {
        match command {
            Command::Products { category } => self.list_products(category.as_deref(), out).await,
            Command::Categories => {
                let categories = self
                    .catalog
                    .fetch_categories()
                    .await
                    .map_err(CommandError::catalog("Failed to load categories"))?;
                for category in categories {
                    writeln!(out, "{}", format_category_name(&category))?;
                }
                Ok(())
            }
            Command::Show { id } => {
                let product = self
                    .catalog
                    .fetch_product(*id)
                    .await
                    .map_err(CommandError::catalog("Failed to load product"))?;
                let in_cart = self.cart.get(*id).map(|line| line.quantity);
                render_product_details(&product, in_cart, out)?;
                Ok(())
            }
            Command::Add { id } => {
                let product = self
                    .catalog
                    .fetch_product(*id)
                    .await
                    .map_err(CommandError::catalog("Failed to add product"))?;
                let update = self.cart.add_item(&product);
                report_warning(&update, err)?;
                writeln!(out, "Added \"{}\" to cart!", update.value.title)?;
                writeln!(out, "Cart: {} item(s)", self.cart.item_count())?;
                Ok(())
            }
            Command::Remove { id } => {
                let update = self.cart.remove_item(*id);
                report_warning(&update, err)?;
                match update.value {
                    Some(line) => writeln!(out, "Removed \"{}\" from cart.", line.title)?,
                    None => writeln!(out, "Product {} is not in the cart.", id)?,
                }
                Ok(())
            }
            Command::Set { id, quantity } => {
                let update = self.cart.set_quantity(*id, *quantity);
                report_warning(&update, err)?;
                match update.value {
                    QuantityChange::Updated(line) => {
                        writeln!(out, "\"{}\" quantity set to {}.", line.title, line.quantity)?
                    }
                    QuantityChange::Removed(line) => {
                        writeln!(out, "Removed \"{}\" from cart.", line.title)?
                    }
                    QuantityChange::Unchanged => writeln!(out, "Product {} is not in the cart.", id)?,
                }
                Ok(())
            }
            Command::Cart => {
                render_cart(self.cart.lines(), self.cart.item_count(), &self.cart.compute_totals(), out)?;
                Ok(())
            }
            Command::Clear { yes } => {
                if self.cart.is_empty() {
                    writeln!(out, "Your cart is already empty.")?;
                    return Ok(());
                }
                if !*yes && !confirm("Remove every item from the cart?", out, input)? {
                    writeln!(out, "Cart left unchanged.")?;
                    return Ok(());
                }
                let update = self.cart.clear();
                report_warning(&update, err)?;
                writeln!(out, "Cart cleared.")?;
                Ok(())
            }
        }
    }

    /// Lists one category, or everything plus the category list
    async fn list_products<W: Write>(&self, category: Option<&str>, out: &mut W) -> Result<(), CommandError> {
        match category {
            Some(name) if !name.eq_ignore_ascii_case(ALL_CATEGORIES) => {
                let products = self
                    .catalog
                    .fetch_category(name)
                    .await
                    .map_err(CommandError::catalog("Failed to filter products"))?;
                render_product_list(&products, out)?;
            }
            _ => {
                let (products, categories) =
                    futures::join!(self.catalog.fetch_products(), self.catalog.fetch_categories());
                let products = products.map_err(CommandError::catalog("Failed to load products"))?;
                render_product_list(&products, out)?;

                // the listing is still useful without the category footer
                if let Ok(categories) = categories {
                    let names: Vec<String> = categories.iter().map(|c| format_category_name(c)).collect();
                    writeln!(out)?;
                    writeln!(out, "Categories: All, {}", names.join(", "))?;
                }
            }
        }
        Ok(())
    }
}

fn report_warning<T, E: Write>(update: &CartUpdate<T>, err: &mut E) -> io::Result<()> {
    if let Some(warning) = &update.warning {
        writeln!(err, "warning: cart change not saved ({}); it will be lost when this session ends", warning)?;
    }
    Ok(())
}

/// Asks a yes/no question, defaulting to no
fn confirm<W: Write, R: BufRead>(question: &str, out: &mut W, input: &mut R) -> io::Result<bool> {
    write!(out, "{} [y/N] ", question)?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

/// One line per product: id, price, category, title, rating
pub fn render_product_list<W: Write>(products: &[Product], out: &mut W) -> io::Result<()> {
    if products.is_empty() {
        return writeln!(out, "No products found.");
    }

    for product in products {
        let (rate, count) = product.rating_or_zero();
        writeln!(
            out,
            "{:>4}  ${:>8.2}  {:<16}  {}  ({} / {})",
            product.id,
            product.price,
            format_category_name(&product.category),
            product.title,
            rate,
            count
        )?;
    }
    Ok(())
}

pub fn render_product_details<W: Write>(
    product: &Product,
    in_cart: Option<u32>,
    out: &mut W,
) -> io::Result<()> {
    let (rate, count) = product.rating_or_zero();
    writeln!(out, "{}", product.title)?;
    writeln!(out, "Category: {}", format_category_name(&product.category))?;
    writeln!(out, "Price:    ${:.2}", product.price)?;
    writeln!(out, "Rating:   {} ({} reviews)", rate, count)?;
    writeln!(out, "Image:    {}", product.image)?;
    if let Some(quantity) = in_cart {
        writeln!(out, "In cart:  {}", quantity)?;
    }
    if !product.description.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", product.description)?;
    }
    Ok(())
}

/// Cart lines followed by the totals block
pub fn render_cart<W: Write>(lines: &[CartLine], item_count: u64, totals: &Totals, out: &mut W) -> io::Result<()> {
    if lines.is_empty() {
        return writeln!(out, "Your cart is empty.");
    }

    writeln!(out, "Cart ({} item(s))", item_count)?;
    for line in lines {
        writeln!(
            out,
            "{:>4}  {:>3} x ${:<8.2} ${:>9.2}  {}",
            line.id,
            line.quantity,
            line.price,
            line.line_total(),
            line.title
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Subtotal:  ${:.2}", totals.subtotal)?;
    writeln!(out, "Tax (10%): ${:.2}", totals.tax)?;
    if totals.shipping.is_zero() {
        writeln!(out, "Shipping:  FREE")?;
    } else {
        writeln!(out, "Shipping:  ${:.2}", totals.shipping)?;
    }
    writeln!(out, "Total:     ${:.2}", totals.total)?;
    Ok(())
}
