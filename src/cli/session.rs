use std::io::{self, Write};

use anyhow::Context;
use console::{style, Emoji};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    cli::{input::InputSource, menu::MenuChoice},
    models::{
        cart::{Cart, CartError},
        item::ItemId,
    },
    services::{catalog_service::Catalog, checkout_service::checkout},
    utils::formatting::{format_cart_table, format_product_table, format_receipt},
};

static CHECKMARK: Emoji<'_, '_> = Emoji("✅ ", "");
static CROSS: Emoji<'_, '_> = Emoji("❌ ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠️ ", "");
static INFO: Emoji<'_, '_> = Emoji("ℹ️ ", "");
static WAVE: Emoji<'_, '_> = Emoji("👋 ", "");

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("No product with id {id}")]
    NotFound { id: i64 },

    #[error("Invalid menu choice {choice}")]
    InvalidChoice { choice: i64 },

    #[error("'{input}' is not a valid whole number")]
    MalformedInput { input: String },

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error("Input closed")]
    InputClosed,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl SessionError {
    /// Recoverable errors are reported and the menu is shown again.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, SessionError::Io(_) | SessionError::InputClosed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Continue,
    Stop,
}

/// One shopper's visit: the menu loop, the cart it owns and the catalog it
/// reads from.
pub struct Session<'c, I, W> {
    catalog: &'c Catalog,
    cart: Cart<'c>,
    input: I,
    out: W,
}

impl<'c, I: InputSource, W: Write> Session<'c, I, W> {
    pub fn new(catalog: &'c Catalog, input: I, out: W) -> Self {
        Self {
            catalog,
            cart: Cart::new(),
            input,
            out,
        }
    }

    pub fn cart(&self) -> &Cart<'c> {
        &self.cart
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs until the shopper exits or input closes.
    pub fn run(&mut self) -> anyhow::Result<()> {
        info!("Session started with {} products", self.catalog.len());

        loop {
            match self.step() {
                Ok(Transition::Continue) => {}
                Ok(Transition::Stop) => break,
                Err(SessionError::InputClosed) => {
                    warn!("Input closed, ending session");
                    break;
                }
                Err(e) if e.is_recoverable() => {
                    self.report(&e).context("Failed to write to output")?;
                }
                Err(e) => return Err(anyhow::Error::new(e).context("Session aborted")),
            }
        }

        info!("Session stopped");
        Ok(())
    }

    /// Shows the menu, reads one choice and handles it.
    pub fn step(&mut self) -> Result<Transition, SessionError> {
        self.print_menu()?;
        let choice = MenuChoice::try_from(self.read_integer("Choose an option")?)?;
        debug!("Menu choice: {}", choice.label());
        self.dispatch(choice)
    }

    pub fn dispatch(&mut self, choice: MenuChoice) -> Result<Transition, SessionError> {
        match choice {
            MenuChoice::ViewProducts => self.handle_view_products()?,
            MenuChoice::AddToCart => self.handle_add_to_cart()?,
            MenuChoice::ViewCart => self.render_cart()?,
            MenuChoice::RemoveFromCart => self.handle_remove_from_cart()?,
            MenuChoice::Checkout => self.handle_checkout()?,
            MenuChoice::Exit => {
                writeln!(self.out, "{}Exiting... Thank you for visiting!", WAVE)?;
                return Ok(Transition::Stop);
            }
        }
        Ok(Transition::Continue)
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", style("=== E-Commerce System ===").bold().cyan())?;
        for choice in MenuChoice::ALL {
            writeln!(self.out, "{}", choice)?;
        }
        self.out.flush()
    }

    fn read_integer(&mut self, prompt: &str) -> Result<i64, SessionError> {
        let raw = self
            .input
            .read_value(prompt)?
            .ok_or(SessionError::InputClosed)?;

        raw.parse::<i64>()
            .map_err(|_| SessionError::MalformedInput { input: raw })
    }

    fn handle_view_products(&mut self) -> Result<(), SessionError> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", style("Available Products:").bold())?;
        writeln!(self.out, "{}", format_product_table(self.catalog.list_all()))?;
        Ok(())
    }

    fn handle_add_to_cart(&mut self) -> Result<(), SessionError> {
        let id = self.read_integer("Enter Product ID to add")?;
        let quantity = self.read_integer("Enter Quantity")?;

        let catalog = self.catalog;
        let item = ItemId::try_from(id)
            .ok()
            .and_then(|id| catalog.find_by_id(id))
            .ok_or(SessionError::NotFound { id })?;

        if quantity < 1 {
            return Err(CartError::InvalidQuantity.into());
        }
        let quantity = u32::try_from(quantity)
            .map_err(|_| CartError::QuantityOverflow { id: item.id() })?;

        self.cart.add_item(item, quantity)?;
        info!("Added {} x{} to cart", item.name(), quantity);
        writeln!(self.out, "{}Product added to cart.", CHECKMARK)?;
        Ok(())
    }

    fn handle_remove_from_cart(&mut self) -> Result<(), SessionError> {
        let id = self.read_integer("Enter Product ID to remove")?;

        match ItemId::try_from(id).ok().and_then(|id| self.cart.remove_item(id)) {
            Some(line) => info!("Removed {} from cart", line),
            None => debug!("Nothing to remove for product id {}", id),
        }

        writeln!(self.out, "{}Product removed from cart.", CHECKMARK)?;
        Ok(())
    }

    fn handle_checkout(&mut self) -> Result<(), SessionError> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", style("=== Checkout ===").bold().cyan())?;
        self.render_cart()?;

        let receipt = checkout(&mut self.cart);
        write!(self.out, "{}", format_receipt(&receipt))?;
        writeln!(self.out, "{}Thank you for your purchase!", CHECKMARK)?;
        Ok(())
    }

    fn render_cart(&mut self) -> Result<(), SessionError> {
        if self.cart.is_empty() {
            writeln!(self.out, "{}Your cart is empty.", INFO)?;
            return Ok(());
        }

        writeln!(self.out, "{}", style("Your Cart:").bold())?;
        writeln!(self.out, "{}", format_cart_table(self.cart.lines()))?;
        Ok(())
    }

    fn report(&mut self, error: &SessionError) -> io::Result<()> {
        debug!("{}", error);
        match error {
            SessionError::NotFound { .. } => {
                writeln!(self.out, "{}Invalid Product ID.", CROSS)
            }
            SessionError::InvalidChoice { .. } => {
                writeln!(self.out, "{}Invalid choice. Please try again.", CROSS)
            }
            SessionError::MalformedInput { .. } => {
                writeln!(self.out, "{}{}.", WARNING, style(error).yellow())
            }
            SessionError::Cart(CartError::InvalidQuantity) => {
                writeln!(self.out, "{}Quantity must be at least 1.", WARNING)
            }
            other => writeln!(self.out, "{}{}", CROSS, style(other).red()),
        }
    }
}
