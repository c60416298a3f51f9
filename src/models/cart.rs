use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::item::{Item, ItemId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    #[error("Quantity must be at least 1")]
    InvalidQuantity,

    #[error("Quantity for item {id} would exceed {max}", max = u32::MAX)]
    QuantityOverflow { id: ItemId },

    #[error("Adding item {id} would make the cart total too large")]
    AmountOverflow { id: ItemId },
}

/// One product in the cart. The line borrows the catalog's item, so the price
/// shown in the cart is always the catalog price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine<'c> {
    item: &'c Item,
    quantity: u32,
}

impl<'c> CartLine<'c> {
    pub fn item(&self) -> &'c Item {
        self.item
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn line_total(&self) -> Decimal {
        self.item.unit_price() * Decimal::from(self.quantity)
    }
}

impl std::fmt::Display for CartLine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (x{}) - Total: ${:.2}",
            self.item.name(),
            self.quantity,
            self.line_total()
        )
    }
}

/// Lines are kept in insertion order and there is at most one line per item id.
#[derive(Debug, Default, Clone)]
pub struct Cart<'c> {
    lines: Vec<CartLine<'c>>,
}

impl<'c> Cart<'c> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` units of `item`, merging into the existing line when the
    /// item is already in the cart.
    pub fn add_item(&mut self, item: &'c Item, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        let existing = self.lines.iter().position(|l| l.item.id() == item.id());
        let new_quantity = match existing {
            Some(index) => self.lines[index]
                .quantity
                .checked_add(quantity)
                .ok_or(CartError::QuantityOverflow { id: item.id() })?,
            None => quantity,
        };

        // Every stored line total and the cart total must stay representable,
        // so line_total and total_amount never overflow.
        let new_line_total = item
            .unit_price()
            .checked_mul(Decimal::from(new_quantity))
            .ok_or(CartError::AmountOverflow { id: item.id() })?;
        let other_lines: Decimal = self
            .lines
            .iter()
            .enumerate()
            .filter(|(index, _)| Some(*index) != existing)
            .map(|(_, line)| line.line_total())
            .sum();
        other_lines
            .checked_add(new_line_total)
            .ok_or(CartError::AmountOverflow { id: item.id() })?;

        match existing {
            Some(index) => self.lines[index].quantity = new_quantity,
            None => self.lines.push(CartLine { item, quantity }),
        }
        Ok(())
    }

    /// Removing an item that is not in the cart is a no-op.
    pub fn remove_item(&mut self, id: ItemId) -> Option<CartLine<'c>> {
        let position = self.lines.iter().position(|l| l.item.id() == id)?;
        Some(self.lines.remove(position))
    }

    pub fn lines(&self) -> &[CartLine<'c>] {
        &self.lines
    }

    pub fn total_amount(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn quantity_of(&self, id: ItemId) -> Option<u32> {
        self.lines
            .iter()
            .find(|l| l.item.id() == id)
            .map(CartLine::quantity)
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }
}
