use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::models::{cart::Cart, item::ItemId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptLine {
    pub item_id: ItemId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub line_total: Decimal,
}

/// What the customer bought. Shown once at checkout and then dropped.
#[derive(Debug, Clone, Serialize)]
pub struct Receipt {
    pub lines: Vec<ReceiptLine>,
    pub total: Decimal,
    pub placed_at: DateTime<Utc>,
}

impl Receipt {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Totals the cart and empties it. An empty cart checks out to an empty receipt.
pub fn checkout(cart: &mut Cart<'_>) -> Receipt {
    let lines: Vec<ReceiptLine> = cart
        .lines()
        .iter()
        .map(|line| ReceiptLine {
            item_id: line.item().id(),
            name: line.item().name().to_string(),
            unit_price: line.item().unit_price(),
            quantity: line.quantity(),
            line_total: line.line_total(),
        })
        .collect();
    let total = cart.total_amount();

    cart.clear();

    info!(
        "Checkout completed: {} lines, {} units, total ${:.2}",
        lines.len(),
        lines.iter().map(|l| u64::from(l.quantity)).sum::<u64>(),
        total
    );

    Receipt {
        lines,
        total,
        placed_at: Utc::now(),
    }
}
