use chrono::{DateTime, Local, Utc};
use console::style;
use rust_decimal::Decimal;
use tabled::{
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

use crate::{
    models::{cart::CartLine, item::Item},
    services::checkout_service::Receipt,
};

#[derive(Tabled)]
struct ProductTableRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
}

#[derive(Tabled)]
struct CartTableRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Unit Price")]
    unit_price: String,
    #[tabled(rename = "Total")]
    total: String,
}

pub fn format_money(amount: Decimal) -> String {
    format!("${:.2}", amount)
}

pub fn format_product_table(items: &[Item]) -> String {
    if items.is_empty() {
        return String::new();
    }

    let rows: Vec<ProductTableRow> = items
        .iter()
        .map(|item| ProductTableRow {
            id: item.id(),
            name: truncate(item.name(), 30),
            price: format_money(item.unit_price()),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Alignment::left())
        .modify(Columns::single(2), Alignment::right());

    table.to_string()
}

pub fn format_cart_table(lines: &[CartLine<'_>]) -> String {
    if lines.is_empty() {
        return String::new();
    }

    let rows: Vec<CartTableRow> = lines
        .iter()
        .map(|line| CartTableRow {
            id: line.item().id(),
            name: truncate(line.item().name(), 30),
            quantity: line.quantity(),
            unit_price: format_money(line.item().unit_price()),
            total: format_money(line.line_total()),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Alignment::left())
        .modify(Columns::new(2..), Alignment::right());

    table.to_string()
}

pub fn format_receipt(receipt: &Receipt) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{}: {}\n",
        style("Order placed").bold(),
        style(format_date(&receipt.placed_at)).dim()
    ));
    let units: u64 = receipt.lines.iter().map(|l| u64::from(l.quantity)).sum();
    output.push_str(&format!("{}: {}\n", style("Items").bold(), units));
    output.push_str(&format!(
        "Total Amount: {}\n",
        style(format_money(receipt.total)).green().bold()
    ));

    output
}

pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max - 3).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}
