//! Terminal tables for products, the cart and orders.

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    domain::{
        carts::models::CartLineItem,
        catalog::{intake::PLACEHOLDER_IMAGE, models::Product},
        orders::models::Order,
    },
    pricing::{format_price, total_price},
};

/// Errors that can occur when writing a table.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The output could not be written.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Write a product listing.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn write_products(mut out: impl io::Write, products: &[&Product]) -> Result<(), RenderError> {
    let mut builder = Builder::default();

    builder.push_record(["ID", "Name", "Brand", "Category", "Price", "Was", "Sizes"]);

    for product in products {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.brand.clone(),
            product.category.to_string(),
            format_price(product.price),
            product.original_price.map(format_price).unwrap_or_default(),
            product.sizes.join(" "),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(4..6), Alignment::right());

    writeln!(out, "{table}")?;
    writeln!(out, "{} product(s)", products.len())?;

    Ok(())
}

/// Write the cart with its subtotal.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn write_cart(mut out: impl io::Write, items: &[CartLineItem]) -> Result<(), RenderError> {
    if items.is_empty() {
        writeln!(out, "Your cart is empty.")?;

        return Ok(());
    }

    write_line_items(&mut out, items)?;

    writeln!(
        out,
        " Subtotal: {}",
        format_price(total_price(
            items.iter().map(|line| (line.product.price, line.quantity))
        ))
    )?;

    Ok(())
}

/// Write an order summary with its lines.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn write_order(mut out: impl io::Write, order: &Order) -> Result<(), RenderError> {
    let customer = order.customer();
    let address = order.shipping_address();

    writeln!(out, "Order #{} ({})", order.short_reference(), order.status())?;
    writeln!(out, " Placed:   {}", order.placed_at())?;
    writeln!(out, " Customer: {} <{}> {}", customer.name, customer.email, customer.phone)?;
    writeln!(
        out,
        " Ship to:  {}, {} {}{}",
        address.street,
        address.city,
        address.postal_code,
        address
            .region
            .as_deref()
            .map(|region| format!(", {region}"))
            .unwrap_or_default()
    )?;
    writeln!(out, " Payment:  {}", order.payment_method())?;

    write_line_items(&mut out, order.items())?;

    writeln!(out, " Total: {}", format_price(order.total()))?;

    Ok(())
}

fn write_line_items(out: &mut impl io::Write, items: &[CartLineItem]) -> Result<(), RenderError> {
    let mut builder = Builder::default();

    builder.push_record(["Product", "Size", "Qty", "Price", "Line Total", "Image"]);

    for line in items {
        builder.push_record([
            format!("{} ({})", line.product.name, line.product.id),
            line.selected_size.clone(),
            line.quantity.to_string(),
            format_price(line.product.price),
            format_price(line.line_total()),
            line.product
                .primary_image()
                .unwrap_or(PLACEHOLDER_IMAGE)
                .to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(2..5), Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use testresult::TestResult;

    use crate::{
        domain::{
            carts::{CartEngine, MemoryKeyValueStore, StoredCartRepository},
            catalog::models::Category,
            orders::{OrderManager, TracingNotifier, models::PaymentDetails},
        },
        test::helpers::{checkout_details, product},
    };

    use super::*;

    #[test]
    fn product_table_lists_prices() -> TestResult {
        let mut sale = product("1", "Nike", 120_00, Category::Running);
        sale.original_price = Some(150_00);

        let mut out = Vec::new();
        write_products(&mut out, &[&sale])?;
        let text = String::from_utf8(out)?;

        assert!(text.contains("Sneaker 1"), "missing name in:\n{text}");
        assert!(text.contains("$120.00"), "missing price in:\n{text}");
        assert!(text.contains("$150.00"), "missing original price in:\n{text}");
        assert!(text.contains("1 product(s)"));

        Ok(())
    }

    #[test]
    fn empty_cart_says_so() -> TestResult {
        let mut out = Vec::new();
        write_cart(&mut out, &[])?;

        assert_eq!(String::from_utf8(out)?, "Your cart is empty.\n");

        Ok(())
    }

    #[test]
    fn cart_shows_subtotal_and_placeholder_image() -> TestResult {
        let mut line = CartLineItem::new(&product("1", "Nike", 100_00, Category::Running), "42");
        line.quantity = 3;
        line.product.images.clear();

        let mut out = Vec::new();
        write_cart(&mut out, &[line])?;
        let text = String::from_utf8(out)?;

        assert!(text.contains("Subtotal: $300.00"), "missing subtotal in:\n{text}");
        assert!(text.contains("unsplash"), "missing placeholder in:\n{text}");

        Ok(())
    }

    #[test]
    fn order_summary_shows_reference_and_total() -> TestResult {
        let mut cart = CartEngine::new(Box::new(StoredCartRepository::new(
            MemoryKeyValueStore::new(),
        )));
        cart.add_to_cart(&product("1", "Nike", 100_00, Category::Running), "42");

        let order = OrderManager::new(Arc::new(TracingNotifier))
            .place_order(&mut cart, checkout_details(PaymentDetails::CashOnDelivery))?;

        let mut out = Vec::new();
        write_order(&mut out, &order)?;
        let text = String::from_utf8(out)?;

        assert!(
            text.starts_with(&format!("Order #{} (pending)", order.short_reference())),
            "unexpected header in:\n{text}"
        );
        assert!(text.contains("Total: $100.00"));
        assert!(text.contains("Payment:  cod"));

        Ok(())
    }
}
