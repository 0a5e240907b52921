//! Prices
//!
//! Prices are held as minor units (cents) of the store currency and only turned
//! into [`Money`] for display.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use thiserror::Error;

/// Currency every catalog price is denominated in.
pub const STORE_CURRENCY: &Currency = iso::USD;

/// Errors that can occur while parsing or converting prices.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    /// The string was not of the form `AMOUNT CURRENCY`.
    #[error("expected format 'AMOUNT CURRENCY', got: {0}")]
    InvalidFormat(String),

    /// The amount was not a decimal number.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// The currency code is not the store currency.
    #[error("unsupported currency {0}, store prices are in {1}")]
    UnsupportedCurrency(String, &'static str),

    /// Zero or negative amount.
    #[error("price must be positive, got: {0}")]
    NotPositive(String),

    /// Negative amount.
    #[error("price must not be negative, got: {0}")]
    Negative(String),

    /// The minor-unit value does not fit a signed money amount.
    #[error("price {0} is out of range")]
    OutOfRange(u64),
}

/// Parse a decimal amount in major units (e.g. `"129.99"`) into minor units.
///
/// # Errors
///
/// Returns an error if the amount is not a decimal number or is not positive.
pub fn parse_amount(s: &str) -> Result<u64, PriceError> {
    let trimmed = s.trim();
    let amount = parse_decimal(trimmed)?;

    if amount <= Decimal::ZERO {
        return Err(PriceError::NotPositive(trimmed.to_string()));
    }

    to_minor_units(amount, trimmed)
}

/// Parse a price filter bound in major units. Unlike [`parse_amount`], zero is
/// accepted.
///
/// # Errors
///
/// Returns an error if the amount is not a decimal number or is negative.
pub fn parse_price_bound(s: &str) -> Result<u64, PriceError> {
    let trimmed = s.trim();
    let amount = parse_decimal(trimmed)?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PriceError::Negative(trimmed.to_string()));
    }

    to_minor_units(amount, trimmed)
}

fn parse_decimal(trimmed: &str) -> Result<Decimal, PriceError> {
    trimmed
        .parse::<Decimal>()
        .map_err(|_err| PriceError::InvalidAmount(trimmed.to_string()))
}

fn to_minor_units(amount: Decimal, trimmed: &str) -> Result<u64, PriceError> {
    amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_u64())
        .ok_or_else(|| PriceError::InvalidAmount(trimmed.to_string()))
}

/// Parse a price string (e.g. `"180.00 USD"`) into minor units.
///
/// # Errors
///
/// Returns an error if the string is not in the format `AMOUNT CURRENCY`, if the
/// amount is invalid, or if the currency is not [`STORE_CURRENCY`].
pub fn parse_price(s: &str) -> Result<u64, PriceError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(PriceError::InvalidFormat(s.to_string()));
    };

    if code != STORE_CURRENCY.iso_alpha_code {
        return Err(PriceError::UnsupportedCurrency(
            code.to_string(),
            STORE_CURRENCY.iso_alpha_code,
        ));
    }

    parse_amount(amount)
}

/// Convert minor units into store-currency [`Money`].
///
/// # Errors
///
/// Returns [`PriceError::OutOfRange`] if the value does not fit a money amount.
pub fn to_money(minor: u64) -> Result<Money<'static, Currency>, PriceError> {
    let signed = i64::try_from(minor).map_err(|_err| PriceError::OutOfRange(minor))?;

    Ok(Money::from_minor(signed, STORE_CURRENCY))
}

/// Format minor units for display, e.g. `$180.00`.
pub fn format_price(minor: u64) -> String {
    to_money(minor).map_or_else(|_err| format!("{minor} (minor units)"), |money| money.to_string())
}

/// Price multiplied by quantity.
pub fn line_total(price: u64, quantity: u32) -> u64 {
    price.saturating_mul(u64::from(quantity))
}

/// Sum `price * quantity` over a set of lines.
pub fn total_price(lines: impl IntoIterator<Item = (u64, u32)>) -> u64 {
    lines
        .into_iter()
        .fold(0, |acc, (price, quantity)| {
            acc.saturating_add(line_total(price, quantity))
        })
}
