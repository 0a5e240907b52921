//! Order Models

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{domain::carts::models::CartLineItem, pricing::total_price, uuids::TypedUuid};

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Fulfilment status. Orders only move forward: pending, confirmed, shipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed, awaiting confirmation.
    Pending,

    /// Confirmed by the store.
    Confirmed,

    /// Handed to the carrier. Terminal.
    Shipped,
}

impl OrderStatus {
    /// The single status this one may advance to, if any.
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::Confirmed),
            Self::Confirmed => Some(Self::Shipped),
            Self::Shipped => None,
        }
    }

    /// Whether moving from `self` to `to` is a defined transition.
    pub fn can_transition_to(self, to: Self) -> bool {
        self.next() == Some(to)
    }

    /// Lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Shipped => "shipped",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// How the customer chose to pay. Only tags the order; nothing is charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Credit card.
    Card,

    /// `InstaPay` wallet transfer.
    InstaPay,

    /// Orange Money wallet.
    OrangeMoney,

    /// Cash on delivery.
    Cod,
}

impl PaymentMethod {
    /// Lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::InstaPay => "instapay",
            Self::OrangeMoney => "orangemoney",
            Self::Cod => "cod",
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Contact section of the checkout form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDetails {
    /// Email address, used for status notifications.
    pub email: String,

    /// Phone number.
    pub phone: String,

    /// Given name.
    pub first_name: String,

    /// Family name.
    pub last_name: String,
}

impl ContactDetails {
    /// `"First Last"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Where the order ships to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    /// Street address.
    pub street: String,

    /// City.
    pub city: String,

    /// ZIP / postal code.
    pub postal_code: String,

    /// State or region.
    pub region: Option<String>,
}

/// Payment section of the checkout form.
#[derive(Clone, PartialEq, Eq)]
pub enum PaymentDetails {
    /// Card fields. Never stored on the order.
    Card {
        /// Name on card.
        card_name: String,
        /// Card number.
        card_number: String,
        /// Expiry, `MM/YY`.
        expiry: String,
        /// Security code.
        cvc: String,
    },

    /// `InstaPay` wallet.
    InstaPay {
        /// Wallet phone number.
        wallet_number: String,
    },

    /// Orange Money wallet.
    OrangeMoney {
        /// Wallet phone number.
        wallet_number: String,
    },

    /// Cash on delivery.
    CashOnDelivery,
}

impl PaymentDetails {
    /// The method tag recorded on the order.
    pub const fn method(&self) -> PaymentMethod {
        match self {
            Self::Card { .. } => PaymentMethod::Card,
            Self::InstaPay { .. } => PaymentMethod::InstaPay,
            Self::OrangeMoney { .. } => PaymentMethod::OrangeMoney,
            Self::CashOnDelivery => PaymentMethod::Cod,
        }
    }
}

// Card data stays out of logs.
impl std::fmt::Debug for PaymentDetails {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_tuple("PaymentDetails").field(&self.method()).finish()
    }
}

/// Everything the checkout form submits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutDetails {
    /// Contact section.
    pub contact: ContactDetails,

    /// Shipping section.
    pub address: ShippingAddress,

    /// Payment section.
    pub payment: PaymentDetails,
}

/// Customer contact as recorded on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerContact {
    /// Email address.
    pub email: String,

    /// Phone number.
    pub phone: String,

    /// `"First Last"`.
    pub name: String,
}

/// Order Model
///
/// Items and total are frozen at placement; only the status changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    uuid: OrderUuid,
    items: Vec<CartLineItem>,
    total: u64,
    placed_at: Timestamp,
    status: OrderStatus,
    payment_method: PaymentMethod,
    customer: CustomerContact,
    shipping_address: ShippingAddress,
}

impl Order {
    /// Build a pending order from a cart snapshot.
    pub(crate) fn place(items: Vec<CartLineItem>, details: CheckoutDetails) -> Self {
        let total = total_price(items.iter().map(|line| (line.product.price, line.quantity)));

        Self {
            uuid: OrderUuid::new(),
            items,
            total,
            placed_at: Timestamp::now(),
            status: OrderStatus::Pending,
            payment_method: details.payment.method(),
            customer: CustomerContact {
                name: details.contact.full_name(),
                email: details.contact.email,
                phone: details.contact.phone,
            },
            shipping_address: details.address,
        }
    }

    pub(crate) fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }

    /// Unique, time-ordered identifier.
    pub fn uuid(&self) -> OrderUuid {
        self.uuid
    }

    /// Short human-facing reference.
    pub fn short_reference(&self) -> String {
        self.uuid.short_reference()
    }

    /// Lines as they were at checkout.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Sum of price × quantity at checkout.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// When the order was placed.
    pub fn placed_at(&self) -> Timestamp {
        self.placed_at
    }

    /// Current status.
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Chosen payment method.
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// Customer contact.
    pub fn customer(&self) -> &CustomerContact {
        &self.customer
    }

    /// Shipping address.
    pub fn shipping_address(&self) -> &ShippingAddress {
        &self.shipping_address
    }
}
