//! Customer notifications.

use mockall::automock;
use tracing::info;

use crate::domain::orders::models::{Order, OrderStatus, OrderUuid};

/// A status change to tell the customer about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusNotification {
    /// Customer email.
    pub email: String,

    /// Customer name.
    pub name: String,

    /// The order that changed.
    pub order: OrderUuid,

    /// Short order reference, for display.
    pub reference: String,

    /// The status the order just moved to.
    pub status: OrderStatus,
}

impl StatusNotification {
    /// Address a notification to the customer of `order` at its current status.
    pub fn for_order(order: &Order) -> Self {
        let customer = order.customer();

        Self {
            email: customer.email.clone(),
            name: customer.name.clone(),
            order: order.uuid(),
            reference: order.short_reference(),
            status: order.status(),
        }
    }
}

/// Delivers status notifications. Fire-and-forget: failures stay inside.
#[automock]
pub trait Notifier: Send + Sync {
    /// Deliver `notification`.
    fn notify(&self, notification: &StatusNotification);
}

/// Logs each notification as a simulated email.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: &StatusNotification) {
        info!(
            to = %notification.email,
            order = %notification.order,
            status = %notification.status,
            "simulated email: Hi {}, your order #{} is now {}",
            notification.name,
            notification.reference,
            notification.status,
        );
    }
}
