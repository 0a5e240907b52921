//! Order lifecycle manager.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use tracing::{debug, info};

use crate::{
    domain::{
        carts::CartEngine,
        orders::{
            errors::OrdersError,
            models::{CheckoutDetails, Order, OrderStatus, OrderUuid},
            notifier::{Notifier, StatusNotification},
        },
    },
    pricing::total_price,
};

/// Dashboard figures across all orders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderStats {
    /// Sum of order totals, in minor units.
    pub revenue: u64,

    /// Number of orders.
    pub count: usize,

    /// Orders still awaiting confirmation.
    pub pending: usize,
}

/// Turns carts into orders and moves orders through their statuses.
///
/// Orders are kept most recent first.
pub struct OrderManager {
    orders: Vec<Order>,
    notifier: Arc<dyn Notifier>,
}

impl Debug for OrderManager {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("OrderManager")
            .field("orders", &self.orders)
            .finish_non_exhaustive()
    }
}

impl OrderManager {
    /// Create an empty order list notifying through `notifier`.
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            orders: Vec::new(),
            notifier,
        }
    }

    /// Place an order for everything in `cart`, then clear the cart.
    ///
    /// # Errors
    ///
    /// Returns [`OrdersError::EmptyCart`] if the cart has no lines. The cart is
    /// left untouched in that case.
    pub fn place_order(
        &mut self,
        cart: &mut CartEngine,
        details: CheckoutDetails,
    ) -> Result<Order, OrdersError> {
        if cart.is_empty() {
            return Err(OrdersError::EmptyCart);
        }

        let order = Order::place(cart.items().to_vec(), details);

        info!(
            order = %order.short_reference(),
            total = order.total(),
            payment = %order.payment_method(),
            "order placed"
        );

        self.orders.insert(0, order.clone());

        cart.clear();

        Ok(order)
    }

    /// Advance the order `uuid` to `status` and notify its customer.
    ///
    /// Unknown orders are ignored and yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`OrdersError::InvalidTransition`] unless `status` is the single
    /// next step from the order's current status. Nothing changes and nobody
    /// is notified in that case.
    pub fn update_status(
        &mut self,
        uuid: OrderUuid,
        status: OrderStatus,
    ) -> Result<Option<&Order>, OrdersError> {
        let Some(order) = self.orders.iter_mut().find(|order| order.uuid() == uuid) else {
            debug!(order = %uuid, "status update for unknown order ignored");

            return Ok(None);
        };

        let from = order.status();

        if !from.can_transition_to(status) {
            return Err(OrdersError::InvalidTransition { from, to: status });
        }

        order.set_status(status);

        info!(order = %order.short_reference(), %from, to = %status, "order status updated");

        self.notifier.notify(&StatusNotification::for_order(order));

        Ok(Some(&*order))
    }

    /// All orders, most recent first.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Look up an order.
    pub fn get(&self, uuid: OrderUuid) -> Option<&Order> {
        self.orders.iter().find(|order| order.uuid() == uuid)
    }

    /// Revenue, count and pending figures.
    pub fn stats(&self) -> OrderStats {
        OrderStats {
            revenue: total_price(self.orders.iter().map(|order| (order.total(), 1))),
            count: self.orders.len(),
            pending: self
                .orders
                .iter()
                .filter(|order| order.status() == OrderStatus::Pending)
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use testresult::TestResult;

    use crate::{
        domain::{
            carts::repository::MockCartRepository,
            catalog::models::Category,
            orders::{
                models::{PaymentDetails, PaymentMethod},
                notifier::MockNotifier,
            },
        },
        test::helpers::{checkout_details, product},
    };

    use super::*;

    fn cart() -> CartEngine {
        let mut repository = MockCartRepository::new();
        repository.expect_load().returning(|| Ok(Vec::new()));
        repository.expect_save().returning(|_| Ok(()));

        CartEngine::new(Box::new(repository))
    }

    fn silent_manager() -> OrderManager {
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().return_const(());

        OrderManager::new(Arc::new(notifier))
    }

    fn cod() -> CheckoutDetails {
        checkout_details(PaymentDetails::CashOnDelivery)
    }

    #[test]
    fn placing_an_order_snapshots_and_clears_the_cart() -> TestResult {
        let mut manager = silent_manager();
        let mut cart = cart();
        let p1 = product("1", "Nike", 100_00, Category::Running);
        let p2 = product("2", "Adidas", 50_00, Category::Lifestyle);

        cart.add_to_cart(&p1, "42");
        cart.add_to_cart(&p2, "40");

        let order = manager.place_order(&mut cart, cod())?;

        assert_eq!(order.total(), 150_00);
        assert_eq!(order.items().len(), 2);
        assert_eq!(order.status(), OrderStatus::Pending);
        assert!(cart.is_empty());
        assert_eq!(manager.orders().len(), 1);

        Ok(())
    }

    #[test]
    fn empty_cart_cannot_be_ordered() {
        let mut manager = silent_manager();
        let mut cart = cart();

        let result = manager.place_order(&mut cart, cod());

        assert_eq!(result, Err(OrdersError::EmptyCart));
        assert!(manager.orders().is_empty());
    }

    #[test]
    fn newest_order_comes_first() -> TestResult {
        let mut manager = silent_manager();
        let mut cart = cart();
        let p1 = product("1", "Nike", 100_00, Category::Running);

        cart.add_to_cart(&p1, "42");
        let first = manager.place_order(&mut cart, cod())?;

        cart.add_to_cart(&p1, "40");
        let second = manager.place_order(&mut cart, cod())?;

        let uuids: Vec<_> = manager.orders().iter().map(Order::uuid).collect();

        assert_eq!(uuids, vec![second.uuid(), first.uuid()]);
        assert_ne!(first.uuid(), second.uuid());

        Ok(())
    }

    #[test]
    fn orders_keep_checkout_contact_and_payment_tag() -> TestResult {
        let mut manager = silent_manager();
        let mut cart = cart();
        cart.add_to_cart(&product("1", "Nike", 100_00, Category::Running), "42");

        let order = manager.place_order(
            &mut cart,
            checkout_details(PaymentDetails::OrangeMoney {
                wallet_number: "0100".to_string(),
            }),
        )?;

        assert_eq!(order.payment_method(), PaymentMethod::OrangeMoney);
        assert_eq!(order.customer().email, "sam@example.com");
        assert_eq!(order.customer().name, "Sam Rivera");
        assert_eq!(order.shipping_address().postal_code, "11511");

        Ok(())
    }

    #[test]
    fn order_walks_forward_and_notifies_each_step() -> TestResult {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().times(2).returning({
            let sent = Arc::clone(&sent);

            move |notification: &StatusNotification| {
                if let Ok(mut sent) = sent.lock() {
                    sent.push(notification.clone());
                }
            }
        });

        let mut manager = OrderManager::new(Arc::new(notifier));
        let mut cart = cart();
        cart.add_to_cart(&product("1", "Nike", 100_00, Category::Running), "42");

        let uuid = manager.place_order(&mut cart, cod())?.uuid();

        let confirmed = manager.update_status(uuid, OrderStatus::Confirmed)?;
        assert_eq!(confirmed.map(Order::status), Some(OrderStatus::Confirmed));

        let shipped = manager.update_status(uuid, OrderStatus::Shipped)?;
        assert_eq!(shipped.map(Order::status), Some(OrderStatus::Shipped));

        let sent = sent.lock().map_err(|error| error.to_string())?.clone();
        let statuses: Vec<OrderStatus> =
            sent.iter().map(|notification| notification.status).collect();

        assert_eq!(statuses, vec![OrderStatus::Confirmed, OrderStatus::Shipped]);
        assert!(
            sent.iter().all(|notification| notification.order == uuid
                && notification.reference == uuid.short_reference()
                && notification.email == "sam@example.com"
                && notification.name == "Sam Rivera"),
            "notifications should identify the order and customer: {sent:?}"
        );

        Ok(())
    }

    #[test]
    fn skipping_or_reversing_is_rejected_without_notifying() -> TestResult {
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().times(0);

        let mut manager = OrderManager::new(Arc::new(notifier));
        let mut cart = cart();
        cart.add_to_cart(&product("1", "Nike", 100_00, Category::Running), "42");

        let uuid = manager.place_order(&mut cart, cod())?.uuid();

        let skipped = manager
            .update_status(uuid, OrderStatus::Shipped)
            .map(|order| order.map(Order::status));
        let backwards = manager
            .update_status(uuid, OrderStatus::Pending)
            .map(|order| order.map(Order::status));

        assert_eq!(
            skipped,
            Err(OrdersError::InvalidTransition {
                from: OrderStatus::Pending,
                to: OrderStatus::Shipped,
            })
        );
        assert!(
            matches!(backwards, Err(OrdersError::InvalidTransition { .. })),
            "expected InvalidTransition, got {backwards:?}"
        );
        assert_eq!(
            manager.get(uuid).map(Order::status),
            Some(OrderStatus::Pending)
        );

        Ok(())
    }

    #[test]
    fn unknown_order_is_a_silent_noop() -> TestResult {
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().times(0);

        let mut manager = OrderManager::new(Arc::new(notifier));

        let result = manager.update_status(OrderUuid::new(), OrderStatus::Confirmed)?;

        assert!(result.is_none());

        Ok(())
    }

    #[test]
    fn stats_sum_revenue_and_count_pending() -> TestResult {
        let mut manager = silent_manager();
        let mut cart = cart();
        let p1 = product("1", "Nike", 100_00, Category::Running);

        cart.add_to_cart(&p1, "42");
        let first = manager.place_order(&mut cart, cod())?.uuid();

        cart.add_to_cart(&p1, "42");
        cart.add_to_cart(&p1, "42");
        manager.place_order(&mut cart, cod())?;

        manager.update_status(first, OrderStatus::Confirmed)?;

        assert_eq!(
            manager.stats(),
            OrderStats {
                revenue: 300_00,
                count: 2,
                pending: 1,
            }
        );

        Ok(())
    }
}
