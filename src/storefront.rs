//! Storefront
//!
//! Application state for one shopper: the catalog, their cart, placed orders
//! and who is signed in. Checks that the engines leave to their callers (known
//! product, offered size, admin role) happen here.

use thiserror::Error;
use tracing::warn;

use crate::domain::{
    carts::{CartEngine, models::CartLineItem},
    catalog::{
        CatalogStore, IntakeError,
        intake::ProductDraft,
        models::{Product, ProductId},
    },
    orders::{
        OrderManager, OrderStats, OrdersError,
        models::{CheckoutDetails, Order, OrderStatus, OrderUuid},
    },
    search::{ProductFilter, SortMode, Suggestions, filter_products, sort_products, suggest},
    sessions::{Session, User},
};

/// Storefront errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorefrontError {
    /// No product with this id is in the catalog.
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    /// The product is not offered in this size.
    #[error("product {product} is not available in size {size}")]
    UnknownSize {
        /// Product id.
        product: ProductId,
        /// Requested size.
        size: String,
    },

    /// The operation needs a signed-in admin.
    #[error("admin access required")]
    AdminRequired,

    /// Admin product submission was declined.
    #[error(transparent)]
    Intake(#[from] IntakeError),

    /// Order lifecycle error.
    #[error(transparent)]
    Orders(#[from] OrdersError),
}

/// The storefront application state.
#[derive(Debug)]
pub struct Storefront {
    catalog: CatalogStore,
    cart: CartEngine,
    orders: OrderManager,
    session: Session,
}

impl Storefront {
    /// Assemble a storefront. Nobody is signed in.
    pub fn new(catalog: CatalogStore, cart: CartEngine, orders: OrderManager) -> Self {
        Self {
            catalog,
            cart,
            orders,
            session: Session::default(),
        }
    }

    /// The catalog.
    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    /// The cart.
    pub fn cart(&self) -> &CartEngine {
        &self.cart
    }

    /// Placed orders, most recent first.
    pub fn orders(&self) -> &[Order] {
        self.orders.orders()
    }

    /// The signed-in user.
    pub fn current_user(&self) -> Option<&User> {
        self.session.current_user()
    }

    /// Sign in.
    pub fn login(&mut self, email: &str, password: &str) -> &User {
        self.session.login(email, password)
    }

    /// Create an account and sign in.
    pub fn sign_up(&mut self, email: &str, password: &str, name: &str) -> &User {
        self.session.sign_up(email, password, name)
    }

    /// Sign out.
    pub fn logout(&mut self) {
        self.session.logout();
    }

    /// Look up a product.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::ProductNotFound`] for unknown ids.
    pub fn product(&self, id: &ProductId) -> Result<&Product, StorefrontError> {
        self.catalog
            .get(id)
            .ok_or_else(|| StorefrontError::ProductNotFound(id.clone()))
    }

    /// Shop page results: filter, then sort.
    pub fn browse(&self, filter: &ProductFilter, sort: SortMode) -> Vec<&Product> {
        let mut products = filter_products(self.catalog.list(), filter);

        sort_products(&mut products, sort);

        products
    }

    /// Search-box suggestions.
    pub fn suggest(&self, partial: &str) -> Suggestions {
        suggest(self.catalog.list(), partial)
    }

    /// "You may also like" for a product page.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::ProductNotFound`] for unknown ids.
    pub fn related(&self, id: &ProductId) -> Result<Vec<&Product>, StorefrontError> {
        let product = self.product(id)?;

        Ok(self.catalog.related(product))
    }

    /// Add one unit of a catalog product in `size` to the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is unknown or not offered in `size`.
    pub fn add_to_cart(
        &mut self,
        id: &ProductId,
        size: &str,
    ) -> Result<&[CartLineItem], StorefrontError> {
        let product = self
            .catalog
            .get(id)
            .ok_or_else(|| StorefrontError::ProductNotFound(id.clone()))?;

        if !product.has_size(size) {
            return Err(StorefrontError::UnknownSize {
                product: id.clone(),
                size: size.to_string(),
            });
        }

        Ok(self.cart.add_to_cart(product, size))
    }

    /// Remove a cart line.
    pub fn remove_from_cart(&mut self, id: &ProductId, size: &str) -> &[CartLineItem] {
        self.cart.remove_from_cart(id, size)
    }

    /// Change a cart line's quantity, never below 1.
    pub fn update_quantity(&mut self, id: &ProductId, size: &str, delta: i32) -> &[CartLineItem] {
        self.cart.update_quantity(id, size, delta)
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    /// Place an order for the cart contents and empty the cart.
    ///
    /// # Errors
    ///
    /// Returns [`OrdersError::EmptyCart`] if there is nothing to order.
    pub fn checkout(&mut self, details: CheckoutDetails) -> Result<Order, StorefrontError> {
        Ok(self.orders.place_order(&mut self.cart, details)?)
    }

    /// Add a product from the admin form.
    ///
    /// Incomplete drafts are logged and declined; the catalog is unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if no admin is signed in or the draft lacks a name or
    /// price.
    pub fn add_product(&mut self, draft: ProductDraft) -> Result<ProductId, StorefrontError> {
        self.require_admin()?;

        let product = draft.into_product().inspect_err(|error| {
            warn!(%error, "product submission declined");
        })?;
        let id = product.id.clone();

        self.catalog.add_product(product);

        Ok(id)
    }

    /// Delete a product. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::AdminRequired`] unless an admin is signed in.
    pub fn remove_product(&mut self, id: &ProductId) -> Result<(), StorefrontError> {
        self.require_admin()?;

        self.catalog.remove_product(id);

        Ok(())
    }

    /// Advance an order's status.
    ///
    /// # Errors
    ///
    /// Returns an error if no admin is signed in or the transition is not a
    /// single forward step.
    pub fn update_order_status(
        &mut self,
        uuid: OrderUuid,
        status: OrderStatus,
    ) -> Result<Option<&Order>, StorefrontError> {
        self.require_admin()?;

        Ok(self.orders.update_status(uuid, status)?)
    }

    /// Admin dashboard figures.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::AdminRequired`] unless an admin is signed in.
    pub fn order_stats(&self) -> Result<OrderStats, StorefrontError> {
        self.require_admin()?;

        Ok(self.orders.stats())
    }

    fn require_admin(&self) -> Result<(), StorefrontError> {
        if self.session.is_admin() {
            Ok(())
        } else {
            Err(StorefrontError::AdminRequired)
        }
    }
}
