//! Test Helpers

use crate::domain::{
    catalog::models::{Category, Product, ProductId},
    orders::models::{CheckoutDetails, ContactDetails, PaymentDetails, ShippingAddress},
};

pub(crate) fn product(id: &str, brand: &str, price: u64, category: Category) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Sneaker {id}"),
        brand: brand.to_string(),
        price,
        original_price: None,
        offer: None,
        category,
        images: vec![format!("{id}.jpg")],
        description: String::new(),
        sizes: vec!["40".to_string(), "42".to_string()],
    }
}

pub(crate) fn named_product(id: &str, name: &str, brand: &str, price: u64) -> Product {
    Product {
        name: name.to_string(),
        ..product(id, brand, price, Category::Lifestyle)
    }
}

pub(crate) fn checkout_details(payment: PaymentDetails) -> CheckoutDetails {
    CheckoutDetails {
        contact: ContactDetails {
            email: "sam@example.com".to_string(),
            phone: "+20 100 000 0000".to_string(),
            first_name: "Sam".to_string(),
            last_name: "Rivera".to_string(),
        },
        address: ShippingAddress {
            street: "12 Nile St".to_string(),
            city: "Cairo".to_string(),
            postal_code: "11511".to_string(),
            region: None,
        },
        payment,
    }
}
