//! Mock sign-in.
//!
//! No credentials are stored or verified beyond the single demo admin account.

use tracing::info;

use crate::domain::sessions::models::{Role, User};

/// Demo admin email.
pub const ADMIN_EMAIL: &str = "admin@kicks.com";

const ADMIN_PASSWORD: &str = "admin";

/// Who is signed in, if anyone.
#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    /// Sign in. The demo admin credentials yield an admin; anything else a guest
    /// customer.
    pub fn login(&mut self, email: &str, password: &str) -> &User {
        let user = if email == ADMIN_EMAIL && password == ADMIN_PASSWORD {
            User {
                email: email.to_string(),
                name: "Admin User".to_string(),
                role: Role::Admin,
            }
        } else {
            User {
                email: email.to_string(),
                name: "Guest User".to_string(),
                role: Role::Customer,
            }
        };

        info!(email, role = ?user.role, "signed in");

        self.user.insert(user)
    }

    /// Create a customer account and sign it in.
    pub fn sign_up(&mut self, email: &str, _password: &str, name: &str) -> &User {
        info!(email, "signed up");

        self.user.insert(User {
            email: email.to_string(),
            name: name.to_string(),
            role: Role::Customer,
        })
    }

    /// Sign out.
    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!(email = %user.email, "signed out");
        }
    }

    /// The signed-in user.
    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Whether an admin is signed in.
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|user| user.role == Role::Admin)
    }
}
