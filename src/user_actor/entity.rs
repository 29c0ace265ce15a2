//! [`TableRow`] implementation for [`Account`].
//!
//! Accounts are keyed by lower-cased email and are never updated in place.

use super::error::UserError;
use crate::framework::TableRow;
use crate::model::Account;
use async_trait::async_trait;
use std::convert::Infallible;

#[async_trait]
impl TableRow for Account {
    type Id = String;
    type Update = Infallible;
    type Error = UserError;
    const TABLE: &'static str = "users";

    fn id(&self) -> String {
        self.email.clone()
    }

    async fn on_insert(&mut self) -> Result<(), UserError> {
        if !self.email.contains('@') {
            return Err(UserError::ValidationError(format!("invalid email: {}", self.email)));
        }
        if self.profile.name.trim().is_empty() {
            return Err(UserError::ValidationError("name is required".into()));
        }
        if self.password_hash.is_empty() {
            return Err(UserError::ValidationError("missing password hash".into()));
        }
        Ok(())
    }

    fn on_update(&mut self, update: Infallible) -> Result<(), UserError> {
        match update {}
    }
}
