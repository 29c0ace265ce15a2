use crate::clients::row_client::RowClient;
use crate::framework::{StoreError, TableClient};
use crate::model::{Account, SignUp, UserId, UserProfile};
use crate::user_actor::password::{hash_password, verify_password};
use crate::user_actor::UserError;
use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Client for the users table.
#[derive(Clone)]
pub struct UserClient {
    inner: TableClient<Account>,
}

impl UserClient {
    pub fn new(inner: TableClient<Account>) -> Self {
        Self { inner }
    }

    /// Hashes the password and stores a new account. Emails are matched case-insensitively.
    #[instrument(skip(self))]
    pub async fn register(&self, sign_up: SignUp) -> Result<UserProfile, UserError> {
        let email = sign_up.email.trim().to_lowercase();
        let password_hash = hash_password(&sign_up.password)?;
        let profile = UserProfile {
            id: UserId(Uuid::new_v4().to_string()),
            name: sign_up.name.trim().to_string(),
            email: email.clone(),
            department: sign_up.department,
            role: sign_up.role,
        };
        let account = Account {
            email,
            password_hash,
            profile: profile.clone(),
        };
        self.inner.insert(account).await.map_err(Self::map_error)?;
        info!(user_id = %profile.id, "Account registered");
        Ok(profile)
    }

    /// Returns the profile when `password` matches, `None` when it does not or the email is unknown.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Option<UserProfile>, UserError> {
        let email = email.trim().to_lowercase();
        let Some(account) = self.get(email).await? else {
            debug!("Unknown email");
            return Ok(None);
        };
        if verify_password(&account.password_hash, password)? {
            Ok(Some(account.profile))
        } else {
            warn!(user_id = %account.profile.id, "Password mismatch");
            Ok(None)
        }
    }
}

#[async_trait]
impl RowClient<Account> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &TableClient<Account> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        match e.into_row_error::<UserError>() {
            Ok(row) => row,
            Err(StoreError::Conflict(email)) => UserError::AlreadyExists(email),
            Err(StoreError::NotFound(email)) => UserError::NotFound(email),
            Err(other) => UserError::TableCommunicationError(other.to_string()),
        }
    }
}
