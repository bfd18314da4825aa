//! Email/password identity over the record store
//!
//! Accounts sign up with an email, a password and a role; passwords are
//! stored as bcrypt hashes and never leave the store layer in the clear.
//! Signing in mints a session token persisted both in the `sessions` table
//! and in a dotfile under the config directory, so consecutive CLI
//! invocations act as the same user. Every ledger operation takes the
//! resolved account explicitly; there is no ambient "current user".

use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;
use uuid::Uuid;

use crate::domain::{Role, User};
use crate::feed::{ChangeEvent, ChangeOp, Table};
use crate::store::{Store, StoreError, now_ms, sessions, users};

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 8;

/// Starting balances seeded at signup
const USER_STARTING_POINTS: i64 = 150;
const USER_STARTING_TOKENS: i64 = 25;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email pattern"));

/// Identity failure
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    #[error("password must be at least {MIN_PASSWORD_LEN} characters")]
    WeakPassword,

    #[error("an account with this email already exists")]
    EmailTaken,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("not signed in")]
    NoSession,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("session file error: {0}")]
    Io(#[from] std::io::Error),
}

/// An authenticated session
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: String,
    pub email: String,
}

/// Identity provider backed by the store and a session dotfile
#[derive(Clone)]
pub struct Identity {
    store: Store,
    session_path: PathBuf,
}

impl Identity {
    pub fn new(store: Store, session_path: PathBuf) -> Self {
        Self {
            store,
            session_path,
        }
    }

    /// Register a new account and seed its starting balances.
    pub fn sign_up(
        &self,
        email: &str,
        password: &str,
        role: Role,
        name: &str,
    ) -> Result<User, AuthError> {
        let email = email.trim().to_lowercase();
        if !EMAIL_RE.is_match(&email) {
            return Err(AuthError::InvalidEmail(email));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }

        let name = name.trim();
        let name = if name.is_empty() { email.as_str() } else { name };

        let (points, tokens) = match role {
            Role::User => (USER_STARTING_POINTS, USER_STARTING_TOKENS),
            Role::Brand => (0, 0),
        };

        let user = User {
            id: Uuid::new_v4().to_string(),
            email: email.clone(),
            name: name.to_string(),
            role,
            points,
            tokens_earned: tokens,
            streak: 0,
            last_submission_date: None,
            wallet: None,
            created_at: now_ms(),
        };

        let hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;
        {
            let conn = self.store.conn();
            if users::get_by_email(&conn, &email)?.is_some() {
                return Err(AuthError::EmailTaken);
            }
            users::insert(&conn, &user, &hash)?;
        }
        self.store.feed().publish(ChangeEvent {
            table: Table::Users,
            op: ChangeOp::Insert,
            row_id: user.id.clone(),
        });

        info!(user = %user.id, role = %role, "account created");
        Ok(user)
    }

    /// Verify credentials and start a session.
    pub fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let email = email.trim().to_lowercase();

        let (user_id, hash) = {
            let conn = self.store.conn();
            users::credentials(&conn, &email)?.ok_or(AuthError::InvalidCredentials)?
        };
        if !bcrypt::verify(password, &hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = Uuid::new_v4().to_string();
        {
            let conn = self.store.conn();
            sessions::insert(&conn, &token, &user_id, now_ms())?;
        }

        if let Some(parent) = self.session_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.session_path, &token)?;

        info!(user = %user_id, "signed in");
        Ok(Session {
            user_id,
            email,
        })
    }

    /// The session behind the persisted token, if any.
    pub fn current_session(&self) -> Result<Option<Session>, AuthError> {
        let token = match std::fs::read_to_string(&self.session_path) {
            Ok(t) => t.trim().to_string(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if token.is_empty() {
            return Ok(None);
        }

        let conn = self.store.conn();
        let Some(user_id) = sessions::user_id_for_token(&conn, &token)? else {
            return Ok(None);
        };
        let Some(user) = users::get(&conn, &user_id)? else {
            return Ok(None);
        };
        Ok(Some(Session {
            user_id: user.id,
            email: user.email,
        }))
    }

    /// The full account record behind the current session.
    pub fn current_user(&self) -> Result<User, AuthError> {
        let session = self.current_session()?.ok_or(AuthError::NoSession)?;
        let conn = self.store.conn();
        users::get(&conn, &session.user_id)?.ok_or(AuthError::NoSession)
    }

    /// End the current session, if any.
    pub fn sign_out(&self) -> Result<(), AuthError> {
        let token = match std::fs::read_to_string(&self.session_path) {
            Ok(t) => t.trim().to_string(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        if !token.is_empty() {
            let conn = self.store.conn();
            sessions::delete(&conn, &token)?;
        }
        std::fs::remove_file(&self.session_path)?;
        Ok(())
    }
}
