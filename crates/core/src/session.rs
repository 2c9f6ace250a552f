//! Account session state
//!
//! A session starts either as a guest (no token) or authenticated (token
//! supplied). A guest becomes an "upgraded guest" after its first upload: the
//! service hands out a guest token and a folder, which the session remembers
//! and uses as defaults from then on. The transition lives in
//! [`Session::apply_upload_result`] so it can be tested without a network.

use serde::{Deserialize, Serialize};

use crate::envelope::Envelope;

/// How the session was established
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountMode {
    /// No token was supplied at construction
    Guest,
    /// A token was supplied at construction
    Authenticated,
}

/// Construction options for a session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// API token of an existing account
    pub token: Option<String>,
    /// Request guest mode explicitly
    pub guest: bool,
}

impl SessionOptions {
    /// Guest session options
    pub fn guest() -> Self {
        Self {
            token: None,
            guest: true,
        }
    }

    /// Options for an account token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            guest: false,
        }
    }
}

/// State of one logical user session
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    credential: Option<String>,
    mode: AccountMode,
    account_snapshot: Option<Envelope>,
    guest_upload_destination: Option<String>,
}

impl Session {
    /// Create a session, normalizing the token and guest flag
    ///
    /// A non-empty token always wins over the guest flag. Without a token the
    /// session is a guest whether or not the flag was set.
    pub fn new(options: SessionOptions) -> Self {
        let credential = options.token.filter(|t| !t.is_empty());
        if credential.is_some() && options.guest {
            tracing::debug!("Token supplied together with guest mode, using the token");
        }

        let mode = if credential.is_some() {
            AccountMode::Authenticated
        } else {
            AccountMode::Guest
        };

        Self {
            credential,
            mode,
            account_snapshot: None,
            guest_upload_destination: None,
        }
    }

    pub fn mode(&self) -> AccountMode {
        self.mode
    }

    pub fn is_guest(&self) -> bool {
        self.mode == AccountMode::Guest
    }

    /// Guest that has not uploaded yet and therefore holds no token
    pub fn is_fresh_guest(&self) -> bool {
        self.is_guest() && self.credential.is_none()
    }

    /// Guest that holds a server-issued token from its first upload
    pub fn is_upgraded_guest(&self) -> bool {
        self.is_guest() && self.credential.is_some()
    }

    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    pub fn account_snapshot(&self) -> Option<&Envelope> {
        self.account_snapshot.as_ref()
    }

    pub fn guest_upload_destination(&self) -> Option<&str> {
        self.guest_upload_destination.as_deref()
    }

    /// Root folder id from the account snapshot
    pub fn root_folder(&self) -> Option<&str> {
        self.account_snapshot
            .as_ref()
            .and_then(|snapshot| snapshot.data_str("rootFolder"))
            .filter(|root| !root.is_empty())
    }

    /// Folder id an upload should target
    ///
    /// An explicit folder wins, then the folder captured from the first guest
    /// upload. `None` lets the service pick the root folder.
    pub fn resolve_upload_folder<'a>(&'a self, explicit: Option<&'a str>) -> Option<&'a str> {
        explicit.or_else(|| {
            if self.is_guest() {
                self.guest_upload_destination()
            } else {
                None
            }
        })
    }

    /// Replace the account snapshot, whatever the service returned
    pub fn set_account_snapshot(&mut self, snapshot: Envelope) -> &Envelope {
        self.account_snapshot.insert(snapshot)
    }

    /// Capture the guest token and destination folder from an upload reply
    ///
    /// Only the first successful upload of a fresh guest changes the session.
    /// Returns whether the session was upgraded.
    pub fn apply_upload_result(&mut self, response: &Envelope) -> bool {
        if !self.is_fresh_guest() || !response.is_ok() {
            return false;
        }

        let (Some(token), Some(folder)) = (
            response.data_str("guestToken").filter(|t| !t.is_empty()),
            response.data_str("parentFolder").filter(|f| !f.is_empty()),
        ) else {
            tracing::warn!("Guest upload response carries no guest token or parent folder");
            return false;
        };

        self.credential = Some(token.to_string());
        if self.guest_upload_destination.is_none() {
            self.guest_upload_destination = Some(folder.to_string());
        }
        true
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionOptions::default())
    }
}
