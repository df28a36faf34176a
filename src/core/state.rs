//! # Application State
//!
//! Who is signed in. Restored from the local store at startup and written
//! back on login/logout.
//!
//! ```text
//! AppState
//! ├── user: Option<User>     // signed-in user
//! └── token: Option<String>  // bearer token for the passthrough client
//! ```
//!
//! A user counts as logged in only when both halves are present.

use std::io;

use log::info;

use crate::api::{ApiError, Machine, MarketplaceApi, Session, User};
use crate::core::store::Store;
use crate::ui::Toasts;

const USER_KEY: &str = "user";
const TOKEN_KEY: &str = "token";
const LOGIN_REQUIRED: &str = "Please login to book a machine.";

#[derive(Debug, Default, Clone, PartialEq)]
pub struct AppState {
    pub user: Option<User>,
    pub token: Option<String>,
}

impl AppState {
    /// Restores the session saved in `store`, if both user and token are there.
    pub fn load(store: &Store) -> Self {
        match (store.get::<User>(USER_KEY), store.get::<String>(TOKEN_KEY)) {
            (Some(user), Some(token)) => {
                info!("Restored session for {}", user.email);
                Self {
                    user: Some(user),
                    token: Some(token),
                }
            }
            _ => Self::default(),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    /// Persists the session and greets the user.
    pub fn login(&mut self, store: &Store, session: Session, toasts: &mut Toasts) -> io::Result<()> {
        store.set(USER_KEY, &session.user)?;
        store.set(TOKEN_KEY, &session.token)?;
        toasts.success(format!("Welcome back, {}!", session.user.name));
        info!("Logged in as {}", session.user.email);
        self.user = Some(session.user);
        self.token = Some(session.token);
        Ok(())
    }

    pub fn logout(&mut self, store: &Store, toasts: &mut Toasts) -> io::Result<()> {
        self.user = None;
        self.token = None;
        store.remove(USER_KEY)?;
        store.remove(TOKEN_KEY)?;
        toasts.show("You have been logged out.", crate::ui::ToastKind::Default, None);
        Ok(())
    }

    /// Starts a booking. Returns the page to continue on, or `None` (with a
    /// warning toast) when nobody is logged in.
    pub fn book_machine(&self, machine_id: u64, toasts: &mut Toasts) -> Option<String> {
        if !self.is_logged_in() {
            toasts.warning(LOGIN_REQUIRED);
            return None;
        }
        toasts.success("Booking initiated! Redirecting...");
        Some(format!("farms.html?id={machine_id}&action=book"))
    }

    /// Login gate, lookup and availability check, in that order. Only a
    /// machine that passes all three gets the booking toast.
    ///
    /// `Ok(None)` means the booking was refused and a warning toast says why.
    pub async fn book<A>(
        &self,
        api: &A,
        machine_id: u64,
        toasts: &mut Toasts,
    ) -> Result<Option<(Machine, String)>, ApiError>
    where
        A: MarketplaceApi + ?Sized,
    {
        if !self.is_logged_in() {
            toasts.warning(LOGIN_REQUIRED);
            return Ok(None);
        }
        let machine = api.get_machine_by_id(machine_id).await?;
        if !machine.available {
            toasts.warning(format!("{} is not available right now.", machine.name));
            return Ok(None);
        }
        Ok(self
            .book_machine(machine.id, toasts)
            .map(|next| (machine, next)))
    }
}
