use std::sync::atomic::{AtomicU64, Ordering};

use log::*;
use rust_decimal::Decimal;

use crate::{
    account::{Account, DEFAULT_OPENING_BALANCE},
    records::AccountNumber,
};

/// Number handed to the first account opened by a fresh registry
pub const FIRST_ACCOUNT_NUMBER: AccountNumber = 328710100001;

/// Hands out account numbers and opens accounts with them.
/// Numbers are strictly increasing and never reused for the lifetime of the registry,
/// allocation is atomic so accounts may be opened from several threads.
pub struct AccountRegistry {
    next_number: AtomicU64,
}

impl AccountRegistry {
    pub fn new() -> Self {
        Self::starting_at(FIRST_ACCOUNT_NUMBER)
    }

    pub fn starting_at(first: AccountNumber) -> Self {
        Self {
            next_number: AtomicU64::new(first),
        }
    }

    /// The number the next opened account will receive
    pub fn peek_next(&self) -> AccountNumber {
        self.next_number.load(Ordering::SeqCst)
    }

    fn allocate(&self) -> AccountNumber {
        self.next_number.fetch_add(1, Ordering::SeqCst)
    }

    /// Opens an account for `holder_name` with `opening_balance`.
    /// The opening balance is taken as is, a negative value is not rejected.
    pub fn open(&self, holder_name: impl Into<String>, opening_balance: Decimal) -> Account {
        let account = Account::new(self.allocate(), holder_name.into(), opening_balance);
        info!("Opened account {}", account);
        account
    }

    /// Opens an account with the default opening balance
    pub fn open_default(&self, holder_name: impl Into<String>) -> Account {
        self.open(holder_name, DEFAULT_OPENING_BALANCE)
    }
}

impl Default for AccountRegistry {
    fn default() -> Self {
        Self::new()
    }
}
