use std::{cmp::Ordering, fmt};

use chrono::Local;
use log::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::{
    errors::AccountError,
    records::{AccountNumber, TransactionRecord},
};

/// Balance given to accounts opened without an explicit one
pub const DEFAULT_OPENING_BALANCE: Decimal = dec!(500.00);

/// Represents a bank account owned by a single holder
pub struct Account {
    /// Unique number, assigned by the registry at opening
    number: AccountNumber,
    holder_name: String,
    opening_balance: Decimal,
    /// Current balance, always the opening balance plus every signed amount in the log
    balance: Decimal,
    /// Append only, in chronological order
    transaction_log: Vec<TransactionRecord>,
}

impl Account {
    /// Accounts are opened through `AccountRegistry` so numbers stay unique
    pub(crate) fn new(number: AccountNumber, holder_name: String, opening_balance: Decimal) -> Self {
        Self {
            number,
            holder_name,
            opening_balance,
            balance: opening_balance,
            transaction_log: Vec::new(),
        }
    }

    pub fn number(&self) -> AccountNumber {
        self.number
    }

    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn opening_balance(&self) -> Decimal {
        self.opening_balance
    }

    /// Deposits `amount` and logs a credit
    /// Returns an `Error` if the amount is not positive or the new balance overflows,
    /// the account is left untouched
    pub fn try_deposit(&mut self, amount: Decimal) -> Result<&TransactionRecord, AccountError> {
        if amount <= Decimal::ZERO {
            return Err(AccountError::InvalidAmount { amount });
        }

        let record = TransactionRecord::credit(self.balance, amount, Local::now()).ok_or(
            AccountError::Overflow {
                balance: self.balance,
                amount,
            },
        )?;
        Ok(self.append(record))
    }

    /// Withdraws `amount` and logs a debit
    /// Returns an `Error` if the amount is not positive, the balance would go below zero
    /// or the new balance overflows
    pub fn try_withdraw(&mut self, amount: Decimal) -> Result<&TransactionRecord, AccountError> {
        if amount <= Decimal::ZERO {
            return Err(AccountError::InvalidAmount { amount });
        }

        let record = TransactionRecord::debit(self.balance, amount, Local::now()).ok_or(
            AccountError::Overflow {
                balance: self.balance,
                amount,
            },
        )?;
        if record.balance_after() < Decimal::ZERO {
            return Err(AccountError::InsufficientFunds {
                balance: record.balance_before(),
                amount,
            });
        }
        Ok(self.append(record))
    }

    /// Same as `try_deposit`, but only reports whether the deposit went through
    pub fn deposit(&mut self, amount: Decimal) -> bool {
        let number = self.number;
        match self.try_deposit(amount) {
            Ok(_) => true,
            Err(err) => {
                warn!("Deposit rejected on account {}. {}", number, err);
                false
            }
        }
    }

    /// Same as `try_withdraw`, but only reports whether the withdrawal went through
    pub fn withdraw(&mut self, amount: Decimal) -> bool {
        let number = self.number;
        match self.try_withdraw(amount) {
            Ok(_) => true,
            Err(err) => {
                warn!("Withdrawal rejected on account {}. {}", number, err);
                false
            }
        }
    }

    fn append(&mut self, record: TransactionRecord) -> &TransactionRecord {
        debug!("Account {} | {}", self.number, record);
        self.balance = record.balance_after();
        self.transaction_log.push(record);
        &self.transaction_log[self.transaction_log.len() - 1]
    }

    /// Prints the account details to stdout
    pub fn print_details(&self) {
        println!("Account Number:  {}", self.number);
        println!("Holder's Name:   {}", self.holder_name);
        println!("Balance:         Rs. {}", self.balance);
    }

    /// Orders two accounts by balance only
    pub fn compare_balance(&self, other: &Account) -> Ordering {
        self.balance.cmp(&other.balance)
    }

    pub fn is_richer_than(&self, other: &Account) -> bool {
        self.compare_balance(other) == Ordering::Greater
    }

    pub fn is_poorer_than(&self, other: &Account) -> bool {
        self.compare_balance(other) == Ordering::Less
    }

    pub fn has_at_least(&self, other: &Account) -> bool {
        self.compare_balance(other) != Ordering::Less
    }

    pub fn has_at_most(&self, other: &Account) -> bool {
        self.compare_balance(other) != Ordering::Greater
    }

    pub fn transaction_count(&self) -> usize {
        self.transaction_log.len()
    }

    pub fn transaction_at(&self, index: usize) -> Result<&TransactionRecord, AccountError> {
        self.transaction_log
            .get(index)
            .ok_or(AccountError::IndexOutOfRange {
                index,
                len: self.transaction_log.len(),
            })
    }

    /// Iterates the log from the oldest transaction, every call starts from the beginning
    pub fn iter(&self) -> std::slice::Iter<'_, TransactionRecord> {
        self.transaction_log.iter()
    }

    /// The log from the newest transaction to the oldest
    pub fn reversed_log(&self) -> Vec<TransactionRecord> {
        self.transaction_log.iter().rev().cloned().collect()
    }

    pub fn to_debug_string(&self) -> String {
        format!("{:?}", self)
    }

    /// Disposes of the account and logs it
    pub fn close(self) -> AccountNumber {
        info!("Deleted account no. {}", self.number);
        self.number
    }
}

/// Accounts are the same account when their numbers match, whatever the balance
impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
    }
}

impl Eq for Account {}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Account No.: {} of {} has Rs. {}",
            self.number, self.holder_name, self.balance
        )
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Account no. {}, owned by {} has a balance of Rs. {}",
            self.number, self.holder_name, self.balance
        )
    }
}

impl<'a> IntoIterator for &'a Account {
    type Item = &'a TransactionRecord;
    type IntoIter = std::slice::Iter<'a, TransactionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{account_registry::AccountRegistry, records::TransactionKind};

    fn assert_balance_matches_log(account: &Account) {
        let signed_total: Decimal = account.iter().map(|record| record.amount()).sum();
        assert_eq!(account.balance(), account.opening_balance() + signed_total);
    }

    /*  Account opened with 10000.00
        1) Deposit 500, withdraw 3000
        2) Deposit 1000, withdraw 2000
        3) Ends with 6500.00 and four transactions
    */
    #[test]
    fn test_deposit_and_withdrawal() {
        let registry = AccountRegistry::new();
        let mut account = registry.open("Guido", dec!(10000.00));

        assert!(account.deposit(dec!(500.00)));
        assert_eq!(account.balance(), dec!(10500.00));
        assert!(account.withdraw(dec!(3000.00)));
        assert_eq!(account.balance(), dec!(7500.00));
        assert!(account.deposit(dec!(1000.00)));
        assert_eq!(account.balance(), dec!(8500.00));
        assert!(account.withdraw(dec!(2000.00)));
        assert_eq!(account.balance(), dec!(6500.00));

        assert_eq!(account.transaction_count(), 4);
        assert_balance_matches_log(&account);

        let kinds: Vec<_> = account.iter().map(|record| record.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                TransactionKind::Credit,
                TransactionKind::Debit,
                TransactionKind::Credit,
                TransactionKind::Debit
            ]
        );

        let second = account.transaction_at(1).unwrap();
        assert_eq!(second.balance_before(), dec!(10500.00));
        assert_eq!(second.amount(), dec!(-3000.00));
        assert_eq!(second.balance_after(), dec!(7500.00));
    }

    #[test]
    fn test_non_positive_deposit_is_rejected() {
        let mut account = AccountRegistry::new().open_default("Guido");

        assert!(!account.deposit(dec!(0)));
        assert!(!account.deposit(dec!(-20.00)));
        assert_eq!(
            account.try_deposit(dec!(-1)).unwrap_err(),
            AccountError::InvalidAmount { amount: dec!(-1) }
        );

        assert_eq!(account.balance(), dec!(500.00));
        assert_eq!(account.transaction_count(), 0);
    }

    #[test]
    fn test_overdraft_is_rejected() {
        let mut account = AccountRegistry::new().open_default("Guido");

        assert!(!account.withdraw(dec!(100000)));
        assert_eq!(
            account.try_withdraw(dec!(500.01)).unwrap_err(),
            AccountError::InsufficientFunds {
                balance: dec!(500.00),
                amount: dec!(500.01)
            }
        );
        assert_eq!(account.balance(), dec!(500.00));
        assert_eq!(account.transaction_count(), 0);

        // Emptying the account exactly is fine
        assert!(account.withdraw(dec!(500.00)));
        assert_eq!(account.balance(), dec!(0));
        assert_balance_matches_log(&account);
    }

    #[test]
    fn test_non_positive_withdrawal_is_rejected() {
        let mut account = AccountRegistry::new().open_default("Guido");

        assert!(!account.withdraw(dec!(0)));
        assert!(!account.withdraw(dec!(-250)));
        assert_eq!(account.balance(), dec!(500.00));
        assert_eq!(account.transaction_count(), 0);
    }

    #[test]
    fn test_balance_always_matches_log() {
        let mut account = AccountRegistry::new().open("Meghna", dec!(5000.00));
        let amounts = [
            dec!(120.50),
            dec!(-3),
            dec!(7000),
            dec!(0),
            dec!(4999.50),
            dec!(0.01),
        ];

        for (i, amount) in amounts.iter().enumerate() {
            if i % 2 == 0 {
                account.deposit(*amount);
            } else {
                account.withdraw(*amount);
            }
            assert_balance_matches_log(&account);
            assert!(account.balance() >= Decimal::ZERO);
        }
    }

    #[test]
    fn test_overflowing_amounts_are_rejected() {
        let registry = AccountRegistry::new();

        let mut account = registry.open_default("Guido");
        assert!(!account.deposit(Decimal::MAX));
        assert_eq!(
            account.try_deposit(Decimal::MAX).unwrap_err(),
            AccountError::Overflow {
                balance: dec!(500.00),
                amount: Decimal::MAX
            }
        );
        assert_eq!(account.balance(), dec!(500.00));
        assert_eq!(account.transaction_count(), 0);

        let mut overdrawn = registry.open("Overdrawn", dec!(-10));
        assert!(!overdrawn.withdraw(Decimal::MAX));
        assert_eq!(overdrawn.balance(), dec!(-10));
        assert_eq!(overdrawn.transaction_count(), 0);
    }

    #[test]
    fn test_transaction_at_out_of_range() {
        let mut account = AccountRegistry::new().open_default("Guido");
        account.deposit(dec!(1));

        assert!(account.transaction_at(0).is_ok());
        assert_eq!(
            account.transaction_at(1).unwrap_err(),
            AccountError::IndexOutOfRange { index: 1, len: 1 }
        );
    }

    #[test]
    fn test_iteration_restarts() {
        let mut account = AccountRegistry::new().open_default("Guido");
        account.deposit(dec!(10));
        account.withdraw(dec!(5));
        account.deposit(dec!(2));

        let first_pass: Vec<_> = account.iter().collect();
        let second_pass: Vec<_> = (&account).into_iter().collect();
        assert_eq!(first_pass.len(), 3);
        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn test_reversed_log() {
        let mut account = AccountRegistry::new().open_default("Guido");
        account.deposit(dec!(10));
        account.withdraw(dec!(5));
        account.deposit(dec!(2));

        let chronological: Vec<TransactionRecord> = account.iter().cloned().collect();
        let reversed = account.reversed_log();

        assert_eq!(reversed.len(), chronological.len());
        assert_eq!(reversed[0], chronological[2]);
        assert_eq!(reversed[2], chronological[0]);

        let twice: Vec<TransactionRecord> = reversed.into_iter().rev().collect();
        assert_eq!(twice, chronological);
    }

    #[test]
    fn test_equality_by_number() {
        let registry = AccountRegistry::new();
        let account_a = registry.open("Guido", dec!(100));
        let account_b = registry.open("Guido", dec!(100));

        assert_ne!(account_a, account_b);
        assert_eq!(account_a, account_a);
        assert_eq!(account_a.compare_balance(&account_b), Ordering::Equal);
    }

    #[test]
    fn test_balance_comparisons() {
        let registry = AccountRegistry::new();
        let rich = registry.open("Guido", dec!(6500.00));
        let poor = registry.open("Meghna", dec!(5000.00));

        assert_eq!(rich.compare_balance(&poor), Ordering::Greater);
        assert!(rich.is_richer_than(&poor));
        assert!(poor.is_poorer_than(&rich));
        assert!(rich.has_at_least(&poor));
        assert!(!rich.has_at_most(&poor));
        assert!(rich.has_at_least(&rich));
        assert!(rich.has_at_most(&rich));
    }

    #[test]
    fn test_text_representations() {
        let registry = AccountRegistry::starting_at(328710100001);
        let account = registry.open("Meghna", dec!(5000.00));

        assert_eq!(
            account.to_string(),
            "Account No.: 328710100001 of Meghna has Rs. 5000.00"
        );
        assert_eq!(
            account.to_debug_string(),
            "Account no. 328710100001, owned by Meghna has a balance of Rs. 5000.00"
        );
    }

    #[test]
    fn test_close_returns_number() {
        let account = AccountRegistry::starting_at(42).open_default("Guido");
        assert_eq!(account.close(), 42);
    }
}
