use std::{
    io::Write,
    path::{Path, PathBuf},
};

use log::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::{
    account::Account,
    account_registry::AccountRegistry,
    passbook::{self, OpenMode},
    records::TransactionKind,
};

/// Where the driver writes the passbook when run from the command line
pub const DEFAULT_PASSBOOK_PATH: &str = "passbookA.txt";

/// Journal of closed accounts, kept next to the passbook and appended to on every run
pub const CLOSED_ACCOUNTS_FILE: &str = "closed_accounts.txt";

/// The demonstration run: a few accounts, transactions, comparisons, a passbook and a statement
pub struct BankDemo {
    passbook_path: PathBuf,
}

impl BankDemo {
    pub fn new<P: AsRef<Path>>(passbook_path: P) -> Self {
        Self {
            passbook_path: passbook_path.as_ref().to_path_buf(),
        }
    }

    pub fn passbook_path(&self) -> &Path {
        &self.passbook_path
    }

    /// The CSV statement sits next to the passbook with a `.csv` extension
    pub fn statement_path(&self) -> PathBuf {
        self.passbook_path.with_extension("csv")
    }

    pub fn closed_accounts_path(&self) -> PathBuf {
        self.passbook_path.with_file_name(CLOSED_ACCOUNTS_FILE)
    }

    /// Runs the whole sequence, printing to stdout
    pub fn run(&self) -> anyhow::Result<()> {
        let registry = AccountRegistry::new();

        let mut account_a = registry.open("Guido", dec!(10000.00));
        account_a.deposit(dec!(500.00));
        account_a.withdraw(dec!(3000.00));
        account_a.deposit(dec!(1000.00));
        account_a.withdraw(dec!(2000.00));
        account_a.print_details();

        let account_b = registry.open("Meghna", dec!(5000.00));

        println!("Comparing accounts ...");
        print_comparisons(&account_a, &account_b);

        println!("Account A: {}", account_a);
        println!("No. of transactions: {}", account_a.transaction_count());
        println!("First transaction: {}", account_a.transaction_at(0)?);

        println!("Transactions:");
        for record in &account_a {
            println!("{}", record);
        }

        println!("Account B details:");
        account_b.print_details();
        println!("{}", account_b.to_debug_string());

        let (credited, debited) = totals(&account_a);
        println!(
            "Opened with Rs. {}, credited Rs. {}, debited Rs. {}",
            account_a.opening_balance(),
            credited,
            debited
        );

        println!("Transactions in reverse order:");
        for record in account_a.reversed_log() {
            println!("{}", record);
        }

        let mut account_c = registry.open_default("Ada");
        account_c.deposit(dec!(250.00));
        println!("Account C opened with the default balance:");
        account_c.print_details();

        let lines = passbook::write_passbook(&account_a, self.passbook_path())?;
        println!(
            "Passbook written to {} ({} transactions)",
            self.passbook_path().display(),
            lines
        );

        let statement_path = self.statement_path();
        passbook::write_statement_csv(&account_a, &statement_path)?;
        println!("Statement written to {}", statement_path.display());

        let closed = vec![account_c.close(), account_b.close(), account_a.close()];
        passbook::with_passbook(self.closed_accounts_path(), OpenMode::Append, |journal| {
            for number in &closed {
                writeln!(journal, "Deleted account no. {}", number)?;
            }
            Ok(())
        })?;
        debug!("Demo finished, next account number {}", registry.peek_next());

        Ok(())
    }
}

impl Default for BankDemo {
    fn default() -> Self {
        Self::new(DEFAULT_PASSBOOK_PATH)
    }
}

/// Sums of credited and debited amounts, debits as a positive figure
fn totals(account: &Account) -> (Decimal, Decimal) {
    account
        .iter()
        .fold((Decimal::ZERO, Decimal::ZERO), |(credited, debited), record| {
            match record.kind() {
                TransactionKind::Credit => (credited + record.amount(), debited),
                TransactionKind::Debit => (credited, debited - record.amount()),
            }
        })
}

/// Names the richer and the poorer holder; on equal balances both lines name `b`
fn comparison_lines(a: &Account, b: &Account) -> (String, String) {
    let greater = if a.is_richer_than(b) { a } else { b };
    let lesser = if a.is_poorer_than(b) { a } else { b };
    (
        format!(" A > B: {}'s balance is greater.", greater.holder_name()),
        format!(" A < B: {}'s balance is lesser.", lesser.holder_name()),
    )
}

fn print_comparisons(a: &Account, b: &Account) {
    let (greater, lesser) = comparison_lines(a, b);
    println!("{}", greater);
    println!("{}", lesser);
    println!(" A >= B: {}", a.has_at_least(b));
    println!(" A <= B: {}", a.has_at_most(b));
    println!(" A == B: {}", a == b);
}
