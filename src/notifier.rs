use std::fmt;
use std::fmt::Display;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransactionKind {
    Withdrawal,
    Deposit,
    ChangePin,
    CheckBalance,
    CardRetained,
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            TransactionKind::Withdrawal => "Withdrawal",
            TransactionKind::Deposit => "Deposit",
            TransactionKind::ChangePin => "Change PIN",
            TransactionKind::CheckBalance => "Check Balance",
            TransactionKind::CardRetained => "Card Retained",
        };
        f.write_str(name)
    }
}

// Fire-and-forget: implementations must never fail the transaction
// that triggered the notification.
pub trait TransactionNotifier {
    fn notify(
        &self,
        account_number: u32,
        kind: TransactionKind,
        original_balance: Decimal,
        new_balance: Decimal,
    );
}

pub struct FileNotifier {
    path: PathBuf,
}

impl FileNotifier {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileNotifier { path: path.into() }
    }
}

impl TransactionNotifier for FileNotifier {
    fn notify(
        &self,
        account_number: u32,
        kind: TransactionKind,
        original_balance: Decimal,
        new_balance: Decimal,
    ) {
        let line = format_log_line(account_number, kind, original_balance, new_balance);
        let result = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .and_then(|mut file| writeln!(file, "{}", line));

        if let Err(e) = result {
            eprintln!("Error: could not write transaction log: {}", e);
        }
    }
}

#[inline]
pub fn format_log_line(
    account_number: u32,
    kind: TransactionKind,
    original_balance: Decimal,
    new_balance: Decimal,
) -> String {
    format!(
        "Account {} - {}: Original Balance = £{:.2}, New Balance = £{:.2}",
        account_number, kind, original_balance, new_balance
    )
}

pub struct NullNotifier;

impl TransactionNotifier for NullNotifier {
    fn notify(&self, _: u32, _: TransactionKind, _: Decimal, _: Decimal) {}
}

pub struct Receipt<'a> {
    pub holder: &'a str,
    pub kind: TransactionKind,
    pub original_balance: Decimal,
    pub new_balance: Decimal,
    pub date_time: NaiveDateTime,
}

impl Display for Receipt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "----- ATM RECEIPT -----")?;
        writeln!(f, "Date/Time: {}", self.date_time.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(f, "Account Holder: {}", self.holder)?;
        writeln!(f, "----------------------")?;
        writeln!(f, "Transaction: {:<12}", self.kind.to_string())?;
        writeln!(f, "Original Balance: £{:>10.2}", self.original_balance)?;
        writeln!(f, "New Balance:      £{:>10.2}", self.new_balance)?;
        writeln!(f, "----------------------")?;
        writeln!(f, "Thank you for using our ATM!")?;
        write!(f, "----------------------")
    }
}
