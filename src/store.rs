use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

use csv::{ReaderBuilder, Trim, WriterBuilder};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::account::{Account, Accounts};
use crate::error::{SessionError, StoreError};

// Holder names longer than this are truncated on load.
const MAX_HOLDER_LEN: usize = 49;

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct AccountRecord {
    #[serde(rename = "AccountNumber")]
    number: u32,
    #[serde(rename = "AccountHolder")]
    holder: String,
    #[serde(rename = "Balance")]
    balance: Decimal,
    #[serde(rename = "PinCode")]
    pin: u32,
    #[serde(rename = "Blocked")]
    blocked: u8,
}

impl From<AccountRecord> for Account {
    fn from(record: AccountRecord) -> Self {
        Account {
            number: record.number,
            holder: truncate_holder(record.holder),
            balance: record.balance,
            pin: record.pin,
            blocked: record.blocked != 0,
        }
    }
}

#[inline]
fn truncate_holder(mut holder: String) -> String {
    if holder.len() > MAX_HOLDER_LEN {
        let mut end = MAX_HOLDER_LEN;
        while !holder.is_char_boundary(end) {
            end -= 1;
        }
        holder.truncate(end);
    }
    holder
}

// Malformed rows are skipped, not fatal.
pub fn read_accounts(reader: impl Read) -> Accounts {
    let mut binding = ReaderBuilder::new()
        .has_headers(true)
        .quoting(false)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    binding
        .deserialize()
        .filter_map(|result: Result<AccountRecord, csv::Error>| result.ok())
        .filter(|record| !record.holder.is_empty())
        .map(Account::from)
        .collect()
}

pub fn write_accounts(writer: impl Write, accounts: &[Account]) -> Result<(), StoreError> {
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    csv_writer.write_record([
        "AccountNumber",
        "AccountHolder",
        "Balance",
        "PinCode",
        "Blocked",
    ])?;

    for account in accounts {
        csv_writer.write_record([
            account.number.to_string(),
            account.holder.clone(),
            format!("{:.2}", account.balance),
            account.pin.to_string(),
            u8::from(account.blocked).to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn find_by_number(accounts: &mut [Account], number: u32) -> Result<&mut Account, SessionError> {
    accounts
        .iter_mut()
        .find(|account| account.number == number)
        .ok_or(SessionError::AccountNotFound(number))
}

pub struct AccountStore {
    path: PathBuf,
}

impl AccountStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        AccountStore { path: path.into() }
    }

    pub fn load_all(&self) -> Result<Accounts, StoreError> {
        let reader = BufReader::new(File::open(&self.path)?);
        Ok(read_accounts(reader))
    }

    pub fn save_all(&self, accounts: &[Account]) -> Result<(), StoreError> {
        let writer = BufWriter::new(File::create(&self.path)?);
        write_accounts(writer, accounts)
    }
}
