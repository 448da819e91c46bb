use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum SessionError {
    #[error("Account is blocked: {0}")]
    AccountBlocked(u32),
    #[error("Account not found: {0}")]
    AccountNotFound(u32),
    #[error("Incorrect PIN. Attempts left: {attempts_remaining}")]
    WrongPin { attempts_remaining: u8 },
    #[error("Card retained after too many incorrect attempts")]
    TooManyAttempts,
    #[error("Not authenticated")]
    NotAuthenticated,
    #[error("Invalid amount")]
    InvalidAmount,
    #[error("Amount must be a multiple of 5")]
    NotMultipleOfFive,
    #[error("Insufficient funds")]
    InsufficientFunds,
    #[error("PINs do not match")]
    PinMismatch,
    #[error("PIN must be exactly 4 digits")]
    InvalidPinFormat,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Account store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Account store CSV error: {0}")]
    Csv(#[from] csv::Error),
}
