use rust_decimal::Decimal;
use rust_decimal::dec;

use crate::account::Account;
use crate::error::SessionError;
use crate::notifier::TransactionKind;
use crate::notifier::TransactionNotifier;

pub const MAX_PIN_ATTEMPTS: u8 = 3;
pub const PIN_MIN: u32 = 1000;
pub const PIN_MAX: u32 = 9999;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionState {
    Authenticating,
    Authenticated,
    LockedOut,
}

// Exclusively borrows the account for its whole lifetime, so a second
// session over the same card cannot be constructed while one is live.
pub struct Session<'a> {
    account: &'a mut Account,
    notifier: &'a dyn TransactionNotifier,
    attempts: u8,
    state: SessionState,
}

impl<'a> Session<'a> {
    pub fn new(
        account: &'a mut Account,
        notifier: &'a dyn TransactionNotifier,
    ) -> Result<Self, SessionError> {
        if account.is_blocked() {
            return Err(SessionError::AccountBlocked(account.number));
        }
        Ok(Session {
            account,
            notifier,
            attempts: 0,
            state: SessionState::Authenticating,
        })
    }

    #[inline]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[inline]
    pub fn account_number(&self) -> u32 {
        self.account.number
    }

    #[inline]
    pub fn holder(&self) -> &str {
        &self.account.holder
    }

    #[inline]
    fn require_authenticated(&self) -> Result<(), SessionError> {
        if self.state == SessionState::Authenticated {
            Ok(())
        } else {
            Err(SessionError::NotAuthenticated)
        }
    }

    pub fn submit_pin(&mut self, candidate: u32) -> Result<(), SessionError> {
        match self.state {
            SessionState::Authenticated => Ok(()),
            SessionState::LockedOut => Err(SessionError::TooManyAttempts),
            SessionState::Authenticating => {
                if self.account.verify_pin(candidate) {
                    self.state = SessionState::Authenticated;
                    return Ok(());
                }
                self.attempts += 1;
                if self.attempts >= MAX_PIN_ATTEMPTS {
                    self.account.blocked = true;
                    self.state = SessionState::LockedOut;
                    self.notifier.notify(
                        self.account.number,
                        TransactionKind::CardRetained,
                        Decimal::ZERO,
                        Decimal::ZERO,
                    );
                    Err(SessionError::TooManyAttempts)
                } else {
                    Err(SessionError::WrongPin {
                        attempts_remaining: MAX_PIN_ATTEMPTS - self.attempts,
                    })
                }
            }
        }
    }

    pub fn withdraw(&mut self, amount: Decimal) -> Result<Decimal, SessionError> {
        self.require_authenticated()?;

        if amount <= Decimal::ZERO {
            return Err(SessionError::InvalidAmount);
        }
        // Fractional pennies are discarded before the multiple-of-5
        // check: 12.99 is tested as 12, 15.99 as 15.
        if amount.trunc() % dec!(5) != Decimal::ZERO {
            return Err(SessionError::NotMultipleOfFive);
        }
        if amount > self.account.balance {
            return Err(SessionError::InsufficientFunds);
        }

        let original_balance = self.account.balance;
        self.account.balance -= amount;
        self.notifier.notify(
            self.account.number,
            TransactionKind::Withdrawal,
            original_balance,
            self.account.balance,
        );
        Ok(self.account.balance)
    }

    pub fn deposit(&mut self, amount: Decimal) -> Result<Decimal, SessionError> {
        self.require_authenticated()?;

        if amount <= Decimal::ZERO {
            return Err(SessionError::InvalidAmount);
        }

        let original_balance = self.account.balance;
        self.account.balance += amount;
        self.notifier.notify(
            self.account.number,
            TransactionKind::Deposit,
            original_balance,
            self.account.balance,
        );
        Ok(self.account.balance)
    }

    pub fn change_pin(&mut self, new_pin1: u32, new_pin2: u32) -> Result<(), SessionError> {
        self.require_authenticated()?;

        if new_pin1 != new_pin2 {
            return Err(SessionError::PinMismatch);
        }
        if !(PIN_MIN..=PIN_MAX).contains(&new_pin1) {
            return Err(SessionError::InvalidPinFormat);
        }

        self.account.pin = new_pin1;
        self.notifier.notify(
            self.account.number,
            TransactionKind::ChangePin,
            Decimal::ZERO,
            Decimal::ZERO,
        );
        Ok(())
    }

    pub fn balance(&self) -> Result<Decimal, SessionError> {
        self.require_authenticated()?;

        let balance = self.account.balance;
        self.notifier.notify(
            self.account.number,
            TransactionKind::CheckBalance,
            balance,
            balance,
        );
        Ok(balance)
    }

    pub fn end_session(self) {}
}
