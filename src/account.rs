use rust_decimal::Decimal;

pub struct Account {
    pub number: u32,
    pub holder: String,
    pub balance: Decimal,
    pub pin: u32,
    pub blocked: bool,
}

impl Account {
    #[inline]
    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    #[inline]
    pub fn verify_pin(&self, candidate: u32) -> bool {
        candidate == self.pin
    }
}

pub type Accounts = Vec<Account>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    fn account() -> Account {
        Account {
            number: 123,
            holder: "Test User".to_string(),
            balance: dec!(100.0),
            pin: 1234,
            blocked: false,
        }
    }

    #[test]
    fn test_verify_pin() {
        let account = account();
        assert!(account.verify_pin(1234));
        assert!(!account.verify_pin(0));
        assert!(!account.verify_pin(4321));
    }

    #[test]
    fn test_is_blocked() {
        let mut account = account();
        assert!(!account.is_blocked());
        account.blocked = true;
        assert!(account.is_blocked());
    }
}
