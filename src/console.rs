use std::io;
use std::io::{BufRead, Write};
use std::str::FromStr;

use chrono::Local;
use rust_decimal::Decimal;

use crate::account::Accounts;
use crate::error::SessionError;
use crate::notifier::{Receipt, TransactionKind, TransactionNotifier};
use crate::session::{Session, SessionState};
use crate::store::find_by_number;

// Drives the card-selection / PIN / menu loop until the user quits or
// input runs out. The caller saves the accounts afterwards.
pub fn run(
    accounts: &mut Accounts,
    notifier: &dyn TransactionNotifier,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<()> {
    loop {
        writeln!(output, "\nWelcome to the ATM Machine!")?;
        writeln!(
            output,
            "Select a card (e.g., 1 for Card 1, 2 for Card 2). Enter 0 to Quit the Program:"
        )?;
        let Some(selected) = prompt_number::<u32>(input, output)? else {
            return Ok(());
        };
        if selected == 0 {
            writeln!(output, "Exiting program. Thanks for using the ATM!")?;
            return Ok(());
        }

        let account = match find_by_number(accounts, selected) {
            Ok(account) => account,
            Err(_) => {
                writeln!(output, "Invalid card selection.")?;
                continue;
            }
        };

        let mut session = match Session::new(account, notifier) {
            Ok(session) => session,
            Err(_) => {
                writeln!(output, "This card is blocked. Please contact the bank.")?;
                continue;
            }
        };

        // PIN verification
        while session.state() == SessionState::Authenticating {
            writeln!(output, "Enter PIN (exactly 4 digits):")?;
            let Some(pin) = prompt_number::<u32>(input, output)? else {
                return Ok(());
            };
            match session.submit_pin(pin) {
                Ok(()) => {}
                Err(SessionError::WrongPin { attempts_remaining }) => {
                    writeln!(output, "Incorrect PIN. Attempts left: {}", attempts_remaining)?;
                }
                Err(_) => {
                    writeln!(
                        output,
                        "Card has been retained due to too many incorrect attempts. \
                         Please contact the bank."
                    )?;
                }
            }
        }
        if session.state() != SessionState::Authenticated {
            continue;
        }

        let quit = run_menu(&mut session, input, output)?;
        session.end_session();
        if quit {
            writeln!(
                output,
                "Exiting program. Please take your card. Thanks for using the ATM!"
            )?;
            return Ok(());
        }
    }
}

// Returns true when the user quit the ATM outright rather than
// ejecting the card.
fn run_menu(
    session: &mut Session,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<bool> {
    loop {
        writeln!(output, "\n--- ATM Menu ---")?;
        writeln!(output, "1. Change PIN")?;
        writeln!(output, "2. Check Balance")?;
        writeln!(output, "3. Withdraw")?;
        writeln!(output, "4. Deposit")?;
        writeln!(output, "5. Eject Card (return to card selection)")?;
        writeln!(output, "6. Quit the ATM")?;
        writeln!(output, "Select an option:")?;
        let Some(choice) = prompt_number::<u32>(input, output)? else {
            return Ok(true);
        };

        match choice {
            1 => {
                writeln!(output, "Enter new PIN:")?;
                let Some(new_pin1) = prompt_number::<u32>(input, output)? else {
                    return Ok(true);
                };
                writeln!(output, "Re-enter new PIN:")?;
                let Some(new_pin2) = prompt_number::<u32>(input, output)? else {
                    return Ok(true);
                };
                match session.change_pin(new_pin1, new_pin2) {
                    Ok(()) => writeln!(output, "PIN successfully changed!")?,
                    Err(SessionError::PinMismatch) => {
                        writeln!(output, "Error: PINs do not match!")?
                    }
                    Err(SessionError::InvalidPinFormat) => {
                        writeln!(output, "Error: PIN must be exactly 4 digits!")?
                    }
                    Err(e) => writeln!(output, "{}", e)?,
                }
            }
            2 => match session.balance() {
                Ok(balance) => {
                    writeln!(output, "Your current balance is: £{:.2}", balance)?
                }
                Err(e) => writeln!(output, "{}", e)?,
            },
            3 => {
                writeln!(output, "Enter amount to withdraw:")?;
                let Some(amount) = prompt_number::<Decimal>(input, output)? else {
                    return Ok(true);
                };
                match session.withdraw(amount) {
                    Ok(new_balance) => {
                        writeln!(output, "Withdrawal successful! New balance: £{:.2}", new_balance)?;
                        offer_receipt(
                            session,
                            TransactionKind::Withdrawal,
                            new_balance + amount,
                            new_balance,
                            input,
                            output,
                        )?;
                    }
                    Err(SessionError::InvalidAmount) => {
                        writeln!(output, "Invalid withdrawal amount!")?
                    }
                    Err(SessionError::NotMultipleOfFive) => {
                        writeln!(output, "Amount must be a multiple of 5, 10 or 20!")?
                    }
                    Err(SessionError::InsufficientFunds) => {
                        writeln!(output, "Insufficient funds!")?
                    }
                    Err(e) => writeln!(output, "{}", e)?,
                }
            }
            4 => {
                writeln!(output, "Enter amount to deposit:")?;
                let Some(amount) = prompt_number::<Decimal>(input, output)? else {
                    return Ok(true);
                };
                match session.deposit(amount) {
                    Ok(new_balance) => {
                        writeln!(output, "Deposit successful! New balance: £{:.2}", new_balance)?;
                        offer_receipt(
                            session,
                            TransactionKind::Deposit,
                            new_balance - amount,
                            new_balance,
                            input,
                            output,
                        )?;
                    }
                    Err(SessionError::InvalidAmount) => {
                        writeln!(output, "Invalid deposit amount!")?
                    }
                    Err(e) => writeln!(output, "{}", e)?,
                }
            }
            5 => {
                writeln!(output, "Card ejected. Returning to card selection...")?;
                return Ok(false);
            }
            6 => return Ok(true),
            _ => writeln!(output, "Invalid option. Try again.")?,
        }
    }
}

fn offer_receipt(
    session: &Session,
    kind: TransactionKind,
    original_balance: Decimal,
    new_balance: Decimal,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<()> {
    loop {
        writeln!(output, "Do you want a receipt? (y/n):")?;
        let Some(line) = read_line(input)? else {
            return Ok(());
        };
        match line.trim() {
            "y" | "Y" => {
                let receipt = Receipt {
                    holder: session.holder(),
                    kind,
                    original_balance,
                    new_balance,
                    date_time: Local::now().naive_local(),
                };
                writeln!(output, "\n{}", receipt)?;
                return Ok(());
            }
            "n" | "N" => return Ok(()),
            _ => {
                writeln!(output, "Invalid input! Please enter 'y' for yes or 'n' for no.")?;
            }
        }
    }
}

// Re-prompts on garbage until a value parses; None means end of input.
fn prompt_number<T: FromStr>(
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<Option<T>> {
    loop {
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        match line.trim().parse::<T>() {
            Ok(value) => return Ok(Some(value)),
            Err(_) => {
                writeln!(output, "Invalid input. Please try again:")?;
            }
        }
    }
}

fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        Ok(None)
    } else {
        Ok(Some(line))
    }
}
