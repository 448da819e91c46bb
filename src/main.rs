use std::env;
use std::io;

use atm::console::run;
use atm::notifier::FileNotifier;
use atm::store::AccountStore;

fn main() {
    let mut args = env::args();
    if args.len() != 2 {
        eprintln!("Usage: {} accounts.csv", args.next().unwrap());
        return;
    }

    let filename = args.nth(1).expect("No filename provided");
    let store = AccountStore::new(&filename);
    let mut accounts = store.load_all().expect("Failed to load accounts");
    if accounts.is_empty() {
        eprintln!("No accounts loaded. Exiting.");
        return;
    }

    let notifier = FileNotifier::new("log.txt");
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    run(&mut accounts, &notifier, &mut input, &mut output).expect("Failed to write to stdout");

    store
        .save_all(&accounts)
        .unwrap_or_else(|e| eprintln!("Error saving accounts: {}", e));
}
