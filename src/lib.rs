pub mod account;
pub mod console;
pub mod error;
pub mod notifier;
pub mod session;
pub mod store;
