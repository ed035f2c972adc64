//! spendwise-core: expense model, rule-based classifier, chat responder and ledger

pub mod analytics;
pub mod category;
pub mod chat;
pub mod classifier;
pub mod expense;
pub mod import;
pub mod ledger;
pub mod responder;

pub use category::{Category, UnknownCategory};
pub use chat::{ChatHistory, ChatMessage, Sender};
pub use classifier::{CategoryClassifier, CategoryRule, DEFAULT_RULES};
pub use expense::ExpenseRecord;
pub use import::parse_expense_csv;
pub use ledger::ExpenseLedger;
pub use responder::ChatResponder;
