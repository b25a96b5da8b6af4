//! homework-bot - Practicum review status notifier
//!
//! Polls the Practicum homework API on a fixed interval and sends a Telegram
//! message whenever the review status of the latest submission changes.

pub mod bot;
pub mod clock;
pub mod config;
pub mod error;
pub mod homework;
pub mod practicum;
pub mod telegram;

#[cfg(test)]
mod test_support;

pub use bot::{Bot, BotState, TickOutcome};
pub use clock::{Clock, SystemClock};
pub use config::{Config, Credentials};
pub use error::{BotError, Result};
pub use homework::{HomeworkStatus, StatusUpdate, parse_status};
pub use practicum::{PracticumClient, StatusSource, validate_response};
pub use telegram::{Notifier, TelegramNotifier};
