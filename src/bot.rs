//! Poll loop - fetch, compare, notify, sleep
//!
//! Each tick:
//! - Fetches submissions updated since the cursor
//! - Validates the response shape
//! - Notifies on a changed status of the most recent submission
//! - Reports failures to the chat, once per distinct message
//!
//! The API returns the most recent submission first, so only
//! `homeworks[0]` is considered.

use std::time::Duration;

use crate::clock::Clock;
use crate::error::Result;
use crate::homework::StatusUpdate;
use crate::practicum::{StatusSource, current_date, validate_response};
use crate::telegram::Notifier;

/// Prefix of the diagnostic sent to the chat when a tick fails
pub const FAILURE_PREFIX: &str = "Bot failure: ";

/// What happened during a tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// No submissions since the cursor
    Empty,
    /// Latest submission has the status we already reported
    Unchanged,
    /// A status change was delivered
    Notified(String),
    /// A status change was found but the send failed
    DeliveryFailed,
    /// The tick failed; carries the diagnostic text
    Failed(String),
}

/// In-memory state carried between ticks
#[derive(Debug, Clone, Default)]
pub struct BotState {
    /// `from_date` for the next poll
    pub cursor: i64,
    /// Last status change that reached the chat
    pub last_update: Option<StatusUpdate>,
    /// Last diagnostic that reached the chat
    pub last_error: Option<String>,
    /// Number of ticks since start
    pub tick_count: u64,
}

/// The poll-and-notify loop over injected I/O edges
pub struct Bot<S, N, C> {
    source: S,
    notifier: N,
    clock: C,
    interval: Duration,
    state: BotState,
}

impl<S, N, C> Bot<S, N, C>
where
    S: StatusSource,
    N: Notifier,
    C: Clock,
{
    /// Create a bot whose cursor starts at the clock's current time
    pub fn new(source: S, notifier: N, clock: C, interval: Duration) -> Self {
        let cursor = clock.now();
        Self {
            source,
            notifier,
            clock,
            interval,
            state: BotState {
                cursor,
                ..BotState::default()
            },
        }
    }

    /// Start polling from an explicit cursor instead of "now"
    pub fn with_cursor(mut self, cursor: i64) -> Self {
        self.state.cursor = cursor;
        self
    }

    pub fn state(&self) -> &BotState {
        &self.state
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Poll forever, sleeping the configured interval after every tick
    pub async fn run(&mut self) {
        log::info!(
            "Polling every {}s starting from {}",
            self.interval.as_secs(),
            self.state.cursor
        );
        loop {
            self.tick().await;
            self.clock.sleep(self.interval).await;
        }
    }

    /// Run one iteration, reporting any failure to the chat
    pub async fn tick(&mut self) -> TickOutcome {
        self.state.tick_count += 1;

        match self.poll().await {
            Ok(outcome) => {
                self.state.last_error = None;
                outcome
            }
            Err(e) => {
                let message = format!("{}{}", FAILURE_PREFIX, e);
                log::error!("{}", message);
                self.report_error(&message).await;
                TickOutcome::Failed(message)
            }
        }
    }

    async fn poll(&mut self) -> Result<TickOutcome> {
        let response = self.source.fetch(self.state.cursor).await?;
        let homeworks = validate_response(&response)?;
        let next_cursor = current_date(&response);

        let Some(latest) = homeworks.first() else {
            log::debug!("No homework updates since {}", self.state.cursor);
            self.advance_cursor(next_cursor);
            return Ok(TickOutcome::Empty);
        };

        let update = StatusUpdate::from_record(latest)?;

        if self
            .state
            .last_update
            .as_ref()
            .is_some_and(|last| last.same_state(&update))
        {
            log::debug!("Status of {} unchanged ({})", update.name, update.status);
            self.advance_cursor(next_cursor);
            return Ok(TickOutcome::Unchanged);
        }

        if !self.notifier.send(&update.message).await {
            log::warn!("Could not deliver status change for {}, will retry", update.name);
            return Ok(TickOutcome::DeliveryFailed);
        }

        log::info!("Status of {} changed to {}", update.name, update.status);
        self.advance_cursor(next_cursor);
        let message = update.message.clone();
        self.state.last_update = Some(update);
        Ok(TickOutcome::Notified(message))
    }

    fn advance_cursor(&mut self, next: Option<i64>) {
        if let Some(cursor) = next {
            self.state.cursor = cursor;
        }
    }

    async fn report_error(&mut self, message: &str) {
        if self.state.last_error.as_deref() == Some(message) {
            log::debug!("Error already reported, not resending");
            return;
        }
        if self.notifier.send(message).await {
            self.state.last_error = Some(message.to_string());
        }
    }
}
