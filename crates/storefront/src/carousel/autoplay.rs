//! Autoplay timer for the carousel.
//!
//! The timer is a two-state machine: running while it owns a background
//! tokio task, paused otherwise. The task sends a tick every period over a
//! channel created for that task alone, so stopping drops the channel and a
//! task that is still winding down can never deliver into a later run.
//! Starting always stops the previous task first, so two tasks never run at
//! once.

use std::time::Duration;

use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::{AutoplayState, Carousel};

/// Errors from the autoplay timer.
#[derive(Debug, Error)]
pub enum AutoplayError {
    /// `start` was called outside a tokio runtime.
    #[error("autoplay needs a tokio runtime: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}

/// A running tick task and the receiving end of its channel.
#[derive(Debug)]
struct Ticker {
    task: JoinHandle<()>,
    ticks: mpsc::UnboundedReceiver<()>,
}

/// Periodic tick source with a single owned task handle.
#[derive(Debug)]
pub struct AutoplayTimer {
    period: Duration,
    ticker: Option<Ticker>,
}

impl AutoplayTimer {
    /// A stopped timer that will tick every `period` once started.
    #[must_use]
    pub const fn new(period: Duration) -> Self {
        Self {
            period,
            ticker: None,
        }
    }

    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Whether a tick task is currently owned.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    #[must_use]
    pub const fn state(&self) -> AutoplayState {
        if self.is_running() {
            AutoplayState::Running
        } else {
            AutoplayState::Paused
        }
    }

    /// Start ticking. The first tick arrives one period from now.
    ///
    /// Any running task is stopped first.
    ///
    /// # Errors
    ///
    /// Returns `AutoplayError::NoRuntime` when called outside a tokio runtime.
    pub fn start(&mut self) -> Result<(), AutoplayError> {
        self.stop();
        let runtime = Handle::try_current()?;

        let (tx, ticks) = mpsc::unbounded_channel();
        let period = self.period;
        let first = Instant::now() + period;
        let task = runtime.spawn(async move {
            let mut interval = tokio::time::interval_at(first, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(()).is_err() {
                    break;
                }
            }
        });
        self.ticker = Some(Ticker { task, ticks });

        tracing::debug!(period_ms = period.as_millis(), "Autoplay started");
        Ok(())
    }

    /// Stop ticking. Ticks not yet received are dropped with the channel.
    pub fn stop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.task.abort();
            tracing::debug!("Autoplay stopped");
        }
    }

    /// Hover enter.
    pub fn pause(&mut self) {
        self.stop();
    }

    /// Hover leave. Restarts the period from now.
    ///
    /// # Errors
    ///
    /// Returns `AutoplayError::NoRuntime` when called outside a tokio runtime.
    pub fn resume(&mut self) -> Result<(), AutoplayError> {
        self.start()
    }

    /// Wait for the next tick.
    ///
    /// Never completes while the timer is stopped.
    pub async fn next_tick(&mut self) {
        let delivered = match self.ticker.as_mut() {
            Some(ticker) => ticker.ticks.recv().await.is_some(),
            None => false,
        };
        if !delivered {
            std::future::pending::<()>().await;
        }
    }

    /// Take one already delivered tick, if any.
    pub fn try_tick(&mut self) -> bool {
        self.ticker
            .as_mut()
            .is_some_and(|ticker| ticker.ticks.try_recv().is_ok())
    }
}

impl Drop for AutoplayTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// A carousel whose slides advance on every autoplay tick.
///
/// Pause and resume go through the single owned timer; manual navigation
/// through [`CarouselPlayer::carousel_mut`] works in either state.
#[derive(Debug)]
pub struct CarouselPlayer {
    carousel: Carousel,
    timer: AutoplayTimer,
}

impl CarouselPlayer {
    /// Start autoplay over `carousel`.
    ///
    /// # Errors
    ///
    /// Returns `AutoplayError::NoRuntime` when called outside a tokio runtime.
    pub fn start(carousel: Carousel, period: Duration) -> Result<Self, AutoplayError> {
        let mut timer = AutoplayTimer::new(period);
        timer.start()?;
        Ok(Self { carousel, timer })
    }

    #[must_use]
    pub const fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub const fn carousel_mut(&mut self) -> &mut Carousel {
        &mut self.carousel
    }

    #[must_use]
    pub const fn state(&self) -> AutoplayState {
        self.timer.state()
    }

    /// Hover enter.
    pub fn pause(&mut self) {
        self.timer.pause();
        tracing::debug!(index = self.carousel.index(), "Carousel paused");
    }

    /// Hover leave.
    ///
    /// # Errors
    ///
    /// Returns `AutoplayError::NoRuntime` when called outside a tokio runtime.
    pub fn resume(&mut self) -> Result<(), AutoplayError> {
        self.timer.resume()?;
        tracing::debug!(index = self.carousel.index(), "Carousel resumed");
        Ok(())
    }

    /// Wait for the next tick and advance one slide. Returns the new index.
    ///
    /// Never completes while paused.
    pub async fn advance(&mut self) -> usize {
        self.timer.next_tick().await;
        self.carousel.next();
        self.carousel.index()
    }

    /// Apply a tick that has already arrived, if any. Returns whether the
    /// slide changed.
    pub fn try_advance(&mut self) -> bool {
        if !self.timer.try_tick() {
            return false;
        }
        self.carousel.next();
        true
    }
}
