//! Wall-clock sources
//!
//! The trigger reads the time exactly once per run. Reading it
//! through this trait lets runs be pinned to a fixed instant.

use chrono::{DateTime, Utc};

pub trait Clock: Send + Sync {
  fn now(&self) -> DateTime<Utc>;
}

/// Reads the operating system wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
  fn now(&self) -> DateTime<Utc> {
    self.0
  }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
  fn now(&self) -> DateTime<Utc> {
    (**self).now()
  }
}
