use {
  chrono::{DateTime, TimeZone, Utc},
  serde::{Deserialize, Serialize},
  std::fmt::{Debug, Display, Formatter},
  thiserror::Error,
};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Clock reading {0}ms is before the Unix epoch")]
pub struct ClockBeforeEpoch(pub i64);

/// Milliseconds since the Unix epoch, widened to 64 bits.
///
/// This is the only argument passed to the deployment entrypoint
/// of a module. It is produced once per invocation from a clock
/// reading and passed by value.
#[derive(
  Copy,
  Clone,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
  pub const fn from_millis(millis: u64) -> Self {
    Self(millis)
  }

  pub const fn as_millis(&self) -> u64 {
    self.0
  }

  /// The instant this timestamp refers to, if it is representable
  /// as a calendar date.
  pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
    let millis = i64::try_from(self.0).ok()?;
    Utc.timestamp_millis_opt(millis).single()
  }
}

impl TryFrom<DateTime<Utc>> for Timestamp {
  type Error = ClockBeforeEpoch;

  fn try_from(value: DateTime<Utc>) -> Result<Self, Self::Error> {
    let millis = value.timestamp_millis();
    u64::try_from(millis)
      .map(Self)
      .map_err(|_| ClockBeforeEpoch(millis))
  }
}

impl From<Timestamp> for u64 {
  fn from(ts: Timestamp) -> Self {
    ts.0
  }
}

impl Display for Timestamp {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl Debug for Timestamp {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self.to_datetime() {
      Some(dt) => write!(f, "Timestamp({}, {})", self.0, dt.to_rfc3339()),
      None => write!(f, "Timestamp({})", self.0),
    }
  }
}
