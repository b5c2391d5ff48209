mod address;
mod b58;
mod timestamp;

pub use {
  address::Address,
  b58::ToBase58String,
  timestamp::{ClockBeforeEpoch, Timestamp},
};
