use borsh::{BorshDeserialize, BorshSerialize};

/// Reasons a deployer module can give for not producing an address.
///
/// Variant order is part of the ABI, the host decodes the same
/// borsh layout.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum ModuleError {
  InvalidTimestamp,
  Unavailable(String),
  Rejected(String),
  Other(String),
}
