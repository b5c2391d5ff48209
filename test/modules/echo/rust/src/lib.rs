//! Minimal deployer module.
//!
//! Build with `cargo build --release --target wasm32-unknown-unknown`
//! and run the result with `rensa-deployer <path to wasm>`.

use rensa_deployer_sdk::{deployer, export_schemas, log, ModuleError};

export_schemas!(include_str!("../schemas.json"));

#[deployer]
fn deploy(timestamp: u64) -> Result<String, ModuleError> {
  log(&format!("deploying at {timestamp}"));

  if timestamp == 0 {
    return Err(ModuleError::InvalidTimestamp);
  }

  Ok(format!("0x{timestamp:X}"))
}

#[cfg(test)]
mod test {
  use {super::deploy, rensa_deployer_sdk::ModuleError};

  #[test]
  fn formats_timestamp_as_hex() {
    assert_eq!(deploy(1_700_000_000_000).unwrap(), "0x18BCFE56800");
  }

  #[test]
  fn zero_is_rejected() {
    assert_eq!(deploy(0), Err(ModuleError::InvalidTimestamp));
  }
}
