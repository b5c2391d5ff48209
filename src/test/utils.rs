use {
  crate::{
    deployer::Deployer,
    primitives::{Address, Timestamp},
    vm::DeployError,
  },
  async_trait::async_trait,
  std::{sync::Mutex, time::Duration},
};

/// Returns `0xABC123` from `deploy_contract`, a zero length value
/// from `empty` and a JSON document from `schemas`.
pub const STATIC_ADDRESS_MODULE: &str = r##"
(module
  (memory (export "memory") 1)
  (data (i32.const 16) "0xABC123")
  (data (i32.const 64) "{\"contracts\":[]}")
  (func (export "deploy_contract") (param i64) (result i64)
    i64.const 68719476744)
  (func (export "empty") (param i64) (result i64)
    i64.const 68719476736)
  (func (export "schemas") (result i64)
    i64.const 274877906960))
"##;

/// Stores the timestamp little endian at offset 0 and returns
/// those 8 bytes as the address.
pub const ECHO_TIMESTAMP_MODULE: &str = r#"
(module
  (memory (export "memory") 1)
  (func (export "deploy_contract") (param $ts i64) (result i64)
    (i64.store (i32.const 0) (local.get $ts))
    i64.const 8))
"#;

pub const LOGGING_MODULE: &str = r#"
(module
  (import "env" "log" (func $log (param i32 i32)))
  (memory (export "memory") 1)
  (data (i32.const 0) "deploying")
  (data (i32.const 16) "0xABC123")
  (func (export "deploy_contract") (param i64) (result i64)
    (call $log (i32.const 0) (i32.const 9))
    i64.const 68719476744))
"#;

pub const TRAPPING_MODULE: &str = r#"
(module
  (memory (export "memory") 1)
  (func (export "deploy_contract") (param i64) (result i64)
    unreachable))
"#;

/// Aborts with a borsh encoded `ModuleError::Rejected("nope")`.
pub const ABORTING_MODULE: &str = r#"
(module
  (import "env" "abort" (func $abort (param i64)))
  (memory (export "memory") 1)
  (data (i32.const 32) "\02\04\00\00\00nope")
  (func (export "deploy_contract") (param i64) (result i64)
    (call $abort (i64.const 137438953481))
    i64.const 0))
"#;

pub const NO_ENTRYPOINT_MODULE: &str = r#"
(module
  (memory (export "memory") 1)
  (func (export "other") (param i64) (result i64)
    i64.const 0))
"#;

/// Imports host functions but never exports its memory.
pub const MEMORYLESS_MODULE: &str = r#"
(module
  (import "env" "log" (func $log (param i32 i32)))
  (memory 1)
  (func (export "deploy_contract") (param i64) (result i64)
    i64.const 0))
"#;

/// Points 16 bytes starting 6 bytes before the end of a single page,
/// both for the address and the schemas document.
pub const OUT_OF_BOUNDS_MODULE: &str = r#"
(module
  (memory (export "memory") 1)
  (func (export "deploy_contract") (param i64) (result i64)
    i64.const 281449206906896)
  (func (export "schemas") (result i64)
    i64.const 281449206906896))
"#;

/// Never returns from the entrypoint.
pub const LOOPING_MODULE: &str = r#"
(module
  (memory (export "memory") 1)
  (func (export "deploy_contract") (param i64) (result i64)
    (loop $spin
      (br $spin))
    i64.const 0))
"#;

/// A deployer that records every call and resolves with a
/// preconfigured outcome, optionally after a delay.
pub struct RecordingDeployer {
  calls: Mutex<Vec<Timestamp>>,
  outcome: Result<Address, String>,
  delay: Option<Duration>,
}

impl RecordingDeployer {
  pub fn resolving(address: impl Into<Address>) -> Self {
    Self {
      calls: Mutex::new(vec![]),
      outcome: Ok(address.into()),
      delay: None,
    }
  }

  pub fn rejecting(reason: &str) -> Self {
    Self {
      calls: Mutex::new(vec![]),
      outcome: Err(reason.to_owned()),
      delay: None,
    }
  }

  pub fn delayed(mut self, delay: Duration) -> Self {
    self.delay = Some(delay);
    self
  }

  pub fn calls(&self) -> Vec<Timestamp> {
    self.calls.lock().unwrap().clone()
  }
}

#[async_trait]
impl Deployer for RecordingDeployer {
  async fn deploy_contract(
    &self,
    timestamp: Timestamp,
  ) -> Result<Address, DeployError> {
    self.calls.lock().unwrap().push(timestamp);
    if let Some(delay) = self.delay {
      tokio::time::sleep(delay).await;
    }
    self.outcome.clone().map_err(DeployError::Trap)
  }
}
