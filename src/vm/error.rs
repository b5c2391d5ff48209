use {
  borsh::{BorshDeserialize, BorshSerialize},
  std::time::Duration,
  thiserror::Error,
  wasmer::RuntimeError,
};

/// Errors a deployer module reports about itself through the `abort`
/// import. The encoding is shared with the guest SDK.
#[derive(
  Debug, Clone, PartialEq, Eq, Error, BorshSerialize, BorshDeserialize,
)]
pub enum ModuleError {
  #[error("Invalid deployment timestamp")]
  InvalidTimestamp,

  #[error("Deployment target unavailable: {0}")]
  Unavailable(String),

  #[error("Deployment rejected: {0}")]
  Rejected(String),

  #[error("{0}")]
  Other(String),
}

#[derive(Debug, Error)]
pub enum DeployError {
  #[error("Failed to read module: {0}")]
  ModuleIo(#[from] std::io::Error),

  #[error("Invalid wasm module: {0}")]
  Compile(String),

  #[error("Module instantiation failed: {0}")]
  Instantiation(String),

  #[error("Missing or mistyped module export: {0}")]
  MissingExport(String),

  #[error("Module trapped: {0}")]
  Trap(String),

  #[error("Module aborted: {0}")]
  Aborted(ModuleError),

  #[error("Invalid address returned by module: {0}")]
  InvalidAddress(String),

  #[error("Invalid schemas document returned by module: {0}")]
  InvalidSchemas(String),

  #[error("Deployment did not complete within {0:?}")]
  Timeout(Duration),

  #[error("Deployment worker failed: {0}")]
  Worker(String),
}

/// Errors raised by the `abort` host function travel through the
/// wasm trap as user errors, everything else is a genuine trap.
impl From<RuntimeError> for DeployError {
  fn from(error: RuntimeError) -> Self {
    match error.downcast::<ModuleError>() {
      Ok(aborted) => DeployError::Aborted(aborted),
      Err(trap) => DeployError::Trap(trap.message()),
    }
  }
}
