//! Deployment entrypoint
//!
//! The trigger depends on a single asynchronous operation: given a
//! timestamp, deploy a contract and resolve with its address. Wasm
//! modules are the production implementation of that operation.

use {
  crate::{
    primitives::{Address, Timestamp},
    vm::{DeployError, Limits, Runtime},
  },
  async_trait::async_trait,
  std::path::Path,
  tracing::{debug, info},
};

/// Name under which deployer modules export their entrypoint
/// unless configured otherwise.
pub const DEFAULT_ENTRYPOINT: &str = "deploy_contract";

#[async_trait]
pub trait Deployer: Send + Sync {
  async fn deploy_contract(
    &self,
    timestamp: Timestamp,
  ) -> Result<Address, DeployError>;
}

/// Runs the deployment entrypoint exported by a compiled wasm module.
///
/// Wasm execution is synchronous and may take arbitrarily long, so
/// each call runs on the blocking thread pool and the async caller
/// only awaits its completion.
#[derive(Clone)]
pub struct WasmDeployer {
  runtime: Runtime,
  entrypoint: String,
}

impl WasmDeployer {
  pub fn new(runtime: Runtime) -> Self {
    Self {
      runtime,
      entrypoint: DEFAULT_ENTRYPOINT.to_owned(),
    }
  }

  /// Reads and compiles the module stored at `path`.
  pub async fn load(
    path: impl AsRef<Path>,
    limits: Limits,
  ) -> Result<Self, DeployError> {
    let path = path.as_ref();
    let bytecode = tokio::fs::read(path).await?;
    info!("loaded module {} ({} bytes)", path.display(), bytecode.len());

    let runtime = tokio::task::spawn_blocking(move || Runtime::new(&bytecode))
      .await
      .map_err(|e| DeployError::Worker(e.to_string()))??;

    Ok(Self::new(runtime.with_limits(limits)))
  }

  pub fn with_entrypoint(mut self, entrypoint: impl Into<String>) -> Self {
    self.entrypoint = entrypoint.into();
    self
  }

  pub fn entrypoint(&self) -> &str {
    &self.entrypoint
  }

  /// The JSON document the module publishes through its
  /// optional `schemas` export.
  pub async fn schemas(&self) -> Result<Option<String>, DeployError> {
    let runtime = self.runtime.clone();
    tokio::task::spawn_blocking(move || runtime.schemas())
      .await
      .map_err(|e| DeployError::Worker(e.to_string()))?
  }
}

#[async_trait]
impl Deployer for WasmDeployer {
  async fn deploy_contract(
    &self,
    timestamp: Timestamp,
  ) -> Result<Address, DeployError> {
    debug!("calling {}({timestamp})", self.entrypoint);
    let runtime = self.runtime.clone();
    let entrypoint = self.entrypoint.clone();
    tokio::task::spawn_blocking(move || runtime.invoke(&entrypoint, timestamp))
      .await
      .map_err(|e| DeployError::Worker(e.to_string()))?
  }
}
