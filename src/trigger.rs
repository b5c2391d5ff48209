//! Deployment trigger
//!
//! Reads the clock once, announces the timestamp, invokes the
//! deployment entrypoint exactly once and reports the address
//! it resolves with. The address line is only ever written after
//! the entrypoint has resolved successfully.

use {
  crate::{
    clock::Clock,
    deployer::Deployer,
    primitives::{Address, ClockBeforeEpoch, Timestamp},
    vm::DeployError,
  },
  std::{io::Write, time::Duration},
  thiserror::Error,
  tracing::{error, info},
};

#[derive(Debug, Error)]
pub enum TriggerError {
  #[error(transparent)]
  Clock(#[from] ClockBeforeEpoch),

  #[error("Deployment failed: {0}")]
  Deploy(#[from] DeployError),

  #[error("Failed to write report: {0}")]
  Report(#[from] std::io::Error),
}

pub struct Trigger<C: Clock, D: Deployer> {
  clock: C,
  deployer: D,
  timeout: Option<Duration>,
}

impl<C: Clock, D: Deployer> Trigger<C, D> {
  pub fn new(clock: C, deployer: D) -> Self {
    Self {
      clock,
      deployer,
      timeout: None,
    }
  }

  /// Bounds the wait for the deployment entrypoint.
  pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
    self.timeout = timeout;
    self
  }

  pub fn deployer(&self) -> &D {
    &self.deployer
  }

  /// Runs one deployment and writes the human readable report to `out`.
  pub async fn run(
    &self,
    out: &mut impl Write,
  ) -> Result<Address, TriggerError> {
    let timestamp = Timestamp::try_from(self.clock.now())?;

    writeln!(out, "Deploying with timestamp:")?;
    writeln!(out, "{timestamp}")?;
    out.flush()?;

    info!("deploying with timestamp {timestamp:?}");

    let address = match self.deploy(timestamp).await {
      Ok(address) => address,
      Err(e) => {
        error!("deployment with timestamp {timestamp} failed: {e}");
        return Err(e.into());
      }
    };

    info!("contract deployed at {address}");
    writeln!(out, "contract address: {address}")?;
    out.flush()?;

    Ok(address)
  }

  async fn deploy(&self, timestamp: Timestamp) -> Result<Address, DeployError> {
    let call = self.deployer.deploy_contract(timestamp);
    match self.timeout {
      Some(timeout) => tokio::time::timeout(timeout, call)
        .await
        .map_err(|_| DeployError::Timeout(timeout))?,
      None => call.await,
    }
  }
}
