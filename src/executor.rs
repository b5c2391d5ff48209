//! Process-level async executor.
//!
//! Wasm entrypoints run on tokio's blocking pool and cannot be
//! interrupted once started. A timed-out deployment leaves its worker
//! thread behind, so the runtime is shut down without waiting for
//! blocking tasks once the driven future completes.

use {std::future::Future, tokio::runtime::Builder};

/// Runs `future` to completion on a fresh multi-threaded runtime and
/// tears the runtime down without joining outstanding blocking work.
pub fn block_on<F: Future>(future: F) -> std::io::Result<F::Output> {
  let runtime = Builder::new_multi_thread().enable_all().build()?;
  let output = runtime.block_on(future);
  runtime.shutdown_background();
  Ok(output)
}

#[cfg(test)]
mod test {
  use {
    super::block_on,
    crate::{
      clock::FixedClock,
      deployer::WasmDeployer,
      test::utils::LOOPING_MODULE,
      trigger::{Trigger, TriggerError},
      vm::{DeployError, Runtime},
    },
    anyhow::Result,
    chrono::{TimeZone, Utc},
    std::time::{Duration, Instant},
  };

  #[test]
  fn runs_future_to_completion() -> Result<()> {
    assert_eq!(block_on(async { 40 + 2 })?, 42);
    Ok(())
  }

  #[test]
  fn returns_while_blocking_work_is_still_running() -> Result<()> {
    let started = Instant::now();
    block_on(async {
      tokio::task::spawn_blocking(|| {
        std::thread::sleep(Duration::from_secs(30))
      });
    })?;
    assert!(started.elapsed() < Duration::from_secs(5));
    Ok(())
  }

  #[test]
  fn spinning_module_times_out_and_runtime_shuts_down() -> Result<()> {
    let deployer = WasmDeployer::new(Runtime::new(LOOPING_MODULE.as_bytes())?);
    let clock = FixedClock(Utc.timestamp_millis_opt(1).unwrap());
    let timeout = Duration::from_millis(50);
    let trigger = Trigger::new(clock, deployer).with_timeout(Some(timeout));

    let started = Instant::now();
    let mut out = Vec::new();
    let result = block_on(trigger.run(&mut out))?;

    assert!(matches!(
      result,
      Err(TriggerError::Deploy(DeployError::Timeout(t))) if t == timeout
    ));
    assert!(!String::from_utf8(out)?.contains("contract address"));
    assert!(started.elapsed() < Duration::from_secs(5));
    Ok(())
  }
}
