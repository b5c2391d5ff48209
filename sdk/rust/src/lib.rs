/// Deployment entrypoint annotation
pub use rensa_deployer_sdk_macros::deployer;

mod abi;
mod error;

pub use {
  abi::{abort, log, pack, set_panic_hook},
  error::ModuleError,
};

/// Exports a `schemas` function returning the given JSON document.
/// The host prints it when run with `--schemas`.
#[macro_export]
macro_rules! export_schemas {
  ($json:expr) => {
    #[no_mangle]
    pub extern "C" fn schemas() -> u64 {
      $crate::pack($json)
    }
  };
}
