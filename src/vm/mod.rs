mod error;
mod host;
mod runtime;

pub use {
  error::{DeployError, ModuleError},
  runtime::{Limits, Runtime, SCHEMAS_EXPORT},
};
