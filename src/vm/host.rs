//! Host functions
//!
//! Imports made available to deployer modules under the `env`
//! namespace, and helpers for reading the module linear memory.

use {
  super::ModuleError,
  borsh::BorshDeserialize,
  std::cell::Cell,
  tracing::{info, warn},
  wasmer::{
    imports,
    Function,
    HostEnvInitError,
    ImportObject,
    Instance,
    LazyInit,
    Memory,
    RuntimeError,
    Store,
    WasmerEnv,
  },
};

/// Per-instance state shared by all host functions. The memory
/// handle is populated by wasmer once the instance is created.
#[derive(Clone)]
pub struct HostEnv {
  memory: LazyInit<Memory>,
}

impl HostEnv {
  fn memory(&self) -> Option<&Memory> {
    self.memory.get_ref()
  }
}

impl WasmerEnv for HostEnv {
  fn init_with_instance(
    &mut self,
    instance: &Instance,
  ) -> Result<(), HostEnvInitError> {
    let memory = instance.exports.get_memory("memory")?;
    self.memory.initialize(memory.clone());
    Ok(())
  }
}

impl Default for HostEnv {
  fn default() -> Self {
    Self {
      memory: LazyInit::new(),
    }
  }
}

/// Splits a `(ptr << 32) | len` value returned across the ABI.
pub fn unpack(packed: u64) -> (u32, u32) {
  ((packed >> 32) as u32, packed as u32)
}

/// Copies `len` bytes starting at `ptr` out of the module memory.
/// Returns None if the range is not fully inside the memory.
pub fn read_bytes(memory: &Memory, ptr: u32, len: u32) -> Option<Vec<u8>> {
  let start = ptr as usize;
  let end = start.checked_add(len as usize)?;
  let view = memory.view::<u8>();
  if end > view.len() {
    return None;
  }
  Some(view[start..end].iter().map(Cell::get).collect())
}

pub fn imports(store: &Store, env: HostEnv) -> ImportObject {
  imports! {
    "env" => {
      "log" => Function::new_native_with_env(store, env.clone(), log),
      "abort" => Function::new_native_with_env(store, env, abort),
    }
  }
}

fn log(env: &HostEnv, ptr: u32, len: u32) {
  match env.memory().and_then(|m| read_bytes(m, ptr, len)) {
    Some(bytes) => {
      info!(target: "module", "{}", String::from_utf8_lossy(&bytes))
    }
    None => warn!("module log message at {ptr}+{len} is out of bounds"),
  }
}

/// Never returns Ok. The error unwinds the wasm stack and surfaces
/// from the entrypoint call as a user error carrying a [`ModuleError`].
fn abort(env: &HostEnv, packed: u64) -> Result<(), RuntimeError> {
  let (ptr, len) = unpack(packed);
  let error = match env.memory().and_then(|m| read_bytes(m, ptr, len)) {
    Some(bytes) => ModuleError::try_from_slice(&bytes).unwrap_or_else(|e| {
      ModuleError::Other(format!("malformed abort payload: {e}"))
    }),
    None => {
      ModuleError::Other(format!("abort payload at {ptr}+{len} out of bounds"))
    }
  };

  Err(RuntimeError::user(Box::new(error)))
}
