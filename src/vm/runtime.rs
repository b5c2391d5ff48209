use {
  super::{
    host::{self, HostEnv},
    DeployError,
  },
  crate::primitives::{Address, Timestamp},
  serde::{Deserialize, Serialize},
  tracing::{debug, trace},
  wasmer::{Cranelift, Instance, Memory, Module, Store, Universal},
};

/// Name of the optional export that describes the contracts
/// a deployer module knows how to deploy.
pub const SCHEMAS_EXPORT: &str = "schemas";

/// Host side bounds on values read back from a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Limits {
  /// Largest address, in bytes, accepted from an entrypoint.
  pub max_address_len: usize,

  /// Largest schemas document, in bytes.
  pub max_schemas_len: usize,
}

impl Default for Limits {
  fn default() -> Self {
    Self {
      max_address_len: 1024,
      max_schemas_len: 1024 * 1024,
    }
  }
}

/// This type represents a compiled deployer module.
///
/// Compilation happens once. Every invocation gets its own
/// instance that lives only as long as the call.
#[derive(Clone)]
pub struct Runtime {
  module: Module,
  limits: Limits,
}

impl Runtime {
  pub fn new(bytecode: &[u8]) -> Result<Self, DeployError> {
    let compiler = Cranelift::default();
    let store = Store::new(&Universal::new(compiler).engine());
    let module = Module::new(&store, bytecode)
      .map_err(|e| DeployError::Compile(e.to_string()))?;

    debug!(
      "compiled module {} with exports: {:?}",
      module.name().unwrap_or("<unnamed>"),
      module.exports().map(|e| e.name().to_owned()).collect::<Vec<_>>()
    );

    Ok(Self {
      module,
      limits: Limits::default(),
    })
  }

  pub fn with_limits(mut self, limits: Limits) -> Self {
    self.limits = limits;
    self
  }

  /// Calls `entrypoint(timestamp)` on a fresh instance of the module
  /// and returns the address it points at.
  pub fn invoke(
    &self,
    entrypoint: &str,
    timestamp: Timestamp,
  ) -> Result<Address, DeployError> {
    let instance = self.instantiate()?;
    let memory = exported_memory(&instance)?;
    let function = instance
      .exports
      .get_native_function::<u64, u64>(entrypoint)
      .map_err(|e| DeployError::MissingExport(format!("{entrypoint}: {e}")))?;

    trace!("invoking {entrypoint}({timestamp})");
    let packed = function.call(timestamp.into())?;
    let (ptr, len) = host::unpack(packed);
    trace!("{entrypoint} returned {len} bytes at {ptr}");

    if len == 0 {
      return Err(DeployError::InvalidAddress("empty value".to_owned()));
    }

    if len as usize > self.limits.max_address_len {
      return Err(DeployError::InvalidAddress(format!(
        "{len} bytes exceeds the limit of {}",
        self.limits.max_address_len
      )));
    }

    host::read_bytes(memory, ptr, len)
      .map(Address::new)
      .ok_or_else(|| {
        DeployError::InvalidAddress(format!(
          "range {ptr}+{len} is outside of module memory"
        ))
      })
  }

  /// Reads the JSON document returned by the optional `schemas` export.
  /// Returns None if the module does not export it.
  pub fn schemas(&self) -> Result<Option<String>, DeployError> {
    if !self.module.exports().any(|e| e.name() == SCHEMAS_EXPORT) {
      return Ok(None);
    }

    let instance = self.instantiate()?;
    let memory = exported_memory(&instance)?;
    let function = instance
      .exports
      .get_native_function::<(), u64>(SCHEMAS_EXPORT)
      .map_err(|e| {
        DeployError::MissingExport(format!("{SCHEMAS_EXPORT}: {e}"))
      })?;

    let (ptr, len) = host::unpack(function.call()?);
    if len as usize > self.limits.max_schemas_len {
      return Err(DeployError::InvalidSchemas(format!(
        "{len} bytes exceeds the limit of {}",
        self.limits.max_schemas_len
      )));
    }

    let bytes = host::read_bytes(memory, ptr, len).ok_or_else(|| {
      DeployError::InvalidSchemas(format!(
        "range {ptr}+{len} is outside of module memory"
      ))
    })?;

    String::from_utf8(bytes)
      .map(Some)
      .map_err(|e| DeployError::InvalidSchemas(e.to_string()))
  }

  fn instantiate(&self) -> Result<Instance, DeployError> {
    let imports = host::imports(self.module.store(), HostEnv::default());
    Instance::new(&self.module, &imports)
      .map_err(|e| DeployError::Instantiation(e.to_string()))
  }
}

fn exported_memory(instance: &Instance) -> Result<&Memory, DeployError> {
  instance
    .exports
    .get_memory("memory")
    .map_err(|e| DeployError::MissingExport(format!("memory: {e}")))
}
