use {
  crate::{deployer::DEFAULT_ENTRYPOINT, vm::Limits},
  serde::{Deserialize, Serialize},
  std::{
    path::{Path, PathBuf},
    time::Duration,
  },
};

/// Settings of a deployment run.
///
/// Every field has a default, so a config file only needs to
/// carry the values it wants to change. Command line flags are
/// applied on top of the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
  /// Name of the exported deployment entrypoint.
  pub entrypoint: String,

  /// Upper bound on the wait for the entrypoint to resolve.
  /// Unbounded when absent.
  #[serde(with = "humantime_serde")]
  pub timeout: Option<Duration>,

  #[serde(flatten)]
  pub limits: Limits,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      entrypoint: DEFAULT_ENTRYPOINT.to_owned(),
      timeout: None,
      limits: Limits::default(),
    }
  }
}

impl Config {
  /// Reads a JSON serialized config from disk.
  pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
    let json = std::fs::read_to_string(expand_path(path)?)?;
    serde_json::from_str(&json).map_err(std::io::Error::from)
  }
}

/// Expands `~` and environment variables in user provided paths.
pub fn expand_path(path: &Path) -> Result<PathBuf, std::io::Error> {
  let raw = path.to_str().ok_or_else(|| {
    std::io::Error::new(
      std::io::ErrorKind::InvalidInput,
      format!("non UTF-8 path: {}", path.display()),
    )
  })?;
  Ok(
    shellexpand::full(raw)
      .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?
      .to_string()
      .into(),
  )
}
