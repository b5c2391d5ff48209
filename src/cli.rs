use {
  chrono::{DateTime, Utc},
  clap::Parser,
  rensa_deployer::{
    clock::{Clock, FixedClock, SystemClock},
    config::{expand_path, Config},
  },
  std::{path::PathBuf, time::Duration},
};

#[derive(Debug, Parser)]
#[clap(version, about)]
pub struct CliOpts {
  #[clap(parse(from_os_str), help = "path to the deployer wasm module")]
  module: PathBuf,

  #[clap(short, long, parse(from_os_str), help = "path to a JSON config file")]
  config: Option<PathBuf>,

  #[clap(short, long, help = "name of the exported deployment entrypoint")]
  entrypoint: Option<String>,

  #[clap(
    short,
    long,
    help = "seconds to wait for the deployment before giving up"
  )]
  timeout: Option<u64>,

  #[clap(
    long,
    help = "deploy as if the current time was this RFC 3339 instant"
  )]
  at: Option<DateTime<Utc>>,

  #[clap(
    long,
    help = "print the contract schemas published by the module and exit"
  )]
  pub schemas: bool,

  #[clap(
    short,
    long,
    parse(from_occurrences),
    help = "Use verbose output (-vv very verbose output)"
  )]
  pub verbose: u64,
}

impl CliOpts {
  /// The module path with `~` and environment variables expanded.
  pub fn module(&self) -> Result<PathBuf, std::io::Error> {
    expand_path(&self.module)
  }

  /// Reads the config file if one was given, otherwise starts from
  /// the defaults, then applies any values set on the command line.
  pub fn config(&self) -> Result<Config, std::io::Error> {
    let mut config = match self.config {
      Some(ref path) => Config::from_file(path)?,
      None => Config::default(),
    };

    if let Some(ref entrypoint) = self.entrypoint {
      config.entrypoint = entrypoint.clone();
    }

    if let Some(secs) = self.timeout {
      config.timeout = Some(Duration::from_secs(secs));
    }

    Ok(config)
  }

  /// The time source used for the deployment timestamp.
  pub fn clock(&self) -> Box<dyn Clock> {
    match self.at {
      Some(instant) => Box::new(FixedClock(instant)),
      None => Box::new(SystemClock),
    }
  }
}

#[cfg(test)]
mod test {
  use {
    super::CliOpts,
    clap::Parser,
    rensa_deployer::clock::Clock,
    std::{path::PathBuf, time::Duration},
  };

  #[test]
  fn defaults() {
    let opts = CliOpts::try_parse_from(["rensa-deployer", "module.wasm"])
      .unwrap();
    let config = opts.config().unwrap();
    assert_eq!(opts.module().unwrap(), PathBuf::from("module.wasm"));
    assert_eq!(config.entrypoint, "deploy_contract");
    assert_eq!(config.timeout, None);
    assert!(!opts.schemas);
    assert_eq!(opts.verbose, 0);
  }

  #[test]
  fn flags_override_config() {
    let path = std::env::temp_dir()
      .join(format!("rensa-deployer-cli-{}.json", std::process::id()));
    std::fs::write(&path, r#"{"entrypoint": "deploy", "timeout": "5s"}"#)
      .unwrap();

    let opts = CliOpts::try_parse_from([
      "rensa-deployer",
      "module.wasm",
      "--config",
      path.to_str().unwrap(),
      "-t",
      "60",
      "-vv",
    ])
    .unwrap();
    let config = opts.config();
    std::fs::remove_file(&path).unwrap();

    let config = config.unwrap();
    assert_eq!(config.entrypoint, "deploy");
    assert_eq!(config.timeout, Some(Duration::from_secs(60)));
    assert_eq!(opts.verbose, 2);
  }

  #[test]
  fn fixed_instant() {
    let opts = CliOpts::try_parse_from([
      "rensa-deployer",
      "module.wasm",
      "--at",
      "2023-11-14T22:13:20Z",
    ])
    .unwrap();
    assert_eq!(opts.clock().now().timestamp_millis(), 1_700_000_000_000);
  }

  #[test]
  fn module_is_required() {
    assert!(CliOpts::try_parse_from(["rensa-deployer"]).is_err());
  }
}
