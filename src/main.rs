mod cli;

use {
  clap::Parser,
  cli::CliOpts,
  rensa_deployer::{
    config::Config,
    deployer::WasmDeployer,
    executor,
    trigger::Trigger,
  },
  tracing::{debug, info, Level},
  tracing_subscriber::EnvFilter,
};

fn main() -> anyhow::Result<()> {
  let opts = CliOpts::parse();

  // RUST_LOG takes precedence over -v when set
  let level = match opts.verbose {
    1 => Level::DEBUG,
    2 => Level::TRACE,
    _ => Level::INFO,
  };
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str())),
    )
    .with_writer(std::io::stderr)
    .init();

  info!("Starting Rensa deployer");
  info!("Version: {}", env!("CARGO_PKG_VERSION"));

  let config = opts.config()?;
  debug!("Config: {config:#?}");

  // a timed-out entrypoint keeps its blocking worker busy,
  // the executor does not wait for it on the way out.
  executor::block_on(run(opts, config))?
}

async fn run(opts: CliOpts, config: Config) -> anyhow::Result<()> {
  let deployer = WasmDeployer::load(opts.module()?, config.limits)
    .await?
    .with_entrypoint(config.entrypoint.clone());

  if opts.schemas {
    match deployer.schemas().await? {
      Some(schemas) => println!("{schemas}"),
      None => anyhow::bail!("module does not export contract schemas"),
    }
    return Ok(());
  }

  Trigger::new(opts.clock(), deployer)
    .with_timeout(config.timeout)
    .run(&mut std::io::stdout())
    .await?;

  Ok(())
}
