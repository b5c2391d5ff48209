pub mod clock;
pub mod config;
pub mod deployer;
pub mod executor;
pub mod primitives;
pub mod trigger;
pub mod vm;

#[cfg(test)]
pub mod test;
