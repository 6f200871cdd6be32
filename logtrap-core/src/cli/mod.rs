pub mod conf;
mod run;

#[cfg(test)]
mod tests;

pub use conf::ConfigCmd;
pub use run::{LogFormat, RunArgs};
