use crate::cli::run;

pub mod catalog;
pub mod cli;
mod config;
pub mod domain;

fn main() -> anyhow::Result<()> {
    run()
}
