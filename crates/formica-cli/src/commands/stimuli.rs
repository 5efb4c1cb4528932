//! List registered stimulus types.

use anyhow::Result;
use colored::Colorize;

use crate::config::Config;

pub fn run(config: &Config) -> Result<()> {
    let registry = config.registry()?;

    println!("{}", "Stimulus Types".white().bold());
    println!("{}", "═".repeat(56).dimmed());
    for kind in registry.iter() {
        let persistence = if kind.is_permanent() {
            "permanent".green()
        } else {
            format!("decay {:.3}/tick", kind.decay_factor()).as_str().normal()
        };
        println!(
            "  {:<32} {}  radius {}",
            kind.name().cyan(),
            persistence,
            kind.radius()
        );
    }
    println!("{}", "═".repeat(56).dimmed());
    println!("  {} registered", registry.len());

    Ok(())
}
