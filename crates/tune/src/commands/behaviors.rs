//! List behaviors command

use anyhow::Result;
use clap::Parser;
use console::style;
use setup_core::BehaviorCatalog;

use super::content;
use crate::config::TuneConfig;

/// List the available behaviors
#[derive(Parser, Debug)]
pub struct Behaviors {
    /// Show every non-zero coefficient
    #[arg(short, long)]
    pub verbose: bool,
}

impl Behaviors {
    pub fn execute(self, config: &TuneConfig) -> Result<()> {
        let registry = content(config).load_behaviors()?;

        for id in registry.ids() {
            let Some(profile) = registry.get(&id) else {
                continue;
            };
            println!(
                "{} {}",
                style(&profile.id).cyan().bold(),
                style(&profile.name).dim()
            );
            if !profile.description.is_empty() {
                println!("    {}", profile.description);
            }
            if self.verbose {
                for (axis, value) in profile.coefficients.active() {
                    println!("    {:<14} {:+.2}", axis.as_ref(), value);
                }
            }
        }
        Ok(())
    }
}
