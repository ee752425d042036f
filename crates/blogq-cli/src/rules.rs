//! # Rules Subcommand
//!
//! `blogq rules` — list the semantic rules in the order they report.

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;

use blogq_core::{RuleMetadata, RuleRegistry};

/// Arguments for the `blogq rules` subcommand.
#[derive(Args, Debug)]
pub struct RulesArgs {}

/// Write `id: description` for each rule.
pub fn render_rules<W: Write>(rules: &[RuleMetadata], out: &mut W) -> io::Result<()> {
    for rule in rules {
        writeln!(out, "{}: {}", rule.id, rule.description)?;
    }
    Ok(())
}

/// Execute the rules subcommand.
pub fn run_rules(_args: &RulesArgs) -> Result<u8> {
    let rules = RuleRegistry::default_rules().rule_metadata();
    let stdout = io::stdout();
    render_rules(&rules, &mut stdout.lock())?;
    Ok(0)
}
