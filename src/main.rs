//! A tool to look up ships by IMO number and derive compliance metrics.
//!
//! # Overview
//!
//! `fueleu-audit` resolves a ship record from a fleet data source, normalizes
//! the raw record, and derives an emissions compliance assessment for it. Two
//! record shapes are supported: registry records, which describe a ship's
//! particulars and annual fuel consumption, and voyage aggregates, which carry
//! a precomputed compliance flag and residual statistics.
//!
//! # Quick Start
//!
//! Look up a ship in the embedded demo fleet:
//!
//! ```bash
//! fueleu-audit lookup 9876543
//! ```
//!
//! This displays a color-coded console report with the ship's particulars and
//! its derived compliance metrics.
//!
//! # Basic Usage
//!
//! **Look up against a fleet file instead of the demo fleet:**
//! ```bash
//! fueleu-audit lookup 9876543 --fleet fleet.json
//! ```
//!
//! **Emit the resolved record and metrics as JSON:**
//! ```bash
//! fueleu-audit lookup 9876543 --json
//! ```
//!
//! Exit codes:
//! - `0`: Ship found and assessed
//! - `1`: Ship not found in the fleet data source
//!
//! # Configuration
//!
//! Assessment constants (emission factors, intensity baseline and surcharges,
//! compliance target, penalty rate) come from a configuration file. All fields
//! are optional; unspecified fields use the embedded defaults.
//!
//! **Specify a config file:**
//! ```bash
//! fueleu-audit lookup 9876543 --config audit.toml
//! ```
//!
//! **Default search locations:**
//! - `audit.toml`
//! - `audit.yml`
//! - `audit.yaml`
//! - `audit.json`
//!
//! **Generate a default config:**
//! ```bash
//! fueleu-audit init audit.yml
//! ```
//!
//! **Validate a config without running a lookup:**
//! ```bash
//! fueleu-audit validate --config audit.toml
//! ```
//!
//! ## Example Configuration
//!
//! ```toml
//! default_emission_factor = 3.1
//! base_intensity = 90.0
//! target_intensity = 89.3
//! penalty_rate = 2400.0
//!
//! [emission_factors]
//! HFO = 3.114
//! MGO = 3.206
//! VLSFO = 3.151
//!
//! [intensity_surcharges]
//! HFO = 10.0
//! ```
//!
//! Validation warnings (⚠️) indicate non-sensical values but don't prevent
//! execution.

use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};
use fueleu_audit::Result;

mod commands;

use crate::commands::{InitArgs, LookupArgs, ValidateArgs, init_config, lookup_ship, validate_config};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "fueleu-audit", version, about)]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: AuditSubcommand,
}

#[derive(Subcommand, Debug)]
enum AuditSubcommand {
    /// Look up a ship by IMO number and report its compliance metrics
    Lookup(LookupArgs),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        AuditSubcommand::Lookup(lookup_args) => lookup_ship(lookup_args),
        AuditSubcommand::Init(init_args) => init_config(init_args),
        AuditSubcommand::Validate(validate_args) => validate_config(validate_args),
    }
}
