//! Missive library exports for testing

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod core;
pub mod delivery;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Which delivery backend handles submitted forms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provider {
    #[default]
    #[value(name = "emailjs")]
    #[serde(rename = "emailjs")]
    EmailJs,
    DryRun,
}
