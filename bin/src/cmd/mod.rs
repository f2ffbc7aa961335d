//! CLI subcommand modules.
//!
//! This module contains the implementations for all inflexion CLI subcommands.

pub(crate) mod detect;
pub(crate) mod estimate;
pub(crate) mod range;
pub(crate) mod signals;
