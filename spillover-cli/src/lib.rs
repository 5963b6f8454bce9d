//! # Spillover CLI Library
//!
//! Report pipeline for the spillover command-line tool: issue selection,
//! epic title lookup, TSV output, and the command line that ties them
//! together.

pub mod cli;
pub mod clients;
pub mod consts;
pub mod epics;
pub mod logging;
pub mod pipeline;
pub mod writer;
