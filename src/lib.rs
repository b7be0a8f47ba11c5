//! railca: High-speed rail life-cycle assessment
//!
//! A table-oriented calculation pipeline that computes life-cycle greenhouse
//! gas and acidification impacts of high-speed rail infrastructure and
//! operation across multiple countries and trade scenarios.

pub mod cli;
pub mod core;
pub mod model;
pub mod tables;
