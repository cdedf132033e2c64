//! Unit test harness: engine properties and report scenarios

#[path = "../common/mod.rs"]
mod common;

mod histogram_properties;
mod report_scenarios;
mod statistics_properties;
