//! Integration tests: on-disk databases, file imports and formatted output

#[path = "../common/mod.rs"]
mod common;

mod cli_smoke_test;
mod csv_import;
mod topology_import;
