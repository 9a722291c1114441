#[path = "../common/mod.rs"]
mod common;

mod cli_tests;
mod session_flow_tests;
