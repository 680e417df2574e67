//! Integration tests for the agentic CLI
//!
//! These tests spawn the actual binary and test end-to-end behavior. Every
//! test points `AGENTIC_HOME` at a temp dir and `AGENTIC_API_URL` at a port
//! nothing listens on, so no test reads real user data or reaches a backend.

mod cli_tests;
mod config_command;
