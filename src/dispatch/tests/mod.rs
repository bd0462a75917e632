//! Test modules for the dispatch system
//!
//! This module organizes the test suites for the dispatcher. Tests are
//! organized by functional area for better maintainability.

mod core_functionality;
