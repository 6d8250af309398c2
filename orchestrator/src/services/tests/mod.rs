//! Service-specific tests
//!
//! Each reference service has its own test file.
