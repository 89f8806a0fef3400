//! Integration tests for Coffee & Wifi.
//!
//! The tests in `tests/` drive a running server over HTTP and are ignored by
//! default. To run them:
//!
//! ```bash
//! cargo run -p coffee-wifi-cli -- migrate
//! cargo run -p coffee-wifi-web &
//! cargo test -p coffee-wifi-integration-tests -- --ignored
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
