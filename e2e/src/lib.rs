//! End-to-end support: a stub Pin Payments server reachable over real HTTP, and JSON comparison helpers for the
//! cucumber suite in `tests/`.
pub mod helpers;
pub mod stub_server;
