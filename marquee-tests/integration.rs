//! Integration tests for Marquee
//!
//! These tests drive the search session end-to-end against the scriptable
//! mock catalog: fetch-cycle request accounting, debounce timing, and the
//! interactive submission flows.

#[path = "integration/debounce.rs"]
mod debounce;
#[path = "integration/fetch_cycle.rs"]
mod fetch_cycle;
#[path = "integration/session_flow.rs"]
mod session_flow;
