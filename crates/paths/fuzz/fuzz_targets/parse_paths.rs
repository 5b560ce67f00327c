//! Fuzz target for path configuration parsing.
//!
//! Tests that:
//! - Parsing arbitrary text never panics
//! - Accepted input is a non-empty subset of the catalog
//! - Accepted input round-trips through its hex form

#![no_main]

use dispatch::config::parse_paths;
use libfuzzer_sys::fuzz_target;
use paths::{Arm64, Family, X86};

fuzz_target!(|input: &str| {
  if let Ok(p) = parse_paths::<X86>(input) {
    assert!(!p.is_empty(), "accepted input must name a path");
    assert!(X86::ALL.contains(p), "accepted input must stay inside the catalog");
    let hex = format!("{:#04x}", p.bits());
    assert_eq!(parse_paths::<X86>(&hex), Ok(p), "hex form must parse back");
  }

  if let Ok(p) = parse_paths::<Arm64>(input) {
    assert!(Arm64::ALL.contains(p), "accepted input must stay inside the catalog");
  }
});
