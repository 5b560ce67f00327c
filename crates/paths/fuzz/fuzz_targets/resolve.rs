//! Fuzz target for path resolution.
//!
//! Tests that:
//! - The result is NONE exactly when the mask is empty
//! - Otherwise the result is a single bit of the mask, above every other bit
//! - Resolution is idempotent
//! - Iteration order agrees with resolution

#![no_main]

use libfuzzer_sys::fuzz_target;
use paths::NativePath;

fuzz_target!(|raw: u8| {
  let mask = NativePath::from_bits(raw);
  let top = mask.most_significant();

  assert_eq!(top.is_empty(), mask.is_empty(), "only an empty mask resolves to NONE");

  if !mask.is_empty() {
    assert!(top.is_single(), "resolution must yield one bit");
    assert!(mask.contains(top), "resolution must pick a member of the mask");
    assert!(mask.difference(top).bits() < top.bits(), "no member may outrank the result");
  }

  assert_eq!(top.most_significant(), top, "resolution must be idempotent");
  assert_eq!(mask.iter().next().unwrap_or(NativePath::NONE), top, "iteration starts at the resolved path");
});
