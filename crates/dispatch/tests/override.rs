//! Process-wide overrides. Kept in their own test binary: the override is
//! global state and would leak into other tests.

use dispatch::{Context, detect};
use paths::{ALL_PATHS, NativePath};

#[test]
fn override_replaces_detection_until_cleared() {
  let detected = detect::supported();
  assert!(!detect::has_override());

  detect::set_override(Some(NativePath::PORTABLE));
  assert!(detect::has_override());
  assert_eq!(detect::supported(), NativePath::PORTABLE);

  // Contexts following detection follow the override.
  let ctx = Context::new();
  assert_eq!(ctx.runtime_enabled_paths(), NativePath::PORTABLE);
  assert_eq!(ctx.select_path(ALL_PATHS), NativePath::PORTABLE);

  // Bits outside the catalog are dropped.
  detect::set_override(Some(ALL_PATHS.complement() | NativePath::PORTABLE));
  assert_eq!(detect::supported(), NativePath::PORTABLE);

  detect::set_override(None);
  assert!(!detect::has_override());
  assert_eq!(detect::supported(), detected);
}
