//! The catalog of the family this crate is compiled for.
//!
//! [`Native`] is the only target-dependent item of the crate. The constants
//! below are the native family's catalog under the names dispatch code uses.

use crate::{family::Family, path::Path};

/// The family of the compilation target.
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub type Native = crate::X86;

/// The family of the compilation target.
#[cfg(target_arch = "aarch64")]
pub type Native = crate::Arm64;

/// The family of the compilation target.
#[cfg(all(target_arch = "arm", target_feature = "neon"))]
pub type Native = crate::Arm32;

/// The family of the compilation target.
#[cfg(not(any(
  target_arch = "x86",
  target_arch = "x86_64",
  target_arch = "aarch64",
  all(target_arch = "arm", target_feature = "neon")
)))]
pub type Native = crate::Generic;

/// A path of the native family.
pub type NativePath = Path<Native>;

/// Portable paths, always compiled and always supported.
pub const NON_ARCH_PATHS: NativePath = Native::NON_ARCH;

/// Architecture paths recommended for most users.
pub const DEFAULT_ARCH_PATHS: NativePath = Native::DEFAULT_ARCH;

/// Architecture paths available but not recommended.
pub const EXTRA_ARCH_PATHS: NativePath = Native::EXTRA_ARCH;

/// The recommended set, used by entry points that take no explicit paths.
pub const DEFAULT_PATHS: NativePath = Native::DEFAULT;

/// Every path available to compile.
pub const ALL_PATHS: NativePath = Native::ALL;

const _: () = assert!(
  crate::disjoint(DEFAULT_PATHS, ALL_PATHS.complement()),
  "native default paths are not a subset of all paths"
);
