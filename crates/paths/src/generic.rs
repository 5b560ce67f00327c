//! The family for targets without a known SIMD path.

use crate::{
  family::{Family, Variant},
  path::{PORTABLE_BITS, Path},
};

/// Targets with no architecture-specific paths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Generic;

/// Named generic paths: only the portable fallback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum GenericPath {
  /// Portable fallback.
  Portable = PORTABLE_BITS,
}

impl Variant for GenericPath {
  const ALL: &'static [Self] = &[Self::Portable];

  #[inline]
  fn bits(self) -> u8 {
    self as u8
  }

  fn name(self) -> &'static str {
    "portable"
  }
}

impl Family for Generic {
  const NAME: &'static str = "generic";
  type Variant = GenericPath;

  const NON_ARCH: Path<Self> = Path::<Self>::PORTABLE;
  const DEFAULT_ARCH: Path<Self> = Path::<Self>::NONE;
  const EXTRA_ARCH: Path<Self> = Path::<Self>::NONE;
}

crate::assert_catalog!(Generic, GenericPath);
