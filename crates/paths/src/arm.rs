//! ARM paths, shared by the 32-bit and 64-bit families.
//!
//! | bit  | path           | arm32        | arm64        |
//! |------|----------------|--------------|--------------|
//! | 0x02 | `portable`     | non-arch     | non-arch     |
//! | 0x04 | `neon`         | default-arch | default-arch |
//! | 0x08 | `neon-dotprod` | (not built)  | default-arch |
//!
//! Dot-product instructions are optional on ARMv8.2+ cores. 64-bit targets
//! can detect them at runtime, so the dotprod path joins the default set
//! there; 32-bit targets only get the baseline NEON path.

use crate::{
  family::{Family, Variant},
  path::{PORTABLE_BITS, Path},
};

/// The 32-bit ARM family with NEON.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Arm32;

/// The 64-bit ARM family (AArch64).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Arm64;

/// Named ARM paths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ArmPath {
  /// Portable fallback.
  Portable = PORTABLE_BITS,
  /// A widely available subset of NEON.
  Neon = 0x04,
  /// NEON plus the dot-product instructions of newer cores.
  NeonDotprod = 0x08,
}

impl Variant for ArmPath {
  const ALL: &'static [Self] = &[Self::Portable, Self::Neon, Self::NeonDotprod];

  #[inline]
  fn bits(self) -> u8 {
    self as u8
  }

  fn name(self) -> &'static str {
    match self {
      Self::Portable => "portable",
      Self::Neon => "neon",
      Self::NeonDotprod => "neon-dotprod",
    }
  }
}

impl<F: Family<Variant = ArmPath>> Path<F> {
  /// NEON.
  pub const NEON: Self = Self::from_bits(ArmPath::Neon as u8);
  /// NEON with dot-product instructions.
  pub const NEON_DOTPROD: Self = Self::from_bits(ArmPath::NeonDotprod as u8);
}

impl Family for Arm32 {
  const NAME: &'static str = "arm32";
  type Variant = ArmPath;

  const NON_ARCH: Path<Self> = Path::<Self>::PORTABLE;
  const DEFAULT_ARCH: Path<Self> = Path::<Self>::NEON;
  const EXTRA_ARCH: Path<Self> = Path::<Self>::NONE;
}

impl Family for Arm64 {
  const NAME: &'static str = "arm64";
  type Variant = ArmPath;

  const NON_ARCH: Path<Self> = Path::<Self>::PORTABLE;
  const DEFAULT_ARCH: Path<Self> = Path::<Self>::NEON.union(Path::<Self>::NEON_DOTPROD);
  const EXTRA_ARCH: Path<Self> = Path::<Self>::NONE;
}

crate::assert_catalog!(Arm32, ArmPath);
crate::assert_catalog!(Arm64, ArmPath);
