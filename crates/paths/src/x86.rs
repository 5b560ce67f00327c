//! x86 and x86_64 paths.
//!
//! | bit  | path       | group        |
//! |------|------------|--------------|
//! | 0x02 | `portable` | non-arch     |
//! | 0x04 | `sse4.2`   | extra-arch   |
//! | 0x08 | `avx2`     | default-arch |
//! | 0x10 | `avx512`   | default-arch |
//! | 0x20 | `avx-vnni` | extra-arch   |
//!
//! SSE 4.2 and AVX-VNNI kernels are placeholders whose block dimensions are
//! still being tuned, so they stay out of the default set.

use crate::{
  family::{Family, Variant},
  path::{PORTABLE_BITS, Path},
};

/// The x86 family (32- and 64-bit).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct X86;

/// Named x86 paths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum X86Path {
  /// Portable fallback.
  Portable = PORTABLE_BITS,
  /// SSE 4.2.
  Sse42 = 0x04,
  /// AVX2 with FMA.
  Avx2 = 0x08,
  /// AVX-512 (F, DQ, CD, BW, VL).
  Avx512 = 0x10,
  /// AVX-512 VNNI dot products.
  AvxVnni = 0x20,
}

impl Variant for X86Path {
  const ALL: &'static [Self] = &[Self::Portable, Self::Sse42, Self::Avx2, Self::Avx512, Self::AvxVnni];

  #[inline]
  fn bits(self) -> u8 {
    self as u8
  }

  fn name(self) -> &'static str {
    match self {
      Self::Portable => "portable",
      Self::Sse42 => "sse4.2",
      Self::Avx2 => "avx2",
      Self::Avx512 => "avx512",
      Self::AvxVnni => "avx-vnni",
    }
  }
}

impl Path<X86> {
  /// SSE 4.2.
  pub const SSE42: Self = Self::from_bits(X86Path::Sse42 as u8);
  /// AVX2 with FMA.
  pub const AVX2: Self = Self::from_bits(X86Path::Avx2 as u8);
  /// AVX-512.
  pub const AVX512: Self = Self::from_bits(X86Path::Avx512 as u8);
  /// AVX-512 VNNI.
  pub const AVX_VNNI: Self = Self::from_bits(X86Path::AvxVnni as u8);
}

impl Family for X86 {
  const NAME: &'static str = "x86";
  type Variant = X86Path;

  const NON_ARCH: Path<Self> = Path::<Self>::PORTABLE;
  const DEFAULT_ARCH: Path<Self> = Path::<Self>::AVX2.union(Path::<Self>::AVX512);
  const EXTRA_ARCH: Path<Self> = Path::<Self>::SSE42.union(Path::<Self>::AVX_VNNI);
}

crate::assert_catalog!(X86, X86Path);
