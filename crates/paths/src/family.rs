//! Architecture families and their path catalogs.
//!
//! A [`Family`] is a zero-sized marker type standing for one CPU architecture
//! family. It fixes three things:
//!
//! - which bits exist, through its [`Variant`] enum,
//! - the three disjoint base groups `NON_ARCH`, `DEFAULT_ARCH`, `EXTRA_ARCH`,
//! - the derived sets `DEFAULT` and `ALL`.
//!
//! Every family is compiled into every build, and every family's catalog is
//! checked at compile time: by [`ensure_catalog`] wherever a family's paths
//! are resolved or tabled, and eagerly by [`assert_catalog!`](crate::assert_catalog)
//! next to the family definition. Only the choice of [`Native`](crate::Native)
//! depends on the target.

use core::{fmt, hash::Hash};

use crate::path::{Path, disjoint};

/// The closed set of named single-bit paths of one family.
pub trait Variant: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
  /// Every variant, in ascending bit order.
  const ALL: &'static [Self];

  /// The variant's single bit.
  fn bits(self) -> u8;

  /// Stable lowercase name, used for formatting and configuration.
  fn name(self) -> &'static str;
}

/// An architecture family: an independent bit space plus its catalog.
pub trait Family: Copy + Eq + Hash + fmt::Debug + Default + Send + Sync + 'static {
  /// Short family name (e.g. `"x86"`).
  const NAME: &'static str;

  /// Named paths of this family.
  type Variant: Variant;

  /// Portable paths, available on every CPU of the family.
  const NON_ARCH: Path<Self>;

  /// Architecture-specific paths recommended for most users.
  const DEFAULT_ARCH: Path<Self>;

  /// Architecture-specific paths that are available but not recommended:
  /// work in progress, or minority hardware.
  const EXTRA_ARCH: Path<Self>;

  /// The recommended set: portable fallback plus the default architecture paths.
  const DEFAULT: Path<Self> = Self::NON_ARCH.union(Self::DEFAULT_ARCH);

  /// Every path this family can compile.
  const ALL: Path<Self> = Self::DEFAULT.union(Self::EXTRA_ARCH);
}

// Blanket-implemented and private, so no family can replace the checks.
trait Checked: Family {
  const CATALOG: ();
}

impl<F: Family> Checked for F {
  const CATALOG: () = {
    assert!(
      disjoint(F::DEFAULT_ARCH, F::EXTRA_ARCH),
      "family catalog: default-arch and extra-arch paths overlap"
    );
    assert!(
      disjoint(F::DEFAULT_ARCH, F::NON_ARCH),
      "family catalog: default-arch and non-arch paths overlap"
    );
    assert!(
      disjoint(F::EXTRA_ARCH, F::NON_ARCH),
      "family catalog: extra-arch and non-arch paths overlap"
    );
    assert!(
      disjoint(F::DEFAULT, F::ALL.complement()),
      "family catalog: default paths are not a subset of all paths"
    );
    assert!(
      F::NON_ARCH.contains(Path::<F>::PORTABLE),
      "family catalog: non-arch paths must include the portable path"
    );
  };
}

/// Require `F`'s catalog invariants to hold.
///
/// The checks run during const evaluation, once per family. Every generic
/// entry point that consumes a catalog ([`Path::most_significant`],
/// [`Path::of`], [`Path::variant`], kernel tables, specialization, validation)
/// calls this, so a family with overlapping groups fails the build as soon as
/// it is used, whether or not it invoked
/// [`assert_catalog!`](crate::assert_catalog).
///
/// ```compile_fail,E0080
/// # use paths::{Family, Path, Variant};
/// # #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
/// # struct Bad;
/// # #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// # #[repr(u8)]
/// # enum BadPath { Portable = 0x02, X = 0x04 }
/// # impl Variant for BadPath {
/// #   const ALL: &'static [Self] = &[Self::Portable, Self::X];
/// #   fn bits(self) -> u8 { self as u8 }
/// #   fn name(self) -> &'static str { "x" }
/// # }
/// impl Family for Bad {
///   const NAME: &'static str = "bad";
///   type Variant = BadPath;
///   const NON_ARCH: Path<Self> = Path::<Self>::PORTABLE;
///   const DEFAULT_ARCH: Path<Self> = Path::<Self>::from_bits(0x04);
///   const EXTRA_ARCH: Path<Self> = Path::<Self>::from_bits(0x04 | 0x02);
/// }
///
/// // No `assert_catalog!`; resolving a path is enough to fail the build.
/// let _ = Path::<Bad>::from_bits(0x04).most_significant();
/// ```
#[inline(always)]
pub const fn ensure_catalog<F: Family>() {
  <F as Checked>::CATALOG
}

/// Check a family's catalog invariants at compile time.
///
/// Expands to a `const` item, so a violated invariant fails the build with a
/// message naming the family and the invariant:
///
/// - the three base groups are pairwise disjoint,
/// - `DEFAULT` is contained in `ALL`,
/// - `NON_ARCH` includes the portable path,
/// - every named variant is a single bit, in strictly ascending order.
///
/// ```
/// use paths::{Arm64, ArmPath, assert_catalog};
///
/// assert_catalog!(Arm64, ArmPath);
/// ```
///
/// Overlapping default-arch and extra-arch groups fail the build:
///
/// ```compile_fail,E0080
/// # use paths::{Family, Path, Variant, assert_catalog};
/// # #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
/// # struct Bad;
/// # #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// # #[repr(u8)]
/// # enum BadPath { Portable = 0x02, X = 0x04, Y = 0x08 }
/// # impl Variant for BadPath {
/// #   const ALL: &'static [Self] = &[Self::Portable, Self::X, Self::Y];
/// #   fn bits(self) -> u8 { self as u8 }
/// #   fn name(self) -> &'static str { "bad" }
/// # }
/// impl Family for Bad {
///   const NAME: &'static str = "bad";
///   type Variant = BadPath;
///   const NON_ARCH: Path<Self> = Path::<Self>::from_bits(0x02);
///   const DEFAULT_ARCH: Path<Self> = Path::<Self>::from_bits(0x04);
///   const EXTRA_ARCH: Path<Self> = Path::<Self>::from_bits(0x04 | 0x08);
/// }
///
/// assert_catalog!(Bad, BadPath);
/// ```
///
/// So do overlapping default-arch and non-arch groups:
///
/// ```compile_fail,E0080
/// # use paths::{Family, Path, Variant, assert_catalog};
/// # #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
/// # struct Bad;
/// # #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// # #[repr(u8)]
/// # enum BadPath { Portable = 0x02, X = 0x04, Y = 0x08 }
/// # impl Variant for BadPath {
/// #   const ALL: &'static [Self] = &[Self::Portable, Self::X, Self::Y];
/// #   fn bits(self) -> u8 { self as u8 }
/// #   fn name(self) -> &'static str { "bad" }
/// # }
/// impl Family for Bad {
///   const NAME: &'static str = "bad";
///   type Variant = BadPath;
///   const NON_ARCH: Path<Self> = Path::<Self>::from_bits(0x02);
///   const DEFAULT_ARCH: Path<Self> = Path::<Self>::from_bits(0x02 | 0x04);
///   const EXTRA_ARCH: Path<Self> = Path::<Self>::from_bits(0x08);
/// }
///
/// assert_catalog!(Bad, BadPath);
/// ```
///
/// Overlapping extra-arch and non-arch groups:
///
/// ```compile_fail,E0080
/// # use paths::{Family, Path, Variant, assert_catalog};
/// # #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
/// # struct Bad;
/// # #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// # #[repr(u8)]
/// # enum BadPath { Portable = 0x02, X = 0x04, Y = 0x08 }
/// # impl Variant for BadPath {
/// #   const ALL: &'static [Self] = &[Self::Portable, Self::X, Self::Y];
/// #   fn bits(self) -> u8 { self as u8 }
/// #   fn name(self) -> &'static str { "bad" }
/// # }
/// impl Family for Bad {
///   const NAME: &'static str = "bad";
///   type Variant = BadPath;
///   const NON_ARCH: Path<Self> = Path::<Self>::from_bits(0x02);
///   const DEFAULT_ARCH: Path<Self> = Path::<Self>::from_bits(0x04);
///   const EXTRA_ARCH: Path<Self> = Path::<Self>::from_bits(0x02 | 0x08);
/// }
///
/// assert_catalog!(Bad, BadPath);
/// ```
///
/// A non-arch group without the portable path:
///
/// ```compile_fail,E0080
/// # use paths::{Family, Path, Variant, assert_catalog};
/// # #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
/// # struct Bad;
/// # #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// # #[repr(u8)]
/// # enum BadPath { Portable = 0x02, X = 0x04, Y = 0x08 }
/// # impl Variant for BadPath {
/// #   const ALL: &'static [Self] = &[Self::Portable, Self::X, Self::Y];
/// #   fn bits(self) -> u8 { self as u8 }
/// #   fn name(self) -> &'static str { "bad" }
/// # }
/// impl Family for Bad {
///   const NAME: &'static str = "bad";
///   type Variant = BadPath;
///   const NON_ARCH: Path<Self> = Path::<Self>::from_bits(0x01);
///   const DEFAULT_ARCH: Path<Self> = Path::<Self>::from_bits(0x04);
///   const EXTRA_ARCH: Path<Self> = Path::<Self>::from_bits(0x08);
/// }
///
/// assert_catalog!(Bad, BadPath);
/// ```
///
/// Named paths listed out of bit order:
///
/// ```compile_fail,E0080
/// # use paths::{Family, Path, Variant, assert_catalog};
/// # #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
/// # struct Bad;
/// # #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// # #[repr(u8)]
/// # enum BadPath { Portable = 0x02, X = 0x04, Y = 0x08 }
/// # impl Variant for BadPath {
/// #   const ALL: &'static [Self] = &[Self::Portable, Self::Y, Self::X];
/// #   fn bits(self) -> u8 { self as u8 }
/// #   fn name(self) -> &'static str { "bad" }
/// # }
/// impl Family for Bad {
///   const NAME: &'static str = "bad";
///   type Variant = BadPath;
///   const NON_ARCH: Path<Self> = Path::<Self>::from_bits(0x02);
///   const DEFAULT_ARCH: Path<Self> = Path::<Self>::from_bits(0x04);
///   const EXTRA_ARCH: Path<Self> = Path::<Self>::from_bits(0x08);
/// }
///
/// assert_catalog!(Bad, BadPath);
/// ```
#[macro_export]
macro_rules! assert_catalog {
  ($family:ty, $variant:ty) => {
    const _: () = {
      let non_arch = <$family as $crate::Family>::NON_ARCH;
      let default_arch = <$family as $crate::Family>::DEFAULT_ARCH;
      let extra_arch = <$family as $crate::Family>::EXTRA_ARCH;
      let default = <$family as $crate::Family>::DEFAULT;
      let all = <$family as $crate::Family>::ALL;

      assert!(
        $crate::disjoint(default_arch, extra_arch),
        concat!(stringify!($family), ": default-arch and extra-arch paths overlap")
      );
      assert!(
        $crate::disjoint(default_arch, non_arch),
        concat!(stringify!($family), ": default-arch and non-arch paths overlap")
      );
      assert!(
        $crate::disjoint(extra_arch, non_arch),
        concat!(stringify!($family), ": extra-arch and non-arch paths overlap")
      );
      assert!(
        $crate::disjoint(default, all.complement()),
        concat!(stringify!($family), ": default paths are not a subset of all paths")
      );
      assert!(
        non_arch.contains($crate::Path::<$family>::PORTABLE),
        concat!(stringify!($family), ": non-arch paths must include the portable path")
      );

      let mut rest = <$variant as $crate::Variant>::ALL;
      let mut prev = 0u8;
      while let [first, tail @ ..] = rest {
        let bits = *first as u8;
        assert!(
          bits.is_power_of_two(),
          concat!(stringify!($variant), ": every named path must be a single bit")
        );
        assert!(
          bits > prev,
          concat!(stringify!($variant), ": named paths must be listed in ascending bit order")
        );
        prev = bits;
        rest = tail;
      }
    };
  };
}
