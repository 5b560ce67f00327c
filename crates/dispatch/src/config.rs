//! Path configuration from text.
//!
//! The runtime-supported path set can be overridden through the
//! [`ENV_VAR`] environment variable. Accepted forms (case-insensitive):
//!
//! - a hexadecimal mask: `0x1a`, `1A`
//! - a list of path names separated by `,`, `|`, `+` or whitespace:
//!   `avx2,portable`, `neon | neon-dotprod`
//! - `default` or `all` for the family's catalog sets, usable inside a list
//!
//! The parsed mask must be non-empty and inside the family's [`Family::ALL`].
//!
//! ```
//! use dispatch::config::parse_paths;
//! use paths::{Path, X86};
//!
//! let p = parse_paths::<X86>("avx2, portable").unwrap();
//! assert_eq!(p, Path::<X86>::AVX2 | Path::<X86>::PORTABLE);
//! assert_eq!(parse_paths::<X86>("0x0a").unwrap(), p);
//! ```

use paths::{Family, Path, Variant};

use crate::error::ConfigError;

/// Environment variable overriding runtime path detection.
pub const ENV_VAR: &str = "PATHSEL_PATHS";

/// Parse a path set of family `F`.
///
/// # Errors
///
/// - [`ConfigError::Empty`] for blank input or a zero mask
/// - [`ConfigError::InvalidHex`] for a `0x` prefix without a valid 8-bit value
/// - [`ConfigError::UnknownName`] for a name the family does not define,
///   including bare hex-digit words such as `add` that do not fit in 8 bits
/// - [`ConfigError::OutsideCatalog`] for bits not in `F::ALL`
pub fn parse_paths<F: Family>(s: &str) -> Result<Path<F>, ConfigError> {
  let s = s.trim();
  if s.is_empty() {
    return Err(ConfigError::Empty);
  }

  let paths = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
    parse_hex(hex)?
  } else if lookup_name::<F>(s).is_none() && s.bytes().all(|b| b.is_ascii_hexdigit()) {
    // A bare token too wide for a mask is a misspelled name, not a mask.
    parse_hex(s).map_err(|_| ConfigError::UnknownName)?
  } else {
    parse_names::<F>(s)?
  };

  validate(paths)
}

/// Check that `paths` is a non-empty subset of `F::ALL`.
///
/// # Errors
///
/// [`ConfigError::Empty`] or [`ConfigError::OutsideCatalog`].
///
/// A family whose catalog groups overlap is rejected at build time, even
/// when it never invoked [`paths::assert_catalog!`]:
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
/// #   fn name(self) -> &'static str { "bad" }
/// # }
/// impl Family for Bad {
///   const NAME: &'static str = "bad";
///   type Variant = BadPath;
///   const NON_ARCH: Path<Self> = Path::<Self>::from_bits(0x02);
///   const DEFAULT_ARCH: Path<Self> = Path::<Self>::from_bits(0x02 | 0x04);
///   const EXTRA_ARCH: Path<Self> = Path::<Self>::NONE;
/// }
///
/// let _ = dispatch::config::validate(Path::<Bad>::from_bits(0x04));
/// ```
pub fn validate<F: Family>(paths: Path<F>) -> Result<Path<F>, ConfigError> {
  paths::ensure_catalog::<F>();
  if paths.is_empty() {
    return Err(ConfigError::Empty);
  }
  let outside = paths.difference(F::ALL);
  if !outside.is_empty() {
    return Err(ConfigError::OutsideCatalog { bits: outside.bits() });
  }
  Ok(paths)
}

fn parse_hex<F: Family>(hex: &str) -> Result<Path<F>, ConfigError> {
  u8::from_str_radix(hex, 16)
    .map(Path::from_bits)
    .map_err(|_| ConfigError::InvalidHex)
}

fn parse_names<F: Family>(s: &str) -> Result<Path<F>, ConfigError> {
  let mut paths = Path::<F>::NONE;
  let mut any = false;
  let separator = |c: char| c.is_ascii_whitespace() || matches!(c, ',' | '|' | '+');
  for name in s.split(separator).filter(|n| !n.is_empty()) {
    paths |= lookup_name::<F>(name).ok_or(ConfigError::UnknownName)?;
    any = true;
  }
  if !any {
    return Err(ConfigError::Empty);
  }
  Ok(paths)
}

fn lookup_name<F: Family>(name: &str) -> Option<Path<F>> {
  if name.eq_ignore_ascii_case("default") {
    return Some(F::DEFAULT);
  }
  if name.eq_ignore_ascii_case("all") {
    return Some(F::ALL);
  }
  F::Variant::ALL
    .iter()
    .find(|v| v.name().eq_ignore_ascii_case(name))
    .map(|&v| Path::of(v))
}

/// Read [`ENV_VAR`] as a native path set.
///
/// Returns `None` when the variable is unset. An invalid value is logged and
/// ignored, so a typo falls back to detection instead of failing.
#[cfg(feature = "std")]
pub fn env_paths() -> Option<paths::NativePath> {
  let value = match std::env::var(ENV_VAR) {
    Ok(value) => value,
    Err(std::env::VarError::NotPresent) => return None,
    Err(err) => {
      tracing::warn!(error = %err, "ignoring {}", ENV_VAR);
      return None;
    }
  };

  match parse_paths::<paths::Native>(&value) {
    Ok(paths) => {
      tracing::debug!(%paths, "runtime paths overridden by {}", ENV_VAR);
      Some(paths)
    }
    Err(err) => {
      tracing::warn!(error = %err, value = %value, "ignoring invalid {}", ENV_VAR);
      None
    }
  }
}


#[cfg(all(test, not(miri)))]
mod proptests {
  extern crate alloc;

  use alloc::{format, string::String, vec::Vec};

  use paths::X86;
  use proptest::prelude::*;

  use super::*;

  fn arb_catalog_subset() -> impl Strategy<Value = Path<X86>> {
    (1u8..=u8::MAX)
      .prop_map(|raw| Path::<X86>::from_bits(raw) & X86::ALL)
      .prop_filter("non-empty", |p| !p.is_empty())
  }

  proptest! {
    /// Any non-empty catalog subset round-trips through its hex form
    #[test]
    fn hex_round_trip(p in arb_catalog_subset()) {
      prop_assert_eq!(parse_paths::<X86>(&format!("{:#04x}", p.bits())), Ok(p));
      prop_assert_eq!(parse_paths::<X86>(&format!("{:x}", p.bits())), Ok(p));
    }

    /// Any non-empty catalog subset round-trips through its names
    #[test]
    fn names_round_trip(p in arb_catalog_subset()) {
      let names: Vec<&str> = p.iter().filter_map(Path::name).collect();
      let joined: String = names.join(",");
      prop_assert_eq!(parse_paths::<X86>(&joined), Ok(p));
    }

    /// Parsing never panics and never yields bits outside the catalog
    #[test]
    fn parse_is_total(s in ".{0,24}") {
      if let Ok(p) = parse_paths::<X86>(&s) {
        prop_assert!(!p.is_empty());
        prop_assert!(X86::ALL.contains(p));
      }
    }
  }
}
