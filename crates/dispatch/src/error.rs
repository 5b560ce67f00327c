//! Error types for path configuration.
//!
//! Path algebra and resolution cannot fail. The only fallible operations are
//! turning external input (the `PATHSEL_PATHS` environment variable, or a
//! caller-supplied mask) into a path set of the native catalog.

use core::fmt;

/// Invalid path configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ConfigError {
  /// The input was empty or only whitespace and separators.
  Empty,
  /// A name did not match any path of the family.
  UnknownName,
  /// A hexadecimal mask could not be parsed as an 8-bit value.
  InvalidHex,
  /// The mask names bits outside the family's catalog.
  OutsideCatalog {
    /// The offending bits.
    bits: u8,
  },
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Empty => f.write_str("empty path list"),
      Self::UnknownName => f.write_str("unknown path name"),
      Self::InvalidHex => f.write_str("invalid hexadecimal path mask"),
      Self::OutsideCatalog { bits } => write!(f, "paths {bits:#04x} are not in the catalog"),
    }
  }
}

impl core::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::{format, string::ToString};

  use super::*;

  #[test]
  fn display_messages() {
    assert_eq!(ConfigError::Empty.to_string(), "empty path list");
    assert_eq!(ConfigError::UnknownName.to_string(), "unknown path name");
    assert_eq!(ConfigError::InvalidHex.to_string(), "invalid hexadecimal path mask");
    assert_eq!(
      ConfigError::OutsideCatalog { bits: 0xC0 }.to_string(),
      "paths 0xc0 are not in the catalog"
    );
  }

  #[test]
  fn debug_impl() {
    assert_eq!(format!("{:?}", ConfigError::InvalidHex), "InvalidHex");
  }

  #[test]
  fn is_error() {
    fn assert_error<E: core::error::Error + Send + Sync + 'static>() {}
    assert_error::<ConfigError>();
  }
}
