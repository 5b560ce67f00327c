//! Runtime path detection.
//!
//! [`supported`] returns the native paths the running CPU can execute. It
//! handles:
//!
//! - Compile-time detection (via `cfg!(target_feature = "...")`)
//! - Runtime detection (via `std::arch::is_*_feature_detected!`, `std` only)
//! - Caching (via `OnceLock` with `std`, an atomic without)
//! - The [`ENV_VAR`](crate::config::ENV_VAR) environment override
//! - Process-wide overrides for bare metal and testing
//! - Miri fallback (portable path only)
//!
//! The portable path is always reported by detection. An environment or
//! programmatic override replaces detection verbatim.
//!
//! ```
//! use paths::ALL_PATHS;
//!
//! let supported = dispatch::detect::supported();
//! assert!(ALL_PATHS.contains(supported));
//! ```

use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use paths::{ALL_PATHS, NativePath};

// ─────────────────────────────────────────────────────────────────────────────
// Override Support
// ─────────────────────────────────────────────────────────────────────────────

static OVERRIDE_SET: AtomicBool = AtomicBool::new(false);
static OVERRIDE_BITS: AtomicU8 = AtomicU8::new(0);

/// Set or clear the process-wide override.
///
/// When set, [`supported`] returns the override instead of detecting. Pass
/// `None` to resume detection. The value is masked to [`ALL_PATHS`].
///
/// ```
/// use dispatch::detect;
/// use paths::NativePath;
///
/// detect::set_override(Some(NativePath::PORTABLE));
/// assert_eq!(detect::supported(), NativePath::PORTABLE);
/// detect::set_override(None);
/// ```
pub fn set_override(value: Option<NativePath>) {
  match value {
    Some(paths) => {
      OVERRIDE_BITS.store(paths.intersection(ALL_PATHS).bits(), Ordering::Release);
      OVERRIDE_SET.store(true, Ordering::Release);
    }
    None => OVERRIDE_SET.store(false, Ordering::Release),
  }
}

/// Check if an override is currently set.
#[inline]
#[must_use]
pub fn has_override() -> bool {
  OVERRIDE_SET.load(Ordering::Acquire)
}

fn get_override() -> Option<NativePath> {
  if !OVERRIDE_SET.load(Ordering::Acquire) {
    return None;
  }
  Some(NativePath::from_bits(OVERRIDE_BITS.load(Ordering::Acquire)))
}

// ─────────────────────────────────────────────────────────────────────────────
// Main API
// ─────────────────────────────────────────────────────────────────────────────

/// Paths supported by the running CPU.
///
/// Detection runs once per process. A programmatic override takes precedence
/// over the cached result.
#[inline]
#[must_use]
pub fn supported() -> NativePath {
  if let Some(paths) = get_override() {
    return paths;
  }

  #[cfg(feature = "std")]
  {
    use std::sync::OnceLock;
    static CACHED: OnceLock<NativePath> = OnceLock::new();
    *CACHED.get_or_init(detect_uncached)
  }

  #[cfg(not(feature = "std"))]
  {
    // 0 = not yet detected. Detection always reports at least one path.
    static CACHED: AtomicU8 = AtomicU8::new(0);
    let bits = CACHED.load(Ordering::Acquire);
    if bits != 0 {
      return NativePath::from_bits(bits);
    }
    // Racing initializers compute the same value.
    let detected = detect_uncached();
    CACHED.store(detected.bits(), Ordering::Release);
    detected
  }
}

/// Paths guaranteed by the compilation target, without runtime probing.
#[inline]
#[must_use]
pub const fn supported_static() -> NativePath {
  arch::compiled()
}

/// Detect supported paths without caching.
///
/// Honors the environment override but not [`set_override`].
#[must_use]
pub fn detect_uncached() -> NativePath {
  #[cfg(feature = "std")]
  if let Some(paths) = crate::config::env_paths() {
    return paths;
  }

  let detected = if cfg!(miri) {
    NativePath::PORTABLE
  } else {
    #[cfg(feature = "std")]
    {
      arch::runtime()
    }
    #[cfg(not(feature = "std"))]
    {
      arch::compiled()
    }
  };

  tracing::debug!(paths = %detected, "detected supported paths");
  detected
}

// ─────────────────────────────────────────────────────────────────────────────
// Per-architecture probes
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod arch {
  use paths::{Path, X86};

  type P = Path<X86>;

  pub(super) const fn compiled() -> P {
    let mut paths = P::PORTABLE;
    if cfg!(target_feature = "sse4.2") {
      paths = paths.union(P::SSE42);
    }
    if cfg!(all(target_feature = "avx2", target_feature = "fma")) {
      paths = paths.union(P::AVX2);
    }
    if cfg!(all(
      target_feature = "avx512f",
      target_feature = "avx512dq",
      target_feature = "avx512cd",
      target_feature = "avx512bw",
      target_feature = "avx512vl"
    )) {
      paths = paths.union(P::AVX512);
    }
    if cfg!(target_feature = "avx512vnni") {
      paths = paths.union(P::AVX_VNNI);
    }
    paths
  }

  #[cfg(feature = "std")]
  pub(super) fn runtime() -> P {
    let mut paths = compiled();
    if std::arch::is_x86_feature_detected!("sse4.2") {
      paths |= P::SSE42;
    }
    if std::arch::is_x86_feature_detected!("avx2") && std::arch::is_x86_feature_detected!("fma") {
      paths |= P::AVX2;
    }
    if std::arch::is_x86_feature_detected!("avx512f")
      && std::arch::is_x86_feature_detected!("avx512dq")
      && std::arch::is_x86_feature_detected!("avx512cd")
      && std::arch::is_x86_feature_detected!("avx512bw")
      && std::arch::is_x86_feature_detected!("avx512vl")
    {
      paths |= P::AVX512;
    }
    if std::arch::is_x86_feature_detected!("avx512vnni") {
      paths |= P::AVX_VNNI;
    }
    paths
  }
}

#[cfg(target_arch = "aarch64")]
mod arch {
  use paths::{Arm64, Path};

  type P = Path<Arm64>;

  pub(super) const fn compiled() -> P {
    let mut paths = P::PORTABLE;
    if cfg!(target_feature = "neon") {
      paths = paths.union(P::NEON);
    }
    if cfg!(target_feature = "dotprod") {
      paths = paths.union(P::NEON_DOTPROD);
    }
    paths
  }

  #[cfg(feature = "std")]
  pub(super) fn runtime() -> P {
    // NEON is mandatory on AArch64.
    let mut paths = compiled().union(P::NEON);
    if std::arch::is_aarch64_feature_detected!("dotprod") {
      paths |= P::NEON_DOTPROD;
    }
    paths
  }
}

#[cfg(all(target_arch = "arm", target_feature = "neon"))]
mod arch {
  use paths::{Arm32, Path};

  type P = Path<Arm32>;

  pub(super) const fn compiled() -> P {
    P::PORTABLE.union(P::NEON)
  }

  // 32-bit ARM has no stable runtime probe; NEON comes from the target.
  #[cfg(feature = "std")]
  pub(super) fn runtime() -> P {
    compiled()
  }
}

#[cfg(not(any(
  target_arch = "x86",
  target_arch = "x86_64",
  target_arch = "aarch64",
  all(target_arch = "arm", target_feature = "neon")
)))]
mod arch {
  use paths::{Generic, Path};

  pub(super) const fn compiled() -> Path<Generic> {
    Path::<Generic>::PORTABLE
  }

  #[cfg(feature = "std")]
  pub(super) fn runtime() -> Path<Generic> {
    compiled()
  }
}
