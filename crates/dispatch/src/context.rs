//! Per-context path selection.
//!
//! A [`Context`] owns the runtime-enabled paths of one caller: by default the
//! detected paths, or an explicit set restricting them further. Selection
//! intersects the caller's compiled paths with the runtime-enabled ones and
//! resolves to the most significant path.
//!
//! State lives in atomics, so a context can be shared by reference.
//!
//! ```
//! use dispatch::Context;
//! use paths::{DEFAULT_PATHS, NativePath};
//!
//! let ctx = Context::new();
//! ctx.set_runtime_enabled_paths(NativePath::PORTABLE).unwrap();
//! assert_eq!(ctx.select_path(DEFAULT_PATHS), NativePath::PORTABLE);
//! assert_eq!(ctx.last_used_path(), NativePath::PORTABLE);
//! ```

use core::{
  fmt,
  sync::atomic::{AtomicU8, Ordering},
};

use paths::{Native, NativePath};

use crate::{
  config,
  detect,
  error::ConfigError,
  kernel::{Candidate, KernelTable},
  specialize::{Specialized, specialize},
};

/// Path selection state of one caller.
pub struct Context {
  // 0 = follow detection.
  runtime_enabled: AtomicU8,
  last_used: AtomicU8,
}

impl Context {
  /// A context following detection, with no path used yet.
  #[must_use]
  pub const fn new() -> Self {
    Self { runtime_enabled: AtomicU8::new(0), last_used: AtomicU8::new(0) }
  }

  /// Restrict the paths this context may select at runtime.
  ///
  /// Passing `NONE` restores the detected paths. The set is taken as given:
  /// enabling a path the CPU lacks is the caller's responsibility.
  ///
  /// # Errors
  ///
  /// [`ConfigError::OutsideCatalog`] if `paths` has bits outside
  /// [`ALL_PATHS`](paths::ALL_PATHS). The previous setting is kept.
  pub fn set_runtime_enabled_paths(&self, paths: NativePath) -> Result<(), ConfigError> {
    if paths.is_empty() {
      self.runtime_enabled.store(0, Ordering::Release);
      return Ok(());
    }
    let paths = config::validate(paths)?;
    self.runtime_enabled.store(paths.bits(), Ordering::Release);
    Ok(())
  }

  /// Paths this context may select: the explicit setting, or detection.
  #[must_use]
  pub fn runtime_enabled_paths(&self) -> NativePath {
    let bits = self.runtime_enabled.load(Ordering::Acquire);
    if bits != 0 {
      return NativePath::from_bits(bits);
    }
    detect::supported()
  }

  /// Resolve `compiled & runtime_enabled` to its most significant path.
  ///
  /// `compiled` is the set the caller built kernels for, usually
  /// [`DEFAULT_PATHS`](paths::DEFAULT_PATHS) or [`ALL_PATHS`](paths::ALL_PATHS).
  /// Returns `NONE` when nothing compiled is enabled.
  pub fn select_path(&self, compiled: NativePath) -> NativePath {
    let enabled = self.runtime_enabled_paths();
    let path = compiled.intersection(enabled).most_significant();
    self.last_used.store(path.bits(), Ordering::Relaxed);
    tracing::debug!(%compiled, %enabled, %path, "selected path");
    path
  }

  /// The path returned by the latest [`select_path`](Self::select_path), or
  /// `NONE` if nothing was selected yet.
  #[must_use]
  pub fn last_used_path(&self) -> NativePath {
    NativePath::from_bits(self.last_used.load(Ordering::Relaxed))
  }

  /// Select the kernel of `table` for this context.
  pub fn select_kernel<K: Copy>(&self, table: &KernelTable<'_, Native, K>) -> Option<Candidate<Native, K>> {
    let path = self.select_path(table.compiled());
    table.get(path)
  }

  /// Run `s` specialized for the path selected from `compiled`.
  pub fn run<S: Specialized<Native>>(&self, compiled: NativePath, s: S) -> Option<S::Output> {
    specialize(self.select_path(compiled), s)
  }
}

impl Default for Context {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Debug for Context {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let explicit = self.runtime_enabled.load(Ordering::Relaxed);
    let mut s = f.debug_struct("Context");
    if explicit == 0 {
      s.field("runtime_enabled", &"detected");
    } else {
      s.field("runtime_enabled", &NativePath::from_bits(explicit));
    }
    s.field("last_used", &self.last_used_path()).finish()
  }
}
