//! Runtime path selection on top of [`paths`].
//!
//! This crate connects the path catalog to a running program:
//!
//! 1. **Detection** ([`detect`]): the native paths the CPU supports, probed
//!    once per process. Under Miri only the portable path is reported.
//! 2. **Configuration** ([`config`]): the `PATHSEL_PATHS` environment variable
//!    and programmatic overrides, validated against the catalog.
//! 3. **Selection** ([`Context`]): `compiled & runtime_enabled`, resolved to
//!    its most significant path.
//! 4. **Kernels** ([`KernelTable`], [`Dispatcher`], [`kernels!`]): map the
//!    selected path to a kernel.
//! 5. **Specialization** ([`Specialized`], [`specialize`]): map the selected
//!    path to a const-generic instantiation.
//!
//! # Features
//!
//! - `std` (default): runtime detection, `OnceLock` caching and the
//!   environment override. Without it detection uses `cfg!(target_feature)`
//!   only.
//!
//! # Example
//!
//! ```
//! use dispatch::{Context, KernelTable, kernels};
//! use paths::{Native, NativePath};
//!
//! type DotFn = fn(&[f32], &[f32]) -> f32;
//!
//! fn dot_portable(a: &[f32], b: &[f32]) -> f32 {
//!   a.iter().zip(b).map(|(x, y)| x * y).sum()
//! }
//!
//! const DOT: KernelTable<'static, Native, DotFn> = kernels!(Native, DotFn;
//!   NativePath::PORTABLE => dot_portable,
//! );
//!
//! let ctx = Context::new();
//! let kernel = ctx.select_kernel(&DOT).unwrap();
//! assert_eq!((kernel.kernel)(&[1.0, 2.0], &[3.0, 4.0]), 11.0);
//! assert_eq!(ctx.last_used_path(), NativePath::PORTABLE);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod config;
mod context;
pub mod detect;
mod error;
mod kernel;
mod specialize;

pub use context::Context;
pub use error::ConfigError;
pub use kernel::{Candidate, Dispatcher, KernelTable};
pub use specialize::{Specialized, specialize};
