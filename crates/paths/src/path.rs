//! The [`Path`] type and its algebra.
//!
//! A `Path` is an 8-bit tag. A value with exactly one bit set names one
//! implementation path (the portable fallback, or one SIMD tier). Any other
//! value is a *set* of paths, built with the operators below.
//!
//! The type parameter is the architecture [`Family`] the bits belong to. Bit
//! `0x04` means NEON for [`Arm64`](crate::Arm64) and SSE 4.2 for
//! [`X86`](crate::X86); keeping the family in the type makes mixing the two a
//! compile error rather than a silent reinterpretation.
//!
//! # Preference
//!
//! Within a family, bit values grow with capability. [`Path::most_significant`]
//! therefore picks the most capable member of a mask.

use core::{fmt, hash, iter::FusedIterator, marker::PhantomData, ops};

use crate::family::{Family, Variant, ensure_catalog};

/// Bit value of the portable fallback path, shared by every family.
pub(crate) const PORTABLE_BITS: u8 = 0x02;

// ─────────────────────────────────────────────────────────────────────────────
// Core Path Type
// ─────────────────────────────────────────────────────────────────────────────

/// An implementation path, or a set of implementation paths, of family `F`.
///
/// `Path` is `Copy`, `Send` and `Sync`, and every operation on it is a
/// `const fn`, so catalog constants and their invariants are evaluated at
/// compile time.
///
/// # Example
///
/// ```
/// use paths::{Path, X86};
///
/// let compiled = Path::<X86>::PORTABLE | Path::<X86>::AVX2 | Path::<X86>::AVX512;
/// let detected = Path::<X86>::PORTABLE | Path::<X86>::AVX2;
/// assert_eq!((compiled & detected).most_significant(), Path::<X86>::AVX2);
/// ```
#[repr(transparent)]
pub struct Path<F> {
  bits: u8,
  _family: PhantomData<F>,
}

impl<F: Family> Path<F> {
  /// The empty set; the absence of any path.
  pub const NONE: Self = Self::from_bits(0);

  /// The portable fallback path. Defined for every family.
  pub const PORTABLE: Self = Self::from_bits(PORTABLE_BITS);

  /// Build a path from raw bits.
  ///
  /// Every bit pattern is a syntactically valid `Path`; whether it names
  /// paths that exist in `F` is the caller's concern.
  #[inline]
  #[must_use]
  pub const fn from_bits(bits: u8) -> Self {
    Self {
      bits,
      _family: PhantomData,
    }
  }

  /// The raw bits.
  #[inline]
  #[must_use]
  pub const fn bits(self) -> u8 {
    self.bits
  }

  /// Paths eligible under either operand.
  #[inline]
  #[must_use]
  pub const fn union(self, other: Self) -> Self {
    Self::from_bits(self.bits | other.bits)
  }

  /// Paths eligible under both operands.
  #[inline]
  #[must_use]
  pub const fn intersection(self, other: Self) -> Self {
    Self::from_bits(self.bits & other.bits)
  }

  /// Paths eligible under exactly one operand.
  #[inline]
  #[must_use]
  pub const fn symmetric_difference(self, other: Self) -> Self {
    Self::from_bits(self.bits ^ other.bits)
  }

  /// Paths in `self` that are not in `other`.
  #[inline]
  #[must_use]
  pub const fn difference(self, other: Self) -> Self {
    Self::from_bits(self.bits & !other.bits)
  }

  /// Every bit not in `self`, over the full 8-bit width.
  ///
  /// The result includes bits no family defines. Use
  /// [`complement_within`](Self::complement_within) to get "every other path
  /// of this catalog".
  #[inline]
  #[must_use]
  pub const fn complement(self) -> Self {
    Self::from_bits(!self.bits)
  }

  /// The paths of `universe` that are not in `self`.
  #[inline]
  #[must_use]
  pub const fn complement_within(self, universe: Self) -> Self {
    self.complement().intersection(universe)
  }

  /// True iff the two sets share no path.
  #[inline]
  #[must_use]
  pub const fn is_disjoint(self, other: Self) -> bool {
    self.intersection(other).is_empty()
  }

  /// True iff every path in `other` is also in `self`.
  #[inline]
  #[must_use]
  pub const fn contains(self, other: Self) -> bool {
    self.bits & other.bits == other.bits
  }

  /// True iff this is [`Path::NONE`].
  #[inline]
  #[must_use]
  pub const fn is_empty(self) -> bool {
    self.bits == 0
  }

  /// True iff exactly one bit is set, i.e. this names one concrete path.
  #[inline]
  #[must_use]
  pub const fn is_single(self) -> bool {
    self.bits.is_power_of_two()
  }

  /// Number of paths in the set.
  #[inline]
  #[must_use]
  pub const fn count(self) -> u32 {
    self.bits.count_ones()
  }

  /// Reduce a mask to its single most preferred path.
  ///
  /// Returns the highest set bit, or [`Path::NONE`] for an empty mask. This
  /// does not check that the mask came from one coherent catalog: a mask that
  /// mixes default and extra paths resolves to whichever bit is highest.
  #[inline]
  #[must_use]
  pub const fn most_significant(self) -> Self {
    ensure_catalog::<F>();
    if self.bits == 0 {
      return Self::NONE;
    }
    Self::from_bits(1 << (u8::BITS - 1 - self.bits.leading_zeros()))
  }

  /// The path for a named variant of this family.
  #[inline]
  #[must_use]
  pub fn of(variant: F::Variant) -> Self {
    ensure_catalog::<F>();
    Self::from_bits(variant.bits())
  }

  /// The named variant this single-bit path stands for.
  ///
  /// Returns `None` for empty or multi-bit values, and for bits the family
  /// does not name.
  #[must_use]
  pub fn variant(self) -> Option<F::Variant> {
    ensure_catalog::<F>();
    if !self.is_single() {
      return None;
    }
    F::Variant::ALL.iter().copied().find(|v| v.bits() == self.bits)
  }

  /// Stable lowercase name of a single named path (e.g. `"avx2"`).
  #[inline]
  #[must_use]
  pub fn name(self) -> Option<&'static str> {
    self.variant().map(Variant::name)
  }

  /// Iterate the single-bit members of this set, most preferred first.
  #[inline]
  #[must_use]
  pub const fn iter(self) -> Iter<F> {
    Iter { remaining: self }
  }
}

/// True iff `p` and `q` share no path.
///
/// Usable in `const` assertions over catalog constants.
#[inline]
#[must_use]
pub const fn disjoint<F: Family>(p: Path<F>, q: Path<F>) -> bool {
  p.is_disjoint(q)
}

/// Reduce `mask` to its highest set bit. See [`Path::most_significant`].
#[inline]
#[must_use]
pub const fn most_significant<F: Family>(mask: Path<F>) -> Path<F> {
  mask.most_significant()
}

// ─────────────────────────────────────────────────────────────────────────────
// Std Trait Impls
// ─────────────────────────────────────────────────────────────────────────────
//
// Written by hand so the impls only require `F: Family`, not `F: Clone` etc.

impl<F: Family> Clone for Path<F> {
  #[inline]
  fn clone(&self) -> Self {
    *self
  }
}

impl<F: Family> Copy for Path<F> {}

impl<F: Family> PartialEq for Path<F> {
  #[inline]
  fn eq(&self, other: &Self) -> bool {
    self.bits == other.bits
  }
}

impl<F: Family> Eq for Path<F> {}

impl<F: Family> hash::Hash for Path<F> {
  #[inline]
  fn hash<H: hash::Hasher>(&self, state: &mut H) {
    hash::Hash::hash(&self.bits, state);
  }
}

impl<F: Family> Default for Path<F> {
  #[inline]
  fn default() -> Self {
    Self::NONE
  }
}

impl<F: Family> From<Path<F>> for u8 {
  #[inline]
  fn from(path: Path<F>) -> Self {
    path.bits
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Operators
// ─────────────────────────────────────────────────────────────────────────────

impl<F: Family> ops::BitOr for Path<F> {
  type Output = Self;

  #[inline]
  fn bitor(self, rhs: Self) -> Self::Output {
    self.union(rhs)
  }
}

impl<F: Family> ops::BitAnd for Path<F> {
  type Output = Self;

  #[inline]
  fn bitand(self, rhs: Self) -> Self::Output {
    self.intersection(rhs)
  }
}

impl<F: Family> ops::BitXor for Path<F> {
  type Output = Self;

  #[inline]
  fn bitxor(self, rhs: Self) -> Self::Output {
    self.symmetric_difference(rhs)
  }
}

impl<F: Family> ops::Not for Path<F> {
  type Output = Self;

  #[inline]
  fn not(self) -> Self::Output {
    self.complement()
  }
}

impl<F: Family> ops::BitOrAssign for Path<F> {
  #[inline]
  fn bitor_assign(&mut self, rhs: Self) {
    *self = self.union(rhs);
  }
}

impl<F: Family> ops::BitAndAssign for Path<F> {
  #[inline]
  fn bitand_assign(&mut self, rhs: Self) {
    *self = self.intersection(rhs);
  }
}

impl<F: Family> ops::BitXorAssign for Path<F> {
  #[inline]
  fn bitxor_assign(&mut self, rhs: Self) {
    *self = self.symmetric_difference(rhs);
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Iteration
// ─────────────────────────────────────────────────────────────────────────────

/// Iterator over the single-bit members of a [`Path`], highest bit first.
#[derive(Clone, Debug)]
pub struct Iter<F: Family> {
  remaining: Path<F>,
}

impl<F: Family> Iterator for Iter<F> {
  type Item = Path<F>;

  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    let top = self.remaining.most_significant();
    if top.is_empty() {
      return None;
    }
    self.remaining = self.remaining.difference(top);
    Some(top)
  }

  #[inline]
  fn size_hint(&self) -> (usize, Option<usize>) {
    let n = self.remaining.count() as usize;
    (n, Some(n))
  }
}

impl<F: Family> ExactSizeIterator for Iter<F> {}

impl<F: Family> FusedIterator for Iter<F> {}

impl<F: Family> IntoIterator for Path<F> {
  type Item = Path<F>;
  type IntoIter = Iter<F>;

  #[inline]
  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Formatting
// ─────────────────────────────────────────────────────────────────────────────

impl<F: Family> fmt::Debug for Path<F> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Path({}", F::NAME)?;
    if self.is_empty() {
      return f.write_str(", none)");
    }

    f.write_str(", [")?;
    for (i, single) in self.iter().enumerate() {
      if i > 0 {
        f.write_str(", ")?;
      }
      match single.name() {
        Some(name) => f.write_str(name)?,
        None => write!(f, "{:#04x}", single.bits)?,
      }
    }
    f.write_str("])")
  }
}

impl<F: Family> fmt::Display for Path<F> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Debug::fmt(self, f)
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::{format, vec::Vec};

  use super::*;
  use crate::{Arm64, ArmPath, Generic, X86, X86Path};

  type P = Path<X86>;

  #[test]
  fn none_is_zero_and_empty() {
    assert_eq!(P::NONE.bits(), 0);
    assert!(P::NONE.is_empty());
    assert!(!P::NONE.is_single());
    assert_eq!(P::NONE.count(), 0);
    assert_eq!(P::default(), P::NONE);
  }

  #[test]
  fn operators_match_named_methods() {
    let a = P::from_bits(0b0011_0110);
    let b = P::from_bits(0b0101_1010);

    assert_eq!(a | b, a.union(b));
    assert_eq!(a & b, a.intersection(b));
    assert_eq!(a ^ b, a.symmetric_difference(b));
    assert_eq!(!a, a.complement());

    assert_eq!((a | b).bits(), 0b0111_1110);
    assert_eq!((a & b).bits(), 0b0001_0010);
    assert_eq!((a ^ b).bits(), 0b0110_1100);
    assert_eq!((!a).bits(), 0b1100_1001);
  }

  #[test]
  fn assign_operators() {
    let mut p = P::PORTABLE;
    p |= P::AVX2;
    assert_eq!(p, P::PORTABLE | P::AVX2);
    p &= P::AVX2 | P::AVX512;
    assert_eq!(p, P::AVX2);
    p ^= P::AVX2 | P::SSE42;
    assert_eq!(p, P::SSE42);
  }

  #[test]
  fn complement_includes_undefined_high_bits() {
    let all = X86::ALL;
    assert_eq!((!all).bits(), 0b1100_0001);
    assert_eq!(P::AVX2.complement_within(all), all.difference(P::AVX2));
  }

  #[test]
  fn disjoint_and_contains() {
    assert!(disjoint(P::AVX2, P::AVX512));
    assert!(!disjoint(P::AVX2 | P::SSE42, P::AVX2));
    assert!(disjoint(P::AVX2, P::NONE));
    assert!(disjoint(P::NONE, P::NONE));

    let set = P::PORTABLE | P::AVX2;
    assert!(set.contains(P::AVX2));
    assert!(set.contains(P::NONE));
    assert!(!set.contains(P::AVX512));
  }

  #[test]
  fn most_significant_basics() {
    assert_eq!(P::NONE.most_significant(), P::NONE);
    assert_eq!(most_significant(P::PORTABLE), P::PORTABLE);
    assert_eq!((P::AVX2 | P::SSE42).most_significant(), P::AVX2);
    assert_eq!((P::PORTABLE | P::AVX512 | P::AVX2).most_significant(), P::AVX512);
    assert_eq!(P::from_bits(0xFF).most_significant().bits(), 0x80);
    assert_eq!(P::from_bits(0x01).most_significant().bits(), 0x01);
  }

  #[test]
  fn most_significant_mixes_default_and_extra_literally() {
    // avx-vnni is an extra path but has the highest bit, so it wins.
    let mask = X86::DEFAULT_ARCH | P::AVX_VNNI;
    assert_eq!(mask.most_significant(), P::AVX_VNNI);
  }

  #[test]
  fn most_significant_is_const() {
    const MASK: Path<Arm64> = Path::<Arm64>::PORTABLE.union(Path::<Arm64>::NEON);
    const TOP: Path<Arm64> = MASK.union(Path::<Arm64>::NEON_DOTPROD).most_significant();
    assert_eq!(TOP, Path::<Arm64>::NEON_DOTPROD);
  }

  #[test]
  fn variant_round_trip_for_named_bits() {
    for &v in X86Path::ALL {
      assert_eq!(P::of(v).variant(), Some(v));
    }
    assert_eq!(Path::<Arm64>::of(ArmPath::Neon), Path::<Arm64>::NEON);
  }

  #[test]
  fn variant_rejects_sets_and_unnamed_bits() {
    assert_eq!(P::NONE.variant(), None);
    assert_eq!((P::AVX2 | P::PORTABLE).variant(), None);
    assert_eq!(P::from_bits(0x40).variant(), None);
    assert_eq!(Path::<Generic>::from_bits(0x04).variant(), None);
  }

  #[test]
  fn names() {
    assert_eq!(P::PORTABLE.name(), Some("portable"));
    assert_eq!(P::SSE42.name(), Some("sse4.2"));
    assert_eq!(P::AVX_VNNI.name(), Some("avx-vnni"));
    assert_eq!(Path::<Arm64>::NEON_DOTPROD.name(), Some("neon-dotprod"));
    assert_eq!((P::AVX2 | P::AVX512).name(), None);
  }

  #[test]
  fn iter_is_descending() {
    let set = P::PORTABLE | P::AVX512 | P::AVX2;
    let members: Vec<P> = set.iter().collect();
    assert_eq!(members, [P::AVX512, P::AVX2, P::PORTABLE]);
    assert_eq!(set.iter().len(), 3);
    assert_eq!(P::NONE.iter().next(), None);

    let mut rebuilt = P::NONE;
    for p in set {
      assert!(p.is_single());
      rebuilt |= p;
    }
    assert_eq!(rebuilt, set);
  }

  #[test]
  fn debug_lists_names_most_preferred_first() {
    let s = format!("{:?}", P::PORTABLE | P::AVX2);
    assert_eq!(s, "Path(x86, [avx2, portable])");
    assert_eq!(format!("{}", P::NONE), "Path(x86, none)");
  }

  #[test]
  fn debug_shows_unnamed_bits_as_hex() {
    let s = format!("{:?}", P::from_bits(0x80 | 0x08));
    assert_eq!(s, "Path(x86, [0x80, avx2])");
  }

  #[test]
  fn into_u8() {
    let raw: u8 = (P::AVX2 | P::PORTABLE).into();
    assert_eq!(raw, 0x0A);
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Property-Based Tests (proptest)
// Note: proptest uses filesystem for failure persistence, which Miri doesn't support.
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(all(test, not(miri)))]
mod proptests {
  use proptest::prelude::*;

  use super::*;
  use crate::X86;

  type P = Path<X86>;

  fn arb_path() -> impl Strategy<Value = P> {
    any::<u8>().prop_map(P::from_bits)
  }

  fn arb_single() -> impl Strategy<Value = P> {
    (0u32..8).prop_map(|n| P::from_bits(1 << n))
  }

  proptest! {
    /// Union is commutative: a | b == b | a
    #[test]
    fn union_commutative(a in arb_path(), b in arb_path()) {
      prop_assert_eq!(a | b, b | a);
    }

    /// Intersection is commutative: a & b == b & a
    #[test]
    fn intersection_commutative(a in arb_path(), b in arb_path()) {
      prop_assert_eq!(a & b, b & a);
    }

    /// Union and intersection are associative
    #[test]
    fn associative(a in arb_path(), b in arb_path(), c in arb_path()) {
      prop_assert_eq!((a | b) | c, a | (b | c));
      prop_assert_eq!((a & b) & c, a & (b & c));
    }

    /// Distributive law: a & (b | c) == (a & b) | (a & c)
    #[test]
    fn distributive(a in arb_path(), b in arb_path(), c in arb_path()) {
      prop_assert_eq!(a & (b | c), (a & b) | (a & c));
    }

    /// p & !p is empty, restricted to the catalog or not
    #[test]
    fn complement_is_disjoint(p in arb_path()) {
      prop_assert_eq!((p & !p) & X86::ALL, P::NONE);
      prop_assert_eq!(p & !p, P::NONE);
      prop_assert_eq!(!!p, p);
    }

    /// Everything is disjoint from NONE
    #[test]
    fn disjoint_from_none(p in arb_path()) {
      prop_assert!(disjoint(p, P::NONE));
    }

    /// Xor is union minus intersection
    #[test]
    fn xor_is_union_minus_intersection(a in arb_path(), b in arb_path()) {
      prop_assert_eq!(a ^ b, (a | b).difference(a & b));
    }

    /// De Morgan: !(a | b) == !a & !b
    #[test]
    fn de_morgan(a in arb_path(), b in arb_path()) {
      prop_assert_eq!(!(a | b), !a & !b);
      prop_assert_eq!(!(a & b), !a | !b);
    }

    /// Resolution yields a single member of the mask, and nothing in the mask is higher
    #[test]
    fn most_significant_is_top_member(p in arb_path()) {
      let top = p.most_significant();
      if p.is_empty() {
        prop_assert_eq!(top, P::NONE);
      } else {
        prop_assert!(top.is_single());
        prop_assert!(p.contains(top));
        prop_assert!(p.difference(top).bits() < top.bits());
      }
    }

    /// Resolution is idempotent
    #[test]
    fn most_significant_idempotent(p in arb_path()) {
      prop_assert_eq!(p.most_significant().most_significant(), p.most_significant());
    }

    /// Resolve(p | q) == p when p is the larger single bit
    #[test]
    fn most_significant_picks_larger_bit(p in arb_single(), q in arb_single()) {
      let expected = if p.bits() >= q.bits() { p } else { q };
      prop_assert_eq!((p | q).most_significant(), expected);
    }

    /// Single-bit paths resolve to themselves
    #[test]
    fn single_resolves_to_itself(p in arb_single()) {
      prop_assert_eq!(p.most_significant(), p);
    }

    /// Iteration yields count() single bits whose union is the set
    #[test]
    fn iter_partitions_set(p in arb_path()) {
      let mut union = P::NONE;
      let mut n = 0;
      for single in p {
        prop_assert!(single.is_single());
        prop_assert!(union.is_disjoint(single));
        union |= single;
        n += 1;
      }
      prop_assert_eq!(union, p);
      prop_assert_eq!(n, p.count());
    }
  }
}
