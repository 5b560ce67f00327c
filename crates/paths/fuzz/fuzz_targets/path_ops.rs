//! Fuzz target for Path set operations.
//!
//! Tests algebraic properties:
//! - Commutativity: a | b == b | a, a & b == b & a
//! - Associativity and distributivity
//! - Complement: a & !a == NONE, !!a == a
//! - Subset relationships after union and intersection

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use paths::{Family, NativePath, Native, disjoint};

#[derive(Arbitrary, Debug)]
struct Input {
  a: u8,
  b: u8,
  c: u8,
}

fuzz_target!(|input: Input| {
  let a = NativePath::from_bits(input.a);
  let b = NativePath::from_bits(input.b);
  let c = NativePath::from_bits(input.c);

  // ─── Commutativity ───
  assert_eq!(a | b, b | a, "union must be commutative");
  assert_eq!(a & b, b & a, "intersection must be commutative");
  assert_eq!(a ^ b, b ^ a, "symmetric difference must be commutative");

  // ─── Associativity ───
  assert_eq!((a | b) | c, a | (b | c), "union must be associative");
  assert_eq!((a & b) & c, a & (b & c), "intersection must be associative");

  // ─── Distributivity ───
  assert_eq!(a & (b | c), (a & b) | (a & c), "intersection must distribute over union");

  // ─── Complement ───
  assert_eq!(a & !a, NativePath::NONE, "a & !a must be empty");
  assert_eq!((a & !a) & Native::ALL, NativePath::NONE, "a & !a must be empty within the catalog");
  assert_eq!(!!a, a, "double complement must be identity");
  assert!(disjoint(a, NativePath::NONE), "everything is disjoint from NONE");

  // ─── Subset relationships ───
  assert!((a | b).contains(a), "union must contain first operand");
  assert!((a | b).contains(b), "union must contain second operand");
  assert!(a.contains(a & b), "first operand must contain intersection");
  assert!(b.contains(a & b), "second operand must contain intersection");

  // ─── Disjointness agrees with intersection ───
  assert_eq!(a.is_disjoint(b), (a & b).is_empty());
});
