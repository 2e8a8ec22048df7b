// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use super::Value;


/// All integers `x` with `lower <= x <= upper`. Never empty.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub(super) struct Interval {
	lower: Value,
	upper: Value,
}

/// How interval `a` relates to interval `b`. Equal bounds always count as
/// containment, so `a == b` is `Contains`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(super) enum Relation {
	Disjoint,
	Contains,
	ContainedBy,
	/// `a` starts first and its upper end reaches into `b`.
	OverlapsLower,
	/// `b` starts first and `a`'s lower end reaches into `b`.
	OverlapsUpper,
}

impl Interval {
	pub(super) fn new(lower: Value, upper: Value) -> Option<Self> {
		(lower <= upper).then_some(Interval { lower, upper })
	}

	/// Panics on inverted bounds; only for bounds the algebra derived itself.
	fn spanning(lower: Value, upper: Value) -> Self {
		assert!(lower <= upper, "inverted interval bounds {lower}..={upper}");
		Interval { lower, upper }
	}

	/// The `len` integers starting at `start`, or `None` when `len` is not
	/// positive or the upper bound overflows.
	pub(super) fn from_start_len(start: Value, len: Value) -> Option<Self> {
		if len <= 0 { return None }
		let upper = start.checked_add(len - 1)?;
		Some(Interval { lower: start, upper })
	}

	pub(super) fn lower(&self) -> Value { self.lower }
	pub(super) fn upper(&self) -> Value { self.upper }

	pub(super) fn contains(&self, x: Value) -> bool {
		self.lower <= x && x <= self.upper
	}

	pub(super) fn shifted(&self, shift: Value) -> Self {
		Interval { lower: self.lower + shift, upper: self.upper + shift }
	}

	pub(super) fn relation(&self, other: &Self) -> Relation {
		use Relation::*;
		let (a, b) = (self, other);
		if a.upper < b.lower || b.upper < a.lower { return Disjoint }
		match (a.lower <= b.lower, a.upper >= b.upper) {
			(true, true) => Contains,
			(false, false) => ContainedBy,
			(true, false) if a.lower == b.lower => ContainedBy,
			(false, true) if a.upper == b.upper => ContainedBy,
			(true, false) => OverlapsLower,
			(false, true) => OverlapsUpper,
		}
	}

	pub(super) fn intersect(&self, other: &Self) -> Option<Self> {
		use Relation::*;
		match self.relation(other) {
			Disjoint => None,
			Contains => Some(*other),
			ContainedBy => Some(*self),
			OverlapsLower => Some(Interval::spanning(other.lower, self.upper)),
			OverlapsUpper => Some(Interval::spanning(self.lower, other.upper)),
		}
	}

	/// The parts of `self` below and above `other`.
	pub(super) fn subtract(&self, other: &Self) -> (Option<Self>, Option<Self>) {
		use Relation::*;
		let below = || Interval::spanning(self.lower, other.lower - 1);
		let above = || Interval::spanning(other.upper + 1, self.upper);
		match self.relation(other) {
			Disjoint if self.upper < other.lower => (Some(*self), None),
			Disjoint => (None, Some(*self)),
			Contains => (
				(self.lower < other.lower).then(below),
				(other.upper < self.upper).then(above),
			),
			ContainedBy => (None, None),
			OverlapsLower => (Some(below()), None),
			OverlapsUpper => (None, Some(above())),
		}
	}

	/// The merged interval if `self` and `other` overlap or touch.
	pub(super) fn union(&self, other: &Self) -> Option<Self> {
		let (first, second) = if self.lower <= other.lower { (self, other) } else { (other, self) };
		if first.upper < second.lower - 1 { return None }
		Some(Interval::spanning(first.lower, first.upper.max(second.upper)))
	}
}


#[cfg(test)]
mod tests {
	use super::*;
	use {proptest::prelude::*, test_case::test_case};

	fn iv(lower: Value, upper: Value) -> Interval {
		Interval::new(lower, upper).unwrap()
	}

	#[test_case(iv(0, 4), iv(6, 9) => Relation::Disjoint; "before")]
	#[test_case(iv(6, 9), iv(0, 4) => Relation::Disjoint; "after")]
	#[test_case(iv(0, 4), iv(5, 9) => Relation::Disjoint; "touching")]
	#[test_case(iv(0, 9), iv(3, 5) => Relation::Contains; "strictly contains")]
	#[test_case(iv(3, 5), iv(3, 5) => Relation::Contains; "equal")]
	#[test_case(iv(3, 9), iv(3, 5) => Relation::Contains; "shared lower, wider")]
	#[test_case(iv(3, 5), iv(3, 9) => Relation::ContainedBy; "shared lower, narrower")]
	#[test_case(iv(5, 9), iv(0, 9) => Relation::ContainedBy; "shared upper, narrower")]
	#[test_case(iv(4, 6), iv(0, 9) => Relation::ContainedBy; "strictly inside")]
	#[test_case(iv(0, 5), iv(5, 9) => Relation::OverlapsLower; "single shared lower")]
	#[test_case(iv(0, 6), iv(3, 9) => Relation::OverlapsLower; "overlaps lower")]
	#[test_case(iv(3, 9), iv(0, 6) => Relation::OverlapsUpper; "overlaps upper")]
	fn relation(a: Interval, b: Interval) -> Relation {
		a.relation(&b)
	}

	#[test]
	fn subtract_cases() {
		assert_eq!(iv(0, 9).subtract(&iv(3, 5)), (Some(iv(0, 2)), Some(iv(6, 9))));
		assert_eq!(iv(0, 9).subtract(&iv(0, 5)), (None, Some(iv(6, 9))));
		assert_eq!(iv(0, 9).subtract(&iv(5, 9)), (Some(iv(0, 4)), None));
		assert_eq!(iv(0, 6).subtract(&iv(3, 9)), (Some(iv(0, 2)), None));
		assert_eq!(iv(3, 9).subtract(&iv(0, 6)), (None, Some(iv(7, 9))));
		assert_eq!(iv(3, 5).subtract(&iv(0, 9)), (None, None));
		assert_eq!(iv(6, 9).subtract(&iv(0, 4)), (None, Some(iv(6, 9))));
	}

	#[test]
	fn union_cases() {
		assert_eq!(iv(0, 4).union(&iv(5, 9)), Some(iv(0, 9)));
		assert_eq!(iv(5, 9).union(&iv(0, 6)), Some(iv(0, 9)));
		assert_eq!(iv(0, 9).union(&iv(2, 3)), Some(iv(0, 9)));
		assert_eq!(iv(0, 3).union(&iv(5, 9)), None);
	}

	#[test]
	fn construction() {
		assert_eq!(Interval::new(3, 2), None);
		assert_eq!(Interval::from_start_len(98, 2), Some(iv(98, 99)));
		assert_eq!(Interval::from_start_len(98, 0), None);
		assert_eq!(Interval::from_start_len(Value::MAX, 2), None);
	}

	fn interval() -> impl Strategy<Value = Interval> {
		(-50 as Value..50, 0 as Value..30).prop_map(|(lower, len)| iv(lower, lower + len))
	}

	proptest! {
		#[test]
		fn intersect_is_commutative(a in interval(), b in interval()) {
			prop_assert_eq!(a.intersect(&b), b.intersect(&a));
		}

		#[test]
		fn self_algebra(a in interval()) {
			prop_assert_eq!(a.intersect(&a), Some(a));
			prop_assert_eq!(a.subtract(&a), (None, None));
			prop_assert_eq!(a.relation(&a), Relation::Contains);
		}

		#[test]
		fn subtract_and_intersect_partition(a in interval(), b in interval()) {
			let (below, above) = a.subtract(&b);
			let mut pieces = [below, a.intersect(&b), above]
				.into_iter()
				.flatten()
				.collect::<Vec<_>>();
			pieces.sort();
			prop_assert_eq!(pieces.first().map(Interval::lower), Some(a.lower()));
			prop_assert_eq!(pieces.last().map(Interval::upper), Some(a.upper()));
			for pair in pieces.windows(2) {
				prop_assert_eq!(pair[0].upper() + 1, pair[1].lower());
			}
			for x in a.lower()..=a.upper() {
				let covered = pieces.iter().filter(|p| p.contains(x)).count();
				prop_assert_eq!(covered, 1);
				prop_assert_eq!(b.contains(x), a.intersect(&b).map_or(false, |i| i.contains(x)));
			}
		}
	}
}
