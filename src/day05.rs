// Copyright (c) 2022 Bastiaan Marinus van de Weerd

mod interval;

use interval::Interval;


pub(crate) type Value = i64;

/// Maps every value in `source` to itself plus `shift`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Rule {
	source: Interval,
	shift: Value,
}

impl Rule {
	fn destination(&self) -> Interval {
		self.source.shifted(self.shift)
	}
}

/// Rules with disjoint sources, sorted by source. Values outside every rule
/// pass through unchanged.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
struct Stage {
	rules: Vec<Rule>,
}

impl Stage {
	fn new(mut rules: Vec<Rule>) -> Self {
		rules.sort_by_key(|r| r.source);
		Stage { rules }
	}

	fn rule_for(&self, x: Value) -> Option<&Rule> {
		let after = self.rules.partition_point(|r| r.source.lower() <= x);
		after.checked_sub(1)
			.map(|i| &self.rules[i])
			.filter(|r| r.source.contains(x))
	}

	fn apply(&self, x: Value) -> Value {
		x + self.rule_for(x).map_or(0, |r| r.shift)
	}
}

struct Almanac<'s> {
	seeds: Vec<Value>,
	categories: Vec<&'s str>,
	pipeline: Vec<Stage>,
}


/// The single stage equivalent to applying `upstream`, then `downstream`.
///
/// Sweeps the boundaries of `upstream`'s destinations and `downstream`'s
/// sources. Every elementary span where an upstream rule is active becomes a
/// rule whose source is pulled back through that upstream rule, shifted by the
/// sum of all active shifts. Spans with a total shift of zero are left out.
fn compose(upstream: &Stage, downstream: &Stage) -> Stage {
	use itertools::Itertools as _;

	// Values `upstream` passes through unchanged still reach `downstream`.
	let mut upstream_rules = upstream.rules.clone();
	for rule in &downstream.rules {
		let mut uncovered = vec![rule.source];
		for covered in &upstream.rules {
			uncovered = uncovered.into_iter()
				.flat_map(|piece| {
					let (below, above) = piece.subtract(&covered.source);
					below.into_iter().chain(above)
				})
				.collect();
		}
		upstream_rules.extend(uncovered.into_iter().map(|source| Rule { source, shift: 0 }));
	}

	#[derive(Clone, Copy)]
	enum Edge { Open, Close }
	#[derive(Clone, Copy)]
	enum Layer { Upstream(usize), Downstream(usize) }

	// Closed intervals close just past their upper bound.
	let edges = |layer: Layer, interval: Interval|
		[(interval.lower(), Edge::Open, layer), (interval.upper() + 1, Edge::Close, layer)];
	let events = upstream_rules.iter()
		.enumerate()
		.flat_map(|(i, r)| edges(Layer::Upstream(i), r.destination()))
		.chain(downstream.rules.iter()
			.enumerate()
			.flat_map(|(i, r)| edges(Layer::Downstream(i), r.source)))
		.sorted_by_key(|&(at, _, _)| at);

	let mut active_upstream = Vec::<usize>::new();
	let mut active_downstream = Vec::<usize>::new();
	let mut merged = vec![];
	let mut from = Value::MIN;

	for (at, edge, layer) in events {
		if !active_upstream.is_empty() {
			if let Some(span) = Interval::new(from, at - 1) {
				let downstream_shift = active_downstream.iter()
					.map(|&i| downstream.rules[i].shift)
					.sum::<Value>();
				for &i in &active_upstream {
					let upstream_shift = upstream_rules[i].shift;
					let shift = upstream_shift + downstream_shift;
					if shift == 0 { continue }
					merged.push(Rule { source: span.shifted(-upstream_shift), shift });
				}
			}
		}

		let (active, i) = match layer {
			Layer::Upstream(i) => (&mut active_upstream, i),
			Layer::Downstream(i) => (&mut active_downstream, i),
		};
		match edge {
			Edge::Open => active.push(i),
			Edge::Close => active.retain(|&j| j != i),
		}
		from = at;
	}

	Stage {
		rules: merged.into_iter()
			.sorted_by_key(|r| r.source)
			.coalesce(|a, b| match a.source.union(&b.source) {
				Some(source) if a.shift == b.shift => Ok(Rule { source, shift: a.shift }),
				_ => Err((a, b)),
			})
			.collect(),
	}
}

/// Folds a pipeline into a single stage. An empty pipeline is the identity.
fn flatten(pipeline: &[Stage]) -> Stage {
	pipeline.iter()
		.cloned()
		.enumerate()
		.reduce(|(_, upstream), (i, downstream)| {
			let composed = compose(&upstream, &downstream);
			tracing::debug!(stage = i, rules = composed.rules.len(), "composed stage");
			(i, composed)
		})
		.map(|(_, stage)| stage)
		.unwrap_or_default()
}

fn locate(seed: Value, pipeline: &[Stage]) -> Value {
	pipeline.iter().fold(seed, |x, stage| stage.apply(x))
}

fn lowest_location(range: Interval, transform: &Stage) -> Value {
	let mut lowest = Value::MAX;
	let mut uncovered = vec![range];
	for rule in &transform.rules {
		uncovered = uncovered.into_iter()
			.flat_map(|piece| {
				if let Some(covered) = piece.intersect(&rule.source) {
					lowest = lowest.min(covered.lower() + rule.shift);
				}
				let (below, above) = piece.subtract(&rule.source);
				below.into_iter().chain(above)
			})
			.collect();
	}
	uncovered.iter().map(Interval::lower).fold(lowest, Value::min)
}

/// Pairs up seeds as `(start, length)`; empty ranges are dropped.
fn seed_ranges(seeds: &[Value]) -> Result<Vec<Interval>, Error> {
	let pairs = seeds.chunks_exact(2);
	if let [unpaired] = pairs.remainder() { return Err(Error::UnpairedSeed(*unpaired)) }
	Ok(pairs.filter_map(|pair| Interval::from_start_len(pair[0], pair[1])).collect())
}


#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
	#[error(transparent)]
	Almanac(#[from] parsing::AlmanacError),
	#[error("seed {0} has no range length")]
	UnpairedSeed(Value),
	#[error("no seeds to locate")]
	NoSeeds,
}

fn input_from_str(s: &str) -> Result<Almanac<'_>, Error> {
	let almanac = parsing::try_almanac_from_str(s)?;
	tracing::debug!(chain = %almanac.categories.join(" -> "), "parsed almanac");
	Ok(almanac)
}


fn part1_impl(almanac: &Almanac) -> Result<Value, Error> {
	almanac.seeds.iter()
		.map(|&seed| locate(seed, &almanac.pipeline))
		.min()
		.ok_or(Error::NoSeeds)
}

pub(crate) fn part1(input: &str) -> Result<Value, Error> {
	part1_impl(&input_from_str(input)?)
}


fn part2_impl(almanac: &Almanac) -> Result<Value, Error> {
	use rayon::prelude::{IntoParallelRefIterator as _, ParallelIterator as _};

	let ranges = seed_ranges(&almanac.seeds)?;
	let transform = flatten(&almanac.pipeline);
	tracing::debug!(ranges = ranges.len(), rules = transform.rules.len(), "flattened pipeline");

	ranges.par_iter()
		.map(|&range| lowest_location(range, &transform))
		.min()
		.ok_or(Error::NoSeeds)
}

pub(crate) fn part2(input: &str) -> Result<Value, Error> {
	part2_impl(&input_from_str(input)?)
}


mod parsing {
	use std::{num::ParseIntError, str::FromStr};
	use super::{Almanac, Interval, Rule, Stage, Value};

	fn number_from_str(s: &str) -> Result<Value, ParseIntError> {
		s.parse::<u32>().map(Value::from)
	}

	#[derive(Debug, thiserror::Error)]
	pub(crate) enum RuleError {
		#[error("expected 3 numbers, found {0}")]
		Arity(usize),
		#[error("number {index}: {source}")]
		Number { index: usize, source: ParseIntError },
		#[error("range length must be positive")]
		EmptyRange,
	}

	impl FromStr for Rule {
		type Err = RuleError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			let numbers = s.split_whitespace()
				.enumerate()
				.map(|(i, n)| number_from_str(n)
					.map_err(|e| RuleError::Number { index: i + 1, source: e }))
				.collect::<Result<Vec<_>, _>>()?;
			let [destination_start, source_start, len] = numbers[..]
				else { return Err(RuleError::Arity(numbers.len())) };
			let source = Interval::from_start_len(source_start, len)
				.ok_or(RuleError::EmptyRange)?;
			Ok(Rule { source, shift: destination_start - source_start })
		}
	}

	#[derive(Debug, thiserror::Error)]
	pub(crate) enum AlmanacError {
		#[error("line 1: expected `seeds:`")]
		SeedsHeader,
		#[error("line 1, seed {index}: {source}")]
		Seed { index: usize, source: ParseIntError },
		#[error("line {line}: expected a blank line")]
		ExpectedBlank { line: usize },
		#[error("line {line}: expected `<source>-to-<destination> map:`")]
		MapHeader { line: usize },
		#[error("line {line}: map from `{found}` does not continue from `{expected}`")]
		BrokenChain { line: usize, expected: String, found: String },
		#[error("line {line}: {source}")]
		InvalidRule { line: usize, source: RuleError },
		#[error("no maps follow the seeds")]
		NoMaps,
	}

	pub(super) fn try_almanac_from_str(s: &str) -> Result<Almanac<'_>, AlmanacError> {
		use AlmanacError as E;

		let mut lines = s.lines()
			.enumerate()
			.map(|(l, line)| (l + 1, line))
			.peekable();

		let seeds = lines.next()
			.and_then(|(_, line)| line.strip_prefix("seeds:"))
			.ok_or(E::SeedsHeader)?;
		let seeds = seeds.split_whitespace()
			.enumerate()
			.map(|(i, n)| number_from_str(n)
				.map_err(|e| E::Seed { index: i + 1, source: e }))
			.collect::<Result<Vec<_>, _>>()?;

		let mut categories = vec!["seed"];
		let mut pipeline = vec![];

		loop {
			let mut separated = false;
			while matches!(lines.peek(), Some((_, line)) if line.trim().is_empty()) {
				lines.next();
				separated = true;
			}
			let Some((line, header)) = lines.next() else { break };
			if !separated { return Err(E::ExpectedBlank { line }) }

			let (from, to) = header.trim_end()
				.strip_suffix(" map:")
				.and_then(|name| name.split_once("-to-"))
				.ok_or(E::MapHeader { line })?;
			let expected = categories[categories.len() - 1];
			if from != expected { return Err(E::BrokenChain {
				line, expected: expected.to_owned(), found: from.to_owned() }) }
			categories.push(to);

			let mut rules = vec![];
			while let Some(&(line, rule)) = lines.peek() {
				if rule.trim().is_empty() { break }
				lines.next();
				rules.push(rule.parse::<Rule>().map_err(|e| E::InvalidRule { line, source: e })?);
			}
			pipeline.push(Stage::new(rules));
		}

		if pipeline.is_empty() { return Err(E::NoMaps) }
		Ok(Almanac { seeds, categories, pipeline })
	}
}


#[cfg(test)]
mod tests {
	use super::*;
	use {parsing::{AlmanacError, RuleError}, proptest::prelude::*, test_case::test_case};

	const INPUT: &str = indoc::indoc! { "
		seeds: 79 14 55 13

		seed-to-soil map:
		50 98 2
		52 50 48

		soil-to-fertilizer map:
		0 15 37
		37 52 2
		39 0 15

		fertilizer-to-water map:
		49 53 8
		0 11 42
		42 0 7
		57 7 4

		water-to-light map:
		88 18 7
		18 25 70

		light-to-temperature map:
		45 77 23
		81 45 19
		68 64 13

		temperature-to-humidity map:
		0 69 1
		1 0 69

		humidity-to-location map:
		60 56 37
		56 93 4
	" };

	fn iv(lower: Value, upper: Value) -> Interval {
		Interval::new(lower, upper).unwrap()
	}

	#[test]
	fn example() {
		let almanac = input_from_str(INPUT).unwrap();
		assert_eq!(almanac.pipeline.len(), 7);
		assert_eq!(almanac.categories.last(), Some(&"location"));
		assert_eq!(locate(79, &almanac.pipeline), 82);
		assert_eq!(part1_impl(&almanac).unwrap(), 35);
		assert_eq!(part2_impl(&almanac).unwrap(), 46);
		assert_eq!(part1(INPUT).unwrap(), 35);
		assert_eq!(part2(INPUT).unwrap(), 46);
	}

	#[test_case(97 => 99; "last of longer rule")]
	#[test_case(98 => 50; "start of rule")]
	#[test_case(99 => 51; "end of rule")]
	#[test_case(100 => 100; "one past rule")]
	#[test_case(50 => 52; "start of next rule")]
	#[test_case(49 => 49; "one before rule")]
	fn seed_to_soil_boundaries(seed: Value) -> Value {
		let almanac = input_from_str(INPUT).unwrap();
		let stage = &almanac.pipeline[0];
		let point = stage.apply(seed);
		assert_eq!(lowest_location(iv(seed, seed), stage), point);
		point
	}

	#[test]
	fn touching_rules_compose_without_overlap() {
		let stage = |rules: &[(Value, Value, Value)]| Stage::new(rules.iter()
			.map(|&(lower, upper, shift)| Rule { source: iv(lower, upper), shift })
			.collect());
		let upstream = stage(&[(0, 4, 10), (5, 9, 10)]);
		let downstream = stage(&[(10, 19, 1)]);
		let composed = compose(&upstream, &downstream);
		assert_eq!(composed, stage(&[(0, 9, 11), (10, 19, 1)]));
		assert_eq!(compose(&composed, &Stage::default()), composed);
	}

	#[test]
	fn empty_pipeline_is_identity() {
		assert_eq!(flatten(&[]), Stage::default());
		assert_eq!(locate(42, &[]), 42);
	}

	#[test]
	fn seed_range_pairing() {
		assert_eq!(seed_ranges(&[79, 14, 55, 0]).unwrap(), vec![iv(79, 92)]);
		assert!(matches!(seed_ranges(&[79, 14, 55]), Err(Error::UnpairedSeed(55))));
		assert!(matches!(part2("seeds: 1 0\n\nseed-to-soil map:\n"), Err(Error::NoSeeds)));
		assert!(matches!(part1("seeds:\n\nseed-to-soil map:\n"), Err(Error::NoSeeds)));
	}

	#[test]
	fn parse_errors() {
		macro_rules! err { ( $s:expr ) => {
			match input_from_str($s) {
				Err(Error::Almanac(e)) => e,
				Err(e) => panic!("unexpected error {e}"),
				Ok(_) => panic!("parsed {:?}", $s),
			}
		} }

		assert!(matches!(err!("soil: 1"), AlmanacError::SeedsHeader));
		assert!(matches!(err!("seeds: 1 x"), AlmanacError::Seed { index: 2, .. }));
		assert!(matches!(err!("seeds: 1\nseed-to-soil map:"), AlmanacError::ExpectedBlank { line: 2 }));
		assert!(matches!(err!("seeds: 1\n\nseed to soil"), AlmanacError::MapHeader { line: 3 }));
		assert!(matches!(err!("seeds: 1\n\nsoil-to-water map:"),
			AlmanacError::BrokenChain { line: 3, .. }));
		assert!(matches!(err!("seeds: 1\n\nseed-to-soil map:\n1 2"),
			AlmanacError::InvalidRule { line: 4, source: RuleError::Arity(2) }));
		assert!(matches!(err!("seeds: 1\n\nseed-to-soil map:\n1 -2 3"),
			AlmanacError::InvalidRule { line: 4, source: RuleError::Number { index: 2, .. } }));
		assert!(matches!(err!("seeds: 1\n\nseed-to-soil map:\n1 2 0"),
			AlmanacError::InvalidRule { line: 4, source: RuleError::EmptyRange }));
		assert!(matches!(err!("seeds: 1\n\n"), AlmanacError::NoMaps));
	}

	fn stage() -> impl Strategy<Value = Stage> {
		prop::collection::vec((0 as Value..20, 1 as Value..20, -40 as Value..40), 0..5)
			.prop_map(|shapes| {
				let mut lower = 0;
				Stage::new(shapes.into_iter()
					.map(|(gap, len, shift)| {
						let source = Interval::from_start_len(lower + gap, len).unwrap();
						lower = source.upper() + 1;
						Rule { source, shift }
					})
					.collect())
			})
	}

	fn pipeline() -> impl Strategy<Value = Vec<Stage>> {
		prop::collection::vec(stage(), 1..5)
	}

	proptest! {
		#[test]
		fn flattened_agrees_with_points(
			pipeline in pipeline(),
			seeds in prop::collection::vec(-30 as Value..150, 1..10),
		) {
			let transform = flatten(&pipeline);
			for seed in seeds {
				prop_assert_eq!(locate(seed, &pipeline), transform.apply(seed));
				prop_assert_eq!(locate(seed, &pipeline), lowest_location(iv(seed, seed), &transform));
			}
		}

		#[test]
		fn flattened_ranges_agree_with_points(
			pipeline in pipeline(),
			start in -30 as Value..150,
			len in 1 as Value..60,
		) {
			let range = Interval::from_start_len(start, len).unwrap();
			let expected = (range.lower()..=range.upper())
				.map(|seed| locate(seed, &pipeline))
				.min();
			prop_assert_eq!(Some(lowest_location(range, &flatten(&pipeline))), expected);
		}

		#[test]
		fn flattened_rules_are_sorted_and_disjoint(pipeline in pipeline()) {
			let transform = flatten(&pipeline);
			for pair in transform.rules.windows(2) {
				prop_assert!(pair[0].source.upper() < pair[1].source.lower());
			}
		}

		#[test]
		fn single_stage_flattens_to_itself(stage in stage()) {
			prop_assert_eq!(flatten(&[stage.clone()]), stage);
		}
	}
}
