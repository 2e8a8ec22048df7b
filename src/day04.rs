// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::collections::BTreeSet;


/// Repeated numbers on either side of the bar count once.
#[cfg_attr(test, derive(Debug))]
struct Card {
	winning: BTreeSet<u32>,
	have: BTreeSet<u32>,
}

impl Card {
	fn matches(&self) -> usize {
		self.have.intersection(&self.winning).count()
	}

	fn points(&self) -> Option<u64> {
		match self.matches() {
			0 => Some(0),
			m => u32::try_from(m - 1).ok().and_then(|shift| 1_u64.checked_shl(shift)),
		}
	}
}


#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
	#[error(transparent)]
	Cards(#[from] parsing::CardsError),
	#[error("card {card}: {matches} matches overflow the point total")]
	Points { card: usize, matches: usize },
}

fn part1_impl(cards: &[Card]) -> Result<u64, Error> {
	cards.iter()
		.enumerate()
		.try_fold(0_u64, |total, (i, card)| card.points()
			.and_then(|points| total.checked_add(points))
			.ok_or(Error::Points { card: i + 1, matches: card.matches() }))
}

pub(crate) fn part1(input: &str) -> Result<u64, Error> {
	part1_impl(&parsing::try_cards_from_str(input)?)
}


/// Each card adds its copy count to the next `matches` cards, in card order.
fn part2_impl(cards: &[Card]) -> usize {
	let mut copies = vec![1; cards.len()];
	for (i, card) in cards.iter().enumerate() {
		let won = i + 1..(i + 1 + card.matches()).min(cards.len());
		for j in won { copies[j] += copies[i] }
	}
	copies.iter().sum()
}

pub(crate) fn part2(input: &str) -> Result<usize, parsing::CardsError> {
	Ok(part2_impl(&parsing::try_cards_from_str(input)?))
}


mod parsing {
	use std::{collections::BTreeSet, num::ParseIntError, str::FromStr};
	use super::Card;

	#[derive(Debug, thiserror::Error)]
	pub(crate) enum CardError {
		#[error("expected `Card <id>: <numbers> | <numbers>`")]
		Format,
		#[error("invalid card id: {0}")]
		Id(ParseIntError),
		#[error("card {found} out of order, expected card {expected}")]
		Order { expected: u32, found: u32 },
		#[error("invalid number: {0}")]
		Number(ParseIntError),
	}

	fn numbers_from_str(s: &str) -> Result<BTreeSet<u32>, CardError> {
		s.split_whitespace()
			.map(|n| n.parse().map_err(CardError::Number))
			.collect()
	}

	fn try_card_from_str(s: &str) -> Result<(u32, Card), CardError> {
		let (id, numbers) = s.strip_prefix("Card")
			.and_then(|s| s.split_once(':'))
			.ok_or(CardError::Format)?;
		let id = id.trim().parse().map_err(CardError::Id)?;
		let (winning, have) = numbers.split_once('|').ok_or(CardError::Format)?;
		Ok((id, Card { winning: numbers_from_str(winning)?, have: numbers_from_str(have)? }))
	}

	impl FromStr for Card {
		type Err = CardError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			try_card_from_str(s).map(|(_, card)| card)
		}
	}

	#[derive(Debug, thiserror::Error)]
	pub(crate) enum CardsError {
		#[error("empty input")]
		Empty,
		#[error("line {line}: {source}")]
		Card { line: usize, source: CardError },
	}

	/// Cards must be numbered `1, 2, ...` in order; copies are won by position.
	pub(super) fn try_cards_from_str(s: &str) -> Result<Vec<Card>, CardsError> {
		use {std::iter::once, either::Either};
		let lines = if s.trim().is_empty() {
			Either::Left(once(Err(CardsError::Empty)))
		} else {
			Either::Right(s.lines()
				.enumerate()
				.filter(|(_, line)| !line.trim().is_empty())
				.zip(1..)
				.map(|((l, line), expected)| {
					let card_err = |e| CardsError::Card { line: l + 1, source: e };
					let (found, card) = try_card_from_str(line).map_err(card_err)?;
					if found != expected { return Err(card_err(CardError::Order { expected, found })) }
					Ok(card)
				}))
		};
		lines.collect()
	}
}


#[test]
fn tests() {
	const INPUT: &str = indoc::indoc! { "
		Card 1: 41 48 83 86 17 | 83 86  6 31 17  9 48 53
		Card 2: 13 32 20 16 61 | 61 30 68 82 17 32 24 19
		Card 3:  1 21 53 59 44 | 69 82 63 72 16 21 14  1
		Card 4: 41 92 73 84 69 | 59 84 76 51 58  5 54 83
		Card 5: 87 83 26 28 32 | 88 30 70 12 93 22 82 36
		Card 6: 31 18 13 56 72 | 74 77 10 23 35 67 36 11
	" };
	assert_eq!(part1(INPUT).unwrap(), 13);
	assert_eq!(part2(INPUT).unwrap(), 30);
	assert_eq!("Card 1: 1 2 | 2 1".parse::<Card>().unwrap().matches(), 2);
	assert!(part2("Card 2: 1 | 1").is_err());
	assert!(part1("").is_err());

	// Repeats count once, on either side.
	assert_eq!(part1(&format!("Card 1: 1 | {}", vec!["1"; 33].join(" "))).unwrap(), 1);
	assert_eq!(part2("Card 1: 5 5 | 5 5 5\nCard 2: 1 | 2\nCard 3: 1 | 2").unwrap(), 4);

	let numbers = |n: u32| (1..=n).map(|i| i.to_string()).collect::<Vec<_>>().join(" ");
	assert_eq!(part1(&format!("Card 1: {0} | {0}", numbers(64))).unwrap(), 1 << 63);
	assert!(matches!(part1(&format!("Card 1: {0} | {0}", numbers(65))),
		Err(Error::Points { card: 1, matches: 65 })));
}
