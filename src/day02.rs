// Copyright (c) 2022 Bastiaan Marinus van de Weerd


/// Cube counts, indexed by `Color`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
struct Cubes([u32; 3]);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Color { Red, Green, Blue }

#[cfg_attr(test, derive(Debug))]
struct Game {
	id: u32,
	reveals: Vec<Cubes>,
}

const BAG: Cubes = Cubes([12, 13, 14]);

impl Cubes {
	fn fits_in(&self, bag: &Cubes) -> bool {
		self.0.iter().zip(bag.0).all(|(&n, max)| n <= max)
	}

	fn max(self, other: Cubes) -> Cubes {
		Cubes(std::array::from_fn(|c| self.0[c].max(other.0[c])))
	}

	fn power(&self) -> u32 {
		self.0.iter().product()
	}
}

impl Game {
	fn minimum_bag(&self) -> Cubes {
		self.reveals.iter().copied().fold(Cubes::default(), Cubes::max)
	}
}


fn part1_impl(games: impl Iterator<Item = Game>) -> u32 {
	games
		.filter(|game| game.reveals.iter().all(|reveal| reveal.fits_in(&BAG)))
		.map(|game| game.id)
		.sum()
}

pub(crate) fn part1(input: &str) -> Result<u32, parsing::GamesError> {
	Ok(part1_impl(parsing::try_games_from_str(input)?.into_iter()))
}


fn part2_impl(games: impl Iterator<Item = Game>) -> u32 {
	games.map(|game| game.minimum_bag().power()).sum()
}

pub(crate) fn part2(input: &str) -> Result<u32, parsing::GamesError> {
	Ok(part2_impl(parsing::try_games_from_str(input)?.into_iter()))
}


mod parsing {
	use std::{num::ParseIntError, str::FromStr};
	use super::{Color, Cubes, Game};

	#[derive(Debug, thiserror::Error)]
	pub(crate) enum GameError {
		#[error("expected `Game <id>: `")]
		Format,
		#[error("invalid game id: {0}")]
		Id(ParseIntError),
		#[error("expected `<count> <color>`, found `{0}`")]
		Cubes(String),
		#[error("invalid cube count: {0}")]
		Count(ParseIntError),
		#[error("unknown color `{0}`")]
		Color(String),
	}

	impl FromStr for Color {
		type Err = GameError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			match s {
				"red" => Ok(Color::Red),
				"green" => Ok(Color::Green),
				"blue" => Ok(Color::Blue),
				_ => Err(GameError::Color(s.to_owned())),
			}
		}
	}

	/// A colour named twice in one reveal keeps its largest count.
	impl FromStr for Cubes {
		type Err = GameError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			let mut cubes = Cubes::default();
			for count_color in s.split(',') {
				let (count, color) = count_color.trim().split_once(' ')
					.ok_or_else(|| GameError::Cubes(count_color.trim().to_owned()))?;
				let count = count.parse::<u32>().map_err(GameError::Count)?;
				let color = color.parse::<Color>()?;
				let slot = &mut cubes.0[color as usize];
				*slot = (*slot).max(count);
			}
			Ok(cubes)
		}
	}

	impl FromStr for Game {
		type Err = GameError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			let (id, reveals) = s.strip_prefix("Game ")
				.and_then(|s| s.split_once(':'))
				.ok_or(GameError::Format)?;
			let id = id.parse().map_err(GameError::Id)?;
			let reveals = reveals.split(';')
				.map(str::parse::<Cubes>)
				.collect::<Result<Vec<_>, _>>()?;
			Ok(Game { id, reveals })
		}
	}

	#[derive(Debug, thiserror::Error)]
	#[error("line {line}: {source}")]
	pub(crate) struct GamesError { line: usize, source: GameError }

	pub(super) fn try_games_from_str(s: &str) -> Result<Vec<Game>, GamesError> {
		s.lines()
			.enumerate()
			.filter(|(_, line)| !line.trim().is_empty())
			.map(|(l, line)| line.parse::<Game>()
				.map_err(|e| GamesError { line: l + 1, source: e }))
			.collect()
	}
}


#[test]
fn tests() {
	const INPUT: &str = indoc::indoc! { "
		Game 1: 3 blue, 4 red; 1 red, 2 green, 6 blue; 2 green
		Game 2: 1 blue, 2 green; 3 green, 4 blue, 1 red; 1 green, 1 blue
		Game 3: 8 green, 6 blue, 20 red; 5 blue, 4 red, 13 green; 5 green, 1 red
		Game 4: 1 green, 3 red, 6 blue; 3 green, 6 red; 3 green, 15 blue, 14 red
		Game 5: 6 red, 1 blue, 3 green; 2 blue, 1 red, 2 green
	" };
	assert_eq!(part1(INPUT).unwrap(), 8);
	assert_eq!(part2(INPUT).unwrap(), 2286);
	assert!(part1("Game 1: 3 purple").is_err());
	assert!(part1("Game x: 3 red").is_err());

	assert_eq!("3 red, 10 red".parse::<Cubes>().unwrap(), Cubes([10, 0, 0]));
	assert_eq!(part1("Game 7: 3 red, 10 red; 4294967295 blue, 4294967295 blue").unwrap(), 0);
	assert_eq!(part1("Game 7: 3 red, 10 red; 2 green").unwrap(), 7);
}
