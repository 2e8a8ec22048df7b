// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::{env, fs, io, path::PathBuf};


pub(crate) type Answer = Result<String, Box<dyn std::error::Error + Send + Sync>>;

pub(crate) struct Day {
	pub(crate) number: u8,
	pub(crate) part1: fn(&str) -> Answer,
	pub(crate) part2: fn(&str) -> Answer,
}

/// Declares `dayNN` modules and a `days()` table calling their `part1` and `part2`.
macro_rules! mod_days { ( $( $day:literal ),* $(,)? ) => { paste::paste! {
	$( mod [<day $day>]; )*

	fn days() -> Vec<util::Day> {
		vec![ $( util::Day {
			number: $day,
			part1: |s| [<day $day>]::part1(s)
				.map(|answer| answer.to_string())
				.map_err(Into::into),
			part2: |s| [<day $day>]::part2(s)
				.map(|answer| answer.to_string())
				.map_err(Into::into),
		} ),* ]
	}
} } }

pub(crate) use mod_days;


pub(crate) const INPUTS_VAR: &str = "ADVENT23_INPUTS";

pub(crate) struct Inputs {
	dir: PathBuf,
}

impl Inputs {
	pub(crate) fn from_env() -> Self {
		let dir = env::var_os(INPUTS_VAR)
			.map(PathBuf::from)
			.unwrap_or_else(|| PathBuf::from("inputs"));
		Inputs { dir }
	}

	pub(crate) fn path(&self, day: u8) -> PathBuf {
		self.dir.join(format!("day{day:02}.txt"))
	}

	/// Returns `Ok(None)` when the day has no input file.
	pub(crate) fn read(&self, day: u8) -> io::Result<Option<String>> {
		match fs::read_to_string(self.path(day)) {
			Ok(s) => Ok(Some(s)),
			Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
			Err(e) => Err(e),
		}
	}
}


#[test]
fn input_paths() {
	let inputs = Inputs { dir: PathBuf::from("some/where") };
	assert_eq!(inputs.path(5), PathBuf::from("some/where/day05.txt"));
	assert_eq!(inputs.path(12), PathBuf::from("some/where/day12.txt"));
	assert!(matches!(inputs.read(1), Ok(None)));
}
