// Copyright (c) 2022 Bastiaan Marinus van de Weerd


const SPELLED_DIGITS: [&str; 10] = [
	"zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine"];

/// The digit starting at byte `at`, if any.
fn digit_at(line: &str, at: usize, spelled: bool) -> Option<u32> {
	let rest = &line.as_bytes()[at..];
	match rest.first() {
		Some(b) if b.is_ascii_digit() => Some((b - b'0') as u32),
		_ if spelled => SPELLED_DIGITS.iter()
			.position(|word| rest.starts_with(word.as_bytes()))
			.map(|d| d as u32),
		_ => None,
	}
}

fn calibration_value(line: &str, spelled: bool) -> Option<u32> {
	// Matches may overlap, e.g. `twone` ends in `one`.
	let first = (0..line.len()).find_map(|at| digit_at(line, at, spelled))?;
	let last = (0..line.len()).rev().find_map(|at| digit_at(line, at, spelled))?;
	Some(first * 10 + last)
}


#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
	#[error("empty input")]
	Empty,
	#[error("line {line}: no digit")]
	NoDigit { line: usize },
}

fn calibration_values(s: &str, spelled: bool) -> impl Iterator<Item = Result<u32, Error>> + '_ {
	use {std::iter::once, either::Either};
	if s.trim().is_empty() { return Either::Left(once(Err(Error::Empty))) }

	Either::Right(s.lines()
		.enumerate()
		.filter(|(_, line)| !line.trim().is_empty())
		.map(move |(l, line)| calibration_value(line, spelled)
			.ok_or(Error::NoDigit { line: l + 1 })))
}


pub(crate) fn part1(input: &str) -> Result<u32, Error> {
	calibration_values(input, false).sum()
}

pub(crate) fn part2(input: &str) -> Result<u32, Error> {
	calibration_values(input, true).sum()
}


#[test]
fn tests() {
	const INPUT1: &str = indoc::indoc! { "
		1abc2
		pqr3stu8vwx
		a1b2c3d4e5f
		treb7uchet
	" };
	const INPUT2: &str = indoc::indoc! { "
		two1nine
		eightwothree
		abcone2threexyz
		xtwone3four
		4nineeightseven2
		zoneight234
		7pqrstsixteen
	" };
	assert_eq!(part1(INPUT1).unwrap(), 142);
	assert_eq!(part2(INPUT2).unwrap(), 281);
	assert_eq!(calibration_value("twone", true), Some(21));
	assert_eq!(calibration_value("twone", false), None);
	assert!(matches!(part1("abc\n1"), Err(Error::NoDigit { line: 1 })));
	assert!(matches!(part1(""), Err(Error::Empty)));
}
