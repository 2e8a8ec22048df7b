// Copyright (c) 2022 Bastiaan Marinus van de Weerd


struct Schematic<'s> {
	rows: Vec<&'s [u8]>,
}

/// Marks cells whose number was already read during one scan.
struct Visited {
	width: usize,
	cells: Vec<bool>,
}

impl Visited {
	fn new(schematic: &Schematic) -> Self {
		let width = schematic.width();
		Visited { width, cells: vec![false; width * schematic.rows.len()] }
	}

	fn mark(&mut self, [x, y]: [usize; 2]) -> bool {
		!std::mem::replace(&mut self.cells[y * self.width + x], true)
	}
}

fn is_symbol(b: u8) -> bool {
	b != b'.' && !b.is_ascii_digit()
}

impl<'s> Schematic<'s> {
	fn width(&self) -> usize {
		self.rows.first().map_or(0, |r| r.len())
	}

	fn symbols(&self) -> impl Iterator<Item = ([usize; 2], u8)> + '_ {
		self.rows.iter()
			.enumerate()
			.flat_map(|(y, row)| row.iter()
				.enumerate()
				.filter(|&(_, &b)| is_symbol(b))
				.map(move |(x, &b)| ([x, y], b)))
	}

	fn neighbors(&self, [x, y]: [usize; 2]) -> impl Iterator<Item = [usize; 2]> + '_ {
		use itertools::Itertools as _;
		(-1_isize..=1).cartesian_product(-1_isize..=1)
			.filter(|&d| d != (0, 0))
			.filter_map(move |(dx, dy)| {
				let x = x.checked_add_signed(dx)?;
				let y = y.checked_add_signed(dy)?;
				(x < self.width() && y < self.rows.len()).then_some([x, y])
			})
	}

	/// The whole number covering `pos`, unless it was already visited.
	fn number_at(&self, [x, y]: [usize; 2], visited: &mut Visited) -> Option<u32> {
		let row = self.rows[y];
		if !row[x].is_ascii_digit() { return None }
		let start = row[..x].iter().rposition(|b| !b.is_ascii_digit()).map_or(0, |p| p + 1);
		if !visited.mark([start, y]) { return None }
		let len = row[start..].iter().position(|b| !b.is_ascii_digit()).unwrap_or(row.len() - start);
		Some(row[start..start + len].iter().fold(0, |n, b| n * 10 + (b - b'0') as u32))
	}

	fn adjacent_numbers<'a>(&'a self, pos: [usize; 2], visited: &'a mut Visited)
	-> impl Iterator<Item = u32> + 'a {
		self.neighbors(pos).filter_map(move |pos| self.number_at(pos, visited))
	}
}


fn part1_impl(schematic: &Schematic) -> u32 {
	let mut visited = Visited::new(schematic);
	schematic.symbols()
		.flat_map(|(pos, _)| {
			let numbers = schematic.adjacent_numbers(pos, &mut visited).collect::<Vec<_>>();
			tracing::trace!(?pos, ?numbers, "part numbers");
			numbers
		})
		.sum()
}

pub(crate) fn part1(input: &str) -> Result<u32, parsing::SchematicError> {
	Ok(part1_impl(&parsing::try_schematic_from_str(input)?))
}


fn part2_impl(schematic: &Schematic) -> u32 {
	schematic.symbols()
		.filter(|&(_, b)| b == b'*')
		.filter_map(|(pos, _)| {
			let mut visited = Visited::new(schematic);
			let numbers = schematic.adjacent_numbers(pos, &mut visited).collect::<Vec<_>>();
			let &[left, right] = &numbers[..] else { return None };
			tracing::trace!(?pos, left, right, "gear");
			Some(left * right)
		})
		.sum()
}

pub(crate) fn part2(input: &str) -> Result<u32, parsing::SchematicError> {
	Ok(part2_impl(&parsing::try_schematic_from_str(input)?))
}


mod parsing {
	use super::Schematic;

	#[derive(Debug, thiserror::Error)]
	pub(crate) enum SchematicError {
		#[error("empty schematic")]
		Empty,
		#[error("line {line}: expected {expected} columns, found {found}")]
		Width { line: usize, expected: usize, found: usize },
		#[error("line {line}, column {column}: non-ASCII character")]
		NonAscii { line: usize, column: usize },
		#[error("line {line}: blank line inside schematic")]
		Blank { line: usize },
	}

	/// Trailing blank lines are ignored; any other blank line is an error.
	pub(super) fn try_schematic_from_str(s: &str) -> Result<Schematic<'_>, SchematicError> {
		let mut rows = s.lines()
			.map(|line| line.trim_end().as_bytes())
			.collect::<Vec<_>>();
		while rows.last().is_some_and(|row| row.is_empty()) { rows.pop(); }
		let Some(expected) = rows.first().map(|r| r.len()) else { return Err(SchematicError::Empty) };
		for (l, row) in rows.iter().enumerate() {
			if row.is_empty() { return Err(SchematicError::Blank { line: l + 1 }) }
			if let Some(c) = row.iter().position(|b| !b.is_ascii()) {
				return Err(SchematicError::NonAscii { line: l + 1, column: c + 1 })
			}
			if row.len() != expected {
				return Err(SchematicError::Width { line: l + 1, expected, found: row.len() })
			}
		}
		Ok(Schematic { rows })
	}
}


#[test]
fn tests() {
	const INPUT: &str = indoc::indoc! { "
		467..114..
		...*......
		..35..633.
		......#...
		617*......
		.....+.58.
		..592.....
		......755.
		...$.*....
		.664.598..
	" };
	assert_eq!(part1(INPUT).unwrap(), 4361);
	assert_eq!(part2(INPUT).unwrap(), 467835);

	// A number next to two symbols counts once for part 1, but for each gear in part 2.
	assert_eq!(part1("2*5*3").unwrap(), 10);
	assert_eq!(part2("2*5*3").unwrap(), 25);
	assert_eq!(part2("*.*\n.5.\n*..\n3..").unwrap(), 15);
	assert!(matches!(part1("..\n..."), Err(parsing::SchematicError::Width { line: 2, .. })));

	assert_eq!(part1("1*.\n...\n\n\n").unwrap(), 1);
	assert!(matches!(part1("1*.\n\n.*2"), Err(parsing::SchematicError::Blank { line: 2 })));
	assert!(matches!(part1("\n1*."), Err(parsing::SchematicError::Blank { line: 1 })));
	assert!(matches!(part1("\n\n"), Err(parsing::SchematicError::Empty)));
}
