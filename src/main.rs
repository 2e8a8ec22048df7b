// Copyright (c) 2022 Bastiaan Marinus van de Weerd

mod util;
util::mod_days![01, 02, 03, 04, 05];


fn init_tracing() {
	use tracing_subscriber::{prelude::*, EnvFilter};
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new("info"));
	tracing_subscriber::registry()
		.with(filter)
		.with(tracing_subscriber::fmt::layer().with_target(true).with_writer(std::io::stderr))
		.init();
}

fn answer_or_error(day: u8, part: u8, answer: util::Answer) -> String {
	answer.unwrap_or_else(|e| {
		tracing::error!(day, part, error = %e, "solve failed");
		format!("error: {e}")
	})
}

fn main() {
	init_tracing();

	let only = match std::env::args().skip(1).map(|a| a.parse::<u8>()).collect::<Result<Vec<_>, _>>() {
		Ok(only) => only,
		Err(e) => {
			eprintln!("day numbers expected: {e}");
			std::process::exit(2);
		}
	};

	let inputs = util::Inputs::from_env();
	for day in days().into_iter().filter(|d| only.is_empty() || only.contains(&d.number)) {
		let input = match inputs.read(day.number) {
			Ok(Some(input)) => input,
			Ok(None) => {
				tracing::warn!(day = day.number, path = %inputs.path(day.number).display(), "no input, skipping");
				continue
			}
			Err(e) => {
				tracing::error!(day = day.number, error = %e, "reading input failed");
				continue
			}
		};

		let span = tracing::info_span!("day", number = day.number);
		let _entered = span.enter();
		let start = std::time::Instant::now();
		let part1 = answer_or_error(day.number, 1, (day.part1)(&input));
		let part2 = answer_or_error(day.number, 2, (day.part2)(&input));
		tracing::debug!(elapsed = ?start.elapsed(), "solved");

		println!("Day {:02}; part 1: {}, part 2: {}", day.number, part1, part2);
	}
}
