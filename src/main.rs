use clap::{Arg, ArgAction, Command};
use std::error::Error;
use std::path::PathBuf;
use std::{thread, time};

use replicr::config::Config;
use replicr::logging::*;
use replicr::reconcile;

fn build_config(matches: &clap::ArgMatches) -> Result<Config, Box<dyn Error>> {
	if let Some(path) = matches.get_one::<String>("config") {
		return Ok(Config::load(path.as_ref())?);
	}

	let mut config = Config {
		src: matches
			.get_one::<String>("src")
			.map(PathBuf::from)
			.ok_or("either --config or --src and --replica are required")?,
		replica: matches
			.get_one::<String>("replica")
			.map(PathBuf::from)
			.ok_or("either --config or --src and --replica are required")?,
		..Config::default()
	};
	if let Some(interval) = matches.get_one::<u64>("interval") {
		config.interval = *interval;
	}
	config.log = matches.get_one::<String>("log").map(PathBuf::from);
	config.validate()?;
	Ok(config)
}

fn main() -> Result<(), Box<dyn Error>> {
	let matches = Command::new("Replicr")
		.version("0.1.0")
		.about("One-way directory mirror with resumable transfers")
		.arg(
			Arg::new("config")
				.short('c')
				.long("config")
				.value_name("FILE")
				.help("Path to JSON configuration file"),
		)
		.arg(Arg::new("src").long("src").value_name("DIR").help("Source directory"))
		.arg(Arg::new("replica").long("replica").value_name("DIR").help("Replica directory"))
		.arg(
			Arg::new("interval")
				.short('i')
				.long("interval")
				.value_name("MINUTES")
				.value_parser(clap::value_parser!(u64))
				.help("Minutes between sync passes [default: 1]"),
		)
		.arg(Arg::new("log").long("log").value_name("FILE").help("Log file path (default: stderr)"))
		.arg(
			Arg::new("once")
				.long("once")
				.action(ArgAction::SetTrue)
				.help("Run a single sync pass and exit"),
		)
		.get_matches();

	let config = build_config(&matches)?;
	init_tracing(config.log.as_deref())?;

	loop {
		info!("Starting synchronization");
		match reconcile::sync(&config.src, &config.replica, config.buffer_size) {
			Ok(stats) => {
				info!(
					"Synchronization complete: {} copied, {} unchanged, {} folders created, {} removed, {} errors",
					stats.files_copied,
					stats.files_unchanged,
					stats.folders_created,
					stats.entries_removed,
					stats.errors
				);
			}
			Err(e) => {
				// Structural failure of one cycle; retried on the next
				error!("Error during synchronization: {}", e);
			}
		}

		if matches.get_flag("once") {
			break;
		}
		info!("Sleeping for {} minute(s)", config.interval);
		thread::sleep(time::Duration::from_secs(config.interval * 60));
	}

	Ok(())
}

// vim: ts=4
