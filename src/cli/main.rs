//! Command-line interface entry point for `calendurr`

mod args;
mod commands;

use args::{Cli, Command, SemesterSubcommand};
use calendurr::config::Config;
use calendurr::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use calendurr::{error, info};
use clap::Parser;
use commands::schedule::{self, MoveInput, NewSchedule};

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // CLI flag wins, otherwise use config logging.file if set
    let config_log_path = (!config.logging.file.is_empty())
        .then(|| std::path::PathBuf::from(&config.logging.file));

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    let store = schedule::open_store(&config);

    let result = match args.command {
        Command::Config { subcommand } => commands::config::run(subcommand, &mut config, &defaults),
        Command::New {
            name,
            major,
            current,
            graduating,
            catalog,
            model,
            no_acquired,
        } => schedule::create(
            &store,
            NewSchedule {
                name,
                major,
                current,
                graduating,
                catalog,
                model,
                no_acquired,
            },
            &config,
        ),
        Command::List => schedule::list(&store),
        Command::Show { name } => schedule::show(&store, &name, &config),
        Command::Move {
            name,
            from,
            index,
            to,
            at,
            gesture,
        } => {
            let input = match (gesture, from, index) {
                (Some(json), _, _) => Ok(MoveInput::Gesture(json)),
                (None, Some(from), Some(index)) => Ok(MoveInput::Slots { from, index, to, at }),
                _ => Err("Either --gesture or both --from and --index are required".to_string()),
            };
            input.and_then(|input| schedule::move_course(&store, &name, &input, &config))
        }
        Command::Semester { subcommand } => match subcommand {
            SemesterSubcommand::Add {
                schedule: name,
                name: semester_name,
            } => schedule::add_semester(&store, &name, &semester_name, &config),
            SemesterSubcommand::Remove { schedule: name, id } => {
                schedule::remove_semester(&store, &name, &id, &config)
            }
        },
        Command::Progress { name, goal } => schedule::progress(&store, &name, goal, &config),
        Command::Report {
            name,
            format,
            output,
        } => commands::report::run(&store, &name, &format, output.as_deref(), &config),
        Command::Delete { name, yes } => schedule::delete(&store, &name, yes),
    };

    if let Err(e) = result {
        error!("{e}");
        eprintln!("✗ {e}");
        std::process::exit(1);
    }
}
