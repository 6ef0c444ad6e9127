mod app;

use clap::Parser;

use app::cli::Cli;

fn main() {
    let args = Cli::parse();

    let default_level = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    if let Err(err) = app::run(args) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
