mod cli;
mod commands;
mod config;
mod logging;

pub fn run(args: Vec<String>) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init()?;

    let cmd = cli::parse_args(&args)?;
    match cmd {
        cli::Command::Help(topic) => {
            cli::print_help(topic);
            Ok(())
        }
        cli::Command::Plan(args) => commands::plan(args),
        cli::Command::Count(args) => commands::count(args),
        cli::Command::Sample(args) => commands::sample(args),
        cli::Command::Coverage(args) => commands::coverage(args),
    }
}
