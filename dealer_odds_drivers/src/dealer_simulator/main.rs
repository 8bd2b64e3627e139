mod simulation;

use clap::Parser;
use dealer_odds_drivers::{parse_config_from_file, Config, ConfigError, SimulatorMode};

const DEFAULT_CONFIG_PATH: &str = "~/.dealer_odds.yml";

#[derive(Debug, Parser)]
#[command(author, about, long_about = None)]
struct CommandLineArgs {
    /// The path of the config file
    #[arg(short, long, default_value_t = String::from(DEFAULT_CONFIG_PATH))]
    config: String,

    /// Overrides the mode in the config file
    #[arg(short, long, value_enum)]
    mode: Option<SimulatorMode>,

    /// Overrides the number of rounds in the config file
    #[arg(short, long)]
    rounds: Option<u32>,
}

fn load_config(args: &CommandLineArgs) -> Result<Config, ConfigError> {
    if args.config != DEFAULT_CONFIG_PATH {
        return parse_config_from_file(&args.config);
    }

    let config_file_path = match home::home_dir() {
        Some(home_dir) => home_dir.join(".dealer_odds.yml"),
        None => {
            log::warn!("Cannot find home directory, using default config");
            return Ok(Config::default());
        }
    };
    if !config_file_path.is_file() {
        log::info!(
            "No config file at {}, using default config",
            config_file_path.display()
        );
        return Ok(Config::default());
    }
    parse_config_from_file(&config_file_path.to_string_lossy())
}

fn run(args: CommandLineArgs) -> Result<(), ConfigError> {
    let mut config = load_config(&args)?;
    if let Some(mode) = args.mode {
        config.dealer_simulator.mode = mode;
    }
    if let Some(rounds) = args.rounds {
        config.dealer_simulator.number_of_rounds = rounds;
    }
    log::debug!("{:#?}", config);

    let rule: dealer_odds::Rule = config.rule.try_into()?;
    match config.dealer_simulator.mode {
        SimulatorMode::Rounds => {
            simulation::simulate_rounds(&rule, config.dealer_simulator.number_of_rounds)?
        }
        SimulatorMode::SingleHit => simulation::simulate_single_hit(&rule)?,
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let args = CommandLineArgs::parse();
    if let Err(err) = run(args) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
