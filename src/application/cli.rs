use std::io;

use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;

use crate::configuration::Config;
use crate::configuration::ConfigKey;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn arg_caddie_url() -> Arg {
    return Arg::new(ConfigKey::CaddieURL.to_string())
        .short('u')
        .long(ConfigKey::CaddieURL.to_string())
        .env("CADDIE_URL")
        .num_args(1)
        .help(format!(
            "The base URL of the caddie query service. [default: {}]",
            Config::default(ConfigKey::CaddieURL)
        ));
}

fn arg_username() -> Arg {
    return Arg::new(ConfigKey::Username.to_string())
        .long(ConfigKey::Username.to_string())
        .env("CADDIE_USERNAME")
        .num_args(1)
        .help("Your user name displayed in all chat bubbles. Defaults to the system user.");
}

fn arg_health_check_timeout() -> Arg {
    return Arg::new(ConfigKey::HealthCheckTimeout.to_string())
        .long(ConfigKey::HealthCheckTimeout.to_string())
        .env("CADDIE_HEALTH_CHECK_TIMEOUT")
        .num_args(1)
        .help(format!(
            "Time to wait in milliseconds before timing out the startup reachability probe. [default: {}]",
            Config::default(ConfigKey::HealthCheckTimeout)
        ));
}

pub fn build() -> Command {
    return Command::new("caddie")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .arg_required_else_help(false)
        .subcommand(subcommand_completions())
        .arg(arg_caddie_url())
        .arg(arg_username())
        .arg(arg_health_check_timeout());
}

pub fn parse() -> Result<bool> {
    let matches = build().get_matches();

    if let Some(("completions", subcmd_matches)) = matches.subcommand() {
        if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
            let mut app = build();
            print_completions(completions, &mut app);
        }
        return Ok(false);
    }

    Config::load(vec![&matches])?;

    return Ok(true);
}
