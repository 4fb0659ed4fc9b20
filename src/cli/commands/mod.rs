pub mod logging;

use crate::credentials::CostPolicy;
use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ColorChoice, Command,
};

pub const ARG_COST_POLICY: &str = "cost-policy";
pub const ARG_SECRET: &str = "secret";
pub const ARG_DIGEST: &str = "digest";
pub const ARG_TOKEN: &str = "token";

#[must_use]
pub fn validator_cost_policy() -> ValueParser {
    ValueParser::from(move |policy: &str| -> std::result::Result<CostPolicy, String> {
        policy.parse::<CostPolicy>().map_err(|e| e.to_string())
    })
}

fn secret_arg() -> Arg {
    Arg::new(ARG_SECRET)
        .short('s')
        .long("secret")
        .help("Secret to hash or check; read from the first line of stdin when omitted")
        .env("PASSKEEP_SECRET")
        .hide_env_values(true)
}

fn digest_arg() -> Arg {
    Arg::new(ARG_DIGEST)
        .short('d')
        .long("digest")
        .help("Stored bcrypt digest")
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("passkeep")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_COST_POLICY)
                .short('c')
                .long("cost-policy")
                .help("bcrypt work factor: minimal (tests only) or standard")
                .env("PASSKEEP_COST_POLICY")
                .default_value("standard")
                .global(true)
                .value_parser(validator_cost_policy()),
        )
        .subcommand(
            Command::new("hash")
                .about("Hash a password or token into a bcrypt digest")
                .arg(secret_arg()),
        )
        .subcommand(
            Command::new("verify")
                .about("Check a secret against a stored digest")
                .arg(secret_arg())
                .arg(digest_arg().required(true)),
        )
        .subcommand(Command::new("token").about("Print a new random remember token"))
        .subcommand(
            Command::new("remember").about("Issue a remember token and the digest to persist"),
        )
        .subcommand(
            Command::new("authenticate")
                .about("Check a presented remember token against the stored digest")
                .arg(digest_arg().help("Stored remember digest; omit when none is stored"))
                .arg(
                    Arg::new(ARG_TOKEN)
                        .short('t')
                        .long("token")
                        .help("Presented remember token")
                        .env("PASSKEEP_TOKEN")
                        .hide_env_values(true)
                        .required(true),
                ),
        )
        .subcommand(Command::new("forget").about("Print the cleared remember digest"))
        .subcommand(
            Command::new("inspect")
                .about("Show the work factor of a digest and whether it needs rehashing")
                .arg(digest_arg().required(true)),
        );

    logging::with_args(command)
}
