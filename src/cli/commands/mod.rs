use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ColorChoice, Command,
};
use regex::Regex;

use crate::role::normalize_email;

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

pub fn validator_email() -> ValueParser {
    ValueParser::from(move |email: &str| -> std::result::Result<String, String> {
        let normalized = normalize_email(email);
        let valid = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
            .is_ok_and(|regex| regex.is_match(&normalized));
        if valid {
            // Keep the raw value; the flows normalize where it matters.
            Ok(email.to_string())
        } else {
            Err("invalid email address".to_string())
        }
    })
}

fn email_arg() -> Arg {
    Arg::new("email")
        .short('e')
        .long("email")
        .help("Email address")
        .required(true)
        .value_parser(validator_email())
}

fn password_arg() -> Arg {
    Arg::new("password")
        .short('P')
        .long("password")
        .help("Password")
        .env("ENSALUTO_PASSWORD")
        .required(true)
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("ensaluto")
        .about("Client-side authentication flows with roster-based admin role resolution")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg(
            Arg::new("provider-url")
                .short('u')
                .long("provider-url")
                .help("Identity provider base URL, example: https://auth.example.com")
                .env("ENSALUTO_PROVIDER_URL")
                .required(true),
        )
        .arg(
            Arg::new("origin")
                .short('o')
                .long("origin")
                .help("Client origin used to build the password-reset callback URL")
                .default_value("http://localhost:3000")
                .env("ENSALUTO_ORIGIN"),
        )
        .arg(
            Arg::new("cache-path")
                .short('c')
                .long("cache-path")
                .help("Path of the durable role-cache slot")
                .default_value(".ensaluto/role")
                .env("ENSALUTO_CACHE_PATH")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("ENSALUTO_LOG_LEVEL")
                .global(true)
                .action(clap::ArgAction::Count)
                .value_parser(validator_log_level()),
        )
        .subcommand(
            Command::new("sign-in")
                .about("Verify credentials and resolve the post-sign-in destination")
                .arg(email_arg())
                .arg(password_arg()),
        )
        .subcommand(
            Command::new("sign-up")
                .about("Register a new account (roster emails are rejected locally)")
                .arg(email_arg())
                .arg(password_arg()),
        )
        .subcommand(
            Command::new("recover")
                .about("Request a password-reset email")
                .arg(email_arg()),
        )
}
