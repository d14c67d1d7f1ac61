use crate::cli::actions::Action;
use anyhow::{anyhow, Context, Result};
use secrecy::SecretString;
use std::path::PathBuf;

/// Arguments shared by every flow action.
#[derive(Debug, Clone)]
pub struct Globals {
    pub provider_url: String,
    pub origin: String,
    pub cache_path: PathBuf,
}

pub fn handler(matches: &clap::ArgMatches) -> Result<(Globals, Action)> {
    let globals = Globals {
        provider_url: matches
            .get_one::<String>("provider-url")
            .map(String::to_string)
            .ok_or_else(|| anyhow!("missing required argument: --provider-url"))?,
        origin: matches
            .get_one::<String>("origin")
            .map(String::to_string)
            .ok_or_else(|| anyhow!("missing required argument: --origin"))?,
        cache_path: matches
            .get_one::<PathBuf>("cache-path")
            .cloned()
            .ok_or_else(|| anyhow!("missing required argument: --cache-path"))?,
    };

    let (name, sub_matches) = matches.subcommand().context("missing subcommand")?;

    let email = |m: &clap::ArgMatches| -> Result<String> {
        m.get_one::<String>("email")
            .map(String::to_string)
            .ok_or_else(|| anyhow!("missing required argument: --email"))
    };
    let password = |m: &clap::ArgMatches| -> Result<SecretString> {
        m.get_one::<String>("password")
            .map(|p| SecretString::from(p.clone()))
            .ok_or_else(|| anyhow!("missing required argument: --password"))
    };

    let action = match name {
        "sign-in" => Action::SignIn {
            email: email(sub_matches)?,
            password: password(sub_matches)?,
        },
        "sign-up" => Action::SignUp {
            email: email(sub_matches)?,
            password: password(sub_matches)?,
        },
        "recover" => Action::Recover {
            email: email(sub_matches)?,
        },
        _ => return Err(anyhow!("unknown subcommand: {name}")),
    };

    Ok((globals, action))
}
