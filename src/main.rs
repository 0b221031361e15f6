mod app;
mod config;
mod error;
mod form;
mod logger;
mod portal;
mod storage;
mod surface;

use app::{App, Command};
use clap::{crate_version, App as ClapApp, Arg};
use config::Config;
use std::io::{self, Write};

#[tokio::main]
async fn main() {
    let matches = ClapApp::new("portal-cli")
        .version(crate_version!())
        .about("Command line login client for the SEE/PB scheduling portal")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Custom configuration directory")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("server")
                .short("s")
                .long("server")
                .value_name("URL")
                .help("Portal base URL (overrides the configuration file)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("identifier")
                .short("i")
                .long("identifier")
                .value_name("VALUE")
                .help("E-mail address or national ID")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("password")
                .short("p")
                .long("password")
                .value_name("VALUE")
                .help("Account password")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("remember")
                .short("r")
                .long("remember")
                .help("Ask the server for a long-lived session"),
        )
        .arg(
            Arg::with_name("gov")
                .long("gov")
                .help("Hand off to the government identity provider instead of logging in"),
        )
        .get_matches();

    let mut config = Config::new();
    if let Err(e) = config.load(matches.value_of("config")) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
    if let Some(server) = matches.value_of("server") {
        config.api_base_url = Some(server.to_string());
        // Remember the override for the next invocation.
        if let Err(e) = config.save() {
            eprintln!("{}", e);
        }
    }

    let command = if matches.is_present("gov") {
        Command::GovSignIn
    } else {
        let identifier = match matches.value_of("identifier") {
            Some(value) => value.to_string(),
            None => prompt("E-mail or ID: "),
        };
        let password = match matches.value_of("password") {
            Some(value) => value.to_string(),
            None => prompt("Password: "),
        };
        Command::Login {
            identifier,
            password,
            remember: matches.is_present("remember"),
        }
    };

    if let Err(e) = App::start(config, command).await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

/// Read one line from standard input under the given label.
///
fn prompt(label: &str) -> String {
    print!("{}", label);
    let _ = io::stdout().flush();
    let mut value = String::new();
    if io::stdin().read_line(&mut value).is_err() {
        return String::new();
    }
    value.trim_end_matches(|c| c == '\r' || c == '\n').to_string()
}
