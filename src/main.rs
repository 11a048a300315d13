#![allow(non_snake_case)]
use RustedPoly::Utils::config::SessionConfig;
use RustedPoly::Utils::logger::init_logger;
use RustedPoly::Utils::poly_parser::parse_session;
use RustedPoly::polynomial::TermPool;
use log::{error, info};
use std::env;
use std::error::Error;
use std::io::{self, Read};
use std::process::ExitCode;

/// Reads `n (c e)*n  m (c e)*m  x` from stdin and prints P1, P2, their sum,
/// difference and product, and both polynomials evaluated at x.
/// Logging is configured with `loglevel=..`, `logfile=..`, `console=..`.
fn run() -> Result<(), Box<dyn Error>> {
    let config = SessionConfig::from_args(env::args().skip(1))?;
    init_logger(&config)?;

    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;

    let pool = TermPool::new();
    let session = parse_session(&input, &pool)?;
    println!("{}", session.report());
    info!("term pool: {}", pool.stats());
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
