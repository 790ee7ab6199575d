use std::{process::ExitCode, str::FromStr};

use anyhow::Context as _;
use parley::{Flag, Flow, KeyValue, LoadedArguments, ParsedValue, Positional};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Fast,
    Safe,
}

#[derive(Debug, thiserror::Error)]
#[error("expected one of: fast, safe")]
struct UnknownMode;

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fast" => Ok(Mode::Fast),
            "safe" => Ok(Mode::Safe),
            _ => Err(UnknownMode),
        }
    }
}

impl ParsedValue for Mode {}

fn run() -> anyhow::Result<ExitCode> {
    let arguments = LoadedArguments::from_env().context("failed to load arguments")?;

    let mut pos = Positional::<String>::new("pos", "positional argument");
    let mut kv = KeyValue::<String>::new("kv", "key-value argument").short('k');
    let mut count = KeyValue::<u32>::new("count", "how many times to print").short('n');
    let mut mode = KeyValue::<Mode>::new("mode", "fast or safe").short('m');
    let mut flag = Flag::new("flag", "flag argument").short('f');

    let mut parser = arguments.parser();
    parser
        .description("Demonstrates every kind of argument parley supports.")
        .add_positional(&mut pos)
        .add_key_value(&mut kv)
        .add_key_value(&mut count)
        .add_key_value(&mut mode)
        .add_flag(&mut flag);

    let outcome = arguments.parse(parser);
    info!(status = ?outcome.status(), item = outcome.item(), "parsed arguments");

    // The parser has already printed a diagnostic and the usage
    match outcome.into_result() {
        Ok(Flow::Proceed) => {}
        Ok(Flow::Help) => return Ok(ExitCode::SUCCESS),
        Err(_) => return Ok(ExitCode::FAILURE),
    }

    let pos = pos.into_value().unwrap_or_default();
    let kv = kv.into_value().unwrap_or_default();
    let mode = mode.value_or(Mode::Safe);

    for _ in 0..count.value_or(1) {
        println!("Arguments:");
        println!("\tpos arg\tpos: {pos}");
        println!("\tkv arg \tkv: {kv}");
        println!("\tmode   \tmode: {mode:?}");
        println!("\tflag   \tflag: {}", flag.value());
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
