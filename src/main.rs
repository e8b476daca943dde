extern crate clap;
#[macro_use] extern crate log;
extern crate fern;
extern crate chrono;
extern crate term_grid;
extern crate ctrlc;

pub mod assembler;

use clap::{Arg, ArgMatches, App};
use term_grid::{Grid, GridOptions, Direction, Filling, Cell};

use assembler::ast::{Instruction, Value};
use assembler::parser::{Config, Parser};

fn main() {
    let args = process_arguments();
    initialize_logging(args.occurrences_of("verbose"));
    if let Err(err) = install_interrupt_handler() {
        warn!("unable to install the interrupt handler: {}", err);
    }

    let config = Config {
        hex_indicator:     args.value_of("hex-indicator").unwrap_or("0x").to_owned(),
        binary_indicator:  args.value_of("binary-indicator").unwrap_or("0b").to_owned(),
        address_indicator: args.value_of("address-indicator").unwrap_or("$").to_owned(),
        allow_overflow:    args.is_present("allow-overflow"),
    };
    let ifile = args.value_of("INPUT").unwrap_or_default();

    debug!("Arguments:\n\tVerbosity: {}\n\tInfile: {}",
        level_filter(args.occurrences_of("verbose")),
        ifile
    );

    let parser = match Parser::new(config) {
        Err(err) => {
            error!("fatal: {}", err);
            std::process::exit(1);
        },
        Ok(parser) => parser,
    };
    debug!("Parser configuration: {:?}", parser.config());

    let program = match parser.parse_file(ifile) {
        Err(err) => {
            error!("fatal: {}", err);
            if err.is_overflow() {
                error!("pass --allow-overflow to accept values wider than 16 bits");
            }
            std::process::exit(1);
        },
        Ok(program) => program,
    };

    let mut grid = Grid::new(GridOptions {
        filling:     Filling::Spaces(1),
        direction:   Direction::LeftToRight,
    });

    for (idx, ins) in program.iter().enumerate() {
        grid.add(Cell::from(format!("0x{:04X}:", idx)));
        grid.add(Cell::from(format!("{}", ins)));
        grid.add(Cell::from("=>".to_string()));
        grid.add(Cell::from(describe(ins)));
    }

    println!("{}", grid.fit_into_columns(4));
}

/// Lists each argument with its kind, integers shown in hex.
fn describe(ins: &Instruction) -> String {
    if ins.arguments.is_empty() {
        return "-".to_string();
    }

    ins.arguments.iter()
        .map(|arg| {
            let kind = if arg.is_address { "addr" } else { "imm" };
            match &arg.value {
                Value::Int(v)   => format!("{}:0x{:04X}", kind, v),
                Value::Label(l) => format!("{}:{}", kind, l),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn process_arguments() -> ArgMatches<'static> {
    App::new(option_env!("CARGO_PKG_NAME").unwrap_or("cgasm"))
        .version(option_env!("CARGO_PKG_VERSION").unwrap_or("0.0.0"))
        .author(option_env!("CARGO_PKG_AUTHORS").unwrap_or(""))
        .about(option_env!("CARGO_PKG_DESCRIPTION").unwrap_or(""))
        .arg(Arg::with_name("INPUT")
            .help("Sets the input file to use")
            .required(true)
            .multiple(false)
            .index(1))
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .takes_value(false)
            .help("Sets the level of verbosity"))
        .arg(Arg::with_name("hex-indicator")
            .short("x")
            .long("hex-indicator")
            .takes_value(true)
            .default_value("0x")
            .help("character(s) that mark a hexadecimal number"))
        .arg(Arg::with_name("binary-indicator")
            .short("b")
            .long("binary-indicator")
            .takes_value(true)
            .default_value("0b")
            .help("character(s) that mark a binary number"))
        .arg(Arg::with_name("address-indicator")
            .short("a")
            .long("address-indicator")
            .takes_value(true)
            .default_value("$")
            .help("character(s) that mark an argument as an address"))
        .arg(Arg::with_name("allow-overflow")
            .short("o")
            .long("allow-overflow")
            .takes_value(false)
            .help("accept values wider than the 16-bit word"))
        .get_matches()
}

/// Maps the number of `-v` flags to a log level.
fn level_filter(verbosity: u64) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    }
}

/// An interrupt ends the run cleanly rather than as a failure.
fn install_interrupt_handler() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(|| {
        println!("Goodbye...");
        std::process::exit(0);
    })
}

fn initialize_logging(verbosity: u64) {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level_filter(verbosity))
        .chain(std::io::stderr())
        .apply().ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::ast::Argument;

    #[test]
    fn test_describe() {
        let ins = Instruction::new("adc", vec![Argument::new(2u64, true), Argument::new("a", false)]);
        assert_eq!(describe(&ins), "addr:0x0002 imm:a");
        assert_eq!(describe(&Instruction::new("nop", vec![])), "-");
    }

    #[test]
    fn test_level_filter() {
        assert_eq!(level_filter(0), log::LevelFilter::Error);
        assert_eq!(level_filter(1), log::LevelFilter::Warn);
        assert_eq!(level_filter(2), log::LevelFilter::Info);
        assert_eq!(level_filter(3), log::LevelFilter::Debug);
        assert_eq!(level_filter(9), log::LevelFilter::Debug);
    }

    #[test]
    fn test_interrupt_handler_installs() {
        assert!(install_interrupt_handler().is_ok());
    }
}
