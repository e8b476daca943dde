//! The Parser module takes a line of CG-16-1 assembly, runs it through
//! the lexer and converts the resulting token stream into an Instruction.
use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use num_bigint::BigUint;
use regex::Regex;

use super::ast::*;
use super::error::{Error, Result};
use super::lexer::{tokenize_line, Token};

/// Parser settings. Fixed once the parser has been built.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Config {
    pub hex_indicator:     String,
    pub binary_indicator:  String,
    pub address_indicator: String,
    /// Accept integers past the 16-bit range instead of rejecting them.
    pub allow_overflow:    bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            hex_indicator:     "0x".to_owned(),
            binary_indicator:  "0b".to_owned(),
            address_indicator: "$".to_owned(),
            allow_overflow:    false,
        }
    }
}

impl Config {
    fn validate(&self) -> Result<()> {
        let indicators = [
            ("hex", &self.hex_indicator),
            ("binary", &self.binary_indicator),
            ("address", &self.address_indicator),
        ];
        for (name, ind) in indicators.iter() {
            if ind.is_empty() {
                return Err(Error::Config(format!("{} indicator may not be empty", name)));
            }
            // The lexer splits on these, so an indicator containing one could never match.
            if ind.chars().any(|c| c == ',' || c.is_whitespace()) {
                return Err(Error::Config(format!(
                    "{} indicator `{}` may not contain commas or whitespace", name, ind)));
            }
        }
        Ok(())
    }
}

/// Literal matchers compiled from a `Config`.
struct Grammar {
    config: Config,
    hex:    Regex,
    binary: Regex,
    dec:    Regex,
    label:  Regex,
}

impl Grammar {
    fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let compile = |pattern: String| Regex::new(&pattern).map_err(|e| Error::Config(e.to_string()));

        let hex = compile(format!("^{}([0-9A-Fa-f]+)$", regex::escape(&config.hex_indicator)))?;
        let binary = compile(format!("^{}([01]+)$", regex::escape(&config.binary_indicator)))?;
        let dec = compile("^[0-9]+$".to_owned())?;
        let label = compile("^[A-Za-z]+$".to_owned())?;

        Ok(Grammar { config, hex, binary, dec, label })
    }

    /// Resolves the text of an argument, minus any address indicator.
    /// Forms are tried in order: hex, binary, decimal, label.
    fn value(&self, body: &str) -> Result<Value> {
        if let Some(caps) = self.hex.captures(body) {
            return self.integer(&caps[1], 16, body).map(Value::Int);
        }
        if let Some(caps) = self.binary.captures(body) {
            return self.integer(&caps[1], 2, body).map(Value::Int);
        }
        if self.dec.is_match(body) {
            return self.integer(body, 10, body).map(Value::Int);
        }
        if self.label.is_match(body) {
            return Ok(Value::Label(body.to_owned()));
        }

        if body.starts_with(self.config.hex_indicator.as_str()) {
            Err(Error::syntax(format!("malformed hex literal `{}`", body)))
        } else if body.starts_with(self.config.binary_indicator.as_str()) {
            Err(Error::syntax(format!("malformed binary literal `{}`", body)))
        } else {
            Err(Error::syntax(format!("`{}` is not a number or a label", body)))
        }
    }

    /// Converts pre-validated digits, applying the 16-bit range check.
    /// With overflow allowed the value is kept exactly, however wide.
    fn integer(&self, digits: &str, radix: u32, literal: &str) -> Result<BigUint> {
        let value = BigUint::parse_bytes(digits.as_bytes(), radix)
            .ok_or_else(|| Error::syntax(format!("unable to read literal `{}`", literal)))?;

        if !self.config.allow_overflow && value > BigUint::from(u16::MAX) {
            return Err(Error::Overflow(literal.to_owned()));
        }
        Ok(value)
    }
}

/// Turns CG-16-1 source into instructions. A parser never changes after
/// construction, so one instance can be shared between threads.
pub struct Parser {
    grammar: Grammar,
}

impl Parser {
    pub fn new(config: Config) -> Result<Self> {
        Ok(Parser { grammar: Grammar::new(config)? })
    }

    pub fn config(&self) -> &Config {
        &self.grammar.config
    }

    /// Parses exactly one instruction. Surrounding whitespace is ignored.
    pub fn parse_line(&self, text: &str) -> Result<Instruction> {
        let text = text.trim();
        let ins = LineParser::new(&self.grammar, tokenize_line(text)).instruction()?;
        debug!("parsed `{}` => {:?}", text, ins);
        Ok(ins)
    }

    /// Reads the whole file and parses it line by line, skipping blank lines.
    /// Stops at the first line that fails; nothing parsed before it is returned.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Instruction>> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut out = Vec::new();
        for (index, line) in source.lines().enumerate() {
            if line.trim().is_empty() {
                trace!("skipping blank line {}", index + 1);
                continue;
            }
            let ins = self.parse_line(line).map_err(|e| e.at_line(index + 1))?;
            out.push(ins);
        }

        info!("parsed {} instruction(s) from `{}`", out.len(), path.display());
        Ok(out)
    }
}

/// Walks the tokens of a single line.
struct LineParser<'g> {
    grammar: &'g Grammar,
    tokens:  VecDeque<Token>,
}

impl<'g> LineParser<'g> {
    fn new(grammar: &'g Grammar, tokens: VecDeque<Token>) -> Self {
        LineParser { grammar, tokens }
    }

    fn instruction(&mut self) -> Result<Instruction> {
        let mnemonic = self.mnemonic()?;

        let arguments = match self.consume() {
            None => Vec::new(),
            Some(Token::Space(_)) => self.arguments()?,
            Some(Token::Comma(col)) => {
                return Err(Error::syntax(format!("unexpected `,` after mnemonic at column {}", col)));
            },
            Some(Token::Word(w, col)) => {
                return Err(Error::syntax(format!("unexpected `{}` after mnemonic at column {}", w, col)));
            },
        };

        let ins = Instruction::new(mnemonic, arguments);
        if !ins.is_valid() {
            return Err(Error::syntax(format!("unknown mnemonic `{}`", ins.mnemonic)));
        }
        Ok(ins)
    }

    fn mnemonic(&mut self) -> Result<String> {
        match self.consume() {
            Some(Token::Word(w, _)) if w.chars().all(|c| c.is_ascii_alphabetic()) => {
                Ok(w.to_ascii_lowercase())
            },
            Some(Token::Word(w, col)) => {
                Err(Error::syntax(format!("expected a mnemonic at column {}, got `{}`", col, w)))
            },
            Some(Token::Comma(col)) => {
                Err(Error::syntax(format!("expected a mnemonic at column {}, got `,`", col)))
            },
            Some(Token::Space(_)) | None => Err(Error::syntax("expected a mnemonic, got end of line")),
        }
    }

    /// Parses `argument (, argument)*` until the end of the line.
    fn arguments(&mut self) -> Result<Vec<Argument>> {
        let mut args = Vec::with_capacity(4);

        loop {
            args.push(self.argument()?);
            self.skip_space();

            match self.consume() {
                Some(Token::Space(_)) | None => break,
                Some(Token::Comma(_)) => continue,
                Some(Token::Word(w, col)) => {
                    return Err(Error::syntax(format!(
                        "arguments must be separated by commas, found `{}` at column {}", w, col)));
                },
            }
        }

        Ok(args)
    }

    fn argument(&mut self) -> Result<Argument> {
        self.skip_space();

        let (field, col) = match self.consume() {
            Some(Token::Word(w, col)) => (w, col),
            Some(Token::Comma(col)) => {
                return Err(Error::syntax(format!("empty argument before `,` at column {}", col)));
            },
            Some(Token::Space(_)) | None => {
                return Err(Error::syntax("expected an argument, got end of line"));
            },
        };

        let indicator = self.grammar.config.address_indicator.as_str();
        let (body, is_address) = match field.strip_prefix(indicator) {
            Some(rest) => (rest, true),
            None => (field.as_str(), false),
        };
        if is_address && body.starts_with(indicator) {
            return Err(Error::syntax(format!(
                "address indicator repeated in `{}` at column {}", field, col)));
        }
        if body.is_empty() {
            return Err(Error::syntax(format!("missing value after `{}` at column {}", field, col)));
        }

        let arg = Argument::new(self.grammar.value(body)?, is_address);
        trace!("column {}: `{}` => {:?}", col, field, arg);
        Ok(arg)
    }

    fn skip_space(&mut self) {
        while let Some(Token::Space(_)) = self.tokens.front() {
            self.tokens.pop_front();
        }
    }

    /// Pops a token off the input stream and returns it.
    /// Returns None if no tokens are left.
    #[inline]
    fn consume(&mut self) -> Option<Token> {
        self.tokens.pop_front()
    }
}
