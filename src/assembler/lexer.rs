//! This lexer tokenizes a single line of CG-16-1 assembly.
use std::collections::VecDeque;

// Tokens are tuples of the token value and the 1-based column it starts on.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Token {
    Word(String, usize),
    Comma(usize),
    Space(usize),
}

/// Splits a line into words, commas and runs of whitespace.
/// Whitespace is kept as a single `Space` token because the parser
/// needs to know whether the mnemonic was followed by a gap.
/// Deciding what a word means is the parser's job.
pub fn tokenize_line(line: &str) -> VecDeque<Token> {
    let mut out: VecDeque<Token> = VecDeque::with_capacity(8);

    let mut sb = String::new();
    let mut start = 0;
    for (idx, c) in line.chars().enumerate() {
        let col = idx + 1;
        match c {
            // Commas and whitespace are transition characters: they bound
            // words, so whatever is in the buffer has to be flushed first.
            ',' => {
                flush_word(&mut sb, start, &mut out);
                out.push_back(Token::Comma(col));
            },
            c if c.is_whitespace() => {
                flush_word(&mut sb, start, &mut out);
                match out.back() {
                    Some(Token::Space(_)) => {},
                    _ => out.push_back(Token::Space(col)),
                }
            },
            _ => {
                if sb.is_empty() {
                    start = col;
                }
                sb.push(c);
            },
        };
    }
    // Process any final word that may be in the buffer.
    flush_word(&mut sb, start, &mut out);

    out
}

fn flush_word(sb: &mut String, col: usize, out: &mut VecDeque<Token>) {
    // Short-circuit if there's nothing to process.
    if sb.is_empty() {
        return;
    }
    out.push_back(Token::Word(std::mem::take(sb), col));
}
