//! This AST describes a single parsed line of CG-16-1 assembly.
//!
//! Instructions are delimited by newlines, one per line. A line is a
//! mnemonic optionally followed by a comma separated list of arguments.
//! An argument is an integer literal or a label, and either form may be
//! prefixed with the address indicator.
//!
//! Example source file:
//!
//! ```nasm
//! mov a, 0x1234       ; label and hex immediate
//! adc $2, a, $b       ; `$` marks an address
//! int $0b1010, 7      ; binary and decimal literals
//! jmp 1280
//! ```
//!
//! Comments are not part of the language; the ones above are for the reader.

use std::fmt;

use num_bigint::BigUint;

/// Every mnemonic understood by the CG-16-1. Kept sorted for lookup.
pub const MNEMONICS: &[&str] = &[
    "adc", "add", "and", "call", "cmp", "dec", "hlt", "in", "inc", "int",
    "iret", "jc", "jmp", "jnc", "jnz", "jz", "mov", "nop", "not", "or",
    "out", "pop", "push", "ret", "sbb", "shl", "shr", "sub", "xor",
];

/// Returns true if `mnemonic` names a CG-16-1 instruction, ignoring case.
pub fn is_known_mnemonic(mnemonic: &str) -> bool {
    MNEMONICS.binary_search(&mnemonic.to_ascii_lowercase().as_str()).is_ok()
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Instruction {
    pub mnemonic:  String,
    pub arguments: Vec<Argument>,
}

impl Instruction {
    /// Builds an instruction without checking it against the mnemonic table.
    pub fn new<S: Into<String>>(mnemonic: S, arguments: Vec<Argument>) -> Self {
        Instruction { mnemonic: mnemonic.into(), arguments }
    }

    pub fn is_valid(&self) -> bool {
        is_known_mnemonic(&self.mnemonic)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.mnemonic)?;
        for (idx, arg) in self.arguments.iter().enumerate() {
            let sep = if idx == 0 { " " } else { ", " };
            write!(f, "{}{}", sep, arg)?;
        }
        Ok(())
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Value {
    Int(BigUint),
    Label(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Int(v)   => write!(f, "{}", v),
            Value::Label(l) => write!(f, "{}", l),
        }
    }
}

impl From<BigUint> for Value {
    fn from(v: BigUint) -> Self {
        Value::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Int(BigUint::from(v))
    }
}

impl From<&str> for Value {
    fn from(label: &str) -> Self {
        Value::Label(label.to_owned())
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Argument {
    pub value:      Value,
    pub is_address: bool,
}

impl Argument {
    /// Range checks are the parser's job, so this never fails.
    pub fn new<V: Into<Value>>(value: V, is_address: bool) -> Self {
        Argument { value: value.into(), is_address }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_address {
            write!(f, "${}", self.value)
        } else {
            write!(f, "{}", self.value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mnemonics_sorted() {
        let mut sorted = MNEMONICS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, MNEMONICS);
    }

    #[test]
    fn test_is_valid() {
        for m in MNEMONICS {
            assert!(Instruction::new(*m, vec![]).is_valid());
        }
        assert!(Instruction::new("MOV", vec![]).is_valid());
        assert!(!Instruction::new("notaninstruction", vec![]).is_valid());
        assert!(!Instruction::new("", vec![]).is_valid());
    }

    #[test]
    fn test_equality() {
        let a = Instruction::new("adc", vec![Argument::new(2u64, true), Argument::new("a", false)]);
        let b = Instruction::new("adc", vec![Argument::new(2u64, true), Argument::new("a", false)]);
        assert_eq!(a, b);
        assert_ne!(Argument::new(2u64, true), Argument::new(2u64, false));
        assert_ne!(Argument::new("a", false), Argument::new("b", false));
    }

    #[test]
    fn test_display() {
        let ins = Instruction::new("adc", vec![
            Argument::new(2u64, true),
            Argument::new("a", false),
            Argument::new("b", true),
        ]);
        assert_eq!(ins.to_string(), "adc $2, a, $b");
        assert_eq!(Instruction::new("nop", vec![]).to_string(), "nop");
    }
}
