//! Dice notation parser
//!
//! Grammar (whitespace ignored, case-insensitive):
//!
//! ```text
//! expression := term (('+' | '-') term)*
//! term       := integer | dicegroup
//! dicegroup  := [count] 'd' faces [mechanic]
//! mechanic   := 'adv' | 'dis' | 'dl' k | 'dh' k | 'kh' k | 'kl' k
//! ```
//!
//! Integer constants are folded into the expression modifier; dice groups
//! keep their order and sign.

use std::str::FromStr;

use super::dice::{DiceExpression, DiceGroup, Mechanic, Sign};
use crate::error::DiceParseError;

impl DiceExpression {
    /// Parse a notation string like "1d20+5", "4d6dl1", "2d6+1d4+2".
    pub fn parse(input: &str) -> Result<Self, DiceParseError> {
        let cleaned: String = input
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        if cleaned.is_empty() {
            return Err(DiceParseError::malformed("empty expression"));
        }

        let mut cursor = Cursor::new(&cleaned);
        let mut groups = Vec::new();
        let mut modifier: i64 = 0;
        let mut sign = Sign::Plus;

        loop {
            match cursor.term()? {
                Term::Constant(value) => {
                    modifier = modifier
                        .checked_add(sign.apply(value))
                        .ok_or_else(|| DiceParseError::malformed("modifier out of range"))?;
                }
                Term::Dice(group) => groups.push(group.with_sign(sign)),
            }

            match cursor.bump() {
                None => break,
                Some(b'+') => sign = Sign::Plus,
                Some(b'-') => sign = Sign::Minus,
                Some(other) => {
                    return Err(DiceParseError::malformed(format!(
                        "unexpected '{}' at position {}",
                        other as char,
                        cursor.pos - 1
                    )))
                }
            }
        }

        DiceExpression::new(groups, modifier)
    }
}

impl FromStr for DiceExpression {
    type Err = DiceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

enum Term {
    Constant(i64),
    Dice(DiceGroup),
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a [u8] {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
        &self.bytes[start..self.pos]
    }

    fn digits(&mut self) -> &'a [u8] {
        self.take_while(|b| b.is_ascii_digit())
    }

    fn term(&mut self) -> Result<Term, DiceParseError> {
        let start = self.pos;
        let count = self.digits();

        if self.peek() == Some(b'd') {
            self.pos += 1;
            let count = if count.is_empty() {
                1
            } else {
                saturating_number(count)
            };

            let faces = self.digits();
            if faces.is_empty() {
                return Err(DiceParseError::malformed(format!(
                    "missing die size after 'd' at position {}",
                    self.pos
                )));
            }
            let faces = saturating_number(faces);
            let mechanic = self.mechanic()?;
            return DiceGroup::new(count, faces, mechanic).map(Term::Dice);
        }

        if count.is_empty() {
            return Err(match self.peek() {
                None => DiceParseError::malformed("expression ends with an operator"),
                Some(other) => DiceParseError::malformed(format!(
                    "unexpected '{}' at position {}",
                    other as char, start
                )),
            });
        }

        std::str::from_utf8(count)
            .ok()
            .and_then(|text| text.parse::<i64>().ok())
            .map(Term::Constant)
            .ok_or_else(|| DiceParseError::malformed("constant out of range"))
    }

    fn mechanic(&mut self) -> Result<Mechanic, DiceParseError> {
        let start = self.pos;
        let name = self.take_while(|b| b.is_ascii_alphabetic());
        let build: fn(u32) -> Mechanic = match name {
            b"" => return Ok(Mechanic::None),
            b"adv" => return Ok(Mechanic::Advantage),
            b"dis" => return Ok(Mechanic::Disadvantage),
            b"dl" => Mechanic::DropLowest,
            b"dh" => Mechanic::DropHighest,
            b"kh" => Mechanic::KeepHighest,
            b"kl" => Mechanic::KeepLowest,
            other => {
                return Err(DiceParseError::malformed(format!(
                    "unknown mechanic '{}' at position {}",
                    String::from_utf8_lossy(other),
                    start
                )))
            }
        };

        let k = self.digits();
        if k.is_empty() {
            return Err(DiceParseError::malformed(format!(
                "mechanic '{}' needs a dice count",
                String::from_utf8_lossy(name)
            )));
        }
        let k = u32::try_from(saturating_number(k)).unwrap_or(u32::MAX);
        Ok(build(k))
    }
}

/// Decimal digits to u64, saturating at `u64::MAX`.
fn saturating_number(digits: &[u8]) -> u64 {
    digits.iter().fold(0u64, |acc, digit| {
        acc.saturating_mul(10)
            .saturating_add(u64::from(digit - b'0'))
    })
}
