use anyhow::Result;
use std::io::Write;
use std::time::Duration;

/// Letters tried for every slot, in order
pub const ALPHABET: &str = " ABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub const DEFAULT_DELAY: Duration = Duration::from_millis(50);

/// Spells text out one slot at a time by cycling each slot through the alphabet.
///
/// Each item is one rendered line: every slot joined by a single space, with
/// slots not reached yet rendered as empty strings. A character that is not in
/// the alphabet never matches, so its slot stops on the last letter.
#[derive(Debug, Clone)]
pub struct SpellAnimation {
    target: Vec<char>,
    output: Vec<Option<char>>,
    alphabet: Vec<char>,
    slot: usize,
    letter: usize,
}

impl SpellAnimation {
    pub fn new(text: &str) -> Self {
        let target: Vec<char> = text.to_uppercase().chars().collect();
        Self {
            output: vec![None; target.len()],
            target,
            alphabet: ALPHABET.chars().collect(),
            slot: 0,
            letter: 0,
        }
    }

    fn render(&self) -> String {
        self.output
            .iter()
            .map(|c| c.map(String::from).unwrap_or_default())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Iterator for SpellAnimation {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.slot >= self.target.len() {
            return None;
        }

        let letter = self.alphabet[self.letter];
        self.output[self.slot] = Some(letter);
        let line = self.render();

        if letter == self.target[self.slot] || self.letter + 1 == self.alphabet.len() {
            self.slot += 1;
            self.letter = 0;
        } else {
            self.letter += 1;
        }

        Some(line)
    }
}

/// Play the animation into a writer, pausing `delay` before every step
pub fn spell_out<W: Write>(text: &str, out: &mut W, delay: Duration) -> Result<()> {
    for line in SpellAnimation::new(text) {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
        writeln!(out, "{}", line)?;
        out.flush()?;
    }
    Ok(())
}
