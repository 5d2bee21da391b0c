//! Tests for the letter-cycling print animation.

use laserspot::spell::{spell_out, SpellAnimation, ALPHABET};
use std::time::Duration;

#[test]
fn test_alphabet_starts_with_space() {
    assert_eq!(ALPHABET.len(), 27);
    assert!(ALPHABET.starts_with(' '));
    assert!(ALPHABET.ends_with('Z'));
}

#[test]
fn test_each_slot_cycles_until_match() {
    let lines: Vec<String> = SpellAnimation::new("HI").collect();

    // ' ' through 'H' is 9 steps, ' ' through 'I' is 10
    assert_eq!(lines.len(), 19);
    assert_eq!(lines[0], "  ");
    assert_eq!(lines[1], "A ");
    assert_eq!(lines[8], "H ");
    assert_eq!(lines[9], "H  ");
    assert_eq!(lines.last().map(String::as_str), Some("H I"));
}

#[test]
fn test_input_is_upper_cased() {
    let lower: Vec<String> = SpellAnimation::new("hi").collect();
    let upper: Vec<String> = SpellAnimation::new("HI").collect();

    assert_eq!(lower, upper);
}

#[test]
fn test_space_matches_immediately() {
    let lines: Vec<String> = SpellAnimation::new("A B").collect();

    // A: 2 steps, space: 1 step, B: 3 steps
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[2], "A   ");
    assert_eq!(lines.last().map(String::as_str), Some("A   B"));
}

#[test]
fn test_unknown_characters_stop_on_last_letter() {
    let lines: Vec<String> = SpellAnimation::new("A!").collect();

    assert_eq!(lines.len(), 2 + ALPHABET.len());
    assert_eq!(lines.last().map(String::as_str), Some("A Z"));
}

#[test]
fn test_empty_text_prints_nothing() {
    assert_eq!(SpellAnimation::new("").count(), 0);
}

#[test]
fn test_spell_out_writes_every_step() -> anyhow::Result<()> {
    let mut out = Vec::new();
    spell_out("ok", &mut out, Duration::ZERO)?;

    let text = String::from_utf8(out)?;
    let lines: Vec<&str> = text.lines().collect();

    // O is 16 steps, K is 12
    assert_eq!(lines.len(), 28);
    assert_eq!(lines.last().copied(), Some("O K"));
    Ok(())
}

#[test]
fn test_default_delay_is_fifty_millis() {
    assert_eq!(laserspot::spell::DEFAULT_DELAY, Duration::from_millis(50));
}
