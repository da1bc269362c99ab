//! Ordered first-match-wins heuristics over line-split OCR text.
//!
//! Every field extractor is a list of named strategies tried in priority
//! order; the first one that produces a value wins. Lookahead and lookback
//! go through the bounded window helpers below, sized by a constant at each
//! call site.

use log::{debug, trace};

pub type StrategyFn = fn(&[&str]) -> Option<String>;

/// A named heuristic. The name only feeds diagnostics.
#[derive(Clone, Copy)]
pub struct Strategy {
    pub name: &'static str,
    pub run: StrategyFn,
}

impl Strategy {
    pub const fn new(name: &'static str, run: StrategyFn) -> Self {
        Strategy { name, run }
    }
}

/// Run `strategies` in order and return the first non-empty value, or ""
/// when none matches.
pub fn first_match(field: &str, lines: &[&str], strategies: &[Strategy]) -> String {
    for strategy in strategies {
        match (strategy.run)(lines) {
            Some(value) if !value.is_empty() => {
                debug!("{}: matched by '{}' -> {:?}", field, strategy.name, value);
                return value;
            }
            _ => trace!("{}: no match from '{}'", field, strategy.name),
        }
    }
    debug!("{}: not found", field);
    String::new()
}

pub type LineStrategyFn = fn(&[&str], usize) -> Option<String>;

/// A heuristic anchored at one line index; it may look at neighbouring
/// lines through the window helpers below.
#[derive(Clone, Copy)]
pub struct LineStrategy {
    pub name: &'static str,
    pub run: LineStrategyFn,
}

impl LineStrategy {
    pub const fn new(name: &'static str, run: LineStrategyFn) -> Self {
        LineStrategy { name, run }
    }
}

/// Walk the lines top to bottom, trying every strategy on a line before
/// moving to the next one. Line order dominates strategy order.
pub fn scan_lines(field: &str, lines: &[&str], strategies: &[LineStrategy]) -> Option<String> {
    for index in 0..lines.len() {
        for strategy in strategies {
            if let Some(value) = (strategy.run)(lines, index).filter(|v| !v.is_empty()) {
                trace!("{}: line {} matched by '{}'", field, index, strategy.name);
                return Some(value);
            }
        }
    }
    None
}

/// Split on `\n` only, keeping each line as written.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Split on `\n` and trim every line.
pub fn split_trimmed(text: &str) -> Vec<&str> {
    text.split('\n').map(str::trim).collect()
}

/// `index` and up to `lookahead` lines after it.
pub fn window<'a>(lines: &'a [&'a str], index: usize, lookahead: usize) -> &'a [&'a str] {
    let start = index.min(lines.len());
    let end = index.saturating_add(lookahead + 1).min(lines.len());
    &lines[start..end]
}

/// Up to `count` lines strictly after `index`.
pub fn lines_after<'a>(lines: &'a [&'a str], index: usize, count: usize) -> &'a [&'a str] {
    let start = index.saturating_add(1).min(lines.len());
    let end = index.saturating_add(count + 1).min(lines.len());
    &lines[start..end]
}

/// Up to `count` lines strictly before `index`, nearest first.
pub fn lines_before<'a>(
    lines: &'a [&'a str],
    index: usize,
    count: usize,
) -> impl Iterator<Item = &'a str> + 'a {
    let end = index.min(lines.len());
    let start = end.saturating_sub(count);
    lines[start..end].iter().rev().copied()
}

/// The line following `index`, or "" past the end.
pub fn next_line<'a>(lines: &[&'a str], index: usize) -> &'a str {
    lines.get(index + 1).copied().unwrap_or("")
}

/// Length in characters, not bytes; OCR text regularly mixes scripts.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}
