//! Line-pattern extraction of aliases, functions and key bindings.
//!
//! This is deliberately not a shell parser. Each physical line is matched
//! against a few patterns; multi-line constructs, continuation lines and
//! here-docs are not understood, and anything inside a function body is
//! treated like top-level code.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::Lines;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;

use crate::models::{Record, RecordKind};
use crate::utils::validate_file_size;

static ALIAS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*alias\s+(?:-[A-Za-z]+\s+)*([^\s=]+)=(.*)$").expect("valid alias regex")
});

static BINDKEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*bindkey(?:\s|$)").expect("valid bindkey regex"));

static FUNCTION_KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*function\s+([A-Za-z_][\w:.-]*)\s*(?:\(\s*\))?\s*(?:\{.*)?$")
        .expect("valid function regex")
});

static FUNCTION_PARENS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z_][\w:.-]*)\s*\(\s*\)\s*(?:\{.*)?$").expect("valid function regex")
});

/// Parse an alias value: single- or double-quoted with doubled-quote escapes, or a bare word
///
/// Returns None for an unterminated quote.
fn parse_alias_value(raw: &str) -> Option<String> {
    let mut chars = raw.chars().peekable();
    match chars.peek().copied() {
        Some(quote @ ('\'' | '"')) => {
            chars.next();
            let mut value = String::new();
            while let Some(ch) = chars.next() {
                if ch == quote {
                    if chars.peek() == Some(&quote) {
                        chars.next();
                        value.push(quote);
                    } else {
                        return Some(value);
                    }
                } else {
                    value.push(ch);
                }
            }
            None
        }
        _ => Some(raw.split_whitespace().next().unwrap_or_default().to_string()),
    }
}

/// Split a line into words, honoring simple single/double quoting
fn split_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for ch in line.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None if ch == '\'' || ch == '"' => {
                quote = Some(ch);
                in_word = true;
            }
            None if ch.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(ch);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(current);
    }
    words
}

/// `bindkey [-M keymap] [-flags] KEYSEQ WIDGET`
fn parse_binding(line: &str) -> Option<(String, String)> {
    let words = split_words(line);
    let mut iter = words.into_iter();
    if iter.next()? != "bindkey" {
        return None;
    }

    let mut positional = Vec::with_capacity(2);
    while let Some(word) = iter.next() {
        if positional.is_empty() && word.starts_with('-') && word.len() > 1 {
            // -M and -N take a keymap name
            if word == "-M" || word == "-N" {
                iter.next();
            }
            continue;
        }
        positional.push(word);
        if positional.len() == 2 {
            break;
        }
    }

    let mut positional = positional.into_iter();
    let key = positional.next().filter(|k| !k.is_empty())?;
    let widget = positional.next()?;
    Some((key, widget))
}

fn match_record(line: &str) -> Option<(String, RecordKind, String)> {
    if let Some(caps) = ALIAS_RE.captures(line) {
        let value = parse_alias_value(caps[2].trim_start())?;
        return Some((caps[1].to_string(), RecordKind::Alias, value));
    }
    // A bindkey line without a widget (e.g. `bindkey -L`) falls through and matches nothing
    if BINDKEY_RE.is_match(line)
        && let Some((key, widget)) = parse_binding(line.trim())
    {
        return Some((key, RecordKind::Binding, widget));
    }
    let caps = FUNCTION_KEYWORD_RE.captures(line).or_else(|| FUNCTION_PARENS_RE.captures(line))?;
    Some((caps[1].to_string(), RecordKind::Function, line.trim().to_string()))
}

/// Text of a comment line with the marker stripped, or None if not a comment
fn comment_text(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    if trimmed.starts_with("#!") {
        return None;
    }
    trimmed.strip_prefix('#').map(|rest| rest.trim_start_matches('#').trim())
}

/// Lazy record extraction over source text
///
/// Call [`extract_records`] again to iterate from the top; a clone continues
/// independently from the current position.
#[derive(Debug, Clone)]
pub struct Records<'a> {
    lines: Lines<'a>,
    topic: &'a str,
    comments: Vec<&'a str>,
}

impl Iterator for Records<'_> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        for line in self.lines.by_ref() {
            if let Some(text) = comment_text(line) {
                if !text.is_empty() {
                    self.comments.push(text);
                }
                continue;
            }

            let matched = match_record(line);
            let description =
                if self.comments.is_empty() { None } else { Some(self.comments.join(" ")) };
            self.comments.clear();

            if let Some((name, kind, body)) = matched {
                let topic = self.topic.to_string();
                return Some(Record { name, kind, body, description, topic });
            }
        }
        None
    }
}

/// Extract records from shell source text, in file order
///
/// # Examples
///
/// ```
/// use dotfiles_topics::parsers::extract_records;
///
/// let text = "# show status\nalias gs='git status'\n";
/// let records: Vec<_> = extract_records(text, "git").collect();
/// assert_eq!(records[0].body, "git status");
/// assert_eq!(records[0].description.as_deref(), Some("show status"));
/// ```
pub fn extract_records<'a>(text: &'a str, topic: &'a str) -> Records<'a> {
    Records { lines: text.lines(), topic, comments: Vec::new() }
}

/// Read a topic's source file and extract its records
///
/// Invalid UTF-8 is replaced rather than rejected.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read, or exceeds 1MB.
pub fn parse_source_file(path: &Path, topic: &str) -> Result<Vec<Record>> {
    let mut file = File::open(path)
        .with_context(|| format!("Failed to open source file: {}", path.display()))?;
    validate_file_size(&file, path)?;

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .with_context(|| format!("Failed to read source file: {}", path.display()))?;
    let text = String::from_utf8_lossy(&bytes);

    Ok(extract_records(&text, topic).collect())
}
