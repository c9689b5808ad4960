// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Statement extraction from raw model output
//!
//! Model output is cleaned in two steps: code-fence markers are removed, then
//! a small statement-boundary parser finds the first `;` that is not inside a
//! quoted string, a quoted identifier or a comment. Everything after that
//! terminator is discarded, so at most one statement ever leaves this module.

use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, take_till, take_till1, take_until},
    character::complete::{char, one_of},
    combinator::{map, not, recognize},
    multi::many0,
    sequence::{pair, terminated, tuple},
    IResult,
};
use once_cell::sync::Lazy;
use regex::Regex;

/// Statement terminator
pub const TERMINATOR: char = ';';

static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)```(?:sqlite|sql)?").expect("code fence pattern is valid"));

/// Remove Markdown code-fence markers (```` ```sql ```` and ```` ``` ````)
pub fn strip_code_fences(raw: &str) -> String {
    CODE_FENCE.replace_all(raw, "").trim().to_string()
}

/// Return the first statement of `text`, terminated by exactly one `;`
///
/// Returns `None` when there is no statement text at all (only whitespace,
/// comments or terminators). When a quote, bracket or comment is never closed
/// before the first terminator (an apostrophe in leading prose, say), the
/// text is cut at the first `;` regardless of quoting.
pub fn first_statement(text: &str) -> Option<String> {
    let (rest, segments) = match many0(segment)(text) {
        Ok(parsed) => parsed,
        Err(_) => (text, Vec::new()),
    };

    let body = if rest.is_empty() || rest.starts_with(TERMINATOR) {
        // Cut after the last segment holding code so trailing comments are dropped
        let mut consumed = 0;
        let mut end = 0;
        for segment in &segments {
            consumed += segment.text().len();
            if let Segment::Code(code) = segment {
                if !code.trim().is_empty() {
                    end = consumed;
                }
            }
        }
        &text[..end]
    } else {
        // No clean boundary: cut at the first terminator anywhere
        text.split(TERMINATOR).next().unwrap_or_default()
    };

    let body = body.trim();
    if body.is_empty() {
        None
    } else {
        Some(format!("{}{}", body, TERMINATOR))
    }
}

/// Strip fences, then keep only the first statement
pub fn extract_statement(raw: &str) -> Option<String> {
    first_statement(&strip_code_fences(raw))
}

/// A lexical piece of statement text
#[derive(Debug, Clone, Copy, PartialEq)]
enum Segment<'a> {
    Code(&'a str),
    Comment(&'a str),
}

impl<'a> Segment<'a> {
    fn text(&self) -> &'a str {
        match self {
            Segment::Code(text) | Segment::Comment(text) => text,
        }
    }
}

fn segment(input: &str) -> IResult<&str, Segment<'_>> {
    alt((
        map(line_comment, Segment::Comment),
        map(block_comment, Segment::Comment),
        map(
            alt((
                quoted('\''),
                quoted('"'),
                quoted('`'),
                bracketed,
                is_not("'\"`[-/;"),
                recognize(one_of("-")),
                terminated(tag("/"), not(char('*'))),
            )),
            Segment::Code,
        ),
    ))(input)
}

/// Quoted text where a doubled quote character is an escaped quote
fn quoted<'a>(quote: char) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    recognize(tuple((
        char(quote),
        many0(alt((
            take_till1(move |c| c == quote),
            recognize(pair(char(quote), char(quote))),
        ))),
        char(quote),
    )))
}

fn bracketed(input: &str) -> IResult<&str, &str> {
    recognize(tuple((char('['), take_till(|c| c == ']'), char(']'))))(input)
}

fn line_comment(input: &str) -> IResult<&str, &str> {
    recognize(pair(tag("--"), take_till(|c| c == '\n')))(input)
}

fn block_comment(input: &str) -> IResult<&str, &str> {
    recognize(tuple((tag("/*"), take_until("*/"), tag("*/"))))(input)
}
