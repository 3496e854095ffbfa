//! Call-site extraction.
//!
//! The model requests actions by embedding call sites in its reply:
//!
//! ```text
//! Sure! [FUNCTION:navigate_to_section:{"section":"mood"}] Let's check in.
//! ```
//!
//! Every occurrence of the header (`[FUNCTION:`) opens a call site. The name
//! runs up to the next `:`, then exactly one JSON object follows, parsed with
//! a real JSON parser so braces and brackets inside string values are safe,
//! and a `]` closes the site.
//!
//! Sites that do not parse (bad JSON, non-object payload, missing `]`,
//! truncated header) are malformed: [`CallExtractor::extract`] skips them
//! silently and [`CallExtractor::clean`] still removes them from the prose.
//! A malformed site ends at the first `]` after what could be parsed that is
//! not inside a quoted string, at the next header if that comes first, or at
//! the end of the text.

use crate::error::ExtractorError;
use ease_core::config::extractor::is_valid_tag;
use ease_core::{ActionCall, ExtractorConfig};
use serde_json::Value;
use std::ops::Range;

/// Scans model output for call sites.
pub trait CallExtractor: Send + Sync {
    /// Lazily yield well-formed calls, left to right.
    fn extract<'a>(&'a self, text: &'a str) -> Box<dyn Iterator<Item = ActionCall> + 'a>;

    /// Remove every call site, well-formed or not, leaving the prose.
    ///
    /// Idempotent: cleaning already-clean text returns it unchanged.
    fn clean(&self, text: &str) -> String;

    /// Template of a call site, for telling the model how to request actions.
    fn call_syntax(&self) -> String;
}

/// Extractor for the `[TAG:name:{json}]` marker syntax.
#[derive(Debug, Clone)]
pub struct MarkerExtractor {
    header: String,
}

impl Default for MarkerExtractor {
    fn default() -> Self {
        Self {
            header: "[FUNCTION:".to_string(),
        }
    }
}

impl MarkerExtractor {
    /// Create an extractor for `[<tag>:...]` markers.
    ///
    /// The tag must be non-empty ASCII letters, digits or `_`.
    pub fn new(tag: &str) -> Result<Self, ExtractorError> {
        if !is_valid_tag(tag) {
            return Err(ExtractorError::InvalidTag {
                tag: tag.to_string(),
            });
        }
        Ok(Self {
            header: format!("[{}:", tag),
        })
    }

    pub fn from_config(config: &ExtractorConfig) -> Result<Self, ExtractorError> {
        Self::new(&config.tag)
    }

    /// The literal text that opens a call site.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Iterate over every call site, including malformed ones.
    pub fn sites<'a>(&'a self, text: &'a str) -> CallSites<'a> {
        CallSites {
            text,
            header: &self.header,
            pos: 0,
        }
    }

    fn strip_once(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for site in self.sites(text) {
            out.push_str(&text[last..site.span.start]);
            last = site.span.end;
        }
        out.push_str(&text[last..]);
        out
    }
}

impl CallExtractor for MarkerExtractor {
    fn extract<'a>(&'a self, text: &'a str) -> Box<dyn Iterator<Item = ActionCall> + 'a> {
        Box::new(self.sites(text).filter_map(|site| {
            if site.call.is_none() {
                tracing::debug!(
                    start = site.span.start,
                    end = site.span.end,
                    "Skipping malformed call site"
                );
            }
            site.call
        }))
    }

    fn clean(&self, text: &str) -> String {
        let mut cleaned = self.strip_once(text);
        // Removing a site can join the text around it into a new header.
        while cleaned.contains(&self.header) {
            cleaned = self.strip_once(&cleaned);
        }
        cleaned
    }

    fn call_syntax(&self) -> String {
        format!("{}<action_name>:<json_arguments>]", self.header)
    }
}

/// One call site found in the text.
#[derive(Debug, Clone, PartialEq)]
pub struct CallSite {
    /// Byte range of the whole marker, brackets included.
    pub span: Range<usize>,
    /// The parsed call, or `None` when the site is malformed.
    pub call: Option<ActionCall>,
}

impl CallSite {
    pub fn is_malformed(&self) -> bool {
        self.call.is_none()
    }
}

/// Single left-to-right pass over the call sites of one text.
pub struct CallSites<'a> {
    text: &'a str,
    header: &'a str,
    pos: usize,
}

impl Iterator for CallSites<'_> {
    type Item = CallSite;

    fn next(&mut self) -> Option<CallSite> {
        let start = self.pos + self.text.get(self.pos..)?.find(self.header)?;
        let body = start + self.header.len();
        let rest = &self.text[body..];

        let (end, call) = match parse_site(rest) {
            Ok((consumed, call)) => (body + consumed, Some(call)),
            Err(resume) => {
                let limit = rest
                    .find(self.header)
                    .map(|i| body + i)
                    .unwrap_or(self.text.len());
                let from = body + resume;
                let end = if from <= limit {
                    closing_bracket(&self.text[from..limit])
                        .map(|i| from + i)
                        .unwrap_or(limit)
                } else {
                    from
                };
                (end, None)
            }
        };

        self.pos = end;
        Some(CallSite {
            span: start..end,
            call,
        })
    }
}

/// Parse `name:{json}]` at the start of `rest`.
///
/// On success returns the bytes consumed (through the closing `]`). On
/// failure returns the offset from which to look for the closing `]`.
fn parse_site(rest: &str) -> Result<(usize, ActionCall), usize> {
    let name_start = skip_whitespace(rest, 0);
    let name_end = rest[name_start..]
        .find(|c: char| c.is_whitespace() || matches!(c, ':' | '[' | ']'))
        .map(|i| name_start + i)
        .unwrap_or(rest.len());
    if name_end == name_start {
        return Err(0);
    }
    let name = &rest[name_start..name_end];

    let colon = skip_whitespace(rest, name_end);
    if !rest[colon..].starts_with(':') {
        return Err(0);
    }
    let payload_start = colon + 1;

    let mut stream = serde_json::Deserializer::from_str(&rest[payload_start..]).into_iter::<Value>();
    let arguments = match stream.next() {
        Some(Ok(Value::Object(map))) => map,
        Some(Ok(_)) => return Err(payload_start + stream.byte_offset()),
        Some(Err(_)) | None => return Err(payload_start),
    };
    let payload_end = payload_start + stream.byte_offset();

    let close = skip_whitespace(rest, payload_end);
    if !rest[close..].starts_with(']') {
        return Err(payload_end);
    }

    Ok((close + 1, ActionCall::new(name, arguments)))
}

/// Offset just past the `]` closing a malformed site within `region`.
///
/// Brackets inside double-quoted strings do not count. When the quotes never
/// balance, the first `]` wins.
fn closing_bracket(region: &str) -> Option<usize> {
    let mut in_string = false;
    let mut escaped = false;
    for (i, c) in region.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if c == ']' {
            return Some(i + 1);
        }
    }
    if in_string {
        region.find(']').map(|i| i + 1)
    } else {
        None
    }
}

fn skip_whitespace(text: &str, from: usize) -> usize {
    text[from..]
        .find(|c: char| !c.is_whitespace())
        .map(|i| from + i)
        .unwrap_or(text.len())
}
