use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ShotMapError;
use crate::http_client::http_client;

const MATCH_URL_BASE: &str = "https://understat.com/match/";

// Single-quoted argument of the embedded JSON.parse call. The blob itself
// never contains an unescaped single quote.
static SHOTS_DATA_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"shotsData\s*=\s*JSON\.parse\('([^']+)'\)").expect("shotsData pattern is valid")
});

/// Raw shot lists exactly as the page embeds them: home side then away side.
#[derive(Debug, Clone, Deserialize)]
pub struct ShotsData {
    pub h: Vec<Value>,
    pub a: Vec<Value>,
}

pub fn match_url(match_id: u32) -> String {
    format!("{MATCH_URL_BASE}{match_id}")
}

/// One blocking GET for the match page. Non-success statuses are an error;
/// there are no retries.
pub fn fetch_match_page(url: &str) -> Result<String> {
    let client = http_client()?;
    let resp = client.get(url).send().context("request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        return Err(ShotMapError::Network {
            url: url.to_string(),
            status,
        }
        .into());
    }
    Ok(body)
}

/// Locates the escaped shotsData blob in the page source.
pub fn extract_shots_blob(page: &str) -> Result<&str, ShotMapError> {
    SHOTS_DATA_RE
        .captures(page)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or(ShotMapError::MissingShotsData)
}

/// Unescapes the blob and parses it into home/away shot lists.
pub fn decode_shots_data(blob: &str) -> Result<ShotsData, ShotMapError> {
    let decoded = decode_backslash_escapes(blob);
    Ok(serde_json::from_str(&decoded)?)
}

pub fn parse_match_page(page: &str) -> Result<ShotsData, ShotMapError> {
    decode_shots_data(extract_shots_blob(page)?)
}

/// Decodes `\xNN`, `\uXXXX` (including surrogate pairs) and the common
/// single-character escapes the page uses. Unknown escapes pass through
/// verbatim, so malformed input decodes the same way every time.
pub fn decode_backslash_escapes(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '\\' || i + 1 == chars.len() {
            out.push(chars[i]);
            i += 1;
            continue;
        }
        match chars[i + 1] {
            'x' => match hex_code(&chars, i + 2, 2) {
                Some(code) => {
                    push_code_point(&mut out, code);
                    i += 4;
                }
                None => {
                    out.push_str("\\x");
                    i += 2;
                }
            },
            'u' => match hex_code(&chars, i + 2, 4) {
                Some(hi @ 0xD800..=0xDBFF) => {
                    // Surrogate pair: the low half follows as another \uXXXX.
                    if let Some(lo @ 0xDC00..=0xDFFF) = low_surrogate(&chars, i + 6) {
                        let code = 0x10000 + ((hi - 0xD800) << 10) + (lo - 0xDC00);
                        push_code_point(&mut out, code);
                        i += 12;
                    } else {
                        out.push(char::REPLACEMENT_CHARACTER);
                        i += 6;
                    }
                }
                Some(code) => {
                    push_code_point(&mut out, code);
                    i += 6;
                }
                None => {
                    out.push_str("\\u");
                    i += 2;
                }
            },
            'n' => step(&mut out, '\n', &mut i),
            't' => step(&mut out, '\t', &mut i),
            'r' => step(&mut out, '\r', &mut i),
            'b' => step(&mut out, '\u{0008}', &mut i),
            'f' => step(&mut out, '\u{000C}', &mut i),
            '0' => step(&mut out, '\0', &mut i),
            '\\' => step(&mut out, '\\', &mut i),
            '\'' => step(&mut out, '\'', &mut i),
            '"' => step(&mut out, '"', &mut i),
            '/' => step(&mut out, '/', &mut i),
            other => {
                out.push('\\');
                out.push(other);
                i += 2;
            }
        }
    }

    out
}

fn step(out: &mut String, c: char, i: &mut usize) {
    out.push(c);
    *i += 2;
}

fn hex_code(chars: &[char], start: usize, len: usize) -> Option<u32> {
    if start + len > chars.len() {
        return None;
    }
    let mut code = 0;
    for c in &chars[start..start + len] {
        code = code * 16 + c.to_digit(16)?;
    }
    Some(code)
}

fn low_surrogate(chars: &[char], start: usize) -> Option<u32> {
    if chars.get(start) == Some(&'\\') && chars.get(start + 1) == Some(&'u') {
        hex_code(chars, start + 2, 4)
    } else {
        None
    }
}

fn push_code_point(out: &mut String, code: u32) {
    out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_hex_and_unicode_escapes() {
        assert_eq!(
            decode_backslash_escapes(r"\x7B\x22h\x22\x3A\x5B\x5D\x7D"),
            r#"{"h":[]}"#
        );
        assert_eq!(decode_backslash_escapes(r"Ren\u00e9"), "René");
        assert_eq!(decode_backslash_escapes(r"\ud83c\udfc6"), "\u{1F3C6}");
        assert_eq!(decode_backslash_escapes(r"\ud800 lone"), "\u{FFFD} lone");
    }

    #[test]
    fn passes_through_plain_and_unknown_sequences() {
        assert_eq!(decode_backslash_escapes("plain ascii"), "plain ascii");
        assert_eq!(decode_backslash_escapes(r"\q"), r"\q");
        assert_eq!(decode_backslash_escapes(r"\xZZ"), r"\xZZ");
        assert_eq!(decode_backslash_escapes(r"tail\"), r"tail\");
    }

    #[test]
    fn decodes_common_single_char_escapes() {
        assert_eq!(decode_backslash_escapes(r"a\'b\nc\/d"), "a'b\nc/d");
    }

    #[test]
    fn extraction_failure_is_deterministic() {
        let page = "<html><body>no data here</body></html>";
        for _ in 0..3 {
            assert!(matches!(
                extract_shots_blob(page),
                Err(ShotMapError::MissingShotsData)
            ));
        }
    }

    #[test]
    fn tolerates_spacing_around_assignment() {
        let page = "var shotsData \t = JSON.parse('\\x7B\\x22h\\x22:[],\\x22a\\x22:[]\\x7D');";
        let shots = parse_match_page(page).expect("blob should parse");
        assert!(shots.h.is_empty());
        assert!(shots.a.is_empty());
    }
}
