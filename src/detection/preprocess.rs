//! Turns a raw RFC 822 message into the subject and plain body the classifier reads.

use base64::{engine::general_purpose::STANDARD, Engine};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref ENCODED_WORD: Regex = Regex::new(r"=\?([^?]+)\?([bBqQ])\?([^?]*)\?=").unwrap();
    static ref BETWEEN_ENCODED_WORDS: Regex = Regex::new(r"\?=\s+=\?").unwrap();
    static ref HTML_TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedEmail {
    pub subject: String,
    pub body: String,
}

/// Header block plus body of one MIME entity
struct Part {
    headers: Vec<(String, String)>,
    body: String,
}

impl Part {
    /// Headers run until an empty line, or until the first line that is
    /// neither a header field nor a folded continuation; that line opens the body.
    fn parse(raw: &str) -> Part {
        let mut headers: Vec<(String, String)> = Vec::new();
        let mut body_start = raw.len();
        let mut offset = 0;

        for line in raw.split_inclusive('\n') {
            let text = line.trim_end_matches('\n');
            if text.is_empty() {
                body_start = offset + line.len();
                break;
            }
            if text.starts_with(' ') || text.starts_with('\t') {
                // folded continuation of the previous header
                if let Some((_, value)) = headers.last_mut() {
                    value.push(' ');
                    value.push_str(text.trim());
                }
            } else if let Some((name, value)) = header_field(text) {
                headers.push((name.to_ascii_lowercase(), value.trim().to_string()));
            } else {
                body_start = offset;
                break;
            }
            offset += line.len();
        }

        Part {
            headers,
            body: raw[body_start..].to_string(),
        }
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Lower-cased media type, `text/plain` when absent
    fn content_type(&self) -> String {
        self.header("content-type")
            .and_then(|v| v.split(';').next())
            .map(|t| t.trim().to_ascii_lowercase())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "text/plain".to_string())
    }

    fn boundary(&self) -> Option<String> {
        let value = self.header("content-type")?;
        value.split(';').skip(1).find_map(|param| {
            let (key, val) = param.split_once('=')?;
            if key.trim().eq_ignore_ascii_case("boundary") {
                Some(val.trim().trim_matches('"').to_string())
            } else {
                None
            }
        })
    }

    fn is_attachment(&self) -> bool {
        self.header("content-disposition")
            .map(|d| d.to_ascii_lowercase().contains("attachment"))
            .unwrap_or(false)
    }

    fn decoded_body(&self) -> Result<String, String> {
        let encoding = self
            .header("content-transfer-encoding")
            .map(|e| e.trim().to_ascii_lowercase())
            .unwrap_or_default();

        let bytes = match encoding.as_str() {
            "base64" => {
                let compact: String = self.body.chars().filter(|c| !c.is_whitespace()).collect();
                STANDARD
                    .decode(compact.as_bytes())
                    .map_err(|e| format!("invalid base64 body: {}", e))?
            }
            "quoted-printable" => decode_quoted_printable(&self.body, false),
            _ => self.body.as_bytes().to_vec(),
        };

        Ok(lossy_utf8(&bytes))
    }

    /// Leaf entities in depth-first order
    fn leaves(self) -> Vec<Part> {
        if !self.content_type().starts_with("multipart/") {
            return vec![self];
        }

        let boundary = match self.boundary() {
            Some(b) => b,
            None => return vec![self],
        };

        let delimiter = format!("--{}", boundary);
        let mut leaves = Vec::new();

        // preamble before the first delimiter is skipped
        for chunk in self.body.split(delimiter.as_str()).skip(1) {
            if chunk.starts_with("--") {
                break;
            }
            // the rest of the delimiter line; a blank line right after it means no headers
            let chunk = chunk.strip_prefix('\n').unwrap_or(chunk);
            leaves.extend(Part::parse(chunk).leaves());
        }

        leaves
    }
}

/// `name: value` where the name is printable ASCII without spaces or colons
fn header_field(line: &str) -> Option<(&str, &str)> {
    let (name, value) = line.split_once(':')?;
    let valid = !name.is_empty() && name.bytes().all(|b| (b'!'..=b'~').contains(&b));
    valid.then_some((name, value))
}

/// Extracts a clean subject and body from a raw message.
///
/// Never fails: a message that cannot be decoded yields empty fields.
pub fn preprocess_email(raw: &str) -> ParsedEmail {
    match try_preprocess(raw) {
        Ok(parsed) => parsed,
        Err(e) => {
            log::warn!("⚠️  Error processing email: {}", e);
            ParsedEmail::default()
        }
    }
}

fn try_preprocess(raw: &str) -> Result<ParsedEmail, String> {
    let normalized = raw.replace("\r\n", "\n");
    let message = Part::parse(&normalized);

    let subject = message
        .header("subject")
        .map(decode_header_value)
        .unwrap_or_default();

    let mut plain: Option<String> = None;
    let mut html: Option<String> = None;

    for part in message.leaves() {
        if part.is_attachment() {
            continue;
        }
        match part.content_type().as_str() {
            "text/plain" => {
                plain = Some(part.decoded_body()?);
                break;
            }
            "text/html" if html.is_none() => {
                html = Some(part.decoded_body()?);
            }
            _ => {}
        }
    }

    let body = plain.or(html).map(|b| clean_body(&b)).unwrap_or_default();

    Ok(ParsedEmail { subject, body })
}

/// Strips tags and collapses whitespace
pub fn clean_body(body: &str) -> String {
    let without_tags = HTML_TAG.replace_all(body, "");
    WHITESPACE.replace_all(&without_tags, " ").trim().to_string()
}

/// Decodes RFC 2047 encoded-words (`=?utf-8?B?...?=`) inside a header value
pub fn decode_header_value(value: &str) -> String {
    // whitespace between two adjacent encoded-words is not part of the text
    let joined = BETWEEN_ENCODED_WORDS.replace_all(value, "?==?");

    ENCODED_WORD
        .replace_all(&joined, |caps: &regex::Captures| {
            let charset = caps[1].to_ascii_lowercase();
            let text = &caps[3];
            let bytes = match &caps[2] {
                "B" | "b" => match STANDARD.decode(text.as_bytes()) {
                    Ok(bytes) => bytes,
                    Err(_) => return caps[0].to_string(),
                },
                _ => decode_quoted_printable(text, true),
            };
            decode_charset(&bytes, &charset)
        })
        .into_owned()
}

fn decode_charset(bytes: &[u8], charset: &str) -> String {
    match charset {
        "iso-8859-1" | "latin1" | "latin-1" => bytes.iter().map(|&b| b as char).collect(),
        _ => lossy_utf8(bytes),
    }
}

/// UTF-8 decoding that drops invalid sequences instead of replacing them
fn lossy_utf8(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .chars()
        .filter(|c| *c != char::REPLACEMENT_CHARACTER)
        .collect()
}

/// Quoted-printable decoding. In headers (`q` encoding) `_` stands for a space.
fn decode_quoted_printable(input: &str, header: bool) -> Vec<u8> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'=' if bytes.get(i + 1) == Some(&b'\n') => i += 2,
            b'=' => {
                let decoded = bytes
                    .get(i + 1..i + 3)
                    .filter(|hex| hex.iter().all(u8::is_ascii_hexdigit))
                    .and_then(|hex| std::str::from_utf8(hex).ok())
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok());
                match decoded {
                    Some(b) => {
                        out.push(b);
                        i += 3;
                    }
                    None => {
                        out.push(b'=');
                        i += 1;
                    }
                }
            }
            b'_' if header => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }

    out
}
