// FormatMapExtractor - pulls the fmt_url_map out of a watch page
//
// The watch page embeds the player configuration in a script variable:
//
//     var swfHTML = "...&fmt_url_map=<escaped map>&...";
//
// The escaped map, once unescaped, is a comma-separated list of
// `<format code>|<media url>` entries.

use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;

use super::errors::{ExtractionStage, ResolveError};
use super::models::{FormatEntry, FormatMap};

lazy_static! {
    static ref PLAYER_REGION_RE: Regex = Regex::new(r"var swfHTML[^;]*;").unwrap();
    // Greedy prefix: the last fmt_url_map in the region wins.
    static ref FMT_URL_MAP_RE: Regex = Regex::new(r"(?s).*&fmt_url_map=([^&]+)&").unwrap();
    static ref HD_AVAILABLE_RE: Regex = Regex::new(r"IS_HD_AVAILABLE[^:]*: *([^,]*)").unwrap();
}

pub struct FormatMapExtractor;

impl FormatMapExtractor {
    /// Locate, unescape and parse the embedded format map
    pub fn extract(page: &str) -> Result<FormatMap, ResolveError> {
        let region = PLAYER_REGION_RE
            .find(page)
            .ok_or(ResolveError::ExtractionFailed {
                stage: ExtractionStage::MarkerRegion,
            })?;

        let raw = FMT_URL_MAP_RE
            .captures(region.as_str())
            .and_then(|caps| caps.get(1))
            .ok_or(ResolveError::ExtractionFailed {
                stage: ExtractionStage::FormatMapParam,
            })?;

        let decoded = url_unescape(raw.as_str().trim());
        tracing::debug!(map = %decoded, "Decoded fmt_url_map");

        Ok(parse_format_map(&decoded))
    }

    /// The page's `IS_HD_AVAILABLE` flag, if present and readable
    pub fn hd_available(page: &str) -> Option<bool> {
        let caps = HD_AVAILABLE_RE.captures(page)?;
        let value = caps
            .get(1)?
            .as_str()
            .trim_end_matches(|c: char| c == '}' || c == ')' || c == ';' || c.is_whitespace())
            .trim()
            .trim_matches(|c| c == '\'' || c == '"')
            .to_ascii_lowercase();

        match value.as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }
}

/// Split an unescaped map into entries.
///
/// Every comma-separated segment is considered, including a final one with no
/// trailing comma. Segments without a `|`, or starting with one, are skipped.
pub fn parse_format_map(decoded: &str) -> FormatMap {
    decoded
        .split(',')
        .filter_map(|segment| match segment.find('|') {
            Some(pos) if pos > 0 => Some(FormatEntry::new(
                parse_format_code(&segment[..pos]),
                &segment[pos + 1..],
            )),
            _ => {
                if !segment.is_empty() {
                    tracing::trace!(segment, "Skipping malformed format entry");
                }
                None
            }
        })
        .collect()
}

/// atoi-style: optional leading whitespace and sign, then the digit prefix.
/// Anything unparseable yields 0.
fn parse_format_code(text: &str) -> i32 {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());

    match rest[..digits_end].parse::<i32>() {
        Ok(value) if negative => -value,
        Ok(value) => value,
        Err(_) => 0,
    }
}

/// Form-style unescape: `+` becomes a space, `%XX` becomes the byte.
fn url_unescape(text: &str) -> String {
    let spaced: Cow<'_, str> = if text.contains('+') {
        Cow::Owned(text.replace('+', " "))
    } else {
        Cow::Borrowed(text)
    };

    let bytes = urlencoding::decode_binary(spaced.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}
