//! Colorized pretty-JSON renderer
//!
//! Emits the same field set as the compact JSON encoding, one key per
//! two-space-indented line. Color only ever adds ANSI sequences around
//! tokens; the structural text is identical with color on or off.

use super::context::Context;
use super::encoder::json_fields;
use super::level::LogLevel;
use super::value::{json_escape, FieldValue};

const RESET: &str = "\x1b[0m";
const KEY: &str = "\x1b[36m";
const STR: &str = "\x1b[32m";
const NUM: &str = "\x1b[33m";
const BOOL: &str = "\x1b[35m";
const NULL: &str = "\x1b[90m";
const PUNCT: &str = "\x1b[90m";
const ACCENT: &str = "\x1b[34m";
const DIM_ACCENT: &str = "\x1b[2;36m";
const STATUS_OK: &str = "\x1b[32m";
const STATUS_REDIRECT: &str = "\x1b[36m";
const STATUS_CLIENT: &str = "\x1b[33m";
const STATUS_BAD: &str = "\x1b[31m";

fn paint(code: &str, text: &str, on: bool) -> String {
    if on {
        format!("{}{}{}", code, text, RESET)
    } else {
        text.to_string()
    }
}

/// Pick the color for a value, field-name heuristics first, then token role.
fn value_color(key: &str, fragment: &str, is_string: bool) -> &'static str {
    if key == "status" {
        return status_color(fragment);
    }
    if key.ends_with("_ms") {
        return DIM_ACCENT;
    }
    if key == "method" || key == "path" {
        return ACCENT;
    }

    if is_string {
        STR
    } else if fragment == "true" || fragment == "false" {
        BOOL
    } else if fragment == "null" {
        NULL
    } else {
        NUM
    }
}

fn status_color(fragment: &str) -> &'static str {
    match fragment.trim_matches('"').parse::<i64>() {
        Ok(code) if (200..300).contains(&code) => STATUS_OK,
        Ok(code) if (300..400).contains(&code) => STATUS_REDIRECT,
        Ok(code) if (400..500).contains(&code) => STATUS_CLIENT,
        Ok(_) => STATUS_BAD,
        Err(_) => STR,
    }
}

pub(crate) fn render_pretty(
    level: LogLevel,
    message: &str,
    pairs: &[(String, FieldValue)],
    context: &Context,
    color: bool,
) -> String {
    let fields = json_fields(level, message, pairs, context);

    let mut out = String::with_capacity(64 + 32 * fields.len());
    out.push_str(&paint(PUNCT, "{", color));
    out.push('\n');

    let last = fields.len() - 1;
    for (i, (key, fragment, is_string)) in fields.iter().enumerate() {
        out.push_str("  ");
        out.push_str(&paint(KEY, &json_escape(key), color));
        out.push_str(&paint(PUNCT, ":", color));
        out.push(' ');
        out.push_str(&paint(value_color(key, fragment, *is_string), fragment, color));
        if i != last {
            out.push_str(&paint(PUNCT, ",", color));
        }
        out.push('\n');
    }

    out.push_str(&paint(PUNCT, "}", color));
    if color {
        // Close the record so styling cannot bleed into whatever prints next.
        out.push_str(RESET);
    }
    out
}
