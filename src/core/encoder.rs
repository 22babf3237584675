//! Output encodings for log records
//!
//! Three encodings share one field model:
//! - `Kv`: message followed by ` key=value` tokens (default)
//! - `Json`: compact single-line object
//! - `JsonPretty`: indented object, optionally colorized (see `pretty`)
//!
//! The encoding is a single process-wide setting. Records are rendered on the
//! calling thread, so changing the format never rewrites anything already
//! rendered or queued.

use super::context::Context;
use super::level::LogLevel;
use super::value::{json_escape, FieldValue};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    /// `message key=value rid=... mod=...`
    #[default]
    Kv,

    /// `{"level":"info","msg":"...","rid":"...","mod":"...",...}`
    Json,

    /// Same object as `Json`, one key per indented line.
    JsonPretty,
}

/// Lenient parser used for environment configuration; anything unrecognized
/// falls back to `Kv`.
pub fn parse_format(s: &str) -> Format {
    match s.to_ascii_lowercase().as_str() {
        "json" => Format::Json,
        "json_pretty" | "json-pretty" | "pretty-json" => Format::JsonPretty,
        _ => Format::Kv,
    }
}

impl Format {
    pub fn render(
        &self,
        level: LogLevel,
        message: &str,
        pairs: &[(String, FieldValue)],
        context: &Context,
        color: bool,
    ) -> String {
        match self {
            Format::Kv => render_kv(message, pairs, context),
            Format::Json => render_json(level, message, pairs, context),
            Format::JsonPretty => super::pretty::render_pretty(level, message, pairs, context, color),
        }
    }
}

/// Escape line breaks and tabs so one call cannot forge extra log lines.
fn sanitize(message: &str) -> String {
    message
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

fn render_kv(message: &str, pairs: &[(String, FieldValue)], context: &Context) -> String {
    let mut line = sanitize(message);

    for (key, value) in pairs {
        line.push(' ');
        line.push_str(key);
        line.push('=');
        line.push_str(&value.to_string());
    }

    if !context.request_id.is_empty() {
        line.push_str(" rid=");
        line.push_str(&context.request_id);
    }
    if !context.module.is_empty() {
        line.push_str(" mod=");
        line.push_str(&context.module);
    }
    for (key, value) in &context.fields {
        line.push(' ');
        line.push_str(key);
        line.push('=');
        line.push_str(value);
    }

    line
}

/// Ordered field list shared by the compact and pretty JSON renderers:
/// level, msg, rid, mod, context fields, then the call's pairs.
pub(crate) fn json_fields(
    level: LogLevel,
    message: &str,
    pairs: &[(String, FieldValue)],
    context: &Context,
) -> Vec<(String, String, bool)> {
    let mut fields = Vec::with_capacity(4 + context.fields.len() + pairs.len());
    fields.push(("level".to_string(), json_escape(level.as_str()), true));
    fields.push(("msg".to_string(), json_escape(message), true));

    if !context.request_id.is_empty() {
        fields.push(("rid".to_string(), json_escape(&context.request_id), true));
    }
    if !context.module.is_empty() {
        fields.push(("mod".to_string(), json_escape(&context.module), true));
    }
    for (key, value) in &context.fields {
        fields.push((key.clone(), json_escape(value), true));
    }
    for (key, value) in pairs {
        fields.push((key.clone(), value.to_json_fragment(), value.renders_as_string()));
    }

    fields
}

fn render_json(
    level: LogLevel,
    message: &str,
    pairs: &[(String, FieldValue)],
    context: &Context,
) -> String {
    let fields = json_fields(level, message, pairs, context);

    let mut out = String::with_capacity(32 + 16 * fields.len());
    out.push('{');
    for (i, (key, value, _)) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&json_escape(key));
        out.push(':');
        out.push_str(value);
    }
    out.push('}');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> Context {
        Context::new().with_request_id("r-1").with_module("auth")
    }

    #[test]
    fn parse_format_accepts_spellings() {
        assert_eq!(parse_format("json"), Format::Json);
        assert_eq!(parse_format("JSON"), Format::Json);
        assert_eq!(parse_format("json_pretty"), Format::JsonPretty);
        assert_eq!(parse_format("json-pretty"), Format::JsonPretty);
        assert_eq!(parse_format("pretty-json"), Format::JsonPretty);
    }

    #[test]
    fn parse_format_falls_back_to_kv() {
        assert_eq!(parse_format("bogus"), Format::Kv);
        assert_eq!(parse_format(""), Format::Kv);
    }

    #[test]
    fn kv_bare_message_is_untouched() {
        let line = Format::Kv.render(LogLevel::Info, "Hello World", &[], &Context::new(), false);
        assert_eq!(line, "Hello World");
    }

    #[test]
    fn kv_appends_pairs_then_context() {
        let pairs = vec![
            ("user".to_string(), FieldValue::from("ada")),
            ("latency_ms".to_string(), FieldValue::from(12)),
        ];
        let context = ctx().with_field("env", "dev");
        let line = Format::Kv.render(LogLevel::Info, "Login ok", &pairs, &context, false);
        assert_eq!(line, "Login ok user=ada latency_ms=12 rid=r-1 mod=auth env=dev");
    }

    #[test]
    fn kv_escapes_line_breaks() {
        let line = Format::Kv.render(LogLevel::Info, "a\nb\tc", &[], &Context::new(), false);
        assert_eq!(line, "a\\nb\\tc");
    }

    #[test]
    fn json_field_order_is_fixed() {
        let pairs = vec![
            ("user".to_string(), FieldValue::from("ada")),
            ("latency_ms".to_string(), FieldValue::from(12)),
        ];
        let line = Format::Json.render(LogLevel::Info, "Login ok", &pairs, &ctx(), false);
        assert_eq!(
            line,
            r#"{"level":"info","msg":"Login ok","rid":"r-1","mod":"auth","user":"ada","latency_ms":12}"#
        );
    }

    #[test]
    fn json_omits_empty_rid_and_mod() {
        let line = Format::Json.render(LogLevel::Warn, "plain", &[], &Context::new(), false);
        assert_eq!(line, r#"{"level":"warn","msg":"plain"}"#);
    }

    #[test]
    fn json_output_parses_back() {
        let pairs = vec![("ok".to_string(), FieldValue::from(true))];
        let line = Format::Json.render(LogLevel::Error, "it \"broke\"\n", &pairs, &ctx(), false);

        let parsed: serde_json::Value = serde_json::from_str(&line).expect("invalid JSON");
        assert_eq!(parsed["level"], "error");
        assert_eq!(parsed["msg"], "it \"broke\"\n");
        assert_eq!(parsed["ok"], true);
    }

    #[test]
    fn encoding_is_deterministic() {
        let pairs = vec![("n".to_string(), FieldValue::from(7))];
        let context = ctx().with_field("b", "2").with_field("a", "1");
        for format in [Format::Kv, Format::Json, Format::JsonPretty] {
            let first = format.render(LogLevel::Info, "same", &pairs, &context, false);
            let second = format.render(LogLevel::Info, "same", &pairs, &context, false);
            assert_eq!(first, second);
        }
    }
}
