//! Terminal capability detection
//!
//! All platform- and terminal-specific probing lives here so the logger core
//! never branches on the environment directly.

use std::io::IsTerminal;

pub fn stdout_is_tty() -> bool {
    std::io::stdout().is_terminal()
}

pub fn stderr_is_tty() -> bool {
    std::io::stderr().is_terminal()
}

fn env_nonempty(key: &str) -> bool {
    std::env::var(key).map(|v| !v.is_empty()).unwrap_or(false)
}

/// Color policy: `NO_COLOR` wins, then `VIX_COLOR`
/// (never|0|false vs. always|1|true), then "on when stdout is a terminal".
pub fn colors_enabled() -> bool {
    if env_nonempty("NO_COLOR") {
        return false;
    }

    if let Ok(v) = std::env::var("VIX_COLOR") {
        match v.to_ascii_lowercase().as_str() {
            "never" | "0" | "false" => return false,
            "always" | "1" | "true" => return true,
            _ => {}
        }
    }

    stdout_is_tty()
}

/// OSC-8 hyperlinks are emitted only for terminals known to render them;
/// everything else gets the plain text.
pub fn hyperlinks_enabled() -> bool {
    if env_nonempty("VIX_NO_HYPERLINK") {
        return false;
    }
    if !stderr_is_tty() {
        return false;
    }

    if env_nonempty("VSCODE_PID")
        || env_nonempty("WT_SESSION")
        || env_nonempty("WEZTERM_EXECUTABLE")
        || env_nonempty("KITTY_WINDOW_ID")
        || env_nonempty("VTE_VERSION")
    {
        return true;
    }

    if let Ok(tp) = std::env::var("TERM_PROGRAM") {
        if matches!(tp.as_str(), "iTerm.app" | "Apple_Terminal" | "WezTerm" | "vscode") {
            return true;
        }
    }

    // screen/tmux usually swallow OSC-8
    if let Ok(term) = std::env::var("TERM") {
        if term.contains("screen") {
            return false;
        }
    }

    false
}

/// Wrap `text` in an OSC-8 hyperlink pointing at `url` when `on`.
pub fn osc8_link(url: &str, text: &str, on: bool) -> String {
    if !on {
        return text.to_string();
    }

    // OSC 8 ; ; URL ST  TEXT  OSC 8 ; ; ST
    const ST: &str = "\x1b\\";
    let mut out = String::with_capacity(url.len() + text.len() + 16);
    out.push_str("\x1b]8;;");
    out.push_str(url);
    out.push_str(ST);
    out.push_str(text);
    out.push_str("\x1b]8;;");
    out.push_str(ST);
    out
}
