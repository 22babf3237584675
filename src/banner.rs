//! One-shot server-ready banner
//!
//! Prints the multi-line startup block to stderr. The whole block goes out
//! under the console gate: the banner latch is closed before the first byte
//! and reopened after the last, so concurrent log writes (with console sync
//! enabled) line up behind it instead of tearing through it.

use crate::core::console_sync;
use crate::env::env_or;
use crate::term;

const RESET: &str = "\x1b[0m";

/// Everything the banner renders. Fields left at their defaults are skipped
/// where that makes sense (version, config path, thread counts).
#[derive(Debug, Clone)]
pub struct ServerReadyInfo {
    pub app: String,
    pub version: String,
    pub ready_ms: i64,
    pub mode: String,
    pub status: String,
    pub config_path: String,
    pub host: String,
    pub port: u16,
    pub scheme: String,
    pub base_path: String,
    pub show_ws: bool,
    pub ws_host: String,
    pub ws_port: u16,
    pub ws_scheme: String,
    pub ws_path: String,
    pub show_hints: bool,
    pub threads: usize,
    pub max_threads: usize,
}

impl Default for ServerReadyInfo {
    fn default() -> Self {
        Self {
            app: "vix".to_string(),
            version: String::new(),
            ready_ms: -1,
            mode: mode_from_env(),
            status: "ready".to_string(),
            config_path: String::new(),
            host: "localhost".to_string(),
            port: 8080,
            scheme: "http".to_string(),
            base_path: "/".to_string(),
            show_ws: true,
            ws_host: "localhost".to_string(),
            ws_port: 9090,
            ws_scheme: "ws".to_string(),
            ws_path: "/".to_string(),
            show_hints: true,
            threads: 0,
            max_threads: 0,
        }
    }
}

/// `VIX_MODE`: dev/watch/reload map to "dev", everything else to "run".
pub fn mode_from_env() -> String {
    match env_or("VIX_MODE", "run").to_ascii_lowercase().as_str() {
        "dev" | "watch" | "reload" => "dev".to_string(),
        _ => "run".to_string(),
    }
}

/// Print the banner. Call once, at startup.
pub fn emit_server_ready(info: &ServerReadyInfo) {
    console_sync::reset_banner();

    let color = term::colors_enabled();
    let links = term::hyperlinks_enabled();
    let block = render(info, color, links);

    {
        let _console = console_sync::acquire_console();
        eprint!("{}", block);
    }

    console_sync::mark_banner_done();
}

fn render(info: &ServerReadyInfo, color: bool, links: bool) -> String {
    let mut out = String::with_capacity(512);

    // Headline: time, identity, status pill, version, startup latency, mode.
    out.push_str(&gray(&local_time_12h(), color));
    out.push_str("  ");
    out.push_str(&identity(&info.app, color));
    out.push_str("  ");
    out.push_str(&status_pill(&info.status.to_uppercase(), color));
    if !info.version.is_empty() {
        out.push_str("  ");
        out.push_str(&bold(&bright(&info.version, color), color));
    }
    if info.ready_ms >= 0 {
        out.push_str(&dim(&format!(" ({} ms)", info.ready_ms), color));
    }
    if !info.mode.is_empty() {
        out.push_str("  ");
        out.push_str(&mode_tag(&info.mode, color));
    }
    out.push_str("\n\n");

    row(&mut out, &bullet(color), "HTTP:", &link(&http_url(info), color, links), color);
    if info.show_ws {
        row(&mut out, &bullet(color), "WS:", &link(&ws_url(info), color, links), color);
    }
    if !info.config_path.is_empty() {
        row(&mut out, &info_mark(color), "Config:", &dim(&info.config_path, color), color);
    }
    if info.threads > 0 {
        let mut v = info.threads.to_string();
        if info.max_threads > 0 {
            v.push('/');
            v.push_str(&info.max_threads.to_string());
        }
        row(&mut out, &info_mark(color), "Threads:", &dim(&v, color), color);
    }
    row(&mut out, &info_mark(color), "Mode:", &dim(&pretty_mode(&info.mode), color), color);
    row(&mut out, &info_mark(color), "Status:", &dim(&info.status, color), color);
    if info.show_hints {
        row(&mut out, &info_mark(color), "Hint:", &dim("Ctrl+C to stop the server", color), color);
    }
    out.push('\n');

    out
}

const LABEL_WIDTH: usize = 9;

fn row(out: &mut String, icon: &str, label: &str, value: &str, color: bool) {
    out.push_str("  ");
    out.push_str(icon);
    out.push(' ');
    let padded = format!("{:<width$}", label, width = LABEL_WIDTH);
    out.push_str(&bold(&bright(&padded, color), color));
    out.push_str(value);
    out.push('\n');
}

fn http_url(i: &ServerReadyInfo) -> String {
    let path = if i.base_path.is_empty() {
        "/".to_string()
    } else if i.base_path.starts_with('/') {
        i.base_path.clone()
    } else {
        format!("/{}", i.base_path)
    };
    format!("{}://{}:{}{}", i.scheme, i.host, i.port, path)
}

fn ws_url(i: &ServerReadyInfo) -> String {
    let path = if i.ws_path.is_empty() || i.ws_path.starts_with('/') {
        i.ws_path.clone()
    } else {
        format!("/{}", i.ws_path)
    };
    format!("{}://{}:{}{}", i.ws_scheme, i.ws_host, i.ws_port, path)
}

fn pretty_mode(mode: &str) -> String {
    match mode {
        "dev" => "dev (watch/reload)".to_string(),
        "" => "run".to_string(),
        other => other.to_string(),
    }
}

fn local_time_12h() -> String {
    use chrono::Timelike;
    let now = chrono::Local::now();
    let (pm, hour) = now.hour12();
    format!(
        "{}:{:02}:{:02} {}",
        hour,
        now.minute(),
        now.second(),
        if pm { "PM" } else { "AM" }
    )
}

fn identity(app: &str, color: bool) -> String {
    if !color {
        return format!("[{}]", app);
    }
    format!("\x1b[32m●{} \x1b[1;32m{}{}", RESET, app.to_uppercase(), RESET)
}

fn status_pill(status_upper: &str, color: bool) -> String {
    if !color {
        return status_upper.to_string();
    }
    let bg = match status_upper {
        "READY" => 34,
        "RUNNING" | "LISTENING" => 35,
        "WARN" | "WARNING" => 214,
        "ERROR" | "FAILED" => 196,
        _ => 34,
    };
    format!("\x1b[1m\x1b[48;5;{}m\x1b[30m {} {}", bg, status_upper, RESET)
}

fn mode_tag(mode: &str, color: bool) -> String {
    if !color {
        return format!("[{}]", mode);
    }
    if mode == "dev" {
        format!("\x1b[1m\x1b[48;5;34m\x1b[30m dev {}", RESET)
    } else {
        format!("\x1b[1m\x1b[48;5;238m\x1b[97m run {}", RESET)
    }
}

fn link(url: &str, color: bool, links: bool) -> String {
    let label = cyan(url, color);
    term::osc8_link(url, &label, links)
}

fn wrap(code: &str, s: &str, on: bool) -> String {
    if on {
        format!("{}{}{}", code, s, RESET)
    } else {
        s.to_string()
    }
}

fn gray(s: &str, on: bool) -> String {
    wrap("\x1b[90m", s, on)
}

fn cyan(s: &str, on: bool) -> String {
    wrap("\x1b[36m", s, on)
}

fn dim(s: &str, on: bool) -> String {
    wrap("\x1b[2m", s, on)
}

fn bold(s: &str, on: bool) -> String {
    wrap("\x1b[1m", s, on)
}

fn bright(s: &str, on: bool) -> String {
    wrap("\x1b[97m", s, on)
}

fn bullet(color: bool) -> String {
    if color {
        cyan("›", true)
    } else {
        ">".to_string()
    }
}

fn info_mark(color: bool) -> String {
    if color {
        gray("i", true)
    } else {
        "i".to_string()
    }
}
