//! Console sink

use crate::core::{LogLevel, RenderedRecord, Result, Sink};

#[cfg(feature = "console")]
use colored::Colorize;

/// Writes rendered lines to the standard streams: Error and Critical go to
/// stderr, everything else to stdout.
pub struct ConsoleSink {
    use_colors: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            use_colors: crate::term::colors_enabled(),
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn paint(&self, record: &RenderedRecord) -> String {
        #[cfg(feature = "console")]
        if self.use_colors {
            return record
                .line
                .color(record.level.color_code())
                .to_string();
        }
        let _ = self.use_colors;
        record.line.clone()
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn write(&mut self, record: &RenderedRecord) -> Result<()> {
        let output = self.paint(record);
        match record.level {
            LogLevel::Error | LogLevel::Critical => eprintln!("{}", output),
            _ => println!("{}", output),
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        use std::io::Write;
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
