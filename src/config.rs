//! Run configuration shared by the CLI and reporters.

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One status line per test plus a summary per suite
    #[default]
    Text,
    /// One JSON document covering every suite that ran
    Json,
}

/// Options for a `myunit run` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Show per-test timings and the suite wall time
    pub verbose: bool,
    /// Output format
    pub output: OutputFormat,
    /// Emit ANSI colors in text output
    pub color: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            output: OutputFormat::Text,
            color: true,
        }
    }
}

impl RunConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}
