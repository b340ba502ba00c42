use clap::ValueEnum;

/// Crate prefix shared by every tracing target of the gateway.
const GATEWAY_TARGET: &str = "letterboxd";

/// Verbosity of the gateway's own crates. Dependencies stay silent below `trace`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, ValueEnum, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    /// Also logs every upstream call and failed field
    Debug,
    /// Everything, dependencies included
    Trace,
}

impl LogLevel {
    /// The `EnvFilter` directives for this level.
    pub(crate) fn filter(self) -> String {
        match self {
            LogLevel::Off | LogLevel::Trace => self.to_string(),
            level => format!("{GATEWAY_TARGET}={level},off"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub(super) enum LogStyle {
    /// Plain lines, colored on a terminal
    Text,
    /// One JSON object per event
    Json,
}
