use focusflow_core::timer::{parse_duration_input, DEFAULT_BREAK_SECONDS, DEFAULT_WORK_SECONDS};

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerConfig {
    /// Base URL of the persistence service.
    pub api_url: String,
    /// Work phase length in seconds.
    pub work_seconds: u32,
    /// Break phase length in seconds.
    pub break_seconds: u32,
}

impl TimerConfig {
    /// | Variable        | Default                 |
    /// |-----------------|-------------------------|
    /// | `API_URL`       | `http://localhost:5000` |
    /// | `WORK_SECONDS`  | `1500`                  |
    /// | `BREAK_SECONDS` | `300`                   |
    ///
    /// Durations follow the timer's input rule: anything non-numeric is
    /// read as `0`, which the timer then clamps to one second.
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = lookup("API_URL").unwrap_or_else(|| "http://localhost:5000".into());
        let work_seconds = lookup("WORK_SECONDS")
            .map(|v| parse_duration_input(&v))
            .unwrap_or(DEFAULT_WORK_SECONDS);
        let break_seconds = lookup("BREAK_SECONDS")
            .map(|v| parse_duration_input(&v))
            .unwrap_or(DEFAULT_BREAK_SECONDS);

        Self {
            api_url,
            work_seconds,
            break_seconds,
        }
    }
}
