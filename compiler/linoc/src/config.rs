//! Run configuration parsed from `lino run` flags.

use lino_eval::EngineOptions;

/// Flags of `lino run`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunConfig {
    /// Pause for Enter before every step.
    pub debug: bool,
    /// Emit a tracing event per executed statement.
    pub trace: bool,
    /// Print the visible variables after the run.
    pub dump: bool,
    /// Print per-statement timings after the run.
    pub time: bool,
    /// Log phase progress.
    pub verbose: bool,
    /// Maximum call depth; unlimited when absent.
    pub max_call_depth: Option<usize>,
}

impl RunConfig {
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            max_call_depth: self.max_call_depth,
            timing: self.time,
        }
    }
}

/// Parse the arguments after `run`: one file path plus flags, in any order.
pub fn parse_run_args(args: &[String]) -> Result<(String, RunConfig), String> {
    let mut config = RunConfig::default();
    let mut path = None;

    for arg in args {
        match arg.as_str() {
            "-v" | "--verbose" => config.verbose = true,
            "-d" | "--debug" => config.debug = true,
            "-t" | "--trace" => config.trace = true,
            "--time" => config.time = true,
            "-p" | "--dump" => config.dump = true,
            other => {
                if let Some(depth) = other.strip_prefix("--max-depth=") {
                    let depth = depth
                        .parse()
                        .map_err(|_| format!("invalid call depth '{depth}'"))?;
                    config.max_call_depth = Some(depth);
                } else if other.starts_with('-') {
                    return Err(format!("unknown option '{other}'"));
                } else if path.is_none() {
                    path = Some(other.to_string());
                } else {
                    return Err(format!("unexpected argument '{other}'"));
                }
            }
        }
    }

    path.map(|path| (path, config))
        .ok_or_else(|| "missing file path".to_string())
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests use expect to panic on unexpected state"
)]
mod tests;
