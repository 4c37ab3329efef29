//! Shared utilities for argument processing.

/// What: Determine the log level based on command-line arguments.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - Verbose flag overrides the `--log-level` argument.
pub fn determine_log_level(args: &crate::args::Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else {
        args.log_level.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Args;

    #[test]
    /// What: `--verbose` wins over `--log-level`.
    fn verbose_overrides_level() {
        let mut args = Args {
            log_level: "warn".into(),
            ..Args::default()
        };
        assert_eq!(determine_log_level(&args), "warn");
        args.verbose = true;
        assert_eq!(determine_log_level(&args), "debug");
    }
}
