//! CLI output gating

/// Verbosity of CLI output, resolved from the global flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Errors only
    Quiet,
    /// Default output
    Normal,
    /// Extra detail
    Verbose,
}

impl LogLevel {
    /// Resolve the global `--verbose`/`--quiet` flags; `--quiet` wins.
    #[must_use]
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Whether a message gated at `required` should be printed at this level
    #[must_use]
    pub fn allows(self, required: Self) -> bool {
        match (self, required) {
            (Self::Quiet, _) | (_, Self::Quiet) => false,
            (Self::Normal, Self::Verbose) => false,
            _ => true,
        }
    }

    /// Print `msg` when this level allows it
    pub fn log(self, required: Self, msg: &str) {
        if self.allows(required) {
            println!("{msg}");
        }
    }
}
