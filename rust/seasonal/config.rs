use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Environment variable holding the path of the X-13ARIMA-SEATS executable.
pub const X13_PATH_VAR: &str = "REGPERIOD_X13_PATH";
/// Environment variable holding the directory used for specification and output files.
pub const X13_SCRATCH_VAR: &str = "REGPERIOD_X13_SCRATCH";

fn default_min_years() -> usize {
    3
}

/// Location of the X-13ARIMA-SEATS program and of its scratch files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct X13Config {
    /// Path of the `x13as` executable.
    pub executable: PathBuf,
    /// Directory receiving the generated `.spc` file and the program's output.
    pub scratch_dir: PathBuf,
    /// Minimum number of years of observations accepted for adjustment.
    #[serde(default = "default_min_years")]
    pub min_years: usize,
}

impl X13Config {
    pub fn new(executable: impl Into<PathBuf>, scratch_dir: impl Into<PathBuf>) -> Self {
        X13Config {
            executable: executable.into(),
            scratch_dir: scratch_dir.into(),
            min_years: default_min_years(),
        }
    }

    /// Read the configuration from [`X13_PATH_VAR`] and [`X13_SCRATCH_VAR`], falling back to
    /// `x13as` on the `PATH` and the system temporary directory.
    pub fn from_env() -> Self {
        let executable = env::var_os(X13_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("x13as"));
        let scratch_dir = env::var_os(X13_SCRATCH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(env::temp_dir);
        X13Config::new(executable, scratch_dir)
    }

    pub fn with_min_years(mut self, min_years: usize) -> Self {
        self.min_years = min_years;
        self
    }
}

impl Default for X13Config {
    fn default() -> Self {
        X13Config::new("x13as", env::temp_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::JSON;

    #[test]
    fn test_json_defaults_min_years() {
        let c = X13Config::from_json(r#"{"executable":"/opt/x13as","scratch_dir":"/tmp/x13"}"#)
            .unwrap();
        assert_eq!(PathBuf::from("/opt/x13as"), c.executable);
        assert_eq!(3, c.min_years);
        let c = c.with_min_years(5);
        assert_eq!(c, X13Config::from_json(&c.to_json().unwrap()).unwrap());
    }
}
