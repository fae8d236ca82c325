//! Runtime settings: command-line values, then environment variables, then defaults.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

/// Directory receiving generated PDFs.
pub const OUTPUT_DIR_VAR: &str = "FSA_GUIDE_OUTPUT_DIR";
/// JSON file holding the persisted application state.
pub const STATE_FILE_VAR: &str = "FSA_GUIDE_STATE_FILE";

const DEFAULT_OUTPUT_DIR: &str = ".";
const DEFAULT_STATE_FILE: &str = "./.fsa-guide-state.json";

/// Resolved locations used by the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Where documents are written.
    pub output_dir: PathBuf,
    /// Where application state is persisted.
    pub state_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            state_file: PathBuf::from(DEFAULT_STATE_FILE),
        }
    }
}

impl Settings {
    /// Resolves settings against the process environment.
    pub fn resolve(output_dir: Option<PathBuf>, state_file: Option<PathBuf>) -> Self {
        Self::resolve_with(output_dir, state_file, |var| env::var_os(var))
    }

    /// Resolves settings with a custom variable lookup.
    pub fn resolve_with<F>(
        output_dir: Option<PathBuf>,
        state_file: Option<PathBuf>,
        lookup: F,
    ) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let defaults = Self::default();
        Self {
            output_dir: output_dir
                .or_else(|| env_path(&lookup, OUTPUT_DIR_VAR))
                .unwrap_or(defaults.output_dir),
            state_file: state_file
                .or_else(|| env_path(&lookup, STATE_FILE_VAR))
                .unwrap_or(defaults.state_file),
        }
    }
}

fn env_path<F>(lookup: &F, var: &str) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<OsString>,
{
    lookup(var).and_then(|value| {
        let path = PathBuf::from(value);
        if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<OsString> {
        move |name| {
            pairs
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| OsString::from(value))
        }
    }

    #[test]
    fn defaults_apply_without_flags_or_variables() {
        assert_eq!(
            Settings::resolve_with(None, None, vars(&[])),
            Settings::default()
        );
    }

    #[test]
    fn environment_overrides_defaults() {
        let settings = Settings::resolve_with(
            None,
            None,
            vars(&[(OUTPUT_DIR_VAR, "/tmp/pdfs"), (STATE_FILE_VAR, "")]),
        );
        assert_eq!(settings.output_dir, PathBuf::from("/tmp/pdfs"));
        assert_eq!(settings.state_file, PathBuf::from(DEFAULT_STATE_FILE));
    }

    #[test]
    fn flags_override_environment() {
        let settings = Settings::resolve_with(
            Some(PathBuf::from("out")),
            None,
            vars(&[(OUTPUT_DIR_VAR, "/tmp/pdfs")]),
        );
        assert_eq!(settings.output_dir, PathBuf::from("out"));
    }
}
