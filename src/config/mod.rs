use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

/// Environment override for the whisper model path.
pub const MODEL_ENV_VAR: &str = "PRONKO_WHISPER_MODEL";

const DEFAULT_MODEL_PATH: &str = "./models/ggml-base.bin";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub whisper_model: PathBuf,
}

impl AppConfig {
    /// Resolve the model path: CLI flag, then environment, then the default.
    /// Existence is checked when the model is loaded, not here.
    pub fn resolve(flag: Option<PathBuf>) -> Self {
        Self {
            whisper_model: resolve_model_path(flag, env::var_os(MODEL_ENV_VAR)),
        }
    }
}

fn resolve_model_path(flag: Option<PathBuf>, env_value: Option<OsString>) -> PathBuf {
    flag.or_else(|| env_value.map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH))
}

#[cfg(test)]
mod tests {
    use super::{resolve_model_path, DEFAULT_MODEL_PATH};
    use std::ffi::OsString;
    use std::path::PathBuf;

    #[test]
    fn flag_wins_over_environment() {
        let resolved = resolve_model_path(
            Some(PathBuf::from("/flag/model.bin")),
            Some(OsString::from("/env/model.bin")),
        );
        assert_eq!(resolved, PathBuf::from("/flag/model.bin"));
    }

    #[test]
    fn environment_wins_over_default() {
        let resolved = resolve_model_path(None, Some(OsString::from("/env/model.bin")));
        assert_eq!(resolved, PathBuf::from("/env/model.bin"));
    }

    #[test]
    fn falls_back_to_default() {
        let resolved = resolve_model_path(None, None);
        assert_eq!(resolved, PathBuf::from(DEFAULT_MODEL_PATH));
    }
}
