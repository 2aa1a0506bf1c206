use std::path::PathBuf;

/// Environment variable overriding the marquee root directory.
pub const ROOT_ENV: &str = "MARQUEE_ROOT";

/// Returns the root marquee directory path.
///
/// Resolution order:
/// 1. `MARQUEE_ROOT` environment variable (if set)
/// 2. The platform config directory for marquee
/// 3. `.marquee` in the current working directory
pub fn marquee_root() -> PathBuf {
    if let Some(root) = std::env::var_os(ROOT_ENV) {
        return PathBuf::from(root);
    }

    directories::ProjectDirs::from("com", "marquee", "marquee")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".marquee"))
}

/// Returns the path to the configuration file.
pub fn config_path() -> PathBuf {
    marquee_root().join("config.yaml")
}

/// Returns the directory holding persisted key-value data (favorites).
pub fn data_dir() -> PathBuf {
    marquee_root().join("data")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_marquee_root_with_env_var() {
        // SAFETY: We use #[serial] to ensure single-threaded access
        unsafe { std::env::set_var(ROOT_ENV, "/custom/path/.marquee") };
        assert_eq!(marquee_root(), PathBuf::from("/custom/path/.marquee"));
        unsafe { std::env::remove_var(ROOT_ENV) };
    }

    #[test]
    #[serial]
    fn test_config_path_with_env_var() {
        // SAFETY: We use #[serial] to ensure single-threaded access
        unsafe { std::env::set_var(ROOT_ENV, "/custom/path/.marquee") };
        assert_eq!(
            config_path(),
            PathBuf::from("/custom/path/.marquee/config.yaml")
        );
        assert_eq!(data_dir(), PathBuf::from("/custom/path/.marquee/data"));
        unsafe { std::env::remove_var(ROOT_ENV) };
    }

    #[test]
    #[serial]
    fn test_marquee_root_default_is_not_empty() {
        // SAFETY: We use #[serial] to ensure single-threaded access
        unsafe { std::env::remove_var(ROOT_ENV) };
        assert!(!marquee_root().as_os_str().is_empty());
    }
}
