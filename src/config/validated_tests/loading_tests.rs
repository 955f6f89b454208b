//! Tests for configuration loading and required fields.

use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, tempdir};

use super::*;

mod required_fields {
    use super::*;

    #[test]
    fn api_command_without_token_returns_error() {
        let result = ValidatedConfig::from_raw(&cli(&["stats"]), None);

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequired { field: "token", .. })
        ));
    }

    #[test]
    fn empty_token_counts_as_missing() {
        let toml = toml("[api]\ntoken = \"\"");
        let result = ValidatedConfig::from_raw(&cli(&["weekend", "--token", ""]), Some(&toml));

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequired { field: "token", .. })
        ));
    }

    #[test]
    fn token_from_cli() {
        let config = ValidatedConfig::from_raw(&cli(&["stats", "--token", "abc"]), None).unwrap();

        assert_eq!(config.token.as_deref(), Some("abc"));
    }

    #[test]
    fn token_from_toml() {
        let toml = toml("[api]\ntoken = \"from-file\"");
        let config = ValidatedConfig::from_raw(&cli(&["stats"]), Some(&toml)).unwrap();

        assert_eq!(config.token.as_deref(), Some("from-file"));
    }

    #[test]
    fn serve_and_init_need_no_token() {
        let serve = ValidatedConfig::from_raw(&cli(&["serve"]), None).unwrap();
        let init = ValidatedConfig::from_raw(&cli(&["init"]), None).unwrap();

        assert!(serve.token.is_none());
        assert!(init.token.is_none());
    }
}

mod file_loading {
    use super::*;

    #[test]
    fn load_reads_explicit_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[api]\ntoken = \"file-token\"\nbase_url = \"http://localhost:1/api\"")
            .unwrap();
        let path = file.path().to_str().unwrap();

        let config = ValidatedConfig::load(&cli(&["stats", "--config", path])).unwrap();

        assert_eq!(config.token.as_deref(), Some("file-token"));
        assert_eq!(config.base_url.as_str(), "http://localhost:1/api");
    }

    #[test]
    fn load_missing_file_returns_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let result = ValidatedConfig::load(&cli(&["stats", "--config", path.to_str().unwrap()]));

        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[api\ntoken = ").unwrap();
        let path = file.path().to_str().unwrap();

        let result = ValidatedConfig::load(&cli(&["stats", "--config", path]));

        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }
}

mod write_default {
    use super::*;
    use crate::config::write_default_config;

    #[test]
    fn writes_parseable_template() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("topgg.toml");

        write_default_config(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(TomlConfig::parse(&content).is_ok());
    }

    #[test]
    fn unwritable_path_returns_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("topgg.toml");

        let result = write_default_config(&path);

        assert!(matches!(result, Err(ConfigError::FileWrite { .. })));
    }
}

mod display {
    use super::*;

    #[test]
    fn display_hides_secrets() {
        let toml = toml("[webhook]\nauthorization = \"hook-secret\"");
        let config =
            ValidatedConfig::from_raw(&cli(&["stats", "--token", "api-secret"]), Some(&toml))
                .unwrap();

        let rendered = config.to_string();

        assert!(!rendered.contains("api-secret"));
        assert!(!rendered.contains("hook-secret"));
        assert!(rendered.contains("token: set"));
    }
}
