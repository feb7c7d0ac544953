//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_CONFIG_FILES: [&str; 2] = ["noire.toml", ".noire.toml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `NOIRE_` environment variables (`NOIRE_GAME__QUESTION_LIMIT=5`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./noire.toml` or `./.noire.toml`
    /// 4. Global config: `$XDG_CONFIG_HOME/noire/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Self::file_figment(
            Self::global_config_path().as_deref(),
            Self::project_config_path().as_deref(),
            config_path,
        );
        figment = figment.merge(Env::prefixed("NOIRE_").split("__"));

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Defaults plus whichever of the given files exist, later files winning.
    fn file_figment(
        global: Option<&Path>,
        project: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        for path in [global, project].into_iter().flatten() {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        // An explicit path is merged even if missing so the error surfaces
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file_exact(path));
        }

        figment
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("noire").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&Path>) {
        println!("Configuration sources (in priority order):");
        println!("  [     ] Environment: NOIRE_* (use __ for nesting)");

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:5}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./noire.toml or ./.noire.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noire_domain::Difficulty;
    use std::fs;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.game.question_limit, 10);
        assert!(!config.storage.ephemeral);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("noire"));
    }

    #[test]
    fn test_later_files_override_earlier() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let project = dir.path().join("noire.toml");
        fs::write(
            &global,
            "[game]\ndefault_difficulty = \"hard\"\nquestion_limit = 4\n",
        )
        .unwrap();
        fs::write(&project, "[game]\nquestion_limit = 6\n").unwrap();

        let config: FileConfig =
            ConfigLoader::file_figment(Some(&global), Some(&project), None)
                .extract()
                .unwrap();
        assert_eq!(config.game.question_limit, 6);
        assert_eq!(config.game.default_difficulty, Difficulty::Hard);
        assert_eq!(config.provider.model, "grok-3-mini");
    }

    #[test]
    fn test_missing_optional_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let config: FileConfig = ConfigLoader::file_figment(Some(&missing), None, None)
            .extract()
            .unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("explicit.toml");
        let result: Result<FileConfig, _> =
            ConfigLoader::file_figment(None, None, Some(&missing)).extract();
        assert!(result.is_err());
    }
}
