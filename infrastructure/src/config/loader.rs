//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use std::path::PathBuf;

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Project root: `./nyaybuddy.toml` or `./.nyaybuddy.toml`
    /// 3. XDG config: `$XDG_CONFIG_HOME/nyaybuddy/config.toml`
    /// 4. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        for filename in &["nyaybuddy.toml", ".nyaybuddy.toml"] {
            let path = PathBuf::from(filename);
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
                break;
            }
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("nyaybuddy").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        for filename in &["nyaybuddy.toml", ".nyaybuddy.toml"] {
            let path = PathBuf::from(filename);
            if path.exists() {
                return Some(path);
            }
        }
        None
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources() {
        println!("Configuration sources (in priority order):");

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./nyaybuddy.toml or ./.nyaybuddy.toml");
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
    use nyay_domain::Language;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.ui.language, Language::En);
        assert!(config.logging.conversation_log.is_none());
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("nyaybuddy"));
    }

    #[test]
    fn test_explicit_path_overrides() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "custom.toml",
                r#"
                [gateway]
                model = "google/gemini-2.5-pro"

                [ui]
                language = "hi"
                "#,
            )?;
            let config = ConfigLoader::load(Some(&PathBuf::from("custom.toml"))).unwrap();
            assert_eq!(config.gateway.model, "google/gemini-2.5-pro");
            assert_eq!(config.ui.language, Language::Hi);
            // Untouched keys fall through to defaults
            assert_eq!(config.gateway.api_key_env, "LOVABLE_API_KEY");
            Ok(())
        });
    }

    #[test]
    fn test_project_file_is_discovered() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "nyaybuddy.toml",
                r#"
                [ui]
                theme = "dark"
                "#,
            )?;
            let config = ConfigLoader::load(None).unwrap();
            assert_eq!(config.ui.theme, nyay_domain::Theme::Dark);
            Ok(())
        });
    }
}
