use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::{layout::DEFAULT_LAYOUT, Error, Result};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config
{
    /// Where Markdown posts are stored
    pub source: PathBuf,

    /// Where the site generator writes its output
    pub dest: PathBuf,

    /// The layout given to posts that don't name one.
    pub default_layout: String,

    /// Fail on posts without a `pageinfo` block instead of treating them as
    /// having no attributes.
    pub require_page_info: bool,

    /// Where the asset build description is stored
    pub pipeline: PathBuf,
}

impl Default for Config
{
    fn default() -> Self
    {
        Self {
            source:            PathBuf::from(Self::DEFAULT_SRC_DIR),
            dest:              PathBuf::from(Self::DEFAULT_DEST_DIR),
            default_layout:    String::from(DEFAULT_LAYOUT),
            require_page_info: false,
            pipeline:          PathBuf::from(Self::DEFAULT_PIPELINE_FILE),
        }
    }
}

impl Config
{
    pub const DEFAULT_CONFIG_FILE: &str = "site.toml";
    const DEFAULT_DEST_DIR: &str = "public";
    const DEFAULT_PIPELINE_FILE: &str = "assets.toml";
    const DEFAULT_SRC_DIR: &str = "_posts";

    pub fn from_toml(path: &PathBuf) -> Result<Self>
    {
        let contents = fs::read_to_string(path).map_err(|err| {
            Error::Io {
                err,
                path: path.clone(),
            }
        })?;

        let config = Self::from_toml_str(&contents)
            .map_err(|e| Error::ConfigParse(format!("Couldn't parse {}: {e}", path.display())))?;
        log::debug!("Loaded config from \"{}\"", path.display());
        Ok(config)
    }

    fn from_toml_str(contents: &str) -> std::result::Result<Self, toml::de::Error>
    {
        let mut parsed: Self = toml::from_str(contents)?;

        // An empty default would leave posts without a usable layout.
        if parsed.default_layout.is_empty() {
            parsed.default_layout = String::from(DEFAULT_LAYOUT);
        }

        Ok(parsed)
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_missing_keys_fall_back_to_defaults()
    {
        let config = Config::from_toml_str(r#"source = "posts""#).unwrap();
        assert_eq!(config.source, PathBuf::from("posts"));
        assert_eq!(config.default_layout, "single");
        assert_eq!(config.dest, PathBuf::from("public"));
        assert!(!config.require_page_info);
    }

    #[test]
    fn test_configured_default_layout()
    {
        let config = Config::from_toml_str(r#"default_layout = "article""#).unwrap();
        assert_eq!(config.default_layout, "article");

        let config = Config::from_toml_str(r#"default_layout = """#).unwrap();
        assert_eq!(config.default_layout, "single");
    }

    #[test]
    fn test_bad_config_is_a_parse_error()
    {
        assert!(Config::from_toml_str("source = [").is_err());

        let path = PathBuf::from("/definitely/not/here/site.toml");
        assert!(matches!(Config::from_toml(&path), Err(Error::Io { .. })));
    }
}
