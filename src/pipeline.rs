//! The description of how the site's stylesheets are built. This crate only
//! writes the description; the asset build tool reads and runs it.

use std::{collections::BTreeMap, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct AssetPipeline
{
    /// Input kinds, keyed by file extension.
    #[serde(rename = "in")]
    pub inputs: BTreeMap<String, InputSpec>,

    /// Entry points and the directory each one is written to.
    pub builds: BTreeMap<PathBuf, PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct InputSpec
{
    /// The extension of the produced files.
    pub out: String,

    /// Applied in order.
    pub transformers: Vec<Transformer>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Transformer
{
    Name(String),
    WithOptions
    {
        name: String, options: toml::Table
    },
}

impl Transformer
{
    pub fn name(&self) -> &str
    {
        match self {
            Transformer::Name(name) | Transformer::WithOptions { name, .. } => name,
        }
    }
}

impl Default for AssetPipeline
{
    fn default() -> Self
    {
        let mut sass_options = toml::Table::new();
        sass_options.insert("imagePath".to_string(), toml::Value::String("/assets".to_string()));

        let scss = InputSpec {
            out:          "css".to_string(),
            transformers: vec![
                Transformer::Name("directives".to_string()),
                Transformer::WithOptions {
                    name:    "sass".to_string(),
                    options: sass_options,
                },
            ],
        };

        Self {
            inputs: BTreeMap::from([("scss".to_string(), scss)]),
            builds: BTreeMap::from([(
                PathBuf::from("assets/css/main.scss"),
                PathBuf::from("public/css/"),
            )]),
        }
    }
}

impl AssetPipeline
{
    pub fn to_toml(&self) -> Result<String>
    {
        toml::to_string_pretty(self).map_err(|e| Error::PipelineSerialize(e.to_string()))
    }

    pub fn from_toml(contents: &str) -> Result<Self>
    {
        toml::from_str(contents).map_err(|e| Error::ConfigParse(e.to_string()))
    }
}
