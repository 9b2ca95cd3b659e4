//! Configuration: the `autoimport.json` file and the compiled declaration table.

use anyhow::{Context, Result, bail};
use regex::Regex;
use serde::{Deserialize, Deserializer};
use std::path::Path;

use crate::synthesizer::InsertionOrder;

/// Placeholder replaced by the current file's base name.
pub const NAME_PLACEHOLDER: &str = "[name]";
/// Applied to the base name before substitution unless a declaration
/// overrides it.
pub const DEFAULT_NAME_REPLACE_PATTERN: &str = r"\.js$";

pub const DEFAULT_EXCLUDE: &[&str] = &["**/node_modules/**"];
pub const DEFAULT_EXTENSIONS: &[&str] = &["js", "mjs", "cjs"];

/// `declarations` accepts `null` or any non-array value as "not configured".
fn deserialize_declarations<'de, D>(
    deserializer: D,
) -> Result<Option<Vec<DeclarationConfig>>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::Array(items)) => items
            .into_iter()
            .map(|item| DeclarationConfig::deserialize(item).map_err(D::Error::custom))
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        _ => Ok(None),
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AutoImportConfig {
    #[serde(default, deserialize_with = "deserialize_declarations")]
    pub declarations: Option<Vec<DeclarationConfig>>,
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
    #[serde(default)]
    pub insertion_order: Option<InsertionOrder>,
    #[serde(default)]
    pub extensions: Option<Vec<String>>,
}

/// One entry of `declarations`, as written in the config file.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationConfig {
    pub path: String,
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default, alias = "imports")]
    pub members: Option<Vec<String>>,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub anonymous: Option<Vec<String>>,
    #[serde(default)]
    pub name_replace_pattern: Option<String>,
    #[serde(default)]
    pub name_replace_string: Option<String>,
}

impl AutoImportConfig {
    /// Compile the declarations. Invalid regular expressions are reported here.
    pub fn declaration_table(&self) -> Result<DeclarationTable> {
        match &self.declarations {
            Some(declarations) => DeclarationTable::from_configs(declarations),
            None => Ok(DeclarationTable::unconfigured()),
        }
    }

    pub fn exclude_patterns(&self) -> Vec<String> {
        match &self.exclude {
            Some(patterns) => patterns.clone(),
            None => DEFAULT_EXCLUDE.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn extensions(&self) -> Vec<String> {
        match &self.extensions {
            Some(extensions) => extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_string())
                .collect(),
            None => DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }

    pub fn insertion_order(&self) -> InsertionOrder {
        self.insertion_order.unwrap_or_default()
    }
}

pub fn parse_config(source: &str) -> Result<AutoImportConfig> {
    let config = serde_json::from_str(source).context("failed to parse autoimport config JSON")?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<AutoImportConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config(&source).with_context(|| format!("invalid config: {}", path.display()))
}

// =============================================================================
// Compiled declarations
// =============================================================================

/// Base-name rewrite applied before `[name]` substitution.
#[derive(Debug, Clone)]
pub struct NameReplace {
    pub pattern: Regex,
    pub replacement: String,
}

/// A declaration ready for matching.
#[derive(Debug, Clone)]
pub struct Declaration {
    pub path: String,
    pub default: Option<String>,
    pub members: Vec<String>,
    pub namespace: Option<String>,
    pub anonymous: Vec<String>,
    /// Present only when `path` contains the placeholder.
    pub name_replace: Option<NameReplace>,
}

impl Declaration {
    pub fn from_config(config: &DeclarationConfig) -> Result<Declaration> {
        let pattern = match &config.name_replace_pattern {
            Some(pattern) => Some(
                Regex::new(pattern)
                    .with_context(|| format!("invalid nameReplacePattern `{pattern}`"))?,
            ),
            None => None,
        };

        let name_replace = if config.path.contains(NAME_PLACEHOLDER) {
            let pattern = match pattern {
                Some(pattern) => pattern,
                None => Regex::new(DEFAULT_NAME_REPLACE_PATTERN)?,
            };
            Some(NameReplace {
                pattern,
                replacement: config.name_replace_string.clone().unwrap_or_default(),
            })
        } else {
            None
        };

        Ok(Declaration {
            path: config.path.clone(),
            default: config.default.clone(),
            members: config.members.clone().unwrap_or_default(),
            namespace: config.namespace.clone(),
            anonymous: config.anonymous.clone().unwrap_or_default(),
            name_replace,
        })
    }

    /// Whether `name` triggers any import from this declaration.
    pub fn mentions(&self, name: &str) -> bool {
        self.default.as_deref() == Some(name)
            || self.namespace.as_deref() == Some(name)
            || self.members.iter().any(|m| m == name)
            || self.anonymous.iter().any(|a| a == name)
    }
}

/// Ordered, read-only declaration table shared by every file of a run.
#[derive(Debug, Clone, Default)]
pub struct DeclarationTable {
    declarations: Vec<Declaration>,
    configured: bool,
}

impl DeclarationTable {
    /// The table for a missing or non-array `declarations` value; the
    /// transform does nothing with it.
    pub fn unconfigured() -> DeclarationTable {
        DeclarationTable::default()
    }

    pub fn new(declarations: Vec<Declaration>) -> DeclarationTable {
        DeclarationTable {
            declarations,
            configured: true,
        }
    }

    pub fn from_configs(configs: &[DeclarationConfig]) -> Result<DeclarationTable> {
        let mut declarations = Vec::with_capacity(configs.len());
        for (i, config) in configs.iter().enumerate() {
            if config.path.is_empty() {
                bail!("declaration #{i} has an empty `path`");
            }
            let declaration = Declaration::from_config(config)
                .with_context(|| format!("declaration #{i} (`{}`)", config.path))?;
            declarations.push(declaration);
        }
        Ok(DeclarationTable::new(declarations))
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Declaration> {
        self.declarations.iter()
    }

    /// Quick filter before any scope work: can `name` match at all?
    pub fn mentions(&self, name: &str) -> bool {
        self.declarations.iter().any(|d| d.mentions(name))
    }
}
