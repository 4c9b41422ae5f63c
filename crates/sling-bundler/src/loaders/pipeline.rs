use std::path::Path;

use regex::Regex;

use super::{LoaderContext, LoaderRegistry};
use crate::{Error, Result};

/// Associates files whose path matches `test` with a chain of loaders.
///
/// Loaders are declared left-to-right and applied right-to-left.
#[derive(Debug, Clone)]
pub struct ModuleRule {
    test: Regex,
    loaders: Vec<String>,
}

impl ModuleRule {
    /// Compile a rule.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if `test` is not a valid regular
    /// expression or no loader is named.
    pub fn new<I, S>(test: &str, loaders: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let test = Regex::new(test)
            .map_err(|e| Error::InvalidConfig(format!("invalid rule test '{test}': {e}")))?;
        let loaders: Vec<String> = loaders.into_iter().map(Into::into).collect();
        if loaders.is_empty() {
            return Err(Error::InvalidConfig(format!(
                "rule '{}' must name at least one loader",
                test.as_str()
            )));
        }
        Ok(Self { test, loaders })
    }

    pub fn test(&self) -> &Regex {
        &self.test
    }

    /// Loader names in declared order
    pub fn loaders(&self) -> &[String] {
        &self.loaders
    }

    pub fn matches(&self, path: &str) -> bool {
        self.test.is_match(path)
    }
}

/// Applies the first matching rule's loaders to a file's raw content.
#[derive(Debug, Clone, Copy)]
pub struct LoaderPipeline<'a> {
    rules: &'a [ModuleRule],
    registry: &'a LoaderRegistry,
    root: &'a Path,
}

impl<'a> LoaderPipeline<'a> {
    pub fn new(rules: &'a [ModuleRule], registry: &'a LoaderRegistry, root: &'a Path) -> Self {
        Self {
            rules,
            registry,
            root,
        }
    }

    /// First rule whose test matches `path`
    pub fn select(&self, path: &Path) -> Option<&'a ModuleRule> {
        let subject = path.to_string_lossy().replace('\\', "/");
        self.rules.iter().find(|rule| rule.matches(&subject))
    }

    /// Run `raw` through the loaders of the rule matching `path`.
    ///
    /// Content passes through unchanged when no rule matches.
    pub fn load(&self, path: &Path, raw: String) -> Result<String> {
        let Some(rule) = self.select(path) else {
            return Ok(raw);
        };

        let ctx = LoaderContext {
            resource_path: path,
            root: self.root,
        };

        let mut content = raw;
        for name in rule.loaders.iter().rev() {
            let loader = self.registry.get(name).ok_or_else(|| Error::Transformer {
                path: path.to_path_buf(),
                transformer: name.clone(),
                reason: format!(
                    "no loader named '{name}' is registered (available: {})",
                    self.registry.names().join(", ")
                ),
            })?;

            tracing::debug!(path = %path.display(), loader = %name, "applying loader");

            content = loader.load(content, &ctx).map_err(|e| Error::Transformer {
                path: path.to_path_buf(),
                transformer: name.clone(),
                reason: format!("{e:#}"),
            })?;
        }

        Ok(content)
    }
}
