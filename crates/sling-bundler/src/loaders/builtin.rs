//! Loaders shipped with the bundler.
//!
//! All three wrap non-JavaScript content in a CommonJS module whose
//! `module.exports` is the content.

use anyhow::Context as _;

use super::{Loader, LoaderContext};

/// Exports the file content as a string.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawLoader;

impl Loader for RawLoader {
    fn name(&self) -> &str {
        "raw-loader"
    }

    fn load(&self, source: String, _ctx: &LoaderContext<'_>) -> anyhow::Result<String> {
        Ok(format!("module.exports = {};\n", js_string(&source)?))
    }
}

/// Parses the content as JSON and exports the value.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLoader;

impl Loader for JsonLoader {
    fn name(&self) -> &str {
        "json-loader"
    }

    fn load(&self, source: String, ctx: &LoaderContext<'_>) -> anyhow::Result<String> {
        let value: serde_json::Value = serde_json::from_str(&source)
            .with_context(|| format!("{} is not valid JSON", ctx.resource_path.display()))?;
        Ok(format!("module.exports = {};\n", serde_json::to_string(&value)?))
    }
}

/// Exports CSS text and injects it into `document.head` when a DOM exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleLoader;

impl Loader for StyleLoader {
    fn name(&self) -> &str {
        "style-loader"
    }

    fn load(&self, source: String, _ctx: &LoaderContext<'_>) -> anyhow::Result<String> {
        Ok(format!(
            r#"var css = {};
if (typeof document !== "undefined") {{
  var style = document.createElement("style");
  style.textContent = css;
  document.head.appendChild(style);
}}
module.exports = css;
"#,
            js_string(&source)?
        ))
    }
}

/// JSON string literals are valid JavaScript string literals.
fn js_string(text: &str) -> anyhow::Result<String> {
    Ok(serde_json::to_string(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn ctx() -> LoaderContext<'static> {
        LoaderContext {
            resource_path: Path::new("/p/src/file"),
            root: Path::new("/p"),
        }
    }

    #[test]
    fn raw_loader_quotes_content() {
        let out = RawLoader.load("say \"hi\"\n".to_string(), &ctx()).unwrap();
        assert_eq!(out, "module.exports = \"say \\\"hi\\\"\\n\";\n");
    }

    #[test]
    fn json_loader_exports_value() {
        let out = JsonLoader
            .load("{ \"name\": \"sling\", \"tags\": [1, 2] }".to_string(), &ctx())
            .unwrap();
        assert_eq!(out, "module.exports = {\"name\":\"sling\",\"tags\":[1,2]};\n");
    }

    #[test]
    fn json_loader_rejects_invalid_json() {
        let err = JsonLoader.load("{ nope".to_string(), &ctx()).unwrap_err();
        assert!(err.to_string().contains("/p/src/file is not valid JSON"));
    }

    #[test]
    fn style_loader_injects_when_dom_present() {
        let out = StyleLoader.load("body { color: red; }".to_string(), &ctx()).unwrap();
        assert!(out.starts_with("var css = \"body { color: red; }\";"));
        assert!(out.contains("document.head.appendChild(style)"));
        assert!(out.ends_with("module.exports = css;\n"));
    }
}
