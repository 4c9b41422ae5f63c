//! Bundle rendering.
//!
//! The bundle is a single self-executing script: a small runtime shim with a
//! module cache, followed by an object literal mapping every module id to a
//! function wrapping that module's transformed source. The shim bootstraps
//! by requiring the entry id.

use indexmap::IndexMap;
use minijinja::{AutoEscape, Environment, context};
use serde::Serialize;

use crate::Result;
use crate::graph::{Module, ModuleId};

const RUNTIME_TEMPLATE_NAME: &str = "runtime.js.jinja";
const RUNTIME_TEMPLATE: &str = include_str!("templates/runtime.js.jinja");

#[derive(Serialize)]
struct ModuleEntry<'a> {
    /// JSON-quoted id
    id: String,
    source: &'a str,
}

/// Renders a module graph into bundle text
#[derive(Debug)]
pub struct BundleEmitter {
    env: Environment<'static>,
    require_name: String,
}

impl BundleEmitter {
    /// Create an emitter whose runtime function is named `require_name`.
    ///
    /// The name must match the one the source transformer rewrote
    /// dependency calls to.
    pub fn new(require_name: impl Into<String>) -> Result<Self> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);
        env.add_template(RUNTIME_TEMPLATE_NAME, RUNTIME_TEMPLATE)?;

        Ok(Self {
            env,
            require_name: require_name.into(),
        })
    }

    pub fn require_name(&self) -> &str {
        &self.require_name
    }

    /// Render the bundle for `modules`, bootstrapping `entry_id`.
    ///
    /// Modules are embedded in map order.
    pub fn emit(&self, entry_id: &ModuleId, modules: &IndexMap<ModuleId, Module>) -> Result<String> {
        let entries = modules
            .values()
            .map(|module| {
                Ok(ModuleEntry {
                    id: quote(module.id().as_str())?,
                    source: module.source(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let template = self.env.get_template(RUNTIME_TEMPLATE_NAME)?;
        let bundle = template.render(context! {
            require_name => &self.require_name,
            entry_id => quote(entry_id.as_str())?,
            modules => entries,
        })?;

        tracing::debug!(modules = modules.len(), bytes = bundle.len(), "bundle rendered");
        Ok(bundle)
    }
}

fn quote(id: &str) -> Result<String> {
    serde_json::to_string(id).map_err(|e| crate::Error::InvalidConfig(format!("cannot quote id '{id}': {e}")))
}
