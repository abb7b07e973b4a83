//! Agent schema.
//!
//! Agents are partial mount plans: module overrides, session overrides and a
//! system instruction applied on top of a parent session.

use serde::Serialize;

use super::module::{ModuleConfig, SystemConfig, parse_module_list, parse_system};
use super::validate::{FieldProblem, Problems, Validator};
use crate::document::DocumentKind;
use crate::value::Tree;

/// `meta` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentMetadata {
    name: String,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    extends: Option<String>,
}

impl AgentMetadata {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn extends(&self) -> Option<&str> {
        self.extends.as_deref()
    }
}

/// A fully merged and validated agent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Agent {
    meta: AgentMetadata,
    providers: Vec<ModuleConfig>,
    tools: Vec<ModuleConfig>,
    hooks: Vec<ModuleConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    session: Option<Tree>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<SystemConfig>,
}

impl Agent {
    pub fn meta(&self) -> &AgentMetadata {
        &self.meta
    }

    pub fn providers(&self) -> &[ModuleConfig] {
        &self.providers
    }

    pub fn tools(&self) -> &[ModuleConfig] {
        &self.tools
    }

    pub fn hooks(&self) -> &[ModuleConfig] {
        &self.hooks
    }

    pub fn session(&self) -> Option<&Tree> {
        self.session.as_ref()
    }

    pub fn system(&self) -> Option<&SystemConfig> {
        self.system.as_ref()
    }

    /// Partial mount plan for this agent.
    ///
    /// Carries `description`, non-empty module lists, session overrides and the
    /// system instruction. The agent's name is left to the caller, which keys
    /// fragments by name.
    pub fn to_mount_plan_fragment(&self) -> serde_json::Value {
        let mut fragment = serde_json::Map::new();
        fragment.insert(
            "description".to_string(),
            serde_json::Value::String(self.meta.description.clone()),
        );

        for (key, modules) in [
            ("providers", &self.providers),
            ("tools", &self.tools),
            ("hooks", &self.hooks),
        ] {
            if !modules.is_empty() {
                fragment.insert(key.to_string(), serde_json::json!(modules));
            }
        }

        if let Some(session) = self.session.as_ref().filter(|s| !s.is_empty()) {
            fragment.insert("session".to_string(), serde_json::json!(session));
        }
        if let Some(system) = &self.system {
            fragment.insert(
                "system".to_string(),
                serde_json::json!({ "instruction": system.instruction() }),
            );
        }

        serde_json::Value::Object(fragment)
    }
}

/// Validates merged agent trees.
#[derive(Debug, Clone, Copy, Default)]
pub struct AgentValidator;

impl Validator for AgentValidator {
    type Output = Agent;

    fn kind(&self) -> DocumentKind {
        DocumentKind::Agent
    }

    fn validate(&self, tree: &Tree) -> Result<Agent, Vec<FieldProblem>> {
        let mut problems = Problems::default();

        let meta = parse_metadata(&mut problems, tree);
        let providers = parse_module_list(&mut problems, tree, "providers");
        let tools = parse_module_list(&mut problems, tree, "tools");
        let hooks = parse_module_list(&mut problems, tree, "hooks");
        let session = problems.optional_map(tree, "", "session").cloned();
        let system = parse_system(&mut problems, tree);

        match meta {
            Some(meta) if problems.is_empty() => Ok(Agent {
                meta,
                providers,
                tools,
                hooks,
                session,
                system,
            }),
            _ => Err(problems.into_vec()),
        }
    }
}

fn parse_metadata(problems: &mut Problems, tree: &Tree) -> Option<AgentMetadata> {
    let section = DocumentKind::Agent.metadata_section();
    let meta = problems.required_map(tree, "", section)?;

    let name = problems.required_str(meta, section, "name");
    let description = problems.required_str(meta, section, "description");
    let extends = problems.optional_str(meta, section, "extends");

    Some(AgentMetadata {
        name: name?,
        description: description?,
        extends,
    })
}
