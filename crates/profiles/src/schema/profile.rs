//! Profile schema.

use serde::Serialize;

use super::module::{
    ModuleConfig, SystemConfig, parse_module_list, parse_required_module, parse_system,
};
use super::validate::{FieldProblem, Problems, Validator};
use crate::document::DocumentKind;
use crate::value::{Tree, join_path};

/// `profile` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileMetadata {
    name: String,
    version: String,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    extends: Option<String>,
}

impl ProfileMetadata {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Model in `provider/model` form.
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// `model` split into provider and model name.
    pub fn model_pair(&self) -> Option<(&str, &str)> {
        self.model.as_deref().and_then(split_model_pair)
    }

    pub fn extends(&self) -> Option<&str> {
        self.extends.as_deref()
    }
}

/// `session` section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionConfig {
    orchestrator: ModuleConfig,
    context: ModuleConfig,
}

impl SessionConfig {
    pub fn orchestrator(&self) -> &ModuleConfig {
        &self.orchestrator
    }

    pub fn context(&self) -> &ModuleConfig {
        &self.context
    }
}

/// `agents` section: agent discovery and filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AgentsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    dirs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    include: Option<Vec<String>>,
}

impl AgentsConfig {
    pub fn dirs(&self) -> Option<&[String]> {
        self.dirs.as_deref()
    }

    pub fn include(&self) -> Option<&[String]> {
        self.include.as_deref()
    }
}

/// A fully merged and validated profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    profile: ProfileMetadata,
    session: SessionConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    agents: Option<AgentsConfig>,
    providers: Vec<ModuleConfig>,
    tools: Vec<ModuleConfig>,
    hooks: Vec<ModuleConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<SystemConfig>,
}

impl Profile {
    pub fn metadata(&self) -> &ProfileMetadata {
        &self.profile
    }

    pub fn session(&self) -> &SessionConfig {
        &self.session
    }

    pub fn agents(&self) -> Option<&AgentsConfig> {
        self.agents.as_ref()
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

    pub fn system(&self) -> Option<&SystemConfig> {
        self.system.as_ref()
    }
}

/// Validates merged profile trees.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileValidator;

impl Validator for ProfileValidator {
    type Output = Profile;

    fn kind(&self) -> DocumentKind {
        DocumentKind::Profile
    }

    fn validate(&self, tree: &Tree) -> Result<Profile, Vec<FieldProblem>> {
        let mut problems = Problems::default();

        let metadata = parse_metadata(&mut problems, tree);
        let session = parse_session(&mut problems, tree);
        let agents = parse_agents(&mut problems, tree);
        let providers = parse_module_list(&mut problems, tree, "providers");
        let tools = parse_module_list(&mut problems, tree, "tools");
        let hooks = parse_module_list(&mut problems, tree, "hooks");
        let system = parse_system(&mut problems, tree);

        match (metadata, session) {
            (Some(profile), Some(session)) if problems.is_empty() => Ok(Profile {
                profile,
                session,
                agents,
                providers,
                tools,
                hooks,
                system,
            }),
            _ => Err(problems.into_vec()),
        }
    }
}

fn parse_metadata(problems: &mut Problems, tree: &Tree) -> Option<ProfileMetadata> {
    let section = DocumentKind::Profile.metadata_section();
    let metadata = problems.required_map(tree, "", section)?;

    let name = problems.required_str(metadata, section, "name");
    let version = problems.required_str(metadata, section, "version");
    let description = problems.required_str(metadata, section, "description");
    let model = problems.optional_str(metadata, section, "model");
    let extends = problems.optional_str(metadata, section, "extends");

    if let Some(model) = &model
        && split_model_pair(model).is_none()
    {
        problems.invalid(
            join_path(section, "model"),
            format!("model must be in 'provider/model' format, got '{}'", model),
        );
    }

    Some(ProfileMetadata {
        name: name?,
        version: version?,
        description: description?,
        model,
        extends,
    })
}

fn parse_session(problems: &mut Problems, tree: &Tree) -> Option<SessionConfig> {
    let session = problems.required_map(tree, "", "session")?;
    let orchestrator = parse_required_module(problems, session, "session", "orchestrator");
    let context = parse_required_module(problems, session, "session", "context");
    Some(SessionConfig {
        orchestrator: orchestrator?,
        context: context?,
    })
}

fn parse_agents(problems: &mut Problems, tree: &Tree) -> Option<AgentsConfig> {
    let agents = problems.optional_map(tree, "", "agents")?;
    Some(AgentsConfig {
        dirs: problems.optional_str_list(agents, "agents", "dirs"),
        include: problems.optional_str_list(agents, "agents", "include"),
    })
}

/// `provider/model` with both halves non-empty.
fn split_model_pair(model: &str) -> Option<(&str, &str)> {
    let (provider, name) = model.split_once('/')?;
    (!provider.is_empty() && !name.is_empty()).then_some((provider, name))
}
