//! Environment override tests.
//!
//! Responsibilities:
//! - Test that `AMPLIFIER_PROFILE_<NAME>` and `AMPLIFIER_AGENT_<NAME>` redirect loads.
//! - Test that overrides pointing at missing files fall back to search paths.

use serial_test::serial;

use crate::loader::{AgentLoader, ProfileLoader};
use crate::resolver::DocumentSource;
use crate::search::SearchPaths;

use super::{FOUNDATION, Fixture, env_lock};

#[test]
#[serial]
fn test_profile_override_redirects_load() {
    let _lock = env_lock().lock().unwrap();
    let fixture = Fixture::new();
    fixture.write("profiles/foundation.md", FOUNDATION);
    let elsewhere = fixture.write(
        "elsewhere/custom.md",
        &FOUNDATION.replace("Foundation profile", "Overridden"),
    );

    let loader = ProfileLoader::profiles(SearchPaths::from_dirs([fixture.path("profiles")]));
    temp_env::with_var(
        "AMPLIFIER_PROFILE_FOUNDATION",
        Some(elsewhere.to_str().unwrap()),
        || {
            let profile = loader.load("foundation").unwrap();
            assert_eq!(profile.metadata().description(), "Overridden");
            assert_eq!(loader.source_of("foundation"), Some(DocumentSource::Env));
        },
    );
}

#[test]
#[serial]
fn test_override_to_missing_file_falls_back() {
    let _lock = env_lock().lock().unwrap();
    let fixture = Fixture::new();
    fixture.write("profiles/foundation.md", FOUNDATION);
    let missing = fixture.path("nowhere/foundation.md");

    let loader = ProfileLoader::profiles(SearchPaths::from_dirs([fixture.path("profiles")]));
    temp_env::with_var(
        "AMPLIFIER_PROFILE_FOUNDATION",
        Some(missing.to_str().unwrap()),
        || {
            let profile = loader.load("foundation").unwrap();
            assert_eq!(profile.metadata().description(), "Foundation profile");
            assert_eq!(
                loader.resolve("foundation"),
                Some(fixture.path("profiles/foundation.md"))
            );
        },
    );
}

#[test]
#[serial]
fn test_agent_override_normalizes_hyphens() {
    let _lock = env_lock().lock().unwrap();
    let fixture = Fixture::new();
    let custom = fixture.write(
        "custom/agent.md",
        "---\nmeta:\n  name: zen-architect\n  description: From override\n---\n",
    );

    let loader = AgentLoader::agents(SearchPaths::from_dirs([fixture.path("agents")]));
    temp_env::with_var(
        "AMPLIFIER_AGENT_ZEN_ARCHITECT",
        Some(custom.to_str().unwrap()),
        || {
            let agent = loader.load("zen-architect").unwrap();
            assert_eq!(agent.meta().description(), "From override");
        },
    );
}
