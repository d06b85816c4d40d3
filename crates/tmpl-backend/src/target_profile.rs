//! Per-target strategy presets and their JSON configuration.
//!
//! A profile file names a preset and may override individual choices:
//!
//! ```json
//! { "target": "cpp03", "representationOfVoid": "reifyVoid" }
//! ```

use crate::strategy::{BubbleBranchStrategy, CfOptions, FunctionTypeStrategy, RepresentationOfVoid};
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// The strategy choices for one target language.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TargetProfile {
    pub cf_options: CfOptions,
    pub function_type_strategy: FunctionTypeStrategy,
}

/// Known target names, in the order presets are listed.
pub const KNOWN_TARGETS: [&str; 8] = ["js", "py", "java", "lua", "cpp", "cpp03", "csharp", "rust"];

impl TargetProfile {
    pub const fn new(
        bubble_strategy: BubbleBranchStrategy,
        representation_of_void: RepresentationOfVoid,
        function_type_strategy: FunctionTypeStrategy,
    ) -> Self {
        TargetProfile {
            cf_options: CfOptions::new(bubble_strategy, representation_of_void),
            function_type_strategy,
        }
    }

    /// The preset for `target`, matched case-insensitively.
    pub fn preset(target: &str) -> Result<Self> {
        use BubbleBranchStrategy::{CatchBubble, IfHandlerScopeVar};
        use FunctionTypeStrategy::{ToFunctionType, ToFunctionalInterface};
        use RepresentationOfVoid::{DoNotReifyVoid, ReifyVoid};

        let normalized = target.trim().to_ascii_lowercase();
        let profile = match normalized.as_str() {
            "js" => Self::new(CatchBubble, ReifyVoid, ToFunctionType),
            "py" => Self::new(CatchBubble, DoNotReifyVoid, ToFunctionType),
            "java" => Self::new(CatchBubble, DoNotReifyVoid, ToFunctionType),
            "lua" => Self::new(CatchBubble, ReifyVoid, ToFunctionType),
            "cpp" => Self::new(CatchBubble, ReifyVoid, ToFunctionType),
            "cpp03" => Self::new(IfHandlerScopeVar, DoNotReifyVoid, ToFunctionalInterface),
            "csharp" => Self::new(CatchBubble, DoNotReifyVoid, ToFunctionType),
            "rust" => Self::new(IfHandlerScopeVar, ReifyVoid, ToFunctionType),
            _ => bail!(
                "unsupported target '{}' (expected one of {})",
                target,
                KNOWN_TARGETS.join(", ")
            ),
        };
        Ok(profile)
    }

    pub fn from_config(config: &TargetProfileConfig) -> Result<Self> {
        let base = match config.target.as_deref() {
            Some(target) => Some(Self::preset(target)?),
            None => None,
        };
        let bubble_strategy = config
            .bubble_strategy
            .or(base.map(|b| b.cf_options.bubble_strategy));
        let representation_of_void = config
            .representation_of_void
            .or(base.map(|b| b.cf_options.representation_of_void));
        let function_type_strategy = config
            .function_type_strategy
            .or(base.map(|b| b.function_type_strategy));

        let (Some(bubble), Some(void), Some(function)) =
            (bubble_strategy, representation_of_void, function_type_strategy)
        else {
            bail!(
                "target profile needs a 'target' or all of \
                 'bubbleStrategy', 'representationOfVoid' and 'functionTypeStrategy'"
            );
        };
        Ok(Self::new(bubble, void, function))
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        let config: TargetProfileConfig =
            serde_json::from_str(source).context("failed to parse target profile JSON")?;
        Self::from_config(&config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read target profile: {}", path.display()))?;
        let profile = Self::from_json_str(&source)
            .with_context(|| format!("failed to load target profile: {}", path.display()))?;
        debug!(path = %path.display(), ?profile, "loaded target profile");
        Ok(profile)
    }
}

/// On-disk form of a [`TargetProfile`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TargetProfileConfig {
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub bubble_strategy: Option<BubbleBranchStrategy>,
    #[serde(default)]
    pub representation_of_void: Option<RepresentationOfVoid>,
    #[serde(default)]
    pub function_type_strategy: Option<FunctionTypeStrategy>,
}

#[cfg(test)]
#[path = "../tests/target_profile_tests.rs"]
mod target_profile_tests;
