//! Grid override engine.

use std::collections::BTreeSet;

use segy_model::{GridOverrideError, GridOverrideRequest, IndexHeaderSet, Result};

use crate::command::OverrideCommand;

/// Executor for grid overrides.
///
/// Holds the fixed table of override names and the parameter names the
/// commands consume. The registry is immutable after construction and a
/// single instance can serve any number of independent runs.
#[derive(Debug)]
pub struct GridOverrider {
    commands: Vec<(&'static str, OverrideCommand)>,
    parameters: BTreeSet<&'static str>,
}

impl Default for GridOverrider {
    fn default() -> Self {
        Self::new()
    }
}

impl GridOverrider {
    /// Build the registry of available overrides.
    pub fn new() -> Self {
        let commands = vec![
            ("AutoChannelWrap", OverrideCommand::AutoChannelWrap),
            ("CalculateCable", OverrideCommand::CalculateCable),
            ("ChannelWrap", OverrideCommand::ChannelWrap),
            ("NonBinned", OverrideCommand::NonBinned),
            ("HasDuplicates", OverrideCommand::DuplicateIndex),
        ];

        let parameters = commands
            .iter()
            .flat_map(|(_, command)| command.required_parameters().iter().copied())
            .collect();

        Self {
            commands,
            parameters,
        }
    }

    /// Resolve an override name to its command.
    pub fn command(&self, name: &str) -> Option<OverrideCommand> {
        self.commands
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, command)| *command)
    }

    /// Whether a request entry is a parameter consumed by some command,
    /// rather than an override to dispatch.
    pub fn is_parameter(&self, name: &str) -> bool {
        self.parameters.contains(name)
    }

    /// Apply all requested overrides in request order.
    ///
    /// Each resolved command validates itself, transforms the headers,
    /// then the dimension names, then the chunk shape; the updated triple
    /// feeds the next override. A failing command aborts the run, leaving
    /// the effects of earlier commands in place.
    pub fn run(
        &self,
        mut index_headers: IndexHeaderSet,
        mut index_names: Vec<String>,
        request: &GridOverrideRequest,
        mut chunksize: Option<Vec<i64>>,
    ) -> Result<(IndexHeaderSet, Vec<String>, Option<Vec<i64>>)> {
        for (name, _) in request.iter() {
            if self.is_parameter(name) {
                continue;
            }

            let Some(command) = self.command(name) else {
                return Err(GridOverrideError::UnknownOverride(name.to_string()));
            };

            tracing::debug!(name, command = command.name(), "applying grid override");
            command.transform(&mut index_headers, request)?;
            index_names = command.transform_index_names(&index_names);
            chunksize = command.transform_chunksize(chunksize.as_deref(), request)?;
        }

        Ok((index_headers, index_names, chunksize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_knows_all_override_names() {
        let overrider = GridOverrider::new();
        for name in [
            "AutoChannelWrap",
            "CalculateCable",
            "ChannelWrap",
            "NonBinned",
            "HasDuplicates",
        ] {
            assert!(overrider.command(name).is_some(), "missing {name}");
        }
        assert!(overrider.command("chunksize").is_none());
    }

    #[test]
    fn parameters_are_collected_from_commands() {
        let overrider = GridOverrider::new();
        assert!(overrider.is_parameter("ChannelsPerCable"));
        assert!(overrider.is_parameter("chunksize"));
        assert!(!overrider.is_parameter("HasDuplicates"));
    }
}
