//! Grid override commands.
//!
//! Each command is one repair transform over the index headers, with its
//! own validation rules and optional dimension-name and chunk-shape
//! transforms. The set is closed: overrides are requested by name and
//! resolved against the fixed registry in [`crate::engine::GridOverrider`].

use std::collections::BTreeMap;

use segy_geometry::{StreamerShotGeometry, analyze_streamer_headers, assign_trace_ordinals};
use segy_model::{GridOverrideError, GridOverrideRequest, IndexHeaderSet, Result, TRACE_HEADER};

/// Parameter naming the per-cable channel count for wrap/cable commands.
pub const CHANNELS_PER_CABLE: &str = "ChannelsPerCable";

/// Parameter naming the chunk size inserted by the NonBinned command.
pub const CHUNKSIZE: &str = "chunksize";

/// One grid override transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideCommand {
    /// Disambiguate duplicate traces on a new `trace` axis, chunk size 1.
    DuplicateIndex,
    /// Like [`Self::DuplicateIndex`], but the caller picks the chunk size
    /// of the new axis through the `chunksize` parameter.
    NonBinned,
    /// Classify the streamer geometry and, for absolute channel numbering,
    /// rewrite channels to restart at 1 on every cable.
    AutoChannelWrap,
    /// Fold an absolute channel number into a fixed per-cable range.
    ChannelWrap,
    /// Reconstruct cable numbers from unwrapped absolute channels.
    CalculateCable,
}

impl OverrideCommand {
    /// Command name used in error reporting.
    pub fn name(self) -> &'static str {
        match self {
            Self::DuplicateIndex => "DuplicateIndex",
            Self::NonBinned => "NonBinned",
            Self::AutoChannelWrap => "AutoChannelWrap",
            Self::ChannelWrap => "ChannelWrap",
            Self::CalculateCable => "CalculateCable",
        }
    }

    /// Header names that must exist before this command runs.
    pub fn required_keys(self) -> &'static [&'static str] {
        match self {
            Self::DuplicateIndex | Self::NonBinned => &[],
            Self::AutoChannelWrap | Self::ChannelWrap | Self::CalculateCable => {
                &["shot_point", "cable", "channel"]
            }
        }
    }

    /// Parameter names that must be present in the request.
    pub fn required_parameters(self) -> &'static [&'static str] {
        match self {
            Self::DuplicateIndex | Self::AutoChannelWrap => &[],
            Self::NonBinned => &[CHUNKSIZE],
            Self::ChannelWrap | Self::CalculateCable => &[CHANNELS_PER_CABLE],
        }
    }

    /// Override names this command cannot be combined with.
    pub fn incompatible_with(self) -> &'static [&'static str] {
        match self {
            Self::DuplicateIndex | Self::NonBinned | Self::AutoChannelWrap => {
                &["ChannelWrap", "CalculateCable"]
            }
            Self::ChannelWrap | Self::CalculateCable => &["AutoChannelWrap"],
        }
    }

    /// Check incompatibilities, required headers and required parameters,
    /// in that order. Runs before any mutation.
    pub fn validate(self, headers: &IndexHeaderSet, request: &GridOverrideRequest) -> Result<()> {
        for conflict in self.incompatible_with() {
            if request.contains(conflict) {
                return Err(GridOverrideError::IncompatibleOverrides {
                    override_name: self.name().to_string(),
                    conflicts_with: (*conflict).to_string(),
                });
            }
        }

        let missing: Vec<String> = self
            .required_keys()
            .iter()
            .filter(|key| !headers.contains(key))
            .map(|key| (*key).to_string())
            .collect();
        if !missing.is_empty() {
            return Err(GridOverrideError::MissingKeys {
                override_name: self.name().to_string(),
                missing,
            });
        }

        let missing: Vec<String> = self
            .required_parameters()
            .iter()
            .filter(|param| !request.contains(param))
            .map(|param| (*param).to_string())
            .collect();
        if !missing.is_empty() {
            return Err(GridOverrideError::MissingParameter {
                override_name: self.name().to_string(),
                missing,
            });
        }

        Ok(())
    }

    /// Apply the transform to the header set.
    ///
    /// Validates first, so a failing command leaves the headers untouched.
    /// Never changes the trace count or trace order.
    pub fn transform(
        self,
        headers: &mut IndexHeaderSet,
        request: &GridOverrideRequest,
    ) -> Result<()> {
        self.validate(headers, request)?;

        match self {
            Self::DuplicateIndex | Self::NonBinned => assign_trace_ordinals(headers),
            Self::AutoChannelWrap => self.auto_channel_wrap(headers),
            Self::ChannelWrap => {
                let channels_per_cable = self.positive_parameter(request, CHANNELS_PER_CABLE)?;
                let channel = self.column_mut(headers, "channel")?;
                for value in channel {
                    *value = (*value - 1).rem_euclid(channels_per_cable) + 1;
                }
                Ok(())
            }
            Self::CalculateCable => {
                let channels_per_cable = self.positive_parameter(request, CHANNELS_PER_CABLE)?;
                let cables: Vec<i64> = self
                    .column(headers, "channel")?
                    .iter()
                    .map(|&channel| (channel - 1).div_euclid(channels_per_cable) + 1)
                    .collect();
                let cable = self.column_mut(headers, "cable")?;
                cable.copy_from_slice(&cables);
                Ok(())
            }
        }
    }

    /// Transform the grid dimension names. Identity unless the command
    /// adds the `trace` axis.
    pub fn transform_index_names(self, index_names: &[String]) -> Vec<String> {
        let mut names = index_names.to_vec();
        if matches!(self, Self::DuplicateIndex | Self::NonBinned) {
            names.push(TRACE_HEADER.to_string());
        }
        names
    }

    /// Transform the chunk shape. Identity unless the command adds the
    /// `trace` axis, whose chunk size lands just before the last (sample)
    /// entry. An absent shape passes through absent.
    pub fn transform_chunksize(
        self,
        chunksize: Option<&[i64]>,
        request: &GridOverrideRequest,
    ) -> Result<Option<Vec<i64>>> {
        let Some(chunks) = chunksize else {
            return Ok(None);
        };

        let inserted = match self {
            Self::DuplicateIndex => 1,
            Self::NonBinned => self.positive_parameter(request, CHUNKSIZE)?,
            _ => return Ok(Some(chunks.to_vec())),
        };

        let mut chunks = chunks.to_vec();
        chunks.insert(chunks.len().saturating_sub(1), inserted);
        Ok(Some(chunks))
    }

    fn auto_channel_wrap(self, headers: &mut IndexHeaderSet) -> Result<()> {
        let geometry = {
            let cable = self.column(headers, "cable")?;
            let channel = self.column(headers, "channel")?;
            analyze_streamer_headers(cable, channel)
        };

        tracing::info!(geometry = ?geometry.geometry, "classified streamer acquisition");
        for stats in &geometry.cables {
            tracing::info!(
                cable = stats.cable,
                chan_min = stats.chan_min,
                chan_max = stats.chan_max,
                "cable channel range"
            );
        }

        // Type A is already cable-relative; type C is never produced by
        // the analyzer. Only absolute numbering gets rebased.
        if geometry.geometry == StreamerShotGeometry::B {
            let chan_min: BTreeMap<i64, i64> = geometry
                .cables
                .iter()
                .map(|stats| (stats.cable, stats.chan_min))
                .collect();
            let cable = self.column(headers, "cable")?.to_vec();
            let channel = self.column_mut(headers, "channel")?;
            for (value, cable_id) in channel.iter_mut().zip(&cable) {
                if let Some(min) = chan_min.get(cable_id) {
                    *value = *value - min + 1;
                }
            }
        }

        Ok(())
    }

    fn column<'a>(self, headers: &'a IndexHeaderSet, name: &str) -> Result<&'a [i64]> {
        headers
            .column(name)
            .ok_or_else(|| GridOverrideError::MissingKeys {
                override_name: self.name().to_string(),
                missing: vec![name.to_string()],
            })
    }

    fn column_mut<'a>(self, headers: &'a mut IndexHeaderSet, name: &str) -> Result<&'a mut [i64]> {
        headers
            .column_mut(name)
            .ok_or_else(|| GridOverrideError::MissingKeys {
                override_name: self.name().to_string(),
                missing: vec![name.to_string()],
            })
    }

    /// Fetch a numeric parameter that must be a positive count.
    fn positive_parameter(self, request: &GridOverrideRequest, name: &str) -> Result<i64> {
        match request.integer(name) {
            Some(value) if value > 0 => Ok(value),
            _ => Err(GridOverrideError::MissingParameter {
                override_name: self.name().to_string(),
                missing: vec![name.to_string()],
            }),
        }
    }
}
