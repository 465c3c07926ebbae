// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::Deserialize;
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexMappingConfig {
    index_prefix: String,
    index_suffix: String,
    bulk_chunk_size: usize,
    update_retry_on_conflict: u32,
}

impl IndexMappingConfig {
    pub const DEFAULT_BULK_CHUNK_SIZE: usize = 50;
    pub const DEFAULT_UPDATE_RETRY_ON_CONFLICT: u32 = 3;

    pub fn new(
        index_prefix: impl AsRef<str>,
        index_suffix: impl AsRef<str>,
        bulk_chunk_size: usize,
        update_retry_on_conflict: u32,
    ) -> Result<Self, IndexMappingConfigError> {
        if bulk_chunk_size == 0 {
            return Err(IndexMappingConfigError::InvalidBulkChunkSize { bulk_chunk_size });
        }

        Ok(Self {
            index_prefix: index_prefix.as_ref().to_lowercase(),
            index_suffix: index_suffix.as_ref().to_lowercase(),
            bulk_chunk_size,
            update_retry_on_conflict,
        })
    }

    pub fn with_affixes(index_prefix: impl AsRef<str>, index_suffix: impl AsRef<str>) -> Self {
        Self {
            index_prefix: index_prefix.as_ref().to_lowercase(),
            index_suffix: index_suffix.as_ref().to_lowercase(),
            ..Self::default()
        }
    }

    pub fn load_from_env() -> Result<Self, IndexMappingConfigError> {
        Self::load_with(|env_var| std::env::var(env_var).ok())
    }

    /// Same as [`Self::load_from_env`] with a custom variable lookup
    pub fn load_with(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, IndexMappingConfigError> {
        let raw = IndexMappingConfigRaw {
            index_prefix: lookup(ENV_INDEX_PREFIX),
            index_suffix: lookup(ENV_INDEX_SUFFIX),
            bulk_chunk_size: parse_env_var(&lookup, ENV_BULK_CHUNK_SIZE)?,
            update_retry_on_conflict: parse_env_var(&lookup, ENV_UPDATE_RETRY_ON_CONFLICT)?,
        };

        Self::try_from(raw)
    }

    pub fn index_prefix(&self) -> &str {
        &self.index_prefix
    }

    pub fn index_suffix(&self) -> &str {
        &self.index_suffix
    }

    pub fn bulk_chunk_size(&self) -> usize {
        self.bulk_chunk_size
    }

    pub fn update_retry_on_conflict(&self) -> u32 {
        self.update_retry_on_conflict
    }
}

impl Default for IndexMappingConfig {
    fn default() -> Self {
        Self {
            index_prefix: String::new(),
            index_suffix: String::new(),
            bulk_chunk_size: Self::DEFAULT_BULK_CHUNK_SIZE,
            update_retry_on_conflict: Self::DEFAULT_UPDATE_RETRY_ON_CONFLICT,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const ENV_INDEX_PREFIX: &str = "INDEX_MAPPING_PREFIX";
pub const ENV_INDEX_SUFFIX: &str = "INDEX_MAPPING_SUFFIX";
pub const ENV_BULK_CHUNK_SIZE: &str = "INDEX_MAPPING_BULK_CHUNK_SIZE";
pub const ENV_UPDATE_RETRY_ON_CONFLICT: &str = "INDEX_MAPPING_UPDATE_RETRY_ON_CONFLICT";

fn parse_env_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    env_var: &'static str,
) -> Result<Option<T>, IndexMappingConfigError> {
    let Some(value) = lookup(env_var) else {
        return Ok(None);
    };

    match value.trim().parse() {
        Ok(parsed) => Ok(Some(parsed)),
        Err(_) => Err(IndexMappingConfigError::InvalidEnvVar { env_var, value }),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Deserialized form, validated into [`IndexMappingConfig`]
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexMappingConfigRaw {
    pub index_prefix: Option<String>,
    pub index_suffix: Option<String>,
    pub bulk_chunk_size: Option<usize>,
    pub update_retry_on_conflict: Option<u32>,
}

impl TryFrom<IndexMappingConfigRaw> for IndexMappingConfig {
    type Error = IndexMappingConfigError;

    fn try_from(raw: IndexMappingConfigRaw) -> Result<Self, Self::Error> {
        Self::new(
            raw.index_prefix.unwrap_or_default(),
            raw.index_suffix.unwrap_or_default(),
            raw.bulk_chunk_size.unwrap_or(Self::DEFAULT_BULK_CHUNK_SIZE),
            raw.update_retry_on_conflict
                .unwrap_or(Self::DEFAULT_UPDATE_RETRY_ON_CONFLICT),
        )
    }
}

impl<'de> Deserialize<'de> for IndexMappingConfig {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = IndexMappingConfigRaw::deserialize(deserializer)?;
        Self::try_from(raw).map_err(serde::de::Error::custom)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexMappingConfigError {
    #[error("Bulk chunk size must be at least 1, got {bulk_chunk_size}")]
    InvalidBulkChunkSize { bulk_chunk_size: usize },

    #[error("Environment variable {env_var} has invalid value '{value}'")]
    InvalidEnvVar { env_var: &'static str, value: String },
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
