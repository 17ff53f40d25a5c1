//! Avro schema handles shared by every producer instance.
//!
//! Schemas are parsed once at startup and wrapped in an [`Arc`], so cloning a
//! [`SchemaHandle`] into each producer never copies or mutates the schema.

use crate::error::{PublishError, RecordPart, SchemaError};
use apache_avro::Schema;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

const TURNSTILE_KEY_SCHEMA: &str = include_str!("../schemas/turnstile_key.json");
const TURNSTILE_VALUE_SCHEMA: &str = include_str!("../schemas/turnstile_value.json");

/// Opaque, immutable Avro schema.
#[derive(Debug, Clone)]
pub struct SchemaHandle(Arc<Schema>);

impl SchemaHandle {
    /// Parse a schema from its JSON definition.
    pub fn parse(definition: &str) -> Result<Self, SchemaError> {
        let schema = Schema::parse_str(definition).map_err(|e| SchemaError::Parse(e.to_string()))?;
        Ok(Self(Arc::new(schema)))
    }

    /// Load a schema from a JSON file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let definition = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&definition)
    }

    /// Validate `item` against this schema and encode it as an Avro datum.
    pub(crate) fn encode<T: Serialize>(
        &self,
        topic: &str,
        part: RecordPart,
        item: &T,
    ) -> Result<Vec<u8>, PublishError> {
        let value = apache_avro::to_value(item).map_err(|e| PublishError::Encoding {
            topic: topic.to_string(),
            message: e.to_string(),
        })?;

        if !value.validate(&self.0) {
            return Err(PublishError::SchemaMismatch {
                topic: topic.to_string(),
                part,
            });
        }

        apache_avro::to_avro_datum(&self.0, value).map_err(|e| PublishError::Encoding {
            topic: topic.to_string(),
            message: e.to_string(),
        })
    }

    /// Decode an Avro datum written with this schema into JSON.
    pub fn decode_json(&self, bytes: &[u8]) -> Result<serde_json::Value, SchemaError> {
        let mut reader = bytes;
        let value = apache_avro::from_avro_datum(&self.0, &mut reader, None)
            .map_err(|e| SchemaError::Decode(e.to_string()))?;
        apache_avro::from_value::<serde_json::Value>(&value)
            .map_err(|e| SchemaError::Decode(e.to_string()))
    }
}

/// Key and value schemas for one kind of message.
#[derive(Debug, Clone)]
pub struct SchemaPair {
    pub key: SchemaHandle,
    pub value: SchemaHandle,
}

impl SchemaPair {
    /// Load both schemas from disk.
    pub fn from_files(
        key_path: impl AsRef<Path>,
        value_path: impl AsRef<Path>,
    ) -> Result<Self, SchemaError> {
        Ok(Self {
            key: SchemaHandle::from_file(key_path)?,
            value: SchemaHandle::from_file(value_path)?,
        })
    }

    /// The turnstile schemas bundled with this crate.
    pub fn turnstile() -> Result<Self, SchemaError> {
        Ok(Self {
            key: SchemaHandle::parse(TURNSTILE_KEY_SCHEMA)?,
            value: SchemaHandle::parse(TURNSTILE_VALUE_SCHEMA)?,
        })
    }
}
