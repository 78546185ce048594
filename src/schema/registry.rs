use super::cache::{MetadataCache, RawField, RawObjectMetadata};
use super::model::{FieldSchema, GroupSchema, SchemaNode, TypeSchema};
use crate::error::{Error, Result};
use crate::record::{RecordInstance, RecordShape, Value};
use log::{debug, warn};
use std::collections::BTreeMap;

/// In-memory schemas keyed by canonical object name, plus the aliases they
/// were fetched under
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    types: BTreeMap<String, TypeSchema>,
    aliases: BTreeMap<String, String>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cache(cache: &MetadataCache) -> Self {
        let mut registry = Self::new();
        for name in cache.object_names() {
            if let Some(raw) = cache.get(name) {
                registry.register(Self::parse(raw));
            }
        }
        for (alias, canonical) in cache.aliases() {
            registry.add_alias(alias, canonical);
        }
        debug!("Schema registry built with {} types", registry.types.len());
        registry
    }

    /// Build the schema tree of one type.
    ///
    /// Dotted field names become nested groups: `addr.city` and `addr.zip`
    /// produce one group `addr` holding leaves `city` and `zip`.
    pub fn parse(raw: &RawObjectMetadata) -> TypeSchema {
        let mut schema = TypeSchema::new(raw.object_name.clone());

        for field in &raw.fields {
            let segments: Vec<&str> = field.name.split('.').map(str::trim).collect();
            if segments.iter().any(|s| s.is_empty()) {
                warn!(
                    "Skipping malformed field name '{}' on {}",
                    field.name, raw.object_name
                );
                continue;
            }
            let Some((leaf, parents)) = segments.split_last() else {
                continue;
            };

            let mut group = &mut schema.root;
            for segment in parents {
                group = child_group(group, segment);
            }

            if let Some(SchemaNode::Group(_)) = group.children.get(*leaf) {
                warn!(
                    "Field '{}' on {} collides with a nested group, keeping the group",
                    field.name, raw.object_name
                );
                continue;
            }
            group
                .children
                .insert(leaf.to_string(), SchemaNode::Field(field_schema(leaf, field)));
        }

        schema
    }

    pub fn register(&mut self, schema: TypeSchema) {
        self.types.insert(schema.object_name.clone(), schema);
    }

    pub fn add_alias(&mut self, alias: &str, canonical: &str) {
        self.aliases.insert(alias.to_string(), canonical.to_string());
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&TypeSchema> {
        self.types.get(name).or_else(|| {
            self.aliases
                .get(name)
                .and_then(|canonical| self.types.get(canonical))
        })
    }

    pub fn lookup(&self, name: &str) -> Result<&TypeSchema> {
        self.get(name)
            .ok_or_else(|| Error::SchemaLookup(name.to_string()))
    }

    pub fn shape(&self, name: &str) -> Result<RecordShape> {
        Ok(RecordShape::build(self.lookup(name)?))
    }

    /// Instantiate a record of the named type with initial values
    pub fn record<I, K>(&self, name: &str, values: I) -> Result<RecordInstance>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        self.shape(name)?.instantiate(values)
    }
}

fn child_group<'a>(group: &'a mut GroupSchema, name: &str) -> &'a mut GroupSchema {
    let node = group
        .children
        .entry(name.to_string())
        .or_insert_with(|| SchemaNode::Group(GroupSchema::nested(name)));

    if let SchemaNode::Field(_) = *node {
        warn!("Field '{}' also used as a group prefix, treating it as a group", name);
        *node = SchemaNode::Group(GroupSchema::nested(name));
    }

    match node {
        SchemaNode::Group(g) => g,
        SchemaNode::Field(_) => unreachable!("field nodes are replaced above"),
    }
}

fn field_schema(name: &str, raw: &RawField) -> FieldSchema {
    let attr = |key: &str| raw.attributes.get(key).map(|v| v.trim());
    FieldSchema {
        name: name.to_string(),
        external_type: attr("externalDataName")
            .filter(|v| !v.is_empty())
            .unwrap_or("string")
            .to_string(),
        read_only: attr("isReadOnly") == Some("true"),
        required: attr("isRequired") == Some("true"),
        max_length: attr("maxLength")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0),
    }
}
