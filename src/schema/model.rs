//! Normalized schema tree for one record type

use std::collections::BTreeMap;

/// A leaf field of a record type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    pub name: String,
    /// Remote data type, e.g. `string` or `boolean`
    pub external_type: String,
    pub read_only: bool,
    pub required: bool,
    /// 0 means unbounded
    pub max_length: usize,
}

impl FieldSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            external_type: "string".to_string(),
            read_only: false,
            required: false,
            max_length: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaNode {
    Field(FieldSchema),
    Group(GroupSchema),
}

impl SchemaNode {
    pub fn name(&self) -> &str {
        match self {
            SchemaNode::Field(f) => &f.name,
            SchemaNode::Group(g) => &g.name,
        }
    }
}

/// Either the root field container of a type or a nested group built from
/// dotted field names (`A.B.C`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSchema {
    pub name: String,
    pub is_nested: bool,
    pub children: BTreeMap<String, SchemaNode>,
}

impl GroupSchema {
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_nested: false,
            children: BTreeMap::new(),
        }
    }

    pub fn nested(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_nested: true,
            children: BTreeMap::new(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        match self.children.get(name) {
            Some(SchemaNode::Field(f)) => Some(f),
            _ => None,
        }
    }

    pub fn group(&self, name: &str) -> Option<&GroupSchema> {
        match self.children.get(name) {
            Some(SchemaNode::Group(g)) => Some(g),
            _ => None,
        }
    }

    /// Number of leaf fields below this group
    pub fn leaf_count(&self) -> usize {
        self.children
            .values()
            .map(|node| match node {
                SchemaNode::Field(_) => 1,
                SchemaNode::Group(g) => g.leaf_count(),
            })
            .sum()
    }
}

/// Top-level, immutable schema of one record type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSchema {
    pub object_name: String,
    pub root: GroupSchema,
}

impl TypeSchema {
    pub fn new(object_name: impl Into<String>) -> Self {
        let object_name = object_name.into();
        Self {
            root: GroupSchema::root(object_name.clone()),
            object_name,
        }
    }

    /// Resolve a dotted path to a leaf field
    pub fn field_at(&self, path: &str) -> Option<&FieldSchema> {
        let mut segments: Vec<&str> = path.split('.').collect();
        let leaf = segments.pop()?;
        let mut group = &self.root;
        for segment in segments {
            group = group.group(segment)?;
        }
        group.field(leaf)
    }
}
