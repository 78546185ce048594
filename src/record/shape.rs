use super::instance::{RecordInstance, Value};
use crate::error::Result;
use crate::schema::{FieldSchema, GroupSchema, SchemaNode, TypeSchema};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    Field(FieldSchema),
    Group(RecordShape),
}

/// The fixed set of assignable attribute names of a record type.
/// Nested groups carry their own sub-shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordShape {
    name: String,
    slots: BTreeMap<String, Slot>,
}

impl RecordShape {
    pub fn build(schema: &TypeSchema) -> Self {
        Self::from_group(&schema.object_name, &schema.root)
    }

    fn from_group(name: &str, group: &GroupSchema) -> Self {
        let slots = group
            .children
            .iter()
            .map(|(key, node)| {
                let slot = match node {
                    SchemaNode::Field(field) => Slot::Field(field.clone()),
                    SchemaNode::Group(nested) => Slot::Group(Self::from_group(key, nested)),
                };
                (key.clone(), slot)
            })
            .collect();

        Self {
            name: name.to_string(),
            slots,
        }
    }

    /// Record type name, or the group name for nested shapes
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declares(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }

    pub fn slot(&self, key: &str) -> Option<&Slot> {
        self.slots.get(key)
    }

    pub fn slots(&self) -> impl Iterator<Item = (&str, &Slot)> {
        self.slots.iter().map(|(k, s)| (k.as_str(), s))
    }

    /// Create an instance and assign `values`; any undeclared key fails the whole call
    pub fn instantiate<I, K>(&self, values: I) -> Result<RecordInstance>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut instance = RecordInstance::empty(self);
        for (key, value) in values {
            instance.set(&key.into(), value)?;
        }
        Ok(instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vendor_schema() -> TypeSchema {
        let mut schema = TypeSchema::new("VENDOR");
        schema
            .root
            .children
            .insert("NAME".into(), SchemaNode::Field(FieldSchema::new("NAME")));
        let mut contact = GroupSchema::nested("CONTACT");
        contact
            .children
            .insert("EMAIL".into(), SchemaNode::Field(FieldSchema::new("EMAIL")));
        schema
            .root
            .children
            .insert("CONTACT".into(), SchemaNode::Group(contact));
        schema
    }

    #[test]
    fn test_shape_mirrors_schema() {
        let shape = RecordShape::build(&vendor_schema());
        assert_eq!(shape.name(), "VENDOR");
        assert!(shape.declares("NAME"));
        assert!(shape.declares("CONTACT"));
        assert!(!shape.declares("EMAIL"));

        match shape.slot("CONTACT") {
            Some(Slot::Group(nested)) => {
                assert_eq!(nested.name(), "CONTACT");
                assert!(nested.declares("EMAIL"));
            }
            other => panic!("expected group slot, got {:?}", other),
        }
    }

    #[test]
    fn test_instantiate_rejects_undeclared_key() {
        let shape = RecordShape::build(&vendor_schema());
        let err = shape
            .instantiate(vec![("NAME", Value::from("Acme")), ("COLOR", Value::from("red"))])
            .unwrap_err();
        assert!(err.to_string().contains("COLOR"));

        let ok = shape.instantiate(vec![("NAME", Value::from("Acme"))]).unwrap();
        assert_eq!(ok.get("NAME").and_then(|s| s.as_str()), Some("Acme"));
    }
}
