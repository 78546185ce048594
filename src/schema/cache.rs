//! Disk-backed cache of record type metadata
//!
//! The cache is filled once by inspecting each configured record type with
//! `detail=1`, then read back from disk on every later start. Entries keep the
//! raw field list (dotted names, allow-listed attributes); `SchemaRegistry`
//! turns them into schema trees.

use crate::error::{Error, ErrorKind, Result};
use crate::xml::XmlElement;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Field attributes kept from inspect output; anything else is dropped
pub const FIELD_ATTRIBUTES: [&str; 4] = ["externalDataName", "isReadOnly", "isRequired", "maxLength"];

/// Object whose inspect output is known to be incomplete
pub const USERINFO: &str = "USERINFO";

/// Single sign-on fields inspect omits from USERINFO
fn userinfo_fixup() -> Vec<RawField> {
    vec![
        RawField::new(
            "SSO_ENABLED",
            &[
                ("externalDataName", "boolean"),
                ("isReadOnly", "false"),
                ("isRequired", "false"),
                ("maxLength", "0"),
            ],
        ),
        RawField::new(
            "SSO_FEDERATED_ID",
            &[
                ("externalDataName", "string"),
                ("isReadOnly", "false"),
                ("maxLength", "200"),
            ],
        ),
        RawField::new(
            "SSO_COMPANY_ENABLED",
            &[
                ("externalDataName", "string"),
                ("isReadOnly", "false"),
                ("isRequired", "false"),
                ("maxLength", "0"),
            ],
        ),
    ]
}

/// One field entry as reported by inspect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawField {
    /// Possibly dotted, e.g. `CONTACTINFO.CONTACTNAME`
    pub name: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl RawField {
    pub fn new(name: impl Into<String>, attributes: &[(&str, &str)]) -> Self {
        Self {
            name: name.into(),
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// Raw metadata of one record type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawObjectMetadata {
    pub object_name: String,
    pub fields: Vec<RawField>,
}

impl RawObjectMetadata {
    /// Extract the `Type` described by an inspect `data` element
    pub fn from_inspect(data: &XmlElement) -> Option<Self> {
        let type_node = data.first_child("Type")?;
        let object_name = type_node.attribute("Name")?.trim();
        if object_name.is_empty() {
            return None;
        }

        let fields = type_node
            .find_all("Fields/Field")
            .into_iter()
            .filter_map(|field| {
                let name = field.find_text("Name")?.trim();
                let attributes = field
                    .children
                    .iter()
                    .filter(|c| FIELD_ATTRIBUTES.contains(&c.name.as_str()))
                    .filter_map(|c| Some((c.name.clone(), c.text()?.to_string())))
                    .collect();
                Some(RawField {
                    name: name.to_string(),
                    attributes,
                })
            })
            .collect();

        Some(Self {
            object_name: object_name.to_string(),
            fields,
        })
    }

    /// Insert or replace a field by name
    pub fn upsert_field(&mut self, field: RawField) {
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }
}

/// Supplies inspect output for a record type name
#[async_trait]
pub trait MetadataSource: Send {
    /// `data` element of an `inspect` call by record name with `detail=1`
    async fn inspect_type(&mut self, type_name: &str) -> Result<XmlElement>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct CacheContents {
    cached_at: Option<DateTime<Utc>>,
    objects: BTreeMap<String, RawObjectMetadata>,
    aliases: BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct MetadataCache {
    path: PathBuf,
    contents: CacheContents,
}

impl MetadataCache {
    /// An empty cache that will persist to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            contents: CacheContents::default(),
        }
    }

    /// Read the cache file; a missing file yields an empty cache
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            debug!("No metadata cache at {:?}", path);
            return Ok(Self::new(path));
        }

        let raw = fs::read_to_string(&path).map_err(|source| Error::CacheIo {
            path: path.clone(),
            source,
        })?;
        let contents: CacheContents =
            serde_json::from_str(&raw).map_err(|source| Error::CacheFormat {
                path: path.clone(),
                source,
            })?;

        debug!(
            "Loaded metadata cache with {} object types from {:?}",
            contents.objects.len(),
            path
        );
        Ok(Self { path, contents })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn cached_at(&self) -> Option<DateTime<Utc>> {
        self.contents.cached_at
    }

    pub fn is_empty(&self) -> bool {
        self.contents.objects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.contents.objects.len()
    }

    /// Canonical object names
    pub fn object_names(&self) -> impl Iterator<Item = &str> {
        self.contents.objects.keys().map(String::as_str)
    }

    /// Alias -> canonical name pairs
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.contents
            .aliases
            .iter()
            .map(|(a, c)| (a.as_str(), c.as_str()))
    }

    /// Look up by canonical name or by the alias it was fetched under
    pub fn get(&self, name: &str) -> Option<&RawObjectMetadata> {
        self.contents.objects.get(name).or_else(|| {
            self.contents
                .aliases
                .get(name)
                .and_then(|canonical| self.contents.objects.get(canonical))
        })
    }

    /// Store an entry under its canonical name and, if different, an alias
    pub fn insert(&mut self, alias: &str, metadata: RawObjectMetadata) {
        let canonical = metadata.object_name.clone();
        if alias != canonical {
            self.contents.aliases.insert(alias.to_string(), canonical.clone());
        }
        self.contents.objects.insert(canonical, metadata);
    }

    /// Add the single sign-on fields that inspect leaves out of USERINFO
    pub fn apply_fixup(&mut self) {
        match self.contents.objects.get_mut(USERINFO) {
            Some(userinfo) => {
                for field in userinfo_fixup() {
                    userinfo.upsert_field(field);
                }
                debug!("Applied USERINFO single sign-on fixup");
            }
            None => warn!("{} not in metadata cache, skipping fixup", USERINFO),
        }
    }

    /// Inspect every type name, rebuild the cache and persist it.
    ///
    /// Types the gateway does not describe are left out. The in-memory cache
    /// is only replaced once the new contents are on disk.
    pub async fn initialize<S>(&mut self, source: &mut S, type_names: &[String]) -> Result<()>
    where
        S: MetadataSource + ?Sized,
    {
        let mut fresh = Self::new(self.path.clone());

        for type_name in type_names {
            let data = match source.inspect_type(type_name).await {
                Ok(data) => data,
                Err(e) if e.kind() == ErrorKind::RemoteOperation => {
                    warn!("Inspect of '{}' failed, omitting it: {}", type_name, e);
                    continue;
                }
                Err(e) => return Err(e),
            };

            match RawObjectMetadata::from_inspect(&data) {
                Some(metadata) => {
                    debug!(
                        "Inspected '{}' as {} ({} fields)",
                        type_name,
                        metadata.object_name,
                        metadata.fields.len()
                    );
                    fresh.insert(type_name, metadata);
                }
                None => warn!("Inspect response has no type for '{}', omitting it", type_name),
            }
        }

        fresh.apply_fixup();
        fresh.contents.cached_at = Some(Utc::now());
        fresh.save()?;

        self.contents = fresh.contents;
        info!(
            "Metadata cache initialized with {} object types",
            self.contents.objects.len()
        );
        Ok(())
    }

    /// Write the cache through a temp file renamed over the target
    pub fn save(&self) -> Result<()> {
        let io_err = |source: std::io::Error| Error::CacheIo {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let serialized = serde_json::to_string_pretty(&self.contents).map_err(|source| {
            Error::CacheFormat {
                path: self.path.clone(),
                source,
            }
        })?;

        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "metadata-cache".to_string());
        let tmp_path = self
            .path
            .with_file_name(format!("{}.{}.tmp", file_name, uuid::Uuid::new_v4()));

        fs::write(&tmp_path, serialized).map_err(io_err)?;
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(io_err(e));
        }

        info!("Metadata cache saved to {:?}", self.path);
        Ok(())
    }

    /// Human readable listing of the cache contents
    pub fn dump(&self) -> String {
        let mut out = String::new();
        match self.contents.cached_at {
            Some(at) => {
                let _ = writeln!(out, "Metadata cache {:?} (written {})", self.path, at.to_rfc3339());
            }
            None => {
                let _ = writeln!(out, "Metadata cache {:?} (never written)", self.path);
            }
        }

        for (name, metadata) in &self.contents.objects {
            let aliases: Vec<&str> = self
                .contents
                .aliases
                .iter()
                .filter(|(_, canonical)| *canonical == name)
                .map(|(alias, _)| alias.as_str())
                .collect();
            if aliases.is_empty() {
                let _ = writeln!(out, "{}", name);
            } else {
                let _ = writeln!(out, "{} (aliases: {})", name, aliases.join(", "));
            }

            for field in &metadata.fields {
                let attrs: Vec<String> = field
                    .attributes
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, v))
                    .collect();
                let _ = writeln!(out, "    {} {}", field.name, attrs.join(" "));
            }
        }
        out
    }
}
