//! MMIF container model
//!
//! A container holds opaque documents and an ordered list of views. Each
//! view carries metadata (producing app, contained types) and annotations.
//! Fields this crate does not interpret are preserved on round trip.

use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::vocab::{self, AnnotationType};
use crate::{NelError, Result};

/// Ordered property mapping
pub type Properties = Map<String, Value>;

/// Prefix of generated view identifiers
pub const VIEW_PREFIX: &str = "v_";

/// Separator between a view id and a document id
pub const ID_DELIMITER: &str = ":";

/// Top-level annotation container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mmif {
    pub metadata: MmifMetadata,

    #[serde(default)]
    pub documents: Vec<Value>,

    #[serde(default)]
    pub views: Vec<View>,

    #[serde(flatten)]
    pub extra: Properties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MmifMetadata {
    pub mmif: String,

    #[serde(flatten)]
    pub extra: Properties,
}

impl Mmif {
    /// Parse a container from its JSON serialization
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| NelError::InvalidContainer(e.to_string()))
    }

    /// Serialize the container, optionally indented
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Next unused view identifier (`v_<n>`, starting at the view count)
    pub fn new_view_id(&self) -> String {
        let mut index = self.views.len();
        loop {
            let id = format!("{VIEW_PREFIX}{index}");
            if self.view(&id).is_none() {
                return id;
            }
            index += 1;
        }
    }

    /// Find a view by id
    pub fn view(&self, id: &str) -> Option<&View> {
        self.views.iter().find(|v| v.id == id)
    }
}

/// A named group of annotations produced by one app
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub id: String,

    pub metadata: ViewMetadata,

    #[serde(default)]
    pub annotations: Vec<Annotation>,

    #[serde(flatten)]
    pub extra: Properties,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewMetadata {
    /// Producing app identifier
    #[serde(default)]
    pub app: String,

    /// Produced annotation types
    #[serde(default)]
    pub contains: Contains,

    #[serde(flatten)]
    pub extra: Properties,
}

impl View {
    /// Create an empty view signed by `app`
    pub fn new(id: impl Into<String>, app: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            metadata: ViewMetadata {
                app: app.into(),
                ..Default::default()
            },
            annotations: Vec::new(),
            extra: Properties::new(),
        }
    }

    /// Declare an annotation type produced in this view
    pub fn new_contain(&mut self, at_type: AnnotationType, document: Option<String>) {
        self.metadata.contains.insert(
            at_type.as_str(),
            Contain {
                document,
                extra: Properties::new(),
            },
        );
    }

    /// Append an annotation
    pub fn add_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }
}

/// Descriptor of one contained annotation type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contain {
    /// Document the annotations of this type refer to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,

    #[serde(flatten)]
    pub extra: Properties,
}

/// Contained-type descriptors keyed by type URI, in declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contains(Vec<(String, Contain)>);

impl Contains {
    /// Insert or replace the descriptor for a type URI
    pub fn insert(&mut self, uri: impl Into<String>, contain: Contain) {
        let uri = uri.into();
        match self.0.iter_mut().find(|(k, _)| *k == uri) {
            Some((_, existing)) => *existing = contain,
            None => self.0.push((uri, contain)),
        }
    }

    pub fn get(&self, uri: &str) -> Option<&Contain> {
        self.0.iter().find(|(k, _)| k == uri).map(|(_, c)| c)
    }

    /// Descriptors whose type URI ends in `name`
    pub fn by_basename<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Contain> + 'a {
        self.0
            .iter()
            .filter(move |(k, _)| vocab::basename(k) == name)
            .map(|(_, c)| c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Contain)> {
        self.0.iter().map(|(k, c)| (k.as_str(), c))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Contains {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (uri, contain) in &self.0 {
            map.serialize_entry(uri, contain)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Contains {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Map::<String, Value>::deserialize(deserializer)?;
        raw.into_iter()
            .map(|(uri, value)| {
                serde_json::from_value(value)
                    .map(|contain| (uri, contain))
                    .map_err(serde::de::Error::custom)
            })
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(Contains)
    }
}

/// A typed record inside a view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(rename = "@type")]
    pub at_type: AnnotationType,

    #[serde(default)]
    pub properties: Properties,

    #[serde(flatten)]
    pub extra: Properties,
}

impl Annotation {
    /// Create an annotation whose first property is its identifier
    pub fn new(at_type: AnnotationType, id: impl Into<String>) -> Self {
        let mut properties = Properties::new();
        properties.insert("id".to_string(), Value::String(id.into()));
        Self {
            at_type,
            properties,
            extra: Properties::new(),
        }
    }

    /// Set a property value
    pub fn add_property(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(name.into(), value.into());
    }

    /// Append every field of a serializable record as properties
    pub fn extend_properties<T: Serialize>(&mut self, record: &T) -> Result<()> {
        match serde_json::to_value(record)? {
            Value::Object(fields) => {
                self.properties.extend(fields);
                Ok(())
            }
            other => Err(NelError::Other(anyhow::anyhow!(
                "annotation record must serialize to an object, got {other}"
            ))),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.properties.get("id").and_then(Value::as_str)
    }

    pub fn document(&self) -> Option<&str> {
        self.properties.get("document").and_then(Value::as_str)
    }

    /// Decode the properties into a typed record
    pub fn decode<T: DeserializeOwned>(&self, view_id: &str) -> Result<T> {
        serde_json::from_value(Value::Object(self.properties.clone())).map_err(|e| {
            NelError::MalformedAnnotation {
                view: view_id.to_string(),
                annotation: self.id().unwrap_or("<unidentified>").to_string(),
                reason: e.to_string(),
            }
        })
    }
}

/// Qualify a document id with the view it lives in (`view:doc`)
pub fn qualify(view_id: Option<&str>, document: &str) -> String {
    match view_id {
        Some(view) => format!("{view}{ID_DELIMITER}{document}"),
        None => document.to_string(),
    }
}
