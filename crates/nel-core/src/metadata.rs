//! App metadata declaration
//!
//! Static description of this app's identity and its input/output types,
//! served to pipeline orchestrators.

use serde::{Deserialize, Serialize};

use crate::vocab::{
    LINKED_NAMED_ENTITY, LINKED_NAMED_ENTITY_RELATION, NAMED_ENTITY,
};

pub const APP_IDENTIFIER: &str = "https://apps.clams.ai/named_entity_linking";
pub const APP_VERSION: &str = "0.0.8";
pub const APP_LICENSE: &str = "Apache 2.0";
pub const MMIF_VERSION: &str = "0.4.0";
pub const ANALYZER_VERSION: &str = "3.1.2";
pub const ANALYZER_LICENSE: &str = "MIT";

/// Declared input or output type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    #[serde(rename = "@type")]
    pub at_type: String,
}

impl TypeDeclaration {
    fn of(uri: &str) -> Self {
        Self {
            at_type: uri.to_string(),
        }
    }
}

/// App identity, version, license and declared I/O types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppMetadata {
    pub identifier: String,
    pub url: String,
    pub name: String,
    pub description: String,
    pub app_version: String,
    pub app_license: String,
    pub analyzer_version: String,
    pub analyzer_license: String,
    pub mmif_version: String,
    pub input: Vec<TypeDeclaration>,
    pub output: Vec<TypeDeclaration>,
}

impl AppMetadata {
    /// Metadata for the linker; relation output is declared only when enabled
    pub fn entity_linking(emit_relations: bool) -> Self {
        let mut output = vec![TypeDeclaration::of(LINKED_NAMED_ENTITY)];
        if emit_relations {
            output.push(TypeDeclaration::of(LINKED_NAMED_ENTITY_RELATION));
        }

        Self {
            identifier: APP_IDENTIFIER.to_string(),
            url: "https://github.com/JinnyViboonlarp/app-nel".to_string(),
            name: "NEL with Wikidata".to_string(),
            description:
                "Link all named entities in an MMIF file with its wikidata's information."
                    .to_string(),
            app_version: APP_VERSION.to_string(),
            app_license: APP_LICENSE.to_string(),
            analyzer_version: ANALYZER_VERSION.to_string(),
            analyzer_license: ANALYZER_LICENSE.to_string(),
            mmif_version: MMIF_VERSION.to_string(),
            input: vec![TypeDeclaration::of(NAMED_ENTITY)],
            output,
        }
    }
}
