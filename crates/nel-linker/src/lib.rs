//! NEL Linker - Entity linking pipeline
//!
//! Links named entities found by an upstream NER app to knowledge-base
//! items and reports pairs of linked entities governed by the same
//! syntactic head. Results are written into new views; source views
//! are never modified.

use std::sync::Arc;

use futures::stream::{self, StreamExt, TryStreamExt};
use nel_core::ids::{ENTITY_LINK_PREFIX, ENTITY_RELATION_PREFIX};
use nel_core::metadata::APP_IDENTIFIER;
use nel_core::mmif::qualify;
use nel_core::{
    AnnotationType, AppMetadata, EntityLink, Identifiers, KbMatch, KnowledgeBase,
    KnowledgeBaseConfig, KnowledgeBaseProvider, LinkerConfig, Mmif, NamedEntity, NelError,
    Result, SyntacticRelation, View,
};

pub mod gazetteer;
pub mod output;
pub mod relation;
pub mod resolver;
pub mod scanner;
pub mod wikidata;

pub use gazetteer::Gazetteer;
pub use output::OutputView;
pub use relation::{RelationLinker, ResolvedEntity, Scope};
pub use resolver::EntityResolver;
pub use scanner::{scan, ScanTarget};
pub use wikidata::WikidataClient;

// ============================================================================
// Annotate Driver
// ============================================================================

/// The entity-linking app
pub struct NelApp {
    resolver: EntityResolver,
    config: LinkerConfig,
    metadata: AppMetadata,
}

impl NelApp {
    pub fn new(kb: Arc<dyn KnowledgeBase>, config: LinkerConfig) -> Self {
        let metadata = AppMetadata::entity_linking(config.emit_relations);
        Self {
            resolver: EntityResolver::new(kb),
            config,
            metadata,
        }
    }

    pub fn metadata(&self) -> &AppMetadata {
        &self.metadata
    }

    pub fn config(&self) -> &LinkerConfig {
        &self.config
    }

    /// Annotate a serialized container and serialize the result
    pub async fn annotate_json(&self, json: &str, pretty: bool) -> Result<String> {
        let mmif = Mmif::from_json(json)?;
        self.annotate(mmif).await?.to_json(pretty)
    }

    /// Annotate a container with fresh identifier counters
    pub async fn annotate(&self, mmif: Mmif) -> Result<Mmif> {
        let mut ids = Identifiers::new();
        self.annotate_with(mmif, &mut ids).await
    }

    /// Annotate a container, resetting `ids` before any view is processed
    pub async fn annotate_with(&self, mut mmif: Mmif, ids: &mut Identifiers) -> Result<Mmif> {
        ids.reset();

        let targets = scan(&mmif, &self.config.upstream_app_marker);
        if targets.is_empty() {
            tracing::info!(
                marker = %self.config.upstream_app_marker,
                "No entity views to link"
            );
        }

        for target in &targets {
            let view_id = mmif.new_view_id();
            let view = self
                .link_view(&mmif.views[target.view_index], target, view_id, ids)
                .await?;
            mmif.views.push(view);
        }

        Ok(mmif)
    }

    /// Build the output view for one source view
    async fn link_view(
        &self,
        source: &View,
        target: &ScanTarget,
        view_id: String,
        ids: &mut Identifiers,
    ) -> Result<View> {
        let qualifier = target.document_qualifier();
        let mut output = OutputView::open(
            view_id,
            APP_IDENTIFIER,
            target.document.as_deref(),
            self.config.emit_relations,
        );
        let mut linker = RelationLinker::new();

        let mut mentions: Vec<NamedEntity> = Vec::new();
        for annotation in &source.annotations {
            match annotation.at_type {
                AnnotationType::NamedEntity => mentions.push(annotation.decode(&source.id)?),
                AnnotationType::SyntacticRelation if self.config.emit_relations => {
                    let edge: SyntacticRelation = annotation.decode(&source.id)?;
                    linker.add_dependency(Scope::of(edge.document.as_deref()), edge);
                }
                _ => {}
            }
        }

        let matches = self.resolve_all(&mentions).await?;

        for (mention, found) in mentions.into_iter().zip(matches) {
            let Some(found) = found else {
                tracing::debug!(text = %mention.text, view = %source.id, "No knowledge-base match");
                continue;
            };

            let link = EntityLink {
                root_i: mention.root_i,
                text: mention.text.clone(),
                label: found.label.clone(),
                category: mention.category.clone(),
                description: found.description.clone(),
                wikidata_id: found.id.clone(),
                url: found.url.clone(),
            };
            let document = mention
                .document
                .as_deref()
                .map(|document| qualify(qualifier, document));
            output.write_entity_link(
                ids.next(ENTITY_LINK_PREFIX),
                document,
                mention.start,
                mention.end,
                &link,
            )?;

            linker.add_entity(
                Scope::of(mention.document.as_deref()),
                ResolvedEntity {
                    text: mention.text,
                    root_i: mention.root_i,
                    kb: found,
                },
            );
        }

        if self.config.emit_relations {
            for (scope, relation) in linker.relations() {
                output.write_relation(
                    ids.next(ENTITY_RELATION_PREFIX),
                    scope.document_id(qualifier),
                    &relation,
                )?;
            }
        }

        tracing::info!(
            source = %source.id,
            view = %output.id(),
            links = output.link_count(),
            relations = output.relation_count(),
            kb = %self.resolver.backend(),
            "Linked entity view"
        );

        Ok(output.into_view())
    }

    /// Resolve mentions in order, with bounded concurrency
    async fn resolve_all(&self, mentions: &[NamedEntity]) -> Result<Vec<Option<KbMatch>>> {
        let limit = self.config.max_concurrent_lookups.max(1);
        let lookups: Vec<_> = mentions
            .iter()
            .map(|mention| self.resolver.resolve(&mention.text))
            .collect();
        stream::iter(lookups)
            .buffered(limit)
            .try_collect()
            .await
    }
}

// ============================================================================
// Factory function
// ============================================================================

/// Create a knowledge base from config
pub fn create_knowledge_base(config: &KnowledgeBaseConfig) -> Result<Arc<dyn KnowledgeBase>> {
    match config.provider {
        KnowledgeBaseProvider::Wikidata => Ok(Arc::new(WikidataClient::from_config(config)?)),
        KnowledgeBaseProvider::Gazetteer => {
            let path = config.gazetteer_path.as_ref().ok_or_else(|| {
                NelError::ConfigError("gazetteer_path required for gazetteer provider".to_string())
            })?;
            Ok(Arc::new(Gazetteer::from_file(path)?))
        }
    }
}
