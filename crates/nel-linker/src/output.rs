//! Output view assembly
//!
//! Opens the view this app writes into and appends entity-link and
//! entity-relation records to it.

use nel_core::{Annotation, AnnotationType, EntityLink, EntityRelation, Result, View};
use serde::Serialize;

/// A new view being filled by one linking pass
#[derive(Debug)]
pub struct OutputView {
    view: View,
    links: usize,
    relations: usize,
}

impl OutputView {
    /// Create a view signed by `app` declaring the output types.
    ///
    /// `document` scopes the declarations; `None` means they apply across the view.
    pub fn open(
        id: impl Into<String>,
        app: &str,
        document: Option<&str>,
        with_relations: bool,
    ) -> Self {
        let mut view = View::new(id, app);
        view.new_contain(AnnotationType::EntityLink, document.map(str::to_string));
        if with_relations {
            view.new_contain(AnnotationType::EntityRelation, document.map(str::to_string));
        }

        Self {
            view,
            links: 0,
            relations: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.view.id
    }

    /// Append an entity-link record
    pub fn write_entity_link(
        &mut self,
        id: String,
        document: Option<String>,
        start: Option<u64>,
        end: Option<u64>,
        link: &EntityLink,
    ) -> Result<()> {
        self.write(AnnotationType::EntityLink, id, document, start, end, link)?;
        self.links += 1;
        Ok(())
    }

    /// Append an entity-relation record (relations carry no offsets)
    pub fn write_relation(
        &mut self,
        id: String,
        document: Option<String>,
        relation: &EntityRelation,
    ) -> Result<()> {
        self.write(AnnotationType::EntityRelation, id, document, None, None, relation)?;
        self.relations += 1;
        Ok(())
    }

    fn write<T: Serialize>(
        &mut self,
        at_type: AnnotationType,
        id: String,
        document: Option<String>,
        start: Option<u64>,
        end: Option<u64>,
        record: &T,
    ) -> Result<()> {
        let mut annotation = Annotation::new(at_type, id);
        if let Some(document) = document {
            annotation.add_property("document", document);
        }
        if let Some(start) = start {
            annotation.add_property("start", start);
        }
        if let Some(end) = end {
            annotation.add_property("end", end);
        }
        annotation.extend_properties(record)?;
        self.view.add_annotation(annotation);
        Ok(())
    }

    pub fn link_count(&self) -> usize {
        self.links
    }

    pub fn relation_count(&self) -> usize {
        self.relations
    }

    pub fn into_view(self) -> View {
        self.view
    }
}
