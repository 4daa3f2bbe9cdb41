//! View scanning
//!
//! Finds the views produced by the upstream NER app and works out which
//! text document their entities were recognized in.

use nel_core::mmif::qualify;
use nel_core::vocab::{self, NAMED_ENTITY};
use nel_core::{Mmif, View};

/// A source view eligible for entity linking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTarget {
    /// Position of the source view in the container
    pub view_index: usize,

    /// Source view id
    pub view_id: String,

    /// Qualified document id declared by the view (`view:doc`), if any
    pub document: Option<String>,
}

impl ScanTarget {
    /// View id used to qualify per-annotation document ids.
    ///
    /// Only set when the view did not declare a document of its own.
    pub fn document_qualifier(&self) -> Option<&str> {
        match self.document {
            Some(_) => None,
            None => Some(&self.view_id),
        }
    }
}

/// List eligible views in container order
pub fn scan(mmif: &Mmif, upstream_marker: &str) -> Vec<ScanTarget> {
    mmif.views
        .iter()
        .enumerate()
        .filter(|(_, view)| is_eligible(view, upstream_marker))
        .map(|(index, view)| ScanTarget {
            view_index: index,
            view_id: view.id.clone(),
            document: declared_document(view),
        })
        .collect()
}

/// Produced by the upstream app and declares entity annotations
fn is_eligible(view: &View, upstream_marker: &str) -> bool {
    view.metadata.app.contains(upstream_marker)
        && view
            .metadata
            .contains
            .by_basename(vocab::basename(NAMED_ENTITY))
            .next()
            .is_some()
}

fn declared_document(view: &View) -> Option<String> {
    view.metadata
        .contains
        .by_basename(vocab::basename(NAMED_ENTITY))
        .filter_map(|contain| contain.document.as_deref())
        .last()
        .map(|document| qualify(Some(&view.id), document))
}
