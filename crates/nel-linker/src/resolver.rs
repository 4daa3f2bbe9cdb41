//! Entity resolution against a knowledge base

use std::sync::Arc;

use nel_core::{KbMatch, KnowledgeBase, Result, SearchQuery};

/// Resolves entity mentions to their top-ranked knowledge-base item
#[derive(Clone)]
pub struct EntityResolver {
    kb: Arc<dyn KnowledgeBase>,
}

impl EntityResolver {
    pub fn new(kb: Arc<dyn KnowledgeBase>) -> Self {
        Self { kb }
    }

    /// Look up a surface text; `None` means no link was found
    pub async fn resolve(&self, text: &str) -> Result<Option<KbMatch>> {
        let candidates = self.kb.search(&SearchQuery::item(text)).await?;
        Ok(candidates.into_iter().next())
    }

    /// Name of the backing knowledge base
    pub fn backend(&self) -> &str {
        self.kb.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gazetteer::Gazetteer;

    fn paris() -> KbMatch {
        KbMatch {
            id: Some("Q90".to_string()),
            label: Some("Paris".to_string()),
            description: Some("capital of France".to_string()),
            url: Some("//www.wikidata.org/wiki/Q90".to_string()),
        }
    }

    #[tokio::test]
    async fn test_takes_first_candidate() {
        let kb = Gazetteer::new()
            .with_entry("Paris", paris())
            .with_entry(
                "Paris",
                KbMatch {
                    id: Some("Q167646".to_string()),
                    ..Default::default()
                },
            );
        let resolver = EntityResolver::new(Arc::new(kb));

        assert_eq!(resolver.resolve("Paris").await.unwrap(), Some(paris()));
        assert_eq!(resolver.backend(), "gazetteer");
    }

    #[tokio::test]
    async fn test_no_candidates_is_not_an_error() {
        let resolver = EntityResolver::new(Arc::new(Gazetteer::new()));
        assert_eq!(resolver.resolve("Atlantis").await.unwrap(), None);
    }
}
