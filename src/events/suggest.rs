//! Related-product suggestions on arrival.

use std::collections::HashSet;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::core::{Catalog, Product, ShoppingList};
use crate::pathfinding::STEP_DISTANCE_M;

/// Product keyword to the keywords of products that go with it
const AFFINITIES: &[(&str, &[&str])] = &[
    ("bread", &["jam", "butter", "cheese", "milk"]),
    ("milk", &["cereal", "bread", "yogurt", "cheese"]),
    ("pasta", &["sauce", "cheese", "olive oil", "garlic"]),
    ("chicken", &["rice", "vegetables", "sauce", "spices"]),
    ("eggs", &["bread", "milk", "cheese", "bacon"]),
    ("tomatoes", &["pasta", "cheese", "basil", "olive oil"]),
    ("potatoes", &["chicken", "vegetables", "butter", "cheese"]),
    ("onions", &["pasta", "chicken", "vegetables", "garlic"]),
    ("garlic", &["pasta", "chicken", "vegetables", "olive oil"]),
    ("cheese", &["bread", "pasta", "milk", "eggs"]),
];

/// A product offered to the shopper
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductSuggestion {
    /// Suggested product
    pub product: Product,
    /// Why it was suggested
    pub reason: String,
    /// Walking distance from the reached product, in meters
    pub distance: u32,
    /// Product whose arrival triggered the suggestion
    pub source_id: String,
}

/// Keywords related to a product name: the first affinity key the name
/// contains wins.
fn related_keywords(name: &str) -> Option<&'static [&'static str]> {
    let name = name.to_lowercase();
    AFFINITIES
        .iter()
        .find(|(key, _)| name.contains(key))
        .map(|(_, related)| *related)
}

/// Builds suggestions and remembers declined products for the session
#[derive(Clone, Debug)]
pub struct SuggestionEngine {
    max_suggestions: usize,
    declined: HashSet<String>,
}

impl SuggestionEngine {
    /// Create an engine returning at most `max_suggestions` per arrival
    pub fn new(max_suggestions: usize) -> Self {
        Self {
            max_suggestions,
            declined: HashSet::new(),
        }
    }

    /// Never suggest this product again
    pub fn decline(&mut self, id: impl Into<String>) {
        self.declined.insert(id.into());
    }

    /// Has a product been declined?
    pub fn is_declined(&self, id: &str) -> bool {
        self.declined.contains(id)
    }

    /// Forget all declines
    pub fn clear(&mut self) {
        self.declined.clear();
    }

    /// Suggestions for a just-reached product, nearest first.
    ///
    /// Candidates come from the catalog and must not be on the shopping
    /// list, be the reached product, or have been declined. They match by
    /// category or by keyword affinity. Candidates without a location are
    /// skipped.
    ///
    /// Distances run from the reached product's shelf to each candidate's
    /// catalog location, not to a grid placement.
    pub fn suggest(
        &self,
        reached: &Product,
        catalog: &Catalog,
        shopping: &ShoppingList,
    ) -> Vec<ProductSuggestion> {
        let Some(origin) = reached.location else {
            return Vec::new();
        };
        let related = related_keywords(&reached.name);

        let mut suggestions: Vec<ProductSuggestion> = catalog
            .iter()
            .filter(|p| {
                p.id != reached.id && !shopping.contains(&p.id) && !self.declined.contains(&p.id)
            })
            .filter_map(|candidate| {
                let location = candidate.location?;
                let reason = if candidate.category == reached.category {
                    format!("Related {} item", candidate.category)
                } else {
                    let name = candidate.name.to_lowercase();
                    related?.iter().find(|kw| name.contains(*kw))?;
                    format!("Perfect with {}!", reached.name)
                };
                Some(ProductSuggestion {
                    product: candidate.clone(),
                    reason,
                    distance: origin.manhattan_distance(&location).unsigned_abs() * STEP_DISTANCE_M,
                    source_id: reached.id.clone(),
                })
            })
            .collect();

        suggestions.sort_by_key(|s| s.distance);
        suggestions.truncate(self.max_suggestions);

        trace!(
            "[Suggest] {} suggestions for '{}'",
            suggestions.len(),
            reached.name
        );
        suggestions
    }
}
