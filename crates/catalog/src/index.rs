use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use partkeep_ledger::{ChangeListener, Part, PartStore, StoreError};

/// Sentinel facet value matching every part.
pub const ALL: &str = "all";

/// De-duplicated facet value sets for filter enumeration.
///
/// Each list leads with the `ALL` sentinel, keeps first-seen order, and
/// drops blank values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogIndex {
    suppliers: Vec<String>,
    locations: Vec<String>,
    categories: Vec<String>,
}

impl CatalogIndex {
    pub fn from_parts(parts: &[Part]) -> Self {
        Self {
            suppliers: facet_values(parts, |p| p.supplier()),
            locations: facet_values(parts, |p| p.location()),
            categories: facet_values(parts, |p| p.category()),
        }
    }

    pub fn suppliers(&self) -> &[String] {
        &self.suppliers
    }

    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }
}

fn facet_values<'a>(parts: &'a [Part], field: impl Fn(&'a Part) -> &'a str) -> Vec<String> {
    let mut values = vec![ALL.to_string()];
    for part in parts {
        let value = field(part);
        if value.is_empty() {
            continue;
        }
        if !values.iter().any(|existing| existing == value) {
            values.push(value.to_string());
        }
    }
    values
}

/// Combined catalog filter: text search AND three facet equalities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartFilter {
    /// Case-insensitive substring matched against name, part number and
    /// description. Empty matches everything.
    #[serde(default)]
    pub query: String,
    #[serde(default = "all_sentinel")]
    pub supplier: String,
    #[serde(default = "all_sentinel")]
    pub location: String,
    #[serde(default = "all_sentinel")]
    pub category: String,
}

fn all_sentinel() -> String {
    ALL.to_string()
}

impl Default for PartFilter {
    fn default() -> Self {
        Self {
            query: String::new(),
            supplier: all_sentinel(),
            location: all_sentinel(),
            category: all_sentinel(),
        }
    }
}

impl PartFilter {
    pub fn matches(&self, part: &Part) -> bool {
        let query = self.query.to_lowercase();
        let text_match = part.name().to_lowercase().contains(&query)
            || part.part_number().to_lowercase().contains(&query)
            || part.description().to_lowercase().contains(&query);

        text_match
            && facet_matches(&self.supplier, part.supplier())
            && facet_matches(&self.location, part.location())
            && facet_matches(&self.category, part.category())
    }

    pub fn apply<'a>(&self, parts: &'a [Part]) -> Vec<&'a Part> {
        parts.iter().filter(|part| self.matches(part)).collect()
    }
}

fn facet_matches(selected: &str, value: &str) -> bool {
    selected == ALL || selected == value
}

/// Read-side projection keeping a `CatalogIndex` in sync with a `PartStore`.
///
/// The index is disposable and rebuilt wholesale from the latest snapshot on
/// every change notification; it holds no state needing reconciliation.
pub struct CatalogProjection<S: PartStore> {
    store: Arc<S>,
    index: RwLock<CatalogIndex>,
}

impl<S: PartStore> CatalogProjection<S> {
    /// The index starts empty; call `refresh` (or wire the projection into
    /// the store's change hook) to populate it.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            index: RwLock::new(CatalogIndex::default()),
        }
    }

    /// Recompute the index from the store's current part set.
    pub fn refresh(&self) -> Result<(), StoreError> {
        let parts = self.store.load_all()?;
        let rebuilt = CatalogIndex::from_parts(&parts);
        if let Ok(mut index) = self.index.write() {
            *index = rebuilt;
        }
        Ok(())
    }

    pub fn index(&self) -> CatalogIndex {
        self.index
            .read()
            .map(|index| index.clone())
            .unwrap_or_default()
    }
}

impl<S: PartStore + 'static> ChangeListener for CatalogProjection<S> {
    fn parts_changed(&self) {
        if let Err(err) = self.refresh() {
            tracing::warn!(%err, "catalog index refresh failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use partkeep_core::PartId;
    use partkeep_ledger::{InMemoryPartStore, Ledger, PartSpec};

    fn spec(name: &str, supplier: &str, location: &str, category: &str) -> PartSpec {
        PartSpec {
            name: name.to_string(),
            part_number: format!("PN-{name}"),
            description: format!("{name} description"),
            category: category.to_string(),
            supplier: supplier.to_string(),
            location: location.to_string(),
            quantity: 1,
            min_stock: 0,
            max_stock: 0,
        }
    }

    fn part(name: &str, supplier: &str, location: &str, category: &str) -> Part {
        Part::create(PartId::new(), spec(name, supplier, location, category)).unwrap()
    }

    fn sample_parts() -> Vec<Part> {
        vec![
            part("Bearing", "SKF", "A1", "Bearings"),
            part("Seal", "Parker", "A1", "Seals"),
            part("Bolt M8", "SKF", "B2", "Fasteners"),
        ]
    }

    #[test]
    fn facets_lead_with_all_and_dedupe_in_first_seen_order() {
        let index = CatalogIndex::from_parts(&sample_parts());
        assert_eq!(index.suppliers(), ["all", "SKF", "Parker"]);
        assert_eq!(index.locations(), ["all", "A1", "B2"]);
        assert_eq!(index.categories(), ["all", "Bearings", "Seals", "Fasteners"]);
    }

    #[test]
    fn default_filter_matches_everything() {
        let parts = sample_parts();
        assert_eq!(PartFilter::default().apply(&parts).len(), parts.len());
    }

    #[test]
    fn query_is_case_insensitive_over_name_number_and_description() {
        let parts = sample_parts();

        let by_name = PartFilter {
            query: "bEaRiNg".to_string(),
            ..PartFilter::default()
        };
        assert_eq!(by_name.apply(&parts).len(), 1);

        let by_number = PartFilter {
            query: "pn-bolt".to_string(),
            ..PartFilter::default()
        };
        assert_eq!(by_number.apply(&parts).len(), 1);

        let by_description = PartFilter {
            query: "seal description".to_string(),
            ..PartFilter::default()
        };
        assert_eq!(by_description.apply(&parts).len(), 1);
    }

    #[test]
    fn facets_and_query_combine_with_and() {
        let parts = sample_parts();
        let filter = PartFilter {
            query: "b".to_string(),
            supplier: "SKF".to_string(),
            location: "A1".to_string(),
            ..PartFilter::default()
        };

        let matched = filter.apply(&parts);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name(), "Bearing");
    }

    #[test]
    fn non_matching_facet_excludes_despite_text_match() {
        let parts = sample_parts();
        let filter = PartFilter {
            query: "bearing".to_string(),
            supplier: "Parker".to_string(),
            ..PartFilter::default()
        };
        assert!(filter.apply(&parts).is_empty());
    }

    #[test]
    fn projection_refreshes_through_the_change_hook() {
        let store = Arc::new(InMemoryPartStore::new());
        let projection = Arc::new(CatalogProjection::new(Arc::clone(&store)));
        store.subscribe(projection.clone());

        let ledger = Ledger::new(Arc::clone(&store));
        ledger
            .create_part(spec("Bearing", "SKF", "A1", "Bearings"))
            .unwrap();
        ledger
            .create_part(spec("Seal", "Parker", "B2", "Seals"))
            .unwrap();

        let index = projection.index();
        assert_eq!(index.suppliers(), ["all", "SKF", "Parker"]);
        assert_eq!(index.categories(), ["all", "Bearings", "Seals"]);
    }
}
