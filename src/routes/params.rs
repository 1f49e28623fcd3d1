use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::market::CatalogFilter;

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

impl Pagination {
    pub fn normalize(&self) -> (u64, u64, u64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1).saturating_mul(per_page);
        (page, per_page, offset)
    }

    /// Slices an already ordered list to the requested page.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        let (_, per_page, offset) = self.normalize();
        items
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(per_page).unwrap_or(usize::MAX))
            .collect()
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    /// Case-insensitive match on title, brand and model.
    pub q: Option<String>,
    /// Category name, or `all`.
    pub category: Option<String>,
}

impl ProductQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }

    pub fn filter(&self) -> CatalogFilter {
        CatalogFilter {
            category: self.category.clone(),
            query: self.q.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderListQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub status: Option<String>,
}

impl OrderListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_clamps_and_slices() {
        let p = Pagination {
            page: Some(2),
            per_page: Some(2),
        };
        assert_eq!(p.normalize(), (2, 2, 2));
        assert_eq!(p.apply(vec![1, 2, 3, 4, 5]), vec![3, 4]);

        let p = Pagination {
            page: Some(0),
            per_page: Some(1000),
        };
        assert_eq!(p.normalize(), (1, 100, 0));
    }

    #[test]
    fn huge_page_yields_empty_slice() {
        let p = Pagination {
            page: Some(u64::MAX),
            per_page: Some(20),
        };
        assert_eq!(p.normalize(), (u64::MAX, 20, u64::MAX));
        assert!(p.apply(vec![1, 2, 3]).is_empty());
    }
}
