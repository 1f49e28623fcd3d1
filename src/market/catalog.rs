use chrono::{DateTime, Utc};

use super::{Ignored, MarketState, RemoteWrite, Transition};
use crate::{
    ids,
    models::{Category, NewProduct, Product},
    plans, policy,
};

/// Category value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

/// Client-side style catalog filter: category plus free-text query over
/// title, brand and model.
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    pub category: Option<String>,
    pub query: Option<String>,
}

impl CatalogFilter {
    pub fn matches(&self, product: &Product) -> bool {
        let category_ok = match self.category.as_deref() {
            None | Some("") | Some(ALL_CATEGORIES) => true,
            Some(category) => product.category == category,
        };
        if !category_ok {
            return false;
        }

        let query = match self.query.as_deref().map(str::trim) {
            None | Some("") => return true,
            Some(query) => query.to_lowercase(),
        };
        let contains = |field: &str| field.to_lowercase().contains(&query);
        contains(&product.title)
            || product.brand.as_deref().is_some_and(contains)
            || product.model.as_deref().is_some_and(contains)
    }
}

impl MarketState {
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    pub fn search(&self, filter: &CatalogFilter) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| filter.matches(product))
            .collect()
    }

    pub fn products_of(&self, shop_id: &str) -> impl Iterator<Item = &Product> {
        self.products
            .iter()
            .filter(move |product| product.shop_id == shop_id)
    }

    pub fn count_products_of(&self, shop_id: &str) -> usize {
        self.products_of(shop_id).count()
    }

    /// Lists a new item for the acting shop unless its plan quota is used up.
    pub fn add_product(
        mut self,
        actor: Option<&str>,
        input: NewProduct,
        now: DateTime<Utc>,
    ) -> Transition<Result<Product, Ignored>> {
        let shop = match self.actor(actor).cloned() {
            Ok(user) if user.is_shop() => user,
            Ok(_) => return Transition::ignored(self, Ignored::NotAShop),
            Err(reason) => return Transition::ignored(self, reason),
        };

        let plan = plans::resolve_plan(shop.plan.as_deref());
        let used = u32::try_from(self.count_products_of(&shop.id)).unwrap_or(u32::MAX);
        let (limit_reached, _) = policy::quota_flags(plan, used);
        if limit_reached {
            return Transition::ignored(self, Ignored::LimitReached);
        }

        let product = Product {
            id: ids::entity_id(),
            shop_id: shop.id.clone(),
            shop_name: shop.display_name().to_string(),
            title: input.title,
            description: input.description,
            price: input.price,
            image_url: input.image_url,
            category: input.category,
            brand: input.brand.filter(|b| !b.is_empty()),
            model: input.model.filter(|m| !m.is_empty()),
            views: 0,
            likes: 0,
            created_at: now,
        };
        self.products.insert(0, product.clone());
        Transition::new(self, Ok(product.clone()), RemoteWrite::InsertProduct(product))
    }

    pub fn like_product(self, id: &str) -> Transition<Result<Product, Ignored>> {
        self.bump(id, |product| product.likes += 1, |product| (None, Some(product.likes)))
    }

    pub fn view_product(self, id: &str) -> Transition<Result<Product, Ignored>> {
        self.bump(id, |product| product.views += 1, |product| (Some(product.views), None))
    }

    fn bump(
        mut self,
        id: &str,
        increment: impl FnOnce(&mut Product),
        counters: impl FnOnce(&Product) -> (Option<u64>, Option<u64>),
    ) -> Transition<Result<Product, Ignored>> {
        let Some(product) = self.products.iter_mut().find(|product| product.id == id) else {
            return Transition::ignored(self, Ignored::UnknownProduct);
        };
        increment(product);
        let updated = product.clone();
        let (views, likes) = counters(&updated);
        Transition::new(
            self,
            Ok(updated),
            RemoteWrite::UpdateProductCounters {
                id: id.to_string(),
                views,
                likes,
            },
        )
    }

    pub fn add_category(
        mut self,
        actor: Option<&str>,
        name: &str,
    ) -> Transition<Result<Category, Ignored>> {
        match self.actor(actor).map(|user| user.is_admin()) {
            Ok(true) => {}
            Ok(false) => return Transition::ignored(self, Ignored::NotAdmin),
            Err(reason) => return Transition::ignored(self, reason),
        }
        let category = Category {
            id: ids::entity_id(),
            name: name.trim().to_string(),
        };
        self.categories.push(category.clone());
        Transition::new(self, Ok(category.clone()), RemoteWrite::InsertCategory(category))
    }

    pub fn remove_category(
        mut self,
        actor: Option<&str>,
        id: &str,
    ) -> Transition<Result<Category, Ignored>> {
        match self.actor(actor).map(|user| user.is_admin()) {
            Ok(true) => {}
            Ok(false) => return Transition::ignored(self, Ignored::NotAdmin),
            Err(reason) => return Transition::ignored(self, reason),
        }
        let Some(index) = self.categories.iter().position(|category| category.id == id) else {
            return Transition::ignored(self, Ignored::UnknownCategory);
        };
        let removed = self.categories.remove(index);
        Transition::new(
            self,
            Ok(removed),
            RemoteWrite::DeleteCategory { id: id.to_string() },
        )
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::models::UserRole;

    fn item(title: &str, brand: Option<&str>, model: Option<&str>, category: &str) -> Product {
        Product {
            id: title.to_lowercase(),
            shop_id: "shop1".into(),
            shop_name: "Shop".into(),
            title: title.into(),
            description: String::new(),
            price: Decimal::new(100, 0),
            image_url: String::new(),
            category: category.into(),
            brand: brand.map(str::to_string),
            model: model.map(str::to_string),
            views: 0,
            likes: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn filter_matches_title_brand_and_model_case_insensitively() {
        let deck = item("Cyber Deck", Some("Arasaka"), Some("MK-IV"), "Informática");
        let by_brand = CatalogFilter {
            query: Some("arasaka".into()),
            ..CatalogFilter::default()
        };
        let by_model = CatalogFilter {
            query: Some("mk-iv".into()),
            ..CatalogFilter::default()
        };
        let miss = CatalogFilter {
            query: Some("jaqueta".into()),
            ..CatalogFilter::default()
        };
        assert!(by_brand.matches(&deck));
        assert!(by_model.matches(&deck));
        assert!(!miss.matches(&deck));
    }

    #[test]
    fn filter_by_category_and_all() {
        let deck = item("Cyber Deck", None, None, "Informática");
        let all = CatalogFilter {
            category: Some(ALL_CATEGORIES.into()),
            query: None,
        };
        let pets = CatalogFilter {
            category: Some("Pet Shop".into()),
            query: None,
        };
        assert!(all.matches(&deck));
        assert!(!pets.matches(&deck));
    }

    #[test]
    fn remove_category_requires_admin() {
        let now = Utc::now();
        let t = MarketState::new().login("buyer", UserRole::User, None, None, now);
        let buyer = t.outcome.id.clone();
        let t = t.state.remove_category(Some(&buyer), "1");
        assert_eq!(t.outcome, Err(Ignored::NotAdmin));
        assert_eq!(t.state.categories.len(), 9);
        assert!(t.write.is_none());

        let t = t.state.login("admin", UserRole::User, None, None, now);
        let admin = t.outcome.id.clone();
        let t = t.state.remove_category(Some(&admin), "1");
        assert_eq!(t.outcome.map(|c| c.name), Ok("Informática".to_string()));
        assert_eq!(t.state.categories.len(), 8);
    }
}
