//! Marketplace application state and its reducer-style operations.
//!
//! Every mutating operation consumes the current [`MarketState`] and returns a
//! [`Transition`] holding the next state, the operation result and the remote
//! write (if any) that should be mirrored to the table store. Guard failures
//! return the state untouched together with an [`Ignored`] reason.

mod catalog;
mod chat;
pub mod mock;
mod profiles;
pub mod sync;

pub use catalog::CatalogFilter;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{Category, ChatMessage, Order, Product, ProfileFields, User};

pub const DEFAULT_CATEGORIES: [(&str, &str); 9] = [
    ("1", "Informática"),
    ("2", "Pet Shop"),
    ("3", "Smartphones"),
    ("4", "Farmácia"),
    ("5", "Produtos Naturais"),
    ("6", "Auto Peças Carro"),
    ("7", "Auto Peças Moto"),
    ("8", "Auto Peças Refrigeração"),
    ("9", "Outros"),
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketState {
    /// Every known profile. The shop directory is the `shop`-role subset.
    pub profiles: Vec<User>,
    /// Newest first.
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    /// Oldest first.
    pub chats: Vec<ChatMessage>,
    /// Newest first.
    pub orders: Vec<Order>,
}

/// Why an operation left the state unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Ignored {
    #[error("sign in required")]
    NoSession,
    #[error("only shops can list items")]
    NotAShop,
    #[error("item limit reached for the current plan")]
    LimitReached,
    #[error("admin only")]
    NotAdmin,
    #[error("unknown plan")]
    UnknownPlan,
    #[error("product not found")]
    UnknownProduct,
    #[error("category not found")]
    UnknownCategory,
    #[error("no sender for message")]
    NoSender,
    #[error("email or phone already belongs to another profile")]
    IdentifierTaken,
}

/// Write to mirror to the table store after a local commit.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteWrite {
    InsertProfile(User),
    UpdateProfile {
        id: String,
        fields: ProfileFields,
    },
    UpdatePlan {
        id: String,
        plan: String,
        expires_at: DateTime<Utc>,
    },
    InsertProduct(Product),
    UpdateProductCounters {
        id: String,
        views: Option<u64>,
        likes: Option<u64>,
    },
    InsertCategory(Category),
    DeleteCategory {
        id: String,
    },
    InsertChatMessage(ChatMessage),
    InsertOrder(Order),
}

impl RemoteWrite {
    pub fn entity(&self) -> sync::EntityRef {
        use sync::{EntityRef, Table};
        match self {
            RemoteWrite::InsertProfile(user) => EntityRef::new(Table::Profiles, &user.id),
            RemoteWrite::UpdateProfile { id, .. } | RemoteWrite::UpdatePlan { id, .. } => {
                EntityRef::new(Table::Profiles, id)
            }
            RemoteWrite::InsertProduct(product) => EntityRef::new(Table::Products, &product.id),
            RemoteWrite::UpdateProductCounters { id, .. } => EntityRef::new(Table::Products, id),
            RemoteWrite::InsertCategory(category) => {
                EntityRef::new(Table::Categories, &category.id)
            }
            RemoteWrite::DeleteCategory { id } => EntityRef::new(Table::Categories, id),
            RemoteWrite::InsertChatMessage(message) => {
                EntityRef::new(Table::ChatMessages, &message.id)
            }
            RemoteWrite::InsertOrder(order) => EntityRef::new(Table::Orders, &order.id),
        }
    }
}

#[derive(Debug)]
pub struct Transition<O> {
    pub state: MarketState,
    pub outcome: O,
    pub write: Option<RemoteWrite>,
}

impl<O> Transition<O> {
    fn new(state: MarketState, outcome: O, write: RemoteWrite) -> Self {
        Self {
            state,
            outcome,
            write: Some(write),
        }
    }

    fn local(state: MarketState, outcome: O) -> Self {
        Self {
            state,
            outcome,
            write: None,
        }
    }
}

impl<T> Transition<Result<T, Ignored>> {
    fn ignored(state: MarketState, reason: Ignored) -> Self {
        Self::local(state, Err(reason))
    }
}

impl MarketState {
    /// Empty catalog with the default category list.
    pub fn new() -> Self {
        Self {
            categories: default_categories(),
            ..Self::default()
        }
    }

    pub fn profile(&self, id: &str) -> Option<&User> {
        self.profiles.iter().find(|user| user.id == id)
    }

    pub fn find_by_identifier(&self, identifier: &str) -> Option<&User> {
        self.profiles
            .iter()
            .find(|user| user.matches_identifier(identifier))
    }

    pub fn shops(&self) -> impl Iterator<Item = &User> {
        self.profiles.iter().filter(|user| user.is_shop())
    }

    pub fn shop(&self, id: &str) -> Option<&User> {
        self.shops().find(|user| user.id == id)
    }

    /// Actor lookup shared by the guarded operations.
    fn actor(&self, actor: Option<&str>) -> Result<&User, Ignored> {
        actor
            .and_then(|id| self.profile(id))
            .ok_or(Ignored::NoSession)
    }
}

pub fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(id, name)| Category {
            id: (*id).to_string(),
            name: (*name).to_string(),
        })
        .collect()
}
