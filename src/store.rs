//! Process-wide store: owns the market state, sessions and the sync ledger.
//!
//! Every operation commits to local state first and only then mirrors the
//! resulting write to the table store. Remote failures never roll back the
//! local commit; they are logged and recorded in the [`SyncLedger`].

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::{
    ids,
    market::{
        Ignored, MarketState, RemoteWrite, Transition,
        sync::{SyncLedger, SyncReport, SyncState},
    },
    models::{Category, ChatMessage, GuestInfo, NewProduct, Order, Product, ProfileFields, User, UserRole},
    persistence::{
        PersistenceError, SharedTableStore, TableStore,
        rows::{CounterPatchRow, ProfilePatchRow, ProfileRow},
    },
};

/// Result of a store operation plus the mirror outcome of its remote write.
#[derive(Debug)]
pub struct Committed<T> {
    pub value: T,
    /// `None` when the operation produced no remote write.
    pub sync: Option<SyncState>,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub user: User,
}

pub struct Store {
    state: RwLock<MarketState>,
    sessions: RwLock<HashMap<String, String>>,
    ledger: RwLock<SyncLedger>,
    backend: Option<SharedTableStore>,
}

impl Store {
    pub fn new(state: MarketState, backend: Option<SharedTableStore>) -> Self {
        Self {
            state: RwLock::new(state),
            sessions: RwLock::new(HashMap::new()),
            ledger: RwLock::new(SyncLedger::default()),
            backend,
        }
    }

    /// In-memory store seeded with demo data.
    pub fn mock() -> Self {
        Self::new(MarketState::seeded(Utc::now()), None)
    }

    /// Loads the initial state once: from the table store when one is
    /// configured, otherwise from the demo seed.
    pub async fn bootstrap(backend: Option<SharedTableStore>) -> Self {
        let state = match &backend {
            None => {
                info!("no table store configured; running on mock data");
                MarketState::seeded(Utc::now())
            }
            Some(store) => load_remote(store.as_ref()).await,
        };
        Self::new(state, backend)
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.as_ref().map_or("mock", |store| store.name())
    }

    /// Runs `f` against a read-only view of the current state.
    pub async fn read<R>(&self, f: impl FnOnce(&MarketState) -> R) -> R {
        let state = self.state.read().await;
        f(&state)
    }

    async fn commit<O>(&self, reduce: impl FnOnce(MarketState) -> Transition<O>) -> Committed<O> {
        let (outcome, write) = {
            let mut guard = self.state.write().await;
            let current = std::mem::take(&mut *guard);
            let Transition {
                state,
                outcome,
                write,
            } = reduce(current);
            *guard = state;
            (outcome, write)
        };

        let sync = match write {
            Some(write) => Some(self.mirror(write).await),
            None => None,
        };
        Committed {
            value: outcome,
            sync,
        }
    }

    async fn mirror(&self, write: RemoteWrite) -> SyncState {
        let entity = write.entity();
        let state = match &self.backend {
            None => SyncState::LocalOnly,
            Some(store) => match apply_write(store.as_ref(), &write).await {
                Ok(()) => SyncState::Synced { at: Utc::now() },
                Err(err) => {
                    warn!(
                        table = %entity.table,
                        id = %entity.id,
                        error = %err,
                        "remote write failed; keeping local state"
                    );
                    SyncState::Failed {
                        at: Utc::now(),
                        error: err.to_string(),
                    }
                }
            },
        };
        self.ledger.write().await.record(entity, state.clone());
        state
    }

    pub async fn sync_report(&self) -> SyncReport {
        self.ledger.read().await.report(self.backend_name())
    }

    /// Signs in by phone or email, registering a new profile when none matches.
    pub async fn login(
        &self,
        identifier: &str,
        role: UserRole,
        registration: Option<ProfileFields>,
    ) -> Committed<Session> {
        let known_locally = self
            .read(|state| state.find_by_identifier(identifier).is_some())
            .await;
        let remote_match = match (&self.backend, known_locally) {
            (Some(store), false) => match store.find_profile(identifier).await {
                Ok(row) => row.map(User::from),
                Err(err) => {
                    warn!(error = %err, "profile lookup failed; registering locally");
                    None
                }
            },
            _ => None,
        };

        let now = Utc::now();
        let committed = self
            .commit(|state| state.login(identifier, role, registration, remote_match, now))
            .await;
        let user = committed.value;

        let session_id = ids::session_id();
        self.sessions
            .write()
            .await
            .insert(session_id.clone(), user.id.clone());
        info!(user_id = %user.id, role = user.role.as_str(), "session started");

        Committed {
            value: Session {
                id: session_id,
                user,
            },
            sync: committed.sync,
        }
    }

    pub async fn logout(&self, session_id: &str) -> bool {
        self.sessions.write().await.remove(session_id).is_some()
    }

    /// Current profile behind a live session.
    pub async fn session_user(&self, session_id: &str) -> Option<User> {
        let user_id = self.sessions.read().await.get(session_id).cloned()?;
        self.read(|state| state.profile(&user_id).cloned()).await
    }

    pub async fn update_user(
        &self,
        actor: Option<&str>,
        fields: ProfileFields,
    ) -> Committed<Result<User, Ignored>> {
        self.commit(|state| state.update_user(actor, fields)).await
    }

    pub async fn add_product(
        &self,
        actor: Option<&str>,
        input: NewProduct,
    ) -> Committed<Result<Product, Ignored>> {
        let now = Utc::now();
        self.commit(|state| state.add_product(actor, input, now)).await
    }

    pub async fn like_product(&self, id: &str) -> Committed<Result<Product, Ignored>> {
        self.commit(|state| state.like_product(id)).await
    }

    pub async fn view_product(&self, id: &str) -> Committed<Result<Product, Ignored>> {
        self.commit(|state| state.view_product(id)).await
    }

    pub async fn add_category(
        &self,
        actor: Option<&str>,
        name: &str,
    ) -> Committed<Result<Category, Ignored>> {
        self.commit(|state| state.add_category(actor, name)).await
    }

    pub async fn remove_category(
        &self,
        actor: Option<&str>,
        id: &str,
    ) -> Committed<Result<Category, Ignored>> {
        self.commit(|state| state.remove_category(actor, id)).await
    }

    pub async fn send_message(
        &self,
        actor: Option<&str>,
        product_id: &str,
        text: &str,
        guest: Option<GuestInfo>,
    ) -> Committed<Result<ChatMessage, Ignored>> {
        let now = Utc::now();
        self.commit(|state| state.send_message(actor, product_id, text, guest, now))
            .await
    }

    pub async fn upgrade_plan(
        &self,
        actor: Option<&str>,
        plan_id: &str,
    ) -> Committed<Result<User, Ignored>> {
        let now = Utc::now();
        self.commit(|state| state.upgrade_plan(actor, plan_id, now)).await
    }

    pub async fn place_order(
        &self,
        actor: Option<&str>,
        product_id: &str,
    ) -> Committed<Result<Order, Ignored>> {
        let now = Utc::now();
        self.commit(|state| state.place_order(actor, product_id, now)).await
    }
}

async fn apply_write(store: &dyn TableStore, write: &RemoteWrite) -> Result<(), PersistenceError> {
    match write {
        RemoteWrite::InsertProfile(user) => {
            store
                .insert_profile(&ProfileRow::from_user(user, Utc::now()))
                .await
        }
        RemoteWrite::UpdateProfile { id, fields } => {
            store.update_profile(id, &ProfilePatchRow::from(fields)).await
        }
        RemoteWrite::UpdatePlan {
            id,
            plan,
            expires_at,
        } => {
            store
                .update_profile(id, &ProfilePatchRow::plan(plan, *expires_at))
                .await
        }
        RemoteWrite::InsertProduct(product) => store.insert_product(&product.into()).await,
        RemoteWrite::UpdateProductCounters { id, views, likes } => {
            store
                .update_product_counters(id, &CounterPatchRow::new(*views, *likes))
                .await
        }
        RemoteWrite::InsertCategory(category) => store.insert_category(&category.into()).await,
        RemoteWrite::DeleteCategory { id } => store.delete_category(id).await,
        RemoteWrite::InsertChatMessage(message) => {
            store.insert_chat_message(&message.into()).await
        }
        RemoteWrite::InsertOrder(order) => store.insert_order(&order.into()).await,
    }
}

/// Each collection loads independently; a failed load keeps that
/// collection's default.
async fn load_remote(store: &dyn TableStore) -> MarketState {
    let mut state = MarketState::new();
    let backend = store.name();

    match store.list_categories().await {
        Ok(rows) if !rows.is_empty() => {
            state.categories = rows.into_iter().map(Category::from).collect();
        }
        Ok(_) => {}
        Err(err) => warn!(backend, error = %err, "failed to load categories"),
    }

    match store.list_products().await {
        Ok(rows) => {
            state.products = rows.into_iter().map(Product::from).collect();
            state
                .products
                .sort_by(|a, b| b.created_at.cmp(&a.created_at));
        }
        Err(err) => warn!(backend, error = %err, "failed to load products"),
    }

    match store.list_profiles_by_role(UserRole::Shop.as_str()).await {
        Ok(rows) => state.profiles = rows.into_iter().map(User::from).collect(),
        Err(err) => warn!(backend, error = %err, "failed to load shops"),
    }

    match store.list_orders().await {
        Ok(rows) => state.orders = rows.into_iter().map(Order::from).collect(),
        Err(err) => warn!(backend, error = %err, "failed to load orders"),
    }

    match store.list_chat_messages().await {
        Ok(rows) => state.chats = rows.into_iter().map(ChatMessage::from).collect(),
        Err(err) => warn!(backend, error = %err, "failed to load chat messages"),
    }

    info!(
        backend,
        products = state.products.len(),
        shops = state.profiles.len(),
        categories = state.categories.len(),
        "state loaded from table store"
    );
    state
}
