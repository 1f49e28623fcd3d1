//! Direct Postgres backend through SeaORM.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, sea_query::Expr,
};

use super::{
    PersistenceError, TableStore,
    rows::{
        CategoryRow, ChatMessageRow, CounterPatchRow, OrderRow, ProductRow, ProfilePatchRow,
        ProfileRow,
    },
};
use crate::{
    db::create_orm_conn,
    entity::{categories, chat_messages, orders, products, profiles},
};

#[derive(Debug, Clone)]
pub struct OrmTableStore {
    conn: DatabaseConnection,
}

impl OrmTableStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn connect(database_url: &str) -> Result<Self, PersistenceError> {
        let conn = create_orm_conn(database_url).await?;
        Ok(Self::new(conn))
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }
}

fn to_db_time(at: DateTime<Utc>) -> DateTime<FixedOffset> {
    at.fixed_offset()
}

fn from_db_time(at: DateTime<FixedOffset>) -> DateTime<Utc> {
    at.with_timezone(&Utc)
}

fn profile_from_model(model: profiles::Model) -> ProfileRow {
    ProfileRow {
        id: model.id,
        email: model.email,
        name: model.name,
        role: model.role,
        shop_name: model.shop_name,
        address: model.address,
        phone: model.phone,
        neighborhood: model.neighborhood,
        open_time: model.open_time,
        close_time: model.close_time,
        logo_url: model.logo_url,
        plan: model.plan,
        plan_expires_at: model.plan_expires_at.map(from_db_time),
        lat: model.lat,
        lng: model.lng,
        created_at: model.created_at.map(from_db_time),
    }
}

fn product_from_model(model: products::Model) -> ProductRow {
    ProductRow {
        id: model.id,
        shop_id: model.shop_id,
        shop_name: model.shop_name,
        title: model.title,
        description: model.description,
        price: model.price,
        image_url: model.image_url,
        category: model.category,
        brand: model.brand,
        model: model.model,
        views: model.views,
        likes: model.likes,
        created_at: from_db_time(model.created_at),
    }
}

fn order_from_model(model: orders::Model) -> OrderRow {
    OrderRow {
        id: model.id,
        buyer_id: model.buyer_id,
        shop_id: model.shop_id,
        product_id: model.product_id,
        product_title: model.product_title,
        product_image: model.product_image,
        price: model.price,
        status: model.status,
        created_at: from_db_time(model.created_at),
    }
}

fn message_from_model(model: chat_messages::Model) -> ChatMessageRow {
    ChatMessageRow {
        id: model.id,
        product_id: model.product_id,
        sender_id: model.sender_id,
        sender_name: model.sender_name,
        text: model.text,
        created_at: from_db_time(model.created_at),
    }
}

#[async_trait]
impl TableStore for OrmTableStore {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn list_profiles_by_role(&self, role: &str) -> Result<Vec<ProfileRow>, PersistenceError> {
        let models = profiles::Entity::find()
            .filter(profiles::Column::Role.eq(role))
            .all(&self.conn)
            .await?;
        Ok(models.into_iter().map(profile_from_model).collect())
    }

    async fn find_profile(&self, identifier: &str) -> Result<Option<ProfileRow>, PersistenceError> {
        let model = profiles::Entity::find()
            .filter(
                Condition::any()
                    .add(profiles::Column::Email.eq(identifier))
                    .add(profiles::Column::Phone.eq(identifier)),
            )
            .one(&self.conn)
            .await?;
        Ok(model.map(profile_from_model))
    }

    async fn insert_profile(&self, row: &ProfileRow) -> Result<(), PersistenceError> {
        let active = profiles::ActiveModel {
            id: Set(row.id.clone()),
            email: Set(row.email.clone()),
            name: Set(row.name.clone()),
            role: Set(row.role.clone()),
            shop_name: Set(row.shop_name.clone()),
            address: Set(row.address.clone()),
            phone: Set(row.phone.clone()),
            neighborhood: Set(row.neighborhood.clone()),
            open_time: Set(row.open_time.clone()),
            close_time: Set(row.close_time.clone()),
            logo_url: Set(row.logo_url.clone()),
            plan: Set(row.plan.clone()),
            plan_expires_at: Set(row.plan_expires_at.map(to_db_time)),
            lat: Set(row.lat),
            lng: Set(row.lng),
            created_at: Set(row.created_at.map(to_db_time)),
        };
        profiles::Entity::insert(active)
            .exec_without_returning(&self.conn)
            .await?;
        Ok(())
    }

    async fn update_profile(&self, id: &str, patch: &ProfilePatchRow) -> Result<(), PersistenceError> {
        use profiles::Column;

        let mut update = profiles::Entity::update_many().filter(Column::Id.eq(id));
        let text_columns = [
            (Column::Name, &patch.name),
            (Column::Email, &patch.email),
            (Column::ShopName, &patch.shop_name),
            (Column::Phone, &patch.phone),
            (Column::Address, &patch.address),
            (Column::Neighborhood, &patch.neighborhood),
            (Column::OpenTime, &patch.open_time),
            (Column::CloseTime, &patch.close_time),
            (Column::LogoUrl, &patch.logo_url),
            (Column::Plan, &patch.plan),
        ];
        let mut touched = false;
        for (column, value) in text_columns {
            if let Some(value) = value {
                update = update.col_expr(column, Expr::value(value.clone()));
                touched = true;
            }
        }
        for (column, value) in [(Column::Lat, patch.lat), (Column::Lng, patch.lng)] {
            if let Some(value) = value {
                update = update.col_expr(column, Expr::value(value));
                touched = true;
            }
        }
        if let Some(expires_at) = patch.plan_expires_at {
            update = update.col_expr(Column::PlanExpiresAt, Expr::value(to_db_time(expires_at)));
            touched = true;
        }

        if touched {
            update.exec(&self.conn).await?;
        }
        Ok(())
    }

    async fn list_products(&self) -> Result<Vec<ProductRow>, PersistenceError> {
        let models = products::Entity::find()
            .order_by_desc(products::Column::CreatedAt)
            .all(&self.conn)
            .await?;
        Ok(models.into_iter().map(product_from_model).collect())
    }

    async fn insert_product(&self, row: &ProductRow) -> Result<(), PersistenceError> {
        let active = products::ActiveModel {
            id: Set(row.id.clone()),
            shop_id: Set(row.shop_id.clone()),
            shop_name: Set(row.shop_name.clone()),
            title: Set(row.title.clone()),
            description: Set(row.description.clone()),
            price: Set(row.price),
            image_url: Set(row.image_url.clone()),
            category: Set(row.category.clone()),
            brand: Set(row.brand.clone()),
            model: Set(row.model.clone()),
            views: Set(row.views),
            likes: Set(row.likes),
            created_at: Set(to_db_time(row.created_at)),
        };
        products::Entity::insert(active)
            .exec_without_returning(&self.conn)
            .await?;
        Ok(())
    }

    async fn update_product_counters(
        &self,
        id: &str,
        patch: &CounterPatchRow,
    ) -> Result<(), PersistenceError> {
        use products::Column;

        let mut update = products::Entity::update_many().filter(Column::Id.eq(id));
        let mut touched = false;
        for (column, value) in [(Column::Views, patch.views), (Column::Likes, patch.likes)] {
            if let Some(value) = value {
                update = update.col_expr(column, Expr::value(value));
                touched = true;
            }
        }
        if touched {
            update.exec(&self.conn).await?;
        }
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<CategoryRow>, PersistenceError> {
        let models = categories::Entity::find().all(&self.conn).await?;
        Ok(models
            .into_iter()
            .map(|model| CategoryRow {
                id: model.id,
                name: model.name,
            })
            .collect())
    }

    async fn insert_category(&self, row: &CategoryRow) -> Result<(), PersistenceError> {
        let active = categories::ActiveModel {
            id: Set(row.id.clone()),
            name: Set(row.name.clone()),
        };
        categories::Entity::insert(active)
            .exec_without_returning(&self.conn)
            .await?;
        Ok(())
    }

    async fn delete_category(&self, id: &str) -> Result<(), PersistenceError> {
        categories::Entity::delete_by_id(id.to_string())
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    async fn list_chat_messages(&self) -> Result<Vec<ChatMessageRow>, PersistenceError> {
        let models = chat_messages::Entity::find()
            .order_by_asc(chat_messages::Column::CreatedAt)
            .all(&self.conn)
            .await?;
        Ok(models.into_iter().map(message_from_model).collect())
    }

    async fn insert_chat_message(&self, row: &ChatMessageRow) -> Result<(), PersistenceError> {
        let active = chat_messages::ActiveModel {
            id: Set(row.id.clone()),
            product_id: Set(row.product_id.clone()),
            sender_id: Set(row.sender_id.clone()),
            sender_name: Set(row.sender_name.clone()),
            text: Set(row.text.clone()),
            created_at: Set(to_db_time(row.created_at)),
        };
        chat_messages::Entity::insert(active)
            .exec_without_returning(&self.conn)
            .await?;
        Ok(())
    }

    async fn list_orders(&self) -> Result<Vec<OrderRow>, PersistenceError> {
        let models = orders::Entity::find()
            .order_by_desc(orders::Column::CreatedAt)
            .all(&self.conn)
            .await?;
        Ok(models.into_iter().map(order_from_model).collect())
    }

    async fn insert_order(&self, row: &OrderRow) -> Result<(), PersistenceError> {
        let active = orders::ActiveModel {
            id: Set(row.id.clone()),
            buyer_id: Set(row.buyer_id.clone()),
            shop_id: Set(row.shop_id.clone()),
            product_id: Set(row.product_id.clone()),
            product_title: Set(row.product_title.clone()),
            product_image: Set(row.product_image.clone()),
            price: Set(row.price),
            status: Set(row.status.clone()),
            created_at: Set(to_db_time(row.created_at)),
        };
        orders::Entity::insert(active)
            .exec_without_returning(&self.conn)
            .await?;
        Ok(())
    }
}
