use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: String,
    pub shop_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub neighborhood: Option<String>,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub logo_url: Option<String>,
    pub plan: Option<String>,
    pub plan_expires_at: Option<DateTimeWithTimeZone>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub created_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::products::Entity")]
    Products,
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
