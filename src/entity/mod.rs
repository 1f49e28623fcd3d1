pub mod categories;
pub mod chat_messages;
pub mod orders;
pub mod products;
pub mod profiles;

pub use categories::Entity as Categories;
pub use chat_messages::Entity as ChatMessages;
pub use orders::Entity as Orders;
pub use products::Entity as Products;
pub use profiles::Entity as Profiles;
