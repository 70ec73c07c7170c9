pub mod carts;
pub mod products;

pub use carts::Entity as Carts;
pub use products::Entity as Products;
