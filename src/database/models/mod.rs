pub mod contact;
pub mod product;
pub mod session;
pub mod taxonomy;
pub mod user;

pub use contact::ContactMessage;
pub use product::{CatalogProduct, Product};
pub use session::Session;
pub use taxonomy::{Brand, Category};
pub use user::{PublicUser, User};
