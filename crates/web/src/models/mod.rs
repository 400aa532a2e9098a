//! Domain models shared across the web layer.

pub mod account;
pub mod product;
pub mod session;

pub use account::Account;
pub use product::Product;
pub use session::CurrentUser;
