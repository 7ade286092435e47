pub mod farms;
pub mod seed;
pub mod slaughterhouses;
pub mod sqlx;
pub mod trucks;

pub use self::sqlx::{connect, db_connection};
