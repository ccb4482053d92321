mod category;
mod message;
mod order;
mod order_item;
mod product;
mod review;
mod user;
mod user_category;

pub use category::*;
pub use message::*;
pub use order::*;
pub use order_item::*;
pub use product::*;
pub use review::*;
pub use user::*;
pub use user_category::*;
