//! Plain data: tables, products, money and the values derived from them.

pub mod bill;
pub mod money;
pub mod product;
pub mod summary;
pub mod table;

pub use bill::*;
pub use money::*;
pub use product::*;
pub use summary::*;
pub use table::*;
