//! Data models for Pawshop

mod banner;
mod category;
mod layout;
mod product;

pub use banner::Banner;
pub use category::Category;
pub use layout::{GridLayout, GridSection, SectionKind};
pub use product::Product;
