pub mod category;
pub mod product;

pub use category::{get_category, list_brands, list_categories};
pub use product::{get_product, list_products};
