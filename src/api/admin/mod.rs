pub mod brand;
pub mod category;
pub mod image;
pub mod product;
pub mod user;
