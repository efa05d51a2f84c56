pub mod api;
pub mod config;
pub mod entities;
pub mod error;
pub mod forms;
pub mod media;
pub mod middleware;
pub mod pages;
pub mod richtext;
pub mod storefront;
