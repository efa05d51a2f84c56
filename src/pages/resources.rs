use serde_json::Value;
use tracing::error;

use super::{CrudPage, Notice, PendingAction, Resource};
use crate::api::admin::{brand, category, product};
use crate::api::public::{get_category, list_brands, list_categories};
use crate::api::{ApiClient, ApiResponse, ListQuery};
use crate::entities::{Brand, Category, Page, Product};
use crate::error::ClientError;
use crate::forms::{BrandForm, BrandPayload, CategoryForm, CategoryPayload, ProductForm, ProductPayload};

pub struct Brands;
pub struct Categories;
pub struct Products;

impl Resource for Brands {
    type Item = Brand;
    type Form = BrandForm;

    const SINGULAR: &'static str = "brand";
    const PLURAL: &'static str = "brands";

    fn id(item: &Brand) -> i64 {
        item.id
    }

    fn label(item: &Brand) -> String {
        item.name.clone()
    }

    fn new_form() -> BrandForm {
        BrandForm::new()
    }

    async fn list(client: &ApiClient, query: &ListQuery) -> Result<Page<Brand>, ClientError> {
        list_brands(client, query).await
    }

    async fn edit_form(client: &ApiClient, id: i64) -> Result<BrandForm, ClientError> {
        let brand = brand::get_brand(client, id).await?;
        Ok(BrandForm::from(&brand))
    }

    async fn create(
        client: &ApiClient,
        payload: &BrandPayload,
    ) -> Result<ApiResponse<Brand>, ClientError> {
        brand::create_brand(client, payload).await
    }

    async fn update(
        client: &ApiClient,
        id: i64,
        payload: &BrandPayload,
    ) -> Result<ApiResponse<Brand>, ClientError> {
        brand::update_brand(client, id, payload).await
    }

    async fn delete(client: &ApiClient, id: i64) -> Result<ApiResponse<Value>, ClientError> {
        brand::delete_brand(client, id).await
    }
}

impl Resource for Categories {
    type Item = Category;
    type Form = CategoryForm;

    const SINGULAR: &'static str = "category";
    const PLURAL: &'static str = "categories";

    fn id(item: &Category) -> i64 {
        item.id
    }

    fn label(item: &Category) -> String {
        item.name.clone()
    }

    fn new_form() -> CategoryForm {
        CategoryForm::new()
    }

    async fn list(client: &ApiClient, query: &ListQuery) -> Result<Page<Category>, ClientError> {
        list_categories(client, query).await
    }

    async fn edit_form(client: &ApiClient, id: i64) -> Result<CategoryForm, ClientError> {
        let category = get_category(client, id).await?;
        Ok(CategoryForm::from(&category))
    }

    async fn create(
        client: &ApiClient,
        payload: &CategoryPayload,
    ) -> Result<ApiResponse<Category>, ClientError> {
        category::create_category(client, payload).await
    }

    async fn update(
        client: &ApiClient,
        id: i64,
        payload: &CategoryPayload,
    ) -> Result<ApiResponse<Category>, ClientError> {
        category::update_category(client, id, payload).await
    }

    async fn delete(client: &ApiClient, id: i64) -> Result<ApiResponse<Value>, ClientError> {
        category::delete_category(client, id).await
    }
}

impl Resource for Products {
    type Item = Product;
    type Form = ProductForm;

    const SINGULAR: &'static str = "product";
    const PLURAL: &'static str = "products";

    fn id(item: &Product) -> i64 {
        item.id
    }

    fn label(item: &Product) -> String {
        if item.item_code.is_empty() {
            item.name.clone()
        } else {
            format!("{} ({})", item.name, item.item_code)
        }
    }

    fn new_form() -> ProductForm {
        ProductForm {
            status: true,
            ..Default::default()
        }
    }

    async fn list(client: &ApiClient, query: &ListQuery) -> Result<Page<Product>, ClientError> {
        product::list_admin_products(client, query).await
    }

    /// The variant matrix shape comes from the product's category.
    async fn edit_form(client: &ApiClient, id: i64) -> Result<ProductForm, ClientError> {
        let product = product::get_admin_product(client, id).await?;
        let category = get_category(client, product.category_id).await?;
        Ok(ProductForm::from_product(&product, &category))
    }

    async fn create(
        client: &ApiClient,
        payload: &ProductPayload,
    ) -> Result<ApiResponse<Product>, ClientError> {
        product::create_product(client, payload).await
    }

    async fn update(
        client: &ApiClient,
        id: i64,
        payload: &ProductPayload,
    ) -> Result<ApiResponse<Product>, ClientError> {
        product::update_product(client, id, payload).await
    }

    async fn delete(client: &ApiClient, id: i64) -> Result<ApiResponse<Value>, ClientError> {
        product::delete_product(client, id).await
    }

    async fn delete_variant(client: &ApiClient, id: i64) -> Result<ApiResponse<Value>, ClientError> {
        product::delete_variant(client, id).await
    }
}

impl CrudPage<Products> {
    /// Asks for confirmation before deleting one variant of a listed product.
    pub fn request_variant_delete(&mut self, variant_id: i64) {
        let label = self
            .list
            .items
            .iter()
            .flat_map(|product| product.variants.iter())
            .find(|variant| variant.id == Some(variant_id))
            .map(|variant| variant.sku.clone())
            .unwrap_or_else(|| format!("#{variant_id}"));
        self.request_confirm(PendingAction::DeleteVariant(variant_id), label);
    }

    /// Selecting a category in the create/edit form reshapes its matrix.
    pub async fn choose_category(&mut self, category_id: i64) -> bool {
        let category = match get_category(self.client(), category_id).await {
            Ok(category) => category,
            Err(err) => {
                error!(category_id, error = %err, "Failed to load category");
                self.notice = Some(Notice::error("Failed to load category"));
                return false;
            }
        };
        match self.form_mut() {
            Some(form) => {
                form.set_category(&category);
                true
            }
            None => false,
        }
    }
}
