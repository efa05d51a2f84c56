use rust_decimal::Decimal;
use std::fmt::Write;

use crate::api::ApiClient;
use crate::entities::{Category, Product, Variant};
use crate::pages::Pager;
use crate::richtext::{escape, excerpt, sanitize};

const EXCERPT_LENGTH: usize = 140;

pub fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n</head>\n<body>\n\
         <header><a href=\"/\">Home</a> <a href=\"/products\">Products</a></header>\n\
         <main>\n{body}\n</main>\n</body>\n</html>\n",
        title = escape(title),
    )
}

pub fn price(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

fn image_tag(client: &ApiClient, path: &str, alt: &str) -> String {
    format!(
        "<img src=\"{}\" alt=\"{}\" loading=\"lazy\">",
        escape(&client.public_url(path)),
        escape(alt)
    )
}

pub fn product_card(client: &ApiClient, product: &Product) -> String {
    let mut card = format!("<article class=\"product-card\">\n<a href=\"/products/{}\">", product.id);
    if let Some(image) = product.gallery().first() {
        card.push_str(&image_tag(client, image, &product.name));
    }
    let _ = writeln!(card, "<h3>{}</h3></a>", escape(&product.name));
    if let Some(brand) = &product.brand_name {
        let _ = writeln!(card, "<p class=\"brand\">{}</p>", escape(brand));
    }
    if let Some(from) = product.starting_price() {
        let _ = writeln!(card, "<p class=\"price\">From {}</p>", price(from));
    }
    card.push_str("</article>");
    card
}

pub fn product_grid(client: &ApiClient, products: &[Product]) -> String {
    if products.is_empty() {
        return "<p class=\"empty\">No products found.</p>".to_string();
    }
    let cards: Vec<String> = products
        .iter()
        .map(|product| product_card(client, product))
        .collect();
    format!("<section class=\"product-grid\">\n{}\n</section>", cards.join("\n"))
}

/// Previous/Next links; a link at the bound is rendered disabled. `filters`
/// are extra query pairs carried across pages.
pub fn pagination(path: &str, pager: &Pager, filters: &[(&str, String)]) -> String {
    let href = |page: u32| {
        let mut href = format!("{path}?page={page}");
        for (key, value) in filters {
            let _ = write!(href, "&amp;{key}={}", escape(value));
        }
        href
    };

    let previous = if pager.has_previous() {
        format!("<a rel=\"prev\" href=\"{}\">Previous</a>", href(pager.page() - 1))
    } else {
        "<span class=\"disabled\" aria-disabled=\"true\">Previous</span>".to_string()
    };
    let next = if pager.has_next() {
        format!("<a rel=\"next\" href=\"{}\">Next</a>", href(pager.page() + 1))
    } else {
        "<span class=\"disabled\" aria-disabled=\"true\">Next</span>".to_string()
    };

    format!(
        "<nav class=\"pagination\">{previous} <span class=\"page\">Page {} of {}</span> \
         <span class=\"range\">{}</span> {next}</nav>",
        pager.page(),
        pager.last_page(),
        pager.range_label()
    )
}

fn category_list(categories: &[Category]) -> String {
    let mut list = String::from("<ul class=\"categories\">\n");
    for category in categories {
        let _ = writeln!(
            list,
            "<li><a href=\"/categories/{}\">{}</a></li>",
            category.id,
            escape(&category.name)
        );
    }
    list.push_str("</ul>");
    list
}

pub fn home(client: &ApiClient, categories: &[Category], products: &[Product]) -> String {
    let body = format!(
        "<h1>Shop</h1>\n<h2>Categories</h2>\n{}\n<h2>New arrivals</h2>\n{}\n\
         <p><a href=\"/products\">View all products</a></p>",
        category_list(categories),
        product_grid(client, products)
    );
    layout("Shop", &body)
}

pub fn products(client: &ApiClient, products: &[Product], pager: &Pager, filters: &[(&str, String)]) -> String {
    let body = format!(
        "<h1>Products</h1>\n{}\n{}",
        product_grid(client, products),
        pagination("/products", pager, filters)
    );
    layout("Products", &body)
}

pub fn category(client: &ApiClient, category: &Category, products: &[Product], pager: &Pager) -> String {
    let mut body = format!("<h1>{}</h1>\n", escape(&category.name));
    if let Some(image) = &category.image {
        body.push_str(&image_tag(client, image, &category.name));
        body.push('\n');
    }
    let _ = writeln!(
        body,
        "<div class=\"description\">{}</div>",
        sanitize(&category.description)
    );
    body.push_str(&product_grid(client, products));
    body.push('\n');
    body.push_str(&pagination(&format!("/categories/{}", category.id), pager, &[]));
    layout(&category.name, &body)
}

fn variant_row(variant: &Variant) -> String {
    let title = variant.title.as_deref().unwrap_or(&variant.sku);
    let stock = if variant.in_stock() { "In stock" } else { "Out of stock" };
    let discount = variant
        .discount_percent()
        .map(|off| format!(" <span class=\"discount\">{off}% off</span>"))
        .unwrap_or_default();
    format!(
        "<tr><td>{}</td><td>{}</td><td><s>{}</s></td><td>{}{discount}</td><td>{stock}</td></tr>",
        escape(title),
        escape(&variant.sku),
        price(variant.mrp),
        price(variant.selling_price),
    )
}

pub fn product_detail(client: &ApiClient, product: &Product) -> String {
    let mut body = format!("<h1>{}</h1>\n", escape(&product.name));
    if !product.item_code.is_empty() {
        let _ = writeln!(body, "<p class=\"item-code\">{}</p>", escape(&product.item_code));
    }

    let gallery = product.gallery();
    if !gallery.is_empty() {
        body.push_str("<div class=\"gallery\">");
        for image in gallery {
            body.push_str(&image_tag(client, image, &product.name));
        }
        body.push_str("</div>\n");
    }

    let _ = writeln!(
        body,
        "<div class=\"description\">{}</div>",
        sanitize(&product.description)
    );

    if !product.features.is_empty() {
        body.push_str("<h2>Features</h2>\n<ul class=\"features\">");
        for feature in &product.features {
            let _ = write!(body, "<li>{}</li>", escape(feature));
        }
        body.push_str("</ul>\n");
    }

    if !product.details.is_empty() {
        body.push_str("<h2>Details</h2>\n<table class=\"details\">");
        for detail in &product.details {
            let _ = write!(
                body,
                "<tr><th>{}</th><td>{}</td></tr>",
                escape(&detail.key),
                escape(&detail.value)
            );
        }
        body.push_str("</table>\n");
    }

    let variants: Vec<&Variant> = product.variants.iter().filter(|variant| variant.status).collect();
    if !variants.is_empty() {
        body.push_str(
            "<h2>Options</h2>\n<table class=\"variants\"><tr><th>Option</th><th>SKU</th>\
             <th>MRP</th><th>Price</th><th>Availability</th></tr>",
        );
        for variant in variants {
            body.push_str(&variant_row(variant));
        }
        body.push_str("</table>\n");
    }

    let title = match &product.category_name {
        Some(category) => format!("{} | {category}", product.name),
        None => product.name.clone(),
    };
    let _ = write!(
        body,
        "<meta name=\"description\" content=\"{}\">",
        escape(&excerpt(&product.description, EXCERPT_LENGTH))
    );
    layout(&title, &body)
}

pub fn error_page(status: u16, message: &str) -> String {
    let body = format!(
        "<h1>{}</h1>\n<p>{}</p>\n<p><a href=\"/\">Back to the shop</a></p>",
        if status == 404 { "Not found" } else { "Something went wrong" },
        escape(message)
    );
    layout("Error", &body)
}
