//! Static storefront content.
//!
//! The shop page sells from a fixed catalog defined here rather than the
//! database; the `products` table only holds the admin-seeded rows
//! surfaced on `/showdata`. Prices are snapshotted into the cart at add
//! time, so editing this list never rewrites existing carts.

/// A catalog entry for the shop and single-product pages.
#[derive(Debug, Clone, Copy)]
pub struct CatalogItem {
    pub name: &'static str,
    pub price: f64,
    /// Image path relative to the static root, e.g. `img/products/f1.jpg`.
    pub image: &'static str,
    pub description: &'static str,
}

/// The fixed shop catalog.
const CATALOG: &[CatalogItem] = &[
    CatalogItem {
        name: "Cartoon Floral Art T-Shirt",
        price: 49.0,
        image: "img/products/f1.jpg",
        description: "Cool summer shirt",
    },
    CatalogItem {
        name: "Blue Denim Shirt",
        price: 79.0,
        image: "img/products/f2.jpg",
        description: "Stylish denim",
    },
    CatalogItem {
        name: "Casual Hoodie",
        price: 99.0,
        image: "img/products/f3.jpg",
        description: "Comfy winter hoodie",
    },
];

/// All catalog entries, in display order.
#[must_use]
pub const fn shop_catalog() -> &'static [CatalogItem] {
    CATALOG
}

/// The item featured on the single-product page.
#[must_use]
pub const fn featured_item() -> &'static CatalogItem {
    &CATALOG[0]
}
