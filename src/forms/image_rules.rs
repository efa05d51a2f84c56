/// Which level of a product owns its pictures.
///
/// When a variant-defining attribute has images (a colour swatch, say), every
/// row at that level needs its own image and the product-level image becomes
/// optional. With no image-bearing attribute the product image is required.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImageRules {
    pub primary_has_images: bool,
    pub secondary_has_images: bool,
}

impl ImageRules {
    pub fn new(primary_has_images: bool, secondary_has_images: bool) -> Self {
        Self {
            primary_has_images,
            secondary_has_images,
        }
    }

    pub fn product_image_required(&self) -> bool {
        !self.primary_has_images && !self.secondary_has_images
    }

    /// Rows keyed by the primary attribute (single-attribute rows, or groups).
    pub fn primary_image_required(&self) -> bool {
        self.primary_has_images
    }

    /// Options keyed by the secondary attribute.
    pub fn secondary_image_required(&self) -> bool {
        self.secondary_has_images
    }
}
