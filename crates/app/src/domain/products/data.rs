//! Products Data

use crate::domain::{
    optional_text, required_text,
    artisans::records::ArtisanUuid,
    products::{errors::ProductsServiceError, records::ProductRecord},
};

/// New Product Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    /// Required when an admin creates the product; artisans always create for themselves.
    pub artisan: Option<ArtisanUuid>,

    pub name: String,
    pub description: String,
    pub category: String,
    pub price: u64,
    pub stock: u64,
    pub images: Vec<String>,
    pub draft: bool,
}

impl NewProduct {
    pub(crate) fn validated(self) -> Result<Self, ProductsServiceError> {
        if self.price == 0 {
            return Err(ProductsServiceError::InvalidInput("price must be positive"));
        }

        Ok(Self {
            name: required_text(&self.name)
                .ok_or(ProductsServiceError::InvalidInput("name is required"))?,
            description: self.description.trim().to_string(),
            category: required_text(&self.category)
                .ok_or(ProductsServiceError::InvalidInput("category is required"))?,
            images: normalize_images(self.images),
            ..self
        })
    }
}

/// Product Update Data; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<u64>,
    pub stock: Option<u64>,
    pub images: Option<Vec<String>>,
    pub draft: Option<bool>,
}

impl ProductUpdate {
    pub(crate) fn validated(self) -> Result<Self, ProductsServiceError> {
        if self.price == Some(0) {
            return Err(ProductsServiceError::InvalidInput("price must be positive"));
        }

        let name = match self.name {
            Some(name) => Some(
                required_text(&name)
                    .ok_or(ProductsServiceError::InvalidInput("name is required"))?,
            ),
            None => None,
        };

        let category = match self.category {
            Some(category) => Some(
                required_text(&category)
                    .ok_or(ProductsServiceError::InvalidInput("category is required"))?,
            ),
            None => None,
        };

        Ok(Self {
            name,
            category,
            description: self.description.map(|d| d.trim().to_string()),
            images: self.images.map(normalize_images),
            ..self
        })
    }

    /// Whether the update changes anything a reviewer has signed off on.
    #[must_use]
    pub fn requires_review(&self, current: &ProductRecord) -> bool {
        self.name.as_ref().is_some_and(|name| *name != current.name)
            || self.price.is_some_and(|price| price != current.price)
            || self
                .category
                .as_ref()
                .is_some_and(|category| *category != current.category)
            || self
                .description
                .as_ref()
                .is_some_and(|description| *description != current.description)
            || self
                .images
                .as_ref()
                .is_some_and(|images| *images != current.images)
    }
}

/// Catalogue filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub artisan: Option<ArtisanUuid>,
    pub search: Option<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
}

impl ProductFilter {
    pub(crate) fn validated(self) -> Result<Self, ProductsServiceError> {
        if let (Some(min), Some(max)) = (self.min_price, self.max_price)
            && min > max
        {
            return Err(ProductsServiceError::InvalidInput(
                "minimum price exceeds maximum price",
            ));
        }

        Ok(Self {
            category: optional_text(self.category.as_deref()),
            search: optional_text(self.search.as_deref()),
            ..self
        })
    }
}

/// Admin review outcome for a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductReview {
    Approve,
    Reject { reason: String },
}

fn normalize_images(images: Vec<String>) -> Vec<String> {
    images
        .iter()
        .filter_map(|image| required_text(image))
        .collect()
}
