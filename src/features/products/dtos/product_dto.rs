use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::core::error::AppError;
use crate::features::products::models::{Product, ProductInput};
use crate::shared::validation::{
    collect_messages, parse_number, validate_non_negative_number, validate_rating,
};

/// Add/edit form submission.
///
/// Every field arrives as text so that a bad number becomes a field error
/// instead of a rejected request. Missing fields default to empty and fail
/// validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ProductForm {
    #[validate(length(min = 1, max = 255, message = "is required (max 255 characters)"))]
    pub product: String,

    #[validate(length(min = 1, max = 255, message = "is required (max 255 characters)"))]
    pub category: String,

    #[validate(length(min = 1, max = 255, message = "is required (max 255 characters)"))]
    pub sub_category: String,

    #[validate(length(min = 1, max = 255, message = "is required (max 255 characters)"))]
    pub brand: String,

    #[validate(custom(function = "validate_non_negative_number"))]
    pub sale_price: String,

    #[validate(custom(function = "validate_non_negative_number"))]
    pub market_price: String,

    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 255, message = "is required (max 255 characters)"))]
    pub product_type: String,

    #[validate(custom(function = "validate_rating"))]
    pub rating: String,

    #[validate(length(min = 1, max = 5000, message = "is required (max 5000 characters)"))]
    pub description: String,
}

impl ProductForm {
    /// Copy of the submission with surrounding whitespace removed
    pub fn trimmed(self) -> Self {
        Self {
            product: self.product.trim().to_string(),
            category: self.category.trim().to_string(),
            sub_category: self.sub_category.trim().to_string(),
            brand: self.brand.trim().to_string(),
            sale_price: self.sale_price.trim().to_string(),
            market_price: self.market_price.trim().to_string(),
            product_type: self.product_type.trim().to_string(),
            rating: self.rating.trim().to_string(),
            description: self.description.trim().to_string(),
        }
    }

    /// Validate and convert into storable fields.
    ///
    /// Fails with [`AppError::Validation`] listing every field error, so the
    /// caller can re-render the form it still owns.
    pub fn to_input(&self) -> Result<ProductInput, AppError> {
        self.validate()
            .map_err(|errors| AppError::Validation(collect_messages(&errors)))?;

        let (Some(sale_price), Some(market_price), Some(rating)) = (
            parse_number(&self.sale_price),
            parse_number(&self.market_price),
            parse_number(&self.rating),
        ) else {
            return Err(AppError::Validation(vec![
                "price and rating must be numbers".to_string(),
            ]));
        };

        Ok(ProductInput {
            product: self.product.clone(),
            category: self.category.clone(),
            sub_category: self.sub_category.clone(),
            brand: self.brand.clone(),
            sale_price,
            market_price,
            product_type: self.product_type.clone(),
            rating: Some(rating),
            description: self.description.clone(),
        })
    }
}

impl From<&ProductResponseDto> for ProductForm {
    fn from(p: &ProductResponseDto) -> Self {
        Self {
            product: p.product.clone(),
            category: p.category.clone(),
            sub_category: p.sub_category.clone(),
            brand: p.brand.clone(),
            sale_price: p.sale_price.to_string(),
            market_price: p.market_price.to_string(),
            product_type: p.product_type.clone(),
            rating: p.rating.map(|r| r.to_string()).unwrap_or_default(),
            description: p.description.clone(),
        }
    }
}

/// Response DTO for a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductResponseDto {
    pub product_id: i64,
    pub product: String,
    pub category: String,
    pub sub_category: String,
    pub brand: String,
    pub sale_price: f64,
    pub market_price: f64,
    #[serde(rename = "type")]
    pub product_type: String,
    pub rating: Option<f64>,
    pub description: String,
}

impl From<Product> for ProductResponseDto {
    fn from(p: Product) -> Self {
        Self {
            product_id: p.product_id,
            product: p.product,
            category: p.category,
            sub_category: p.sub_category,
            brand: p.brand,
            sale_price: p.sale_price,
            market_price: p.market_price,
            product_type: p.product_type,
            rating: p.rating,
            description: p.description,
        }
    }
}

/// One page of the catalog table
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductPageDto {
    pub products: Vec<ProductResponseDto>,
    /// Current page (1-indexed)
    pub page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    /// Page links to show: up to two pages either side of `page`
    pub page_range: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ProductForm {
        ProductForm {
            product: "Garam Masala".to_string(),
            category: "Kitchen, Garden & Pets".to_string(),
            sub_category: "Spices".to_string(),
            brand: "Acme".to_string(),
            sale_price: "45.5".to_string(),
            market_price: "60".to_string(),
            product_type: "Masalas".to_string(),
            rating: "4.1".to_string(),
            description: "Blend of spices".to_string(),
        }
    }

    #[test]
    fn test_valid_form_converts() {
        let input = valid_form().to_input().unwrap();
        assert_eq!(input.product, "Garam Masala");
        assert_eq!(input.sale_price, 45.5);
        assert_eq!(input.market_price, 60.0);
        assert_eq!(input.rating, Some(4.1));
        assert_eq!(input.product_type, "Masalas");
    }

    #[test]
    fn test_fields_are_trimmed() {
        let mut form = valid_form();
        form.brand = "  Acme  ".to_string();
        form.sale_price = " 10 ".to_string();

        let form = form.trimmed();
        assert_eq!(form.sale_price, "10");
        let input = form.to_input().unwrap();
        assert_eq!(input.brand, "Acme");
        assert_eq!(input.sale_price, 10.0);
    }

    #[test]
    fn test_non_numeric_price_is_rejected() {
        let mut form = valid_form();
        form.sale_price = "cheap".to_string();

        match form.to_input() {
            Err(AppError::Validation(errors)) => {
                assert_eq!(errors.len(), 1);
                assert!(errors[0].starts_with("sale_price:"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_rating_out_of_range_is_rejected() {
        let mut form = valid_form();
        form.rating = "7".to_string();

        let Err(AppError::Validation(errors)) = form.to_input() else {
            panic!("expected validation error");
        };
        assert!(errors.iter().any(|e| e.starts_with("rating:")));
    }

    #[test]
    fn test_blank_fields_are_reported() {
        let Err(AppError::Validation(errors)) = ProductForm::default().to_input() else {
            panic!("expected validation error");
        };
        // Every one of the nine fields is missing
        assert_eq!(errors.len(), 9);
    }

    #[test]
    fn test_form_deserializes_type_field() {
        let form: ProductForm =
            serde_json::from_str(r#"{"product":"x","type":"Snacks"}"#).unwrap();
        assert_eq!(form.product_type, "Snacks");
        assert_eq!(form.brand, "");
    }

    #[test]
    fn test_form_prefill_from_product() {
        let dto = ProductResponseDto {
            product_id: 3,
            product: "Tea".to_string(),
            category: "Beverages".to_string(),
            sub_category: "Tea".to_string(),
            brand: "Acme".to_string(),
            sale_price: 12.5,
            market_price: 15.0,
            product_type: "Green Tea".to_string(),
            rating: None,
            description: "Leaves".to_string(),
        };

        let form = ProductForm::from(&dto);
        assert_eq!(form.sale_price, "12.5");
        assert_eq!(form.market_price, "15");
        assert_eq!(form.rating, "");
    }
}
