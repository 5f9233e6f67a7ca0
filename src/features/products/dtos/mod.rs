mod product_dto;

pub use product_dto::{ProductForm, ProductPageDto, ProductResponseDto};
