mod product;

pub use product::{NumericField, Product, ProductInput, TextField};
