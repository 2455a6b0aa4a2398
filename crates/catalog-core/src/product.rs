//! Product records and the create/edit form.

use crate::ids::ProductId;
use crate::price::format_price;
use crate::ValidationErrors;
use serde::{Deserialize, Serialize};

/// A product as returned by the catalog API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Server-assigned identifier.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: f64,
    /// Absolute URL of the product image.
    #[serde(rename = "image", default)]
    pub image_url: String,
}

impl Product {
    /// Create a product record.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: f64,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image_url: image_url.into(),
        }
    }

    /// Price formatted for display, e.g. `PKR 4,500`.
    pub fn display_price(&self) -> String {
        format_price(self.price)
    }
}

/// Validated payload for creating or updating a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub price: f64,
    pub image: String,
}

/// Raw product form input, exactly as typed.
///
/// Nothing is sent to the API until [`ProductForm::validate`] succeeds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub image: String,
}

impl ProductForm {
    /// Create a form from raw field values.
    pub fn new(
        name: impl Into<String>,
        price: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            image: image.into(),
        }
    }

    /// Prefill the form from an existing product (edit flow).
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.to_string(),
            image: product.image_url.clone(),
        }
    }

    /// Validate every field, reporting all failures at once.
    pub fn validate(&self) -> Result<ProductDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.add("name", "Name is required");
        }

        let price = self.price.trim();
        let parsed_price = if price.is_empty() {
            errors.add("price", "Price is required");
            None
        } else {
            match price.parse::<f64>() {
                Ok(value) if value.is_finite() => {
                    if value <= 0.0 {
                        errors.add("price", "Price must be greater than 0");
                    }
                    Some(value)
                }
                _ => {
                    errors.add("price", "Price must be a number");
                    None
                }
            }
        };

        let image = self.image.trim();
        if image.is_empty() {
            errors.add("image", "Image URL is required");
        } else if !is_web_url(image) {
            errors.add("image", "Must be a valid URL");
        }

        errors.into_result(ProductDraft {
            name: name.to_string(),
            price: parsed_price.unwrap_or_default(),
            image: image.to_string(),
        })
    }
}

/// Absolute http(s) URL with a host.
fn is_web_url(value: &str) -> bool {
    match url::Url::parse(value) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some()
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_wire_format() {
        let json = r#"{"_id":"p1","name":"Oak Chair","price":4500,"image":"https://img.example/c.png"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_str(), "p1");
        assert_eq!(product.price, 4500.0);
        assert_eq!(product.image_url, "https://img.example/c.png");
        assert_eq!(product.display_price(), "PKR 4,500");

        let back = serde_json::to_value(&product).unwrap();
        assert_eq!(back["_id"], "p1");
        assert_eq!(back["image"], "https://img.example/c.png");
    }

    #[test]
    fn test_valid_form() {
        let form = ProductForm::new(" Lamp ", "19.5", "https://img.example/lamp.jpg");
        let draft = form.validate().unwrap();
        assert_eq!(draft.name, "Lamp");
        assert_eq!(draft.price, 19.5);
        assert_eq!(draft.image, "https://img.example/lamp.jpg");
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = ProductForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.message_for("name"), Some("Name is required"));
        assert_eq!(errors.message_for("price"), Some("Price is required"));
        assert_eq!(errors.message_for("image"), Some("Image URL is required"));
    }

    #[test]
    fn test_price_rules() {
        let not_number = ProductForm::new("Lamp", "abc", "https://a.io/x.png");
        assert_eq!(
            not_number.validate().unwrap_err().message_for("price"),
            Some("Price must be a number")
        );

        let zero = ProductForm::new("Lamp", "0", "https://a.io/x.png");
        assert_eq!(
            zero.validate().unwrap_err().message_for("price"),
            Some("Price must be greater than 0")
        );
    }

    #[test]
    fn test_image_must_be_web_url() {
        for bad in ["not a url", "ftp://files.example/x.png", "/relative/x.png"] {
            let form = ProductForm::new("Lamp", "10", bad);
            assert_eq!(
                form.validate().unwrap_err().message_for("image"),
                Some("Must be a valid URL"),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_prefill_from_product() {
        let product = Product::new("p9", "Desk", 12500.0, "https://a.io/desk.png");
        let form = ProductForm::from_product(&product);
        assert_eq!(form.price, "12500");
        assert_eq!(form.validate().unwrap().price, 12500.0);
    }
}
