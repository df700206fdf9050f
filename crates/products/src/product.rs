use serde::{Deserialize, Serialize};

use shopfront_core::{Entity, ProductId};

use crate::ProductAttributes;

/// Stored representation of a catalog product.
///
/// Serialized as the public JSON shape:
/// `{"id":1,"name":"…","maker":"…","price":5000,"imageUrl":"…"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: ProductId,
    name: String,
    maker: String,
    price: u64,
    image_url: Option<String>,
}

impl Product {
    pub fn new(id: ProductId, attributes: ProductAttributes) -> Self {
        let (name, maker, price, image_url) = attributes.into_parts();
        Self {
            id,
            name,
            maker,
            price,
            image_url,
        }
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn maker(&self) -> &str {
        &self.maker
    }

    /// Price in the smallest currency unit.
    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Replace every descriptive field, keeping the identifier.
    pub fn change_with(&mut self, attributes: ProductAttributes) {
        let (name, maker, price, image_url) = attributes.into_parts();
        self.name = name;
        self.maker = maker;
        self.price = price;
        self.image_url = image_url;
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }
}
