//! Typed request payloads for order and shipping-item creation
//!
//! Payloads are normalized (surrounding whitespace stripped), validated and
//! serialized with unset optional fields omitted before they are submitted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validation::{Validate, ValidationError};
use crate::{GatewayError, Result};

/// A request body the gateway accepts as one element of a batch
pub trait RequestPayload: Validate + Serialize + Clone {
    /// Strip surrounding whitespace from free-text fields.
    fn normalize(&mut self);

    /// Normalize, validate and serialize into the JSON object sent on the wire.
    ///
    /// # Errors
    /// Returns [`GatewayError::InvalidInput`] listing every field violation.
    fn to_payload(&self) -> Result<Value> {
        let mut normalized = self.clone();
        normalized.normalize();
        normalized.validate()?;
        serde_json::to_value(&normalized)
            .map_err(|e| GatewayError::InvalidInput(format!("payload is not serializable: {e}")))
    }
}

fn trim(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

fn trim_opt(value: &mut Option<String>) {
    if let Some(inner) = value.as_mut() {
        trim(inner);
    }
}

/// Product line of an order item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product name
    pub name: String,
    /// Merchant product number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_no: Option<String>,
    /// Free-form metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    /// Product amount
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<i64>,
}

impl Product {
    /// Product with only a name set
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), product_no: None, metadata: None, total_amount: None }
    }

    fn normalize(&mut self) {
        trim(&mut self.name);
        trim_opt(&mut self.product_no);
    }
}

impl Validate for Product {
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        let mut errors = ValidationError::new();
        errors.max_len("name", &self.name, 128);
        errors.max_len_opt("product_no", self.product_no.as_deref(), 64);
        errors.min_value_opt("total_amount", self.total_amount, 0);
        errors.into_result()
    }
}

/// One line of an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Merchant item number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_item_number: Option<String>,
    /// Ordered quantity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    /// Option text such as size or color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
    /// Ordered product
    pub product: Product,
    /// Line amount
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<i64>,
    /// Free-form metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl OrderItem {
    /// Item for `product` with every optional field unset
    pub fn new(product: Product) -> Self {
        Self {
            order_item_number: None,
            quantity: None,
            options: None,
            product,
            total_amount: None,
            metadata: None,
        }
    }

    /// Item number and options are sent as given; only the product is trimmed.
    fn normalize(&mut self) {
        self.product.normalize();
    }
}

impl Validate for OrderItem {
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        let mut errors = ValidationError::new();
        errors.max_len_opt("order_item_number", self.order_item_number.as_deref(), 64);
        errors.min_value_opt("quantity", self.quantity, 1);
        errors.max_len_opt("options", self.options.as_deref(), 128);
        errors.min_value_opt("total_amount", self.total_amount, 0);
        if let Err(inner) = self.product.validate() {
            errors.nested("product", inner);
        }
        errors.into_result()
    }
}

/// Sender or return address of a shipping item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopAddress {
    /// Sender name
    pub name: String,
    /// Sender phone
    pub mobile_tel: String,
    pub address1: String,
    #[serde(default)]
    pub address2: String,
    /// Five-character postal code
    pub zipcode: String,
}

impl ShopAddress {
    fn normalize(&mut self) {
        trim(&mut self.name);
        trim(&mut self.mobile_tel);
        trim(&mut self.address1);
        trim(&mut self.address2);
        trim(&mut self.zipcode);
    }
}

impl Validate for ShopAddress {
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        let mut errors = ValidationError::new();
        errors.max_len("name", &self.name, 128);
        errors.max_len("mobile_tel", &self.mobile_tel, 24);
        errors.max_len("address1", &self.address1, 128);
        errors.exact_len("zipcode", &self.zipcode, 5);
        errors.into_result()
    }
}

/// One order in a `create-orders` batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    /// Merchant order number
    pub order_number: String,
    /// Delivery note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_memo: Option<String>,
    /// Orderer name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orderer_name: Option<String>,
    /// Orderer phone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orderer_mobile_tel: Option<String>,
    /// Receiver name
    pub receiver_name: String,
    /// Receiver phone
    pub receiver_mobile_tel: String,
    pub receiver_address1: String,
    #[serde(default)]
    pub receiver_address2: String,
    /// Five-character postal code
    pub receiver_postcode: String,
    /// At least one item
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
}

impl RequestPayload for CreateOrderRequest {
    fn normalize(&mut self) {
        trim(&mut self.order_number);
        trim_opt(&mut self.shipping_memo);
        trim_opt(&mut self.orderer_name);
        trim_opt(&mut self.orderer_mobile_tel);
        trim(&mut self.receiver_name);
        trim(&mut self.receiver_mobile_tel);
        trim(&mut self.receiver_address1);
        trim(&mut self.receiver_address2);
        trim(&mut self.receiver_postcode);
        for item in &mut self.order_items {
            item.normalize();
        }
    }
}

impl Validate for CreateOrderRequest {
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        let mut errors = ValidationError::new();
        errors.max_len("order_number", &self.order_number, 64);
        errors.max_len_opt("shipping_memo", self.shipping_memo.as_deref(), 128);
        errors.max_len_opt("orderer_name", self.orderer_name.as_deref(), 64);
        errors.max_len_opt("orderer_mobile_tel", self.orderer_mobile_tel.as_deref(), 24);
        errors.max_len("receiver_name", &self.receiver_name, 64);
        errors.max_len("receiver_mobile_tel", &self.receiver_mobile_tel, 24);
        errors.max_len("receiver_address1", &self.receiver_address1, 64);
        errors.max_len("receiver_address2", &self.receiver_address2, 128);
        errors.exact_len("receiver_postcode", &self.receiver_postcode, 5);
        if self.order_items.is_empty() {
            errors.add_field_error("order_items", "must contain at least 1 item");
        }
        for (index, item) in self.order_items.iter().enumerate() {
            if let Err(inner) = item.validate() {
                errors.nested(&format!("order_items[{index}]"), inner);
            }
        }
        errors.into_result()
    }
}

/// One shipping item in a `create-shipping-items` batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateShippingItemRequest {
    /// Order the shipping item belongs to
    pub order_number: String,
    /// Registered shop address id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_address_id: Option<i64>,
    /// Inline sender address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_address: Option<ShopAddress>,
    /// Return address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_return: Option<ShopAddress>,
    /// Building entrance code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entrance_password: Option<String>,
    /// Tracking number assigned by the merchant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designated_tracking_number: Option<String>,
}

impl CreateShippingItemRequest {
    /// Shipping item with only the order number set
    pub fn new(order_number: impl Into<String>) -> Self {
        Self {
            order_number: order_number.into(),
            shop_address_id: None,
            shop_address: None,
            address_return: None,
            entrance_password: None,
            designated_tracking_number: None,
        }
    }
}

impl RequestPayload for CreateShippingItemRequest {
    fn normalize(&mut self) {
        trim(&mut self.order_number);
        if let Some(address) = self.shop_address.as_mut() {
            address.normalize();
        }
        if let Some(address) = self.address_return.as_mut() {
            address.normalize();
        }
        trim_opt(&mut self.entrance_password);
        trim_opt(&mut self.designated_tracking_number);
    }
}

impl Validate for CreateShippingItemRequest {
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        let mut errors = ValidationError::new();
        errors.max_len("order_number", &self.order_number, 64);
        errors.min_value_opt("shop_address_id", self.shop_address_id, 1);
        if let Some(Err(inner)) = self.shop_address.as_ref().map(Validate::validate) {
            errors.nested("shop_address", inner);
        }
        if let Some(Err(inner)) = self.address_return.as_ref().map(Validate::validate) {
            errors.nested("address_return", inner);
        }
        errors.max_len_opt("entrance_password", self.entrance_password.as_deref(), 128);
        if let Some(number) = self.designated_tracking_number.as_deref() {
            errors.min_len("designated_tracking_number", number, 10);
        }
        errors.into_result()
    }
}
