#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "serde")]
use serde_json::{Map, Value};
#[cfg(feature = "serde")]
use serde_with::DefaultOnNull;

/// Product the backend flags as not recommended for the user's blood type.
///
/// Only the commonly used fields are typed. With the `serde` feature anything
/// else the backend sends is kept in `extra`, so the product can be forwarded
/// unchanged.
#[cfg_attr(feature = "serde", serde_with::skip_serializing_none)]
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Product {
    #[cfg_attr(feature = "serde", serde(rename = "_id"))]
    pub id: Option<String>,
    #[cfg(feature = "serde")]
    pub title: Option<Value>,
    #[cfg(feature = "serde")]
    pub categories: Option<Value>,
    pub calories: Option<f64>,
    pub weight: Option<f64>,
    pub group_blood_not_allowed: Option<Vec<Option<bool>>>,
    #[cfg(feature = "serde")]
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub extra: Map<String, Value>,
}

/// Response of the daily calorie intake endpoint.
#[cfg_attr(feature = "serde", serde_with::serde_as)]
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct CalorieIntakeResult {
    pub daily_rate: f64,
    #[cfg_attr(feature = "serde", serde(with = "serde_with::As::<DefaultOnNull>"))]
    #[cfg_attr(feature = "serde", serde(default))]
    pub not_allowed_products: Vec<Product>,
    #[cfg_attr(feature = "serde", serde(with = "serde_with::As::<DefaultOnNull>"))]
    #[cfg_attr(feature = "serde", serde(default))]
    pub not_allowed_products_all: Vec<String>,
}
