use itertools::Itertools;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::intake::{CalorieIntakeResult, Product};
use crate::measurement::UserMeasurements;

/// Shown instead of the restricted product list when nothing is restricted.
pub const EAT_EVERYTHING: &str = "You can eat everything";

/// Body sent to the user profile endpoint and mirrored into application state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct UserProfileUpdate {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub measurements: UserMeasurements,
    pub daily_rate: f64,
    pub not_allowed_products: Vec<Product>,
    pub not_allowed_products_all: String,
}

impl UserProfileUpdate {
    pub fn merge(measurements: &UserMeasurements, intake: CalorieIntakeResult) -> Self {
        Self {
            measurements: *measurements,
            daily_rate: intake.daily_rate,
            not_allowed_products: intake.not_allowed_products,
            not_allowed_products_all: display_products(&intake.not_allowed_products_all),
        }
    }
}

pub fn display_products(products: &[String]) -> String {
    if products.is_empty() {
        EAT_EVERYTHING.to_owned()
    } else {
        products.iter().join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::BloodType;

    fn measurements() -> UserMeasurements {
        UserMeasurements::new(170, 30, 80, 70, BloodType::A).unwrap()
    }

    #[test]
    fn empty_restrictions_collapse_to_sentinel() {
        assert_eq!(display_products(&[]), "You can eat everything");
    }

    #[test]
    fn restrictions_are_comma_joined() {
        let products = vec!["milk".to_owned(), "bread".to_owned()];
        assert_eq!(display_products(&products), "milk, bread");
    }

    #[test]
    fn merge_keeps_measurements_and_joins_restrictions() {
        let intake = CalorieIntakeResult {
            daily_rate: 1800.0,
            not_allowed_products: vec![],
            not_allowed_products_all: vec!["sugar".to_owned()],
        };

        let update = UserProfileUpdate::merge(&measurements(), intake);

        assert_eq!(update.measurements, measurements());
        assert_eq!(update.daily_rate, 1800.0);
        assert_eq!(update.not_allowed_products_all, "sugar");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn merge_flattens_measurements_into_body() {
        use serde_json::json;

        let intake = CalorieIntakeResult {
            daily_rate: 1800.0,
            not_allowed_products: vec![],
            not_allowed_products_all: vec!["sugar".to_owned()],
        };
        let update = UserProfileUpdate::merge(&measurements(), intake);

        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({
                "height": 170,
                "age": 30,
                "currentWeight": 80,
                "desiredWeight": 70,
                "bloodType": 2,
                "dailyRate": 1800.0,
                "notAllowedProducts": [],
                "notAllowedProductsAll": "sugar",
            })
        );
    }
}
