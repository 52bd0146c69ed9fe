use std::{fmt, ops::RangeInclusive};

use itertools::Itertools;
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;
use slimmom_model::{
    field::FormField,
    measurement::{BloodType, OutOfRange, UserMeasurements, AGE_YEARS, HEIGHT_CM, WEIGHT_KG},
};

/// Raw values of the weight form, exactly as typed or selected by the user.
/// An empty string means the field was left blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormValues {
    #[serde(default, deserialize_with = "field_text")]
    pub height: String,
    #[serde(default, deserialize_with = "field_text")]
    pub age: String,
    #[serde(default, deserialize_with = "field_text")]
    pub current_weight: String,
    #[serde(default, deserialize_with = "field_text")]
    pub desired_weight: String,
    #[serde(default, deserialize_with = "field_text")]
    pub blood_type: String,
}

/// Accepts both `"170"` and `170`, the way a number input reports its value.
fn field_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(de::Error::custom(format!(
            "expected a string or a number, got {}",
            other
        ))),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

impl FieldError {
    fn new(field: FormField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", .0.iter().join("; "))]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn fields(&self) -> Vec<FormField> {
        self.0.iter().map(|e| e.field).collect()
    }
}

/// Checks every field and builds the measurement record.
///
/// Each field reports at most one violation; violations of all fields are
/// collected in form order.
pub fn validate(values: &FormValues) -> Result<UserMeasurements, ValidationErrors> {
    let height = integer_in(FormField::Height, &values.height, &HEIGHT_CM);
    let age = integer_in(FormField::Age, &values.age, &AGE_YEARS);
    let current_weight = integer_in(FormField::CurrentWeight, &values.current_weight, &WEIGHT_KG);
    let desired_weight = integer_in(FormField::DesiredWeight, &values.desired_weight, &WEIGHT_KG);
    let blood_type = coerce_blood_type(&values.blood_type);

    match (height, age, current_weight, desired_weight, blood_type) {
        (Ok(height), Ok(age), Ok(current_weight), Ok(desired_weight), Ok(blood_type)) => {
            UserMeasurements::new(
                height as u16,
                age as u8,
                current_weight as u16,
                desired_weight as u16,
                blood_type,
            )
            .map_err(|e| {
                let value = match e.0 {
                    FormField::Height => height,
                    FormField::Age => age,
                    FormField::CurrentWeight => current_weight,
                    FormField::DesiredWeight => desired_weight,
                    FormField::BloodType => blood_type.code() as i64,
                };
                ValidationErrors(vec![range_violation(e, value)])
            })
        }
        (height, age, current_weight, desired_weight, blood_type) => Err(ValidationErrors(
            [
                height.err(),
                age.err(),
                current_weight.err(),
                desired_weight.err(),
                blood_type.err(),
            ]
            .into_iter()
            .flatten()
            .collect(),
        )),
    }
}

const BLOOD_TYPE_MESSAGE: &str = "Blood type must be one of 0, A, B, AB";

/// Maps a range rejected by the model onto the form's own range messages.
fn range_violation(OutOfRange(field): OutOfRange, value: i64) -> FieldError {
    let range = match field {
        FormField::Height => &HEIGHT_CM,
        FormField::Age => &AGE_YEARS,
        FormField::CurrentWeight | FormField::DesiredWeight => &WEIGHT_KG,
        FormField::BloodType => return FieldError::new(field, BLOOD_TYPE_MESSAGE),
    };
    out_of_range(field, value, range)
}

fn out_of_range(field: FormField, value: i64, range: &RangeInclusive<i64>) -> FieldError {
    if value < *range.start() {
        FieldError::new(
            field,
            format!("Please enter a number more than or equal to {}", range.start()),
        )
    } else {
        FieldError::new(
            field,
            format!("Please enter a number less than or equal to {}", range.end()),
        )
    }
}

/// Blood type arrives as the value of the selected radio button.
pub fn coerce_blood_type(raw: &str) -> Result<BloodType, FieldError> {
    let field = FormField::BloodType;
    if raw.trim().is_empty() {
        return Err(FieldError::new(field, "Blood type is a required field"));
    }
    let code = integer(field, raw)?;
    u8::try_from(code)
        .ok()
        .and_then(|code| BloodType::try_from(code).ok())
        .ok_or_else(|| FieldError::new(field, BLOOD_TYPE_MESSAGE))
}

fn integer_in(field: FormField, raw: &str, range: &RangeInclusive<i64>) -> Result<i64, FieldError> {
    if raw.trim().is_empty() {
        return Err(FieldError::new(
            field,
            format!("{} is required field", field.label()),
        ));
    }
    let value = integer(field, raw)?;
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(out_of_range(field, value, range))
    }
}

fn integer(field: FormField, raw: &str) -> Result<i64, FieldError> {
    let number = raw
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| FieldError::new(field, format!("{} must be a number", field.label())))?;
    if number.fract() != 0.0 {
        return Err(FieldError::new(
            field,
            format!("{} must be a integer number", field.label()),
        ));
    }
    // saturates far outside of any accepted range
    Ok(number as i64)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn values(
        height: &str,
        age: &str,
        current_weight: &str,
        desired_weight: &str,
        blood_type: &str,
    ) -> FormValues {
        FormValues {
            height: height.to_owned(),
            age: age.to_owned(),
            current_weight: current_weight.to_owned(),
            desired_weight: desired_weight.to_owned(),
            blood_type: blood_type.to_owned(),
        }
    }

    #[test]
    fn accepts_every_value_within_bounds() {
        for height in [100, 101, 170, 249, 250] {
            for age in [18, 19, 55, 99, 100] {
                for weight in [20, 21, 260, 499, 500] {
                    for blood_type in 1..=4 {
                        let form = values(
                            &height.to_string(),
                            &age.to_string(),
                            &weight.to_string(),
                            &(520 - weight).to_string(),
                            &blood_type.to_string(),
                        );

                        let measurements = validate(&form).unwrap();

                        assert_eq!(measurements.height_cm(), height);
                        assert_eq!(measurements.age(), age);
                        assert_eq!(measurements.current_weight_kg(), weight);
                        assert_eq!(measurements.desired_weight_kg(), 520 - weight);
                        assert_eq!(measurements.blood_type().code(), blood_type);
                    }
                }
            }
        }
    }

    #[test]
    fn coerces_blood_type_from_text() {
        let measurements = validate(&values("170", "30", "80", "70", "2")).unwrap();
        assert_eq!(measurements.blood_type(), BloodType::A);
        assert_eq!(coerce_blood_type(" 4 "), Ok(BloodType::AB));
        assert_eq!(coerce_blood_type("1.0"), Ok(BloodType::O));
    }

    #[test]
    fn rejects_out_of_bounds_values() {
        let test_data = [
            (
                values("99", "30", "80", "70", "2"),
                FormField::Height,
                "Please enter a number more than or equal to 100",
            ),
            (
                values("251", "30", "80", "70", "2"),
                FormField::Height,
                "Please enter a number less than or equal to 250",
            ),
            (
                values("170", "17", "80", "70", "2"),
                FormField::Age,
                "Please enter a number more than or equal to 18",
            ),
            (
                values("170", "101", "80", "70", "2"),
                FormField::Age,
                "Please enter a number less than or equal to 100",
            ),
            (
                values("170", "30", "19", "70", "2"),
                FormField::CurrentWeight,
                "Please enter a number more than or equal to 20",
            ),
            (
                values("170", "30", "80", "501", "2"),
                FormField::DesiredWeight,
                "Please enter a number less than or equal to 500",
            ),
            (
                values("170", "30", "80", "70", "5"),
                FormField::BloodType,
                "Blood type must be one of 0, A, B, AB",
            ),
            (
                values("170", "30", "80", "70", "0"),
                FormField::BloodType,
                "Blood type must be one of 0, A, B, AB",
            ),
        ];

        for (i, (form, field, message)) in test_data.into_iter().enumerate() {
            assert_eq!(
                validate(&form),
                Err(ValidationErrors(vec![FieldError::new(field, message)])),
                "Test case #{}",
                i
            );
        }
    }

    #[test]
    fn rejects_non_integers_and_non_numbers() {
        let errors = validate(&values("170.5", "abc", "80", "1e400", "A")).unwrap_err();

        assert_eq!(
            errors.0,
            vec![
                FieldError::new(FormField::Height, "Height must be a integer number"),
                FieldError::new(FormField::Age, "Age must be a number"),
                FieldError::new(FormField::DesiredWeight, "Desired weight must be a number"),
                FieldError::new(FormField::BloodType, "Blood type must be a number"),
            ]
        );
    }

    #[test]
    fn every_field_is_required() {
        let errors = validate(&FormValues::default()).unwrap_err();

        assert_eq!(
            errors.0.iter().map(|e| e.message.as_str()).collect::<Vec<_>>(),
            vec![
                "Height is required field",
                "Age is required field",
                "Current weight is required field",
                "Desired weight is required field",
                "Blood type is a required field",
            ]
        );
    }

    #[test]
    fn errors_display_joined() {
        let errors = validate(&values("", "30", "80", "70", "")).unwrap_err();

        assert_eq!(
            errors.to_string(),
            "height: Height is required field; bloodType: Blood type is a required field"
        );
        assert_eq!(errors.fields(), vec![FormField::Height, FormField::BloodType]);
    }

    #[test]
    fn model_range_rejections_use_form_messages() {
        let test_data = [
            (
                OutOfRange(FormField::Height),
                99,
                "Please enter a number more than or equal to 100",
            ),
            (
                OutOfRange(FormField::Age),
                101,
                "Please enter a number less than or equal to 100",
            ),
            (
                OutOfRange(FormField::DesiredWeight),
                501,
                "Please enter a number less than or equal to 500",
            ),
            (
                OutOfRange(FormField::BloodType),
                5,
                "Blood type must be one of 0, A, B, AB",
            ),
        ];

        for (i, (error, value, message)) in test_data.into_iter().enumerate() {
            assert_eq!(
                range_violation(error, value),
                FieldError::new(error.0, message),
                "Test case #{}",
                i
            );
        }
    }

    #[test]
    fn form_values_accept_numbers_and_strings() {
        let form: FormValues = serde_json::from_value(json!({
            "height": 170,
            "age": "30",
            "currentWeight": 80.5,
            "bloodType": null,
        }))
        .unwrap();

        assert_eq!(form, values("170", "30", "80.5", "", ""));
        assert!(serde_json::from_value::<FormValues>(json!({ "height": [170] })).is_err());
    }
}
