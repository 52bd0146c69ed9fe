use std::{fmt, ops::RangeInclusive};

use num_derive::FromPrimitive;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::field::FormField;

pub const HEIGHT_CM: RangeInclusive<i64> = 100..=250;
pub const AGE_YEARS: RangeInclusive<i64> = 18..=100;
pub const WEIGHT_KG: RangeInclusive<i64> = 20..=500;

/// ABO blood group, coded the way the backend expects it (1 to 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, FromPrimitive)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(into = "u8", try_from = "u8")
)]
pub enum BloodType {
    #[strum(serialize = "0")]
    O = 1,
    A = 2,
    B = 3,
    AB = 4,
}

impl BloodType {
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl From<BloodType> for u8 {
    fn from(blood_type: BloodType) -> Self {
        blood_type.code()
    }
}

impl TryFrom<u8> for BloodType {
    type Error = &'static str;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        num::FromPrimitive::from_u8(code).ok_or("Invalid blood type")
    }
}

/// Value of the given field is outside of the range the backend accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfRange(pub FormField);

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} out of range", self.0.label())
    }
}

impl std::error::Error for OutOfRange {}

/// Measurement record of a single form submission.
///
/// Values are only accepted within the ranges the calorie service supports,
/// so any instance can be sent to the backend as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase", try_from = "MeasurementsDto")
)]
pub struct UserMeasurements {
    height: u16,
    age: u8,
    current_weight: u16,
    desired_weight: u16,
    blood_type: BloodType,
}

impl UserMeasurements {
    pub fn new(
        height: u16,
        age: u8,
        current_weight: u16,
        desired_weight: u16,
        blood_type: BloodType,
    ) -> Result<Self, OutOfRange> {
        if !HEIGHT_CM.contains(&(height as i64)) {
            return Err(OutOfRange(FormField::Height));
        }
        if !AGE_YEARS.contains(&(age as i64)) {
            return Err(OutOfRange(FormField::Age));
        }
        if !WEIGHT_KG.contains(&(current_weight as i64)) {
            return Err(OutOfRange(FormField::CurrentWeight));
        }
        if !WEIGHT_KG.contains(&(desired_weight as i64)) {
            return Err(OutOfRange(FormField::DesiredWeight));
        }

        Ok(Self {
            height,
            age,
            current_weight,
            desired_weight,
            blood_type,
        })
    }

    pub fn height_cm(&self) -> u16 {
        self.height
    }
    pub fn age(&self) -> u8 {
        self.age
    }
    pub fn current_weight_kg(&self) -> u16 {
        self.current_weight
    }
    pub fn desired_weight_kg(&self) -> u16 {
        self.desired_weight
    }
    pub fn blood_type(&self) -> BloodType {
        self.blood_type
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MeasurementsDto {
    height: u16,
    age: u8,
    current_weight: u16,
    desired_weight: u16,
    blood_type: BloodType,
}

#[cfg(feature = "serde")]
impl TryFrom<MeasurementsDto> for UserMeasurements {
    type Error = OutOfRange;

    fn try_from(dto: MeasurementsDto) -> Result<Self, Self::Error> {
        UserMeasurements::new(
            dto.height,
            dto.age,
            dto.current_weight,
            dto.desired_weight,
            dto.blood_type,
        )
    }
}
