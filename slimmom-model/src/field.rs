use strum::{AsRefStr, Display, EnumIter};

/// Inputs of the weight form, in the order they are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum FormField {
    Height,
    Age,
    CurrentWeight,
    DesiredWeight,
    BloodType,
}

impl FormField {
    /// Human readable name used in validation messages.
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Height => "Height",
            FormField::Age => "Age",
            FormField::CurrentWeight => "Current weight",
            FormField::DesiredWeight => "Desired weight",
            FormField::BloodType => "Blood type",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            FormField::Height => "Height, cm *",
            FormField::Age => "Age *",
            FormField::CurrentWeight => "Current weight, kg *",
            FormField::DesiredWeight => "Desired weight, kg *",
            FormField::BloodType => "Blood type *",
        }
    }
}
