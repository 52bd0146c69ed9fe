//! Placement of the form fields in the desktop grid.
//!
//! Narrow viewports stack the fields in document order, so only the desktop
//! layout pins fields to explicit grid cells.

use crate::field::FormField;

/// Widest viewport, in CSS pixels, still treated as mobile.
pub const MOBILE_MAX_WIDTH: u32 = 554;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportClass {
    Mobile,
    Desktop,
}

impl ViewportClass {
    pub fn from_width(width: u32) -> Self {
        if width <= MOBILE_MAX_WIDTH {
            ViewportClass::Mobile
        } else {
            ViewportClass::Desktop
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPlacement {
    pub column_start: u8,
    pub column_end: u8,
    pub row_start: u8,
    pub row_end: u8,
    /// Vertical shift relative to the grid cell, in pixels.
    pub top_offset_px: i32,
}

impl FieldPlacement {
    fn cell(column: u8, row: u8) -> Self {
        Self {
            column_start: column,
            column_end: column,
            row_start: row,
            row_end: row,
            top_offset_px: 0,
        }
    }
}

pub fn field_placement(viewport: ViewportClass, field: FormField) -> Option<FieldPlacement> {
    if viewport == ViewportClass::Mobile {
        return None;
    }

    match field {
        FormField::Height => Some(FieldPlacement::cell(1, 1)),
        FormField::Age => Some(FieldPlacement::cell(1, 2)),
        FormField::CurrentWeight => Some(FieldPlacement {
            top_offset_px: -20,
            ..FieldPlacement::cell(1, 3)
        }),
        FormField::DesiredWeight | FormField::BloodType => None,
    }
}
