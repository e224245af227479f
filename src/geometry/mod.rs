//! Page boxes.
//!
//! Boxes such as /MediaBox and /CropBox are stored as four-number arrays
//! `[llx lly urx ury]` giving the lower-left and upper-right corners in
//! default user space units.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::object::Object;

/// A page box in default user space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    /// X coordinate of the lower-left corner
    pub lower_left_x: f32,
    /// Y coordinate of the lower-left corner
    pub lower_left_y: f32,
    /// X coordinate of the upper-right corner
    pub upper_right_x: f32,
    /// Y coordinate of the upper-right corner
    pub upper_right_y: f32,
}

impl Rectangle {
    /// Create a rectangle from its two corners.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_page_tree::geometry::Rectangle;
    ///
    /// let rect = Rectangle::new(10.0, 20.0, 110.0, 70.0);
    /// assert_eq!(rect.width(), 100.0);
    /// assert_eq!(rect.height(), 50.0);
    /// ```
    pub fn new(lower_left_x: f32, lower_left_y: f32, upper_right_x: f32, upper_right_y: f32) -> Self {
        Self {
            lower_left_x,
            lower_left_y,
            upper_right_x,
            upper_right_y,
        }
    }

    /// Create a rectangle anchored at the origin.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_page_tree::geometry::Rectangle;
    ///
    /// let letter = Rectangle::from_dimensions(612.0, 792.0);
    /// assert_eq!(letter.lower_left_x, 0.0);
    /// assert_eq!(letter.upper_right_y, 792.0);
    /// ```
    pub fn from_dimensions(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Horizontal extent.
    pub fn width(&self) -> f32 {
        self.upper_right_x - self.lower_left_x
    }

    /// Vertical extent.
    pub fn height(&self) -> f32 {
        self.upper_right_y - self.lower_left_y
    }

    /// Read a rectangle from an array of four numbers.
    ///
    /// Integers and reals are both accepted. Corners are taken as written;
    /// swapped corners are not normalized.
    pub fn from_object(object: &Object) -> Result<Self> {
        let items = object
            .as_array()
            .ok_or_else(|| Error::wrong_type("Array", object))?;
        if items.len() != 4 {
            return Err(Error::InvalidObjectType {
                expected: "Array of 4 numbers".to_string(),
                found: format!("Array of {} elements", items.len()),
            });
        }

        let mut coords = [0.0f32; 4];
        for (slot, item) in coords.iter_mut().zip(items) {
            *slot = item
                .as_number()
                .ok_or_else(|| Error::wrong_type("Number", item))? as f32;
        }
        Ok(Self::new(coords[0], coords[1], coords[2], coords[3]))
    }

    /// Encode as an array of four reals.
    pub fn to_object(&self) -> Object {
        Object::Array(vec![
            Object::Real(self.lower_left_x as f64),
            Object::Real(self.lower_left_y as f64),
            Object::Real(self.upper_right_x as f64),
            Object::Real(self.upper_right_y as f64),
        ])
    }
}
