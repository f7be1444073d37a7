// SPDX-License-Identifier: MPL-2.0
//! Numeric crop form mirroring the resizer's region.
//!
//! The form holds the raw text of its three fields (left, top, side). It is
//! refreshed from [`Event::ConstraintChanged`] and pushes edits back into the
//! resizer only when they pass [`validate_region`]; rejected edits leave the
//! resizer untouched, disable submission and expose the error message.
//! [`CropForm::fit`] pulls an out-of-bounds square back inside the image.

use crate::domain::{validate_region, RegionError, SquareRegion};
use crate::error::Result;
use crate::media::ExportedImage;
use crate::ui::resizer::{Event, Resizer};

/// State of the crop form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CropForm {
    x: String,
    y: String,
    side: String,
    error: Option<RegionError>,
}

fn parse_value(text: &str) -> f32 {
    text.trim().parse::<f32>().unwrap_or(f32::NAN)
}

impl CropForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Text currently shown in the left, top and side fields.
    #[must_use]
    pub fn fields(&self) -> (&str, &str, &str) {
        (&self.x, &self.y, &self.side)
    }

    /// Message for the last rejected edit, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&'static str> {
        self.error.map(RegionError::message)
    }

    #[must_use]
    pub fn error(&self) -> Option<RegionError> {
        self.error
    }

    #[must_use]
    pub fn submit_enabled(&self) -> bool {
        self.error.is_none()
    }

    /// Mirrors `region` into the fields.
    pub fn sync(&mut self, region: SquareRegion) {
        self.x = region.x.to_string();
        self.y = region.y.to_string();
        self.side = region.side.to_string();
    }

    /// Applies a resizer notification.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::ConstraintChanged(region) => self.sync(region),
        }
    }

    /// Region typed into the fields; unparsable fields become NaN.
    #[must_use]
    pub fn region(&self) -> SquareRegion {
        SquareRegion::new(
            parse_value(&self.x),
            parse_value(&self.y),
            parse_value(&self.side),
        )
    }

    /// Handles user input in the fields.
    ///
    /// Valid values are pushed to `resizer` with `set_constraint`; invalid
    /// values are kept in the fields and reported through
    /// [`error_message`](Self::error_message).
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Removed`] if `resizer` has been removed.
    pub fn input(&mut self, resizer: &mut Resizer, x: &str, y: &str, side: &str) -> Result<()> {
        self.x = x.to_string();
        self.y = y.to_string();
        self.side = side.to_string();

        let region = self.region();
        let image = resizer.image();
        match validate_region(region, image.width(), image.height()) {
            Ok(()) => {
                self.error = None;
                resizer.set_constraint(Some(region.x), Some(region.y), Some(region.side))?;
            }
            Err(err) => {
                log::debug!("Crop form rejected {region:?}: {err}");
                self.error = Some(err);
            }
        }
        Ok(())
    }

    /// Exports the crop if the resizer's current region passes validation.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::InvalidRegion`] when the region is out of
    /// policy, or any error from [`Resizer::export_image`].
    pub fn submit(&self, resizer: &Resizer) -> Result<ExportedImage> {
        let region = resizer.get_constraint()?;
        let image = resizer.image();
        validate_region(region, image.width(), image.height())?;
        resizer.export_image()
    }

    /// Pulls the square back inside the image and pushes it to `resizer`.
    ///
    /// Starts from the typed values when they are usable numbers, otherwise
    /// from the resizer's current region (e.g. after a drag past the edge).
    /// Clears any error and resyncs the fields.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Removed`] if `resizer` has been removed.
    pub fn fit(&mut self, resizer: &mut Resizer) -> Result<()> {
        let current = resizer.get_constraint()?;
        let typed = self.region();
        let usable = [typed.x, typed.y, typed.side]
            .iter()
            .all(|value| value.is_finite())
            && typed.side > 0.0;
        let base = if usable { typed } else { current };

        let image = resizer.image();
        let region = base.clamped_to(image.width(), image.height());
        resizer.set_constraint(Some(region.x), Some(region.y), Some(region.side))?;
        log::debug!("Crop form fitted {base:?} to {region:?}");
        self.error = None;
        self.sync(region);
        Ok(())
    }

    /// Clears all fields and the error state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
