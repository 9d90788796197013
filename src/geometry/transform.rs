//! View-space / image-space mapping driven by zoom and pan.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Default lower bound for [`ViewTransform::scale`].
pub const DEFAULT_MIN_SCALE: f64 = 0.01;

/// Affine map between image pixels and viewport pixels.
///
/// The scaled image is centered in the viewport and shifted by `pan_offset`:
/// `view = image * scale + origin`, where
/// `origin = (viewport - image * scale) / 2 + pan_offset`.
///
/// `pan_offset` is kept within half the difference between viewport and
/// scaled image on each axis, so the image can never be dragged out of view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    scale: f64,
    pan_offset: DVec2,
    viewport_size: DVec2,
    image_size: Option<DVec2>,
    min_scale: f64,
}

impl ViewTransform {
    /// Transform for an empty viewport of the given size.
    pub fn new(viewport_size: DVec2) -> Self {
        Self {
            scale: 1.0,
            pan_offset: DVec2::ZERO,
            viewport_size: viewport_size.max(DVec2::ZERO),
            image_size: None,
            min_scale: DEFAULT_MIN_SCALE,
        }
    }

    pub fn with_min_scale(mut self, min_scale: f64) -> Self {
        if min_scale.is_finite() && min_scale > 0.0 {
            self.min_scale = min_scale;
        }
        self
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn pan_offset(&self) -> DVec2 {
        self.pan_offset
    }

    pub fn viewport_size(&self) -> DVec2 {
        self.viewport_size
    }

    pub fn image_size(&self) -> Option<DVec2> {
        self.image_size
    }

    pub fn has_image(&self) -> bool {
        self.image_size.is_some()
    }

    /// Attach an image and fit it to the viewport.
    ///
    /// A size without positive extent unloads instead.
    pub fn load_image(&mut self, image_size: DVec2) {
        if image_size.x > 0.0 && image_size.y > 0.0 && image_size.is_finite() {
            self.image_size = Some(image_size);
            self.fit_to_window();
        } else {
            self.unload_image();
        }
    }

    pub fn unload_image(&mut self) {
        self.image_size = None;
        self.scale = 1.0;
        self.pan_offset = DVec2::ZERO;
    }

    /// Change the viewport size; the view is refit to the new size.
    pub fn resize_viewport(&mut self, viewport_size: DVec2) {
        self.viewport_size = viewport_size.max(DVec2::ZERO);
        self.fit_to_window();
    }

    /// Size of the image once scaled into view space.
    pub fn scaled_image_size(&self) -> Option<DVec2> {
        self.image_size.map(|size| size * self.scale)
    }

    /// Where image pixel (0, 0) lands in the viewport.
    pub fn image_origin_in_view(&self) -> Option<DVec2> {
        self.scaled_image_size()
            .map(|scaled| (self.viewport_size - scaled) / 2.0 + self.pan_offset)
    }

    /// Map a viewport position to image coordinates.
    ///
    /// `None` when no image is loaded or the scale is zero.
    pub fn to_image(&self, view_point: DVec2) -> Option<DVec2> {
        if self.scale == 0.0 {
            return None;
        }
        let origin = self.image_origin_in_view()?;
        Some((view_point - origin) / self.scale)
    }

    /// Map image coordinates to a viewport position. `None` without an image.
    pub fn to_view(&self, image_point: DVec2) -> Option<DVec2> {
        let origin = self.image_origin_in_view()?;
        Some(image_point * self.scale + origin)
    }

    /// Clamp an image point into `[0, width-1] x [0, height-1]`.
    pub fn clamp_to_image(&self, image_point: DVec2) -> Option<DVec2> {
        let size = self.image_size?;
        let max = (size - DVec2::ONE).max(DVec2::ZERO);
        Some(image_point.clamp(DVec2::ZERO, max))
    }

    /// True when the point lies inside `[0, width-1] x [0, height-1]`.
    pub fn contains_image_point(&self, image_point: DVec2) -> bool {
        match self.image_size {
            Some(size) => {
                let max = (size - DVec2::ONE).max(DVec2::ZERO);
                image_point.cmpge(DVec2::ZERO).all() && image_point.cmple(max).all()
            }
            None => false,
        }
    }

    /// Scale by `factor` while keeping the image point under `pivot` fixed.
    ///
    /// The resulting scale never drops below the configured minimum.
    pub fn zoom(&mut self, factor: f64, pivot: DVec2) {
        let Some(image_size) = self.image_size else {
            return;
        };
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        let Some(anchor) = self.to_image(pivot) else {
            return;
        };

        self.scale = (self.scale * factor).max(self.min_scale);

        let new_origin = pivot - anchor * self.scale;
        self.pan_offset = new_origin - (self.viewport_size - image_size * self.scale) / 2.0;
        self.clamp_pan();
    }

    /// Largest scale at which the whole image fits; pan is reset.
    ///
    /// The minimum scale only bounds [`zoom`](Self::zoom), so a very large
    /// image still fits entirely.
    pub fn fit_to_window(&mut self) {
        self.pan_offset = DVec2::ZERO;
        let Some(image_size) = self.image_size else {
            self.scale = 1.0;
            return;
        };
        if self.viewport_size.x <= 0.0 || self.viewport_size.y <= 0.0 {
            self.scale = 1.0;
            return;
        }

        let ratio = self.viewport_size / image_size;
        self.scale = ratio.x.min(ratio.y);
    }

    /// Back to 1:1 pixels, centered.
    pub fn reset_zoom(&mut self) {
        if self.image_size.is_none() {
            return;
        }
        self.scale = 1.0;
        self.pan_offset = DVec2::ZERO;
    }

    /// Shift the image by a view-space delta.
    pub fn pan(&mut self, delta: DVec2) {
        if self.image_size.is_none() || !delta.is_finite() {
            return;
        }
        self.pan_offset += delta;
        self.clamp_pan();
    }

    fn clamp_pan(&mut self) {
        let Some(scaled) = self.scaled_image_size() else {
            self.pan_offset = DVec2::ZERO;
            return;
        };
        let limit = (self.viewport_size - scaled).abs() / 2.0;
        self.pan_offset = self.pan_offset.clamp(-limit, limit);
    }
}
