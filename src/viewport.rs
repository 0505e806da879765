//! Contains the ViewSpec struct, which describes the view a caller
//! wants rendered, and the ViewportMapper struct, which describes the
//! relationship between a rectangle on the integral plane with an
//! origin at 0,0 and the rectangle of the complex plane that the view
//! makes visible.

use num::Complex;

use errors::RenderError;

/// The horizontal extent of the view at zoom 1.  Chosen so the
/// default view contains the full classic Mandelbrot silhouette,
/// which spans roughly -2.5 to 1 on the real axis.
pub const BASE_SPAN: f64 = 3.5;

/// Largest accepted width or height, in pixels.  Caps the worst-case
/// buffer at one gibibyte.
pub const MAX_DIMENSION: usize = 16_384;

/// Largest accepted per-pixel iteration budget.
pub const MAX_ITERATION_LIMIT: usize = 1_000_000;

/// Everything the renderer needs to know about one render call: the
/// complex-plane point at the image center, the magnification, the
/// per-pixel iteration budget, and the output size in pixels.  The
/// caller owns this value and mutates its own copy between calls;
/// the core treats it as immutable.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewSpec {
    /// Real part of the complex-plane point at the image center.
    pub center_x: f64,
    /// Imaginary part of the complex-plane point at the image center.
    pub center_y: f64,
    /// Magnification.  Must be positive and finite; larger means more
    /// magnified.
    pub zoom: f64,
    /// Per-pixel iteration budget.  Must be between 1 and
    /// [`MAX_ITERATION_LIMIT`].
    pub max_iterations: usize,
    /// Output image width in pixels.
    pub width: usize,
    /// Output image height in pixels.
    pub height: usize,
}

impl Default for ViewSpec {
    /// The whole-set view: centered on (-0.5, 0) at zoom 1, which
    /// puts the entire silhouette in frame.
    fn default() -> ViewSpec {
        ViewSpec {
            center_x: -0.5,
            center_y: 0.0,
            zoom: 1.0,
            max_iterations: 200,
            width: 700,
            height: 700,
        }
    }
}

impl ViewSpec {
    /// Checks every field against its range.  Called by the renderer
    /// before any pixel work; a caller that clamps its own inputs
    /// never sees an error from here.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 || self.width > MAX_DIMENSION
            || self.height > MAX_DIMENSION
        {
            return Err(RenderError::InvalidViewSpec(format!(
                "image dimensions {}x{} are outside 1..={} per axis",
                self.width, self.height, MAX_DIMENSION
            )));
        }
        if !(self.zoom > 0.0) || !self.zoom.is_finite() {
            return Err(RenderError::InvalidViewSpec(format!(
                "zoom must be positive and finite, got {}",
                self.zoom
            )));
        }
        if !self.center_x.is_finite() || !self.center_y.is_finite() {
            return Err(RenderError::InvalidViewSpec(format!(
                "center ({}, {}) must be finite",
                self.center_x, self.center_y
            )));
        }
        if self.max_iterations == 0 || self.max_iterations > MAX_ITERATION_LIMIT {
            return Err(RenderError::InvalidViewSpec(format!(
                "iteration budget {} is outside 1..={}",
                self.max_iterations, MAX_ITERATION_LIMIT
            )));
        }
        Ok(())
    }
}

/// Contains the definitions of two planes: the integral cartesian
/// plane of the output image, and the rectangle of the complex plane
/// the view makes visible.  Maps pixels from one to points in the
/// other.  The visible rectangle is derived once, at construction;
/// the per-pixel mapping is linear and axis-aligned, with no
/// rotation.
#[derive(Debug)]
pub struct ViewportMapper {
    width: usize,
    height: usize,
    // The left-lower corner of the visible complex rectangle.  Pixel
    // row 0 is the top of the image, which is the minimum imaginary
    // coordinate, matching the original viewer's orientation.
    min: Complex<f64>,
    view_width: f64,
    view_height: f64,
}

impl ViewportMapper {
    /// Derives the visible complex rectangle from a view.  The
    /// horizontal extent is `BASE_SPAN / zoom`; the vertical extent
    /// follows from the image's aspect ratio, so pixels are square.
    pub fn new(spec: &ViewSpec) -> Result<ViewportMapper, RenderError> {
        if spec.width == 0 || spec.height == 0 || spec.width > MAX_DIMENSION
            || spec.height > MAX_DIMENSION
        {
            return Err(RenderError::InvalidDimension {
                width: spec.width,
                height: spec.height,
                limit: MAX_DIMENSION,
            });
        }

        let scale = 1.0 / spec.zoom;
        let aspect = (spec.width as f64) / (spec.height as f64);
        let view_width = BASE_SPAN * scale;
        let view_height = view_width / aspect;

        Ok(ViewportMapper {
            width: spec.width,
            height: spec.height,
            min: Complex::new(
                spec.center_x - view_width / 2.0,
                spec.center_y - view_height / 2.0,
            ),
            view_width,
            view_height,
        })
    }

    /// The total number of pixels in the image.  Used to calculate
    /// memory needs.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Describes that the image is of a size.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The image size, width then height.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// The extent of the visible complex rectangle, width then
    /// height.
    pub fn view_size(&self) -> (f64, f64) {
        (self.view_width, self.view_height)
    }

    /// Given a pixel on the integral cartesian plane, return the
    /// complex number at the equivalent location on the complex
    /// plane.  Pure; identical inputs always produce bit-identical
    /// coordinates.
    pub fn pixel_to_point(&self, x: usize, y: usize) -> Complex<f64> {
        Complex::new(
            self.min.re + ((x as f64) / (self.width as f64)) * self.view_width,
            self.min.im + ((y as f64) / (self.height as f64)) * self.view_height,
        )
    }
}
