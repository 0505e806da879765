// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time renderer.  For every pixel of the output image it
//! asks the viewport mapper for the corresponding complex number,
//! iterates z = z * z + c until the orbit escapes or the budget runs
//! out, maps the count to a color, and writes four bytes.  Pixels are
//! completely independent of one another: each one reads only the
//! immutable view and writes only its own slot, which is what makes
//! the row-banded threaded variant safe with nothing but a final
//! join.

use itertools::iproduct;
use num::Complex;
use std::cmp::max;
use std::ops::Range;
use std::time::{Duration, Instant};

use color::color_for;
use errors::RenderError;
use viewport::{ViewSpec, ViewportMapper};

/// Bytes per output pixel: red, green, blue, alpha.
const BYTES_PER_PIXEL: usize = 4;

/// Renders one fixed view.  Construction validates the view and
/// derives the visible complex rectangle; after that, rendering
/// cannot fail.  The renderer keeps no state across calls and never
/// retains a reference to a buffer it has returned.
pub struct EscapeTimeRenderer {
    mapper: ViewportMapper,
    limit: usize,
}

/// Validates a view, renders it, and returns the finished RGBA
/// buffer along with the wall-clock time the pixel work took.  This
/// is the whole external surface for callers that render one view at
/// a time.
pub fn render(spec: &ViewSpec) -> Result<(Vec<u8>, Duration), RenderError> {
    let renderer = EscapeTimeRenderer::new(spec)?;
    Ok(renderer.render())
}

impl EscapeTimeRenderer {
    /// Requires a validated view.  Rejects out-of-range fields with
    /// `InvalidViewSpec` before any buffer is allocated.
    pub fn new(spec: &ViewSpec) -> Result<EscapeTimeRenderer, RenderError> {
        spec.validate()?;
        let mapper = ViewportMapper::new(spec)?;
        Ok(EscapeTimeRenderer {
            mapper,
            limit: spec.max_iterations,
        })
    }

    /// Counts the iterations of z = z * z + c before the orbit
    /// leaves the circle of radius 2, up to the budget.  A count
    /// equal to the budget means the point never escaped and is
    /// classified as in the set.  The escape test compares the
    /// squared magnitude against 4.0, which gives the same counts as
    /// the magnitude-against-2.0 form without a square root in the
    /// hot loop.
    pub fn escape_time(&self, c: Complex<f64>) -> usize {
        let mut z: Complex<f64> = Complex { re: 0.0, im: 0.0 };
        let mut iteration = 0;
        while iteration < self.limit && z.norm_sqr() <= 4.0 {
            z = z * z + c;
            iteration += 1;
        }
        iteration
    }

    /// Renders the row range `rows` into `band`, which must be sized
    /// for exactly those rows.  A full render is `render_rows(0..height)`
    /// into a full buffer; the threaded variant hands each worker its
    /// own disjoint band.  Concatenating bands rendered separately
    /// reproduces a full render byte for byte.
    pub fn render_rows(&self, rows: Range<usize>, band: &mut [u8]) {
        let (width, height) = self.mapper.dimensions();
        assert!(rows.end <= height);
        assert_eq!(band.len(), rows.len() * width * BYTES_PER_PIXEL);

        let mut idx = 0;
        for (y, x) in iproduct!(rows, 0..width) {
            let c = self.mapper.pixel_to_point(x, y);
            let color = color_for(self.escape_time(c), self.limit);
            band[idx] = color.r;
            band[idx + 1] = color.g;
            band[idx + 2] = color.b;
            band[idx + 3] = 0xff;
            idx += BYTES_PER_PIXEL;
        }
    }

    /// The main function for single-threaded rendering: one fresh
    /// buffer, every pixel visited exactly once, top row first.
    pub fn render(&self) -> (Vec<u8>, Duration) {
        let start = Instant::now();
        let (_, height) = self.mapper.dimensions();
        let mut buffer = vec![0 as u8; self.mapper.len() * BYTES_PER_PIXEL];
        self.render_rows(0..height, &mut buffer);
        (buffer, start.elapsed())
    }

    /// A multi-threaded version of the render function that takes a
    /// thread count.  Rows are split into contiguous bands, one per
    /// worker; the bands never overlap, so the only synchronization
    /// is the join at the end of the scope, and the buffer is not
    /// visible to the caller until every worker has finished.  The
    /// result is byte-identical to `render`.
    pub fn render_threaded(&self, threads: usize) -> (Vec<u8>, Duration) {
        let start = Instant::now();
        let (width, height) = self.mapper.dimensions();
        let mut buffer = vec![0 as u8; self.mapper.len() * BYTES_PER_PIXEL];

        let rows_per_band = height / max(threads, 1) + 1;
        let band_len = rows_per_band * width * BYTES_PER_PIXEL;
        crossbeam::scope(|spawner| {
            for (i, band) in buffer.chunks_mut(band_len).enumerate() {
                let top = i * rows_per_band;
                let rows = top..top + band.len() / (width * BYTES_PER_PIXEL);
                spawner.spawn(move |_| {
                    self.render_rows(rows, band);
                });
            }
        })
        .unwrap();

        (buffer, start.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use viewport::ViewSpec;

    fn tiny_spec() -> ViewSpec {
        ViewSpec {
            max_iterations: 200,
            width: 4,
            height: 4,
            ..ViewSpec::default()
        }
    }

    #[test]
    fn render_rejects_malformed_views() {
        let mut s = tiny_spec();
        s.zoom = 0.0;
        assert!(render(&s).is_err());
        s = tiny_spec();
        s.max_iterations = 0;
        assert!(render(&s).is_err());
        s = tiny_spec();
        s.width = 0;
        assert!(render(&s).is_err());
        s = tiny_spec();
        s.height = 0;
        assert!(render(&s).is_err());
    }

    #[test]
    fn tiny_view_produces_a_64_byte_buffer() {
        let (pixels, _) = render(&tiny_spec()).unwrap();
        assert_eq!(pixels.len(), 4 * 4 * 4);
    }

    #[test]
    fn every_pixel_is_opaque() {
        let (pixels, _) = render(&tiny_spec()).unwrap();
        for px in pixels.chunks(4) {
            assert_eq!(px[3], 0xff);
        }
    }

    #[test]
    fn cardioid_center_pixel_is_black() {
        // Pixel (2, 2) of the 4x4 default view lands exactly on
        // (-0.5, 0), deep inside the main cardioid.
        let (pixels, _) = render(&tiny_spec()).unwrap();
        let offset = (2 * 4 + 2) * 4;
        assert_eq!(&pixels[offset..offset + 4], &[0, 0, 0, 0xff]);
    }

    #[test]
    fn corner_pixel_escapes_immediately() {
        // Pixel (0, 0) maps to (-2.25, -1.75), outside the radius-2
        // circle, so its orbit escapes on the first iteration.
        let r = EscapeTimeRenderer::new(&tiny_spec()).unwrap();
        assert_eq!(r.escape_time(Complex::new(-2.25, -1.75)), 1);
    }

    #[test]
    fn render_is_deterministic() {
        let spec = ViewSpec {
            width: 16,
            height: 12,
            max_iterations: 100,
            ..ViewSpec::default()
        };
        let (first, _) = render(&spec).unwrap();
        let (second, _) = render(&spec).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn iteration_counts_never_exceed_the_budget() {
        let r = EscapeTimeRenderer::new(&tiny_spec()).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                let vm = ViewportMapper::new(&tiny_spec()).unwrap();
                assert!(r.escape_time(vm.pixel_to_point(x, y)) <= 200);
            }
        }
    }

    #[test]
    fn early_escapes_ignore_a_bigger_budget() {
        let mut small = tiny_spec();
        small.max_iterations = 100;
        let mut big = tiny_spec();
        big.max_iterations = 200;
        let c = Complex::new(1.5, 1.5); // escapes almost at once
        let n = EscapeTimeRenderer::new(&small).unwrap().escape_time(c);
        let m = EscapeTimeRenderer::new(&big).unwrap().escape_time(c);
        assert!(n < 100);
        assert_eq!(n, m);
    }

    #[test]
    fn row_partitions_concatenate_to_the_full_render() {
        let spec = ViewSpec {
            width: 32,
            height: 11,
            max_iterations: 150,
            ..ViewSpec::default()
        };
        let r = EscapeTimeRenderer::new(&spec).unwrap();
        let (whole, _) = r.render();

        let row_bytes = 32 * 4;
        let mut pieced = Vec::new();
        for rows in vec![0..1, 1..4, 4..10, 10..11] {
            let mut band = vec![0 as u8; rows.len() * row_bytes];
            r.render_rows(rows, &mut band);
            pieced.extend_from_slice(&band);
        }
        assert_eq!(pieced, whole);
    }

    #[test]
    fn threaded_render_matches_single_threaded() {
        let spec = ViewSpec {
            width: 40,
            height: 23,
            max_iterations: 120,
            ..ViewSpec::default()
        };
        let r = EscapeTimeRenderer::new(&spec).unwrap();
        let (single, _) = r.render();
        let (threaded, _) = r.render_threaded(4);
        assert_eq!(single, threaded);
        // Zero workers degrades to one, not a panic.
        let (degenerate, _) = r.render_threaded(0);
        assert_eq!(single, degenerate);
    }
}
