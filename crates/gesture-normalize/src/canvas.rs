use gesture_core::Frame;
use image::{imageops, Rgb};
use serde::{Deserialize, Serialize};

use crate::{NormalizerParams, PixelRect};

/// Where a crop lands on the canvas.
///
/// `width`/`height` are the crop dimensions after truncation to the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub offset_x: u32,
    pub offset_y: u32,
    pub width: u32,
    pub height: u32,
}

/// Center a `crop_w` × `crop_h` patch on a `canvas_w` × `canvas_h` canvas.
///
/// The offset along an axis is `max((canvas - crop) / 2, 0)`; a crop larger
/// than the canvas keeps its top/left part and is truncated to fit.
pub fn centered_placement(crop_w: u32, crop_h: u32, canvas_w: u32, canvas_h: u32) -> Placement {
    let offset_x = canvas_w.saturating_sub(crop_w) / 2;
    let offset_y = canvas_h.saturating_sub(crop_h) / 2;
    Placement {
        offset_x,
        offset_y,
        width: crop_w.min(canvas_w - offset_x),
        height: crop_h.min(canvas_h - offset_y),
    }
}

/// Crop `rect` out of `image` and paste it centered on a fresh canvas.
///
/// Pixels are copied one-to-one; the crop is never resampled. `rect` must lie
/// inside `image` (as produced by [`BoundingBox::to_pixel_rect`]).
///
/// [`BoundingBox::to_pixel_rect`]: crate::BoundingBox::to_pixel_rect
pub fn compose_centered(
    image: &Frame,
    rect: PixelRect,
    params: &NormalizerParams,
) -> (Frame, Placement) {
    let mut canvas = Frame::from_pixel(
        params.canvas_width,
        params.canvas_height,
        Rgb(params.background),
    );
    let placement = centered_placement(
        rect.width,
        rect.height,
        params.canvas_width,
        params.canvas_height,
    );
    if placement.width > 0 && placement.height > 0 {
        let patch =
            imageops::crop_imm(image, rect.x, rect.y, placement.width, placement.height).to_image();
        imageops::replace(
            &mut canvas,
            &patch,
            i64::from(placement.offset_x),
            i64::from(placement.offset_y),
        );
    }
    (canvas, placement)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> Frame {
        Frame::from_fn(width, height, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 7]))
    }

    #[test]
    fn small_crop_is_centered() {
        let p = centered_placement(100, 51, 400, 400);
        assert_eq!(
            p,
            Placement {
                offset_x: 150,
                offset_y: 174,
                width: 100,
                height: 51,
            }
        );
    }

    #[test]
    fn oversized_crop_is_truncated_not_scaled() {
        let p = centered_placement(900, 120, 400, 400);
        assert_eq!(p.offset_x, 0);
        assert_eq!(p.width, 400);
        assert_eq!(p.offset_y, 140);
        assert_eq!(p.height, 120);
    }

    #[test]
    fn crop_pixels_are_copied_verbatim() {
        let img = gradient(320, 240);
        let rect = PixelRect {
            x: 40,
            y: 30,
            width: 20,
            height: 10,
        };
        let params = NormalizerParams {
            canvas_width: 64,
            canvas_height: 32,
            background: [9, 9, 9],
        };
        let (canvas, p) = compose_centered(&img, rect, &params);
        assert_eq!((canvas.width(), canvas.height()), (64, 32));
        assert_eq!((p.offset_x, p.offset_y), (22, 11));

        for dy in 0..rect.height {
            for dx in 0..rect.width {
                assert_eq!(
                    canvas.get_pixel(p.offset_x + dx, p.offset_y + dy),
                    img.get_pixel(rect.x + dx, rect.y + dy)
                );
            }
        }
        assert_eq!(canvas.get_pixel(0, 0), &Rgb([9, 9, 9]));
        assert_eq!(canvas.get_pixel(63, 31), &Rgb([9, 9, 9]));
    }

    #[test]
    fn truncated_crop_keeps_top_left_part() {
        let img = gradient(1000, 1000);
        let rect = PixelRect {
            x: 100,
            y: 200,
            width: 600,
            height: 500,
        };
        let (canvas, p) = compose_centered(&img, rect, &NormalizerParams::default());
        assert_eq!((p.offset_x, p.offset_y, p.width, p.height), (0, 0, 400, 400));
        assert_eq!(canvas.get_pixel(0, 0), img.get_pixel(100, 200));
        assert_eq!(canvas.get_pixel(399, 399), img.get_pixel(499, 599));
    }
}
