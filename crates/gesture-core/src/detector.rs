//! Landmark detection capability.

use crate::{Frame, LandmarkSet};

/// A hand landmark detector.
///
/// Given an RGB image, a detector reports every hand it finds as a
/// [`LandmarkSet`] whose `x`/`y` coordinates are normalized to that image's
/// size. An empty result means "no hand found". Any backend (a neural network,
/// a remote service, a scripted test double) can implement this trait.
pub trait LandmarkDetector {
    fn detect(&mut self, image: &Frame) -> Vec<LandmarkSet>;
}

impl<D: LandmarkDetector + ?Sized> LandmarkDetector for &mut D {
    fn detect(&mut self, image: &Frame) -> Vec<LandmarkSet> {
        (**self).detect(image)
    }
}

impl<D: LandmarkDetector + ?Sized> LandmarkDetector for Box<D> {
    fn detect(&mut self, image: &Frame) -> Vec<LandmarkSet> {
        (**self).detect(image)
    }
}

/// Detector backed by a closure. Created by [`from_fn`].
pub struct FnDetector<F> {
    f: F,
}

/// Wrap a closure as a [`LandmarkDetector`].
pub fn from_fn<F>(f: F) -> FnDetector<F>
where
    F: FnMut(&Frame) -> Vec<LandmarkSet>,
{
    FnDetector { f }
}

impl<F> LandmarkDetector for FnDetector<F>
where
    F: FnMut(&Frame) -> Vec<LandmarkSet>,
{
    fn detect(&mut self, image: &Frame) -> Vec<LandmarkSet> {
        (self.f)(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LandmarkPoint;

    #[test]
    fn closure_detector_sees_every_frame() {
        let mut calls = 0;
        {
            let mut det = from_fn(|img: &Frame| {
                calls += 1;
                vec![LandmarkSet::new(vec![LandmarkPoint::new(
                    img.width() as f32,
                    0.0,
                    0.0,
                )])]
            });
            let out = det.detect(&Frame::new(7, 3));
            assert_eq!(out[0].points()[0].x, 7.0);
            let boxed: &mut dyn LandmarkDetector = &mut det;
            assert_eq!(boxed.detect(&Frame::new(2, 2)).len(), 1);
        }
        assert_eq!(calls, 2);
    }
}
