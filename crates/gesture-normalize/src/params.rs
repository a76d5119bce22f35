use serde::{Deserialize, Serialize};

/// Configuration for the landmark normalizer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerParams {
    /// Canvas width in pixels.
    pub canvas_width: u32,
    /// Canvas height in pixels.
    pub canvas_height: u32,
    /// RGB fill for canvas pixels not covered by the crop.
    pub background: [u8; 3],
}

impl Default for NormalizerParams {
    fn default() -> Self {
        Self {
            canvas_width: 400,
            canvas_height: 400,
            background: [0, 0, 0],
        }
    }
}

/// Normalizer configuration errors.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizerParamsError {
    #[error("canvas size must be non-zero (got {width}x{height})")]
    InvalidCanvasSize { width: u32, height: u32 },
}

impl NormalizerParams {
    pub fn validate(&self) -> Result<(), NormalizerParamsError> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(NormalizerParamsError::InvalidCanvasSize {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let params: NormalizerParams =
            serde_json::from_str(r#"{ "canvas_width": 256 }"#).expect("parse");
        assert_eq!(params.canvas_width, 256);
        assert_eq!(params.canvas_height, 400);
        assert_eq!(params.background, [0, 0, 0]);
    }

    #[test]
    fn zero_sized_canvas_is_rejected() {
        let params = NormalizerParams {
            canvas_height: 0,
            ..NormalizerParams::default()
        };
        assert_eq!(
            params.validate(),
            Err(NormalizerParamsError::InvalidCanvasSize {
                width: 400,
                height: 0
            })
        );
    }
}
