//! Reversing PNG row predictors.

use crate::error::{Error, Result};
use crate::object::dict::Dict;
use crate::object::dict::keys::{BITS_PER_COMPONENT, COLORS, COLUMNS, PREDICTOR};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PredictorParams {
    pub(crate) predictor: u64,
    pub(crate) colors: usize,
    pub(crate) bits_per_component: usize,
    pub(crate) columns: usize,
}

impl Default for PredictorParams {
    fn default() -> Self {
        Self {
            predictor: 0,
            colors: 1,
            bits_per_component: 8,
            columns: 1,
        }
    }
}

impl PredictorParams {
    pub(crate) fn from_params(dict: &Dict) -> Self {
        let defaults = Self::default();
        let get = |key: &[u8], default: usize| {
            dict.get_uint(key)
                .and_then(|v| usize::try_from(v).ok())
                .unwrap_or(default)
        };

        Self {
            predictor: dict.get_uint(PREDICTOR).unwrap_or(defaults.predictor),
            colors: get(COLORS, defaults.colors),
            bits_per_component: get(BITS_PER_COMPONENT, defaults.bits_per_component),
            columns: get(COLUMNS, defaults.columns),
        }
    }

    /// Whether the data was transformed with a predictor at all.
    pub(crate) fn is_predicted(&self) -> bool {
        self.predictor != 0
    }

    fn bits_per_pixel(&self) -> Result<usize> {
        self.colors
            .checked_mul(self.bits_per_component)
            .ok_or(Error::InvalidPredictorParams)
    }

    /// The distance between a byte and its left neighbour, at least 1.
    fn bytes_per_pixel(&self) -> Result<usize> {
        Ok(self.bits_per_pixel()?.div_ceil(8).max(1))
    }

    /// Samples are packed, so a row is only padded to a full byte at its end.
    fn row_length_in_bytes(&self) -> Result<usize> {
        Ok(self
            .columns
            .checked_mul(self.bits_per_pixel()?)
            .ok_or(Error::InvalidPredictorParams)?
            .div_ceil(8))
    }

    /// Reverses the prediction of each row.
    ///
    /// Every row starts with a tag byte that selects how the row was predicted.
    pub(crate) fn apply(&self, data: &[u8]) -> Result<Vec<u8>> {
        let row_len = self.row_length_in_bytes()?;
        let bpp = self.bytes_per_pixel()?;
        // +1 because each row starts with its predictor tag.
        let tagged_len = row_len
            .checked_add(1)
            .ok_or(Error::InvalidPredictorParams)?;
        let rows = data.chunks_exact(tagged_len);

        if !rows.remainder().is_empty() {
            lwarn!(
                "dropping {} trailing bytes that do not form a full predictor row",
                rows.remainder().len()
            );
        }

        let mut out = Vec::with_capacity(data.len() / tagged_len * row_len);

        for row in rows {
            let Some((&tag, row)) = row.split_first() else {
                continue;
            };
            let row_start = out.len();
            let prev_row_start = row_start.checked_sub(row_len);

            match tag {
                0 => out.extend_from_slice(row),
                1 => {
                    for (i, &b) in row.iter().enumerate() {
                        let left = if i >= bpp { out[row_start + i - bpp] } else { 0 };
                        out.push(b.wrapping_add(left));
                    }
                }
                2 => {
                    for (i, &b) in row.iter().enumerate() {
                        let up = prev_row_start.map_or(0, |start| out[start + i]);
                        out.push(b.wrapping_add(up));
                    }
                }
                other => return Err(Error::UnknownPredictor(other)),
            }
        }

        Ok(out)
    }
}

/// Reverses PNG predictors on rows of `columns` bytes, each preceded by its tag byte.
///
/// Tag 0 leaves the row unchanged, tag 1 (`Sub`) adds the previous byte of the same row and
/// tag 2 (`Up`) adds the byte in the same column of the previous row. Any other tag results in
/// [`Error::UnknownPredictor`]. A trailing partial row is dropped.
pub fn apply_png_predictor(columns: usize, data: &[u8]) -> Result<Vec<u8>> {
    PredictorParams {
        predictor: 10,
        columns,
        ..PredictorParams::default()
    }
    .apply(data)
}
