//! Decoding stream data.

use crate::error::Result;
use crate::filter::predictor::PredictorParams;
use crate::object::Object;
use crate::object::dict::Dict;
use crate::object::dict::keys::{DECODE_PARMS, FILTER, FL, FLATE_DECODE};
use std::fmt::{Display, Formatter};

pub(crate) mod flate;
pub(crate) mod predictor;

pub use predictor::apply_png_predictor;

/// The algorithm that was used to decode stream data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeAlgorithm {
    /// The data was returned as stored in the file.
    Raw,
    /// The data was inflated, and possibly had a predictor reversed.
    Deflate,
}

impl DecodeAlgorithm {
    /// Returns the name of the algorithm.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Deflate => "deflate",
        }
    }
}

impl Display for DecodeAlgorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The decoded data of a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// How the data was decoded.
    pub algorithm: DecodeAlgorithm,
    /// The decoded bytes.
    pub data: Vec<u8>,
}

/// Decodes the raw data of a stream with the given dictionary.
///
/// Only `FlateDecode` is applied, either as the sole filter name or as the only entry of a
/// filter array. Everything else is passed through unchanged.
pub(crate) fn decode(dict: &Dict, raw: &[u8]) -> Result<Decoded> {
    let Some(params) = flate_params(dict) else {
        if let Some(filter) = dict.get(FILTER) {
            ldebug!("unsupported filter {:?}, returning raw data", filter);
        }

        return Ok(Decoded {
            algorithm: DecodeAlgorithm::Raw,
            data: raw.to_vec(),
        });
    };

    let inflated = flate::inflate(raw)?;
    let data = match params {
        Some(params) if params.is_predicted() => params.apply(&inflated)?,
        _ => inflated,
    };

    Ok(Decoded {
        algorithm: DecodeAlgorithm::Deflate,
        data,
    })
}

/// Returns `None` if the stream is not flate-encoded, and otherwise the predictor parameters,
/// if any.
fn flate_params(dict: &Dict) -> Option<Option<PredictorParams>> {
    let is_flate = |obj: &Object| {
        obj.as_name()
            .is_some_and(|n| &**n == FLATE_DECODE || &**n == FL)
    };

    let params = match dict.get(FILTER)? {
        Object::Array(filters) if filters.len() == 1 && is_flate(&filters[0]) => {
            match dict.get(DECODE_PARMS) {
                Some(Object::Array(params)) => params.first().and_then(Object::as_dict),
                other => other.and_then(Object::as_dict),
            }
        }
        filter if is_flate(filter) => dict.get(DECODE_PARMS).and_then(Object::as_dict),
        _ => return None,
    };

    Some(params.map(PredictorParams::from_params))
}
