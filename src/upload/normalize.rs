// canonical location extraction from upload responses

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// one place the backend may put the stored location, as a json pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationShape {
    pub name: &'static str,
    pub pointer: &'static str,
}

const DATA_URL: LocationShape = LocationShape {
    name: "data.url",
    pointer: "/data/url",
};

/// lookup order for the image endpoint, first populated field wins
pub const ALL_SHAPES: &[LocationShape] = &[
    DATA_URL,
    LocationShape {
        name: "filePath",
        pointer: "/filePath",
    },
    LocationShape {
        name: "publicPath",
        pointer: "/publicPath",
    },
    LocationShape {
        name: "path",
        pointer: "/path",
    },
    LocationShape {
        name: "filename",
        pointer: "/filename",
    },
];

/// the document endpoint only ever answers with `data.url`
pub const DATA_URL_ONLY: &[LocationShape] = &[DATA_URL];

#[derive(Debug, Error)]
#[error("Respons server tidak berisi lokasi file")]
pub struct MissingLocation {
    pub raw: Value,
}

/// extract the stored location using every known shape
pub fn extract_location(raw: &Value) -> Result<String, MissingLocation> {
    extract_location_with(raw, ALL_SHAPES)
}

/// extract the stored location probing `shapes` in order
pub fn extract_location_with(
    raw: &Value,
    shapes: &[LocationShape],
) -> Result<String, MissingLocation> {
    shapes
        .iter()
        .find_map(|shape| {
            let location = populated(raw.pointer(shape.pointer))?;
            debug!("location found under {}: {}", shape.name, location);
            Some(location.to_string())
        })
        .ok_or_else(|| MissingLocation { raw: raw.clone() })
}

// only non-blank strings count
fn populated(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
