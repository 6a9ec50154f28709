//! Ticket asset loading
//!
//! QR codes and logos are referenced by the registration record as a single
//! URI string: a `data:` URL, an `http(s)` URL (behind the `remote-assets`
//! feature), or a local file path. Asset failures are reported to the caller,
//! which degrades them to a painted placeholder rather than failing the
//! raster.

use crate::error::{Error, Result};
use base64::Engine as Base64Engine;
use image::DynamicImage;
use serde::{Deserialize, Serialize};

/// Reference to an image asset, as carried in the registration record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetRef(pub String);

impl AssetRef {
    pub fn data_url(payload: impl Into<String>) -> Self {
        Self(payload.into())
    }

    fn is_data_url(&self) -> bool {
        self.0.starts_with("data:")
    }

    fn is_http(&self) -> bool {
        self.0.starts_with("http://") || self.0.starts_with("https://")
    }
}

/// Resolves asset references into decoded images
#[derive(Debug, Clone, Copy, Default)]
pub struct AssetLoader;

impl AssetLoader {
    /// Load and decode an asset. `allow_remote` gates http(s) references.
    pub fn load(&self, asset: &AssetRef, allow_remote: bool) -> Result<DynamicImage> {
        let bytes = if asset.is_data_url() {
            decode_data_url(&asset.0)?
        } else if asset.is_http() {
            if !allow_remote {
                return Err(Error::AssetError(format!(
                    "remote asset fetch disabled: {}",
                    asset.0
                )));
            }
            fetch_remote(&asset.0)?
        } else {
            std::fs::read(&asset.0)
                .map_err(|e| Error::AssetError(format!("read {}: {}", asset.0, e)))?
        };

        image::load_from_memory(&bytes)
            .map_err(|e| Error::AssetError(format!("decode {}: {}", asset.0, e)))
    }
}

fn decode_data_url(uri: &str) -> Result<Vec<u8>> {
    // data:[<mediatype>][;base64],<payload>
    let comma = uri
        .find(',')
        .ok_or_else(|| Error::AssetError("malformed data URL: missing comma".into()))?;
    let (header, payload) = uri.split_at(comma);
    let payload = &payload[1..];
    if !header.ends_with(";base64") {
        return Err(Error::AssetError("data URL is not base64 encoded".into()));
    }
    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| Error::AssetError(format!("base64 decode: {}", e)))
}

#[cfg(feature = "remote-assets")]
fn fetch_remote(uri: &str) -> Result<Vec<u8>> {
    let parsed = url::Url::parse(uri).map_err(|e| Error::AssetError(format!("{}: {}", uri, e)))?;
    let resp = reqwest::blocking::get(parsed.clone())
        .map_err(|e| Error::NetworkError(format!("GET {}: {}", parsed, e)))?;
    if !resp.status().is_success() {
        return Err(Error::NetworkError(format!("GET {}: {}", parsed, resp.status())));
    }
    let bytes = resp
        .bytes()
        .map_err(|e| Error::NetworkError(format!("GET {}: {}", parsed, e)))?;
    Ok(bytes.to_vec())
}

#[cfg(not(feature = "remote-assets"))]
fn fetch_remote(uri: &str) -> Result<Vec<u8>> {
    Err(Error::AssetError(format!(
        "remote asset support not compiled in (enable `remote-assets`): {}",
        uri
    )))
}
