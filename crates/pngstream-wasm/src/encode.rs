//! PNG encoding WASM bindings.
//!
//! This module exposes the pngstream-core encoder bridge to JavaScript. The
//! destination is a plain JavaScript function that receives each encoded
//! chunk as a `Uint8Array`, so any host stream (File System Access writable,
//! fetch body, in-memory array) can sit behind it.
//!
//! # Functions
//!
//! - [`encode_png`] - Encode pixels described by a [`JsPixelDescriptor`]
//!
//! # Example
//!
//! ```typescript
//! import { encode_png } from '@pngstream/wasm';
//!
//! // The callback runs synchronously: collect chunks, then write them out
//! const chunks: Uint8Array[] = [];
//! encode_png(pixels, { width, height, layout: 'rgb' }, 90, (chunk) => {
//!   chunks.push(chunk);
//! });
//! const writable = await fileHandle.createWritable();
//! await writable.write(new Blob(chunks, { type: 'image/png' }));
//! await writable.close();
//! ```
//!
//! The callback must report failure synchronously, by throwing or returning
//! `false`. A rejected promise returned from it is not observed.

use js_sys::{Function, Uint8Array};
use pngstream_core::{encode, ByteSink, SinkError};
use wasm_bindgen::prelude::*;

use crate::types::JsPixelDescriptor;

/// Byte sink that forwards every chunk to a JavaScript callback.
///
/// The callback fails the write by throwing or by returning `false`.
/// Each chunk is copied into a fresh `Uint8Array`, so the callback may keep it.
struct JsFunctionSink<'f> {
    write: &'f Function,
}

impl ByteSink for JsFunctionSink<'_> {
    fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), SinkError> {
        let array = Uint8Array::from(chunk);
        match self.write.call1(&JsValue::NULL, &array) {
            Ok(ret) if ret.as_bool() == Some(false) => {
                Err(SinkError::rejected("JavaScript sink returned false"))
            }
            Ok(_) => Ok(()),
            Err(err) => Err(SinkError::rejected(format!(
                "JavaScript sink threw: {}",
                describe(&err)
            ))),
        }
    }
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

/// Encode decoded pixels to PNG, streaming the output to `write`.
///
/// # Arguments
///
/// * `pixels` - Pixel bytes as a `Uint8Array`, row-major, `stride * height` long
/// * `descriptor` - `{ width, height, layout, bitDepth?, stride? }`
/// * `quality` - Compression effort 0-100; out-of-range values are clamped
/// * `write` - Called once per encoded chunk with a `Uint8Array`
///
/// # Errors
///
/// Returns an error if:
/// - The descriptor cannot be parsed
/// - The descriptor does not match the pixel buffer
/// - Encoding fails internally
/// - The `write` callback throws or returns `false`
///
/// On error, chunks already passed to `write` do not form a valid PNG and
/// should be discarded.
#[wasm_bindgen]
pub fn encode_png(
    pixels: &[u8],
    descriptor: JsValue,
    quality: i32,
    write: &Function,
) -> Result<(), JsValue> {
    let descriptor: JsPixelDescriptor = serde_wasm_bindgen::from_value(descriptor)
        .map_err(|e| JsValue::from_str(&format!("Invalid pixel descriptor: {}", e)))?;

    let mut sink = JsFunctionSink { write };
    encode(descriptor.source(pixels), quality, &mut sink)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
