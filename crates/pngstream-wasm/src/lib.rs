//! pngstream WASM - WebAssembly bindings for pngstream
//!
//! This crate exposes the pngstream-core encoder bridge to JavaScript/TypeScript
//! applications. Pixels stay in WASM memory for the duration of the call and
//! encoded bytes are pushed to a JavaScript callback chunk by chunk.
//!
//! # Module Structure
//!
//! - `types` - Pixel descriptor accepted from JavaScript
//! - `encode` - PNG encoding binding and the JavaScript byte sink
//! - `logger` - Routes `log` records to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { encode_png } from '@pngstream/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const chunks: Uint8Array[] = [];
//! encode_png(pixels, { width, height, layout: 'rgba' }, 90, (chunk) => {
//!   chunks.push(chunk);
//! });
//! const blob = new Blob(chunks, { type: 'image/png' });
//! ```

use wasm_bindgen::prelude::*;

mod encode;
mod logger;
mod types;

// Re-export public types
pub use encode::encode_png;
pub use logger::set_log_level;
pub use types::JsPixelDescriptor;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::install(log::LevelFilter::Warn);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
