//! Batch processing WASM bindings.
//!
//! One parameters object is applied to every uploaded file. Each file
//! succeeds or fails on its own.

use geoxform_core::batch::{process_encoded_batch, BatchOptions};
use geoxform_core::transform::TransformParameters;
use js_sys::{Array, Uint8Array};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Decode, transform and PNG-encode each file in `files`.
///
/// # Arguments
///
/// * `files` - Array of `Uint8Array` file contents (JPEG or PNG)
/// * `params` - Transform parameters object, as for `apply_transform`
///
/// # Returns
///
/// An array the same length as `files`. Each entry is a `Uint8Array` of
/// PNG bytes, or a string describing why that file failed.
///
/// # Errors
///
/// Returns an error only if `params` cannot be read; per-file failures are
/// reported in the returned array.
#[wasm_bindgen]
pub fn process_batch(files: Array, params: JsValue) -> Result<Array, JsValue> {
    let params: TransformParameters = serde_wasm_bindgen::from_value(params)
        .map_err(|e| JsValue::from_str(&format!("Invalid transform parameters: {}", e)))?;

    let entries: Vec<Option<Vec<u8>>> = files
        .iter()
        .map(|file| file.dyn_into::<Uint8Array>().ok().map(|bytes| bytes.to_vec()))
        .collect();

    let results = process_entries(&entries, &params);

    let output = Array::new_with_length(results.len() as u32);
    for (index, result) in results.into_iter().enumerate() {
        let entry = match result {
            Ok(png) => Uint8Array::from(png.as_slice()).into(),
            Err(message) => JsValue::from_str(&message),
        };
        output.set(index as u32, entry);
    }
    Ok(output)
}

/// Run the readable entries through the batch and slot the results back in
/// place. Entries that were not byte arrays get their own error message.
fn process_entries(
    entries: &[Option<Vec<u8>>],
    params: &TransformParameters,
) -> Vec<Result<Vec<u8>, String>> {
    let inputs: Vec<&[u8]> = entries.iter().flatten().map(Vec::as_slice).collect();
    let mut processed = process_encoded_batch(&inputs, params, &BatchOptions::sequential()).into_iter();

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            None => Err(format!("entry {} is not a Uint8Array", index)),
            Some(_) => match processed.next() {
                Some(result) => result.map_err(|e| e.to_string()),
                None => Err(format!("entry {} was not processed", index)),
            },
        })
        .collect()
}
