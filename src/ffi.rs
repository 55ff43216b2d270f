//! FFI interface for C/C++ hosts
//!
//! Provides C-compatible functions for extracting products from HTML.
//! Requests and results are passed as JSON for simplicity and type safety.

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use crate::extractors::{decode_document, ExtractionRequest};
use crate::pipeline::default_extractor;

/// Result struct returned to the host
/// Both pointers are owned by Rust and must be freed via sp_free_result
#[repr(C)]
pub struct ExtractionResultFFI {
    /// JSON-serialized ExtractionReport (null-terminated)
    pub json_ptr: *mut c_char,
    /// Error message if extraction failed (null-terminated), or null on success
    pub error_ptr: *mut c_char,
}

/// Extract products from HTML.
///
/// # Arguments
/// * `html_ptr` - Pointer to HTML content (UTF-8, not necessarily null-terminated).
///   Invalid UTF-8 sequences are dropped. A null pointer or zero length is
///   treated as a missing document.
/// * `html_len` - Length of HTML content in bytes
/// * `request_json` - JSON-serialized ExtractionRequest (null-terminated)
///
/// # Returns
/// ExtractionResultFFI with either json_ptr set (success) or error_ptr set (failure)
///
/// # Safety
/// - `html_ptr` must point to valid memory of at least `html_len` bytes
/// - `request_json` must be a valid null-terminated C string
/// - Caller must free the result via `sp_free_result`
#[no_mangle]
pub unsafe extern "C" fn sp_extract_products(
    html_ptr: *const c_char,
    html_len: usize,
    request_json: *const c_char,
) -> ExtractionResultFFI {
    let html = if html_ptr.is_null() || html_len == 0 {
        None
    } else {
        let slice = std::slice::from_raw_parts(html_ptr as *const u8, html_len);
        Some(decode_document(slice))
    };

    if request_json.is_null() {
        return make_error_result("Request JSON is null");
    }
    let request_str = match CStr::from_ptr(request_json).to_str() {
        Ok(s) => s,
        Err(_) => return make_error_result("Invalid UTF-8 in request JSON"),
    };

    let request: ExtractionRequest = match serde_json::from_str(request_str) {
        Ok(r) => r,
        Err(e) => return make_error_result(&format!("Failed to parse request JSON: {}", e)),
    };

    let report = default_extractor().extract(html.as_deref(), &request);

    match serde_json::to_string(&report) {
        Ok(json) => match CString::new(json) {
            Ok(cstr) => ExtractionResultFFI {
                json_ptr: cstr.into_raw(),
                error_ptr: ptr::null_mut(),
            },
            Err(_) => make_error_result("Result JSON contains null bytes"),
        },
        Err(e) => make_error_result(&format!("Failed to serialize result: {}", e)),
    }
}

/// Free an ExtractionResultFFI returned by sp_extract_products
///
/// # Safety
/// - `result` must have been returned by `sp_extract_products`
/// - Must only be called once per result
#[no_mangle]
pub unsafe extern "C" fn sp_free_result(result: ExtractionResultFFI) {
    if !result.json_ptr.is_null() {
        drop(CString::from_raw(result.json_ptr));
    }
    if !result.error_ptr.is_null() {
        drop(CString::from_raw(result.error_ptr));
    }
}

// Helper to create error result
fn make_error_result(msg: &str) -> ExtractionResultFFI {
    let error_ptr = CString::new(msg)
        .or_else(|_| CString::new("Unknown error"))
        .map(CString::into_raw)
        .unwrap_or(ptr::null_mut());
    ExtractionResultFFI {
        json_ptr: ptr::null_mut(),
        error_ptr,
    }
}
