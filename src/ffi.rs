//! FFI interface for C/C++ callers
//!
//! Provides C-compatible functions for extracting film metadata from HTML.
//! Results cross the boundary as JSON strings.

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use tracing::warn;

use crate::extractors::Extractor;
use crate::profile::SiteProfile;

/// Result struct returned to the caller
/// Both pointers are owned by Rust and must be freed via free_extraction_result
#[repr(C)]
pub struct ExtractionResultFFI {
    /// JSON-serialized FilmMetadata (null-terminated)
    pub json_ptr: *mut c_char,
    /// Error message if extraction failed (null-terminated), or null on success
    pub error_ptr: *mut c_char,
}

/// Extract all film metadata from one HTML page.
///
/// # Arguments
/// * `html_ptr` - Pointer to HTML content (UTF-8, not necessarily null-terminated)
/// * `html_len` - Length of HTML content in bytes
/// * `profile_json` - JSON-serialized SiteProfile (null-terminated), or null for the default
///
/// # Returns
/// ExtractionResultFFI with either json_ptr set (success) or error_ptr set (failure).
/// A page whose film id or title cannot be read is a failure.
///
/// # Safety
/// - `html_ptr` must point to valid memory of at least `html_len` bytes
/// - `profile_json` must be null or a valid null-terminated C string
/// - Caller must free the result via `free_extraction_result`
#[no_mangle]
pub unsafe extern "C" fn extract_film_metadata(
    html_ptr: *const c_char,
    html_len: usize,
    profile_json: *const c_char,
) -> ExtractionResultFFI {
    let html = match read_html(html_ptr, html_len) {
        Ok(html) => html,
        Err(msg) => return make_error_result(msg),
    };

    let custom;
    let extractor = if profile_json.is_null() {
        Extractor::shared()
    } else {
        let profile_str = match CStr::from_ptr(profile_json).to_str() {
            Ok(s) => s,
            Err(_) => return make_error_result("Invalid UTF-8 in profile JSON"),
        };
        let compiled = SiteProfile::from_json(profile_str).and_then(|p| Extractor::new(&p));
        custom = match compiled {
            Ok(extractor) => extractor,
            Err(e) => return make_error_result(&e.to_string()),
        };
        &custom
    };

    let metadata = match extractor.page(html).metadata() {
        Ok(metadata) => metadata,
        Err(e) => return make_error_result(&e.to_string()),
    };

    match serde_json::to_string(&metadata) {
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

/// Free an ExtractionResultFFI returned by extract_film_metadata
///
/// # Safety
/// - `result` must have been returned by `extract_film_metadata`
/// - Must only be called once per result
#[no_mangle]
pub unsafe extern "C" fn free_extraction_result(result: ExtractionResultFFI) {
    if !result.json_ptr.is_null() {
        drop(CString::from_raw(result.json_ptr));
    }
    if !result.error_ptr.is_null() {
        drop(CString::from_raw(result.error_ptr));
    }
}

unsafe fn read_html<'a>(html_ptr: *const c_char, html_len: usize) -> Result<&'a str, &'static str> {
    if html_ptr.is_null() || html_len == 0 {
        return Ok("");
    }
    let slice = std::slice::from_raw_parts(html_ptr as *const u8, html_len);
    std::str::from_utf8(slice).map_err(|_| "Invalid UTF-8 in HTML content")
}

// Helper to create error result
fn make_error_result(msg: &str) -> ExtractionResultFFI {
    warn!(error = msg, "film metadata extraction failed");
    let error_cstr = CString::new(msg).unwrap_or_else(|_| CString::new("Unknown error").unwrap());
    ExtractionResultFFI {
        json_ptr: ptr::null_mut(),
        error_ptr: error_cstr.into_raw(),
    }
}
