//! FFI bindings for stepflux
//!
//! C-compatible functions for calling stepflux from other languages. Strings are
//! null-terminated UTF-8. Returned strings are allocated by Rust and must be
//! released with `stepflux_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::config::MetricsConfig;
use crate::summary::{daily_summary, training_summary, SummaryProcessor};
use crate::types::BiometricProfile;

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Convert a C string to an owned Rust string. `None` for NULL or invalid UTF-8.
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Convert a Rust string to a C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => {
            set_last_error("Result contains an interior NUL byte");
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Stateless API
// ============================================================================

/// Daily summary for a `"<steps>,<duration>"` entry.
///
/// An empty string (not NULL) is returned for a rejected entry.
///
/// # Safety
/// - `entry` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `stepflux_free_string`.
/// - Returns NULL when `entry` is NULL or not UTF-8; call `stepflux_last_error`.
#[no_mangle]
pub unsafe extern "C" fn stepflux_daily_summary(
    entry: *const c_char,
    weight_kg: f64,
    height_cm: f64,
) -> *mut c_char {
    clear_last_error();

    let entry_str = match cstr_to_string(entry) {
        Some(s) => s,
        None => {
            set_last_error("Invalid entry string pointer");
            return ptr::null_mut();
        }
    };

    string_to_cstr(&daily_summary(&entry_str, weight_kg, height_cm))
}

/// Training summary for a `"<steps>,<label>,<duration>"` entry.
///
/// # Safety
/// - `entry` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `stepflux_free_string`.
/// - Returns NULL when `entry` is NULL or not UTF-8; call `stepflux_last_error`.
#[no_mangle]
pub unsafe extern "C" fn stepflux_training_summary(
    entry: *const c_char,
    weight_kg: f64,
    height_cm: f64,
) -> *mut c_char {
    clear_last_error();

    let entry_str = match cstr_to_string(entry) {
        Some(s) => s,
        None => {
            set_last_error("Invalid entry string pointer");
            return ptr::null_mut();
        }
    };

    string_to_cstr(&training_summary(&entry_str, weight_kg, height_cm))
}

// ============================================================================
// Configured Processor API
// ============================================================================

/// Opaque handle to a SummaryProcessor
pub struct StepfluxProcessorHandle {
    processor: SummaryProcessor,
}

/// Create a processor from a JSON config, or with defaults when `config_json`
/// is NULL.
///
/// # Safety
/// - `config_json` must be NULL or a valid null-terminated C string.
/// - Must be freed with `stepflux_processor_free`.
/// - Returns NULL on an invalid config; call `stepflux_last_error`.
#[no_mangle]
pub unsafe extern "C" fn stepflux_processor_new(
    config_json: *const c_char,
) -> *mut StepfluxProcessorHandle {
    clear_last_error();

    let config = if config_json.is_null() {
        MetricsConfig::default()
    } else {
        let json = match cstr_to_string(config_json) {
            Some(s) => s,
            None => {
                set_last_error("Invalid config string pointer");
                return ptr::null_mut();
            }
        };
        match MetricsConfig::from_json(&json) {
            Ok(config) => config,
            Err(e) => {
                set_last_error(&e.to_string());
                return ptr::null_mut();
            }
        }
    };

    let handle = Box::new(StepfluxProcessorHandle {
        processor: SummaryProcessor::with_config(config),
    });
    Box::into_raw(handle)
}

/// Free a processor.
///
/// # Safety
/// - `processor` must be a pointer returned by `stepflux_processor_new`, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn stepflux_processor_free(processor: *mut StepfluxProcessorHandle) {
    if !processor.is_null() {
        drop(Box::from_raw(processor));
    }
}

/// Daily summary using the processor's configuration.
///
/// # Safety
/// - `processor` must be a valid pointer returned by `stepflux_processor_new`.
/// - `entry` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `stepflux_free_string`.
#[no_mangle]
pub unsafe extern "C" fn stepflux_processor_daily(
    processor: *const StepfluxProcessorHandle,
    entry: *const c_char,
    weight_kg: f64,
    height_cm: f64,
) -> *mut c_char {
    clear_last_error();

    if processor.is_null() {
        set_last_error("Null processor pointer");
        return ptr::null_mut();
    }
    let handle = &*processor;

    let entry_str = match cstr_to_string(entry) {
        Some(s) => s,
        None => {
            set_last_error("Invalid entry string pointer");
            return ptr::null_mut();
        }
    };

    let profile = BiometricProfile::new(weight_kg, height_cm);
    string_to_cstr(&handle.processor.daily_report(&entry_str, &profile))
}

/// Training summary using the processor's configuration.
///
/// # Safety
/// - `processor` must be a valid pointer returned by `stepflux_processor_new`.
/// - `entry` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `stepflux_free_string`.
#[no_mangle]
pub unsafe extern "C" fn stepflux_processor_training(
    processor: *const StepfluxProcessorHandle,
    entry: *const c_char,
    weight_kg: f64,
    height_cm: f64,
) -> *mut c_char {
    clear_last_error();

    if processor.is_null() {
        set_last_error("Null processor pointer");
        return ptr::null_mut();
    }
    let handle = &*processor;

    let entry_str = match cstr_to_string(entry) {
        Some(s) => s,
        None => {
            set_last_error("Invalid entry string pointer");
            return ptr::null_mut();
        }
    };

    let profile = BiometricProfile::new(weight_kg, height_cm);
    string_to_cstr(&handle.processor.training_report(&entry_str, &profile))
}

/// Free a string returned by stepflux functions.
///
/// # Safety
/// - `ptr` must be a pointer returned by a stepflux function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn stepflux_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Get the last error message.
///
/// # Safety
/// - The returned pointer is valid until the next stepflux call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn stepflux_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

/// Get the library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn stepflux_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
