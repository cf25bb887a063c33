//! C-ABI FFI bindings for cross-language integration.
//!
//! Lets a host written in another language (a webview shell, a C# or Python
//! UI) run the formatter in-process.

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use crate::render::{self, FormatOptions};

/// Result structure returned by FFI functions.
#[repr(C)]
pub struct ChatfmtResult {
    /// Whether the operation succeeded.
    pub success: bool,
    /// The result data (null if failed). Must be freed with `chatfmt_free_result`.
    pub data: *mut c_char,
    /// Error message (null if succeeded). Must be freed with `chatfmt_free_result`.
    pub error: *mut c_char,
}

impl ChatfmtResult {
    fn success(data: String) -> Self {
        Self {
            success: true,
            data: CString::new(data).unwrap_or_default().into_raw(),
            error: ptr::null_mut(),
        }
    }

    fn error(message: String) -> Self {
        Self {
            success: false,
            data: ptr::null_mut(),
            error: CString::new(message).unwrap_or_default().into_raw(),
        }
    }
}

unsafe fn format_raw(text: *const c_char, options: &FormatOptions) -> ChatfmtResult {
    // A null pointer is an absent reply, which formats to empty markup.
    if text.is_null() {
        return ChatfmtResult::success(String::new());
    }

    let text_str = match CStr::from_ptr(text).to_str() {
        Ok(s) => s,
        Err(_) => return ChatfmtResult::error("Invalid UTF-8 text".to_string()),
    };

    ChatfmtResult::success(render::to_html(text_str, options).into_trusted_html())
}

/// Format a reply into HTML, embedding content unescaped.
///
/// # Safety
///
/// The `text` must be null or a valid null-terminated UTF-8 string.
/// The returned result must be freed with `chatfmt_free_result`.
#[no_mangle]
pub unsafe extern "C" fn chatfmt_format(text: *const c_char) -> ChatfmtResult {
    format_raw(text, &FormatOptions::default())
}

/// Format a reply into HTML, escaping its content first.
///
/// # Safety
///
/// The `text` must be null or a valid null-terminated UTF-8 string.
/// The returned result must be freed with `chatfmt_free_result`.
#[no_mangle]
pub unsafe extern "C" fn chatfmt_format_escaped(text: *const c_char) -> ChatfmtResult {
    format_raw(text, &FormatOptions::new().escaped())
}

/// Split a reply into segments and return them as compact JSON.
///
/// # Safety
///
/// The `text` must be null or a valid null-terminated UTF-8 string.
/// The returned result must be freed with `chatfmt_free_result`.
#[no_mangle]
pub unsafe extern "C" fn chatfmt_segments_json(text: *const c_char) -> ChatfmtResult {
    let text_str = if text.is_null() {
        ""
    } else {
        match CStr::from_ptr(text).to_str() {
            Ok(s) => s,
            Err(_) => return ChatfmtResult::error("Invalid UTF-8 text".to_string()),
        }
    };

    match crate::to_segments_json(text_str, render::JsonFormat::Compact) {
        Ok(json) => ChatfmtResult::success(json),
        Err(e) => ChatfmtResult::error(e.to_string()),
    }
}

/// Free a result returned by any chatfmt function.
///
/// # Safety
///
/// The `result` must have been returned by a chatfmt function.
/// This function should only be called once per result.
#[no_mangle]
pub unsafe extern "C" fn chatfmt_free_result(result: ChatfmtResult) {
    if !result.data.is_null() {
        drop(CString::from_raw(result.data));
    }
    if !result.error.is_null() {
        drop(CString::from_raw(result.error));
    }
}

/// Get the version of the chatfmt library.
///
/// # Safety
///
/// The returned string is statically allocated and should not be freed.
#[no_mangle]
pub extern "C" fn chatfmt_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

#[cfg(test)]
mod tests {
    use super::*;

    unsafe fn data_of(result: &ChatfmtResult) -> String {
        CStr::from_ptr(result.data).to_str().unwrap().to_string()
    }

    #[test]
    fn test_version() {
        let version = chatfmt_version();
        assert!(!version.is_null());
    }

    #[test]
    fn test_null_text_is_empty() {
        unsafe {
            let result = chatfmt_format(ptr::null());
            assert!(result.success);
            assert_eq!(data_of(&result), "");
            chatfmt_free_result(result);
        }
    }

    #[test]
    fn test_format() {
        let text = CString::new("**hi**\nthere").unwrap();
        unsafe {
            let result = chatfmt_format(text.as_ptr());
            assert!(result.success);
            assert_eq!(data_of(&result), "<strong>hi</strong><br/>there");
            chatfmt_free_result(result);
        }
    }

    #[test]
    fn test_format_escaped() {
        let text = CString::new("<b>").unwrap();
        unsafe {
            let result = chatfmt_format_escaped(text.as_ptr());
            assert_eq!(data_of(&result), "&lt;b&gt;");
            chatfmt_free_result(result);
        }
    }

    #[test]
    fn test_segments_json() {
        let text = CString::new("a```b").unwrap();
        unsafe {
            let result = chatfmt_segments_json(text.as_ptr());
            assert!(result.success);
            assert!(data_of(&result).contains(r#""kind":"code""#));
            chatfmt_free_result(result);
        }
    }
}
