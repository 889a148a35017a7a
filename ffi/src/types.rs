//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` for strings (null for absent optionals), a pointer plus
//! length for the item array, and an explicit error-code enum. Conversions
//! live here so `lib.rs` stays focused on the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use feed_core::{FeedItem, LoadFeedResult, LoaderError};
use url::Url;

/// Opaque handle to a feed endpoint. C callers receive a pointer to this and
/// pass it back into every FFI function.
pub struct FfiFeedClient {
    pub(crate) url: Url,
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The body is a byte buffer, not a C string: feed payloads are JSON and may
/// legitimately be empty. `body` may be null only when `body_len` is 0. The
/// FFI layer reads but does not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const u8,
    pub body_len: usize,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiFeedResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    Connectivity = 1,
    InvalidData = 2,
    Panic = 3,
    NullArg = 4,
}

/// A single feed item exposed to C. `description` and `location` are null
/// when absent.
#[repr(C)]
pub struct FfiFeedItem {
    pub id: *mut c_char,
    pub description: *mut c_char,
    pub location: *mut c_char,
    pub image_url: *mut c_char,
}

/// Result envelope for every operation that yields a feed.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `items`
/// points to `items_len` entries (null when the feed is empty). On failure
/// `items` is null and `error_message` is a human-readable C string.
#[repr(C)]
pub struct FfiFeedResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub items: *mut FfiFeedItem,
    pub items_len: usize,
}

/// Convert to an owned C string, dropping interior NULs rather than failing.
pub(crate) fn into_c_string(s: String) -> *mut c_char {
    let cstring = CString::new(s).unwrap_or_else(|e| {
        let mut bytes = e.into_vec();
        bytes.retain(|b| *b != 0);
        CString::new(bytes).unwrap_or_default()
    });
    cstring.into_raw()
}

fn into_nullable_c_string(s: Option<String>) -> *mut c_char {
    s.map(into_c_string).unwrap_or(std::ptr::null_mut())
}

impl From<FeedItem> for FfiFeedItem {
    fn from(item: FeedItem) -> Self {
        FfiFeedItem {
            id: into_c_string(item.id.to_string()),
            description: into_nullable_c_string(item.description),
            location: into_nullable_c_string(item.location),
            image_url: into_c_string(item.image_url.into()),
        }
    }
}

impl FfiFeedResult {
    pub(crate) fn from_load(result: LoadFeedResult) -> *mut Self {
        match result {
            Ok(items) => Self::ok_items(items),
            Err(e) => Self::from_error(e),
        }
    }

    /// Build a success result owning the converted items.
    pub(crate) fn ok_items(items: Vec<FeedItem>) -> *mut Self {
        let items_len = items.len();
        let items = if items.is_empty() {
            std::ptr::null_mut()
        } else {
            let boxed: Box<[FfiFeedItem]> = items.into_iter().map(FfiFeedItem::from).collect();
            Box::into_raw(boxed) as *mut FfiFeedItem
        };

        Box::into_raw(Box::new(FfiFeedResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            items,
            items_len,
        }))
    }

    /// Build an error result from a `LoaderError`.
    pub(crate) fn from_error(err: LoaderError) -> *mut Self {
        let error_code = match err {
            LoaderError::Connectivity => FfiErrorCode::Connectivity,
            LoaderError::InvalidData => FfiErrorCode::InvalidData,
        };
        Self::failure(error_code, err.to_string())
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::failure(FfiErrorCode::NullArg, format!("null argument: {name}"))
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::failure(FfiErrorCode::Panic, msg.to_string())
    }

    fn failure(error_code: FfiErrorCode, msg: String) -> *mut Self {
        Box::into_raw(Box::new(FfiFeedResult {
            error_code,
            error_message: into_c_string(msg),
            items: std::ptr::null_mut(),
            items_len: 0,
        }))
    }
}
