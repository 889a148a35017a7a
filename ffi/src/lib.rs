//! C-ABI wrapper around `feed-core`.
//!
//! # Overview
//! Exposes the sans-IO half of the feed loader through `extern "C"`
//! functions: the host asks for the URL to fetch, performs the GET with its
//! own networking stack, and hands the response (or the fact that none
//! arrived) back for validation and mapping.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Validation is `FeedItemsMapper` from the core, so the C host and the
//!   Rust `RemoteFeedLoader` classify responses identically.
//! - A single `FfiFeedResult` envelope carries items or an error code.
//! - The C caller owns all returned pointers and must call the matching
//!   `feed_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use feed_core::{FeedItemsMapper, HttpResponse, LoaderError};
use url::Url;

use types::*;

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a feed client bound to `url`.
///
/// Returns null if `url` is null, not UTF-8, or not an absolute URL, or if an
/// internal panic occurs. The caller must free the returned pointer with
/// `feed_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn feed_client_new(url: *const c_char) -> *mut FfiFeedClient {
    catch_unwind(|| {
        if url.is_null() {
            return std::ptr::null_mut();
        }
        let Ok(url) = unsafe { CStr::from_ptr(url) }.to_str() else {
            return std::ptr::null_mut();
        };
        match Url::parse(url) {
            Ok(url) => Box::into_raw(Box::new(FfiFeedClient { url })),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `feed_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn feed_client_free(client: *mut FfiFeedClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

/// The URL the host must GET.
///
/// Returns null if `client` is null. Free with `feed_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn feed_client_url(client: *const FfiFeedClient) -> *mut c_char {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        into_c_string(client.url.to_string())
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Response handling
// ---------------------------------------------------------------------------

/// Validate and map the response the host received for `feed_client_url`.
///
/// Non-200 statuses and malformed payloads yield `InvalidData`.
#[unsafe(no_mangle)]
pub extern "C" fn feed_parse_response(
    client: *const FfiFeedClient,
    response: *const FfiHttpResponse,
) -> *mut FfiFeedResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiFeedResult::null_arg("client");
        }
        if response.is_null() {
            return FfiFeedResult::null_arg("response");
        }
        let resp = unsafe { &*response };
        let body = if resp.body_len == 0 {
            Vec::new()
        } else if resp.body.is_null() {
            return FfiFeedResult::null_arg("response.body");
        } else {
            unsafe { std::slice::from_raw_parts(resp.body, resp.body_len) }.to_vec()
        };
        let core_resp = HttpResponse::new(resp.status, body);
        FfiFeedResult::from_load(FeedItemsMapper::map(&core_resp))
    })
    .unwrap_or_else(|_| FfiFeedResult::panic("panic in feed_parse_response"))
}

/// Report that the host's transport produced no response at all.
///
/// Always yields `Connectivity` for a non-null client; transport details stay
/// on the host side.
#[unsafe(no_mangle)]
pub extern "C" fn feed_transport_failed(client: *const FfiFeedClient) -> *mut FfiFeedResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiFeedResult::null_arg("client");
        }
        FfiFeedResult::from_error(LoaderError::Connectivity)
    })
    .unwrap_or_else(|_| FfiFeedResult::panic("panic in feed_transport_failed"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiFeedResult`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn feed_free_result(result: *mut FfiFeedResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        free_c_string(result.error_message);
        if !result.items.is_null() && result.items_len > 0 {
            let items = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    result.items,
                    result.items_len,
                ))
            };
            for item in items.iter() {
                free_c_string(item.id);
                free_c_string(item.description);
                free_c_string(item.location);
                free_c_string(item.image_url);
            }
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn feed_free_string(s: *mut c_char) {
    let _ = catch_unwind(|| free_c_string(s));
}

fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    const ITEMS_BODY: &str = r#"{"items":[
        {"id":"73A7F70C-75DA-4C2E-B5A3-EED40DC53AA6","description":"Description 1","location":"Location 1","image":"https://url-1.com"},
        {"id":"FF0ECFE2-2879-403F-8DBE-A83B4010B340","image":"https://url-4.com"}
    ]}"#;

    fn client() -> *mut FfiFeedClient {
        let url = CString::new("http://localhost:3000/feed").unwrap();
        feed_client_new(url.as_ptr())
    }

    fn response(status: u16, body: &str) -> FfiHttpResponse {
        FfiHttpResponse {
            status,
            body: body.as_ptr(),
            body_len: body.len(),
        }
    }

    fn c_str<'a>(ptr: *const c_char) -> &'a str {
        unsafe { CStr::from_ptr(ptr) }.to_str().unwrap()
    }

    #[test]
    fn client_new_and_free() {
        let client = client();
        assert!(!client.is_null());
        feed_client_free(client);
    }

    #[test]
    fn client_new_null_returns_null() {
        assert!(feed_client_new(std::ptr::null()).is_null());
    }

    #[test]
    fn client_new_relative_url_returns_null() {
        let url = CString::new("feed.json").unwrap();
        assert!(feed_client_new(url.as_ptr()).is_null());
    }

    #[test]
    fn client_free_null_is_safe() {
        feed_client_free(std::ptr::null_mut());
    }

    #[test]
    fn client_url_returns_configured_url() {
        let client = client();
        let url = feed_client_url(client);
        assert_eq!(c_str(url), "http://localhost:3000/feed");
        feed_free_string(url);
        feed_client_free(client);
    }

    #[test]
    fn client_url_null_client_returns_null() {
        assert!(feed_client_url(std::ptr::null()).is_null());
    }

    #[test]
    fn parse_empty_feed() {
        let client = client();
        let resp = response(200, r#"{"items":[]}"#);
        let result = feed_parse_response(client, &resp);

        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        assert!(r.error_message.is_null());
        assert!(r.items.is_null());
        assert_eq!(r.items_len, 0);

        feed_free_result(result);
        feed_client_free(client);
    }

    #[test]
    fn parse_two_items() {
        let client = client();
        let resp = response(200, ITEMS_BODY);
        let result = feed_parse_response(client, &resp);

        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        assert_eq!(r.items_len, 2);

        let items = unsafe { std::slice::from_raw_parts(r.items, r.items_len) };
        assert_eq!(c_str(items[0].id), "73a7f70c-75da-4c2e-b5a3-eed40dc53aa6");
        assert_eq!(c_str(items[0].description), "Description 1");
        assert_eq!(c_str(items[0].location), "Location 1");
        assert_eq!(c_str(items[0].image_url), "https://url-1.com/");

        assert_eq!(c_str(items[1].id), "ff0ecfe2-2879-403f-8dbe-a83b4010b340");
        assert!(items[1].description.is_null());
        assert!(items[1].location.is_null());
        assert_eq!(c_str(items[1].image_url), "https://url-4.com/");

        feed_free_result(result);
        feed_client_free(client);
    }

    #[test]
    fn parse_non_200_is_invalid_data() {
        let client = client();
        for status in [199, 201, 300, 400, 500] {
            let resp = response(status, r#"{"items":[]}"#);
            let result = feed_parse_response(client, &resp);
            let r = unsafe { &*result };
            assert_eq!(r.error_code, FfiErrorCode::InvalidData, "status {status}");
            assert!(!r.error_message.is_null());
            assert!(r.items.is_null());
            feed_free_result(result);
        }
        feed_client_free(client);
    }

    #[test]
    fn parse_invalid_json_is_invalid_data() {
        let client = client();
        let resp = response(200, "invalid json");
        let result = feed_parse_response(client, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::InvalidData);

        feed_free_result(result);
        feed_client_free(client);
    }

    #[test]
    fn parse_empty_body_with_null_pointer_is_invalid_data() {
        let client = client();
        let resp = FfiHttpResponse {
            status: 200,
            body: std::ptr::null(),
            body_len: 0,
        };
        let result = feed_parse_response(client, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::InvalidData);

        feed_free_result(result);
        feed_client_free(client);
    }

    #[test]
    fn parse_null_body_with_length_is_null_arg() {
        let client = client();
        let resp = FfiHttpResponse {
            status: 200,
            body: std::ptr::null(),
            body_len: 4,
        };
        let result = feed_parse_response(client, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::NullArg);

        feed_free_result(result);
        feed_client_free(client);
    }

    #[test]
    fn parse_null_client_returns_null_arg() {
        let resp = response(200, r#"{"items":[]}"#);
        let result = feed_parse_response(std::ptr::null(), &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::NullArg);

        feed_free_result(result);
    }

    #[test]
    fn parse_null_response_returns_null_arg() {
        let client = client();
        let result = feed_parse_response(client, std::ptr::null());
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::NullArg);

        feed_free_result(result);
        feed_client_free(client);
    }

    #[test]
    fn transport_failed_is_connectivity() {
        let client = client();
        let result = feed_transport_failed(client);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Connectivity);
        assert_eq!(c_str(r.error_message), "could not reach the feed endpoint");

        feed_free_result(result);
        feed_client_free(client);
    }

    #[test]
    fn transport_failed_null_client_returns_null_arg() {
        let result = feed_transport_failed(std::ptr::null());
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::NullArg);
        feed_free_result(result);
    }

    #[test]
    fn free_result_null_is_safe() {
        feed_free_result(std::ptr::null_mut());
    }

    #[test]
    fn free_string_null_is_safe() {
        feed_free_string(std::ptr::null_mut());
    }

    #[test]
    fn interior_nul_in_description_is_dropped() {
        let client = client();
        let body = r#"{"items":[{"id":"73A7F70C-75DA-4C2E-B5A3-EED40DC53AA6","description":"a\u0000b","image":"https://url-1.com"}]}"#;
        let resp = response(200, body);
        let result = feed_parse_response(client, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        let items = unsafe { std::slice::from_raw_parts(r.items, r.items_len) };
        assert_eq!(c_str(items[0].description), "ab");

        feed_free_result(result);
        feed_client_free(client);
    }

    /// Host-does-IO round trip: ureq plays the host transport against the
    /// live mock server.
    #[test]
    fn host_loop_against_mock_server() {
        let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = std_listener.local_addr().unwrap();
        std_listener.set_nonblocking(true).unwrap();

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async {
                let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
                mock_server::run(listener).await
            })
            .unwrap();
        });

        let url = CString::new(format!("http://{addr}/feed")).unwrap();
        let client = feed_client_new(url.as_ptr());
        let request_url = feed_client_url(client);

        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        let mut http_resp = agent.get(c_str(request_url)).call().unwrap();
        let status = http_resp.status().as_u16();
        let body = http_resp.body_mut().read_to_vec().unwrap();

        let resp = FfiHttpResponse {
            status,
            body: body.as_ptr(),
            body_len: body.len(),
        };
        let result = feed_parse_response(client, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        assert_eq!(r.items_len, 8);

        let items = unsafe { std::slice::from_raw_parts(r.items, r.items_len) };
        assert_eq!(c_str(items[0].description), "Description 1");
        assert!(items[3].description.is_null());
        assert!(items[3].location.is_null());
        assert_eq!(c_str(items[7].image_url), "https://url-8.com/");

        feed_free_result(result);
        feed_free_string(request_url);
        feed_client_free(client);
    }
}
