//! Platform glue: the handful of browser facts the dashboard needs, with
//! native stand-ins so the pure modules stay testable off-wasm.

use time::Date;

/// Today's date on the user's wall clock.
#[cfg(target_arch = "wasm32")]
pub fn today() -> Date {
    let now = js_sys::Date::new_0();
    let month = time::Month::try_from(now.get_month() as u8 + 1).unwrap_or(time::Month::January);
    Date::from_calendar_date(now.get_full_year() as i32, month, now.get_date() as u8)
        .unwrap_or_else(|_| time::OffsetDateTime::now_utc().date())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn today() -> Date {
    time::OffsetDateTime::now_utc().date()
}

/// Origin of the hosting page (`https://host:port`), used to absolutize API paths.
#[cfg(target_arch = "wasm32")]
pub fn page_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn page_origin() -> Option<String> {
    None
}

/// Single query-string parameter of the current page URL.
#[cfg(target_arch = "wasm32")]
pub fn query_param(name: &str) -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    web_sys::UrlSearchParams::new_with_str(&search).ok()?.get(name)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn query_param(_name: &str) -> Option<String> {
    None
}
