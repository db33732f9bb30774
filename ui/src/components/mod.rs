mod app_header;

pub use app_header::AppHeader;
