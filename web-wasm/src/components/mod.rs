//! 画面コンポーネント

pub mod header;
pub mod error_banner;
pub mod upload_area;
pub mod analyze_button;
pub mod loading_indicator;
pub mod report_view;
