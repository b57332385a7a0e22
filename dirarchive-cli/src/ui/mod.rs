mod bar;
mod footer;
mod header;
mod layout;
mod log_view;
mod progress;
mod theme;

pub use footer::Footer;
pub use header::Header;
pub use layout::AppLayout;
pub use log_view::{LogView, log_rows};
pub use progress::ProgressView;
pub use theme::Theme;
