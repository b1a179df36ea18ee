//! Reusable sub-widgets rendered inside an overlay's content area

mod progress_bar;

pub use progress_bar::ProgressBar;
