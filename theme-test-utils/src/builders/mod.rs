//! Test data builders for creating test fixtures

mod themes;

pub use themes::{ProjectDir, ThemeSetBuilder, store_themes};
