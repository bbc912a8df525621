//! UI layer for desktop GUI: the application form page, policy dialog,
//! notification banner and font setup.

pub mod app;
pub mod banner;
pub mod fonts;
pub mod policy;

pub use app::RecruitApp;
