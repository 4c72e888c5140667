//! Typed view of the dashboarding tool's JSON export

pub mod item;
pub mod loader;

pub use item::{ChartItem, DashboardItem, GroupItem, Member};
pub use loader::Export;
