//! 추적 항목 엔티티 모듈

pub mod item;

pub use item::{Item, ItemCategory, ItemStatus};
