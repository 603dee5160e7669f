//! 추적 항목 리포지토리 모듈

pub mod item_repo;

pub use item_repo::ItemRepository;
