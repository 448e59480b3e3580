//! # Domain Repositories
//!
//! 外部サービスのケイパビリティ（trait）定義
//!
//! ## 特徴
//!
//! - Domain層では実装を持たない（traitの定義のみ）
//! - Adapter層で本番実装を、テストでテストダブルを提供
//! - 依存性逆転の原則（DIP）を実現

pub mod object_repository;
pub mod rates_repository;
pub mod warehouse_repository;
