//! # Application Layer
//!
//! アプリケーション固有のビジネスフロー（ユースケース）
//!
//! ## 特徴
//!
//! - Domain層のエンティティとサービスを組み合わせてパイプラインを実現
//! - Repository traitに依存（実装には依存しない）
//! - 外部サービスの詳細は知らない
//!
//! ## 構成要素
//!
//! - **dto**: 検証済みの設定
//! - **use_cases**: ユースケース

pub mod dto;
pub mod use_cases;
