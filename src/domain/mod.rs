//! # Domain Layer
//!
//! このモジュールはパイプラインの核心的なルールとエンティティを定義します。
//!
//! ## 特徴
//!
//! - 外部サービスのSDKに依存しない
//! - BigQuery・Cloud Storage・為替APIについて何も知らない
//! - 純粋なビジネスロジック
//!
//! ## 構成要素
//!
//! - **entities**: テーブル定義、為替レートのレコード
//! - **repositories**: 外部サービスのケイパビリティ trait
//! - **services**: 集計クエリ、レート変換
//! - **errors**: エラー分類

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod services;
