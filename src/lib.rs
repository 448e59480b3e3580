//! # Ratesync
//!
//! 為替レートの取り込みと BigQuery での集計を行う2つのCLI
//!
//! - `ratesync-provision`: データセット・テーブルを作成し、Cloud Storage のファイルをロードして集計
//! - `ratesync-ingest`: 指定日の為替レートを取得・整形し、Cloud Storage にアップロード
//!
//! このプロジェクトはクリーンアーキテクチャを採用しており、以下の4層で構成されています：
//!
//! - **Domain層**: テーブル定義、レコード、ケイパビリティ trait（外部SDKに依存しない）
//! - **Application層**: パイプラインの手順（ユースケース）
//! - **Adapter層**: 外部システムとの統合（BigQuery, Cloud Storage, 為替API）
//! - **Driver層**: CLI、依存性注入

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
// カバレッジ計測時に外部サービス依存コードを除外するために使用
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// Domain層（純粋なビジネスロジック）
pub mod domain;

// Application層（ユースケース）
pub mod application;

// Adapter層（Infrastructure）
pub mod adapter;

// Driver層（Presentation）
pub mod driver;
