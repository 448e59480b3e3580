//! # Domain Services
//!
//! 外部サービスに依存しない純粋なロジック

pub mod aggregation_query;
pub mod rates_transformer;
