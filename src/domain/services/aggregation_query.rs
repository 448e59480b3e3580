//! # Aggregation Query
//!
//! イベントと為替レートを結合し、日次・プロジェクト別の合計を求める固定SQL

/// 通貨シンボルの正規化（イベント側の値 → レート側の値）
pub const SYMBOL_ALIASES: &[(&str, &str)] = &[("USDC.E", "USDCE")];

/// 金額の桁補正（シンボル → 除数）
///
/// MATIC の値は生の値と同じ桁で記録されているため 10^18 で割る。
/// 係数はデータから経験的に求めたもので、厳密ではない可能性がある（既知の近似）
pub const DECIMAL_SCALES: &[(&str, &str)] = &[("MATIC", "1000000000000000000")];

const SYMBOL_EXPR: &str = "JSON_VALUE(props.currencySymbol)";
const VALUE_EXPR: &str = "CAST(JSON_VALUE(nums.currencyValueDecimal) AS DECIMAL)";

/// レートと結合する際に使うシンボルを返す
pub fn symbol_alias(symbol: &str) -> &str {
    SYMBOL_ALIASES
        .iter()
        .find(|(from, _)| *from == symbol)
        .map(|(_, to)| *to)
        .unwrap_or(symbol)
}

/// 金額の除数を返す（補正不要なら `None`）
pub fn decimal_scale(symbol: &str) -> Option<&'static str> {
    DECIMAL_SCALES
        .iter()
        .find(|(from, _)| *from == symbol)
        .map(|(_, divisor)| *divisor)
}

fn symbol_case() -> String {
    if SYMBOL_ALIASES.is_empty() {
        return SYMBOL_EXPR.to_string();
    }
    let mut sql = format!("CASE {}\n", SYMBOL_EXPR);
    for (from, to) in SYMBOL_ALIASES {
        sql.push_str(&format!("        WHEN '{}' THEN '{}'\n", from, to));
    }
    sql.push_str(&format!("        ELSE {}\n      END", SYMBOL_EXPR));
    sql
}

fn value_case() -> String {
    if DECIMAL_SCALES.is_empty() {
        return VALUE_EXPR.to_string();
    }
    let mut sql = format!("CASE {}\n", SYMBOL_EXPR);
    for (symbol, divisor) in DECIMAL_SCALES {
        sql.push_str(&format!(
            "          WHEN '{}' THEN {} / {}\n",
            symbol, VALUE_EXPR, divisor
        ));
    }
    sql.push_str(&format!("          ELSE {}\n        END", VALUE_EXPR));
    sql
}

/// 集計クエリ
///
/// 1. events を日・プロジェクト・通貨ごとに件数と金額で集計
/// 2. rates と (date, symbol) で LEFT JOIN し共通単位に換算
/// 3. 日・プロジェクトごとに合計
///
/// 同日のレートが無い通貨は換算値が NULL になり、SUM から黙って除外される。
/// これはエラーではなく、許容済みのデータ欠損
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationQuery {
    dataset_id: String,
    events_table_id: String,
    rates_table_id: String,
}

impl AggregationQuery {
    pub fn new(
        dataset_id: impl Into<String>,
        events_table_id: impl Into<String>,
        rates_table_id: impl Into<String>,
    ) -> Self {
        Self {
            dataset_id: dataset_id.into(),
            events_table_id: events_table_id.into(),
            rates_table_id: rates_table_id.into(),
        }
    }

    /// SQL文字列を生成する
    pub fn render(&self) -> String {
        format!(
            r#"WITH events AS (
  SELECT
    DATE(ts) AS date,
    project_id,
    COUNT(*) AS num_transactions,
    {symbol} AS currency_symbol,
    SUM(
      {value}
    ) AS currency_value
  FROM `{dataset}.{events}`
  GROUP BY DATE(ts), project_id, currency_symbol
)
SELECT
  e.date,
  project_id,
  SUM(e.num_transactions) AS num_transactions,
  SUM(currency_value / rate) AS total_volume_usd
FROM events e
LEFT JOIN `{dataset}.{rates}` r
  ON e.date = r.date AND e.currency_symbol = r.symbol
GROUP BY e.date, project_id
ORDER BY e.date, project_id
"#,
            symbol = symbol_case(),
            value = value_case(),
            dataset = self.dataset_id,
            events = self.events_table_id,
            rates = self.rates_table_id,
        )
    }
}
