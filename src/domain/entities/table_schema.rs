//! # TableSchema Entity
//!
//! テーブル定義と固定スキーマカタログ

/// カラムの型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Integer,
    Float,
    Timestamp,
    Date,
    Json,
}

/// カラム定義（名前と型の組）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub field_type: FieldType,
}

const fn field(name: &'static str, field_type: FieldType) -> FieldDef {
    FieldDef { name, field_type }
}

/// テーブルスキーマ
///
/// カラムの順序付きリスト。インスタンスはプロセス中で不変
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    fields: &'static [FieldDef],
}

impl TableSchema {
    pub const fn new(fields: &'static [FieldDef]) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &'static [FieldDef] {
        self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// カラム名の一覧を定義順で返す
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }
}

/// 外部ファイルの形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// ヘッダー行付きCSV
    Csv,
    /// 改行区切りJSON
    NewlineDelimitedJson,
}

impl SourceFormat {
    /// 読み飛ばす先頭行数
    pub fn skip_leading_rows(&self) -> Option<i64> {
        match self {
            SourceFormat::Csv => Some(1),
            SourceFormat::NewlineDelimitedJson => None,
        }
    }
}

/// ロード元（Cloud Storage上のファイル群）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSource {
    pub uri: String,
    pub format: SourceFormat,
}

impl LoadSource {
    /// `gs://<bucket>/raw/<pattern>` 形式のロード元を作成
    pub fn in_bucket(bucket: &str, pattern: &str, format: SourceFormat) -> Self {
        Self {
            uri: format!("gs://{}/raw/{}", bucket, pattern),
            format,
        }
    }
}

const EVENTS_FIELDS: &[FieldDef] = &[
    field("app", FieldType::String),
    field("ts", FieldType::Timestamp),
    field("event", FieldType::String),
    field("project_id", FieldType::Integer),
    field("source", FieldType::String),
    field("ident", FieldType::Integer),
    field("user_id", FieldType::String),
    field("session_id", FieldType::String),
    field("country", FieldType::String),
    field("device_type", FieldType::String),
    field("device_os", FieldType::String),
    field("device_os_ver", FieldType::String),
    field("device_browser", FieldType::String),
    field("device_browser_ver", FieldType::String),
    field("props", FieldType::Json),
    field("nums", FieldType::Json),
];

const RATES_FIELDS: &[FieldDef] = &[
    field("date", FieldType::Date),
    field("rate", FieldType::Float),
    field("symbol", FieldType::String),
];

const RESULT_FIELDS: &[FieldDef] = &[
    field("date", FieldType::Date),
    field("project_id", FieldType::Integer),
    field("num_transactions", FieldType::Integer),
    field("total_volume_usd", FieldType::Float),
];

/// スキーマカタログ
///
/// events / rates / result の3テーブル定義と、それぞれのロード元
pub struct SchemaCatalog;

impl SchemaCatalog {
    pub const EVENTS: TableSchema = TableSchema::new(EVENTS_FIELDS);
    pub const RATES: TableSchema = TableSchema::new(RATES_FIELDS);
    pub const RESULT: TableSchema = TableSchema::new(RESULT_FIELDS);

    /// イベントCSVのロード元
    pub fn events_source(bucket: &str) -> LoadSource {
        LoadSource::in_bucket(bucket, "events/*.csv", SourceFormat::Csv)
    }

    /// 為替レートJSONのロード元
    pub fn rates_source(bucket: &str) -> LoadSource {
        LoadSource::in_bucket(
            bucket,
            "exchange-rates/*.json",
            SourceFormat::NewlineDelimitedJson,
        )
    }
}
