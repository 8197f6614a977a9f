use ddlgram_core::{ColumnDefinition, ColumnType, DefaultValue};

use crate::MysqlGrammar;

const DEFAULT_STRING_LENGTH: u32 = 255;
const DEFAULT_DECIMAL_TOTAL: u32 = 8;
const DEFAULT_DECIMAL_PLACES: u32 = 2;
const CURRENT_TIMESTAMP: &str = "CURRENT_TIMESTAMP";

impl MysqlGrammar {
    /// Physical type for a column definition.
    pub fn type_sql(&self, column: &dyn ColumnDefinition) -> String {
        match column.column_type() {
            ColumnType::BigInteger => "bigint".to_string(),
            ColumnType::Boolean => "tinyint(1)".to_string(),
            ColumnType::Char => format!("char({})", sized_length(column.length())),
            ColumnType::Date => "date".to_string(),
            ColumnType::DateTime | ColumnType::DateTimeTz => {
                with_precision("datetime", column.precision())
            }
            ColumnType::Decimal => format!(
                "decimal({}, {})",
                column.total().unwrap_or(DEFAULT_DECIMAL_TOTAL),
                column.places().unwrap_or(DEFAULT_DECIMAL_PLACES)
            ),
            ColumnType::Double => "double".to_string(),
            ColumnType::Enum => format!("enum({})", self.wrap.quotes(column.allowed()).join(", ")),
            ColumnType::Float => with_precision("float", column.precision()),
            ColumnType::Integer => "int".to_string(),
            ColumnType::Json | ColumnType::Jsonb => "json".to_string(),
            ColumnType::LongText => "longtext".to_string(),
            ColumnType::MediumInteger => "mediumint".to_string(),
            ColumnType::MediumText => "mediumtext".to_string(),
            ColumnType::SmallInteger => "smallint".to_string(),
            ColumnType::String => format!("varchar({})", sized_length(column.length())),
            ColumnType::Text => "text".to_string(),
            ColumnType::Time | ColumnType::TimeTz => with_precision("time", column.precision()),
            ColumnType::Timestamp | ColumnType::TimestampTz => {
                with_precision("timestamp", column.precision())
            }
            ColumnType::TinyInteger => "tinyint".to_string(),
            ColumnType::TinyText => "tinytext".to_string(),
            ColumnType::Custom(raw) => raw,
        }
    }

    /// Fills in `CURRENT_TIMESTAMP` defaults requested through the
    /// use-current flags. Runs before modifiers read the column.
    pub fn resolve_implicit_defaults(&self, column: &mut dyn ColumnDefinition) {
        if !column.column_type().tracks_current_time() {
            return;
        }

        let current = with_precision(CURRENT_TIMESTAMP, column.precision());
        if column.uses_current() {
            column.set_default(DefaultValue::expression(current.clone()));
        }
        if column.uses_current_on_update() {
            column.set_on_update(current);
        }
    }
}

fn sized_length(length: Option<u32>) -> u32 {
    length
        .filter(|length| *length > 0)
        .unwrap_or(DEFAULT_STRING_LENGTH)
}

fn with_precision(name: &str, precision: Option<u32>) -> String {
    match precision {
        Some(precision) if precision > 0 => format!("{name}({precision})"),
        _ => name.to_string(),
    }
}
