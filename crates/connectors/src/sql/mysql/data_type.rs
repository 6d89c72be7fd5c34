use model::core::data_type::DataType;
use mysql_async::consts::{ColumnFlags, ColumnType};

/// Maps a result-set column onto the model type it decodes as.
pub fn mysql_col_type(column_type: ColumnType, flags: ColumnFlags) -> DataType {
    let unsigned = flags.contains(ColumnFlags::UNSIGNED_FLAG);
    match column_type {
        ColumnType::MYSQL_TYPE_LONGLONG if unsigned => DataType::IntUnsigned,
        ColumnType::MYSQL_TYPE_TINY
        | ColumnType::MYSQL_TYPE_SHORT
        | ColumnType::MYSQL_TYPE_YEAR => DataType::Short,
        ColumnType::MYSQL_TYPE_LONG | ColumnType::MYSQL_TYPE_INT24 => {
            if unsigned {
                DataType::Long
            } else {
                DataType::Int
            }
        }
        ColumnType::MYSQL_TYPE_LONGLONG => DataType::Long,
        ColumnType::MYSQL_TYPE_FLOAT => DataType::Float,
        ColumnType::MYSQL_TYPE_DOUBLE => DataType::Double,
        ColumnType::MYSQL_TYPE_DECIMAL | ColumnType::MYSQL_TYPE_NEWDECIMAL => DataType::Decimal,
        ColumnType::MYSQL_TYPE_DATE | ColumnType::MYSQL_TYPE_NEWDATE => DataType::Date,
        ColumnType::MYSQL_TYPE_DATETIME
        | ColumnType::MYSQL_TYPE_DATETIME2
        | ColumnType::MYSQL_TYPE_TIMESTAMP
        | ColumnType::MYSQL_TYPE_TIMESTAMP2 => DataType::Timestamp,
        ColumnType::MYSQL_TYPE_VARCHAR | ColumnType::MYSQL_TYPE_VAR_STRING => DataType::VarChar,
        ColumnType::MYSQL_TYPE_STRING => DataType::Char,
        ColumnType::MYSQL_TYPE_NULL => DataType::Null,
        _ => DataType::String,
    }
}
