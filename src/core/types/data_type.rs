//! 数据类型定义
//!
//! 列声明、字面量和类型节点共用的基础类型标签

use serde::{Deserialize, Serialize};
use std::fmt;

/// 基础数据类型
///
/// `Second`/`Minute`/`Hour`/`Day` 仅作为区间字面量的单位使用，
/// `List`/`Map`/`Iterator` 是需要类型参数的容器类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Bool,
    Int16,
    Int32,
    Int64,
    Float,
    Double,
    Varchar,
    Date,
    Timestamp,
    List,
    Map,
    Iterator,
    Row,
    Second,
    Minute,
    Hour,
    Day,
    Void,
    Null,
}

impl DataType {
    /// 是否为时间单位
    pub fn is_time_unit(&self) -> bool {
        matches!(
            self,
            DataType::Second | DataType::Minute | DataType::Hour | DataType::Day
        )
    }

    /// 是否为容器类型
    pub fn is_container(&self) -> bool {
        matches!(self, DataType::List | DataType::Map | DataType::Iterator)
    }

    pub fn name(&self) -> &'static str {
        match self {
            DataType::Bool => "bool",
            DataType::Int16 => "int16",
            DataType::Int32 => "int32",
            DataType::Int64 => "int64",
            DataType::Float => "float",
            DataType::Double => "double",
            DataType::Varchar => "string",
            DataType::Date => "date",
            DataType::Timestamp => "timestamp",
            DataType::List => "list",
            DataType::Map => "map",
            DataType::Iterator => "iterator",
            DataType::Row => "row",
            DataType::Second => "second",
            DataType::Minute => "minute",
            DataType::Hour => "hour",
            DataType::Day => "day",
            DataType::Void => "void",
            DataType::Null => "null",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
