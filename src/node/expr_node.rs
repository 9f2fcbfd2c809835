//! 表达式节点定义

use serde::Serialize;
use std::fmt;

use super::handle::{ExprId, ExprListId, QueryId, SqlNodeId};
use crate::core::types::{DataType, FnOperator};

/// 表达式子类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ExprType {
    ColumnRef,
    Primary,
    Binary,
    Unary,
    Call,
    Query,
    All,
    OrderBy,
    Id,
}

/// 字面量值
///
/// 字面量的类型标签由值的来源类型决定
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ConstValue {
    Int32(i32),
    Int64(i64),
    /// 带时间单位的 64 位整数，如 `30s`
    Interval { value: i64, unit: DataType },
    Float(f32),
    Double(f64),
    String(String),
    Null,
}

impl ConstValue {
    /// 字面量的类型标签
    ///
    /// 区间字面量的标签为其单位
    pub fn data_type(&self) -> DataType {
        match self {
            ConstValue::Int32(_) => DataType::Int32,
            ConstValue::Int64(_) => DataType::Int64,
            ConstValue::Interval { unit, .. } => *unit,
            ConstValue::Float(_) => DataType::Float,
            ConstValue::Double(_) => DataType::Double,
            ConstValue::String(_) => DataType::Varchar,
            ConstValue::Null => DataType::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ConstValue::Null)
    }
}

impl From<i32> for ConstValue {
    fn from(value: i32) -> Self {
        ConstValue::Int32(value)
    }
}

impl From<i64> for ConstValue {
    fn from(value: i64) -> Self {
        ConstValue::Int64(value)
    }
}

impl From<f32> for ConstValue {
    fn from(value: f32) -> Self {
        ConstValue::Float(value)
    }
}

impl From<f64> for ConstValue {
    fn from(value: f64) -> Self {
        ConstValue::Double(value)
    }
}

impl From<&str> for ConstValue {
    fn from(value: &str) -> Self {
        ConstValue::String(value.to_string())
    }
}

impl From<String> for ConstValue {
    fn from(value: String) -> Self {
        ConstValue::String(value)
    }
}

impl From<()> for ConstValue {
    fn from(_: ()) -> Self {
        ConstValue::Null
    }
}

impl fmt::Display for ConstValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstValue::Int32(v) => write!(f, "{}", v),
            ConstValue::Int64(v) => write!(f, "{}", v),
            ConstValue::Interval { value, unit } => write!(f, "{}{}", value, unit),
            ConstValue::Float(v) => write!(f, "{}", v),
            ConstValue::Double(v) => write!(f, "{}", v),
            ConstValue::String(v) => write!(f, "{}", v),
            ConstValue::Null => write!(f, "NULL"),
        }
    }
}

/// 列引用
///
/// 未指定的限定名保存为空字符串，不做推断
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnRefNode {
    pub column_name: String,
    pub relation_name: String,
    pub db_name: String,
}

/// 函数调用，`over` 指向窗口定义
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallExprNode {
    pub function_name: String,
    pub args: Option<ExprListId>,
    pub over: Option<SqlNodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExprNode {
    ColumnRef(ColumnRefNode),
    Const(ConstValue),
    Binary {
        op: FnOperator,
        left: ExprId,
        right: ExprId,
    },
    Unary {
        op: FnOperator,
        operand: ExprId,
    },
    Call(CallExprNode),
    Query {
        query: QueryId,
    },
    /// `*` 或 `t.*`
    All {
        relation_name: String,
        db_name: String,
    },
    OrderBy {
        order_by: Option<ExprListId>,
        is_asc: bool,
    },
    Id {
        name: String,
    },
}

impl ExprNode {
    pub fn expr_type(&self) -> ExprType {
        match self {
            ExprNode::ColumnRef(_) => ExprType::ColumnRef,
            ExprNode::Const(_) => ExprType::Primary,
            ExprNode::Binary { .. } => ExprType::Binary,
            ExprNode::Unary { .. } => ExprType::Unary,
            ExprNode::Call(_) => ExprType::Call,
            ExprNode::Query { .. } => ExprType::Query,
            ExprNode::All { .. } => ExprType::All,
            ExprNode::OrderBy { .. } => ExprType::OrderBy,
            ExprNode::Id { .. } => ExprType::Id,
        }
    }

    pub fn as_column_ref(&self) -> Option<&ColumnRefNode> {
        match self {
            ExprNode::ColumnRef(column) => Some(column),
            _ => None,
        }
    }

    pub fn as_const(&self) -> Option<&ConstValue> {
        match self {
            ExprNode::Const(value) => Some(value),
            _ => None,
        }
    }
}
