//! 核心类型模块
//!
//! 各类节点共用的闭合标签：数据类型、操作符、连接类型、窗口帧等

use serde::{Deserialize, Serialize};

pub mod data_type;
pub mod operators;

pub use data_type::DataType;
pub use operators::FnOperator;

/// 连接类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
    Last,
    Concat,
}

/// 窗口帧单位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameType {
    /// 尚未由 RANGE/ROWS 包装的帧
    Unset,
    Range,
    Rows,
}

/// 窗口帧边界类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundType {
    UnboundedPreceding,
    Preceding,
    CurrentRow,
    Following,
    UnboundedFollowing,
}

impl BoundType {
    /// 该边界是否需要偏移量表达式（如 `3 PRECEDING`）
    pub fn takes_offset(&self) -> bool {
        matches!(self, BoundType::Preceding | BoundType::Following)
    }
}

/// 命令类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CmdType {
    CreateDatabase,
    CreateTable,
    CreateIndex,
    CreateGroup,
    ShowDatabases,
    ShowTables,
    DescTable,
    DropTable,
    DropIndex,
    UseDatabase,
    Exit,
}

/// EXPLAIN 类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExplainType {
    Logic,
    Physical,
}
