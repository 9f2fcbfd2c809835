//! 节点列表容器
//!
//! 有序、只追加的句柄序列。列表本身也由管理器持有，
//! 但与语法树节点分属不同注册表

use serde::Serialize;

use super::handle::{ExprId, FnNodeId, SqlNodeId};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SqlNodeList {
    pub items: Vec<SqlNodeId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExprListNode {
    pub items: Vec<ExprId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FnNodeList {
    pub items: Vec<FnNodeId>,
}

/// 列表注册表中的条目
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ListNode {
    Sql(SqlNodeList),
    Expr(ExprListNode),
    Fn(FnNodeList),
}

impl ListNode {
    pub fn len(&self) -> usize {
        match self {
            ListNode::Sql(list) => list.items.len(),
            ListNode::Expr(list) => list.items.len(),
            ListNode::Fn(list) => list.items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            ListNode::Sql(_) => "SqlNodeList",
            ListNode::Expr(_) => "ExprListNode",
            ListNode::Fn(_) => "FnNodeList",
        }
    }
}
