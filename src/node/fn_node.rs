//! 函数体节点定义
//!
//! 用户自定义函数使用的小型命令式语言：函数头、参数、赋值、返回、
//! 条件分支与 for-in 循环

use serde::Serialize;

use super::handle::{ExprId, FnListId, FnNodeId, TypeNodeId};
use super::sql_node::SqlNodeType;
use crate::core::types::FnOperator;

/// 无载荷的函数体语句
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FnBareStmt {
    Break,
    Continue,
    Pass,
}

impl FnBareStmt {
    pub fn node_type(&self) -> SqlNodeType {
        match self {
            FnBareStmt::Break => SqlNodeType::FnBreak,
            FnBareStmt::Continue => SqlNodeType::FnContinue,
            FnBareStmt::Pass => SqlNodeType::FnPass,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FnHeaderNode {
    pub name: String,
    pub params: Option<FnListId>,
    pub return_type: Option<TypeNodeId>,
}

/// 赋值语句，`op` 为复合赋值操作符（`+=` 时为 `Add`）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FnAssignNode {
    pub name: String,
    pub expr: ExprId,
    pub op: Option<FnOperator>,
}

/// if / elif / else 组合块
///
/// `elif_blocks` 在构造期间按出现顺序追加
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FnIfElseBlock {
    pub if_block: FnNodeId,
    pub elif_blocks: Vec<FnNodeId>,
    pub else_block: Option<FnNodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FnNode {
    Def {
        header: FnNodeId,
        block: FnListId,
    },
    Header(FnHeaderNode),
    Para {
        name: String,
        para_type: TypeNodeId,
    },
    Assign(FnAssignNode),
    Return {
        value: ExprId,
    },
    If {
        condition: ExprId,
    },
    Elif {
        condition: ExprId,
    },
    Else,
    IfBlock {
        if_node: FnNodeId,
        block: FnListId,
    },
    ElifBlock {
        elif_node: FnNodeId,
        block: FnListId,
    },
    ElseBlock {
        block: FnListId,
    },
    IfElseBlock(FnIfElseBlock),
    ForIn {
        var_name: String,
        iterable: ExprId,
    },
    ForInBlock {
        for_in: FnNodeId,
        block: FnListId,
    },
    Bare(FnBareStmt),
}

impl FnNode {
    pub fn node_type(&self) -> SqlNodeType {
        match self {
            FnNode::Def { .. } => SqlNodeType::FnDef,
            FnNode::Header(_) => SqlNodeType::FnHeader,
            FnNode::Para { .. } => SqlNodeType::FnPara,
            FnNode::Assign(_) => SqlNodeType::FnAssign,
            FnNode::Return { .. } => SqlNodeType::FnReturn,
            FnNode::If { .. } => SqlNodeType::FnIf,
            FnNode::Elif { .. } => SqlNodeType::FnElif,
            FnNode::Else => SqlNodeType::FnElse,
            FnNode::IfBlock { .. } => SqlNodeType::FnIfBlock,
            FnNode::ElifBlock { .. } => SqlNodeType::FnElifBlock,
            FnNode::ElseBlock { .. } => SqlNodeType::FnElseBlock,
            FnNode::IfElseBlock(_) => SqlNodeType::FnIfElseBlock,
            FnNode::ForIn { .. } => SqlNodeType::FnForIn,
            FnNode::ForInBlock { .. } => SqlNodeType::FnForInBlock,
            FnNode::Bare(stmt) => stmt.node_type(),
        }
    }
}
