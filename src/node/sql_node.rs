//! 语法树节点定义
//!
//! 语法树、表达式、函数体和类型节点同属一个多态族，
//! 由管理器的同一个注册表统一持有。节点之间只保存句柄

use serde::Serialize;
use std::fmt;

use super::expr_node::ExprNode;
use super::fn_node::FnNode;
use super::handle::{ExprId, ExprListId, NodeListId, QueryId, SqlNodeId, TableRefId};
use super::type_node::TypeNode;
use crate::core::types::{BoundType, CmdType, DataType, ExplainType, FrameType, JoinType};

/// 语法树节点类型标签
///
/// 构造时确定，之后不再变化
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SqlNodeType {
    SelectStmt,
    UnionStmt,
    TableRef,
    JoinRef,
    QueryRef,
    ColumnDesc,
    ColumnIndex,
    IndexKey,
    IndexTs,
    IndexTtl,
    IndexVersion,
    Frame,
    FrameBound,
    WindowDef,
    CreateTable,
    InsertStmt,
    Cmd,
    Explain,
    Limit,
    Name,
    ResTarget,
    Dataset,
    Map,
    Expr,
    Type,
    FnDef,
    FnHeader,
    FnPara,
    FnAssign,
    FnReturn,
    FnIf,
    FnElif,
    FnElse,
    FnIfBlock,
    FnElifBlock,
    FnElseBlock,
    FnIfElseBlock,
    FnForIn,
    FnForInBlock,
    FnBreak,
    FnContinue,
    FnPass,
}

impl SqlNodeType {
    /// 是否属于函数体节点
    pub fn is_fn_node(&self) -> bool {
        matches!(
            self,
            SqlNodeType::FnDef
                | SqlNodeType::FnHeader
                | SqlNodeType::FnPara
                | SqlNodeType::FnAssign
                | SqlNodeType::FnReturn
                | SqlNodeType::FnIf
                | SqlNodeType::FnElif
                | SqlNodeType::FnElse
                | SqlNodeType::FnIfBlock
                | SqlNodeType::FnElifBlock
                | SqlNodeType::FnElseBlock
                | SqlNodeType::FnIfElseBlock
                | SqlNodeType::FnForIn
                | SqlNodeType::FnForInBlock
                | SqlNodeType::FnBreak
                | SqlNodeType::FnContinue
                | SqlNodeType::FnPass
        )
    }
}

impl fmt::Display for SqlNodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// SELECT 查询
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectQueryNode {
    pub is_distinct: bool,
    pub select_list: Option<NodeListId>,
    pub table_refs: Option<NodeListId>,
    pub where_expr: Option<ExprId>,
    pub group_exprs: Option<ExprListId>,
    pub having_expr: Option<ExprId>,
    pub order_expr: Option<ExprId>,
    pub windows: Option<NodeListId>,
    pub limit: Option<SqlNodeId>,
}

/// UNION 查询，左右顺序即构造顺序
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnionQueryNode {
    pub left: QueryId,
    pub right: QueryId,
    pub is_all: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum QueryNode {
    Select(SelectQueryNode),
    Union(UnionQueryNode),
}

impl QueryNode {
    pub fn node_type(&self) -> SqlNodeType {
        match self {
            QueryNode::Select(_) => SqlNodeType::SelectStmt,
            QueryNode::Union(_) => SqlNodeType::UnionStmt,
        }
    }
}

/// FROM 子句中的表引用
///
/// 别名为空字符串表示未指定
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TableRefNode {
    Table {
        name: String,
        alias: String,
    },
    Join {
        left: TableRefId,
        right: TableRefId,
        join_type: JoinType,
        condition: Option<ExprId>,
        alias: String,
    },
    Query {
        sub_query: QueryId,
        alias: String,
    },
}

impl TableRefNode {
    pub fn node_type(&self) -> SqlNodeType {
        match self {
            TableRefNode::Table { .. } => SqlNodeType::TableRef,
            TableRefNode::Join { .. } => SqlNodeType::JoinRef,
            TableRefNode::Query { .. } => SqlNodeType::QueryRef,
        }
    }

    pub fn alias(&self) -> &str {
        match self {
            TableRefNode::Table { alias, .. }
            | TableRefNode::Join { alias, .. }
            | TableRefNode::Query { alias, .. } => alias,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDescNode {
    pub column_name: String,
    pub data_type: DataType,
    pub not_null: bool,
}

/// 列索引
///
/// 显式构造与索引项列表构造两条路径产出同一形状
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ColumnIndexNode {
    pub keys: Vec<String>,
    pub ts: Option<String>,
    pub ttl: Option<ExprId>,
    pub version: Option<String>,
    pub version_count: Option<i32>,
}

/// 索引项，用于 `make_column_index_from_items`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum IndexItemNode {
    Key { keys: Vec<String> },
    Ts { name: String },
    Ttl { expr: ExprId },
    Version { name: String, count: Option<i32> },
}

impl IndexItemNode {
    pub fn node_type(&self) -> SqlNodeType {
        match self {
            IndexItemNode::Key { .. } => SqlNodeType::IndexKey,
            IndexItemNode::Ts { .. } => SqlNodeType::IndexTs,
            IndexItemNode::Ttl { .. } => SqlNodeType::IndexTtl,
            IndexItemNode::Version { .. } => SqlNodeType::IndexVersion,
        }
    }
}

/// 窗口帧边界
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameBoundNode {
    pub bound_type: BoundType,
    pub offset: Option<ExprId>,
}

/// 窗口帧
///
/// 按给定顺序保存起止边界，不校验起点是否先于终点
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameNode {
    pub frame_type: FrameType,
    pub start: SqlNodeId,
    pub end: SqlNodeId,
}

/// 窗口定义
///
/// 具名引用只填 `name`，内联定义时 `name` 为空
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WindowDefNode {
    pub name: String,
    pub partitions: Option<ExprListId>,
    pub orders: Option<ExprId>,
    pub frame: Option<SqlNodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateTableNode {
    pub if_not_exists: bool,
    pub table_name: String,
    pub column_descs: Option<NodeListId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsertStmtNode {
    pub table_name: String,
    pub columns: Option<ExprListId>,
    pub values: Option<ExprListId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CmdNode {
    pub cmd_type: CmdType,
    pub arg: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplainNode {
    pub query: QueryId,
    pub explain_type: ExplainType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResTargetNode {
    pub expr: ExprId,
    pub name: String,
}

/// 非表达式的语法树节点
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SqlNode {
    Query(QueryNode),
    TableRef(TableRefNode),
    ColumnDesc(ColumnDescNode),
    ColumnIndex(ColumnIndexNode),
    IndexItem(IndexItemNode),
    Frame(FrameNode),
    FrameBound(FrameBoundNode),
    WindowDef(WindowDefNode),
    CreateTable(CreateTableNode),
    InsertStmt(InsertStmtNode),
    Cmd(CmdNode),
    Explain(ExplainNode),
    Limit { count: i32 },
    Name { name: String },
    ResTarget(ResTargetNode),
    Dataset { table: String },
    Map { nodes: Vec<SqlNodeId> },
}

impl SqlNode {
    pub fn node_type(&self) -> SqlNodeType {
        match self {
            SqlNode::Query(query) => query.node_type(),
            SqlNode::TableRef(table_ref) => table_ref.node_type(),
            SqlNode::ColumnDesc(_) => SqlNodeType::ColumnDesc,
            SqlNode::ColumnIndex(_) => SqlNodeType::ColumnIndex,
            SqlNode::IndexItem(item) => item.node_type(),
            SqlNode::Frame(_) => SqlNodeType::Frame,
            SqlNode::FrameBound(_) => SqlNodeType::FrameBound,
            SqlNode::WindowDef(_) => SqlNodeType::WindowDef,
            SqlNode::CreateTable(_) => SqlNodeType::CreateTable,
            SqlNode::InsertStmt(_) => SqlNodeType::InsertStmt,
            SqlNode::Cmd(_) => SqlNodeType::Cmd,
            SqlNode::Explain(_) => SqlNodeType::Explain,
            SqlNode::Limit { .. } => SqlNodeType::Limit,
            SqlNode::Name { .. } => SqlNodeType::Name,
            SqlNode::ResTarget(_) => SqlNodeType::ResTarget,
            SqlNode::Dataset { .. } => SqlNodeType::Dataset,
            SqlNode::Map { .. } => SqlNodeType::Map,
        }
    }
}

/// 语法树注册表中的条目
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ParserNode {
    Sql(SqlNode),
    Expr(ExprNode),
    Fn(FnNode),
    Type(TypeNode),
}

impl ParserNode {
    pub fn node_type(&self) -> SqlNodeType {
        match self {
            ParserNode::Sql(node) => node.node_type(),
            ParserNode::Expr(_) => SqlNodeType::Expr,
            ParserNode::Fn(node) => node.node_type(),
            ParserNode::Type(_) => SqlNodeType::Type,
        }
    }

    pub fn as_sql(&self) -> Option<&SqlNode> {
        match self {
            ParserNode::Sql(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_expr(&self) -> Option<&ExprNode> {
        match self {
            ParserNode::Expr(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_fn(&self) -> Option<&FnNode> {
        match self {
            ParserNode::Fn(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_type(&self) -> Option<&TypeNode> {
        match self {
            ParserNode::Type(node) => Some(node),
            _ => None,
        }
    }
}
