//! 逻辑计划节点定义
//!
//! 计划树与语法树相互独立：规划阶段不修改语法树，
//! 而是在计划注册表中构建新的节点，表达式仍以句柄引用语法树

use serde::Serialize;
use std::fmt;

use super::handle::{ExprId, ExprListId, FnNodeId, PlanId, SqlNodeId};
use crate::core::types::JoinType;

/// 计划节点类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PlanType {
    Query,
    Select,
    TableScan,
    Project,
    ProjectList,
    Projection,
    Window,
    Filter,
    Join,
    Group,
    Sort,
    Limit,
    Rename,
    Union,
    Distinct,
    Merge,
    CreateTable,
    Insert,
    Cmd,
    FuncDef,
}

impl PlanType {
    pub fn name(&self) -> &'static str {
        match self {
            PlanType::Query => "QUERY",
            PlanType::Select => "SELECT",
            PlanType::TableScan => "TABLE_SCAN",
            PlanType::Project => "PROJECT",
            PlanType::ProjectList => "PROJECT_LIST",
            PlanType::Projection => "PROJECTION",
            PlanType::Window => "WINDOW",
            PlanType::Filter => "FILTER",
            PlanType::Join => "JOIN",
            PlanType::Group => "GROUP",
            PlanType::Sort => "SORT",
            PlanType::Limit => "LIMIT",
            PlanType::Rename => "RENAME",
            PlanType::Union => "UNION",
            PlanType::Distinct => "DISTINCT",
            PlanType::Merge => "MERGE",
            PlanType::CreateTable => "CREATE_TABLE",
            PlanType::Insert => "INSERT",
            PlanType::Cmd => "CMD",
            PlanType::FuncDef => "FUNC_DEF",
        }
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 通用计划节点的元数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlanArity {
    Leaf,
    Unary,
    Binary,
    Multi,
}

impl PlanArity {
    /// 允许的最大子节点数，`None` 表示不限
    pub fn max_children(&self) -> Option<usize> {
        match self {
            PlanArity::Leaf => Some(0),
            PlanArity::Unary => Some(1),
            PlanArity::Binary => Some(2),
            PlanArity::Multi => None,
        }
    }
}

/// 不带额外载荷的计划节点，子节点在构造期间追加
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenericPlanNode {
    pub plan_type: PlanType,
    pub arity: PlanArity,
    pub children: Vec<PlanId>,
}

/// 单个输出列
///
/// `pos` 为从 0 开始的输出位置，由调用方负责唯一性与连续性
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectNode {
    pub pos: i32,
    pub name: String,
    pub is_aggregation: bool,
    pub expr: ExprId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectPlanNode {
    pub source: PlanId,
    pub table: String,
    pub projects: Vec<PlanId>,
    /// (输出位置, 来源位置)
    pub pos_mapping: Vec<(u32, u32)>,
}

/// 同一窗口下的一组投影
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectListPlanNode {
    pub window: Option<PlanId>,
    pub need_agg: bool,
    pub projects: Vec<PlanId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinPlanNode {
    pub left: PlanId,
    pub right: PlanId,
    pub join_type: JoinType,
    pub condition: Option<ExprId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PlanNode {
    Generic(GenericPlanNode),
    TableScan { table: String },
    Select { source: PlanId },
    Project(ProjectPlanNode),
    ProjectList(ProjectListPlanNode),
    Projection(ProjectNode),
    Window { id: i32 },
    Filter { source: PlanId, condition: ExprId },
    Join(JoinPlanNode),
    Group {
        source: PlanId,
        by_list: Option<ExprListId>,
    },
    Sort { source: PlanId, order_by: ExprId },
    Limit { source: PlanId, count: i32 },
    Rename { source: PlanId, alias: String },
    Union {
        left: PlanId,
        right: PlanId,
        is_all: bool,
    },
    Distinct { source: PlanId },
    Merge { column_size: i32 },
    CreateTable {
        table_name: String,
        columns: Vec<SqlNodeId>,
    },
    Insert { insert: SqlNodeId },
    Cmd { cmd: SqlNodeId },
    FuncDef { fn_def: FnNodeId },
}

impl PlanNode {
    pub fn plan_type(&self) -> PlanType {
        match self {
            PlanNode::Generic(node) => node.plan_type,
            PlanNode::TableScan { .. } => PlanType::TableScan,
            PlanNode::Select { .. } => PlanType::Select,
            PlanNode::Project(_) => PlanType::Project,
            PlanNode::ProjectList(_) => PlanType::ProjectList,
            PlanNode::Projection(_) => PlanType::Projection,
            PlanNode::Window { .. } => PlanType::Window,
            PlanNode::Filter { .. } => PlanType::Filter,
            PlanNode::Join(_) => PlanType::Join,
            PlanNode::Group { .. } => PlanType::Group,
            PlanNode::Sort { .. } => PlanType::Sort,
            PlanNode::Limit { .. } => PlanType::Limit,
            PlanNode::Rename { .. } => PlanType::Rename,
            PlanNode::Union { .. } => PlanType::Union,
            PlanNode::Distinct { .. } => PlanType::Distinct,
            PlanNode::Merge { .. } => PlanType::Merge,
            PlanNode::CreateTable { .. } => PlanType::CreateTable,
            PlanNode::Insert { .. } => PlanType::Insert,
            PlanNode::Cmd { .. } => PlanType::Cmd,
            PlanNode::FuncDef { .. } => PlanType::FuncDef,
        }
    }

    /// 数据输入节点，按左到右顺序
    pub fn children(&self) -> Vec<PlanId> {
        match self {
            PlanNode::Generic(node) => node.children.clone(),
            PlanNode::Select { source }
            | PlanNode::Filter { source, .. }
            | PlanNode::Group { source, .. }
            | PlanNode::Sort { source, .. }
            | PlanNode::Limit { source, .. }
            | PlanNode::Rename { source, .. }
            | PlanNode::Distinct { source } => vec![*source],
            PlanNode::Project(node) => vec![node.source],
            PlanNode::Join(node) => vec![node.left, node.right],
            PlanNode::Union { left, right, .. } => vec![*left, *right],
            PlanNode::TableScan { .. }
            | PlanNode::ProjectList(_)
            | PlanNode::Projection(_)
            | PlanNode::Window { .. }
            | PlanNode::Merge { .. }
            | PlanNode::CreateTable { .. }
            | PlanNode::Insert { .. }
            | PlanNode::Cmd { .. }
            | PlanNode::FuncDef { .. } => Vec::new(),
        }
    }

    pub fn as_projection(&self) -> Option<&ProjectNode> {
        match self {
            PlanNode::Projection(node) => Some(node),
            _ => None,
        }
    }
}
