//! 节点模块
//!
//! 编译一条查询时产生的全部节点：语法树、函数体、逻辑计划，
//! 以及由外部构造、在此登记所有权的物理算子

pub mod expr_node;
pub mod fn_node;
pub mod handle;
pub mod macros;
pub mod manager;
pub mod node_list;
pub mod physical;
pub mod plan_node;
pub mod snapshot;
pub mod sql_node;
pub mod type_node;

pub use expr_node::{CallExprNode, ColumnRefNode, ConstValue, ExprNode, ExprType};
pub use fn_node::{FnAssignNode, FnBareStmt, FnHeaderNode, FnIfElseBlock, FnNode};
pub use handle::{
    ExprId, ExprListId, FnListId, FnNodeId, NodeCategory, NodeHandle, NodeListId, PhysicalId,
    PlanId, QueryId, SqlNodeId, TableRefId, TypeNodeId,
};
pub use manager::{NodeManager, NodeStats};
pub use node_list::{ExprListNode, FnNodeList, ListNode, SqlNodeList};
pub use physical::PhysicalOpNode;
pub use plan_node::{
    GenericPlanNode, JoinPlanNode, PlanArity, PlanNode, PlanType, ProjectListPlanNode,
    ProjectNode, ProjectPlanNode,
};
pub use snapshot::ArenaSnapshot;
pub use sql_node::{
    CmdNode, ColumnDescNode, ColumnIndexNode, CreateTableNode, ExplainNode, FrameBoundNode,
    FrameNode, IndexItemNode, InsertStmtNode, ParserNode, QueryNode, ResTargetNode,
    SelectQueryNode, SqlNode, SqlNodeType, TableRefNode, UnionQueryNode, WindowDefNode,
};
pub use type_node::{TypeNode, TypeParams};
