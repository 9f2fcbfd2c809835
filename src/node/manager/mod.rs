//! 节点管理器
//!
//! 负责一次查询编译过程中所有节点的创建与销毁。
//! 语法树、表达式、函数体、逻辑计划和物理算子都登记在这里，
//! 其余阶段只持有句柄。
//!
//! 管理器按类别维护四个平铺的注册表，销毁时整体释放，
//! 不做递归删除，因此节点之间的引用（包括环）不影响释放顺序

mod expr_factory;
mod fn_factory;
mod list_factory;
mod plan_factory;
mod sql_factory;

use serde::Serialize;
use std::fmt;

use super::expr_node::ExprNode;
use super::fn_node::FnNode;
use super::handle::{
    next_arena_id, ExprId, ExprListId, FnListId, FnNodeId, NodeCategory, NodeHandle, NodeListId,
    PhysicalId, PlanId, QueryId, SqlNodeId, TableRefId, TypeNodeId,
};
use super::node_list::{ExprListNode, FnNodeList, ListNode, SqlNodeList};
use super::physical::PhysicalOpNode;
use super::plan_node::PlanNode;
use super::sql_node::{ParserNode, QueryNode, SqlNode, SqlNodeType, TableRefNode};
use super::type_node::TypeNode;
use crate::config::{ArenaConfig, Config};
use crate::core::error::{NodeError, NodeResult};

/// 待登记的节点，按注册表分类
pub(crate) enum ArenaNode {
    Parser(ParserNode),
    List(ListNode),
    Plan(PlanNode),
    Physical(Box<dyn PhysicalOpNode>),
}

impl ArenaNode {
    fn category(&self) -> NodeCategory {
        match self {
            ArenaNode::Parser(_) => NodeCategory::Parser,
            ArenaNode::List(_) => NodeCategory::NodeList,
            ArenaNode::Plan(_) => NodeCategory::Plan,
            ArenaNode::Physical(_) => NodeCategory::Physical,
        }
    }
}

/// 各注册表的节点数量
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NodeStats {
    pub parser_nodes: usize,
    pub node_lists: usize,
    pub plan_nodes: usize,
    pub physical_nodes: usize,
}

impl NodeStats {
    pub fn total(&self) -> usize {
        self.parser_nodes + self.node_lists + self.plan_nodes + self.physical_nodes
    }
}

impl fmt::Display for NodeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "parser={}, lists={}, plan={}, physical={}",
            self.parser_nodes, self.node_lists, self.plan_nodes, self.physical_nodes
        )
    }
}

#[cold]
#[inline(never)]
fn capacity_exceeded(len: usize, category: NodeCategory) -> ! {
    panic!("节点注册表容量超限: {} 注册表已有 {} 个节点", category, len)
}

/// 节点管理器
///
/// 单线程使用，一次编译对应一个实例。不同实例之间不共享任何状态
pub struct NodeManager {
    id: u32,
    pub(crate) parser_nodes: Vec<ParserNode>,
    pub(crate) node_lists: Vec<ListNode>,
    pub(crate) plan_nodes: Vec<PlanNode>,
    pub(crate) physical_nodes: Vec<Box<dyn PhysicalOpNode>>,
}

impl NodeManager {
    /// 创建新的节点管理器
    pub fn new() -> Self {
        Self::with_config(&ArenaConfig::default())
    }

    /// 由完整配置创建，只使用其中的 `[arena]` 部分
    pub fn from_config(config: &Config) -> Self {
        Self::with_config(&config.arena)
    }

    /// 按配置预分配各注册表
    pub fn with_config(config: &ArenaConfig) -> Self {
        let manager = Self {
            id: next_arena_id(),
            parser_nodes: Vec::with_capacity(config.parser_capacity),
            node_lists: Vec::with_capacity(config.node_list_capacity),
            plan_nodes: Vec::with_capacity(config.plan_capacity),
            physical_nodes: Vec::with_capacity(config.physical_capacity),
        };
        log::debug!("节点管理器 {} 已创建", manager.id);
        manager
    }

    /// 管理器ID，所有句柄都携带该ID
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn parser_node_count(&self) -> usize {
        self.parser_nodes.len()
    }

    pub fn node_list_count(&self) -> usize {
        self.node_lists.len()
    }

    pub fn plan_node_count(&self) -> usize {
        self.plan_nodes.len()
    }

    pub fn physical_node_count(&self) -> usize {
        self.physical_nodes.len()
    }

    pub fn stats(&self) -> NodeStats {
        NodeStats {
            parser_nodes: self.parser_nodes.len(),
            node_lists: self.node_lists.len(),
            plan_nodes: self.plan_nodes.len(),
            physical_nodes: self.physical_nodes.len(),
        }
    }

    /// 句柄是否由本管理器产生
    pub fn owns<H: NodeHandle>(&self, handle: H) -> bool {
        if handle.arena_id() != self.id {
            return false;
        }
        let len = match handle.category() {
            NodeCategory::Parser => self.parser_nodes.len(),
            NodeCategory::NodeList => self.node_lists.len(),
            NodeCategory::Plan => self.plan_nodes.len(),
            NodeCategory::Physical => self.physical_nodes.len(),
        };
        (handle.index() as usize) < len
    }

    /// 销毁管理器及其登记的全部节点
    ///
    /// 消耗 `self`，因此同一实例不可能被销毁两次。返回销毁前的节点数量
    pub fn teardown(self) -> NodeStats {
        let stats = self.stats();
        drop(self);
        stats
    }

    // ==================== 登记 ====================

    /// 将节点登记到对应注册表，返回其下标
    pub(crate) fn register(&mut self, node: ArenaNode) -> u32 {
        let category = node.category();
        let index = match node {
            ArenaNode::Parser(node) => push_slot(&mut self.parser_nodes, node, category),
            ArenaNode::List(node) => push_slot(&mut self.node_lists, node, category),
            ArenaNode::Plan(node) => push_slot(&mut self.plan_nodes, node, category),
            ArenaNode::Physical(node) => push_slot(&mut self.physical_nodes, node, category),
        };
        log::trace!("管理器 {} 登记 {} 节点 #{}", self.id, category, index);
        index
    }

    fn register_parser(&mut self, node: ParserNode) -> u32 {
        self.register(ArenaNode::Parser(node))
    }

    pub(crate) fn register_sql(&mut self, node: SqlNode) -> SqlNodeId {
        SqlNodeId::new(self.id, self.register_parser(ParserNode::Sql(node)))
    }

    pub(crate) fn register_query(&mut self, node: QueryNode) -> QueryId {
        QueryId::new(self.id, self.register_parser(ParserNode::Sql(SqlNode::Query(node))))
    }

    pub(crate) fn register_table_ref(&mut self, node: TableRefNode) -> TableRefId {
        TableRefId::new(
            self.id,
            self.register_parser(ParserNode::Sql(SqlNode::TableRef(node))),
        )
    }

    pub(crate) fn register_expr(&mut self, node: ExprNode) -> ExprId {
        ExprId::new(self.id, self.register_parser(ParserNode::Expr(node)))
    }

    pub(crate) fn register_fn(&mut self, node: FnNode) -> FnNodeId {
        FnNodeId::new(self.id, self.register_parser(ParserNode::Fn(node)))
    }

    pub(crate) fn register_type(&mut self, node: TypeNode) -> TypeNodeId {
        TypeNodeId::new(self.id, self.register_parser(ParserNode::Type(node)))
    }

    pub(crate) fn register_list(&mut self, node: ListNode) -> u32 {
        self.register(ArenaNode::List(node))
    }

    pub(crate) fn register_plan(&mut self, node: PlanNode) -> PlanId {
        PlanId::new(self.id, self.register(ArenaNode::Plan(node)))
    }

    // ==================== 读取 ====================

    fn check<H: NodeHandle>(&self, handle: H) -> NodeResult<usize> {
        if handle.arena_id() != self.id {
            return Err(NodeError::ForeignHandle {
                arena: self.id,
                handle_arena: handle.arena_id(),
            });
        }
        Ok(handle.index() as usize)
    }

    fn missing<H: NodeHandle>(handle: H) -> NodeError {
        NodeError::MissingNode {
            category: handle.category(),
            index: handle.index(),
        }
    }

    fn mismatch<H: NodeHandle>(handle: H, expected: &'static str) -> NodeError {
        NodeError::KindMismatch {
            category: handle.category(),
            index: handle.index(),
            expected,
        }
    }

    fn parser_slot<H: NodeHandle>(&self, handle: H) -> NodeResult<&ParserNode> {
        let index = self.check(handle)?;
        self.parser_nodes
            .get(index)
            .ok_or_else(|| Self::missing(handle))
    }

    fn parser_slot_mut<H: NodeHandle>(&mut self, handle: H) -> NodeResult<&mut ParserNode> {
        let index = self.check(handle)?;
        self.parser_nodes
            .get_mut(index)
            .ok_or_else(|| Self::missing(handle))
    }

    fn list_slot<H: NodeHandle>(&self, handle: H) -> NodeResult<&ListNode> {
        let index = self.check(handle)?;
        self.node_lists
            .get(index)
            .ok_or_else(|| Self::missing(handle))
    }

    fn list_slot_mut<H: NodeHandle>(&mut self, handle: H) -> NodeResult<&mut ListNode> {
        let index = self.check(handle)?;
        self.node_lists
            .get_mut(index)
            .ok_or_else(|| Self::missing(handle))
    }

    fn plan_slot_mut(&mut self, handle: PlanId) -> NodeResult<&mut PlanNode> {
        let index = self.check(handle)?;
        self.plan_nodes
            .get_mut(index)
            .ok_or_else(|| Self::missing(handle))
    }

    /// 读取任意语法树节点
    pub fn parser_node(&self, id: impl Into<SqlNodeId>) -> NodeResult<&ParserNode> {
        self.parser_slot(id.into())
    }

    /// 语法树节点的类型标签
    pub fn node_type(&self, id: impl Into<SqlNodeId>) -> NodeResult<SqlNodeType> {
        self.parser_node(id).map(ParserNode::node_type)
    }

    pub fn sql_node(&self, id: impl Into<SqlNodeId>) -> NodeResult<&SqlNode> {
        let id = id.into();
        self.parser_slot(id)?
            .as_sql()
            .ok_or_else(|| Self::mismatch(id, "SqlNode"))
    }

    pub fn expr(&self, id: ExprId) -> NodeResult<&ExprNode> {
        self.parser_slot(id)?
            .as_expr()
            .ok_or_else(|| Self::mismatch(id, "ExprNode"))
    }

    pub fn query(&self, id: QueryId) -> NodeResult<&QueryNode> {
        match self.parser_slot(id)? {
            ParserNode::Sql(SqlNode::Query(query)) => Ok(query),
            _ => Err(Self::mismatch(id, "QueryNode")),
        }
    }

    pub fn table_ref(&self, id: TableRefId) -> NodeResult<&TableRefNode> {
        match self.parser_slot(id)? {
            ParserNode::Sql(SqlNode::TableRef(table_ref)) => Ok(table_ref),
            _ => Err(Self::mismatch(id, "TableRefNode")),
        }
    }

    pub fn fn_node(&self, id: FnNodeId) -> NodeResult<&FnNode> {
        self.parser_slot(id)?
            .as_fn()
            .ok_or_else(|| Self::mismatch(id, "FnNode"))
    }

    pub fn type_node(&self, id: TypeNodeId) -> NodeResult<&TypeNode> {
        self.parser_slot(id)?
            .as_type()
            .ok_or_else(|| Self::mismatch(id, "TypeNode"))
    }

    pub fn node_list(&self, id: NodeListId) -> NodeResult<&SqlNodeList> {
        match self.list_slot(id)? {
            ListNode::Sql(list) => Ok(list),
            _ => Err(Self::mismatch(id, "SqlNodeList")),
        }
    }

    pub fn expr_list(&self, id: ExprListId) -> NodeResult<&ExprListNode> {
        match self.list_slot(id)? {
            ListNode::Expr(list) => Ok(list),
            _ => Err(Self::mismatch(id, "ExprListNode")),
        }
    }

    pub fn fn_list(&self, id: FnListId) -> NodeResult<&FnNodeList> {
        match self.list_slot(id)? {
            ListNode::Fn(list) => Ok(list),
            _ => Err(Self::mismatch(id, "FnNodeList")),
        }
    }

    pub fn plan(&self, id: PlanId) -> NodeResult<&PlanNode> {
        let index = self.check(id)?;
        self.plan_nodes.get(index).ok_or_else(|| Self::missing(id))
    }

    pub fn physical(&self, id: PhysicalId) -> NodeResult<&dyn PhysicalOpNode> {
        let index = self.check(id)?;
        self.physical_nodes
            .get(index)
            .map(|node| &**node)
            .ok_or_else(|| Self::missing(id))
    }
}

impl Default for NodeManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NodeManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeManager")
            .field("id", &self.id)
            .field("stats", &self.stats())
            .finish()
    }
}

impl Drop for NodeManager {
    fn drop(&mut self) {
        let stats = self.stats();
        // 各注册表平铺释放，顺序无关
        self.physical_nodes.clear();
        self.plan_nodes.clear();
        self.node_lists.clear();
        self.parser_nodes.clear();
        log::debug!("节点管理器 {} 已销毁: {}", self.id, stats);
    }
}

fn push_slot<T>(registry: &mut Vec<T>, node: T, category: NodeCategory) -> u32 {
    let len = registry.len();
    let index = u32::try_from(len).unwrap_or_else(|_| capacity_exceeded(len, category));
    registry.push(node);
    index
}
