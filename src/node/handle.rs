//! 节点句柄
//!
//! 节点之间的引用一律使用句柄而非指针：句柄只用于遍历，
//! 不持有所有权，因此子查询回指外层查询这类环也不会影响批量释放

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::define_node_handle;

/// 注册表分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeCategory {
    /// 语法树节点（含表达式、函数体、类型节点）
    Parser,
    /// 节点列表容器
    NodeList,
    /// 逻辑计划节点
    Plan,
    /// 物理算子节点
    Physical,
}

impl NodeCategory {
    pub fn name(&self) -> &'static str {
        match self {
            NodeCategory::Parser => "Parser",
            NodeCategory::NodeList => "NodeList",
            NodeCategory::Plan => "Plan",
            NodeCategory::Physical => "Physical",
        }
    }
}

impl fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 所有句柄的公共接口
pub trait NodeHandle: Copy {
    fn arena_id(&self) -> u32;
    fn index(&self) -> u32;
    fn category(&self) -> NodeCategory;
}

define_node_handle! {
    /// 任意语法树节点句柄
    pub struct SqlNodeId;
    category: Parser
}

define_node_handle! {
    /// 表达式节点句柄
    pub struct ExprId;
    category: Parser
    widen: SqlNodeId
}

define_node_handle! {
    /// 查询节点句柄（SELECT / UNION）
    pub struct QueryId;
    category: Parser
    widen: SqlNodeId
}

define_node_handle! {
    /// 表引用节点句柄
    pub struct TableRefId;
    category: Parser
    widen: SqlNodeId
}

define_node_handle! {
    /// 类型节点句柄
    pub struct TypeNodeId;
    category: Parser
    widen: SqlNodeId
}

define_node_handle! {
    /// 函数体节点句柄
    pub struct FnNodeId;
    category: Parser
    widen: SqlNodeId
}

define_node_handle! {
    /// 通用节点列表句柄
    pub struct NodeListId;
    category: NodeList
}

define_node_handle! {
    /// 表达式列表句柄
    pub struct ExprListId;
    category: NodeList
}

define_node_handle! {
    /// 函数语句列表句柄
    pub struct FnListId;
    category: NodeList
}

define_node_handle! {
    /// 逻辑计划节点句柄
    pub struct PlanId;
    category: Plan
}

define_node_handle! {
    /// 物理算子句柄
    pub struct PhysicalId;
    category: Physical
}

/// 管理器ID生成器
///
/// 使用单例模式提供进程内唯一的管理器ID，
/// 保证两个管理器产生的句柄永不相等
pub struct ArenaIdGenerator {
    counter: AtomicU32,
}

impl ArenaIdGenerator {
    /// 获取全局单例实例
    pub fn instance() -> &'static Self {
        static INSTANCE: ArenaIdGenerator = ArenaIdGenerator {
            counter: AtomicU32::new(1), // 从1开始，0保留为无效ID
        };
        &INSTANCE
    }

    /// 获取下一个唯一ID
    ///
    /// ID 不回绕，耗尽时终止
    pub fn next_id(&self) -> u32 {
        match self
            .counter
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |id| id.checked_add(1))
        {
            Ok(id) => id,
            Err(id) => arena_ids_exhausted(id),
        }
    }
}

#[cold]
#[inline(never)]
fn arena_ids_exhausted(last: u32) -> ! {
    panic!("管理器ID已耗尽: 最后分配的ID为 {}", last)
}

/// 为管理器分配新ID的便捷函数
pub fn next_arena_id() -> u32 {
    ArenaIdGenerator::instance().next_id()
}
