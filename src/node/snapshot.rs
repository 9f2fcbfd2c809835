//! 管理器快照
//!
//! 以注册表下标导出全部节点，便于调试和比对编译结果

use serde::Serialize;

use super::manager::{NodeManager, NodeStats};
use super::node_list::ListNode;
use super::plan_node::PlanNode;
use super::sql_node::ParserNode;

/// 管理器内容的只读视图
#[derive(Debug, Serialize)]
pub struct ArenaSnapshot<'a> {
    pub arena_id: u32,
    pub stats: NodeStats,
    pub parser_nodes: &'a [ParserNode],
    pub node_lists: &'a [ListNode],
    pub plan_nodes: &'a [PlanNode],
    /// 物理算子只导出名称
    pub physical_nodes: Vec<&'a str>,
}

impl NodeManager {
    pub fn snapshot(&self) -> ArenaSnapshot<'_> {
        ArenaSnapshot {
            arena_id: self.id(),
            stats: self.stats(),
            parser_nodes: &self.parser_nodes,
            node_lists: &self.node_lists,
            plan_nodes: &self.plan_nodes,
            physical_nodes: self.physical_nodes.iter().map(|node| node.name()).collect(),
        }
    }

    /// 以格式化 JSON 导出快照
    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.snapshot())
    }
}
