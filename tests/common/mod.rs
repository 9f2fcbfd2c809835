//! 集成测试共享工具模块
//!
//! 提供测试用物理算子与常用查询树构造函数

#![allow(dead_code)]

pub mod assertions;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use querynode::node::{ExprId, NodeManager, PhysicalOpNode, QueryId, TableRefId};
use querynode::FnOperator;

/// 销毁时计数的物理算子
///
/// 多个算子共享同一个计数器，用于验证每个算子恰好被释放一次
#[derive(Debug)]
pub struct CountingOp {
    name: String,
    drops: Arc<AtomicUsize>,
}

impl CountingOp {
    pub fn new(name: &str, drops: Arc<AtomicUsize>) -> Self {
        Self {
            name: name.to_string(),
            drops,
        }
    }
}

impl PhysicalOpNode for CountingOp {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for CountingOp {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::SeqCst);
    }
}

/// `SELECT a+b AS c FROM t` 的语法树
pub struct SelectFixture {
    pub table: TableRefId,
    pub a: ExprId,
    pub b: ExprId,
    pub sum: ExprId,
    pub target: querynode::node::SqlNodeId,
    pub query: QueryId,
}

/// 按解析器的调用顺序构造 `SELECT a+b AS c FROM t`
pub fn build_select_a_plus_b(manager: &mut NodeManager) -> SelectFixture {
    let table = manager.make_table_node("t", "");
    let a = manager.make_column_ref_node("a", "");
    let b = manager.make_column_ref_node("b", "");
    let sum = manager.make_binary_expr_node(a, b, FnOperator::Add);
    let target = manager.make_res_target_node(sum, "c");
    let select_list = manager.make_node_list_with(target);
    let table_refs = manager.make_node_list_with(table);
    let query = manager.make_select_query_node(
        false,
        Some(select_list),
        Some(table_refs),
        None,
        None,
        None,
        None,
        None,
        None,
    );
    SelectFixture {
        table,
        a,
        b,
        sum,
        target,
        query,
    }
}
