//! 节点管理器集成测试
//!
//! 测试范围:
//! - 端到端：`SELECT a+b AS c FROM t` 的语法树与计划树
//! - 销毁：每个登记的节点恰好释放一次
//! - 隔离：不同管理器之间不共享节点
//! - 环引用：子查询回指外层时的批量释放

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use common::assertions::{assert_err_with, assert_ok};
use common::{build_select_a_plus_b, CountingOp};
use querynode::config::{ArenaConfig, Config};
use querynode::node::{
    ExprNode, NodeCategory, NodeManager, ParserNode, PlanNode, QueryNode,
    ResTargetNode, SqlNode, SqlNodeType, TableRefNode,
};
use querynode::{FnOperator, NodeError};

// ==================== 端到端 ====================

#[test]
fn test_select_a_plus_b_parse_tree() {
    let mut manager = NodeManager::new();
    let fixture = build_select_a_plus_b(&mut manager);

    assert_eq!(
        manager.table_ref(fixture.table),
        Ok(&TableRefNode::Table {
            name: "t".to_string(),
            alias: String::new(),
        })
    );

    let a = assert_ok(manager.expr(fixture.a));
    assert_eq!(a.as_column_ref().map(|c| c.column_name.as_str()), Some("a"));
    let b = assert_ok(manager.expr(fixture.b));
    assert_eq!(b.as_column_ref().map(|c| c.column_name.as_str()), Some("b"));

    assert_eq!(
        manager.expr(fixture.sum),
        Ok(&ExprNode::Binary {
            op: FnOperator::Add,
            left: fixture.a,
            right: fixture.b,
        })
    );
    assert_eq!(
        manager.sql_node(fixture.target),
        Ok(&SqlNode::ResTarget(ResTargetNode {
            expr: fixture.sum,
            name: "c".to_string(),
        }))
    );

    let QueryNode::Select(select) = assert_ok(manager.query(fixture.query)) else {
        panic!("应为 SELECT 查询");
    };
    assert!(!select.is_distinct);
    let select_list = select.select_list.expect("应有输出列");
    assert_eq!(
        manager.node_list(select_list).map(|l| l.items.clone()),
        Ok(vec![fixture.target])
    );
    assert_eq!(manager.node_type(fixture.query), Ok(SqlNodeType::SelectStmt));
}

#[test]
fn test_select_a_plus_b_plan_tree() {
    let mut manager = NodeManager::new();
    let fixture = build_select_a_plus_b(&mut manager);
    let parser_nodes = manager.parser_node_count();

    // 规划阶段：表扫描 -> 投影
    let scan = manager.make_table_plan_node("t");
    let project = manager.make_row_project_node(0, "c", fixture.sum);
    let plan = manager.make_project_plan_node(scan, "t", &[project], &[(0, 0)]);

    // 规划不修改也不新增语法树节点
    assert_eq!(manager.parser_node_count(), parser_nodes);
    assert_eq!(
        manager.plan(scan),
        Ok(&PlanNode::TableScan {
            table: "t".to_string()
        })
    );

    let PlanNode::Project(node) = assert_ok(manager.plan(plan)) else {
        panic!("应为投影计划");
    };
    assert_eq!(node.source, scan);
    assert_eq!(node.table, "t");
    assert_eq!(node.projects, vec![project]);
    assert_eq!(node.pos_mapping, vec![(0, 0)]);

    let projection = assert_ok(manager.plan(project))
        .as_projection()
        .cloned()
        .expect("应为投影");
    assert_eq!(projection.pos, 0);
    assert_eq!(projection.name, "c");
    assert!(!projection.is_aggregation);
    // 投影包装的是同一个表达式节点
    assert_eq!(projection.expr, fixture.sum);

    let stats = manager.teardown();
    assert_eq!(stats.parser_nodes, 6);
    assert_eq!(stats.node_lists, 2);
    assert_eq!(stats.plan_nodes, 3);
}

// ==================== 销毁 ====================

#[test]
fn test_teardown_releases_each_physical_node_once() {
    let drops = Arc::new(AtomicUsize::new(0));
    let mut manager = NodeManager::new();
    let fixture = build_select_a_plus_b(&mut manager);
    let scan = manager.make_table_plan_node("t");
    let project = manager.make_row_project_node(0, "c", fixture.sum);
    manager.make_project_plan_node(scan, "t", &[project], &[]);

    for name in ["DataProvider", "Project", "Limit"] {
        manager.register_physical(CountingOp::new(name, drops.clone()));
    }
    assert_eq!(drops.load(Ordering::SeqCst), 0);

    let stats = manager.teardown();
    assert_eq!(stats.physical_nodes, 3);
    assert_eq!(drops.load(Ordering::SeqCst), 3);
}

#[test]
fn test_drop_releases_like_teardown() {
    let drops = Arc::new(AtomicUsize::new(0));
    {
        let mut manager = NodeManager::with_config(&ArenaConfig::default());
        manager.register_physical(CountingOp::new("Join", drops.clone()));
        manager.register_physical_boxed(Box::new(CountingOp::new("Agg", drops.clone())));
    }
    assert_eq!(drops.load(Ordering::SeqCst), 2);
}

#[test]
fn test_teardown_with_reference_cycle() {
    let drops = Arc::new(AtomicUsize::new(0));
    let mut manager = NodeManager::new();

    // 外层查询的 FROM 列表中放入子查询引用，再把外层查询本身追加进该列表
    let inner = manager.make_select_query_node(
        false,
        None,
        None,
        None,
        None,
        None,
        None,
        None,
        None,
    );
    let sub_ref = manager.make_query_ref_node(inner, "s");
    let table_refs = manager.make_node_list_with(sub_ref);
    let outer = manager.make_select_query_node(
        false,
        None,
        Some(table_refs),
        None,
        None,
        None,
        None,
        None,
        None,
    );
    assert_ok(manager.push_node(table_refs, outer));
    let back = manager.make_query_expr_node(outer);
    assert_ok(manager.push_node(table_refs, back));
    manager.register_physical(CountingOp::new("SubQuery", drops.clone()));

    assert_eq!(
        manager.node_list(table_refs).map(|l| l.items.len()),
        Ok(3)
    );
    let stats = manager.teardown();
    assert_eq!(stats.total(), 6);
    assert_eq!(drops.load(Ordering::SeqCst), 1);
}

#[test]
fn test_manager_from_loaded_config() {
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("querynode.toml");
    std::fs::write(&path, "[arena]\nparser_capacity = 16\n[log]\nlevel = \"debug\"\n")
        .expect("Failed to write config file");

    let config = assert_ok(Config::load(&path));
    assert_eq!(config.arena.parser_capacity, 16);
    assert_eq!(config.log.level, "debug");

    let mut manager = NodeManager::from_config(&config);
    build_select_a_plus_b(&mut manager);
    assert_eq!(manager.teardown().parser_nodes, 6);
}

// ==================== 隔离 ====================

#[test]
fn test_arenas_never_share_nodes() {
    let mut first = NodeManager::new();
    let mut second = NodeManager::new();
    let f1 = build_select_a_plus_b(&mut first);
    let f2 = build_select_a_plus_b(&mut second);

    assert_ne!(first.id(), second.id());
    // 结构相同，句柄下标相同，但句柄不相等
    assert_eq!(f1.sum.index(), f2.sum.index());
    assert_ne!(f1.sum, f2.sum);
    assert!(first.owns(f1.query));
    assert!(!first.owns(f2.query));
    assert_eq!(first.stats(), second.stats());

    assert_err_with(second.expr(f1.sum), "句柄属于管理器");
    assert!(matches!(
        first.query(f2.query),
        Err(NodeError::ForeignHandle { .. })
    ));
}

#[test]
fn test_every_node_registered_once() {
    let mut manager = NodeManager::new();
    let fixture = build_select_a_plus_b(&mut manager);
    let snapshot = manager.snapshot();

    let exprs = snapshot
        .parser_nodes
        .iter()
        .filter(|node| matches!(node, ParserNode::Expr(_)))
        .count();
    assert_eq!(exprs, 3);
    assert_eq!(snapshot.parser_nodes.len(), 6);
    assert_eq!(fixture.sum.category(), NodeCategory::Parser);
    assert_eq!(
        snapshot.parser_nodes[fixture.sum.index() as usize],
        ParserNode::Expr(ExprNode::Binary {
            op: FnOperator::Add,
            left: fixture.a,
            right: fixture.b,
        })
    );
}
