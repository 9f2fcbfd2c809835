//! 逻辑计划节点工厂与物理算子登记

use super::{ArenaNode, NodeManager};
use crate::core::error::{NodeError, NodeResult};
use crate::core::types::JoinType;
use crate::node::handle::{ExprId, ExprListId, FnNodeId, PhysicalId, PlanId, SqlNodeId};
use crate::node::physical::PhysicalOpNode;
use crate::node::plan_node::{
    GenericPlanNode, JoinPlanNode, PlanArity, PlanNode, PlanType, ProjectListPlanNode,
    ProjectNode, ProjectPlanNode,
};

impl NodeManager {
    // ==================== 通用计划节点 ====================

    fn make_generic_plan_node(&mut self, plan_type: PlanType, arity: PlanArity) -> PlanId {
        self.register_plan(PlanNode::Generic(GenericPlanNode {
            plan_type,
            arity,
            children: Vec::new(),
        }))
    }

    pub fn make_leaf_plan_node(&mut self, plan_type: PlanType) -> PlanId {
        self.make_generic_plan_node(plan_type, PlanArity::Leaf)
    }

    pub fn make_unary_plan_node(&mut self, plan_type: PlanType) -> PlanId {
        self.make_generic_plan_node(plan_type, PlanArity::Unary)
    }

    pub fn make_binary_plan_node(&mut self, plan_type: PlanType) -> PlanId {
        self.make_generic_plan_node(plan_type, PlanArity::Binary)
    }

    pub fn make_multi_plan_node(&mut self, plan_type: PlanType) -> PlanId {
        self.make_generic_plan_node(plan_type, PlanArity::Multi)
    }

    /// 向通用计划节点追加子节点，超出元数时报错
    pub fn add_plan_child(&mut self, parent: PlanId, child: PlanId) -> NodeResult<()> {
        self.check(child)?;
        match self.plan_slot_mut(parent)? {
            PlanNode::Generic(node) => {
                if let Some(max) = node.arity.max_children() {
                    if node.children.len() >= max {
                        return Err(NodeError::ArityExceeded {
                            index: parent.index(),
                            arity: max,
                        });
                    }
                }
                node.children.push(child);
                Ok(())
            }
            _ => Err(NodeError::NotAContainer {
                index: parent.index(),
                reason: "子节点在构造时已确定",
            }),
        }
    }

    // ==================== 投影 ====================

    fn make_project_node(
        &mut self,
        pos: i32,
        name: &str,
        is_aggregation: bool,
        expr: ExprId,
    ) -> PlanId {
        self.register_plan(PlanNode::Projection(ProjectNode {
            pos,
            name: name.to_string(),
            is_aggregation,
            expr,
        }))
    }

    /// 行投影，`pos` 为从 0 开始的输出位置
    pub fn make_row_project_node(&mut self, pos: i32, name: &str, expr: ExprId) -> PlanId {
        self.make_project_node(pos, name, false, expr)
    }

    /// 聚合投影
    pub fn make_agg_project_node(&mut self, pos: i32, name: &str, expr: ExprId) -> PlanId {
        self.make_project_node(pos, name, true, expr)
    }

    pub fn make_project_plan_node(
        &mut self,
        source: PlanId,
        table: &str,
        projects: &[PlanId],
        pos_mapping: &[(u32, u32)],
    ) -> PlanId {
        self.register_plan(PlanNode::Project(ProjectPlanNode {
            source,
            table: table.to_string(),
            projects: projects.to_vec(),
            pos_mapping: pos_mapping.to_vec(),
        }))
    }

    pub fn make_project_list_plan_node(
        &mut self,
        window: Option<PlanId>,
        need_agg: bool,
    ) -> PlanId {
        self.register_plan(PlanNode::ProjectList(ProjectListPlanNode {
            window,
            need_agg,
            projects: Vec::new(),
        }))
    }

    /// 向投影列表追加一个投影
    pub fn add_project(&mut self, project_list: PlanId, project: PlanId) -> NodeResult<()> {
        self.check(project)?;
        match self.plan_slot_mut(project_list)? {
            PlanNode::ProjectList(node) => {
                node.projects.push(project);
                Ok(())
            }
            _ => Err(NodeError::NotAContainer {
                index: project_list.index(),
                reason: "不是投影列表",
            }),
        }
    }

    // ==================== 带载荷的计划节点 ====================

    pub fn make_table_plan_node(&mut self, table: &str) -> PlanId {
        self.register_plan(PlanNode::TableScan {
            table: table.to_string(),
        })
    }

    pub fn make_select_plan_node(&mut self, source: PlanId) -> PlanId {
        self.register_plan(PlanNode::Select { source })
    }

    pub fn make_window_plan_node(&mut self, window_id: i32) -> PlanId {
        self.register_plan(PlanNode::Window { id: window_id })
    }

    pub fn make_filter_plan_node(&mut self, source: PlanId, condition: ExprId) -> PlanId {
        self.register_plan(PlanNode::Filter { source, condition })
    }

    /// 计划层的连接，独立于语法层的连接节点
    pub fn make_join_plan_node(
        &mut self,
        left: PlanId,
        right: PlanId,
        join_type: JoinType,
        condition: Option<ExprId>,
    ) -> PlanId {
        self.register_plan(PlanNode::Join(JoinPlanNode {
            left,
            right,
            join_type,
            condition,
        }))
    }

    pub fn make_group_plan_node(&mut self, source: PlanId, by_list: Option<ExprListId>) -> PlanId {
        self.register_plan(PlanNode::Group { source, by_list })
    }

    /// `order_by` 为 `make_order_by_node` 产生的表达式
    pub fn make_sort_plan_node(&mut self, source: PlanId, order_by: ExprId) -> PlanId {
        self.register_plan(PlanNode::Sort { source, order_by })
    }

    pub fn make_limit_plan_node(&mut self, source: PlanId, count: i32) -> PlanId {
        self.register_plan(PlanNode::Limit { source, count })
    }

    pub fn make_rename_plan_node(&mut self, source: PlanId, alias: &str) -> PlanId {
        self.register_plan(PlanNode::Rename {
            source,
            alias: alias.to_string(),
        })
    }

    pub fn make_union_plan_node(&mut self, left: PlanId, right: PlanId, is_all: bool) -> PlanId {
        self.register_plan(PlanNode::Union {
            left,
            right,
            is_all,
        })
    }

    pub fn make_distinct_plan_node(&mut self, source: PlanId) -> PlanId {
        self.register_plan(PlanNode::Distinct { source })
    }

    pub fn make_merge_node(&mut self, column_size: i32) -> PlanId {
        self.register_plan(PlanNode::Merge { column_size })
    }

    pub fn make_create_table_plan_node(
        &mut self,
        table_name: &str,
        columns: &[SqlNodeId],
    ) -> PlanId {
        self.register_plan(PlanNode::CreateTable {
            table_name: table_name.to_string(),
            columns: columns.to_vec(),
        })
    }

    pub fn make_insert_plan_node(&mut self, insert: SqlNodeId) -> PlanId {
        self.register_plan(PlanNode::Insert { insert })
    }

    pub fn make_cmd_plan_node(&mut self, cmd: SqlNodeId) -> PlanId {
        self.register_plan(PlanNode::Cmd { cmd })
    }

    pub fn make_func_plan_node(&mut self, fn_def: FnNodeId) -> PlanId {
        self.register_plan(PlanNode::FuncDef { fn_def })
    }

    // ==================== 物理算子 ====================

    /// 登记外部构造的物理算子，随管理器一起销毁
    pub fn register_physical<P: PhysicalOpNode + 'static>(&mut self, node: P) -> PhysicalId {
        self.register_physical_boxed(Box::new(node))
    }

    pub fn register_physical_boxed(&mut self, node: Box<dyn PhysicalOpNode>) -> PhysicalId {
        PhysicalId::new(self.id, self.register(ArenaNode::Physical(node)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::FnOperator;

    #[derive(Debug)]
    struct ScanOp;

    impl PhysicalOpNode for ScanOp {
        fn name(&self) -> &str {
            "DataProvider"
        }
    }

    #[test]
    fn test_generic_plan_arity() {
        let mut manager = NodeManager::new();
        let leaf = manager.make_leaf_plan_node(PlanType::TableScan);
        let unary = manager.make_unary_plan_node(PlanType::Distinct);
        let binary = manager.make_binary_plan_node(PlanType::Union);
        let multi = manager.make_multi_plan_node(PlanType::Merge);

        assert_eq!(
            manager.add_plan_child(leaf, unary),
            Err(NodeError::ArityExceeded {
                index: leaf.index(),
                arity: 0
            })
        );
        assert_eq!(manager.add_plan_child(unary, leaf), Ok(()));
        assert!(manager.add_plan_child(unary, leaf).is_err());
        assert_eq!(manager.add_plan_child(binary, leaf), Ok(()));
        assert_eq!(manager.add_plan_child(binary, unary), Ok(()));
        assert!(manager.add_plan_child(binary, multi).is_err());
        for _ in 0..5 {
            assert_eq!(manager.add_plan_child(multi, leaf), Ok(()));
        }

        assert_eq!(manager.plan(binary).map(|p| p.children()), Ok(vec![leaf, unary]));
        assert_eq!(manager.plan(multi).map(|p| p.children().len()), Ok(5));
        assert_eq!(manager.plan(unary).map(|p| p.plan_type()), Ok(PlanType::Distinct));
    }

    #[test]
    fn test_specialized_plan_rejects_children() {
        let mut manager = NodeManager::new();
        let scan = manager.make_table_plan_node("t");
        let other = manager.make_table_plan_node("u");
        assert!(matches!(
            manager.add_plan_child(scan, other),
            Err(NodeError::NotAContainer { .. })
        ));
    }

    #[test]
    fn test_plan_join_keeps_operand_order() {
        let mut manager = NodeManager::new();
        let a = manager.make_table_plan_node("a");
        let b = manager.make_table_plan_node("b");
        let ka = manager.make_column_ref_node("k", "a");
        let kb = manager.make_column_ref_node("k", "b");
        let cond = manager.make_binary_expr_node(ka, kb, FnOperator::Eq);

        for join_type in [
            JoinType::Inner,
            JoinType::Left,
            JoinType::Right,
            JoinType::Full,
            JoinType::Last,
        ] {
            let join = manager.make_join_plan_node(a, b, join_type, Some(cond));
            assert_eq!(
                manager.plan(join),
                Ok(&PlanNode::Join(JoinPlanNode {
                    left: a,
                    right: b,
                    join_type,
                    condition: Some(cond),
                }))
            );
        }
    }

    #[test]
    fn test_row_and_agg_projections() {
        let mut manager = NodeManager::new();
        let x = manager.make_column_ref_node("x", "");
        let args = manager.make_expr_list_with(x);
        let sum = manager.make_func_node("sum", Some(args), None);

        let row = manager.make_row_project_node(0, "x", x);
        let agg = manager.make_agg_project_node(1, "total", sum);

        assert_eq!(
            manager.plan(row).ok().and_then(|p| p.as_projection()).cloned(),
            Some(ProjectNode {
                pos: 0,
                name: "x".to_string(),
                is_aggregation: false,
                expr: x,
            })
        );
        assert_eq!(
            manager.plan(agg).ok().and_then(|p| p.as_projection()).map(|p| p.is_aggregation),
            Some(true)
        );

        let window = manager.make_window_plan_node(1);
        let list = manager.make_project_list_plan_node(Some(window), true);
        manager.add_project(list, row).expect("追加投影应成功");
        manager.add_project(list, agg).expect("追加投影应成功");
        assert_eq!(
            manager.plan(list),
            Ok(&PlanNode::ProjectList(ProjectListPlanNode {
                window: Some(window),
                need_agg: true,
                projects: vec![row, agg],
            }))
        );
        assert!(manager.add_project(window, row).is_err());
    }

    #[test]
    fn test_unary_plan_payloads() {
        let mut manager = NodeManager::new();
        let scan = manager.make_table_plan_node("t");
        let select = manager.make_select_plan_node(scan);
        let x = manager.make_column_ref_node("x", "");
        let by = manager.make_expr_list_with(x);
        let group = manager.make_group_plan_node(select, Some(by));
        let order = manager.make_order_by_node(Some(by), false);
        let sort = manager.make_sort_plan_node(group, order);
        let limit = manager.make_limit_plan_node(sort, 10);
        let rename = manager.make_rename_plan_node(limit, "r");
        let distinct = manager.make_distinct_plan_node(rename);
        let other = manager.make_table_plan_node("u");
        let union = manager.make_union_plan_node(distinct, other, false);
        let merge = manager.make_merge_node(3);

        assert_eq!(
            manager.plan(group),
            Ok(&PlanNode::Group {
                source: select,
                by_list: Some(by)
            })
        );
        assert_eq!(
            manager.plan(sort),
            Ok(&PlanNode::Sort {
                source: group,
                order_by: order
            })
        );
        assert_eq!(
            manager.plan(limit),
            Ok(&PlanNode::Limit {
                source: sort,
                count: 10
            })
        );
        assert_eq!(
            manager.plan(rename),
            Ok(&PlanNode::Rename {
                source: limit,
                alias: "r".to_string()
            })
        );
        assert_eq!(manager.plan(distinct).map(|p| p.children()), Ok(vec![rename]));
        assert_eq!(
            manager.plan(union),
            Ok(&PlanNode::Union {
                left: distinct,
                right: other,
                is_all: false
            })
        );
        assert_eq!(manager.plan(merge), Ok(&PlanNode::Merge { column_size: 3 }));
        assert_eq!(manager.plan_node_count(), 10);
    }

    #[test]
    fn test_statement_plans_reference_parse_nodes() {
        use crate::core::types::{CmdType, DataType};
        use crate::node::sql_node::SqlNodeType;

        let mut manager = NodeManager::new();
        let id = manager.make_column_desc_node("id", DataType::Int64, true);
        let create = manager.make_create_table_plan_node("t", &[id]);
        let cmd = manager.make_cmd_node(CmdType::ShowDatabases);
        let cmd_plan = manager.make_cmd_plan_node(cmd);
        let insert = manager.make_insert_table_node("t", None, None);
        let insert_plan = manager.make_insert_plan_node(insert);
        let header = manager.make_fn_header_node("f", None, None);
        let body = manager.make_fn_list();
        let def = manager.make_fn_def_node(header, body);
        let func = manager.make_func_plan_node(def);

        assert_eq!(
            manager.plan(create),
            Ok(&PlanNode::CreateTable {
                table_name: "t".to_string(),
                columns: vec![id]
            })
        );
        let Ok(PlanNode::Cmd { cmd: cmd_ref }) = manager.plan(cmd_plan) else {
            panic!("应为命令计划");
        };
        assert_eq!(manager.node_type(*cmd_ref), Ok(SqlNodeType::Cmd));
        assert_eq!(manager.plan(insert_plan).map(|p| p.plan_type()), Ok(PlanType::Insert));
        assert_eq!(manager.plan(func), Ok(&PlanNode::FuncDef { fn_def: def }));
    }

    #[test]
    fn test_register_physical() {
        let mut manager = NodeManager::new();
        let op = manager.register_physical(ScanOp);
        let boxed = manager.register_physical_boxed(Box::new(ScanOp));

        assert_ne!(op, boxed);
        assert_eq!(
            manager.physical(op).map(|p| p.name().to_string()),
            Ok("DataProvider".to_string())
        );
        assert_eq!(manager.physical_node_count(), 2);
        assert!(manager.physical(op).map(|p| p.output_size().is_none()).unwrap_or(false));
    }

    #[test]
    fn test_foreign_plan_child_rejected() {
        let mut first = NodeManager::new();
        let mut second = NodeManager::new();
        let multi = first.make_multi_plan_node(PlanType::Merge);
        let list = first.make_project_list_plan_node(None, false);

        let scan = second.make_table_plan_node("t");
        let x = second.make_column_ref_node("x", "");
        let project = second.make_row_project_node(0, "x", x);

        let foreign = Err(NodeError::ForeignHandle {
            arena: first.id(),
            handle_arena: second.id(),
        });
        assert_eq!(first.add_plan_child(multi, scan), foreign);
        assert_eq!(first.add_project(list, project), foreign);

        assert_eq!(first.plan(multi).map(|p| p.children()), Ok(Vec::new()));
        assert!(matches!(
            first.plan(list),
            Ok(PlanNode::ProjectList(node)) if node.projects.is_empty()
        ));
    }
}
