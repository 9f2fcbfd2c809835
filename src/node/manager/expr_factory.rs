//! 表达式、字面量与类型节点工厂

use super::NodeManager;
use crate::core::error::NodeResult;
use crate::core::types::{DataType, FnOperator};
use crate::node::expr_node::{CallExprNode, ColumnRefNode, ConstValue, ExprNode};
use crate::node::handle::{ExprId, ExprListId, QueryId, SqlNodeId, TypeNodeId};
use crate::node::type_node::{TypeNode, TypeParams};

impl NodeManager {
    // ==================== 字面量 ====================

    /// 创建字面量节点，类型标签取决于值的来源类型
    ///
    /// `i32` -> Int32，`i64` -> Int64，`f32` -> Float，`f64` -> Double，
    /// 字符串 -> Varchar，`()` -> Null
    pub fn make_const_node<V: Into<ConstValue>>(&mut self, value: V) -> ExprId {
        self.register_expr(ExprNode::Const(value.into()))
    }

    /// 创建 NULL 字面量
    pub fn make_null_const_node(&mut self) -> ExprId {
        self.register_expr(ExprNode::Const(ConstValue::Null))
    }

    /// 创建带时间单位的 64 位整数字面量
    pub fn make_interval_const_node(&mut self, value: i64, unit: DataType) -> ExprId {
        self.register_expr(ExprNode::Const(ConstValue::Interval { value, unit }))
    }

    // ==================== 引用 ====================

    /// 创建列引用，`relation_name` 为空表示未限定
    pub fn make_column_ref_node(&mut self, column_name: &str, relation_name: &str) -> ExprId {
        self.make_column_ref_node_with_db(column_name, relation_name, "")
    }

    pub fn make_column_ref_node_with_db(
        &mut self,
        column_name: &str,
        relation_name: &str,
        db_name: &str,
    ) -> ExprId {
        self.register_expr(ExprNode::ColumnRef(ColumnRefNode {
            column_name: column_name.to_string(),
            relation_name: relation_name.to_string(),
            db_name: db_name.to_string(),
        }))
    }

    /// 创建 `*` / `t.*` 节点
    pub fn make_all_node(&mut self, relation_name: &str) -> ExprId {
        self.make_all_node_with_db(relation_name, "")
    }

    pub fn make_all_node_with_db(&mut self, relation_name: &str, db_name: &str) -> ExprId {
        self.register_expr(ExprNode::All {
            relation_name: relation_name.to_string(),
            db_name: db_name.to_string(),
        })
    }

    /// 函数体中的变量标识符
    pub fn make_expr_id_node(&mut self, name: &str) -> ExprId {
        self.register_expr(ExprNode::Id {
            name: name.to_string(),
        })
    }

    // ==================== 运算 ====================

    /// 创建二元表达式，不检查操作符与操作数是否匹配
    pub fn make_binary_expr_node(&mut self, left: ExprId, right: ExprId, op: FnOperator) -> ExprId {
        self.register_expr(ExprNode::Binary { op, left, right })
    }

    pub fn make_unary_expr_node(&mut self, operand: ExprId, op: FnOperator) -> ExprId {
        self.register_expr(ExprNode::Unary { op, operand })
    }

    /// 创建函数调用，`over` 为窗口定义节点
    pub fn make_func_node(
        &mut self,
        name: &str,
        args: Option<ExprListId>,
        over: Option<SqlNodeId>,
    ) -> ExprId {
        self.register_expr(ExprNode::Call(CallExprNode {
            function_name: name.to_string(),
            args,
            over,
        }))
    }

    /// 将子查询包装为表达式
    pub fn make_query_expr_node(&mut self, query: QueryId) -> ExprId {
        self.register_expr(ExprNode::Query { query })
    }

    pub fn make_order_by_node(&mut self, order_by: Option<ExprListId>, is_asc: bool) -> ExprId {
        self.register_expr(ExprNode::OrderBy { order_by, is_asc })
    }

    // ==================== 派生 ====================

    /// 以新的表名/库名重新限定列引用或 `*`
    ///
    /// 生成新节点，原节点不变；其他表达式原样返回
    pub fn make_expr_from(
        &mut self,
        expr: ExprId,
        relation_name: &str,
        db_name: &str,
    ) -> NodeResult<ExprId> {
        let requalified = match self.expr(expr)? {
            ExprNode::ColumnRef(column) => Some(ExprNode::ColumnRef(ColumnRefNode {
                column_name: column.column_name.clone(),
                relation_name: relation_name.to_string(),
                db_name: db_name.to_string(),
            })),
            ExprNode::All { .. } => Some(ExprNode::All {
                relation_name: relation_name.to_string(),
                db_name: db_name.to_string(),
            }),
            _ => None,
        };
        Ok(match requalified {
            Some(node) => self.register_expr(node),
            None => expr,
        })
    }

    /// 为两张表构造按列等值的连接条件
    ///
    /// 列表中的每个列引用生成 `db1.table1.col = db2.table2.col`，
    /// 再从左到右用 AND 连接。没有可用列时返回 NULL 字面量
    pub fn make_equal_condition(
        &mut self,
        db1: &str,
        table1: &str,
        db2: &str,
        table2: &str,
        columns: ExprListId,
    ) -> NodeResult<ExprId> {
        let mut names = Vec::new();
        for item in &self.expr_list(columns)?.items {
            match self.expr(*item)? {
                ExprNode::ColumnRef(column) => names.push(column.column_name.clone()),
                other => {
                    log::debug!("等值条件忽略非列引用表达式: {:?}", other.expr_type());
                }
            }
        }

        let mut condition: Option<ExprId> = None;
        for name in &names {
            let left = self.make_column_ref_node_with_db(name, table1, db1);
            let right = self.make_column_ref_node_with_db(name, table2, db2);
            let eq = self.make_binary_expr_node(left, right, FnOperator::Eq);
            condition = Some(match condition {
                Some(acc) => self.make_binary_expr_node(acc, eq, FnOperator::And),
                None => eq,
            });
        }
        Ok(match condition {
            Some(condition) => condition,
            None => self.make_null_const_node(),
        })
    }

    // ==================== 类型 ====================

    pub fn make_type_node(&mut self, base: DataType) -> TypeNodeId {
        self.register_type(TypeNode::new(base, TypeParams::None))
    }

    /// 单参数类型，如 `list<int32>`
    pub fn make_type_node_1(&mut self, base: DataType, v1: DataType) -> TypeNodeId {
        self.register_type(TypeNode::new(base, TypeParams::One(v1)))
    }

    /// 双参数类型，如 `map<string, int64>`
    pub fn make_type_node_2(&mut self, base: DataType, v1: DataType, v2: DataType) -> TypeNodeId {
        self.register_type(TypeNode::new(base, TypeParams::Two(v1, v2)))
    }
}
