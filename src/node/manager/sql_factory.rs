//! 语句、表引用、窗口与索引节点工厂

use super::NodeManager;
use crate::core::error::NodeResult;
use crate::core::types::{BoundType, CmdType, DataType, ExplainType, FrameType, JoinType};
use crate::node::expr_node::ExprNode;
use crate::node::handle::{ExprId, ExprListId, NodeListId, QueryId, SqlNodeId, TableRefId};
use crate::node::sql_node::{
    CmdNode, ColumnDescNode, ColumnIndexNode, CreateTableNode, ExplainNode, FrameBoundNode,
    FrameNode, IndexItemNode, InsertStmtNode, ParserNode, QueryNode, ResTargetNode,
    SelectQueryNode, SqlNode, TableRefNode, UnionQueryNode, WindowDefNode,
};

impl NodeManager {
    // ==================== 查询 ====================

    #[allow(clippy::too_many_arguments)]
    pub fn make_select_query_node(
        &mut self,
        is_distinct: bool,
        select_list: Option<NodeListId>,
        table_refs: Option<NodeListId>,
        where_expr: Option<ExprId>,
        group_exprs: Option<ExprListId>,
        having_expr: Option<ExprId>,
        order_expr: Option<ExprId>,
        windows: Option<NodeListId>,
        limit: Option<SqlNodeId>,
    ) -> QueryId {
        self.register_query(QueryNode::Select(SelectQueryNode {
            is_distinct,
            select_list,
            table_refs,
            where_expr,
            group_exprs,
            having_expr,
            order_expr,
            windows,
            limit,
        }))
    }

    pub fn make_union_query_node(
        &mut self,
        left: QueryId,
        right: QueryId,
        is_all: bool,
    ) -> QueryId {
        self.register_query(QueryNode::Union(UnionQueryNode {
            left,
            right,
            is_all,
        }))
    }

    pub fn make_explain_node(&mut self, query: QueryId, explain_type: ExplainType) -> SqlNodeId {
        self.register_sql(SqlNode::Explain(ExplainNode {
            query,
            explain_type,
        }))
    }

    /// 输出列：表达式加别名
    pub fn make_res_target_node(&mut self, expr: ExprId, name: &str) -> SqlNodeId {
        self.register_sql(SqlNode::ResTarget(ResTargetNode {
            expr,
            name: name.to_string(),
        }))
    }

    pub fn make_limit_node(&mut self, count: i32) -> SqlNodeId {
        self.register_sql(SqlNode::Limit { count })
    }

    pub fn make_name_node(&mut self, name: &str) -> SqlNodeId {
        self.register_sql(SqlNode::Name {
            name: name.to_string(),
        })
    }

    // ==================== 表引用 ====================

    pub fn make_table_node(&mut self, name: &str, alias: &str) -> TableRefId {
        self.register_table_ref(TableRefNode::Table {
            name: name.to_string(),
            alias: alias.to_string(),
        })
    }

    /// 语法层的连接，左右顺序按给定保存
    pub fn make_join_node(
        &mut self,
        left: TableRefId,
        right: TableRefId,
        join_type: JoinType,
        condition: Option<ExprId>,
        alias: &str,
    ) -> TableRefId {
        self.register_table_ref(TableRefNode::Join {
            left,
            right,
            join_type,
            condition,
            alias: alias.to_string(),
        })
    }

    pub fn make_query_ref_node(&mut self, sub_query: QueryId, alias: &str) -> TableRefId {
        self.register_table_ref(TableRefNode::Query {
            sub_query,
            alias: alias.to_string(),
        })
    }

    // ==================== 窗口 ====================

    /// 引用已声明的具名窗口
    pub fn make_window_def_by_name(&mut self, name: &str) -> SqlNodeId {
        self.register_sql(SqlNode::WindowDef(WindowDefNode {
            name: name.to_string(),
            ..WindowDefNode::default()
        }))
    }

    pub fn make_window_def_node(
        &mut self,
        partitions: Option<ExprListId>,
        orders: Option<ExprId>,
        frame: Option<SqlNodeId>,
    ) -> SqlNodeId {
        self.register_sql(SqlNode::WindowDef(WindowDefNode {
            name: String::new(),
            partitions,
            orders,
            frame,
        }))
    }

    /// 创建窗口帧，起止边界按给定顺序保存，不做校验
    pub fn make_frame_node(&mut self, start: SqlNodeId, end: SqlNodeId) -> SqlNodeId {
        self.register_sql(SqlNode::Frame(FrameNode {
            frame_type: FrameType::Unset,
            start,
            end,
        }))
    }

    /// 以 RANGE 单位包装已有的帧，生成新节点
    pub fn make_range_frame_node(&mut self, frame: SqlNodeId) -> NodeResult<SqlNodeId> {
        self.make_unit_frame_node(frame, FrameType::Range)
    }

    /// 以 ROWS 单位包装已有的帧，生成新节点
    pub fn make_rows_frame_node(&mut self, frame: SqlNodeId) -> NodeResult<SqlNodeId> {
        self.make_unit_frame_node(frame, FrameType::Rows)
    }

    fn make_unit_frame_node(
        &mut self,
        frame: SqlNodeId,
        frame_type: FrameType,
    ) -> NodeResult<SqlNodeId> {
        let (start, end) = match self.sql_node(frame)? {
            SqlNode::Frame(node) => (node.start, node.end),
            _ => return Err(Self::mismatch(frame, "FrameNode")),
        };
        Ok(self.register_sql(SqlNode::Frame(FrameNode {
            frame_type,
            start,
            end,
        })))
    }

    /// 无偏移量的边界：UNBOUNDED PRECEDING / CURRENT ROW / UNBOUNDED FOLLOWING
    pub fn make_frame_bound(&mut self, bound_type: BoundType) -> SqlNodeId {
        self.register_sql(SqlNode::FrameBound(FrameBoundNode {
            bound_type,
            offset: None,
        }))
    }

    /// 带偏移量的边界，如 `3 PRECEDING`
    pub fn make_frame_bound_with_offset(
        &mut self,
        bound_type: BoundType,
        offset: ExprId,
    ) -> SqlNodeId {
        self.register_sql(SqlNode::FrameBound(FrameBoundNode {
            bound_type,
            offset: Some(offset),
        }))
    }

    // ==================== DDL / DML ====================

    pub fn make_create_table_node(
        &mut self,
        if_not_exists: bool,
        table_name: &str,
        column_descs: Option<NodeListId>,
    ) -> SqlNodeId {
        self.register_sql(SqlNode::CreateTable(CreateTableNode {
            if_not_exists,
            table_name: table_name.to_string(),
            column_descs,
        }))
    }

    pub fn make_column_desc_node(
        &mut self,
        column_name: &str,
        data_type: DataType,
        not_null: bool,
    ) -> SqlNodeId {
        self.register_sql(SqlNode::ColumnDesc(ColumnDescNode {
            column_name: column_name.to_string(),
            data_type,
            not_null,
        }))
    }

    pub fn make_insert_table_node(
        &mut self,
        table_name: &str,
        columns: Option<ExprListId>,
        values: Option<ExprListId>,
    ) -> SqlNodeId {
        self.register_sql(SqlNode::InsertStmt(InsertStmtNode {
            table_name: table_name.to_string(),
            columns,
            values,
        }))
    }

    pub fn make_cmd_node(&mut self, cmd_type: CmdType) -> SqlNodeId {
        self.register_sql(SqlNode::Cmd(CmdNode {
            cmd_type,
            arg: None,
        }))
    }

    pub fn make_cmd_node_with_arg(&mut self, cmd_type: CmdType, arg: &str) -> SqlNodeId {
        self.register_sql(SqlNode::Cmd(CmdNode {
            cmd_type,
            arg: Some(arg.to_string()),
        }))
    }

    pub fn make_dataset(&mut self, table: &str) -> SqlNodeId {
        self.register_sql(SqlNode::Dataset {
            table: table.to_string(),
        })
    }

    pub fn make_map_node(&mut self, nodes: &[SqlNodeId]) -> SqlNodeId {
        self.register_sql(SqlNode::Map {
            nodes: nodes.to_vec(),
        })
    }

    // ==================== 列索引 ====================

    /// 由显式组成部分构造列索引
    pub fn make_column_index_node(
        &mut self,
        keys: &[&str],
        ts: Option<&str>,
        ttl: Option<ExprId>,
        version: Option<&str>,
    ) -> SqlNodeId {
        self.register_sql(SqlNode::ColumnIndex(ColumnIndexNode {
            keys: keys.iter().map(|key| key.to_string()).collect(),
            ts: ts.map(str::to_string),
            ttl,
            version: version.map(str::to_string),
            version_count: None,
        }))
    }

    /// 由索引项列表构造列索引
    ///
    /// 键累加；时间列、TTL、版本列若重复出现，以后出现者为准。
    /// 列表中的非索引项节点被忽略
    pub fn make_column_index_from_items(&mut self, items: NodeListId) -> NodeResult<SqlNodeId> {
        let mut index = ColumnIndexNode::default();
        for item in &self.node_list(items)?.items {
            match self.parser_node(*item)? {
                ParserNode::Sql(SqlNode::IndexItem(item)) => match item {
                    IndexItemNode::Key { keys } => index.keys.extend(keys.iter().cloned()),
                    IndexItemNode::Ts { name } => index.ts = Some(name.clone()),
                    IndexItemNode::Ttl { expr } => index.ttl = Some(*expr),
                    IndexItemNode::Version { name, count } => {
                        index.version = Some(name.clone());
                        index.version_count = *count;
                    }
                },
                other => {
                    log::debug!("列索引忽略非索引项节点: {}", other.node_type());
                }
            }
        }
        Ok(self.register_sql(SqlNode::ColumnIndex(index)))
    }

    /// 由名称节点或列引用组成的列表构造索引键
    pub fn make_key_node(&mut self, key_list: NodeListId) -> NodeResult<SqlNodeId> {
        let mut keys = Vec::new();
        for item in &self.node_list(key_list)?.items {
            match self.parser_node(*item)? {
                ParserNode::Sql(SqlNode::Name { name }) => keys.push(name.clone()),
                ParserNode::Expr(ExprNode::ColumnRef(column)) => {
                    keys.push(column.column_name.clone())
                }
                other => {
                    log::debug!("索引键忽略节点: {}", other.node_type());
                }
            }
        }
        Ok(self.register_sql(SqlNode::IndexItem(IndexItemNode::Key { keys })))
    }

    pub fn make_index_key_node(&mut self, key: &str) -> SqlNodeId {
        self.register_sql(SqlNode::IndexItem(IndexItemNode::Key {
            keys: vec![key.to_string()],
        }))
    }

    pub fn make_index_ts_node(&mut self, ts: &str) -> SqlNodeId {
        self.register_sql(SqlNode::IndexItem(IndexItemNode::Ts {
            name: ts.to_string(),
        }))
    }

    pub fn make_index_ttl_node(&mut self, ttl_expr: ExprId) -> SqlNodeId {
        self.register_sql(SqlNode::IndexItem(IndexItemNode::Ttl { expr: ttl_expr }))
    }

    pub fn make_index_version_node(&mut self, version: &str) -> SqlNodeId {
        self.register_sql(SqlNode::IndexItem(IndexItemNode::Version {
            name: version.to_string(),
            count: None,
        }))
    }

    pub fn make_index_version_node_with_count(&mut self, version: &str, count: i32) -> SqlNodeId {
        self.register_sql(SqlNode::IndexItem(IndexItemNode::Version {
            name: version.to_string(),
            count: Some(count),
        }))
    }
}
