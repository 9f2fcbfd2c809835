//! 列表容器工厂与追加操作

use super::NodeManager;
use crate::core::error::NodeResult;
use crate::node::handle::{ExprId, ExprListId, FnListId, FnNodeId, NodeListId, SqlNodeId};
use crate::node::node_list::{ExprListNode, FnNodeList, ListNode, SqlNodeList};

impl NodeManager {
    pub fn make_node_list(&mut self) -> NodeListId {
        NodeListId::new(self.id, self.register_list(ListNode::Sql(SqlNodeList::default())))
    }

    /// 创建包含一个元素的节点列表
    pub fn make_node_list_with(&mut self, node: impl Into<SqlNodeId>) -> NodeListId {
        let list = SqlNodeList {
            items: vec![node.into()],
        };
        NodeListId::new(self.id, self.register_list(ListNode::Sql(list)))
    }

    pub fn make_expr_list(&mut self) -> ExprListId {
        ExprListId::new(self.id, self.register_list(ListNode::Expr(ExprListNode::default())))
    }

    pub fn make_expr_list_with(&mut self, expr: ExprId) -> ExprListId {
        let list = ExprListNode { items: vec![expr] };
        ExprListId::new(self.id, self.register_list(ListNode::Expr(list)))
    }

    pub fn make_fn_list(&mut self) -> FnListId {
        FnListId::new(self.id, self.register_list(ListNode::Fn(FnNodeList::default())))
    }

    pub fn make_fn_list_with(&mut self, node: FnNodeId) -> FnListId {
        let list = FnNodeList { items: vec![node] };
        FnListId::new(self.id, self.register_list(ListNode::Fn(list)))
    }

    /// 向节点列表末尾追加
    pub fn push_node(&mut self, list: NodeListId, node: impl Into<SqlNodeId>) -> NodeResult<()> {
        let node = node.into();
        self.check(node)?;
        match self.list_slot_mut(list)? {
            ListNode::Sql(items) => {
                items.items.push(node);
                Ok(())
            }
            _ => Err(Self::mismatch(list, "SqlNodeList")),
        }
    }

    pub fn push_expr(&mut self, list: ExprListId, expr: ExprId) -> NodeResult<()> {
        self.check(expr)?;
        match self.list_slot_mut(list)? {
            ListNode::Expr(items) => {
                items.items.push(expr);
                Ok(())
            }
            _ => Err(Self::mismatch(list, "ExprListNode")),
        }
    }

    pub fn push_fn(&mut self, list: FnListId, node: FnNodeId) -> NodeResult<()> {
        self.check(node)?;
        match self.list_slot_mut(list)? {
            ListNode::Fn(items) => {
                items.items.push(node);
                Ok(())
            }
            _ => Err(Self::mismatch(list, "FnNodeList")),
        }
    }
}
