//! 函数体节点工厂

use super::NodeManager;
use crate::core::error::{NodeError, NodeResult};
use crate::core::types::FnOperator;
use crate::node::fn_node::{FnAssignNode, FnBareStmt, FnHeaderNode, FnIfElseBlock, FnNode};
use crate::node::handle::{ExprId, FnListId, FnNodeId, TypeNodeId};
use crate::node::sql_node::ParserNode;

impl NodeManager {
    /// 创建无载荷的函数体语句（break / continue / pass）
    pub fn make_fn_node(&mut self, stmt: FnBareStmt) -> FnNodeId {
        self.register_fn(FnNode::Bare(stmt))
    }

    pub fn make_fn_def_node(&mut self, header: FnNodeId, block: FnListId) -> FnNodeId {
        self.register_fn(FnNode::Def { header, block })
    }

    pub fn make_fn_header_node(
        &mut self,
        name: &str,
        params: Option<FnListId>,
        return_type: Option<TypeNodeId>,
    ) -> FnNodeId {
        self.register_fn(FnNode::Header(FnHeaderNode {
            name: name.to_string(),
            params,
            return_type,
        }))
    }

    pub fn make_fn_para_node(&mut self, name: &str, para_type: TypeNodeId) -> FnNodeId {
        self.register_fn(FnNode::Para {
            name: name.to_string(),
            para_type,
        })
    }

    pub fn make_assign_node(&mut self, name: &str, expr: ExprId) -> FnNodeId {
        self.register_fn(FnNode::Assign(FnAssignNode {
            name: name.to_string(),
            expr,
            op: None,
        }))
    }

    /// 复合赋值，如 `x += 1`
    pub fn make_compound_assign_node(
        &mut self,
        name: &str,
        expr: ExprId,
        op: FnOperator,
    ) -> FnNodeId {
        self.register_fn(FnNode::Assign(FnAssignNode {
            name: name.to_string(),
            expr,
            op: Some(op),
        }))
    }

    pub fn make_return_stmt_node(&mut self, value: ExprId) -> FnNodeId {
        self.register_fn(FnNode::Return { value })
    }

    pub fn make_if_stmt_node(&mut self, condition: ExprId) -> FnNodeId {
        self.register_fn(FnNode::If { condition })
    }

    pub fn make_elif_stmt_node(&mut self, condition: ExprId) -> FnNodeId {
        self.register_fn(FnNode::Elif { condition })
    }

    pub fn make_else_stmt_node(&mut self) -> FnNodeId {
        self.register_fn(FnNode::Else)
    }

    pub fn make_fn_if_block(&mut self, if_node: FnNodeId, block: FnListId) -> FnNodeId {
        self.register_fn(FnNode::IfBlock { if_node, block })
    }

    pub fn make_fn_elif_block(&mut self, elif_node: FnNodeId, block: FnListId) -> FnNodeId {
        self.register_fn(FnNode::ElifBlock { elif_node, block })
    }

    pub fn make_fn_else_block(&mut self, block: FnListId) -> FnNodeId {
        self.register_fn(FnNode::ElseBlock { block })
    }

    pub fn make_fn_if_else_block(
        &mut self,
        if_block: FnNodeId,
        else_block: Option<FnNodeId>,
    ) -> FnNodeId {
        self.register_fn(FnNode::IfElseBlock(FnIfElseBlock {
            if_block,
            elif_blocks: Vec::new(),
            else_block,
        }))
    }

    /// 向 if/else 组合块追加一个 elif 块
    pub fn add_elif_block(&mut self, if_else: FnNodeId, elif_block: FnNodeId) -> NodeResult<()> {
        self.check(elif_block)?;
        match self.parser_slot_mut(if_else)? {
            ParserNode::Fn(FnNode::IfElseBlock(block)) => {
                block.elif_blocks.push(elif_block);
                Ok(())
            }
            _ => Err(NodeError::NotAContainer {
                index: if_else.index(),
                reason: "不是 if/else 组合块",
            }),
        }
    }

    pub fn make_for_in_stmt_node(&mut self, var_name: &str, iterable: ExprId) -> FnNodeId {
        self.register_fn(FnNode::ForIn {
            var_name: var_name.to_string(),
            iterable,
        })
    }

    pub fn make_for_in_block(&mut self, for_in: FnNodeId, block: FnListId) -> FnNodeId {
        self.register_fn(FnNode::ForInBlock { for_in, block })
    }
}
