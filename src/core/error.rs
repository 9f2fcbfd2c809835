//! 节点管理错误类型
//!
//! 节点构造本身不会失败（内存耗尽直接终止进程），
//! 这里的错误只出现在按句柄读取、向容器追加子节点以及加载配置时

use thiserror::Error;

use crate::node::handle::NodeCategory;

/// 节点管理错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    #[error("句柄属于管理器 {handle_arena}，当前管理器为 {arena}")]
    ForeignHandle { arena: u32, handle_arena: u32 },

    #[error("{category} 注册表中的节点 #{index} 不是 {expected}")]
    KindMismatch {
        category: NodeCategory,
        index: u32,
        expected: &'static str,
    },

    #[error("{category} 注册表中不存在节点 #{index}")]
    MissingNode { category: NodeCategory, index: u32 },

    #[error("计划节点 #{index} 最多允许 {arity} 个子节点")]
    ArityExceeded { index: u32, arity: usize },

    #[error("节点 #{index} 不接受追加子节点: {reason}")]
    NotAContainer { index: u32, reason: &'static str },

    #[error("配置错误: {0}")]
    InvalidConfig(String),
}

/// 统一的结果类型
pub type NodeResult<T> = Result<T, NodeError>;
