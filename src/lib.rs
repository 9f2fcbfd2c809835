//! QueryNode - 查询编译期的节点管理
//!
//! 一次查询编译过程中产生的语法树、函数体、逻辑计划和物理算子节点
//! 都由一个 `NodeManager` 持有，编译结束时整体释放。
//! 节点之间通过句柄相互引用，句柄不影响生命周期。

pub mod config;
pub mod core;
pub mod node;
pub mod utils;

// 错误和结果类型
pub use crate::core::error::{NodeError, NodeResult};

// 公共标签
pub use crate::core::types::{
    BoundType, CmdType, DataType, ExplainType, FnOperator, FrameType, JoinType,
};

// 节点管理器
pub use node::{NodeManager, NodeStats};

use crate::config::Config;

/// 按配置初始化运行环境
///
/// 校验配置后启动日志系统；日志已启动时不重复初始化。
/// 之后每次编译用 `NodeManager::from_config` 创建管理器
pub fn init(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;
    if !utils::logging::is_initialized() {
        utils::logging::init(&config.log)?;
    }
    log::debug!("节点注册表初始容量: {:?}", config.arena);
    Ok(())
}

/// 刷新日志，程序退出前调用
pub fn shutdown() {
    utils::logging::shutdown();
}
