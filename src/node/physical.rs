//! 物理算子接口
//!
//! 物理算子由物理规划器在外部构造，管理器只登记其所有权，
//! 不了解也不校验算子的内部结构

use std::fmt;

/// 可登记到管理器的物理算子
pub trait PhysicalOpNode: fmt::Debug {
    /// 算子名称，用于快照和日志
    fn name(&self) -> &str;

    /// 算子输出列数，未知时返回 `None`
    fn output_size(&self) -> Option<usize> {
        None
    }
}
