//! 类型节点定义

use serde::Serialize;
use std::fmt;

use crate::core::types::DataType;

/// 类型参数
///
/// 参数个数编码在形状里，最多两个（如 `map<string, int64>`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TypeParams {
    None,
    One(DataType),
    Two(DataType, DataType),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeNode {
    pub base: DataType,
    pub params: TypeParams,
}

impl TypeNode {
    pub fn new(base: DataType, params: TypeParams) -> Self {
        Self { base, params }
    }

    /// 按声明顺序返回类型参数
    pub fn generics(&self) -> Vec<DataType> {
        match self.params {
            TypeParams::None => Vec::new(),
            TypeParams::One(v1) => vec![v1],
            TypeParams::Two(v1, v2) => vec![v1, v2],
        }
    }

    pub fn generics_size(&self) -> usize {
        match self.params {
            TypeParams::None => 0,
            TypeParams::One(_) => 1,
            TypeParams::Two(_, _) => 2,
        }
    }
}

impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.params {
            TypeParams::None => write!(f, "{}", self.base),
            TypeParams::One(v1) => write!(f, "{}<{}>", self.base, v1),
            TypeParams::Two(v1, v2) => write!(f, "{}<{}, {}>", self.base, v1, v2),
        }
    }
}
