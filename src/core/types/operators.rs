//! 操作符类型定义
//!
//! 表达式节点和函数体赋值语句共用同一套操作符标签。
//! 构造阶段不检查操作符与操作数类型是否匹配

use serde::{Deserialize, Serialize};
use std::fmt;

/// 操作符标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FnOperator {
    // 算术操作
    Add,
    Minus,
    Multi,
    Div,
    FDiv,
    Mod,

    // 比较操作
    Eq,
    Neq,
    Lt,
    Le,
    Gt,
    Ge,

    // 逻辑操作
    And,
    Or,
    Xor,
    Not,

    // 访问操作
    Dot,
    At,
    Bracket,
    Paren,
    Null,
}

impl FnOperator {
    pub fn name(&self) -> &'static str {
        match self {
            FnOperator::Add => "+",
            FnOperator::Minus => "-",
            FnOperator::Multi => "*",
            FnOperator::Div => "DIV",
            FnOperator::FDiv => "/",
            FnOperator::Mod => "%",
            FnOperator::Eq => "=",
            FnOperator::Neq => "!=",
            FnOperator::Lt => "<",
            FnOperator::Le => "<=",
            FnOperator::Gt => ">",
            FnOperator::Ge => ">=",
            FnOperator::And => "AND",
            FnOperator::Or => "OR",
            FnOperator::Xor => "XOR",
            FnOperator::Not => "NOT",
            FnOperator::Dot => ".",
            FnOperator::At => "@",
            FnOperator::Bracket => "[]",
            FnOperator::Paren => "()",
            FnOperator::Null => "",
        }
    }

    /// 操作数数量
    pub fn arity(&self) -> usize {
        match self {
            FnOperator::Not | FnOperator::Paren => 1,
            FnOperator::Null => 0,
            _ => 2,
        }
    }

    /// 是否可作为复合赋值操作符（`+=`、`-=` 等）
    pub fn is_compound_assign(&self) -> bool {
        matches!(
            self,
            FnOperator::Add
                | FnOperator::Minus
                | FnOperator::Multi
                | FnOperator::FDiv
                | FnOperator::Div
                | FnOperator::Mod
        )
    }
}

impl fmt::Display for FnOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
