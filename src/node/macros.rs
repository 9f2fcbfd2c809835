//! 节点句柄宏定义
//!
//! 提供宏来生成各类节点句柄，减少样板代码

/// 定义节点句柄的宏
///
/// 句柄由 `(管理器ID, 注册表下标)` 组成，按值复制，不参与节点生命周期管理。
/// `widen` 分支额外生成到指定通用句柄的 `From` 转换
///
/// # 示例
/// ```ignore
/// define_node_handle! {
///     /// 表达式节点句柄
///     pub struct ExprId;
///     category: Parser
///     widen: SqlNodeId
/// }
/// ```
#[macro_export]
macro_rules! define_node_handle {
    (
        $(#[$meta:meta])*
        pub struct $name:ident;
        category: $category:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub struct $name {
            arena: u32,
            index: u32,
        }

        impl $name {
            pub(crate) fn new(arena: u32, index: u32) -> Self {
                Self { arena, index }
            }

            /// 所属管理器ID
            pub fn arena_id(&self) -> u32 {
                self.arena
            }

            /// 注册表下标
            pub fn index(&self) -> u32 {
                self.index
            }

            pub fn category(&self) -> $crate::node::handle::NodeCategory {
                $crate::node::handle::NodeCategory::$category
            }
        }

        impl $crate::node::handle::NodeHandle for $name {
            fn arena_id(&self) -> u32 {
                self.arena
            }

            fn index(&self) -> u32 {
                self.index
            }

            fn category(&self) -> $crate::node::handle::NodeCategory {
                $crate::node::handle::NodeCategory::$category
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({}#{})", stringify!($name), self.arena, self.index)
            }
        }
    };

    (
        $(#[$meta:meta])*
        pub struct $name:ident;
        category: $category:ident
        widen: $wide:ident
    ) => {
        $crate::define_node_handle! {
            $(#[$meta])*
            pub struct $name;
            category: $category
        }

        impl From<$name> for $wide {
            fn from(id: $name) -> Self {
                $wide::new(id.arena, id.index)
            }
        }
    };
}
