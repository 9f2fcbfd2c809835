pub mod error;
pub mod types;

pub use error::{NodeError, NodeResult};
pub use types::{
    BoundType, CmdType, DataType, ExplainType, FnOperator, FrameType, JoinType,
};
