//! 配置模块
//!
//! 节点管理器的容量预设与日志参数，使用 TOML 文件持久化

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{NodeError, NodeResult};

/// 节点管理器配置
///
/// 每个注册表的初始容量。编译单条查询时节点数量通常在数百以内，
/// 预分配可以避免解析阶段的反复扩容
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ArenaConfig {
    pub parser_capacity: usize,
    pub node_list_capacity: usize,
    pub plan_capacity: usize,
    pub physical_capacity: usize,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            parser_capacity: 256,
            node_list_capacity: 64,
            plan_capacity: 64,
            physical_capacity: 32,
        }
    }
}

/// 日志配置
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub dir: String,
    pub file: String,
    pub max_file_size: u64,
    pub max_files: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: "logs".to_string(),
            file: "querynode".to_string(),
            max_file_size: 100 * 1024 * 1024, // 100MB
            max_files: 5,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub arena: ArenaConfig,
    pub log: LogConfig,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 校验日志轮转参数
    ///
    /// 容量为 0 是合法的，表示不预分配
    pub fn validate(&self) -> NodeResult<()> {
        if self.log.max_file_size == 0 {
            return Err(NodeError::InvalidConfig(
                "log.max_file_size 必须大于 0".to_string(),
            ));
        }
        if self.log.max_files == 0 {
            return Err(NodeError::InvalidConfig(
                "log.max_files 必须大于 0".to_string(),
            ));
        }
        if self.log.level.trim().is_empty() {
            return Err(NodeError::InvalidConfig("log.level 不能为空".to_string()));
        }
        Ok(())
    }
}
