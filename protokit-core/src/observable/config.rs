//! 事件中心配置
//!
use crate::error::ProtoResult;
use serde::{Deserialize, Serialize};

/// 广播时订阅者序列的遍历方式
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    /// 按实时序列逐个推进：广播中追加的订阅者会被调用，移除会使后续位置前移
    #[default]
    Live,
    /// 广播开始时复制序列，广播中的增删只影响下一次广播
    Snapshot,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    pub dispatch: DispatchMode,
}

impl HubConfig {
    pub fn from_json(raw: &str) -> ProtoResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}
