use serde::{Deserialize, Serialize};

use crate::error::EditorError;

/// 主题槽位数量
pub const TOPIC_SLOTS: usize = 4;

/// 固定 4 个槽位的主题列表，空字符串表示未填写
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Topics([String; TOPIC_SLOTS]);

impl Topics {
    /// 原地替换指定槽位，长度不变
    pub fn update_topic(
        &mut self,
        index: usize,
        value: impl Into<String>,
    ) -> Result<(), EditorError> {
        let slot = self
            .0
            .get_mut(index)
            .ok_or(EditorError::TopicIndexOutOfRange {
                index,
                slots: TOPIC_SLOTS,
            })?;
        *slot = value.into();
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn filled(&self) -> usize {
        self.0.iter().filter(|t| !t.trim().is_empty()).count()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.to_vec()
    }
}

/// 多余的槽位被截断，不足的补空
impl From<Vec<String>> for Topics {
    fn from(values: Vec<String>) -> Self {
        let mut topics = Topics::default();
        for (slot, value) in topics.0.iter_mut().zip(values) {
            *slot = value;
        }
        topics
    }
}

impl From<Topics> for Vec<String> {
    fn from(topics: Topics) -> Self {
        topics.0.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_replaces_slot_in_place() {
        let mut topics = Topics::default();
        topics.update_topic(2, "Type Systems").unwrap();
        assert_eq!(topics.to_vec(), vec!["", "", "Type Systems", ""]);
        assert_eq!(topics.filled(), 1);
    }

    #[test]
    fn update_outside_slots_is_rejected() {
        let mut topics = Topics::default();
        assert_eq!(
            topics.update_topic(4, "Overflow"),
            Err(EditorError::TopicIndexOutOfRange { index: 4, slots: 4 })
        );
        assert_eq!(topics, Topics::default());
    }

    #[test]
    fn conversion_keeps_exactly_four_slots() {
        let long: Topics = vec!["a", "b", "c", "d", "e"]
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>()
            .into();
        assert_eq!(long.to_vec(), vec!["a", "b", "c", "d"]);

        let short = Topics::from(vec!["x".to_string()]);
        assert_eq!(short.to_vec().len(), TOPIC_SLOTS);
    }
}
