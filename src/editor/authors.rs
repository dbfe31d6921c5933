use tracing::debug;

use crate::error::EditorError;
use crate::models::paper::{AuthorEntry, AuthorField, FieldEvent};

/// 作者数量上限（通讯作者 + 2 位合著者）
pub const MAX_AUTHORS: usize = 3;

/// 作者列表编辑器
///
/// 长度始终在 `[1, MAX_AUTHORS]`；索引 0 为通讯作者，不能删除，
/// 其邮箱绑定登录用户，不能单独编辑。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorList {
    entries: Vec<AuthorEntry>,
}

impl AuthorList {
    pub fn new(corresponding_email: &str) -> Self {
        Self {
            entries: vec![AuthorEntry::corresponding(corresponding_email)],
        }
    }

    /// 追加一位空白作者，返回其索引
    pub fn add_author(&mut self) -> Result<usize, EditorError> {
        if self.entries.len() >= MAX_AUTHORS {
            debug!("作者数量已达上限 {}", MAX_AUTHORS);
            return Err(EditorError::AuthorLimitReached);
        }
        self.entries.push(AuthorEntry::default());
        Ok(self.entries.len() - 1)
    }

    /// 删除指定作者；索引 0 或越界时静默忽略并返回 `false`
    pub fn remove_author(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.entries.len() {
            debug!("忽略删除作者请求: index={}", index);
            return false;
        }
        self.entries.remove(index);
        true
    }

    /// 更新作者字段
    ///
    /// `corresponding` 取复选框的 `checked`，其他字段取 `value`。
    /// 通讯作者的邮箱被锁定，此时返回 `Ok(false)`。
    pub fn update_author_field(
        &mut self,
        index: usize,
        field: AuthorField,
        event: &FieldEvent,
    ) -> Result<bool, EditorError> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(EditorError::AuthorIndexOutOfRange { index, len })?;

        if index == 0 && field == AuthorField::Email {
            return Ok(false);
        }

        let value = event.value.clone();
        match field {
            AuthorField::FirstName => entry.first_name = value,
            AuthorField::LastName => entry.last_name = value,
            AuthorField::Email => entry.email = value,
            AuthorField::Country => entry.country = value,
            AuthorField::Affiliation => entry.affiliation = value,
            AuthorField::WebPage => entry.web_page = value,
            AuthorField::Corresponding => entry.corresponding = event.checked,
        }
        Ok(true)
    }

    /// 用草稿中的作者信息填充（邮箱锁定规则照常生效）
    pub fn fill_from(
        &mut self,
        corresponding: &AuthorEntry,
        co_authors: &[AuthorEntry],
    ) -> Result<(), EditorError> {
        let head = &mut self.entries[0];
        head.first_name = corresponding.first_name.clone();
        head.last_name = corresponding.last_name.clone();
        head.country = corresponding.country.clone();
        head.affiliation = corresponding.affiliation.clone();
        head.web_page = corresponding.web_page.clone();

        for author in co_authors {
            let index = self.add_author()?;
            self.entries[index] = author.clone();
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_add(&self) -> bool {
        self.entries.len() < MAX_AUTHORS
    }

    pub fn get(&self, index: usize) -> Option<&AuthorEntry> {
        self.entries.get(index)
    }

    pub fn as_slice(&self) -> &[AuthorEntry] {
        &self.entries
    }

    pub fn to_vec(&self) -> Vec<AuthorEntry> {
        self.entries.clone()
    }
}
