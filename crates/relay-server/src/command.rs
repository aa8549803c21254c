//! Administrator command grammar and routing.
//!
//! Every inbound text message is answered with exactly one reply. Only the
//! administrator can manage recipients; anyone else gets their own user ID
//! back, which is how new family members find out what to send the admin.

use relay_contacts::{ContactError, ContactList, RecipientId, RecipientSet};
use tracing::{debug, info};

const ADD_PREFIX: &str = "新增";
const REMOVE_PREFIX: &str = "刪除";
const LIST_COMMAND: &str = "清單";

/// A parsed administrator command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `新增 <id>`: add a recipient.
    Add(String),
    /// `刪除 <id>`: remove a recipient.
    Remove(String),
    /// `清單`: list recipients.
    List,
    /// Anything else.
    Help,
}

impl Command {
    /// Parses one line of message text.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let text = text.trim();

        if let Some(id) = text.strip_prefix(ADD_PREFIX) {
            Self::Add(id.trim().to_string())
        } else if let Some(id) = text.strip_prefix(REMOVE_PREFIX) {
            Self::Remove(id.trim().to_string())
        } else if text == LIST_COMMAND {
            Self::List
        } else {
            Self::Help
        }
    }
}

/// Reply texts sent back to LINE users.
pub mod replies {
    use super::{ContactError, ContactList};

    /// Usage text for the administrator.
    pub const HELP: &str = "📖 指令說明\n\
        新增 <User ID>：新增聯絡人\n\
        刪除 <User ID>：刪除聯絡人\n\
        清單：查看所有聯絡人";

    /// Reply when the sender's user ID is not available (e.g. group chats).
    pub const UNKNOWN_SENDER: &str = "無法取得你的 User ID，請以一對一聊天傳送訊息";

    /// Reply after adding a recipient.
    #[must_use]
    pub fn added(count: usize) -> String {
        format!("✅ 已新增聯絡人\n總共 {count} 人")
    }

    /// Reply after removing a recipient.
    #[must_use]
    pub fn removed(count: usize) -> String {
        format!("✅ 已刪除聯絡人\n總共 {count} 人")
    }

    /// Reply listing all recipients.
    #[must_use]
    pub fn list(list: &ContactList) -> String {
        format!("📋 聯絡人清單（共 {} 人）\n{list}", list.len())
    }

    /// Reply telling a non-administrator their own user ID.
    #[must_use]
    pub fn your_id(sender: &str) -> String {
        format!("你的 User ID：\n{sender}")
    }

    /// Reply describing a failed contact operation.
    #[must_use]
    pub fn error(err: &ContactError) -> &'static str {
        match err {
            ContactError::InvalidFormat { .. } => "❌ ID 格式錯誤（需為 U 開頭的 33 碼）",
            ContactError::AlreadyExists { .. } => "⚠️ 此聯絡人已存在",
            ContactError::NotFound { .. } => "❌ 找不到此聯絡人",
            ContactError::ProtectedIdentifier { .. } => "❌ 無法刪除管理員",
            ContactError::ReadOnly => "❌ 目前為單一收件人模式，無法管理聯絡人",
        }
    }
}

/// Dispatches message text from a sender to the recipient set.
#[derive(Debug, Clone, Copy)]
pub struct CommandRouter<'a> {
    admin: &'a RecipientId,
    recipients: &'a dyn RecipientSet,
}

impl<'a> CommandRouter<'a> {
    /// Creates a router for the given administrator and recipient set.
    #[must_use]
    pub const fn new(admin: &'a RecipientId, recipients: &'a dyn RecipientSet) -> Self {
        Self { admin, recipients }
    }

    /// Handles one message and returns the reply text.
    #[must_use]
    pub fn handle(&self, sender: Option<&str>, text: &str) -> String {
        let Some(sender) = sender else {
            return replies::UNKNOWN_SENDER.to_string();
        };

        if self.admin != sender {
            debug!(sender = %sender, "non-administrator message, replying with user ID");
            return replies::your_id(sender);
        }

        self.execute(Command::parse(text))
    }

    /// Executes an administrator command and returns the reply text.
    #[must_use]
    pub fn execute(&self, command: Command) -> String {
        let result = match &command {
            Command::Add(id) => self.recipients.add(id).map(replies::added),
            Command::Remove(id) => self.recipients.remove(id).map(replies::removed),
            Command::List => return replies::list(&self.recipients.list()),
            Command::Help => return replies::HELP.to_string(),
        };

        result.unwrap_or_else(|err| {
            info!(?command, error = %err, "administrator command rejected");
            replies::error(&err).to_string()
        })
    }
}
