//! Document Commands - 文档编辑命令

use crate::domain::document::EditStep;

/// 编辑文档命令
#[derive(Debug, Clone)]
pub struct EditDocumentCommand {
    pub steps: Vec<EditStep>,
}
