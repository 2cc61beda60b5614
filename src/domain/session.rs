/// Chat session scoped to one page: which project room and which user.
///
/// Built once by `ChatClient::init` and replaced only by a fresh init.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionContext {
    pub project_id: i64,
    pub user_id: i64,
}

impl SessionContext {
    pub fn new(project_id: i64, user_id: i64) -> Self {
        Self {
            project_id,
            user_id,
        }
    }
}
