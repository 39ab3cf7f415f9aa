use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::{error::WebError, store::UserStore, views::ViewComposer};

/// Binds the current number of users to `count` before `user/profile` renders.
pub struct ProfileComposer {
    users: UserStore,
}

impl ProfileComposer {
    pub const VIEW: &'static str = "user/profile";

    pub fn new(users: UserStore) -> Self {
        Self { users }
    }
}

#[async_trait]
impl ViewComposer for ProfileComposer {
    async fn compose(&self, data: &mut Map<String, Value>) -> Result<(), WebError> {
        let count = self.users.count().await?;
        data.insert("count".to_string(), Value::from(count));
        Ok(())
    }
}
