/// Supplies the bearer token attached to each outbound command.
///
/// `None` is tolerated: the request is sent without an `Authorization` header.
#[async_trait::async_trait]
pub trait SessionProvider: Send + Sync {
    async fn id_token(&self) -> Option<String>;
}

/// Token fixed at startup (config file, CLI flag or environment).
#[derive(Debug, Clone, Default)]
pub struct StaticSession {
    token: Option<String>,
}

impl StaticSession {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|token| !token.trim().is_empty()),
        }
    }
}

#[async_trait::async_trait]
impl SessionProvider for StaticSession {
    async fn id_token(&self) -> Option<String> {
        self.token.clone()
    }
}
